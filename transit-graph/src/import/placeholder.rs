use super::{FieldSpec, ImportError};
use regex::Regex;
use std::collections::BTreeSet;

/// alternatives that consume quoted text and comments whole, so only a `$name`
/// outside them reaches the capture group.
const PLACEHOLDER_REGEX: &str = r#"(?s)'(?:[^'\\]|\\.)*'|"(?:[^"\\]|\\.)*"|`[^`]*`|//[^\n]*|/\*.*?\*/|\$(\w+)"#;

/// returns the distinct parameter names a Cypher query references as
/// `$name`.
///
/// string literals, backtick identifiers and comments are skipped, so
/// `'$5 fare'` or `// don't use $old` is not taken for a parameter.
pub fn extract_placeholders(query: &str) -> Result<BTreeSet<String>, ImportError> {
    let re = Regex::new(PLACEHOLDER_REGEX)
        .map_err(|e| ImportError::PlaceholderPatternError(e.to_string()))?;
    let names = re
        .captures_iter(query)
        .filter_map(|groups| groups.get(1))
        .map(|name| name.as_str().to_string())
        .collect();
    Ok(names)
}

/// checks that a job's query placeholders and declared fields are the same
/// set, and that no field is declared twice.
pub fn validate_fields(job: &str, query: &str, fields: &[FieldSpec]) -> Result<(), ImportError> {
    let mut declared = BTreeSet::new();
    for field in fields {
        if !declared.insert(field.name().to_string()) {
            return Err(ImportError::DuplicateField {
                job: job.to_string(),
                field: field.name().to_string(),
            });
        }
    }
    let placeholders = extract_placeholders(query)?;
    if placeholders == declared {
        return Ok(());
    }
    Err(ImportError::PlaceholderMismatch {
        job: job.to_string(),
        undeclared: placeholders.difference(&declared).cloned().collect(),
        unused: declared.difference(&placeholders).cloned().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(query: &str) -> Vec<String> {
        extract_placeholders(query).unwrap().into_iter().collect()
    }

    #[test]
    fn test_distinct_names_in_order() {
        let query = "MATCH (t:Trip {id: $trip_id}), (s:Stop {id: $stop_id}) \
                     WHERE t.id = $trip_id RETURN s";
        assert_eq!(names(query), vec!["stop_id", "trip_id"]);
    }

    #[test]
    fn test_quoted_text_is_ignored() {
        let query = "CREATE (:Stop {location: point({longitude: toFloat($stop_lon), crs: 'wgs-$84'}), note: \"it's $free\", `$weird`: $stop_id})";
        assert_eq!(names(query), vec!["stop_id", "stop_lon"]);
    }

    #[test]
    fn test_escaped_quote_inside_literal() {
        let query = r"RETURN 'it\'s $not' AS a, $yes AS b";
        assert_eq!(names(query), vec!["yes"]);
    }

    #[test]
    fn test_bare_dollar_is_not_a_name() {
        assert!(names("RETURN '$' + $ AS x").is_empty());
    }

    #[test]
    fn test_comments_are_ignored() {
        let query = "// don't touch $legacy_id\n\
                     CREATE (:Agency {id: $agency_id /* agency's $code */, name: $agency_name})";
        assert_eq!(names(query), vec!["agency_id", "agency_name"]);
    }

    #[test]
    fn test_line_comment_with_apostrophe_validates() {
        let fields = [FieldSpec::new("agency_id")];
        let query = "// don't touch\nCREATE (:Agency {id: $agency_id})";
        assert!(validate_fields("agencies", query, &fields).is_ok());
    }

    #[test]
    fn test_matching_fields_validate() {
        let fields = [FieldSpec::new("agency_id"), FieldSpec::new("agency_name")];
        let query = "CREATE (:Agency {id: $agency_id, name: $agency_name})";
        assert!(validate_fields("agencies", query, &fields).is_ok());
    }

    #[test]
    fn test_mismatch_names_both_sides() {
        let fields = [FieldSpec::new("agency_id"), FieldSpec::new("agency_url")];
        let query = "CREATE (:Agency {id: $agency_id, name: $agency_name})";
        match validate_fields("agencies", query, &fields) {
            Err(ImportError::PlaceholderMismatch {
                undeclared, unused, ..
            }) => {
                assert_eq!(undeclared, vec!["agency_name"]);
                assert_eq!(unused, vec!["agency_url"]);
            }
            other => panic!("expected placeholder mismatch, found {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_field() {
        let fields = [FieldSpec::new("stop_id"), FieldSpec::new("stop_id")];
        let result = validate_fields("stops", "CREATE (:Stop {id: $stop_id})", &fields);
        assert!(matches!(result, Err(ImportError::DuplicateField { .. })));
    }
}
