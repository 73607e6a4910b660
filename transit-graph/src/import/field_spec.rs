use super::transform;
use serde_json::Value;

/// one extracted source row, keyed by field name. holds every field declared
/// by its import job.
pub type Record = serde_json::Map<String, Value>;

/// decides from a field's transformed value whether its row is kept
pub type IncludeFn = fn(&Value) -> bool;

/// converts a raw cell into the value sent to the graph store. an `Err`
/// carries a description of why the cell could not be converted.
pub type TransformFn = fn(&str) -> Result<Value, String>;

/// a named source column with its transform and inclusion predicate.
#[derive(Clone, Debug)]
pub struct FieldSpec {
    name: String,
    include: IncludeFn,
    transform: TransformFn,
}

impl FieldSpec {
    /// a field passed through as-is, never excluding its row
    pub fn new(name: &str) -> FieldSpec {
        FieldSpec {
            name: name.to_string(),
            include: transform::always,
            transform: transform::identity,
        }
    }

    pub fn with_include(mut self, include: IncludeFn) -> FieldSpec {
        self.include = include;
        self
    }

    pub fn with_transform(mut self, transform: TransformFn) -> FieldSpec {
        self.transform = transform;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// transforms a raw cell, then evaluates the inclusion predicate on the
    /// transformed value. `Ok(None)` means the row must be dropped.
    pub fn extract(&self, raw: &str) -> Result<Option<Value>, String> {
        let value = (self.transform)(raw)?;
        if (self.include)(&value) {
            Ok(Some(value))
        } else {
            Ok(None)
        }
    }
}
