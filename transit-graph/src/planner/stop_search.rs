use super::PlannerError;
use crate::graph::{GraphSession, Parameters};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const FIND_STOPS: &str = "MATCH (s:Stop) WHERE all(word IN $words WHERE s.desc CONTAINS word) \
    RETURN s.id AS id, s.name AS name, s.desc AS desc ORDER BY s.name";

/// a stop whose description matched a search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopMatch {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub desc: Option<String>,
}

/// finds stops whose description contains every one of `words`. an empty
/// word list matches nothing.
pub fn find_stops(
    session: &mut dyn GraphSession,
    words: &[String],
) -> Result<Vec<StopMatch>, PlannerError> {
    let words: Vec<Value> = words
        .iter()
        .filter(|w| !w.is_empty())
        .map(|w| Value::String(w.clone()))
        .collect();
    if words.is_empty() {
        return Ok(vec![]);
    }
    let mut parameters = Parameters::new();
    parameters.insert(String::from("words"), Value::Array(words));
    session
        .query(FIND_STOPS, &parameters)?
        .into_iter()
        .map(|row| {
            serde_json::from_value(Value::Object(row)).map_err(|e| PlannerError::DecodeError {
                what: String::from("stop"),
                message: e.to_string(),
            })
        })
        .collect()
}
