use super::{Marker, PlannerError};
use serde::Deserialize;
use serde_json::{Map, Value};

/// a graph node as returned by the planner queries: its labels and its
/// property map.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlanNode {
    pub labels: Vec<String>,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl PlanNode {
    /// a one-line description of the node for a plan step
    pub fn describe(&self) -> Result<String, PlannerError> {
        let label = self.labels.first().map(String::as_str);
        let description = match label {
            Some("Agency") => format!("operator {}", self.text("name")),
            Some("Route") => format!(
                "route {} {}",
                self.text("short_name"),
                self.text("long_name")
            ),
            Some("Trip") => format!("trip {}", self.text("headsign")),
            Some("Stop") => format!("stop {}", self.text("name")),
            Some("Stoptime") => format!("arrives at {}", self.text("arrival_time")),
            _ => return Err(PlannerError::UnexpectedNode(self.labels.clone())),
        };
        Ok(description.trim_end().to_string())
    }

    /// the node's location, for stops that have one. the HTTP endpoint
    /// encodes points as `{"type": "Point", "coordinates": [lon, lat], ...}`.
    pub fn location(&self) -> Option<Marker> {
        if !self.labels.iter().any(|l| l == "Stop") {
            return None;
        }
        let coordinates = self.properties.get("location")?.get("coordinates")?.as_array()?;
        match coordinates.as_slice() {
            [lon, lat, ..] => Some(Marker {
                lon: lon.as_f64()?,
                lat: lat.as_f64()?,
            }),
            _ => None,
        }
    }

    fn text(&self, key: &str) -> String {
        match self.properties.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(value: Value) -> PlanNode {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_describe_each_label() {
        let route = node(json!({"labels": ["Route"], "properties": {"short_name": "12", "long_name": "Harbour Loop"}}));
        assert_eq!(route.describe().unwrap(), "route 12 Harbour Loop");
        let stoptime = node(json!({"labels": ["Stoptime"], "properties": {"arrival_time": "08:05:00"}}));
        assert_eq!(stoptime.describe().unwrap(), "arrives at 08:05:00");
        let trip = node(json!({"labels": ["Trip"], "properties": {}}));
        assert_eq!(trip.describe().unwrap(), "trip");
    }

    #[test]
    fn test_unknown_label() {
        let shape = node(json!({"labels": ["Shape"], "properties": {}}));
        assert!(matches!(shape.describe(), Err(PlannerError::UnexpectedNode(_))));
    }

    #[test]
    fn test_stop_location() {
        let stop = node(json!({"labels": ["Stop"], "properties": {
            "name": "Central",
            "location": {"type": "Point", "coordinates": [34.78, 32.08], "crs": {"srid": 4326, "name": "wgs-84"}}
        }}));
        assert_eq!(stop.location(), Some(Marker { lon: 34.78, lat: 32.08 }));
        let agency = node(json!({"labels": ["Agency"], "properties": {"name": "Metro"}}));
        assert_eq!(agency.location(), None);
    }
}
