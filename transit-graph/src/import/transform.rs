//! field transforms and inclusion predicates used by [`super::FieldSpec`].
use chrono::NaiveTime;
use serde_json::Value;

/// output format of [`normalize_time`]
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// passes the raw cell through as a string value
pub fn identity(raw: &str) -> Result<Value, String> {
    Ok(Value::String(raw.to_string()))
}

/// accepts every value
pub fn always(_value: &Value) -> bool {
    true
}

/// rejects null and empty-string values
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// normalizes a GTFS time of day to `HH:MM:SS` on a 24 hour clock.
///
/// GTFS counts trips that run past midnight on the service day they
/// started, so hours can be 24 or more (`25:10:00`); those wrap around to
/// `01:10:00`. a blank cell, allowed for stops that are not timepoints,
/// becomes null.
pub fn normalize_time(raw: &str) -> Result<Value, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Value::Null);
    }
    let parts: Vec<&str> = trimmed.split(':').collect();
    let [hour, minute, second] = parts.as_slice() else {
        return Err(format!("expected time as HH:MM:SS, found '{raw}'"));
    };
    let hour = parse_component(hour, "hour", raw)?;
    let minute = parse_component(minute, "minute", raw)?;
    let second = parse_component(second, "second", raw)?;
    let time = NaiveTime::from_hms_opt(hour % 24, minute, second)
        .ok_or_else(|| format!("time '{raw}' is out of range"))?;
    Ok(Value::String(time.format(TIME_FORMAT).to_string()))
}

fn parse_component(component: &str, name: &str, raw: &str) -> Result<u32, String> {
    component
        .parse::<u32>()
        .map_err(|e| format!("invalid {name} in time '{raw}': {e}"))
}
