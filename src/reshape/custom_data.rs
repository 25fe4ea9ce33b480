use log::debug;
use serde_json::{Map, Value};

/// Parses the custom-data field of a row. Anything other than a JSON object
/// (including an empty field) yields `None` and leaves the custom columns
/// blank for that row; it is not a run-aborting error.
pub fn parse(raw: &str) -> Option<Map<String, Value>> {
    if raw.is_empty() {
        return None;
    }

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Some(map),
        Ok(other) => {
            debug!("custom data is not a JSON object ({})", other);
            None
        }
        Err(err) => {
            debug!("unparseable custom data, leaving custom columns blank: {}", err);
            None
        }
    }
}

/// Renders one custom-data entry as a CSV cell: strings verbatim, null as
/// empty, everything else as its JSON text.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
