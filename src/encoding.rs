use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::protocol::Params;

/// Encode a structured argument (a batch of named queries, an app-properties
/// map) into the single JSON string the dialect expects.
pub fn to_json_arg<T>(value: &T) -> Result<String>
where
    T: Serialize + ?Sized,
{
    Ok(serde_json::to_string(value)?)
}

/// Stringify one parameter value for transmission. Strings go through as-is;
/// structured values are JSON-encoded.
pub fn param_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Form-encode a parameter map (`application/x-www-form-urlencoded`).
pub fn encode_form(params: &Params) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        serializer.append_pair(key, &param_to_string(value));
    }
    serializer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strings_pass_through_unquoted() {
        assert_eq!(param_to_string(&json!("select uid from user")), "select uid from user");
    }

    #[test]
    fn structured_values_are_json_encoded() {
        assert_eq!(param_to_string(&json!(42)), "42");
        assert_eq!(param_to_string(&json!(["a", "b"])), r#"["a","b"]"#);
        assert_eq!(param_to_string(&json!({"k": 1})), r#"{"k":1}"#);
    }

    #[test]
    fn json_arg_round_trips_maps() {
        let queries = json!({"q1": "A", "q2": "B"});
        let encoded = to_json_arg(&queries).unwrap();
        assert_eq!(serde_json::from_str::<Value>(&encoded).unwrap(), queries);
    }

    #[test]
    fn form_encodes_pairs() {
        let params = json!({"format": "json", "query": "a b"})
            .as_object()
            .cloned()
            .unwrap();
        assert_eq!(encode_form(&params), "format=json&query=a+b");
    }
}
