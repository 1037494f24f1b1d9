use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{ApiError, Error, Result};
use crate::protocol::Response;

const ERROR_CODE_KEY: &str = "error_code";
const ERROR_MSG_KEY: &str = "error_msg";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error_code: Option<Value>,
    error_msg: Option<String>,
}

/// One named result set inside a raw multi-query reply.
#[derive(Debug, Deserialize)]
struct MultiQueryEntry {
    name: String,
    fql_result_set: Vec<Value>,
}

/// Classify a transport reply: error-shaped bodies become [`ApiError`],
/// anything else passes through unchanged.
///
/// Only an object body carrying an error key is a failure; scalars and
/// arrays are always payloads, whatever they contain.
pub(crate) fn classify(reply: Response) -> Result<Value> {
    let is_error = matches!(
        &reply.body,
        Value::Object(map) if map.contains_key(ERROR_CODE_KEY) || map.contains_key(ERROR_MSG_KEY)
    );
    if !is_error {
        return Ok(reply.body);
    }

    let http_status = reply.status.as_u16();
    let body: ErrorBody = serde_json::from_value(reply.body)?;
    let message = body
        .error_msg
        .or_else(|| {
            body.error_code.as_ref().map(|code| match code {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
        })
        .unwrap_or_else(|| "unknown remote error".to_string());

    Err(Error::Api(ApiError {
        code: body.error_code,
        message,
        http_status,
    }))
}

/// Reshape a raw multi-query reply (an array of named result sets) into a
/// name-keyed map. Duplicate names overwrite; the last entry wins.
pub(crate) fn reshape_multiquery(body: Value) -> Result<HashMap<String, Vec<Value>>> {
    let entries: Vec<MultiQueryEntry> = serde_json::from_value(body)?;
    Ok(entries
        .into_iter()
        .map(|entry| (entry.name, entry.fql_result_set))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use serde_json::json;

    #[test]
    fn payload_bodies_pass_through() {
        let body = json!({"uid": 4, "first_name": "Mark"});
        let reply = Response::new(StatusCode::OK, body.clone());
        assert_eq!(classify(reply).unwrap(), body);
    }

    #[test]
    fn scalar_and_array_bodies_are_never_errors() {
        let reply = Response::new(StatusCode::OK, json!(2));
        assert_eq!(classify(reply).unwrap(), json!(2));

        let reply = Response::new(StatusCode::OK, json!(["error_code", "error_msg"]));
        assert_eq!(classify(reply).unwrap(), json!(["error_code", "error_msg"]));
    }

    #[test]
    fn error_code_bodies_become_api_errors() {
        let reply = Response::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"error_code": 190, "error_msg": "Invalid access token"}),
        );
        match classify(reply) {
            Err(Error::Api(err)) => {
                assert_eq!(err.code, Some(json!(190)));
                assert_eq!(err.message, "Invalid access token");
                assert_eq!(err.http_status, 500);
            }
            other => panic!("expected an API error, got {:?}", other),
        }
    }

    #[test]
    fn a_bare_error_code_still_yields_a_message() {
        let reply = Response::new(
            StatusCode::OK,
            json!({"error_code": "An error occurred!"}),
        );
        match classify(reply) {
            Err(Error::Api(err)) => {
                assert_eq!(err.message, "An error occurred!");
                assert_eq!(err.http_status, 200);
            }
            other => panic!("expected an API error, got {:?}", other),
        }
    }

    #[test]
    fn reshapes_named_result_sets() {
        let raw = json!([
            {"name": "query1", "fql_result_set": [1, 2, 3]},
            {"name": "query2", "fql_result_set": ["a", "b", "c"]}
        ]);
        let reshaped = reshape_multiquery(raw).unwrap();
        assert_eq!(reshaped.len(), 2);
        assert_eq!(reshaped["query1"], vec![json!(1), json!(2), json!(3)]);
        assert_eq!(reshaped["query2"], vec![json!("a"), json!("b"), json!("c")]);
    }

    #[test]
    fn duplicate_names_keep_the_last_result_set() {
        let raw = json!([
            {"name": "q", "fql_result_set": [1]},
            {"name": "q", "fql_result_set": [2]}
        ]);
        let reshaped = reshape_multiquery(raw).unwrap();
        assert_eq!(reshaped.len(), 1);
        assert_eq!(reshaped["q"], vec![json!(2)]);
    }

    #[test]
    fn malformed_multiquery_replies_are_rejected() {
        assert!(matches!(
            reshape_multiquery(json!({"not": "an array"})),
            Err(Error::Json(_))
        ));
    }
}
