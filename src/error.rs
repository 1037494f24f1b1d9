use serde_json::Value;
use thiserror::Error;

/// A failure reported by the remote service inside the reply body.
///
/// The legacy dialect signals errors in-band: the body of an otherwise
/// well-formed reply is a JSON object carrying `error_code`/`error_msg`
/// instead of the expected payload shape.
#[derive(Clone, Debug)]
pub struct ApiError {
    /// Remote error code. Usually numeric, but old replies also send strings,
    /// so the raw value is kept.
    pub code: Option<Value>,
    /// Remote error message.
    pub message: String,
    /// HTTP status of the reply that carried the error body.
    pub http_status: u16,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.code {
            Some(code) => write!(f, "[{}] {} (HTTP {})", code, self.message, self.http_status),
            None => write!(f, "{} (HTTP {})", self.message, self.http_status),
        }
    }
}

impl std::error::Error for ApiError {}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn displays_code_and_status() {
        let err = ApiError {
            code: Some(json!(190)),
            message: "Invalid access token".to_string(),
            http_status: 400,
        };
        assert_eq!(err.to_string(), "[190] Invalid access token (HTTP 400)");
    }

    #[test]
    fn displays_without_code() {
        let err = ApiError {
            code: None,
            message: "something went wrong".to_string(),
            http_status: 500,
        };
        assert_eq!(err.to_string(), "something went wrong (HTTP 500)");
    }
}
