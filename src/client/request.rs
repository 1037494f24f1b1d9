use reqwest::Method;
use serde_json::Value;

use crate::protocol::{self, Params, TransportOptions};

/// One outbound invocation of a named remote method.
///
/// Built fresh per call and owned by it. The format parameter is forced to
/// JSON after the caller's parameters are merged, so the dispatcher always
/// wins on that key; the read-only directive is computed from the method
/// registry.
#[derive(Clone, Debug)]
pub struct RestRequest {
    method: String,
    params: Params,
    verb: Method,
    options: TransportOptions,
}

impl RestRequest {
    pub fn new(
        method: impl Into<String>,
        mut params: Params,
        http_options: Params,
        verb: Method,
    ) -> Self {
        let method = method.into();
        params.insert(
            protocol::FORMAT_PARAM.to_string(),
            Value::String(protocol::JSON_FORMAT.to_string()),
        );
        let options = TransportOptions {
            rest_api: true,
            read_only: protocol::is_read_only(&method),
            extra: http_options,
        };
        Self {
            method,
            params,
            verb,
            options,
        }
    }

    /// Request path: `method/` followed by the method name.
    pub fn path(&self) -> String {
        protocol::method_path(&self.method)
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn verb(&self) -> &Method {
        &self.verb
    }

    pub fn options(&self) -> &TransportOptions {
        &self.options
    }
}
