use std::collections::HashMap;
use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::request::RestRequest;
use super::response;
use crate::encoding::to_json_arg;
use crate::error::Result;
use crate::protocol::{self, Params};
use crate::transport::{HttpTransport, Transport, TransportConfig};

/// Client for the legacy REST dialect of the platform.
///
/// Every public operation is a thin configuration layer over
/// [`RestClient::rest_call`]: a fixed method name, a handful of parameter
/// overrides, and a verb. Invocation building, transport directives, and
/// error classification are shared underneath and never re-implemented per
/// method.
///
/// The client is `Clone` and holds no mutable state; concurrent calls are
/// independent.
#[derive(Clone)]
pub struct RestClient {
    transport: Arc<dyn Transport>,
}

impl RestClient {
    /// Create a client backed by the built-in HTTP transport.
    pub fn new(config: TransportConfig) -> Self {
        Self {
            transport: Arc::new(HttpTransport::new(config)),
        }
    }

    /// Create a client over a caller-supplied transport.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Invoke a named remote method with the default GET verb.
    ///
    /// `options` is forwarded to the transport uninterpreted (e.g.
    /// `beta: true` to target the beta tier).
    pub async fn rest_call(&self, method: &str, params: Params, options: Params) -> Result<Value> {
        self.rest_call_with_verb(method, params, options, Method::GET)
            .await
    }

    /// Invoke a named remote method with an explicit HTTP verb.
    pub async fn rest_call_with_verb(
        &self,
        method: &str,
        params: Params,
        options: Params,
        verb: Method,
    ) -> Result<Value> {
        let request = RestRequest::new(method, params, options, verb);
        debug!(
            "{} {} (read_only={})",
            request.verb(),
            request.path(),
            request.options().read_only
        );
        let reply = self
            .transport
            .perform(
                &request.path(),
                request.params(),
                request.verb().clone(),
                request.options(),
            )
            .await?;
        response::classify(reply)
    }

    /// Run a single query, returning the rows unmodified.
    ///
    /// The explicit `query` argument wins over a same-named entry in
    /// `params`.
    pub async fn fql_query(&self, query: &str, mut params: Params, options: Params) -> Result<Value> {
        params.insert(
            protocol::QUERY_PARAM.to_string(),
            Value::String(query.to_string()),
        );
        self.rest_call(protocol::FQL_QUERY_METHOD, params, options)
            .await
    }

    /// Run several named queries in one call.
    ///
    /// `queries` (typically a map of query name to query text) is sent as one
    /// JSON-encoded parameter; the reply's array of named result sets is
    /// reshaped into a name-keyed map. On a remote error nothing is
    /// reshaped and the failure propagates as-is.
    pub async fn fql_multiquery<Q>(
        &self,
        queries: &Q,
        mut params: Params,
        options: Params,
    ) -> Result<HashMap<String, Vec<Value>>>
    where
        Q: Serialize + ?Sized,
    {
        params.insert(
            protocol::QUERIES_PARAM.to_string(),
            Value::String(to_json_arg(queries)?),
        );
        let body = self
            .rest_call(protocol::FQL_MULTIQUERY_METHOD, params, options)
            .await?;
        response::reshape_multiquery(body)
    }

    /// Update app-level configuration. Always a POST; the properties are sent
    /// as one JSON-encoded parameter.
    pub async fn set_app_properties<P>(
        &self,
        properties: &P,
        mut params: Params,
        options: Params,
    ) -> Result<Value>
    where
        P: Serialize + ?Sized,
    {
        params.insert(
            protocol::PROPERTIES_PARAM.to_string(),
            Value::String(to_json_arg(properties)?),
        );
        self.rest_call_with_verb(
            protocol::SET_APP_PROPERTIES_METHOD,
            params,
            options,
            Method::POST,
        )
        .await
    }
}
