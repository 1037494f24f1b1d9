use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client as HttpClient, Method, Url};
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::encoding::{encode_form, param_to_string};
use crate::error::{Error, Result};
use crate::protocol::{Params, Response, TransportOptions};

/// The generic request transport every invocation is delegated to.
///
/// Implementations own authentication-token attachment, network I/O, and
/// parsing of raw replies into a [`Response`]. `options` carries the
/// dispatcher's directives (`rest_api`, `read_only`) plus caller pass-through
/// keys such as `beta`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn perform(
        &self,
        path: &str,
        params: &Params,
        verb: Method,
        options: &TransportOptions,
    ) -> Result<Response>;
}

/// Configuration for the built-in HTTP transport.
#[derive(Clone, Debug)]
pub struct TransportConfig {
    /// Endpoint serving the legacy dialect.
    pub base_url: Url,
    /// Beta-tier endpoint, used when a call carries `beta: true`.
    pub beta_url: Option<Url>,
    /// Read-replica endpoint for read-only methods.
    pub read_url: Option<Url>,
    /// Access token attached to every request as the `access_token` parameter.
    pub access_token: Option<String>,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: Option<u64>,
}

impl TransportConfig {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            base_url: parse_url(&base_url.into())?,
            beta_url: None,
            read_url: None,
            access_token: None,
            timeout_ms: None,
        })
    }

    pub fn with_beta_url(mut self, url: impl Into<String>) -> Result<Self> {
        self.beta_url = Some(parse_url(&url.into())?);
        Ok(self)
    }

    pub fn with_read_url(mut self, url: impl Into<String>) -> Result<Self> {
        self.read_url = Some(parse_url(&url.into())?);
        Ok(self)
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }
}

fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))
}

/// HTTP implementation of [`Transport`] over reqwest.
///
/// GET and DELETE carry parameters in the query string; POST and PUT send a
/// form-encoded body. Non-string parameter values are JSON-encoded before
/// transmission.
pub struct HttpTransport {
    client: HttpClient,
    config: TransportConfig,
}

impl HttpTransport {
    pub fn new(config: TransportConfig) -> Self {
        Self {
            client: HttpClient::new(),
            config,
        }
    }

    /// Use an externally configured reqwest client (pooling, proxies, TLS).
    pub fn with_client(config: TransportConfig, client: HttpClient) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Pick the host for this call. Beta routing wins over the read replica;
    /// both are hints, so a missing endpoint falls back to the base URL.
    fn select_host(&self, options: &TransportOptions) -> &Url {
        let beta = options
            .extra
            .get("beta")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        if beta {
            match &self.config.beta_url {
                Some(url) => return url,
                None => warn!("beta tier requested but no beta URL is configured"),
            }
        }
        if options.read_only {
            if let Some(url) = &self.config.read_url {
                return url;
            }
        }
        &self.config.base_url
    }

    fn build_request(
        &self,
        path: &str,
        params: &Params,
        verb: Method,
        options: &TransportOptions,
    ) -> Result<reqwest::Request> {
        let url = self
            .select_host(options)
            .join(path)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", path, e)))?;

        let mut params = params.clone();
        if let Some(token) = &self.config.access_token {
            params.insert("access_token".to_string(), Value::String(token.clone()));
        }

        let has_body = verb == Method::POST || verb == Method::PUT;
        let builder = if has_body {
            self.client
                .request(verb, url)
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(encode_form(&params))
        } else {
            let mut url = url;
            {
                let mut pairs = url.query_pairs_mut();
                for (key, value) in &params {
                    pairs.append_pair(key, &param_to_string(value));
                }
            }
            self.client.request(verb, url)
        };

        let builder = match self.config.timeout_ms {
            Some(timeout_ms) => builder.timeout(Duration::from_millis(timeout_ms)),
            None => builder,
        };

        Ok(builder.build()?)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn perform(
        &self,
        path: &str,
        params: &Params,
        verb: Method,
        options: &TransportOptions,
    ) -> Result<Response> {
        trace!(
            "{} {} (rest_api={}, read_only={})",
            verb,
            path,
            options.rest_api,
            options.read_only
        );

        let request = self.build_request(path, params, verb, options)?;
        let reply = self.client.execute(request).await?;

        let status = reply.status();
        let headers = reply.headers().clone();
        let bytes = reply.bytes().await?;
        let body: Value = serde_json::from_slice(&bytes)?;

        debug!("{} replied with HTTP {}", path, status.as_u16());

        Ok(Response {
            status,
            body,
            headers,
        })
    }
}
