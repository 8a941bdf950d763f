//! Kanboard JSON-RPC client module
//!
//! Encapsulates request encoding, authentication headers, response parsing and
//! the optional retry policy for transport failures.

use futures::future::try_join_all;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, warn};

use crate::clients::transport::{HttpTransport, Transport};
use crate::core::config::ClientConfig;
use crate::core::models::{JsonRpcRequest, JsonRpcResponse, Params};
use crate::errors::ClientError;
use crate::utils::method_names::resolve_procedure;

const RETRY_MAX_DELAY: Duration = Duration::from_secs(5);

/// Decodes a raw response body into the procedure's result.
///
/// Invalid UTF-8 sequences are dropped before parsing.
///
/// # Errors
///
/// [`ClientError::EmptyResponse`] for an empty body, [`ClientError::ParseError`]
/// when the body is not a JSON-RPC response, and [`ClientError::ApiError`] when
/// the server reported an error.
pub fn parse_response(body: &[u8]) -> Result<Value, ClientError> {
    if body.is_empty() {
        return Err(ClientError::EmptyResponse);
    }

    let text: String = body.utf8_chunks().map(|chunk| chunk.valid()).collect();
    let response: JsonRpcResponse = serde_json::from_str(&text)?;
    response.into_result()
}

/// Async client for the Kanboard JSON-RPC API.
///
/// Cloning is cheap; clones share the same connection pool.
#[derive(Clone)]
pub struct KanboardClient {
    config: Arc<ClientConfig>,
    headers: HeaderMap,
    transport: Arc<dyn Transport>,
}

impl KanboardClient {
    /// # Errors
    ///
    /// Returns [`ClientError::ConfigError`] if the URL, auth header or CA file
    /// is invalid.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;
        let transport = HttpTransport::new(&config)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// # Errors
    ///
    /// Returns [`ClientError::ConfigError`] if the headers cannot be built from
    /// `config`.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self, ClientError> {
        let headers = build_headers(&config)?;
        Ok(Self {
            config: Arc::new(config),
            headers,
            transport,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Calls a procedure by its exact Kanboard name, e.g. `createProject`.
    ///
    /// # Errors
    ///
    /// Any [`ClientError`]; transport failures are retried first when
    /// [`ClientConfig::retries`] is non-zero.
    pub async fn execute(&self, method: &str, params: Params) -> Result<Value, ClientError> {
        let request = JsonRpcRequest::new(method, params);
        let body = serde_json::to_vec(&request)?;

        debug!(method, url = %self.config.url, "Calling Kanboard procedure");
        #[cfg(feature = "debug-logs")]
        debug!("Procedure params: {:?}", request.params);

        let strategy = ExponentialBackoff::from_millis(2)
            .factor(50)
            .max_delay(RETRY_MAX_DELAY)
            .map(jitter)
            .take(self.config.retries);

        let response = RetryIf::start(
            strategy,
            || self.transport.send(self.headers.clone(), body.clone()),
            |e: &ClientError| {
                let retry = e.is_retryable();
                if retry {
                    warn!("Retrying {} after transport failure: {}", method, e);
                }
                retry
            },
        )
        .await?;

        parse_response(&response)
    }

    /// Calls a procedure by its `snake_case` name, e.g. `create_project`.
    ///
    /// A trailing `_async` is accepted and ignored.
    ///
    /// # Errors
    ///
    /// See [`KanboardClient::execute`].
    pub async fn call(&self, name: &str, params: Params) -> Result<Value, ClientError> {
        self.execute(&resolve_procedure(name), params).await
    }

    /// Like [`KanboardClient::call`], deserializing the result into `T`.
    ///
    /// # Errors
    ///
    /// See [`KanboardClient::execute`]; a result of the wrong shape yields
    /// [`ClientError::ParseError`].
    pub async fn call_as<T: DeserializeOwned>(&self, name: &str, params: Params) -> Result<T, ClientError> {
        let value = self.call(name, params).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Runs several calls concurrently. Results come back in input order.
    ///
    /// # Errors
    ///
    /// The first error encountered; remaining calls are dropped.
    pub async fn execute_all<I, S>(&self, calls: I) -> Result<Vec<Value>, ClientError>
    where
        I: IntoIterator<Item = (S, Params)>,
        S: Into<String>,
    {
        let run = |(method, params): (S, Params)| {
            let method: String = method.into();
            async move { self.execute(&method, params).await }
        };
        try_join_all(calls.into_iter().map(run)).await
    }
}

fn build_headers(config: &ClientConfig) -> Result<HeaderMap, ClientError> {
    let name = config.auth_header.as_bytes();
    let auth_name = HeaderName::from_bytes(name).map_err(|e| bad_header("auth", e))?;

    let value = config.authorization_value();
    let mut auth_value = HeaderValue::from_str(&value).map_err(|e| bad_header("auth", e))?;
    auth_value.set_sensitive(true);

    let agent = &config.user_agent;
    let user_agent = HeaderValue::from_str(agent).map_err(|e| bad_header("User-Agent", e))?;

    let mut headers = HeaderMap::new();
    headers.insert(auth_name, auth_value);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, user_agent);
    Ok(headers)
}

fn bad_header(name: &str, e: impl fmt::Display) -> ClientError {
    ClientError::ConfigError(format!("Invalid {name} header: {e}"))
}
