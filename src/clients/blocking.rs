//! Synchronous facade over [`KanboardClient`].
//!
//! The client owns a single-threaded tokio runtime and blocks on it for every
//! call. It must not be created or used from inside another tokio runtime:
//! nested `block_on` panics.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tokio::runtime::{Builder, Runtime};

use crate::clients::kanboard_client::KanboardClient;
use crate::clients::transport::Transport;
use crate::core::config::ClientConfig;
use crate::core::models::Params;
use crate::errors::ClientError;

pub struct BlockingClient {
    inner: KanboardClient,
    runtime: Runtime,
}

impl BlockingClient {
    /// # Errors
    ///
    /// Same as [`KanboardClient::new`], plus [`ClientError::HttpError`] if the
    /// runtime cannot be started.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let runtime = build_runtime()?;
        let inner = KanboardClient::new(config)?;
        Ok(Self { inner, runtime })
    }

    /// # Errors
    ///
    /// Same as [`KanboardClient::with_transport`].
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self, ClientError> {
        let runtime = build_runtime()?;
        let inner = KanboardClient::with_transport(config, transport)?;
        Ok(Self { inner, runtime })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        self.inner.config()
    }

    /// # Errors
    ///
    /// See [`KanboardClient::execute`].
    pub fn execute(&self, method: &str, params: Params) -> Result<Value, ClientError> {
        self.runtime.block_on(self.inner.execute(method, params))
    }

    /// # Errors
    ///
    /// See [`KanboardClient::call`].
    pub fn call(&self, name: &str, params: Params) -> Result<Value, ClientError> {
        self.runtime.block_on(self.inner.call(name, params))
    }

    /// # Errors
    ///
    /// See [`KanboardClient::call_as`].
    pub fn call_as<T: DeserializeOwned>(&self, name: &str, params: Params) -> Result<T, ClientError> {
        self.runtime.block_on(self.inner.call_as(name, params))
    }
}

fn build_runtime() -> Result<Runtime, ClientError> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| ClientError::HttpError(format!("Failed to start runtime: {e}")))
}
