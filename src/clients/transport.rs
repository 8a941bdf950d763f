//! HTTP transport for JSON-RPC payloads.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Certificate, Client};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::core::config::ClientConfig;
use crate::errors::ClientError;

/// Delivers an encoded JSON-RPC request and hands back the raw response body.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, headers: HeaderMap, body: Vec<u8>) -> Result<Vec<u8>, ClientError>;
}

pub struct HttpTransport {
    client: Client,
    url: String,
}

impl HttpTransport {
    /// Builds the underlying reqwest client with the TLS settings from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::ConfigError`] if the CA file cannot be read or is
    /// not valid PEM, and [`ClientError::HttpError`] if the client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut builder = Client::builder().timeout(config.timeout);

        if let Some(path) = &config.cafile {
            let pem = fs::read(path).map_err(|e| ca_error(path, e))?;
            let cert = Certificate::from_pem(&pem).map_err(|e| ca_error(path, e))?;
            debug!("Trusting custom CA from {}", path.display());
            builder = builder.add_root_certificate(cert);
        }

        if config.insecure {
            warn!("TLS certificate verification disabled");
            builder = builder
                .danger_accept_invalid_certs(true)
                .danger_accept_invalid_hostnames(true);
        }

        if config.ignore_hostname_verification {
            warn!("TLS hostname verification disabled");
            builder = builder.danger_accept_invalid_hostnames(true);
        }

        let client = builder
            .build()
            .map_err(|e| ClientError::HttpError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, headers: HeaderMap, body: Vec<u8>) -> Result<Vec<u8>, ClientError> {
        let request = self.client.post(&self.url).headers(headers).body(body);
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ClientError::HttpError(format!("HTTP status {status}: {error_text}")));
        }

        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

fn ca_error(path: &Path, e: impl fmt::Display) -> ClientError {
    ClientError::ConfigError(format!("Invalid CA file {}: {e}", path.display()))
}
