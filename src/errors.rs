use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Empty response from server")]
    EmptyResponse,

    #[error("Failed to parse JSON response: {0}")]
    ParseError(String),

    #[error("Kanboard API error {code}: {message}")]
    ApiError { code: i64, message: String },

    #[error("Invalid client configuration: {0}")]
    ConfigError(String),
}

impl ClientError {
    /// Only transport failures are worth another attempt; anything the server
    /// actually answered is final.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClientError::HttpError(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        ClientError::HttpError(error.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(error: serde_json::Error) -> Self {
        ClientError::ParseError(error.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(error: url::ParseError) -> Self {
        ClientError::ConfigError(format!("invalid URL: {error}"))
    }
}
