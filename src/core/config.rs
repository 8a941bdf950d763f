use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

use crate::errors::ClientError;

pub const DEFAULT_AUTH_HEADER: &str = "Authorization";
pub const DEFAULT_USER_AGENT: &str = "Kanboard Rust API Client";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct ClientConfig {
    /// JSON-RPC endpoint, e.g. `http://localhost/jsonrpc.php`.
    pub url: String,
    /// Either the `jsonrpc` API user or a real username.
    pub username: String,
    /// API token or the user's password.
    pub password: String,
    pub auth_header: String,
    pub cafile: Option<PathBuf>,
    /// Skip certificate and hostname verification entirely.
    pub insecure: bool,
    pub ignore_hostname_verification: bool,
    pub user_agent: String,
    pub timeout: Duration,
    /// Extra attempts on transport failures. Off by default since most
    /// procedures are not idempotent.
    pub retries: usize,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("auth_header", &self.auth_header)
            .field("cafile", &self.cafile)
            .field("insecure", &self.insecure)
            .field("ignore_hostname_verification", &self.ignore_hostname_verification)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("retries", &self.retries)
            .finish()
    }
}

impl ClientConfig {
    pub fn new(url: impl Into<String>, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            username: username.into(),
            password: password.into(),
            auth_header: DEFAULT_AUTH_HEADER.to_string(),
            cafile: None,
            insecure: false,
            ignore_hostname_verification: false,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            retries: 0,
        }
    }

    #[must_use]
    pub fn with_auth_header(mut self, header: impl Into<String>) -> Self {
        self.auth_header = header.into();
        self
    }

    #[must_use]
    pub fn with_cafile(mut self, path: impl Into<PathBuf>) -> Self {
        self.cafile = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    #[must_use]
    pub fn with_ignore_hostname_verification(mut self, ignore: bool) -> Self {
        self.ignore_hostname_verification = ignore;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_retries(mut self, retries: usize) -> Self {
        self.retries = retries;
        self
    }

    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| lookup(key).ok_or_else(|| invalid(key, "not set"));

        let mut config = Self::new(
            required("KANBOARD_URL")?,
            required("KANBOARD_USERNAME")?,
            required("KANBOARD_PASSWORD")?,
        );

        if let Some(header) = lookup("KANBOARD_AUTH_HEADER") {
            config.auth_header = header;
        }
        if let Some(path) = lookup("KANBOARD_CAFILE") {
            config.cafile = Some(PathBuf::from(path));
        }
        if let Some(value) = lookup("KANBOARD_INSECURE") {
            config.insecure = parse_bool("KANBOARD_INSECURE", &value)?;
        }
        if let Some(value) = lookup("KANBOARD_IGNORE_HOSTNAME_VERIFICATION") {
            config.ignore_hostname_verification = parse_bool("KANBOARD_IGNORE_HOSTNAME_VERIFICATION", &value)?;
        }
        if let Some(user_agent) = lookup("KANBOARD_USER_AGENT") {
            config.user_agent = user_agent;
        }
        if let Some(value) = lookup("KANBOARD_TIMEOUT_SECS") {
            config.timeout = Duration::from_secs(parse_number("KANBOARD_TIMEOUT_SECS", &value)?);
        }
        if let Some(value) = lookup("KANBOARD_RETRIES") {
            config.retries = parse_number("KANBOARD_RETRIES", &value)?;
        }

        Ok(config)
    }

    pub fn validate(&self) -> Result<Url, ClientError> {
        let url = Url::parse(&self.url)?;
        if matches!(url.scheme(), "http" | "https") {
            Ok(url)
        } else {
            let reason = format!("unsupported scheme '{}', expected http or https", url.scheme());
            Err(ClientError::ConfigError(reason))
        }
    }

    /// Value sent in [`ClientConfig::auth_header`].
    ///
    /// Credentials are always base64 encoded; the `Basic` scheme prefix is only
    /// added for the standard `Authorization` header. Custom headers such as
    /// `X-API-Auth` take the bare encoded string.
    #[must_use]
    pub fn authorization_value(&self) -> String {
        let credentials = STANDARD.encode(format!("{}:{}", self.username, self.password));
        if self.auth_header == DEFAULT_AUTH_HEADER {
            format!("Basic {credentials}")
        } else {
            credentials
        }
    }
}

fn invalid(key: &str, reason: impl fmt::Display) -> ClientError {
    ClientError::ConfigError(format!("{key}: {reason}"))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ClientError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(invalid(key, format!("expected a boolean, got '{other}'"))),
    }
}

fn parse_number<T>(key: &str, value: &str) -> Result<T, ClientError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value.trim().parse().map_err(|e| invalid(key, e))
}
