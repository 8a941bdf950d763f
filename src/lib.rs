//! Kanboard - A client for the Kanboard project management JSON-RPC API.
//!
//! Any Kanboard procedure can be called by name with named parameters. Names are
//! accepted either in Kanboard's own `camelCase` form (`createProject`) or in
//! `snake_case` (`create_project`), which is converted before sending.
//!
//! # Architecture
//!
//! The crate uses:
//! - reqwest for HTTP, with optional custom CA and relaxed TLS verification
//! - serde_json for the JSON-RPC 2.0 envelopes
//! - Tokio for the async client, and a private runtime for the blocking one
//!
//! # Example
//!
//! ```no_run
//! use kanboard::{ClientConfig, KanboardClient, Params};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     kanboard::setup_logging();
//!
//!     let config = ClientConfig::new(
//!         "http://localhost/jsonrpc.php",
//!         "jsonrpc",
//!         "your_api_token",
//!     );
//!     let kb = KanboardClient::new(config)?;
//!
//!     let mut params = Params::new();
//!     params.insert("name".to_string(), json!("My project"));
//!     let project_id: u64 = kb.call_as("create_project", params).await?;
//!
//!     println!("Created project {project_id}");
//!     Ok(())
//! }
//! ```

pub mod clients;
pub mod core;
pub mod errors;
pub mod utils;

pub use crate::clients::{BlockingClient, HttpTransport, KanboardClient, Transport};
pub use crate::core::config::ClientConfig;
pub use crate::core::models::Params;
pub use crate::errors::{ClientError, Result};

/// Configure structured logging with JSON output.
///
/// Installs a tracing-subscriber registry with a JSON formatter. Calling it a
/// second time is a no-op.
///
/// # Example
///
/// ```
/// kanboard::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}
