//! Client modules for the Kanboard JSON-RPC API

pub mod blocking;
pub mod kanboard_client;
pub mod transport;

pub use blocking::BlockingClient;
pub use kanboard_client::KanboardClient;
pub use transport::{HttpTransport, Transport};
