//! Server configuration
//!
//! The shipped binary runs on `ServerConfig::default()`. YAML loading exists
//! for embedding the server in other processes and for pointing tests at a
//! local stand-in for the EUVD API.

mod file;

pub use file::{ServerConfig, ConfigError, ConfigResult, DEFAULT_BASE_URL, DEFAULT_SERVER_NAME};
