//! EUVD REST API client
//!
//! The client classifies every call into a `RemoteOutcome`. Faults it cannot
//! classify come back as `ClientError` and are never folded into an outcome.
//!
//! ```rust,ignore
//! let client = EuvdClient::new(&ServerConfig::default(), logger)?;
//! let request = RemoteRequest::new(Endpoint::EnisaId)
//!     .with_param("id", QueryValue::String("EUVD-2024-001".into()));
//! match client.get(&request).await? {
//!     RemoteOutcome::Success(body) => println!("{body}"),
//!     failure => eprintln!("{:?}", failure.failure_message()),
//! }
//! ```

mod client;
mod endpoint;
mod error;
mod outcome;

pub use client::EuvdClient;
pub use endpoint::{Endpoint, QueryValue, RemoteRequest};
pub use error::{ClientError, ClientResult};
pub use outcome::RemoteOutcome;
