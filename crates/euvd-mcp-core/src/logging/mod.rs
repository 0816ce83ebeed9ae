//! Logging abstractions
//!
//! Components take a `SharedLogger` instead of writing to a global sink.

mod traits;
mod noop;
mod stderr;
mod memory;

pub use traits::{Logger, LogLevel, SharedLogger};
pub use noop::NoOpLogger;
pub use stderr::StderrLogger;
pub use memory::MemoryLogger;
