//! Stderr logger implementation

use super::traits::{LogLevel, Logger};

/// A logger that writes every level to stderr
///
/// When serving over stdio, stdout is reserved for protocol frames, so
/// nothing here may ever print to stdout.
#[derive(Debug, Clone)]
pub struct StderrLogger {
    prefix: String,
    min_level: LogLevel,
}

impl Default for StderrLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl StderrLogger {
    /// Create a stderr logger with the default prefix, logging info and above
    pub fn new() -> Self {
        Self {
            prefix: "[euvd-enisa-mcp]".to_string(),
            min_level: LogLevel::Info,
        }
    }

    /// Create a stderr logger with a custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Self::new()
        }
    }

    /// Set the minimum level that gets written
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    fn format(&self, level: LogLevel, message: &str) -> Option<String> {
        if level < self.min_level {
            return None;
        }
        Some(format!("{} {}: {}", self.prefix, level, message))
    }

    fn write(&self, level: LogLevel, message: &str) {
        if let Some(line) = self.format(level, message) {
            eprintln!("{}", line);
        }
    }
}

impl Logger for StderrLogger {
    fn debug(&self, message: &str) {
        self.write(LogLevel::Debug, message);
    }

    fn info(&self, message: &str) {
        self.write(LogLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.write(LogLevel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.write(LogLevel::Error, message);
    }
}
