//! Classified result of a single remote call

use serde_json::Value;

/// What a client call produced
///
/// Anything the client cannot place in one of these variants is returned as
/// a `ClientError` instead.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteOutcome {
    /// 2xx with a JSON body
    Success(Value),
    /// The service answered with a non-2xx status
    HttpFailure {
        status: u16,
        /// The body's `message` field, or a generic status message
        message: String,
    },
    /// No response was obtained
    TransportFailure {
        /// Generic, host-facing description
        message: String,
        /// Underlying fault, for the operator log
        detail: String,
    },
}

impl RemoteOutcome {
    /// Generic message used when a failed response carries no `message`
    pub fn generic_status_message(status: u16) -> String {
        format!("Request failed with status code {}", status)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RemoteOutcome::Success(_))
    }

    /// Host-facing failure message, `None` on success
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            RemoteOutcome::Success(_) => None,
            RemoteOutcome::HttpFailure { message, .. } => Some(message),
            RemoteOutcome::TransportFailure { message, .. } => Some(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failure_message() {
        assert_eq!(RemoteOutcome::Success(json!({})).failure_message(), None);

        let http = RemoteOutcome::HttpFailure {
            status: 404,
            message: "Not found".to_string(),
        };
        assert_eq!(http.failure_message(), Some("Not found"));
        assert!(!http.is_success());

        assert_eq!(
            RemoteOutcome::generic_status_message(502),
            "Request failed with status code 502"
        );
    }
}
