use thiserror::Error;

/// Why a single extraction request produced no usable completion.
///
/// These never abort an analysis; the extractor records the paper as degraded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("{provider} request failed: {message}")]
    Request { provider: String, message: String },

    #[error("Request timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    #[error("{provider} returned an empty completion")]
    EmptyCompletion { provider: String },

    /// A scripted client ran out of responses
    #[error("No scripted response left for {client}")]
    Exhausted { client: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error_names_provider() {
        let err = BackendError::Request {
            provider: "OpenAI".to_string(),
            message: "502 Bad Gateway".to_string(),
        };
        assert_eq!(err.to_string(), "OpenAI request failed: 502 Bad Gateway");
    }

    #[test]
    fn test_timeout_display() {
        assert_eq!(
            BackendError::Timeout { seconds: 30 }.to_string(),
            "Request timed out after 30 seconds"
        );
    }
}
