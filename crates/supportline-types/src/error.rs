use thiserror::Error;

/// Errors from the hosted generative-language service.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("HTTP request failed: {message}")]
    Http { message: String },

    #[error("upstream returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("rate limited")]
    RateLimited,

    #[error("unexpected response structure: {0}")]
    UnexpectedShape(String),
}

/// Errors raised while relaying a transcript on the server side.
///
/// None of these are distinguished to the caller; the HTTP layer logs them
/// and answers with a generic 500.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Errors seen by the chat client while posting or reading the reply body.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("reading response body failed: {0}")]
    Body(String),
}

/// Errors resolving configuration or credentials at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("credential not found: set the {0} environment variable")]
    MissingCredential(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_converts_into_relay_error() {
        let err: RelayError = UpstreamError::RateLimited.into();
        assert!(matches!(err, RelayError::Upstream(UpstreamError::RateLimited)));
        assert_eq!(err.to_string(), "rate limited");
    }

    #[test]
    fn test_status_error_message() {
        let err = UpstreamError::Status {
            status: 503,
            body: "unavailable".to_string(),
        };
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("unavailable"));
    }

    #[test]
    fn test_missing_credential_names_variable() {
        let err = ConfigError::MissingCredential("GEMINI_API_KEY".to_string());
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }
}
