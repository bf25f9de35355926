use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("External service credential is not configured")]
    Configuration,

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Failed to parse model response: {0}")]
    ParseError(String),
}

impl CoreError {
    /// Only failures of the model call itself are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CoreError::ExternalServiceError(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_external_errors_are_retryable() {
        assert!(CoreError::ExternalServiceError("timeout".to_string()).is_retryable());
        assert!(!CoreError::ParseError("bad json".to_string()).is_retryable());
        assert!(!CoreError::Configuration.is_retryable());
        assert!(!CoreError::Validation("too short".to_string()).is_retryable());
    }
}
