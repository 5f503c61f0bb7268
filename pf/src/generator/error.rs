//! Generation transport error types

use thiserror::Error;

/// Errors that can occur while talking to the generation endpoint
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl GeneratorError {
    /// Check if the failure came back from the endpoint itself
    pub fn is_api_error(&self) -> bool {
        matches!(self, GeneratorError::ApiError { .. })
    }

    /// Get the HTTP status if this is an API error
    pub fn status(&self) -> Option<u16> {
        match self {
            GeneratorError::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_api_error() {
        let err = GeneratorError::ApiError {
            status: 502,
            message: "Bad gateway".to_string(),
        };
        assert!(err.is_api_error());

        let err = GeneratorError::InvalidResponse("empty body".to_string());
        assert!(!err.is_api_error());
    }

    #[test]
    fn test_status() {
        let err = GeneratorError::ApiError {
            status: 404,
            message: "Not found".to_string(),
        };
        assert_eq!(err.status(), Some(404));

        let err = GeneratorError::InvalidResponse("empty body".to_string());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_display_includes_status_and_message() {
        let err = GeneratorError::ApiError {
            status: 500,
            message: "boom".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("500"));
        assert!(text.contains("boom"));
    }
}
