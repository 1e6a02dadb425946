//! Error types for the zoom lens
//!
//! Zoom image load failures are not errors: they are contained in the
//! controller and surface only as the error notice and the `is-error`
//! class. `ZoomError` covers misuse of the API and host failures.

use thiserror::Error;

/// Errors that can occur in zoom lens operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ZoomError {
    /// Options could not be parsed into a configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The operation needs an attached controller
    #[error("zoom controller is not attached (in '{op}')")]
    NotAttached {
        /// The operation that was attempted
        op: &'static str,
    },

    /// The host environment rejected an operation
    #[error("host error: {0}")]
    Host(String),
}

/// Result type alias for zoom lens operations
pub type ZoomResult<T> = Result<T, ZoomError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ZoomError::InvalidConfig("expected a number".to_string());
        assert_eq!(err.to_string(), "invalid configuration: expected a number");

        let err = ZoomError::NotAttached { op: "show" };
        assert_eq!(err.to_string(), "zoom controller is not attached (in 'show')");

        let err = ZoomError::Host("target has no link".to_string());
        assert_eq!(err.to_string(), "host error: target has no link");
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(
            ZoomError::NotAttached { op: "swap" },
            ZoomError::NotAttached { op: "swap" }
        );
        assert_ne!(
            ZoomError::NotAttached { op: "swap" },
            ZoomError::NotAttached { op: "show" }
        );
    }
}
