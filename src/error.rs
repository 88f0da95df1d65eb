//! Error types for the matching and simulation engine.

use thiserror::Error;

/// Errors raised by the engine.
///
/// Every engine operation validates its arguments up front and returns one of
/// these before producing any output, so callers never see partial arrays.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AcousticsError {
    /// An argument was out of range, non-finite, or inconsistent with another argument.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of what's wrong with the argument
        message: String,
    },
}

impl AcousticsError {
    /// Create an InvalidArgument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, AcousticsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let err = AcousticsError::invalid_argument("tolerance must be non-negative");
        assert_eq!(
            err.to_string(),
            "Invalid argument: tolerance must be non-negative"
        );
    }
}
