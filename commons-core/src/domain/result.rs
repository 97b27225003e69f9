//! Result and error types for the core library

use thiserror::Error;

/// Core library error type
///
/// Every condition here is expected and recoverable: commands report these
/// back to the caller as result values, never as process-fatal failures.
/// The presentation layer translates them into user-visible messages.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Phone number already registered: {0}")]
    DuplicatePhone(String),

    #[error("Invalid phone number or password")]
    Auth,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not permitted: {0}")]
    Forbidden(String),

    #[error("Suggestion provider error: {0}")]
    Suggestion(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an invalid state error
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a permission error
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::DuplicatePhone("13900000010".to_string());
        assert!(err.to_string().contains("13900000010"));

        let err = Error::invalid_state("proposal is closed");
        assert!(err.to_string().contains("proposal is closed"));
    }
}
