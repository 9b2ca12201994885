use serde::Serialize;

/// Errors raised by ledger, roster and storage operations.
///
/// None of these are fatal: callers surface the message to the operator and
/// carry on with the state they already hold.
#[derive(Debug, thiserror::Error, Serialize)]
pub enum ServiceError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Index {index} out of range for list of length {len}")]
    IndexError { index: usize, len: usize },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::ValidationError(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ServiceError::NotFound(message.into())
    }

    /// True for errors the operator caused and can fix by changing the input.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            ServiceError::ValidationError(_)
                | ServiceError::IndexError { .. }
                | ServiceError::NotFound(_)
                | ServiceError::Unauthorized(_)
        )
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::ValidationError(err.to_string())
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(err: std::io::Error) -> Self {
        ServiceError::StorageError(err.to_string())
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        ServiceError::NetworkError(err.to_string())
    }
}

/// Checks that a list position exists before it is used for removal.
pub fn check_index(index: usize, len: usize) -> Result<(), ServiceError> {
    if index < len {
        Ok(())
    } else {
        Err(ServiceError::IndexError { index, len })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_errors_are_classified() {
        assert!(ServiceError::validation("x").is_user_error());
        assert!(ServiceError::IndexError { index: 3, len: 1 }.is_user_error());
        assert!(ServiceError::not_found("WO-00001").is_user_error());
        assert!(!ServiceError::StorageError("disk full".into()).is_user_error());
        assert!(!ServiceError::NetworkError("timeout".into()).is_user_error());
    }

    #[test]
    fn index_error_message_names_bounds() {
        let err = check_index(2, 2).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Index 2 out of range for list of length 2"
        );
        assert!(check_index(1, 2).is_ok());
    }

    #[test]
    fn validation_errors_convert() {
        let mut errors = validator::ValidationErrors::new();
        errors.add("unit", validator::ValidationError::new("blank"));
        let err: ServiceError = errors.into();
        assert!(matches!(err, ServiceError::ValidationError(_)));
    }
}
