use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },
    #[error("Insufficient permissions")]
    Forbidden,
    #[error("Import not found")]
    NotFound,
    #[error("Import code conflict")]
    Conflict,
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        DomainError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}
