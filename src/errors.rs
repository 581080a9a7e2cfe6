use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use thiserror::Error;

use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Missing or invalid credentials")]
    Unauthenticated,

    #[error("Insufficient permissions")]
    Forbidden,

    #[error("Not found")]
    NotFound,

    #[error("Could not allocate a unique import code")]
    Conflict,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation { field, message } => AppError::Validation { field, message },
            DomainError::Forbidden => AppError::Forbidden,
            DomainError::NotFound => AppError::NotFound,
            DomainError::Conflict => AppError::Conflict,
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Conflict => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        match self {
            AppError::Validation { field, .. } => HttpResponse::build(status).json(serde_json::json!({
                "error": self.to_string(),
                "field": field
            })),
            AppError::Internal(detail) => {
                log::error!("Request failed: {}", detail);
                HttpResponse::build(status).json(serde_json::json!({
                    "error": "Internal server error"
                }))
            }
            _ => HttpResponse::build(status).json(serde_json::json!({
                "error": self.to_string()
            })),
        }
    }
}
