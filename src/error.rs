use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

use crate::database::repositories::StoreError;
use crate::handlers::shared::ApiResponse;
use crate::services::ledger::LedgerError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("Database error: {0}")]
    DatabaseError(StoreError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal server error{}", .0.as_ref().map_or("".to_string(), |s| format!(": {}", s)))]
    InternalServerError(Option<String>),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Ledger(LedgerError::AlreadyClockedIn) => StatusCode::CONFLICT,
            AppError::Ledger(LedgerError::NotClockedIn) => StatusCode::CONFLICT,
            AppError::Ledger(LedgerError::Persistence(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();

        // Storage details stay in the log.
        let error_message = if status_code.is_server_error() {
            log::error!("Request failed with status {}: {}", status_code, self);
            "Internal server error".to_string()
        } else {
            log::warn!("Request failed with status {}: {}", status_code, self);
            self.to_string()
        };

        HttpResponse::build(status_code).json(ApiResponse::error(&error_message))
    }
}

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Conflict(message) => AppError::Conflict(message),
            other => {
                log::error!("Database error: {}", other);
                AppError::DatabaseError(other)
            }
        }
    }
}

impl AppError {
    pub fn internal_server_error_message(message: impl Into<String>) -> Self {
        AppError::InternalServerError(Some(message.into()))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        AppError::Unauthorized(message.into())
    }
}
