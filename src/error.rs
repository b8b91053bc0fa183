use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::error;
use serde_json::json;
use thiserror::Error;

use crate::advisor::SessionError;
use crate::preferences::PreferenceError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("preference error: {0}")]
    Preferences(PreferenceError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::AwaitingReply => AppError::Conflict(e.to_string()),
            SessionError::MessageNotFound(_) => AppError::NotFound(e.to_string()),
            SessionError::EmptyMessage | SessionError::UnknownLanguage(_) => {
                AppError::BadRequest(e.to_string())
            }
        }
    }
}

impl From<PreferenceError> for AppError {
    fn from(e: PreferenceError) -> Self {
        match e {
            PreferenceError::InvalidValue { .. } => AppError::BadRequest(e.to_string()),
            other => AppError::Preferences(other),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Template(_) | AppError::Preferences(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        // Server-side failures are logged in full; clients get a generic message.
        let message = if status.is_server_error() {
            error!("{}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };
        HttpResponse::build(status).json(json!({ "error": message }))
    }
}
