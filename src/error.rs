//! Error types for the lending server

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use sqlx::error::ErrorKind;
use thiserror::Error;
use validator::ValidationErrors;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Business rule violation: {0}")]
    BusinessRule(String),
}

/// Body returned for failures the caller can act on
#[derive(Serialize, utoipa::ToSchema)]
pub struct FailureResponse {
    pub success: bool,
    pub message: String,
}

/// Body returned for internal failures; never carries internal detail
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl AppError {
    /// Translate a constraint violation into a domain error.
    ///
    /// `classify` receives the violation kind and returns the error to report,
    /// or `None` to keep the original database error.
    pub fn on_constraint<F>(err: sqlx::Error, classify: F) -> Self
    where
        F: FnOnce(ErrorKind) -> Option<AppError>,
    {
        if let sqlx::Error::Database(ref db_err) = err {
            if let Some(mapped) = classify(db_err.kind()) {
                return mapped;
            }
        }
        AppError::Database(err)
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Authentication(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::BusinessRule(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                return internal_error(status);
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                return internal_error(status);
            }
            AppError::Authentication(msg)
            | AppError::NotFound(msg)
            | AppError::Validation(msg)
            | AppError::BadRequest(msg)
            | AppError::BusinessRule(msg) => msg,
        };

        let body = Json(FailureResponse {
            success: false,
            message,
        });

        (status, body).into_response()
    }
}

fn internal_error(status: StatusCode) -> Response {
    let body = Json(ErrorResponse {
        error: "Internal server error".to_string(),
    });
    (status, body).into_response()
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .collect();
        messages.sort();

        AppError::Validation(messages.join(", "))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
