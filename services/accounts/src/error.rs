//! Error types for the accounts service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::error::DatabaseError;
use serde_json::json;
use thiserror::Error;

/// Everything an account operation can fail with
#[derive(Error, Debug)]
pub enum AccountError {
    /// Bad or missing input, reported verbatim to the caller
    #[error("{0}")]
    Validation(String),

    /// Request body that is not JSON at all
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Email address already in use")]
    EmailInUse,

    #[error("Username already in use")]
    UsernameInUse,

    /// No matching record; also returned for a wrong password on restore
    #[error("Not found")]
    NotFound,

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Avatar resolution error: {0}")]
    Avatar(String),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

impl AccountError {
    pub fn validation(message: impl Into<String>) -> Self {
        AccountError::Validation(message.into())
    }

    /// HTTP status the error maps to
    pub fn status(&self) -> StatusCode {
        match self {
            AccountError::Validation(_) | AccountError::MalformedBody(_) => {
                StatusCode::BAD_REQUEST
            }
            AccountError::EmailInUse | AccountError::UsernameInUse => StatusCode::CONFLICT,
            AccountError::NotFound => StatusCode::NOT_FOUND,
            AccountError::PasswordHash(_)
            | AccountError::Avatar(_)
            | AccountError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "Account operation failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for account results
pub type AccountResult<T> = Result<T, AccountError>;
