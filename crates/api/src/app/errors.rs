use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use thiserror::Error;

use tally_auth::AuthError;
use tally_ledger::LedgerError;

/// Everything a handler can fail with, mapped onto HTTP in one place.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("missing or malformed bearer token")]
    MissingBearer,

    #[error("{}", .0.body_text())]
    InvalidBody(#[from] JsonRejection),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Auth(e) => match e {
                AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "invalid_credentials"),
                AuthError::MalformedToken => (StatusCode::UNAUTHORIZED, "malformed_token"),
                AuthError::ExpiredSession => (StatusCode::UNAUTHORIZED, "expired_session"),
                AuthError::EmailAlreadyInUse => (StatusCode::CONFLICT, "email_already_in_use"),
                AuthError::UserNotFound => (StatusCode::NOT_FOUND, "user_not_found"),
                AuthError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
                AuthError::Hashing(_) | AuthError::Signing(_) | AuthError::Store(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
                }
            },
            ApiError::Ledger(e) => match e {
                LedgerError::InvalidAmount => (StatusCode::BAD_REQUEST, "invalid_amount"),
                LedgerError::InsufficientFunds => (StatusCode::BAD_REQUEST, "insufficient_funds"),
                LedgerError::StatementNotFound => (StatusCode::NOT_FOUND, "statement_not_found"),
                LedgerError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
            },
            ApiError::MissingBearer => (StatusCode::UNAUTHORIZED, "malformed_token"),
            ApiError::InvalidBody(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            return json_error(status, code, "internal server error");
        }
        json_error(status, code, self.to_string())
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
