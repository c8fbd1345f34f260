use thiserror::Error;

use tally_core::StoreError;

pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication, session and registration failures.
///
/// `InvalidCredentials` deliberately covers both "unknown email" and "wrong
/// password"; nothing downstream can tell them apart.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("malformed session token")]
    MalformedToken,

    #[error("session expired")]
    ExpiredSession,

    #[error("email already in use")]
    EmailAlreadyInUse,

    #[error("user not found")]
    UserNotFound,

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("token signing failed: {0}")]
    Signing(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AuthError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
