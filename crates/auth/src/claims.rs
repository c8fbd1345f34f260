use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use tally_core::UserId;

use crate::error::AuthError;

/// Session token claims (transport-agnostic).
///
/// Timestamps are whole seconds since the Unix epoch, as JWT registered
/// claims require.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: the authenticated user.
    pub sub: UserId,

    /// Issued-at.
    pub iat: i64,

    /// Expiration.
    pub exp: i64,
}

impl SessionClaims {
    pub fn new(sub: UserId, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        let iat = issued_at.timestamp();
        Self {
            sub,
            iat,
            exp: iat.saturating_add(ttl.num_seconds()),
        }
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// Deterministically validate session claims against `now`.
///
/// Signature verification happens before this, in the [`TokenSigner`].
///
/// [`TokenSigner`]: crate::TokenSigner
pub fn validate_claims(claims: &SessionClaims, now: DateTime<Utc>) -> Result<(), AuthError> {
    if claims.exp <= claims.iat {
        return Err(AuthError::MalformedToken);
    }
    if now.timestamp() >= claims.exp {
        return Err(AuthError::ExpiredSession);
    }
    Ok(())
}
