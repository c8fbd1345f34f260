use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tally_auth::{Session, UserProfile};
use tally_ledger::LedgerError;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Deserialize)]
pub struct CreateSessionRequest {
    pub email: String,
    pub password: String,
}

impl core::fmt::Debug for CreateSessionRequest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CreateSessionRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Body of deposit and withdraw requests.
///
/// Any `user_id` a client sends is ignored: the owner always comes from the
/// session. `amount` accepts any JSON number so that fractional or oversized
/// values surface as `InvalidAmount` rather than a decode failure.
#[derive(Debug, Deserialize)]
pub struct AmountRequest {
    pub amount: serde_json::Number,
    #[serde(default)]
    pub description: String,
}

impl AmountRequest {
    /// Amount in the smallest currency unit.
    pub fn minor_units(&self) -> Result<i64, LedgerError> {
        self.amount.as_i64().ok_or(LedgerError::InvalidAmount)
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: UserProfile,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            user: session.user,
            token: session.token,
            expires_at: session.expires_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(raw: &str) -> Result<i64, LedgerError> {
        let body: AmountRequest =
            serde_json::from_str(&format!(r#"{{"amount": {raw}}}"#)).unwrap();
        body.minor_units()
    }

    #[test]
    fn integral_amounts_pass_through() {
        assert_eq!(amount("100"), Ok(100));
        assert_eq!(amount("-5"), Ok(-5));
    }

    #[test]
    fn fractional_and_out_of_range_amounts_are_invalid() {
        assert_eq!(amount("10.5"), Err(LedgerError::InvalidAmount));
        assert_eq!(amount("10.0"), Err(LedgerError::InvalidAmount));
        assert_eq!(amount("18446744073709551615"), Err(LedgerError::InvalidAmount));
    }
}
