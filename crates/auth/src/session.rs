//! Bearer token validation.

use std::sync::Arc;

use tally_core::{Clock, UserId};

use crate::claims::validate_claims;
use crate::error::AuthResult;
use crate::token::TokenSigner;

/// Resolves a presented session token to the user it was issued for.
///
/// Does not consult the credential store: a well-signed, unexpired token is
/// sufficient.
#[derive(Clone)]
pub struct SessionValidator {
    signer: Arc<dyn TokenSigner>,
    clock: Arc<dyn Clock>,
}

impl SessionValidator {
    pub fn new(signer: Arc<dyn TokenSigner>, clock: Arc<dyn Clock>) -> Self {
        Self { signer, clock }
    }

    /// `MalformedToken` for anything that fails to decode or verify,
    /// `ExpiredSession` once the clock reaches the token's expiry.
    pub fn validate(&self, token: &str) -> AuthResult<UserId> {
        let claims = self.signer.verify(token)?;
        validate_claims(&claims, self.clock.now())?;
        Ok(claims.sub)
    }
}
