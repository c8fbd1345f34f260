//! Signing collaborator: turns claims into a bearer token and back.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::claims::SessionClaims;
use crate::error::{AuthError, AuthResult};

pub trait TokenSigner: Send + Sync {
    fn sign(&self, claims: &SessionClaims) -> AuthResult<String>;

    /// Verify the signature and decode the claims.
    ///
    /// Only structure and signature are checked here; time-window checks
    /// belong to [`validate_claims`](crate::validate_claims).
    fn verify(&self, token: &str) -> AuthResult<SessionClaims>;
}

/// HMAC-SHA256 JWT signer keyed by a process-wide secret.
#[derive(Clone)]
pub struct Hs256TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl Hs256TokenSigner {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is judged against the injected clock, not the wall clock.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.required_spec_claims = ["sub", "iat", "exp"]
            .into_iter()
            .map(String::from)
            .collect();

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

impl TokenSigner for Hs256TokenSigner {
    fn sign(&self, claims: &SessionClaims) -> AuthResult<String> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    fn verify(&self, token: &str) -> AuthResult<SessionClaims> {
        jsonwebtoken::decode::<SessionClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "rejected session token");
                AuthError::MalformedToken
            })
    }
}
