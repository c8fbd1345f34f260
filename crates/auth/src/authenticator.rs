//! Credential verification and session issuance.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use tally_core::Clock;

use crate::claims::SessionClaims;
use crate::credentials::CredentialStore;
use crate::error::{AuthError, AuthResult};
use crate::password::PasswordHasher;
use crate::token::TokenSigner;
use crate::user::{UserProfile, normalize_email};

/// Default validity window of an issued session, in hours.
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

pub fn default_session_ttl() -> Duration {
    Duration::hours(DEFAULT_SESSION_TTL_HOURS)
}

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
    pub expires_at: DateTime<Utc>,
}

/// Verifies email/password pairs and issues signed session tokens.
///
/// Stateless: nothing is recorded on success.
pub struct Authenticator {
    credentials: Arc<dyn CredentialStore>,
    hasher: Arc<dyn PasswordHasher>,
    signer: Arc<dyn TokenSigner>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    // Verified against when the email is unknown, so both rejection paths
    // pay for one hash verification.
    dummy_digest: String,
}

impl Authenticator {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        hasher: Arc<dyn PasswordHasher>,
        signer: Arc<dyn TokenSigner>,
        clock: Arc<dyn Clock>,
        ttl: Duration,
    ) -> AuthResult<Self> {
        if ttl <= Duration::zero() {
            return Err(AuthError::validation("session ttl must be positive"));
        }
        let dummy_digest = hasher.hash("tally-dummy-password")?;

        Ok(Self {
            credentials,
            hasher,
            signer,
            clock,
            ttl,
            dummy_digest,
        })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    #[tracing::instrument(skip_all)]
    pub fn authenticate(&self, email: &str, password: &str) -> AuthResult<Session> {
        let email = normalize_email(email);

        let Some(user) = self.credentials.find_by_email(&email)? else {
            let _ = self.hasher.verify(password, &self.dummy_digest);
            tracing::warn!("authentication rejected");
            return Err(AuthError::InvalidCredentials);
        };

        if !self.hasher.verify(password, &user.password_hash) {
            tracing::warn!("authentication rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let now = self.clock.now();
        let claims = SessionClaims::new(user.id, now, self.ttl);
        let token = self.signer.sign(&claims)?;
        let expires_at = claims.expires_at().unwrap_or(now + self.ttl);

        tracing::info!(user_id = %user.id, %expires_at, "session issued");

        Ok(Session {
            token,
            user: user.profile(),
            expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::InMemoryCredentialStore;
    use crate::directory::UserDirectory;
    use crate::password::Argon2PasswordHasher;
    use crate::session::SessionValidator;
    use crate::token::Hs256TokenSigner;
    use crate::user::NewUser;
    use tally_core::ManualClock;

    struct Fixture {
        clock: Arc<ManualClock>,
        authenticator: Authenticator,
        validator: SessionValidator,
        user: UserProfile,
    }

    fn fixture() -> Fixture {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let store: Arc<dyn CredentialStore> = Arc::new(InMemoryCredentialStore::new());
        let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::insecure_fast());
        let signer: Arc<dyn TokenSigner> = Arc::new(Hs256TokenSigner::new(b"test-secret"));

        let directory = UserDirectory::new(store.clone(), hasher.clone(), clock.clone());
        let user = directory
            .register(NewUser {
                name: "User Test".to_string(),
                email: "test@test.com".to_string(),
                password: "test123".to_string(),
            })
            .unwrap();

        let authenticator = Authenticator::new(
            store,
            hasher,
            signer.clone(),
            clock.clone(),
            default_session_ttl(),
        )
        .unwrap();
        let validator = SessionValidator::new(signer, clock.clone());

        Fixture {
            clock,
            authenticator,
            validator,
            user,
        }
    }

    #[test]
    fn correct_credentials_issue_a_token_for_the_user() {
        let f = fixture();
        let session = f.authenticator.authenticate("test@test.com", "test123").unwrap();

        assert_eq!(session.user, f.user);
        assert_eq!(f.validator.validate(&session.token).unwrap(), f.user.id);
    }

    #[test]
    fn email_lookup_is_case_insensitive() {
        let f = fixture();
        let session = f.authenticator.authenticate(" TEST@test.com", "test123").unwrap();
        assert_eq!(session.user.id, f.user.id);
    }

    #[test]
    fn wrong_password_and_unknown_email_fail_identically() {
        let f = fixture();
        let wrong_password = f.authenticator.authenticate("test@test.com", "false").unwrap_err();
        let unknown_email = f.authenticator.authenticate("false@test.com", "test123").unwrap_err();

        assert_eq!(wrong_password, AuthError::InvalidCredentials);
        assert_eq!(unknown_email, wrong_password);
        assert_eq!(unknown_email.to_string(), wrong_password.to_string());
    }

    #[test]
    fn token_expires_after_ttl() {
        let f = fixture();
        let session = f.authenticator.authenticate("test@test.com", "test123").unwrap();

        f.clock.advance(default_session_ttl() - Duration::seconds(1));
        assert!(f.validator.validate(&session.token).is_ok());

        f.clock.advance(Duration::seconds(1));
        assert_eq!(
            f.validator.validate(&session.token),
            Err(AuthError::ExpiredSession)
        );
    }

    #[test]
    fn expires_at_is_ttl_after_issuance() {
        let f = fixture();
        let now = f.clock.now();
        let session = f.authenticator.authenticate("test@test.com", "test123").unwrap();

        let window = session.expires_at - now;
        assert!(window <= default_session_ttl());
        assert!(window > default_session_ttl() - Duration::seconds(1));
    }

    #[test]
    fn non_positive_ttl_is_rejected() {
        let clock: Arc<dyn Clock> = Arc::new(ManualClock::new(Utc::now()));
        let result = Authenticator::new(
            Arc::new(InMemoryCredentialStore::new()),
            Arc::new(Argon2PasswordHasher::insecure_fast()),
            Arc::new(Hs256TokenSigner::new(b"s")),
            clock,
            Duration::zero(),
        );
        assert!(matches!(result, Err(AuthError::Validation(_))));
    }
}
