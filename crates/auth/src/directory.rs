//! User registration and profile lookup.

use std::sync::Arc;

use tally_core::{Clock, StoreError, UserId};

use crate::credentials::CredentialStore;
use crate::error::{AuthError, AuthResult};
use crate::password::PasswordHasher;
use crate::user::{NewUser, User, UserProfile, normalize_email};

pub struct UserDirectory {
    credentials: Arc<dyn CredentialStore>,
    hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock>,
}

impl UserDirectory {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        hasher: Arc<dyn PasswordHasher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            credentials,
            hasher,
            clock,
        }
    }

    /// Create a user with a freshly hashed password.
    ///
    /// The email is normalised first; uniqueness is decided by the store's
    /// atomic insert, so two concurrent registrations cannot both win.
    #[tracing::instrument(skip_all)]
    pub fn register(&self, input: NewUser) -> AuthResult<UserProfile> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(AuthError::validation("name must not be empty"));
        }
        let email = normalize_email(&input.email);
        if !email.contains('@') {
            return Err(AuthError::validation("email must contain '@'"));
        }
        if input.password.is_empty() {
            return Err(AuthError::validation("password must not be empty"));
        }

        let user = User {
            id: UserId::new(),
            name: name.to_string(),
            email,
            password_hash: self.hasher.hash(&input.password)?,
            created_at: self.clock.now(),
        };

        let stored = self.credentials.insert(user).map_err(|e| match e {
            StoreError::Conflict(_) => AuthError::EmailAlreadyInUse,
            other => AuthError::Store(other),
        })?;

        tracing::info!(user_id = %stored.id, "user registered");
        Ok(stored.profile())
    }

    pub fn profile(&self, user_id: UserId) -> AuthResult<UserProfile> {
        self.credentials
            .find_by_id(user_id)?
            .map(|user| user.profile())
            .ok_or(AuthError::UserNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::InMemoryCredentialStore;
    use crate::password::Argon2PasswordHasher;
    use chrono::Utc;
    use tally_core::ManualClock;

    fn directory() -> (Arc<InMemoryCredentialStore>, UserDirectory) {
        let store = Arc::new(InMemoryCredentialStore::new());
        let directory = UserDirectory::new(
            store.clone(),
            Arc::new(Argon2PasswordHasher::insecure_fast()),
            Arc::new(ManualClock::new(Utc::now())),
        );
        (store, directory)
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "User Test".to_string(),
            email: email.to_string(),
            password: "test123".to_string(),
        }
    }

    #[test]
    fn register_stores_hash_not_plaintext() {
        let (store, directory) = directory();
        let profile = directory.register(new_user("test@test.com")).unwrap();

        let stored = store.find_by_id(profile.id).unwrap().unwrap();
        assert_ne!(stored.password_hash, "test123");
        assert!(stored.password_hash.starts_with("$argon2id$"));
        assert_eq!(profile.email, "test@test.com");
    }

    #[test]
    fn duplicate_email_is_rejected_after_normalisation() {
        let (_store, directory) = directory();
        directory.register(new_user("test@test.com")).unwrap();

        let err = directory.register(new_user("TEST@test.com ")).unwrap_err();
        assert_eq!(err, AuthError::EmailAlreadyInUse);
    }

    #[test]
    fn invalid_input_is_a_validation_error() {
        let (_store, directory) = directory();

        let mut blank_name = new_user("a@test.com");
        blank_name.name = "   ".to_string();
        assert!(matches!(directory.register(blank_name), Err(AuthError::Validation(_))));

        assert!(matches!(
            directory.register(new_user("no-at-sign")),
            Err(AuthError::Validation(_))
        ));

        let mut empty_password = new_user("b@test.com");
        empty_password.password.clear();
        assert!(matches!(
            directory.register(empty_password),
            Err(AuthError::Validation(_))
        ));
    }

    #[test]
    fn profile_of_unknown_user_is_not_found() {
        let (_store, directory) = directory();
        assert_eq!(directory.profile(UserId::new()), Err(AuthError::UserNotFound));

        let created = directory.register(new_user("test@test.com")).unwrap();
        assert_eq!(directory.profile(created.id).unwrap(), created);
    }
}
