use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tally_core::{StoreError, UserId};

use crate::user::User;

/// Persistence collaborator for user identities and password digests.
///
/// Each call is individually atomic. `insert` must reject a duplicate email
/// with [`StoreError::Conflict`] in the same atomic step as the write.
pub trait CredentialStore: Send + Sync {
    fn insert(&self, user: User) -> Result<User, StoreError>;
    fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError>;
}

impl<S> CredentialStore for Arc<S>
where
    S: CredentialStore + ?Sized,
{
    fn insert(&self, user: User) -> Result<User, StoreError> {
        (**self).insert(user)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        (**self).find_by_email(email)
    }

    fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        (**self).find_by_id(id)
    }
}

#[derive(Debug, Default)]
struct Users {
    by_id: HashMap<UserId, User>,
    by_email: HashMap<String, UserId>,
}

/// In-memory credential store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    inner: RwLock<Users>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn insert(&self, user: User) -> Result<User, StoreError> {
        let mut users = self.inner.write().map_err(|_| StoreError::Poisoned)?;

        if users.by_email.contains_key(&user.email) {
            return Err(StoreError::conflict("email already registered"));
        }
        if users.by_id.contains_key(&user.id) {
            return Err(StoreError::conflict(format!("user {} already exists", user.id)));
        }

        users.by_email.insert(user.email.clone(), user.id);
        users.by_id.insert(user.id, user.clone());
        Ok(user)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(users
            .by_email
            .get(email)
            .and_then(|id| users.by_id.get(id))
            .cloned())
    }

    fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let users = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(users.by_id.get(&id).cloned())
    }
}
