//! Account service: composes the auth and ledger components.
//!
//! The two sides never call each other; they meet only through the `UserId`
//! that the session validator hands to the ledger routes.

use std::sync::Arc;

use chrono::Duration;

use tally_auth::{
    Argon2PasswordHasher, AuthResult, Authenticator, CredentialStore, Hs256TokenSigner,
    InMemoryCredentialStore, NewUser, PasswordHasher, Session, SessionValidator, TokenSigner,
    UserDirectory, UserProfile,
};
use tally_core::{Clock, SystemClock, TransactionId, UserId};
use tally_ledger::{
    Balance, InMemoryTransactionStore, Ledger, LedgerResult, Transaction, TransactionStore,
};

use crate::config::ApiConfig;

/// External collaborators the services are built from.
pub struct Collaborators {
    pub credentials: Arc<dyn CredentialStore>,
    pub transactions: Arc<dyn TransactionStore>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub signer: Arc<dyn TokenSigner>,
    pub clock: Arc<dyn Clock>,
}

impl Collaborators {
    /// In-memory stores around the given hasher, signer and clock.
    pub fn in_memory(
        hasher: Arc<dyn PasswordHasher>,
        signer: Arc<dyn TokenSigner>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            credentials: Arc::new(InMemoryCredentialStore::new()),
            transactions: Arc::new(InMemoryTransactionStore::new()),
            hasher,
            signer,
            clock,
        }
    }
}

pub struct AppServices {
    directory: UserDirectory,
    authenticator: Authenticator,
    sessions: SessionValidator,
    ledger: Ledger,
}

impl AppServices {
    /// Production wiring: in-memory stores, Argon2id, HS256 keyed by the
    /// configured secret, wall clock.
    pub fn new(config: &ApiConfig) -> AuthResult<Self> {
        let collaborators = Collaborators::in_memory(
            Arc::new(Argon2PasswordHasher::new()),
            Arc::new(Hs256TokenSigner::new(config.jwt_secret.as_bytes())),
            Arc::new(SystemClock),
        );
        Self::from_parts(collaborators, config.session_ttl)
    }

    pub fn from_parts(parts: Collaborators, session_ttl: Duration) -> AuthResult<Self> {
        let Collaborators {
            credentials,
            transactions,
            hasher,
            signer,
            clock,
        } = parts;

        Ok(Self {
            directory: UserDirectory::new(credentials.clone(), hasher.clone(), clock.clone()),
            authenticator: Authenticator::new(
                credentials,
                hasher,
                signer.clone(),
                clock.clone(),
                session_ttl,
            )?,
            sessions: SessionValidator::new(signer, clock.clone()),
            ledger: Ledger::new(transactions, clock),
        })
    }

    pub fn session_validator(&self) -> SessionValidator {
        self.sessions.clone()
    }

    // -------------------------
    // Users & sessions
    // -------------------------

    pub fn register(&self, input: NewUser) -> AuthResult<UserProfile> {
        self.directory.register(input)
    }

    pub fn login(&self, email: &str, password: &str) -> AuthResult<Session> {
        self.authenticator.authenticate(email, password)
    }

    pub fn profile(&self, user_id: UserId) -> AuthResult<UserProfile> {
        self.directory.profile(user_id)
    }

    // -------------------------
    // Statements
    // -------------------------

    pub fn balance(&self, user_id: UserId) -> LedgerResult<Balance> {
        self.ledger.get_balance(user_id)
    }

    pub fn deposit(&self, user_id: UserId, amount: i64, description: String) -> LedgerResult<Transaction> {
        self.ledger.deposit(user_id, amount, description)
    }

    pub fn withdraw(&self, user_id: UserId, amount: i64, description: String) -> LedgerResult<Transaction> {
        self.ledger.withdraw(user_id, amount, description)
    }

    pub fn statement(&self, user_id: UserId, transaction_id: TransactionId) -> LedgerResult<Transaction> {
        self.ledger.get_statement(user_id, transaction_id)
    }
}
