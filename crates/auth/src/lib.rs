//! `tally-auth` — credentials, password hashing and stateless sessions.
//!
//! This crate is intentionally decoupled from HTTP. Storage, hashing, signing
//! and time are collaborators behind traits so the rules can be tested with
//! in-memory implementations.

pub mod authenticator;
pub mod claims;
pub mod credentials;
pub mod directory;
pub mod error;
pub mod password;
pub mod session;
pub mod token;
pub mod user;

pub use authenticator::{
    Authenticator, DEFAULT_SESSION_TTL_HOURS, Session, default_session_ttl,
};
pub use claims::{SessionClaims, validate_claims};
pub use credentials::{CredentialStore, InMemoryCredentialStore};
pub use directory::UserDirectory;
pub use error::{AuthError, AuthResult};
pub use password::{Argon2PasswordHasher, PasswordHasher};
pub use session::SessionValidator;
pub use token::{Hs256TokenSigner, TokenSigner};
pub use user::{NewUser, User, UserProfile, normalize_email};
