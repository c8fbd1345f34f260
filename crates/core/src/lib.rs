//! `tally-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the auth and
//! ledger crates: identifiers, the clock collaborator and storage errors.

pub mod clock;
pub mod error;
pub mod id;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{InvalidId, StoreError};
pub use id::{TransactionId, UserId};
