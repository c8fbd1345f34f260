//! Personal ledger (single running balance per user).
//!
//! Pure domain logic only: no HTTP, no concrete storage engine. Persistence and
//! time are injected through [`TransactionStore`] and [`tally_core::Clock`].

pub mod error;
pub mod ledger;
pub mod store;
pub mod transaction;

pub use error::{LedgerError, LedgerResult};
pub use ledger::Ledger;
pub use store::{InMemoryTransactionStore, TransactionStore};
pub use transaction::{Balance, Transaction, TransactionKind, balance_of};
