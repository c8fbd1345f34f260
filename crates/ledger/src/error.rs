use thiserror::Error;

use tally_core::StoreError;

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Ledger failures.
///
/// All variants but `Store` are deterministic outcomes of the request; none
/// should be retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("amount must be positive")]
    InvalidAmount,

    #[error("insufficient funds")]
    InsufficientFunds,

    /// Missing, or owned by someone else. The two are not distinguished.
    #[error("statement not found")]
    StatementNotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}
