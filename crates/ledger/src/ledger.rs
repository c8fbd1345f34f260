//! Per-user ledger: append-only log, derived balance, overdraft guard.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tally_core::{Clock, TransactionId, UserId};

use crate::error::{LedgerError, LedgerResult};
use crate::store::TransactionStore;
use crate::transaction::{Balance, Transaction, TransactionKind, balance_of};

/// The ledger service.
///
/// # Invariants
/// - A user's balance is always Σ deposits − Σ withdrawals over their full
///   statement, and never negative.
/// - Writes for one user are serialised: the overdraft check and the append
///   of a withdrawal happen inside the same per-user critical section.
/// - Writes for different users never wait on each other.
pub struct Ledger {
    store: Arc<dyn TransactionStore>,
    clock: Arc<dyn Clock>,
    locks: Mutex<HashMap<UserId, Arc<Mutex<()>>>>,
}

impl Ledger {
    pub fn new(store: Arc<dyn TransactionStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Balance recomputed from the full statement, plus that statement in
    /// insertion order.
    #[tracing::instrument(skip(self))]
    pub fn get_balance(&self, user_id: UserId) -> LedgerResult<Balance> {
        let statement = self.store.find_all_by_user(user_id)?;
        Ok(Balance {
            balance: balance_of(&statement),
            statement,
        })
    }

    #[tracing::instrument(skip(self, description))]
    pub fn deposit(
        &self,
        user_id: UserId,
        amount: i64,
        description: impl Into<String>,
    ) -> LedgerResult<Transaction> {
        ensure_positive(amount)?;

        let lock = self.user_lock(user_id);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        self.append(user_id, TransactionKind::Deposit, amount, description.into())
    }

    #[tracing::instrument(skip(self, description))]
    pub fn withdraw(
        &self,
        user_id: UserId,
        amount: i64,
        description: impl Into<String>,
    ) -> LedgerResult<Transaction> {
        ensure_positive(amount)?;

        let lock = self.user_lock(user_id);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let current = balance_of(&self.store.find_all_by_user(user_id)?);
        if current < i128::from(amount) {
            tracing::warn!(%current, amount, "withdrawal rejected: insufficient funds");
            return Err(LedgerError::InsufficientFunds);
        }

        self.append(user_id, TransactionKind::Withdraw, amount, description.into())
    }

    /// One statement entry, visible only to its owner.
    #[tracing::instrument(skip(self))]
    pub fn get_statement(
        &self,
        user_id: UserId,
        transaction_id: TransactionId,
    ) -> LedgerResult<Transaction> {
        match self.store.find_by_id(transaction_id)? {
            Some(tx) if tx.user_id == user_id => Ok(tx),
            _ => Err(LedgerError::StatementNotFound),
        }
    }

    // Caller must hold the user's lock.
    fn append(
        &self,
        user_id: UserId,
        kind: TransactionKind,
        amount: i64,
        description: String,
    ) -> LedgerResult<Transaction> {
        let tx = self.store.insert(Transaction {
            id: TransactionId::new(),
            user_id,
            kind,
            amount,
            description,
            created_at: self.clock.now(),
        })?;

        tracing::info!(transaction_id = %tx.id, %kind, amount, "transaction recorded");
        Ok(tx)
    }

    fn user_lock(&self, user_id: UserId) -> Arc<Mutex<()>> {
        // The guarded data is `()`, so a poisoned lock carries no broken state.
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        if !locks.contains_key(&user_id) {
            // An entry only the map references has no holder and no waiter.
            // Dropping those keeps the map bounded by the users writing right now.
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        }
        locks.entry(user_id).or_default().clone()
    }

    #[cfg(test)]
    fn tracked_locks(&self) -> usize {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

fn ensure_positive(amount: i64) -> LedgerResult<()> {
    if amount <= 0 {
        return Err(LedgerError::InvalidAmount);
    }
    Ok(())
}
