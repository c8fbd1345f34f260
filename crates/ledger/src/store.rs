use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tally_core::{StoreError, TransactionId, UserId};

use crate::transaction::Transaction;

/// Persistence collaborator for the transaction log.
///
/// Append-only: there is no update or delete. Each call is individually
/// atomic and `find_all_by_user` returns entries in insertion order.
pub trait TransactionStore: Send + Sync {
    fn insert(&self, transaction: Transaction) -> Result<Transaction, StoreError>;
    fn find_by_id(&self, id: TransactionId) -> Result<Option<Transaction>, StoreError>;
    fn find_all_by_user(&self, user_id: UserId) -> Result<Vec<Transaction>, StoreError>;
}

impl<S> TransactionStore for Arc<S>
where
    S: TransactionStore + ?Sized,
{
    fn insert(&self, transaction: Transaction) -> Result<Transaction, StoreError> {
        (**self).insert(transaction)
    }

    fn find_by_id(&self, id: TransactionId) -> Result<Option<Transaction>, StoreError> {
        (**self).find_by_id(id)
    }

    fn find_all_by_user(&self, user_id: UserId) -> Result<Vec<Transaction>, StoreError> {
        (**self).find_all_by_user(user_id)
    }
}

#[derive(Debug, Default)]
struct Log {
    entries: Vec<Transaction>,
    by_id: HashMap<TransactionId, usize>,
    by_user: HashMap<UserId, Vec<usize>>,
}

/// In-memory append-only transaction log.
///
/// Entries live in one growing vector; per-user and per-id indexes point into
/// it. Intended for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryTransactionStore {
    log: RwLock<Log>,
}

impl InMemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.log.read().map(|log| log.entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TransactionStore for InMemoryTransactionStore {
    fn insert(&self, transaction: Transaction) -> Result<Transaction, StoreError> {
        let mut log = self.log.write().map_err(|_| StoreError::Poisoned)?;

        if log.by_id.contains_key(&transaction.id) {
            return Err(StoreError::conflict(format!(
                "transaction {} already exists",
                transaction.id
            )));
        }

        let index = log.entries.len();
        log.by_id.insert(transaction.id, index);
        log.by_user.entry(transaction.user_id).or_default().push(index);
        log.entries.push(transaction.clone());

        Ok(transaction)
    }

    fn find_by_id(&self, id: TransactionId) -> Result<Option<Transaction>, StoreError> {
        let log = self.log.read().map_err(|_| StoreError::Poisoned)?;
        Ok(log
            .by_id
            .get(&id)
            .and_then(|&i| log.entries.get(i))
            .cloned())
    }

    fn find_all_by_user(&self, user_id: UserId) -> Result<Vec<Transaction>, StoreError> {
        let log = self.log.read().map_err(|_| StoreError::Poisoned)?;
        let Some(indexes) = log.by_user.get(&user_id) else {
            return Ok(Vec::new());
        };
        Ok(indexes
            .iter()
            .filter_map(|&i| log.entries.get(i))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::TransactionKind;
    use chrono::Utc;

    fn tx(user_id: UserId, amount: i64) -> Transaction {
        Transaction {
            id: TransactionId::new(),
            user_id,
            kind: TransactionKind::Deposit,
            amount,
            description: format!("deposit {amount}"),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn per_user_listing_keeps_insertion_order_and_isolation() {
        let store = InMemoryTransactionStore::new();
        let alice = UserId::new();
        let bob = UserId::new();

        store.insert(tx(alice, 1)).unwrap();
        store.insert(tx(bob, 2)).unwrap();
        store.insert(tx(alice, 3)).unwrap();

        let amounts: Vec<i64> = store
            .find_all_by_user(alice)
            .unwrap()
            .iter()
            .map(|t| t.amount)
            .collect();
        assert_eq!(amounts, vec![1, 3]);
        assert_eq!(store.find_all_by_user(bob).unwrap().len(), 1);
        assert!(store.find_all_by_user(UserId::new()).unwrap().is_empty());
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn duplicate_id_is_rejected_without_writing() {
        let store = InMemoryTransactionStore::new();
        let entry = tx(UserId::new(), 10);
        store.insert(entry.clone()).unwrap();

        let err = store.insert(entry.clone()).unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
        assert_eq!(store.len(), 1);
        assert_eq!(store.find_by_id(entry.id).unwrap(), Some(entry));
    }
}
