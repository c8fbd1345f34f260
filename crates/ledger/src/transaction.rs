use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tally_core::{TransactionId, UserId};

/// Direction of a statement entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdraw,
}

impl core::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TransactionKind::Deposit => write!(f, "deposit"),
            TransactionKind::Withdraw => write!(f, "withdraw"),
        }
    }
}

/// One immutable statement entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub user_id: UserId,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Positive amount in smallest unit (e.g., cents).
    pub amount: i64,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Contribution of this entry to the balance.
    pub fn signed_amount(&self) -> i128 {
        match self.kind {
            TransactionKind::Deposit => i128::from(self.amount),
            TransactionKind::Withdraw => -i128::from(self.amount),
        }
    }
}

/// Current balance together with the statement it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Balance {
    pub balance: i128,
    pub statement: Vec<Transaction>,
}

/// Σ deposits − Σ withdrawals.
pub fn balance_of(transactions: &[Transaction]) -> i128 {
    transactions.iter().map(Transaction::signed_amount).sum()
}
