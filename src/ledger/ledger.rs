use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::transaction::{Transaction, TransactionId};

/// Ordered transaction list, newest first.
///
/// Serializes as a bare JSON array so the persisted payload is exactly the
/// list of transaction objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_payload(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }

    pub fn to_payload(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Inserts at the front and returns the transaction's id.
    pub fn prepend(&mut self, transaction: Transaction) -> TransactionId {
        let id = transaction.id;
        self.transactions.insert(0, transaction);
        id
    }

    /// Drops every transaction carrying `id`, returning how many were removed.
    pub fn remove(&mut self, id: TransactionId) -> usize {
        let before = self.transactions.len();
        self.transactions.retain(|txn| txn.id != id);
        before - self.transactions.len()
    }

    pub fn transaction(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn contains(&self, id: TransactionId) -> bool {
        self.transaction(id).is_some()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.transactions.iter()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Next id for a transaction created at `now_millis`: the timestamp itself,
    /// or one past the largest existing id when the clock has not moved on.
    pub fn next_id(&self, now_millis: i64) -> TransactionId {
        let candidate = u64::try_from(now_millis).unwrap_or(0);
        match self.transactions.iter().map(|txn| txn.id.0).max() {
            Some(max) if candidate <= max => TransactionId(max.saturating_add(1)),
            _ => TransactionId(candidate),
        }
    }

    /// Ids that appear more than once, e.g. in payloads written by older clients.
    pub fn duplicate_ids(&self) -> Vec<TransactionId> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for txn in &self.transactions {
            if !seen.insert(txn.id) && !duplicates.contains(&txn.id) {
                duplicates.push(txn.id);
            }
        }
        duplicates
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
