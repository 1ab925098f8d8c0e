//! Write-through owner of the in-memory ledger.

use crate::{
    core::{
        services::{SummaryService, Totals, TransactionService},
        time::{Clock, SystemClock},
    },
    errors::Result,
    ledger::{Ledger, Transaction, TransactionDraft, TransactionId},
    storage::KeyValueStore,
};

/// Holds the authoritative transaction list and keeps the persisted copy in
/// step with every mutation.
///
/// Each mutator builds the next ledger, writes it to storage, and only then
/// replaces the in-memory state, so a failed write leaves both copies as they
/// were.
pub struct LedgerStore {
    storage: Box<dyn KeyValueStore>,
    clock: Box<dyn Clock>,
    key: String,
    ledger: Ledger,
}

impl LedgerStore {
    pub fn new(storage: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self::with_clock(storage, key, Box::new(SystemClock))
    }

    pub fn with_clock(
        storage: Box<dyn KeyValueStore>,
        key: impl Into<String>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            storage,
            clock,
            key: key.into(),
            ledger: Ledger::new(),
        }
    }

    /// Creates the store and immediately loads whatever is persisted.
    pub fn open(storage: Box<dyn KeyValueStore>, key: impl Into<String>) -> Result<Self> {
        let mut store = Self::new(storage, key);
        store.load()?;
        Ok(store)
    }

    /// Replaces the in-memory ledger with the persisted one.
    ///
    /// A payload that cannot be decoded is discarded and the ledger comes back
    /// empty: the corrupt copy stays in storage until the next write
    /// overwrites it. Only storage read failures are returned as errors.
    pub fn load(&mut self) -> Result<&Ledger> {
        self.ledger = match self.storage.get(&self.key)? {
            None => {
                tracing::debug!(key = %self.key, "no persisted ledger; starting empty");
                Ledger::new()
            }
            Some(payload) => match Ledger::from_payload(&payload) {
                Ok(ledger) => {
                    let duplicates = ledger.duplicate_ids();
                    if !duplicates.is_empty() {
                        tracing::warn!(key = %self.key, ?duplicates, "persisted ledger has duplicate ids");
                    }
                    ledger
                }
                Err(err) => {
                    tracing::warn!(key = %self.key, error = %err, "discarding undecodable ledger payload");
                    Ledger::new()
                }
            },
        };
        tracing::info!(key = %self.key, count = self.ledger.len(), "ledger loaded");
        Ok(&self.ledger)
    }

    /// Validates and prepends a new transaction, then persists the full list.
    pub fn add(&mut self, draft: &TransactionDraft) -> Result<&Ledger> {
        let mut next = self.ledger.clone();
        let id = match TransactionService::add(&mut next, draft, self.clock.now()) {
            Ok(id) => id,
            Err(err) => {
                tracing::warn!(%err, "rejected transaction draft");
                return Err(err.into());
            }
        };
        self.commit(next)?;
        tracing::debug!(%id, count = self.ledger.len(), "transaction added");
        Ok(&self.ledger)
    }

    /// Removes the transaction with `id`. Unknown ids leave the list unchanged,
    /// but the list is still written back.
    pub fn remove(&mut self, id: TransactionId) -> Result<&Ledger> {
        let mut next = self.ledger.clone();
        let removed = TransactionService::remove(&mut next, id);
        self.commit(next)?;
        if removed {
            tracing::debug!(%id, count = self.ledger.len(), "transaction removed");
        } else {
            tracing::debug!(%id, "remove requested for unknown transaction");
        }
        Ok(&self.ledger)
    }

    /// Empties the ledger and deletes the persisted entry.
    ///
    /// Asking the user for confirmation is the caller's job.
    pub fn clear(&mut self) -> Result<&Ledger> {
        self.storage.remove(&self.key)?;
        self.ledger = Ledger::new();
        tracing::debug!(key = %self.key, "ledger cleared");
        Ok(&self.ledger)
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.ledger.transactions()
    }

    pub fn totals(&self) -> Totals {
        SummaryService::current_totals(&self.ledger)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn commit(&mut self, next: Ledger) -> Result<()> {
        let payload = next.to_payload()?;
        self.storage.set(&self.key, &payload)?;
        self.ledger = next;
        Ok(())
    }
}
