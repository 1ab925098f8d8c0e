//! Business logic helpers for managing transactions.

use chrono::{DateTime, SubsecRound, Utc};

use crate::errors::ValidationError;
use crate::ledger::{Ledger, Transaction, TransactionDraft, TransactionId};

/// Provides validated add/remove helpers over a ledger value.
pub struct TransactionService;

impl TransactionService {
    /// Validates `draft`, stamps it with an id and `now`, and prepends it.
    pub fn add(
        ledger: &mut Ledger,
        draft: &TransactionDraft,
        now: DateTime<Utc>,
    ) -> Result<TransactionId, ValidationError> {
        let valid = draft.validate()?;
        let id = ledger.next_id(now.timestamp_millis());
        Ok(ledger.prepend(Transaction::new(id, valid, now.trunc_subsecs(3))))
    }

    /// Removes the transaction identified by `id`; returns whether anything was removed.
    pub fn remove(ledger: &mut Ledger, id: TransactionId) -> bool {
        ledger.remove(id) > 0
    }

    pub fn list(ledger: &Ledger) -> &[Transaction] {
        ledger.transactions()
    }
}
