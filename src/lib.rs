#![doc(test(attr(deny(warnings))))]

//! finledger keeps a personal income/expense ledger in a key-value store and
//! derives income, expense and balance totals from it.
//!
//! ```
//! use finledger::{LedgerStore, MemoryStore, TransactionDraft, TransactionKind};
//!
//! let mut store = LedgerStore::new(Box::new(MemoryStore::new()), "transactions");
//! store.load().unwrap();
//! store
//!     .add(&TransactionDraft::new(TransactionKind::Income, "Salary", "5000", "Job"))
//!     .unwrap();
//! assert_eq!(store.totals().balance.to_string(), "5000.00");
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

pub use crate::core::services::{aggregate, Totals};
pub use crate::core::LedgerStore;
pub use currency::Money;
pub use errors::{LedgerError, ValidationError};
pub use ledger::{Ledger, Transaction, TransactionDraft, TransactionId, TransactionKind};
pub use storage::{FileStore, KeyValueStore, MemoryStore};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("finledger tracing initialized.");
    });
}
