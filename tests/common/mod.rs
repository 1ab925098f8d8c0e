#![allow(dead_code)]

use std::sync::Mutex;

use chrono::{DateTime, Duration, TimeZone, Utc};
use finledger::{
    core::Clock, FileStore, KeyValueStore, LedgerStore, TransactionDraft, TransactionKind,
};
use regex::Regex;
use tempfile::TempDir;

pub const KEY: &str = "transactions";

/// Clock that moves forward by a fixed step on every read.
pub struct StepClock {
    next: Mutex<DateTime<Utc>>,
    step: Duration,
}

impl StepClock {
    pub fn new(step_millis: i64) -> Self {
        Self {
            next: Mutex::new(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()),
            step: Duration::milliseconds(step_millis),
        }
    }
}

impl Clock for StepClock {
    fn now(&self) -> DateTime<Utc> {
        let mut next = self.next.lock().expect("clock lock");
        let now = *next;
        *next = now + self.step;
        now
    }
}

/// Store over any backend with a clock that ticks one second per add.
pub fn ledger_store(storage: impl KeyValueStore + 'static) -> LedgerStore {
    LedgerStore::with_clock(Box::new(storage), KEY, Box::new(StepClock::new(1_000)))
}

/// A file-backed store rooted in a fresh temp dir; keep the guard alive.
pub fn file_store() -> (TempDir, FileStore) {
    let temp = TempDir::new().expect("create temp dir");
    let store = FileStore::new(temp.path().join("data")).expect("create file store");
    (temp, store)
}

pub fn income(description: &str, amount: &str, category: &str) -> TransactionDraft {
    TransactionDraft::new(TransactionKind::Income, description, amount, category)
}

pub fn expense(description: &str, amount: &str, category: &str) -> TransactionDraft {
    TransactionDraft::new(TransactionKind::Expense, description, amount, category)
}

pub fn descriptions(store: &LedgerStore) -> Vec<String> {
    store
        .transactions()
        .iter()
        .map(|txn| txn.description.clone())
        .collect()
}

pub fn strip_ansi(text: &str) -> String {
    let pattern = Regex::new(r"\x1b\[[0-9;]*m").expect("valid ansi pattern");
    pattern.replace_all(text, "").into_owned()
}
