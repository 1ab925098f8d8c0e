use serde::Serialize;

use crate::currency::Money;
use crate::ledger::{Ledger, Transaction, TransactionKind};

/// Running totals derived from a transaction list. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: Money,
    pub expense: Money,
    pub balance: Money,
}

pub struct SummaryService;

impl SummaryService {
    /// Folds the list into totals. Sums saturate at the `i64` cent range.
    pub fn aggregate(transactions: &[Transaction]) -> Totals {
        let (income, expense) = transactions.iter().fold(
            (Money::ZERO, Money::ZERO),
            |(income, expense), txn| match txn.kind {
                TransactionKind::Income => (income + txn.amount, expense),
                TransactionKind::Expense => (income, expense + txn.amount),
            },
        );
        Totals {
            income,
            expense,
            balance: income - expense,
        }
    }

    pub fn current_totals(ledger: &Ledger) -> Totals {
        Self::aggregate(ledger.transactions())
    }
}

/// Shorthand for [`SummaryService::aggregate`].
pub fn aggregate(transactions: &[Transaction]) -> Totals {
    SummaryService::aggregate(transactions)
}
