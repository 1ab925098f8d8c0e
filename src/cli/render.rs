//! Text views of the ledger: the history list and the totals panel.

use std::fmt::Write as _;

use colored::Colorize;

use crate::core::services::Totals;
use crate::currency::CurrencyFormatter;
use crate::ledger::Transaction;

pub const EMPTY_HISTORY: &str = "No transactions recorded.";

/// One line per transaction, newest first. Positions are 1-based and match
/// the `@N` form accepted by `remove`.
pub fn history(transactions: &[Transaction], formatter: &CurrencyFormatter) -> String {
    if transactions.is_empty() {
        return EMPTY_HISTORY.to_string();
    }

    let mut out = String::new();
    for (idx, txn) in transactions.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        let _ = write!(
            out,
            "@{} {} [{}] {}  {}  (id {})",
            idx + 1,
            txn.description,
            txn.category,
            formatter.format_timestamp(txn.date),
            signed_amount(txn, formatter),
            txn.id
        );
    }
    out
}

fn signed_amount(txn: &Transaction, formatter: &CurrencyFormatter) -> String {
    let amount = formatter.format_amount(txn.amount);
    if txn.is_income() {
        format!("+{amount}").green().to_string()
    } else {
        format!("-{amount}").red().to_string()
    }
}

pub fn summary(totals: &Totals, formatter: &CurrencyFormatter) -> String {
    let balance = formatter.format_amount(totals.balance);
    let balance = if totals.balance.is_negative() {
        balance.yellow()
    } else {
        balance.blue()
    };
    format!(
        "Income:  {}\nExpense: {}\nBalance: {}",
        formatter.format_amount(totals.income).green(),
        formatter.format_amount(totals.expense).red(),
        balance
    )
}
