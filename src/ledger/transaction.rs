use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    currency::{Money, MoneyParseError},
    errors::{DraftField, FieldIssue, FieldProblem, ValidationError},
};

/// Identifier derived from the creation time in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(pub u64);

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TransactionId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(TransactionId)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "receita" => Ok(TransactionKind::Income),
            "expense" | "despesa" => Ok(TransactionKind::Expense),
            other => Err(format!(
                "unknown transaction type `{other}` (expected income or expense)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub description: String,
    pub amount: Money,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    pub date: DateTime<Utc>,
}

impl Transaction {
    pub fn new(id: TransactionId, draft: ValidatedDraft, date: DateTime<Utc>) -> Self {
        Self {
            id,
            description: draft.description,
            amount: draft.amount,
            kind: draft.kind,
            category: draft.category,
            date,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    /// Amount with the sign implied by the transaction kind.
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

/// Raw user input for a new transaction, exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    pub kind: TransactionKind,
    pub description: String,
    pub amount: String,
    pub category: String,
}

/// A draft whose fields have been checked and normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedDraft {
    pub kind: TransactionKind,
    pub description: String,
    pub amount: Money,
    pub category: String,
}

impl TransactionDraft {
    pub fn new(
        kind: TransactionKind,
        description: impl Into<String>,
        amount: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            description: description.into(),
            amount: amount.into(),
            category: category.into(),
        }
    }

    /// Checks every field and reports all problems at once.
    pub fn validate(&self) -> Result<ValidatedDraft, ValidationError> {
        let mut issues = Vec::new();

        let description = self.description.trim();
        if description.is_empty() {
            issues.push(FieldIssue {
                field: DraftField::Description,
                problem: FieldProblem::Missing,
            });
        }

        let amount = match Money::parse(&self.amount) {
            Ok(amount) if amount.is_positive() => Some(amount),
            Ok(_) => {
                issues.push(FieldIssue {
                    field: DraftField::Amount,
                    problem: FieldProblem::NotPositive,
                });
                None
            }
            Err(MoneyParseError::Empty) => {
                issues.push(FieldIssue {
                    field: DraftField::Amount,
                    problem: FieldProblem::Missing,
                });
                None
            }
            Err(MoneyParseError::Invalid(_)) => {
                issues.push(FieldIssue {
                    field: DraftField::Amount,
                    problem: FieldProblem::NotANumber,
                });
                None
            }
            Err(MoneyParseError::Overflow(_)) => {
                issues.push(FieldIssue {
                    field: DraftField::Amount,
                    problem: FieldProblem::TooLarge,
                });
                None
            }
        };

        let category = self.category.trim();
        if category.is_empty() {
            issues.push(FieldIssue {
                field: DraftField::Category,
                problem: FieldProblem::Missing,
            });
        }

        match amount {
            Some(amount) if issues.is_empty() => Ok(ValidatedDraft {
                kind: self.kind,
                description: description.to_string(),
                amount,
                category: category.to_string(),
            }),
            _ => Err(ValidationError::new(issues)),
        }
    }
}
