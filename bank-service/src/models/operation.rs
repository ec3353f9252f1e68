//! Statement operation model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Operation kind (credit or debit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Credit,
    Debit,
}

impl OperationKind {
    /// Label used in metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Credit => "credit",
            Self::Debit => "debit",
        }
    }
}

/// Single statement entry. Never modified after it is appended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: OperationKind,
}

impl Operation {
    /// Credit operation created at `at`.
    pub fn credit(description: Option<String>, amount: Decimal, at: DateTime<Utc>) -> Self {
        Self {
            description,
            amount,
            created_at: at,
            kind: OperationKind::Credit,
        }
    }

    /// Debit operation created at `at`. Withdrawals carry no description.
    pub fn debit(amount: Decimal, at: DateTime<Utc>) -> Self {
        Self {
            description: None,
            amount,
            created_at: at,
            kind: OperationKind::Debit,
        }
    }

    /// Get signed amount (positive for credit, negative for debit).
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            OperationKind::Credit => self.amount,
            OperationKind::Debit => -self.amount,
        }
    }
}
