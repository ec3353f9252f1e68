pub mod accounts;
pub mod health;
pub mod metrics;
pub mod statement;
pub mod transactions;

pub use accounts::{create_account, delete_account, get_account, list_accounts, update_account};
pub use health::health_check;
pub use metrics::metrics_endpoint;
pub use statement::{get_balance, get_statement, get_statement_by_date};
pub use transactions::{deposit, shadowed_operation, withdraw};

use crate::services::{metrics::record_rejection, BankError};
use service_core::error::AppError;

/// Log and count a refused request before it becomes a 400.
fn rejected(tax_id: &str, err: BankError) -> AppError {
    tracing::warn!(tax_id = %tax_id, reason = err.reason(), "{}", err);
    record_rejection(&err);
    err.into()
}
