//! Domain counters for bank-service. Exported through the service-core recorder.

use crate::models::OperationKind;
use crate::services::BankError;
use metrics::counter;

pub fn record_client_created() {
    counter!("bank_clients_created_total").increment(1);
}

pub fn record_client_deleted() {
    counter!("bank_clients_deleted_total").increment(1);
}

/// Counts appended statement operations by kind.
pub fn record_operation(kind: OperationKind) {
    counter!("bank_operations_total", "kind" => kind.as_str()).increment(1);
}

/// Counts requests refused with a domain error.
pub fn record_rejection(err: &BankError) {
    counter!("bank_rejected_operations_total", "reason" => err.reason()).increment(1);
}
