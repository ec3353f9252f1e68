//! Domain models for bank-service.

mod client;
mod operation;

pub use client::Client;
pub use operation::{Operation, OperationKind};
