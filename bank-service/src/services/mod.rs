pub mod accounting;
pub mod error;
pub mod metrics;
pub mod repository;

pub use accounting::{compute_balance, filter_by_date, parse_statement_date};
pub use error::BankError;
pub use repository::{ClientRepository, SharedRepository};
