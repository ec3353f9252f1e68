use service_core::error::AppError;
use thiserror::Error;

/// Domain failures. All of them are request-local and answered with 400.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BankError {
    #[error("Client not found!")]
    ClientNotFound,

    #[error("Client already exists!")]
    DuplicateClient,

    #[error("Insufficient funds!")]
    InsufficientFunds,

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

impl BankError {
    /// Short label for metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::ClientNotFound => "client_not_found",
            Self::DuplicateClient => "duplicate_client",
            Self::InsufficientFunds => "insufficient_funds",
            Self::InvalidDate(_) => "invalid_date",
        }
    }
}

impl From<BankError> for AppError {
    fn from(err: BankError) -> Self {
        AppError::BadRequest(anyhow::Error::new(err))
    }
}
