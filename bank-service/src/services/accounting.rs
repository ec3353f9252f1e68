//! Balance and statement derivations. Pure functions over a statement slice.

use super::BankError;
use crate::models::Operation;
use chrono::{FixedOffset, NaiveDate};
use rust_decimal::Decimal;

/// Net value of a statement: credits minus debits, starting from zero.
pub fn compute_balance(statement: &[Operation]) -> Decimal {
    statement
        .iter()
        .fold(Decimal::ZERO, |acc, operation| acc + operation.signed_amount())
}

/// Operations created on calendar day `date` as seen from timezone `tz`.
///
/// Time of day is ignored. The returned iterator borrows the statement, so
/// calling again yields the same sequence.
pub fn filter_by_date(
    statement: &[Operation],
    date: NaiveDate,
    tz: FixedOffset,
) -> impl Iterator<Item = &Operation> {
    statement
        .iter()
        .filter(move |operation| operation.created_at.with_timezone(&tz).date_naive() == date)
}

/// Parse a `YYYY-MM-DD` path segment.
pub fn parse_statement_date(raw: &str) -> Result<NaiveDate, BankError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| BankError::InvalidDate(raw.to_string()))
}
