//! Client model.

use super::Operation;
use serde::Serialize;
use uuid::Uuid;

/// Bank client and its statement, oldest operation first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: Uuid,
    pub tax_id: String,
    pub name: String,
    pub statement: Vec<Operation>,
}

impl Client {
    /// New client with a fresh id and an empty statement.
    pub fn new(tax_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            tax_id: tax_id.into(),
            name: name.into(),
            statement: Vec::new(),
        }
    }
}
