//! In-memory client repository.
//!
//! Holds every client for the lifetime of the process. Handlers reach it
//! through [`SharedRepository`], whose single mutex serialises all access.

use super::{compute_balance, BankError};
use crate::models::{Client, Operation};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Repository handle shared between handlers.
pub type SharedRepository = Arc<Mutex<ClientRepository>>;

/// Ordered collection of clients, looked up by tax id.
#[derive(Debug, Default)]
pub struct ClientRepository {
    clients: Vec<Client>,
}

impl ClientRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap the repository for sharing across request handlers.
    pub fn shared(self) -> SharedRepository {
        Arc::new(Mutex::new(self))
    }

    /// All clients in insertion order.
    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn find_by_tax_id(&self, tax_id: &str) -> Option<&Client> {
        self.clients.iter().find(|client| client.tax_id == tax_id)
    }

    fn find_by_tax_id_mut(&mut self, tax_id: &str) -> Option<&mut Client> {
        self.clients.iter_mut().find(|client| client.tax_id == tax_id)
    }

    pub fn exists(&self, tax_id: &str) -> bool {
        self.clients.iter().any(|client| client.tax_id == tax_id)
    }

    /// Resolve a client or fail with [`BankError::ClientNotFound`].
    pub fn get(&self, tax_id: &str) -> Result<&Client, BankError> {
        self.find_by_tax_id(tax_id).ok_or(BankError::ClientNotFound)
    }

    fn get_mut(&mut self, tax_id: &str) -> Result<&mut Client, BankError> {
        self.find_by_tax_id_mut(tax_id).ok_or(BankError::ClientNotFound)
    }

    /// Register a client with an empty statement.
    ///
    /// Leaves the collection untouched when the tax id is already taken.
    pub fn create(
        &mut self,
        tax_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<&Client, BankError> {
        let tax_id = tax_id.into();
        if self.exists(&tax_id) {
            return Err(BankError::DuplicateClient);
        }

        self.clients.push(Client::new(tax_id, name));
        Ok(&self.clients[self.clients.len() - 1])
    }

    /// Overwrite the client's name. Nothing else changes.
    pub fn update(&mut self, tax_id: &str, name: impl Into<String>) -> Result<(), BankError> {
        self.get_mut(tax_id)?.name = name.into();
        Ok(())
    }

    /// Remove exactly the matched client and hand it back.
    pub fn delete(&mut self, tax_id: &str) -> Result<Client, BankError> {
        let index = self
            .clients
            .iter()
            .position(|client| client.tax_id == tax_id)
            .ok_or(BankError::ClientNotFound)?;

        Ok(self.clients.remove(index))
    }

    pub fn append_operation(
        &mut self,
        tax_id: &str,
        operation: Operation,
    ) -> Result<(), BankError> {
        self.get_mut(tax_id)?.statement.push(operation);
        Ok(())
    }

    /// Current balance of the client's statement.
    pub fn balance(&self, tax_id: &str) -> Result<Decimal, BankError> {
        Ok(compute_balance(&self.get(tax_id)?.statement))
    }

    /// Append a credit of `amount`.
    pub fn deposit(
        &mut self,
        tax_id: &str,
        description: Option<String>,
        amount: Decimal,
        at: DateTime<Utc>,
    ) -> Result<(), BankError> {
        self.append_operation(tax_id, Operation::credit(description, amount, at))
    }

    /// Append a debit of `amount` if the balance covers it.
    ///
    /// On [`BankError::InsufficientFunds`] the statement is unchanged.
    pub fn withdraw(
        &mut self,
        tax_id: &str,
        amount: Decimal,
        at: DateTime<Utc>,
    ) -> Result<(), BankError> {
        let client = self.get_mut(tax_id)?;
        if compute_balance(&client.statement) < amount {
            return Err(BankError::InsufficientFunds);
        }

        client.statement.push(Operation::debit(amount, at));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OperationKind;

    fn dec(n: i64) -> Decimal {
        Decimal::from(n)
    }

    fn repo_with(tax_ids: &[&str]) -> ClientRepository {
        let mut repo = ClientRepository::new();
        for tax_id in tax_ids {
            repo.create(*tax_id, format!("client {}", tax_id)).unwrap();
        }
        repo
    }

    #[test]
    fn create_assigns_id_and_empty_statement() {
        let mut repo = ClientRepository::new();
        let client = repo.create("111", "Ana").unwrap().clone();

        assert_eq!(client.tax_id, "111");
        assert_eq!(client.name, "Ana");
        assert!(client.statement.is_empty());
        assert!(repo.exists("111"));
        assert_eq!(repo.find_by_tax_id("111"), Some(&client));
    }

    #[test]
    fn create_generates_distinct_ids() {
        let repo = repo_with(&["1", "2"]);
        assert_ne!(repo.clients()[0].id, repo.clients()[1].id);
    }

    #[test]
    fn duplicate_create_fails_without_mutation() {
        let mut repo = repo_with(&["111"]);
        repo.deposit("111", None, dec(10), Utc::now()).unwrap();
        let before = repo.clients().to_vec();

        assert_eq!(repo.create("111", "Someone else").unwrap_err(), BankError::DuplicateClient);
        assert_eq!(repo.clients(), before.as_slice());
    }

    #[test]
    fn update_only_changes_name() {
        let mut repo = repo_with(&["111"]);
        repo.deposit("111", None, dec(10), Utc::now()).unwrap();
        let before = repo.get("111").unwrap().clone();

        repo.update("111", "Ana Maria").unwrap();

        let after = repo.get("111").unwrap();
        assert_eq!(after.name, "Ana Maria");
        assert_eq!(after.id, before.id);
        assert_eq!(after.statement, before.statement);
        assert_eq!(repo.update("999", "x"), Err(BankError::ClientNotFound));
    }

    #[test]
    fn delete_removes_exactly_the_matched_client() {
        let mut repo = repo_with(&["1", "2", "3"]);

        let removed = repo.delete("2").unwrap();

        assert_eq!(removed.tax_id, "2");
        assert_eq!(repo.clients().len(), 2);
        assert_eq!(repo.get("2"), Err(BankError::ClientNotFound));
        let remaining: Vec<&str> = repo.clients().iter().map(|c| c.tax_id.as_str()).collect();
        assert_eq!(remaining, vec!["1", "3"]);
    }

    #[test]
    fn delete_first_and_last_positions() {
        let mut repo = repo_with(&["1", "2", "3"]);
        repo.delete("1").unwrap();
        repo.delete("3").unwrap();

        assert_eq!(repo.clients().len(), 1);
        assert!(repo.exists("2"));
        assert_eq!(repo.delete("1").unwrap_err(), BankError::ClientNotFound);
        assert_eq!(repo.clients().len(), 1);
    }

    #[test]
    fn deposit_and_withdraw_move_balance_by_amount() {
        let mut repo = repo_with(&["111"]);

        repo.deposit("111", Some("paycheck".into()), dec(100), Utc::now()).unwrap();
        assert_eq!(repo.balance("111").unwrap(), dec(100));

        repo.withdraw("111", dec(40), Utc::now()).unwrap();
        assert_eq!(repo.balance("111").unwrap(), dec(60));

        let statement = &repo.get("111").unwrap().statement;
        assert_eq!(statement[0].kind, OperationKind::Credit);
        assert_eq!(statement[0].description.as_deref(), Some("paycheck"));
        assert_eq!(statement[1].kind, OperationKind::Debit);
        assert_eq!(statement[1].description, None);
    }

    #[test]
    fn withdraw_exact_balance_is_allowed() {
        let mut repo = repo_with(&["111"]);
        repo.deposit("111", None, dec(50), Utc::now()).unwrap();

        repo.withdraw("111", dec(50), Utc::now()).unwrap();
        assert_eq!(repo.balance("111").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn overdraft_is_rejected_and_statement_unchanged() {
        let mut repo = repo_with(&["111"]);
        repo.deposit("111", None, dec(100), Utc::now()).unwrap();
        let before = repo.get("111").unwrap().statement.clone();

        assert_eq!(
            repo.withdraw("111", dec(150), Utc::now()),
            Err(BankError::InsufficientFunds)
        );
        assert_eq!(repo.get("111").unwrap().statement, before);
        assert_eq!(repo.balance("111").unwrap(), dec(100));
    }

    #[test]
    fn operations_on_unknown_client_fail() {
        let mut repo = ClientRepository::new();

        assert_eq!(
            repo.deposit("404", None, dec(1), Utc::now()),
            Err(BankError::ClientNotFound)
        );
        assert_eq!(
            repo.withdraw("404", dec(1), Utc::now()),
            Err(BankError::ClientNotFound)
        );
        assert_eq!(repo.balance("404"), Err(BankError::ClientNotFound));
        assert!(repo.clients().is_empty());
    }
}
