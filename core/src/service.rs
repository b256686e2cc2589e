//! Account service façade.
//!
//! # Design
//! `AccountService` owns whatever implements `AccountOperations` and adds
//! exactly one behaviour on top: create requests are validated first. It is
//! constructed explicitly and holds no other state, so tests inject a fake
//! and production code injects an `AccountApi`.

use tracing::warn;

use crate::error::ApiError;
use crate::types::{Account, AccountData};
use crate::url_builder::Filters;
use crate::validation::validate_account;

/// The operations the accounts API offers.
pub trait AccountOperations {
    /// `GET /v1/organisation/accounts`, optionally filtered.
    fn get_accounts(&self, filters: &Filters) -> Result<Vec<Account>, ApiError>;

    /// `GET /v1/organisation/accounts/{id}`.
    fn get_account(&self, id: &str) -> Result<Account, ApiError>;

    /// `POST /v1/organisation/accounts`.
    fn create_account(&self, data: &AccountData) -> Result<Account, ApiError>;

    /// `DELETE /v1/organisation/accounts/{id}?version={version}`.
    fn delete_account(&self, id: &str, version: i64) -> Result<(), ApiError>;

    /// `GET /v1/health`; Ok only when the API reports `up`.
    fn is_healthy(&self) -> Result<(), ApiError>;
}

#[derive(Debug, Clone)]
pub struct AccountService<O> {
    operations: O,
}

impl<O: AccountOperations> AccountService<O> {
    pub fn new(operations: O) -> Self {
        Self { operations }
    }

    pub fn operations(&self) -> &O {
        &self.operations
    }

    pub fn get_accounts(&self, filters: &Filters) -> Result<Vec<Account>, ApiError> {
        self.operations.get_accounts(filters)
    }

    pub fn get_account(&self, id: &str) -> Result<Account, ApiError> {
        self.operations.get_account(id)
    }

    /// Rejected payloads never reach the underlying operations.
    pub fn create_account(&self, data: &AccountData) -> Result<Account, ApiError> {
        if let Err(e) = validate_account(data) {
            warn!(id = %data.data.id, error = %e, "account rejected before submission");
            return Err(e.into());
        }
        self.operations.create_account(data)
    }

    pub fn delete_account(&self, id: &str, version: i64) -> Result<(), ApiError> {
        self.operations.delete_account(id, version)
    }

    pub fn is_healthy(&self) -> Result<(), ApiError> {
        self.operations.is_healthy()
    }
}
