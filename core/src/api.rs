//! Account operations executed over a transport.

use tracing::{debug, warn};

use crate::client::AccountClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::service::AccountOperations;
use crate::transport::{Transport, UreqTransport};
use crate::types::{Account, AccountData};
use crate::url_builder::Filters;

/// Pairs an `AccountClient` with a `Transport`. One request per call, no retry.
#[derive(Debug, Clone)]
pub struct AccountApi<T> {
    client: AccountClient,
    transport: T,
}

impl<T: Transport> AccountApi<T> {
    pub fn new(client: AccountClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &AccountClient {
        &self.client
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = request.method.as_str(), url = %request.url, "sending request");
        let response = self.transport.execute(request)?;
        if !(200..300).contains(&response.status) {
            warn!(status = response.status, body = %response.body, "unexpected response status");
        }
        Ok(response)
    }
}

impl AccountApi<UreqTransport> {
    /// Validates the base URL and builds a `ureq` transport with the configured timeout.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = AccountClient::new(&config.base_url)?;
        Ok(Self::new(client, UreqTransport::new(config.timeout)))
    }
}

impl<T: Transport> AccountOperations for AccountApi<T> {
    #[tracing::instrument(skip_all, level = "debug", fields(filters = filters.len()))]
    fn get_accounts(&self, filters: &Filters) -> Result<Vec<Account>, ApiError> {
        let response = self.send(self.client.build_list_accounts(filters))?;
        self.client.parse_list_accounts(response)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    fn get_account(&self, id: &str) -> Result<Account, ApiError> {
        let response = self.send(self.client.build_get_account(id))?;
        self.client.parse_get_account(response)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(id = %data.data.id))]
    fn create_account(&self, data: &AccountData) -> Result<Account, ApiError> {
        let response = self.send(self.client.build_create_account(data)?)?;
        self.client.parse_create_account(response)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id, version = version))]
    fn delete_account(&self, id: &str, version: i64) -> Result<(), ApiError> {
        let response = self.send(self.client.build_delete_account(id, version))?;
        self.client.parse_delete_account(response)
    }

    #[tracing::instrument(skip_all, level = "debug")]
    fn is_healthy(&self) -> Result<(), ApiError> {
        let response = self.send(self.client.build_health_check())?;
        self.client.parse_health_check(response)
    }
}
