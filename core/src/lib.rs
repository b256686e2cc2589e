//! Synchronous client for the accounts REST API.
//!
//! # Overview
//! `AccountClient` builds `HttpRequest` values and parses `HttpResponse`
//! values without touching the network. A `Transport` executes the round
//! trip; `AccountApi` pairs the two. `AccountService` sits on top and
//! validates accounts before they are created.
//!
//! # Design
//! - `AccountClient` is stateless; it holds only the validated `base_url`.
//! - Every operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit and the mapping is testable with literal responses.
//! - `AccountOperations` is the seam between the service and whatever talks
//!   to the API. There is no global instance; callers construct and inject.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.
//!
//! ```no_run
//! use accounts_core::{AccountApi, AccountService, ClientConfig, Filters};
//!
//! let api = AccountApi::from_config(&ClientConfig::from_env()?)?;
//! let service = AccountService::new(api);
//! service.is_healthy()?;
//! let accounts = service.get_accounts(&Filters::new())?;
//! # Ok::<(), accounts_core::ApiError>(())
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod service;
pub mod transport;
pub mod types;
pub mod url_builder;
pub mod validation;

pub use api::AccountApi;
pub use client::AccountClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use service::{AccountOperations, AccountService};
pub use transport::{Transport, UreqTransport};
pub use types::{Account, AccountAttributes, AccountData, AccountsData, HealthStatus, ACCOUNT_TYPE};
pub use url_builder::Filters;
pub use validation::{validate_account, ValidationError, SUPPORTED_COUNTRIES};
