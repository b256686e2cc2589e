//! Error types for the accounts API client.
//!
//! # Design
//! `NotFound` and `Conflict` get dedicated variants because callers routinely
//! branch on "the account does not exist" and "the version or id clashed".
//! Every other unexpected status lands in `HttpError`. All protocol variants
//! keep the raw response body for diagnostics.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors returned by the client, the transport, and the service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The base URL passed at construction was empty.
    #[error("base URL must not be empty")]
    EmptyBaseUrl,

    /// The base URL passed at construction is not an absolute URL.
    #[error("base URL {url} is invalid: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// An environment setting could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The request never produced a response (DNS, connect, I/O).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The request exceeded the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The server returned 404.
    #[error("resource not found: {body}")]
    NotFound { body: String },

    /// The server returned 409: duplicate id on create or stale version on delete.
    #[error("conflict: {body}")]
    Conflict { body: String },

    /// The server returned a status other than the expected one, 404 or 409.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The health endpoint answered with a status other than `up`.
    #[error("health status is not up, but {status}")]
    Unhealthy { status: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(#[source] serde_json::Error),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(#[source] serde_json::Error),

    /// The payload was rejected before submission.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
