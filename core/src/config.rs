//! Client settings read from the environment.

use std::time::Duration;

use crate::error::ApiError;

pub const BASE_URL_VAR: &str = "ACCOUNTS_API_URL";
pub const TIMEOUT_VAR: &str = "ACCOUNTS_API_TIMEOUT_SECS";

const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Whole-request timeout. `None` disables it.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
        }
    }

    /// Read `ACCOUNTS_API_URL` and `ACCOUNTS_API_TIMEOUT_SECS`, falling back to defaults.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let defaults = Self::default();
        let base_url = lookup(BASE_URL_VAR).unwrap_or(defaults.base_url);
        let timeout = match lookup(TIMEOUT_VAR) {
            None => defaults.timeout,
            Some(raw) => parse_timeout(&raw)?,
        };
        Ok(Self { base_url, timeout })
    }
}

/// `0` disables the timeout.
fn parse_timeout(raw: &str) -> Result<Option<Duration>, ApiError> {
    let secs: u64 = raw
        .trim()
        .parse()
        .map_err(|e| ApiError::InvalidConfig(format!("{TIMEOUT_VAR}={raw:?}: {e}")))?;
    Ok((secs > 0).then(|| Duration::from_secs(secs)))
}
