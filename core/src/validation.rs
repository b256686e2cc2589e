//! Client-side checks run before an account is submitted.
//!
//! Advisory only: the server decides whether an account is accepted. The
//! check exists so obviously unsupported payloads fail without a round trip.

use thiserror::Error;

use crate::types::AccountData;

/// ISO 3166-1 alpha-2 codes the accounts API accepts.
pub const SUPPORTED_COUNTRIES: [&str; 23] = [
    "GB", "AU", "BE", "CA", "DK", "FO", "GL", "EE", "FI", "FR", "DE", "GR", "HK", "IE", "IT", "LU", "NL", "PL",
    "PT", "ES", "SE", "CH", "US",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid body, attributes is missing")]
    MissingAttributes,

    #[error("invalid country, country is missing")]
    MissingCountry,

    #[error("invalid country {0}")]
    UnsupportedCountry(String),
}

pub fn is_supported_country(code: &str) -> bool {
    SUPPORTED_COUNTRIES.contains(&code)
}

/// Check that the payload carries attributes with a supported country.
pub fn validate_account(body: &AccountData) -> Result<(), ValidationError> {
    let attributes = body.data.attributes.as_ref().ok_or(ValidationError::MissingAttributes)?;
    let country = attributes.country.as_deref().ok_or(ValidationError::MissingCountry)?;
    if !is_supported_country(country) {
        return Err(ValidationError::UnsupportedCountry(country.to_string()));
    }
    Ok(())
}
