//! Stateless HTTP request builder and response parser for the accounts API.
//!
//! # Design
//! `AccountClient` holds only a validated `base_url` and carries no mutable
//! state between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. [`AccountApi`](crate::AccountApi) glues the two halves
//! to a transport.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Account, AccountData, AccountsData, HealthStatus};
use crate::url_builder::{build_url, encode_segment, validate_base_url, Filters};

const HEALTH_PATH: &str = "/v1/health";
const ACCOUNTS_PATH: &str = "/v1/organisation/accounts";
const APPLICATION_JSON: &str = "application/json";
const HEALTHY_STATUS: &str = "up";

/// Synchronous, stateless client for the accounts API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network.
#[derive(Debug, Clone)]
pub struct AccountClient {
    base_url: String,
}

impl AccountClient {
    /// Fails fast on an empty or non-absolute URL, or one that carries a query
    /// or fragment. The stored base is normalised with trailing slashes stripped.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            base_url: validate_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_health_check(&self) -> HttpRequest {
        self.request(HttpMethod::Get, HEALTH_PATH.to_string(), &BTreeMap::new())
    }

    pub fn build_list_accounts(&self, filters: &Filters) -> HttpRequest {
        self.request(HttpMethod::Get, ACCOUNTS_PATH.to_string(), filters)
    }

    pub fn build_get_account(&self, id: &str) -> HttpRequest {
        self.request(HttpMethod::Get, account_path(id), &BTreeMap::new())
    }

    pub fn build_create_account(&self, input: &AccountData) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(ApiError::SerializationError)?;
        let mut request = self.request(HttpMethod::Post, ACCOUNTS_PATH.to_string(), &BTreeMap::new());
        request.headers.push(("content-type".to_string(), APPLICATION_JSON.to_string()));
        request.body = Some(body);
        Ok(request)
    }

    pub fn build_delete_account(&self, id: &str, version: i64) -> HttpRequest {
        let query = BTreeMap::from([("version".to_string(), version.to_string())]);
        self.request(HttpMethod::Delete, account_path(id), &query)
    }

    /// Succeeds only when the body decodes and its status is `up`.
    pub fn parse_health_check(&self, response: HttpResponse) -> Result<(), ApiError> {
        let health: HealthStatus = match serde_json::from_str(&response.body) {
            Ok(health) => health,
            Err(_) if !is_success(response.status) => {
                return Err(ApiError::HttpError {
                    status: response.status,
                    body: response.body,
                })
            }
            Err(e) => return Err(ApiError::DeserializationError(e)),
        };
        if health.status != HEALTHY_STATUS {
            return Err(ApiError::Unhealthy { status: health.status });
        }
        Ok(())
    }

    pub fn parse_list_accounts(&self, response: HttpResponse) -> Result<Vec<Account>, ApiError> {
        check_status(&response, &[200])?;
        let envelope: AccountsData = decode(&response)?;
        Ok(envelope.data)
    }

    pub fn parse_get_account(&self, response: HttpResponse) -> Result<Account, ApiError> {
        check_status(&response, &[200])?;
        let envelope: AccountData = decode(&response)?;
        Ok(envelope.data)
    }

    pub fn parse_create_account(&self, response: HttpResponse) -> Result<Account, ApiError> {
        check_status(&response, &[201])?;
        let envelope: AccountData = decode(&response)?;
        Ok(envelope.data)
    }

    /// 204 is what the API documents; 200 is accepted too.
    pub fn parse_delete_account(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, &[204, 200])
    }

    fn request(&self, method: HttpMethod, path: String, query: &BTreeMap<String, String>) -> HttpRequest {
        HttpRequest {
            method,
            url: build_url(&self.base_url, &path, query),
            headers: Vec::new(),
            body: None,
        }
    }
}

fn account_path(id: &str) -> String {
    format!("{ACCOUNTS_PATH}/{}", encode_segment(id))
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(ApiError::DeserializationError)
}

/// Map anything outside `expected` to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: &[u16]) -> Result<(), ApiError> {
    if expected.contains(&response.status) {
        return Ok(());
    }
    let body = response.body.clone();
    Err(match response.status {
        404 => ApiError::NotFound { body },
        409 => ApiError::Conflict { body },
        status => ApiError::HttpError { status, body },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AccountAttributes;

    const ID: &str = "0d209d7f-d07a-4542-947f-5885fddddae7";
    const ACCOUNT_JSON: &str = r#"{"attributes":{"alternative_names":null,"country":"GB","name":[]},"created_on":"2022-10-19T09:03:08.334Z","id":"0d209d7f-d07a-4542-947f-5885fddddae7","modified_on":"2022-10-19T09:03:08.334Z","organisation_id":"ba61483c-d5c5-4f50-ae81-6b8c039bea43","type":"accounts","version":0}"#;

    fn client() -> AccountClient {
        AccountClient::new("http://localhost:8080").unwrap()
    }

    fn gb_payload(id: &str) -> AccountData {
        AccountData {
            data: Account::new(
                id,
                id,
                AccountAttributes {
                    country: Some("GB".to_string()),
                    ..Default::default()
                },
            ),
        }
    }

    #[test]
    fn new_rejects_empty_and_relative_urls() {
        assert!(matches!(AccountClient::new(""), Err(ApiError::EmptyBaseUrl)));
        assert!(matches!(AccountClient::new("test"), Err(ApiError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = AccountClient::new("http://localhost:8080/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
        let req = client.build_list_accounts(&Filters::new());
        assert_eq!(req.url, "http://localhost:8080/v1/organisation/accounts");
    }

    #[test]
    fn request_urls_are_built_from_the_normalised_base() {
        let client = AccountClient::new("http:localhost:8080").unwrap();
        assert_eq!(client.build_health_check().url, "http://localhost:8080/v1/health");

        for base in ["http://local\thost:8080", "http://h:8080?x=1", "http://h:8080#frag"] {
            let err = AccountClient::new(base).unwrap_err();
            assert!(matches!(err, ApiError::InvalidBaseUrl { .. }), "{base:?}: got {err:?}");
        }
    }

    #[test]
    fn build_health_check_produces_correct_request() {
        let req = client().build_health_check();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:8080/v1/health");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_list_accounts_appends_sorted_filters() {
        let filters = Filters::from([
            ("filter[country]".to_string(), "GB".to_string()),
            ("filter[bank_id]".to_string(), "400300".to_string()),
        ]);
        let req = client().build_list_accounts(&filters);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(
            req.url,
            "http://localhost:8080/v1/organisation/accounts?filter%5Bbank_id%5D=400300&filter%5Bcountry%5D=GB"
        );
    }

    #[test]
    fn build_get_account_produces_correct_request() {
        let req = client().build_get_account(ID);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, format!("http://localhost:8080/v1/organisation/accounts/{ID}"));
        assert!(req.body.is_none());
    }

    #[test]
    fn build_create_account_produces_correct_request() {
        let req = client().build_create_account(&gb_payload(ID)).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:8080/v1/organisation/accounts");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["data"]["id"], ID);
        assert_eq!(body["data"]["type"], "accounts");
        assert_eq!(body["data"]["attributes"]["country"], "GB");
    }

    #[test]
    fn build_delete_account_carries_version() {
        let req = client().build_delete_account(ID, 3);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(
            req.url,
            format!("http://localhost:8080/v1/organisation/accounts/{ID}?version=3")
        );
        assert!(req.body.is_none());
    }

    #[test]
    fn parse_health_check_up() {
        assert!(client().parse_health_check(HttpResponse::new(200, r#"{"status":"up"}"#)).is_ok());
    }

    #[test]
    fn parse_health_check_down() {
        let err = client()
            .parse_health_check(HttpResponse::new(200, r#"{"status":"down"}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::Unhealthy { ref status } if status == "down"));
    }

    #[test]
    fn parse_health_check_bad_json() {
        let err = client().parse_health_check(HttpResponse::new(200, "nope")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));

        let err = client().parse_health_check(HttpResponse::new(502, "bad gateway")).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 502, .. }));
    }

    #[test]
    fn parse_list_accounts_success() {
        let body = format!(r#"{{"data":[{ACCOUNT_JSON},{}]}}"#, ACCOUNT_JSON.replace("dae7", "dae8"));
        let accounts = client().parse_list_accounts(HttpResponse::new(200, body)).unwrap();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].id, ID);
        assert_eq!(accounts[1].id, "0d209d7f-d07a-4542-947f-5885fddddae8");
    }

    #[test]
    fn parse_list_accounts_error_keeps_body() {
        let err = client()
            .parse_list_accounts(HttpResponse::new(500, "internal error"))
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, ref body } if body == "internal error"));
    }

    #[test]
    fn parse_list_accounts_bad_json() {
        let err = client().parse_list_accounts(HttpResponse::new(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_get_account_success() {
        let account = client()
            .parse_get_account(HttpResponse::new(200, format!(r#"{{"data":{ACCOUNT_JSON}}}"#)))
            .unwrap();
        assert_eq!(account.id, ID);
        assert_eq!(account.attributes.unwrap().country.as_deref(), Some("GB"));
    }

    #[test]
    fn parse_get_account_tolerates_null_name() {
        let body = format!(r#"{{"data":{}}}"#, ACCOUNT_JSON.replace(r#""name":[]"#, r#""name":null"#));
        let account = client().parse_get_account(HttpResponse::new(200, body)).unwrap();
        assert_eq!(account.id, ID);
        assert!(account.attributes.unwrap().name.is_empty());
    }

    #[test]
    fn parse_get_account_not_found() {
        let body = r#"{"error_message":"record 0d209d7f-d07a-4542-947f-5885fddddae7 does not exist"}"#;
        let err = client().parse_get_account(HttpResponse::new(404, body)).unwrap_err();
        assert!(matches!(err, ApiError::NotFound { body: ref b } if b == body));
    }

    #[test]
    fn parse_create_account_success() {
        let account = client()
            .parse_create_account(HttpResponse::new(201, format!(r#"{{"data":{ACCOUNT_JSON}}}"#)))
            .unwrap();
        assert_eq!(account.id, ID);
    }

    #[test]
    fn parse_create_account_requires_201() {
        let err = client()
            .parse_create_account(HttpResponse::new(200, format!(r#"{{"data":{ACCOUNT_JSON}}}"#)))
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 200, .. }));
    }

    #[test]
    fn parse_create_account_duplicate() {
        let err = client()
            .parse_create_account(HttpResponse::new(409, "duplicate"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict { .. }));
    }

    #[test]
    fn parse_delete_account_accepts_204_and_200() {
        assert!(client().parse_delete_account(HttpResponse::new(204, "")).is_ok());
        assert!(client().parse_delete_account(HttpResponse::new(200, "")).is_ok());
    }

    #[test]
    fn parse_delete_account_bad_request() {
        let err = client()
            .parse_delete_account(HttpResponse::new(400, "invalid version number"))
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 400, .. }));
    }

    #[test]
    fn parse_delete_account_stale_version() {
        let err = client()
            .parse_delete_account(HttpResponse::new(409, "invalid version"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict { .. }));
    }
}
