use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

const ACCOUNT_TYPE: &str = "accounts";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub organisation_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<serde_json::Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccountData {
    pub data: Account,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccountsData {
    pub data: Vec<Account>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error_message: String,
}

type Failure = (StatusCode, Json<ErrorBody>);

/// Accounts keyed by id, so listings come back in a stable order.
pub type Db = Arc<RwLock<BTreeMap<String, Account>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(BTreeMap::new()));
    Router::new()
        .route("/v1/health", get(health))
        .route("/v1/organisation/accounts", get(list_accounts).post(create_account))
        .route(
            "/v1/organisation/accounts/{id}",
            get(get_account).delete(delete_account),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn failure(status: StatusCode, message: impl Into<String>) -> Failure {
    (
        status,
        Json(ErrorBody {
            error_message: message.into(),
        }),
    )
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "up" }))
}

/// Supports `filter[<attribute>]=<value>` on string attributes; other keys are ignored.
async fn list_accounts(
    State(db): State<Db>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<AccountsData> {
    let filters: Vec<(&str, &str)> = query
        .iter()
        .filter_map(|(key, value)| {
            key.strip_prefix("filter[")
                .and_then(|rest| rest.strip_suffix(']'))
                .map(|attribute| (attribute, value.as_str()))
        })
        .collect();

    let accounts = db.read().await;
    let data = accounts
        .values()
        .filter(|account| filters.iter().all(|(attribute, value)| matches_filter(account, attribute, value)))
        .cloned()
        .collect();
    Json(AccountsData { data })
}

fn matches_filter(account: &Account, attribute: &str, value: &str) -> bool {
    account
        .attributes
        .as_ref()
        .and_then(|attributes| attributes.get(attribute))
        .and_then(|found| found.as_str())
        == Some(value)
}

async fn get_account(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<AccountData>, Failure> {
    let accounts = db.read().await;
    accounts
        .get(&id)
        .cloned()
        .map(|data| Json(AccountData { data }))
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, format!("record {id} does not exist")))
}

async fn create_account(
    State(db): State<Db>,
    Json(input): Json<AccountData>,
) -> Result<(StatusCode, Json<AccountData>), Failure> {
    let mut account = input.data;
    if Uuid::parse_str(&account.id).is_err() {
        return Err(failure(StatusCode::BAD_REQUEST, "id in body must be of type uuid"));
    }
    if Uuid::parse_str(&account.organisation_id).is_err() {
        return Err(failure(
            StatusCode::BAD_REQUEST,
            "organisation_id in body must be of type uuid",
        ));
    }
    if account.kind != ACCOUNT_TYPE {
        return Err(failure(StatusCode::BAD_REQUEST, "type in body should be one of [accounts]"));
    }

    let mut accounts = db.write().await;
    if accounts.contains_key(&account.id) {
        return Err(failure(
            StatusCode::CONFLICT,
            "Account cannot be created as it violates a duplicate constraint",
        ));
    }
    account.version = Some(0);
    accounts.insert(account.id.clone(), account.clone());
    tracing::info!(id = %account.id, "account created");
    Ok((StatusCode::CREATED, Json(AccountData { data: account })))
}

async fn delete_account(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<StatusCode, Failure> {
    let version: i64 = query
        .get("version")
        .and_then(|raw| raw.parse().ok())
        .ok_or_else(|| failure(StatusCode::BAD_REQUEST, "invalid version number"))?;

    let mut accounts = db.write().await;
    let current = accounts
        .get(&id)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, format!("record {id} does not exist")))?;
    if current.version.unwrap_or(0) != version {
        return Err(failure(StatusCode::CONFLICT, "invalid version"));
    }
    accounts.remove(&id);
    tracing::info!(%id, version, "account deleted");
    Ok(StatusCode::NO_CONTENT)
}
