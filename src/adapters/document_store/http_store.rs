//! HTTP document store client.
//!
//! # Endpoints
//!
//! | Operation        | Request                                  |
//! |------------------|------------------------------------------|
//! | current user     | `GET  {base}/users/{id}`                 |
//! | create session   | `POST {base}/sessions`                   |
//! | fetch balance    | `GET  {base}/users/{id}/credits`         |
//! | debit one credit | `POST {base}/users/{id}/credits/debit`   |
//! | save project     | `POST {base}/projects`                   |
//! | list projects    | `GET  {base}/users/{id}/projects`        |
//!
//! The debit endpoint is expected to be atomic on the store side and to
//! answer 402 or 409 when the balance is already zero.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::domain::account::{
    Credits, DirectoryError, Identity, LedgerError, StoreError, UserAccount,
};
use crate::domain::foundation::UserId;
use crate::domain::redesign::{sort_newest_first, RedesignProject};
use crate::ports::{AccountDirectory, CreditLedger, ProjectStore};

/// Configuration for the document store client.
#[derive(Debug, Clone)]
pub struct DocumentStoreConfig {
    pub base_url: String,
    api_key: Option<Secret<String>>,
    pub timeout: Duration,
}

impl DocumentStoreConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.is_empty()).map(Secret::new);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Deserialize)]
struct BalanceBody {
    credits: Credits,
}

/// REST client for the hosted document store.
pub struct HttpDocumentStore {
    config: DocumentStoreConfig,
    client: Client,
}

impl HttpDocumentStore {
    pub fn new(config: DocumentStoreConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.api_key {
            Some(key) => request.bearer_auth(key.expose_secret()),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, String> {
        self.authorized(request).send().await.map_err(|e| {
            if e.is_timeout() {
                format!("request timed out after {}s", self.config.timeout.as_secs())
            } else {
                e.to_string()
            }
        })
    }

    async fn read_balance(response: reqwest::Response) -> Result<Credits, LedgerError> {
        response
            .json::<BalanceBody>()
            .await
            .map(|body| body.credits)
            .map_err(|e| LedgerError::unavailable(format!("malformed balance: {}", e)))
    }
}

fn ledger_status_error(status: StatusCode, user_id: &UserId) -> LedgerError {
    match status {
        StatusCode::PAYMENT_REQUIRED | StatusCode::CONFLICT => LedgerError::InsufficientCredits,
        StatusCode::NOT_FOUND => LedgerError::UserNotFound(user_id.clone()),
        other => LedgerError::unavailable(format!("unexpected status {}", other)),
    }
}

fn store_status_error(status: StatusCode) -> StoreError {
    if status == StatusCode::CONFLICT || status.is_client_error() {
        StoreError::Rejected(format!("status {}", status))
    } else {
        StoreError::unavailable(format!("unexpected status {}", status))
    }
}

fn directory_status_error(status: StatusCode, user_id: Option<&UserId>) -> DirectoryError {
    match (status, user_id) {
        (StatusCode::NOT_FOUND, Some(id)) => DirectoryError::NotFound(id.clone()),
        (other, _) => DirectoryError::Unavailable(format!("unexpected status {}", other)),
    }
}

#[async_trait]
impl CreditLedger for HttpDocumentStore {
    async fn fetch_balance(&self, user_id: &UserId) -> Result<Credits, LedgerError> {
        let url = self.url(&format!("users/{}/credits", user_id));
        let response = self
            .send(self.client.get(url))
            .await
            .map_err(LedgerError::unavailable)?;
        if !response.status().is_success() {
            return Err(ledger_status_error(response.status(), user_id));
        }
        Self::read_balance(response).await
    }

    async fn debit(&self, user_id: &UserId) -> Result<Credits, LedgerError> {
        let url = self.url(&format!("users/{}/credits/debit", user_id));
        let response = self
            .send(self.client.post(url))
            .await
            .map_err(LedgerError::unavailable)?;
        if !response.status().is_success() {
            return Err(ledger_status_error(response.status(), user_id));
        }
        let balance = Self::read_balance(response).await?;
        debug!(user_id = %user_id, remaining = balance.value(), "credit debited");
        Ok(balance)
    }
}

#[async_trait]
impl ProjectStore for HttpDocumentStore {
    async fn save(&self, project: &RedesignProject) -> Result<(), StoreError> {
        let response = self
            .send(self.client.post(self.url("projects")).json(project))
            .await
            .map_err(StoreError::unavailable)?;
        if !response.status().is_success() {
            return Err(store_status_error(response.status()));
        }
        Ok(())
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<RedesignProject>, StoreError> {
        let url = self.url(&format!("users/{}/projects", user_id));
        let response = self
            .send(self.client.get(url))
            .await
            .map_err(StoreError::unavailable)?;
        if !response.status().is_success() {
            return Err(store_status_error(response.status()));
        }
        let mut projects = response
            .json::<Vec<RedesignProject>>()
            .await
            .map_err(|e| StoreError::unavailable(format!("malformed project list: {}", e)))?;
        sort_newest_first(&mut projects);
        Ok(projects)
    }
}

#[async_trait]
impl AccountDirectory for HttpDocumentStore {
    async fn current_user(&self, user_id: &UserId) -> Result<UserAccount, DirectoryError> {
        let url = self.url(&format!("users/{}", user_id));
        let response = self
            .send(self.client.get(url))
            .await
            .map_err(DirectoryError::Unavailable)?;
        if !response.status().is_success() {
            return Err(directory_status_error(response.status(), Some(user_id)));
        }
        response
            .json::<UserAccount>()
            .await
            .map_err(|e| DirectoryError::Unavailable(format!("malformed account: {}", e)))
    }

    async fn create_session(&self, identity: Identity) -> Result<UserAccount, DirectoryError> {
        let response = self
            .send(self.client.post(self.url("sessions")).json(&identity))
            .await
            .map_err(DirectoryError::Unavailable)?;
        if !response.status().is_success() {
            return Err(directory_status_error(response.status(), None));
        }
        response
            .json::<UserAccount>()
            .await
            .map_err(|e| DirectoryError::Unavailable(format!("malformed account: {}", e)))
    }
}
