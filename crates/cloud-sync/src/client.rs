//! Low-level PostgREST client.
//!
//! Every request carries the API key twice (`apikey` header and bearer
//! token, same value). Writes are idempotent bulk upserts keyed on an
//! explicit conflict column tuple; deletes treat 404 as already-absent;
//! RPCs return a bracketed scalar. There is no retry path: any failure is
//! reported to the caller with the raw status and body.

use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::config::RemoteConfig;
use crate::error::{CloudSyncError, Result};

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const MAX_LOG_BODY_CHARS: usize = 512;

/// Client for a PostgREST-style endpoint.
#[derive(Debug, Clone)]
pub struct PostgrestClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PostgrestClient {
    pub fn new(config: &RemoteConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn rpc_url(&self, procedure: &str) -> String {
        format!("{}/rest/v1/rpc/{}", self.base_url, procedure)
    }

    /// Create headers for an API request.
    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let key_value = HeaderValue::from_str(&self.api_key)
            .map_err(|_| CloudSyncError::auth("Invalid API key format"))?;
        headers.insert("apikey", key_value);

        let auth_value = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|_| CloudSyncError::auth("Invalid API key format"))?;
        headers.insert(AUTHORIZATION, auth_value);

        Ok(headers)
    }

    fn log_response(status: StatusCode, body: &str) {
        if status.is_success() {
            debug!("API response status: {}", status);
            return;
        }

        let mut preview = body.chars().take(MAX_LOG_BODY_CHARS).collect::<String>();
        if body.chars().count() > MAX_LOG_BODY_CHARS {
            preview.push_str("...");
        }
        debug!("API response error ({}): {}", status, preview);
    }

    /// Parse a JSON array response body.
    async fn parse_rows<T: DeserializeOwned>(
        context: &str,
        response: reqwest::Response,
    ) -> Result<Vec<T>> {
        let status = response.status();
        let body = response.text().await?;
        Self::log_response(status, &body);

        if !status.is_success() {
            return Err(CloudSyncError::api(status.as_u16(), body));
        }

        serde_json::from_str(&body).map_err(|e| {
            log::error!("Failed to decode {} response: {}. Body: {}", context, e, body);
            CloudSyncError::decode(context, e.to_string())
        })
    }

    /// Filtered read: `GET /rest/v1/<table>?<query>`.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let url = self.rest_url(table);
        debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .headers(self.headers()?)
            .query(query)
            .send()
            .await?;

        Self::parse_rows(table, response).await
    }

    /// Idempotent bulk upsert: `POST /rest/v1/<table>?on_conflict=<cols>`
    /// with `Prefer: resolution=merge-duplicates`. On conflict the existing
    /// row's non-key columns are replaced, so re-running an upload cannot
    /// create duplicates.
    pub async fn upsert<T: Serialize>(
        &self,
        table: &str,
        on_conflict: &[&str],
        rows: &[T],
    ) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let url = self.rest_url(table);
        debug!(
            "POST {} ({} rows, on_conflict={})",
            url,
            rows.len(),
            on_conflict.join(",")
        );

        let response = self
            .client
            .post(&url)
            .headers(self.headers()?)
            .header("Prefer", "resolution=merge-duplicates")
            .query(&[("on_conflict", on_conflict.join(","))])
            .json(rows)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await?;
        Self::log_response(status, &body);
        Err(CloudSyncError::api(status.as_u16(), body))
    }

    /// Filtered update with `Prefer: return=representation`; returns the
    /// updated rows. An empty representation means no row matched.
    pub async fn patch<T: Serialize, R: DeserializeOwned>(
        &self,
        table: &str,
        filter: &[(&str, String)],
        body: &T,
    ) -> Result<Vec<R>> {
        let url = self.rest_url(table);
        debug!("PATCH {} {:?}", url, filter);

        let response = self
            .client
            .patch(&url)
            .headers(self.headers()?)
            .header("Prefer", "return=representation")
            .query(filter)
            .json(body)
            .send()
            .await?;

        Self::parse_rows(table, response).await
    }

    /// Like [`patch`](Self::patch) but expects exactly one matching row;
    /// an empty representation is the distinct no-matching-row error, not
    /// a write failure.
    pub async fn patch_single<T: Serialize, R: DeserializeOwned>(
        &self,
        table: &str,
        filter: &[(&str, String)],
        body: &T,
    ) -> Result<R> {
        let mut rows: Vec<R> = self.patch(table, filter, body).await?;
        if rows.is_empty() {
            return Err(CloudSyncError::NoMatchingRow {
                collection: table.to_string(),
            });
        }
        Ok(rows.remove(0))
    }

    /// Point delete by filter predicate. 404 means already absent and is
    /// success.
    pub async fn delete(&self, table: &str, filter: &[(&str, String)]) -> Result<()> {
        let url = self.rest_url(table);
        debug!("DELETE {} {:?}", url, filter);

        let response = self
            .client
            .delete(&url)
            .headers(self.headers()?)
            .query(filter)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() || status == StatusCode::NOT_FOUND {
            return Ok(());
        }
        let body = response.text().await?;
        Self::log_response(status, &body);
        Err(CloudSyncError::api(status.as_u16(), body))
    }

    /// Remote procedure call returning an integer count. The response body
    /// is a bracketed scalar (`[3]`) or a bare number.
    pub async fn rpc_i64(&self, procedure: &str, args: serde_json::Value) -> Result<i64> {
        let url = self.rpc_url(procedure);
        debug!("POST {} {}", url, args);

        let response = self
            .client
            .post(&url)
            .headers(self.headers()?)
            .json(&args)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        Self::log_response(status, &body);
        if !status.is_success() {
            return Err(CloudSyncError::api(status.as_u16(), body));
        }

        let value: serde_json::Value = serde_json::from_str(body.trim())
            .map_err(|e| CloudSyncError::decode(procedure, e.to_string()))?;
        let scalar = match &value {
            serde_json::Value::Array(items) => items.first().and_then(|v| v.as_i64()),
            serde_json::Value::Number(_) => value.as_i64(),
            _ => None,
        };
        scalar.ok_or_else(|| {
            CloudSyncError::decode(procedure, format!("expected integer scalar, got {}", body))
        })
    }
}
