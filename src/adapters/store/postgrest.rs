//! PostgREST Content Store Adapter
//!
//! Reads articles through a PostgREST endpoint such as the one Supabase
//! exposes at `{project_url}/rest/v1`.
//!
//! # Requests
//!
//! - Keyed lookup: `GET /rest/v1/{table}?{column}=eq.{value}&select=*&limit=1`
//! - Listing: `GET /rest/v1/{table}?select=*&order={column}.{asc|desc}`
//!
//! Both carry the project key as `apikey` and as a bearer token (or the
//! service-role key as bearer when one is configured).

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde_json::Value;
use std::time::Duration;

use crate::ports::{validate_identifier, ContentStore, OrderBy, StoreError, StoreRow};

/// Configuration for the PostgREST adapter.
#[derive(Debug, Clone)]
pub struct PostgrestConfig {
    /// Project URL without the `/rest/v1` suffix.
    pub base_url: String,
    /// Public (anon) API key.
    api_key: Secret<String>,
    /// Optional service-role key used as the bearer token.
    service_role_key: Option<Secret<String>>,
    /// Request timeout.
    pub timeout: Duration,
}

impl PostgrestConfig {
    /// Creates a configuration for the given project URL and API key.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: Secret::new(api_key.into()),
            service_role_key: None,
            timeout: Duration::from_secs(10),
        }
    }

    /// Uses a service-role key as the bearer token.
    pub fn with_service_role_key(mut self, key: impl Into<String>) -> Self {
        self.service_role_key = Some(Secret::new(key.into()));
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    fn bearer(&self) -> &str {
        self.service_role_key
            .as_ref()
            .map(|k| k.expose_secret().as_str())
            .unwrap_or_else(|| self.api_key())
    }
}

/// Content store backed by a PostgREST HTTP API.
pub struct PostgrestContentStore {
    config: PostgrestConfig,
    client: Client,
}

impl PostgrestContentStore {
    /// Creates the adapter, building an HTTP client with the configured timeout.
    pub fn new(config: PostgrestConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StoreError::unavailable(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }

    /// Builds the table endpoint URL.
    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.base_url, table)
    }

    async fn fetch_rows(&self, table: &str, query: &[(&str, String)]) -> Result<Vec<StoreRow>, StoreError> {
        validate_identifier(table)?;

        let response = self
            .client
            .get(self.table_url(table))
            .query(query)
            .header("apikey", self.config.api_key())
            .header("Authorization", format!("Bearer {}", self.config.bearer()))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let response = handle_response_status(response, self.config.timeout.as_secs()).await?;
        let body: Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                self.timeout_error()
            } else {
                StoreError::malformed(format!("Response is not JSON: {}", e))
            }
        })?;
        rows_from_json(body)
    }

    fn timeout_error(&self) -> StoreError {
        StoreError::Timeout(self.config.timeout.as_secs())
    }

    fn transport_error(&self, e: reqwest::Error) -> StoreError {
        if e.is_timeout() {
            self.timeout_error()
        } else if e.is_connect() {
            StoreError::unavailable(format!("Connection failed: {}", e))
        } else {
            StoreError::unavailable(e.to_string())
        }
    }
}

#[async_trait]
impl ContentStore for PostgrestContentStore {
    async fn get_by_key(
        &self,
        table: &str,
        column: &str,
        value: &str,
    ) -> Result<Option<StoreRow>, StoreError> {
        validate_identifier(column)?;
        let query = [
            (column, format!("eq.{}", value)),
            ("select", "*".to_string()),
            ("limit", "1".to_string()),
        ];
        let rows = self.fetch_rows(table, &query).await?;
        Ok(rows.into_iter().next())
    }

    async fn list_ordered(
        &self,
        table: &str,
        order: &OrderBy,
    ) -> Result<Vec<StoreRow>, StoreError> {
        validate_identifier(&order.column)?;
        let query = [("select", "*".to_string()), ("order", order.to_string())];
        self.fetch_rows(table, &query).await
    }

    fn name(&self) -> &'static str {
        "postgrest"
    }
}

/// Maps non-success statuses onto store errors.
async fn handle_response_status(
    response: Response,
    timeout_secs: u64,
) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(classify_status(status, &body, timeout_secs))
}

fn classify_status(status: StatusCode, body: &str, timeout_secs: u64) -> StoreError {
    match status.as_u16() {
        // PostgREST answers 400 for unknown columns, 404 for unknown tables.
        400 | 404 => StoreError::invalid_query(format!("{}: {}", status, body)),
        401 | 403 => StoreError::unavailable(format!("Store rejected credentials ({})", status)),
        // The store or its gateway gave up waiting.
        408 | 504 => StoreError::Timeout(timeout_secs),
        _ => StoreError::unavailable(format!("Unexpected status {}: {}", status, body)),
    }
}

fn rows_from_json(body: Value) -> Result<Vec<StoreRow>, StoreError> {
    let Value::Array(items) = body else {
        return Err(StoreError::malformed("Expected a JSON array of rows"));
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::Object(row) => Ok(row),
            _ => Err(StoreError::malformed("Row is not a JSON object")),
        })
        .collect()
}
