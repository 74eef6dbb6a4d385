//! REST transport against the hosted backend
//!
//! The backend exposes PostgREST-style table resources. The transport
//! trait keeps the adapter testable without a network; the one real
//! implementation wraps `reqwest`.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::config::RemoteConfig;

/// Errors from the REST layer.
#[derive(Debug, Error)]
pub enum RestError {
    #[error("Request failed: {message}")]
    RequestFailed { message: String },

    #[error("Backend returned status {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Request timed out")]
    Timeout,

    #[error("Could not decode backend response: {message}")]
    Decode { message: String },
}

impl RestError {
    /// Transient-error classification for the retry loop. Matches on the
    /// error text the way the underlying client reports network faults:
    /// connection reset, DNS failure, timeout.
    pub fn is_transient(&self) -> bool {
        match self {
            RestError::Timeout => true,
            RestError::RequestFailed { message } => {
                let message = message.to_lowercase();
                message.contains("connection reset")
                    || message.contains("dns")
                    || message.contains("timed out")
                    || message.contains("timeout")
                    || message.contains("network")
            }
            RestError::Http { .. } | RestError::Decode { .. } => false,
        }
    }
}

/// Row selection parameters: conjunctive equality filters, optional order
/// and limit.
#[derive(Clone, Debug, Default)]
pub struct SelectQuery {
    pub filters: Vec<(String, String)>,
    /// `(column, descending)`
    pub order: Option<(String, bool)>,
    pub limit: Option<u32>,
}

impl SelectQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters.push((column.to_string(), value.to_string()));
        self
    }

    pub fn order_desc(mut self, column: &str) -> Self {
        self.order = Some((column.to_string(), true));
        self
    }

    pub fn order_asc(mut self, column: &str) -> Self {
        self.order = Some((column.to_string(), false));
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Table-level CRUD against the hosted backend.
#[async_trait]
pub trait RestTransport: Send + Sync {
    /// Insert one row and return it fully materialized (server id and
    /// timestamps included).
    async fn insert(&self, table: &str, row: Value) -> Result<Value, RestError>;

    /// Select rows matching the query.
    async fn select(&self, table: &str, query: &SelectQuery) -> Result<Vec<Value>, RestError>;

    /// Patch rows matching the query.
    async fn update(&self, table: &str, patch: Value, query: &SelectQuery) -> Result<(), RestError>;
}

/// `reqwest`-backed transport.
pub struct HttpTransport {
    client: reqwest::Client,
    config: RemoteConfig,
}

impl HttpTransport {
    pub fn new(config: RemoteConfig) -> Result<Self, RestError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| RestError::RequestFailed {
                message: e.to_string(),
            })?;
        Ok(Self { client, config })
    }

    fn table_url(&self, table: &str, query: Option<&SelectQuery>) -> String {
        let base = self.config.base_url.as_str().trim_end_matches('/');
        let mut params: Vec<(String, String)> = Vec::new();
        if let Some(query) = query {
            params.push(("select".to_string(), "*".to_string()));
            for (column, value) in &query.filters {
                params.push((column.clone(), format!("eq.{value}")));
            }
            if let Some((column, descending)) = &query.order {
                let direction = if *descending { "desc" } else { "asc" };
                params.push(("order".to_string(), format!("{column}.{direction}")));
            }
            if let Some(limit) = query.limit {
                params.push(("limit".to_string(), limit.to_string()));
            }
        }
        if params.is_empty() {
            format!("{base}/rest/v1/{table}")
        } else {
            let encoded = params
                .iter()
                .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
                .collect::<Vec<_>>()
                .join("&");
            format!("{base}/rest/v1/{table}?{encoded}")
        }
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", &self.config.api_key)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, RestError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(RestError::Http {
            status: status.as_u16(),
            message,
        })
    }

    fn map_send_error(e: reqwest::Error) -> RestError {
        if e.is_timeout() {
            RestError::Timeout
        } else {
            RestError::RequestFailed {
                message: e.to_string(),
            }
        }
    }
}

#[async_trait]
impl RestTransport for HttpTransport {
    async fn insert(&self, table: &str, row: Value) -> Result<Value, RestError> {
        let url = self.table_url(table, None);
        let response = self
            .request(reqwest::Method::POST, &url)
            .header("Prefer", "return=representation")
            .json(&Value::Array(vec![row]))
            .send()
            .await
            .map_err(Self::map_send_error)?;
        let response = Self::check_status(response).await?;
        let mut rows: Vec<Value> = response.json().await.map_err(|e| RestError::Decode {
            message: e.to_string(),
        })?;
        if rows.is_empty() {
            return Err(RestError::Decode {
                message: format!("insert into {table} returned no row"),
            });
        }
        Ok(rows.remove(0))
    }

    async fn select(&self, table: &str, query: &SelectQuery) -> Result<Vec<Value>, RestError> {
        let url = self.table_url(table, Some(query));
        let response = self
            .request(reqwest::Method::GET, &url)
            .send()
            .await
            .map_err(Self::map_send_error)?;
        let response = Self::check_status(response).await?;
        response.json().await.map_err(|e| RestError::Decode {
            message: e.to_string(),
        })
    }

    async fn update(&self, table: &str, patch: Value, query: &SelectQuery) -> Result<(), RestError> {
        let url = self.table_url(table, Some(query));
        let response = self
            .request(reqwest::Method::PATCH, &url)
            .header("Prefer", "return=minimal")
            .json(&patch)
            .send()
            .await
            .map_err(Self::map_send_error)?;
        Self::check_status(response).await?;
        Ok(())
    }
}
