use crate::catalog::{CatalogError, Result, UPSTREAM_TIMEOUT};
use parking_lot::RwLock;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info};

/// How a provider authenticates outbound calls
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthScheme {
    #[default]
    None,
    /// `Authorization: Bearer` plus an `X-CSRF-Token` header
    BearerCsrf { token: String, csrf: String },
    /// API key embedded as a query parameter
    QueryKey { param: String, key: String },
}

/// HTTP client wrapper for providers.
///
/// The connection pool is created on first use, dropped by [`close`](Self::close)
/// and recreated by the next call that finds it closed.
pub struct HttpClient {
    provider: &'static str,
    base_url: String,
    auth: AuthScheme,
    timeout: Duration,
    client: RwLock<Option<Client>>,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(provider: &'static str, base_url: impl Into<String>) -> Self {
        Self {
            provider,
            base_url: base_url.into(),
            auth: AuthScheme::None,
            timeout: UPSTREAM_TIMEOUT,
            client: RwLock::new(None),
        }
    }

    /// Builder pattern: set auth scheme
    #[must_use]
    pub fn with_auth(mut self, auth: AuthScheme) -> Self {
        self.auth = auth;
        self
    }

    /// Builder pattern: set per-call timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build full URL from endpoint
    #[must_use]
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Whether a connection pool currently exists
    pub fn is_open(&self) -> bool {
        self.client.read().is_some()
    }

    /// Drop the connection pool
    pub fn close(&self) {
        if self.client.write().take().is_some() {
            debug!("Closed {} HTTP client", self.provider);
        }
    }

    /// Shared client, recreated if closed
    fn client(&self) -> Result<Client> {
        if let Some(client) = self.client.read().as_ref() {
            return Ok(client.clone());
        }

        let mut slot = self.client.write();
        if let Some(client) = slot.as_ref() {
            return Ok(client.clone());
        }

        let client = Client::builder()
            .user_agent("anigate/0.1.0")
            .timeout(self.timeout)
            .build()
            .map_err(|e| CatalogError::Config(format!("Failed to build HTTP client: {e}")))?;

        debug!("Created {} HTTP client", self.provider);
        *slot = Some(client.clone());
        Ok(client)
    }

    /// Prepare an authenticated GET request
    pub(crate) fn request(&self, endpoint: &str, params: &[(&str, String)]) -> Result<RequestBuilder> {
        let mut request = self.client()?.get(self.url(endpoint)).query(params);

        request = match &self.auth {
            AuthScheme::None => request,
            AuthScheme::BearerCsrf { token, csrf } => {
                request.bearer_auth(token).header("X-CSRF-Token", csrf)
            }
            AuthScheme::QueryKey { param, key } => request.query(&[(param.as_str(), key.as_str())]),
        };

        Ok(request)
    }

    /// Execute GET request with query parameters and parse the JSON response
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let url = self.url(endpoint);
        let response = self.request(endpoint, params)?.send().await.map_err(|e| {
            error!("Request error to {} API: {}", self.provider, e);
            CatalogError::Transport(format!("Failed to connect to {} API: {e}", self.provider))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("{} API error: {} for {}", self.provider, status.as_u16(), url);
            return Err(CatalogError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let value: Value = response.json().await?;
        info!(
            "{} API {} -> {} ({})",
            self.provider,
            endpoint,
            status.as_u16(),
            summarize(&value)
        );

        serde_json::from_value(value)
            .map_err(|e| CatalogError::Parse(format!("JSON parse error: {e}")))
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("provider", &self.provider)
            .field("base_url", &self.base_url)
            .field("open", &self.is_open())
            .finish_non_exhaustive()
    }
}

/// Item count of a payload, or `single` for one record
fn summarize(value: &Value) -> String {
    let items = value
        .as_array()
        .or_else(|| value.get("data").and_then(Value::as_array))
        .or_else(|| value.get("results").and_then(Value::as_array));

    match items {
        Some(items) => format!("{} items", items.len()),
        None => "single".to_string(),
    }
}

