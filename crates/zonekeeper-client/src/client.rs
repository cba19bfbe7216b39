//! Main Directory API client implementation.

use crate::api::{RecordsApi, ZonesApi};
use crate::config::{ClientConfig, RateLimitConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use governor::{Quota, RateLimiter};
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use zonekeeper_core::{Result, ZoneError};

type DirectLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// HTTP client for the Directory API
#[derive(Clone)]
pub struct DirectoryClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    api_token: String,
    base_url: String,
    timeout: Duration,
    rate_limiter: DirectLimiter,
}

/// Response envelope wrapping every JSON reply
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<ApiMessage>,
    pub result: Option<T>,
    #[serde(default)]
    pub result_info: Option<ResultInfo>,
}

/// One error or message entry in an envelope
#[derive(Debug, Deserialize)]
pub(crate) struct ApiMessage {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: String,
}

/// Paging metadata of list responses
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub(crate) struct ResultInfo {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub total_count: Option<usize>,
}

impl<T> Envelope<T> {
    /// Unwrap the result, turning `success: false` into an error
    pub(crate) fn into_result(self) -> Result<T> {
        if !self.success {
            return Err(ZoneError::Unknown {
                code: None,
                message: first_message(&self.errors),
            });
        }
        self.result.ok_or_else(|| ZoneError::Unknown {
            code: None,
            message: "response envelope carried no result".to_string(),
        })
    }
}

impl DirectoryClient {
    /// Create a client with the given API token using default settings
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        DirectoryClientBuilder::new(api_token).build()
    }

    /// Create a client from a prepared configuration
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        DirectoryClientBuilder::new(config.api_token)
            .base_url(config.base_url)
            .timeout(config.timeout)
            .rate_limit(config.rate_limit)
            .build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder(api_token: impl Into<String>) -> DirectoryClientBuilder {
        DirectoryClientBuilder::new(api_token)
    }

    /// Access zone endpoints
    #[must_use]
    pub fn zones(&self) -> ZonesApi<'_> {
        ZonesApi::new(self)
    }

    /// Access DNS record endpoints of one zone
    #[must_use]
    pub fn records<'a>(&'a self, zone_id: &'a str) -> RecordsApi<'a> {
        RecordsApi::new(self, zone_id)
    }

    /// Perform a GET request with query parameters
    #[instrument(skip(self, params))]
    pub(crate) async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Envelope<T>> {
        let url = self.build_url(path, params);
        debug!(url = %url, "GET request");
        self.inner.rate_limiter.until_ready().await;

        let response = self
            .inner
            .http
            .get(&url)
            .bearer_auth(&self.inner.api_token)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        self.handle_response(response).await
    }

    /// Perform a GET request that returns plain text
    #[instrument(skip(self))]
    pub(crate) async fn get_text(&self, path: &str) -> Result<String> {
        let url = self.build_url(path, &[]);
        debug!(url = %url, "GET text request");
        self.inner.rate_limiter.until_ready().await;

        let response = self
            .inner
            .http
            .get(&url)
            .bearer_auth(&self.inner.api_token)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        if status.is_success() {
            response.text().await.map_err(|e| self.transport_error(&e))
        } else {
            self.handle_error(status.as_u16(), response).await
        }
    }

    /// Perform a POST request with JSON body
    #[instrument(skip(self, body))]
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Envelope<T>> {
        let url = self.build_url(path, &[]);
        debug!(url = %url, "POST request");
        self.inner.rate_limiter.until_ready().await;

        let response = self
            .inner
            .http
            .post(&url)
            .bearer_auth(&self.inner.api_token)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        self.handle_response(response).await
    }

    /// Perform a PATCH request with JSON body
    #[instrument(skip(self, body))]
    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Envelope<T>> {
        let url = self.build_url(path, &[]);
        debug!(url = %url, "PATCH request");
        self.inner.rate_limiter.until_ready().await;

        let response = self
            .inner
            .http
            .patch(&url)
            .bearer_auth(&self.inner.api_token)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        self.handle_response(response).await
    }

    /// Perform a DELETE request
    #[instrument(skip(self))]
    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        let url = self.build_url(path, &[]);
        debug!(url = %url, "DELETE request");
        self.inner.rate_limiter.until_ready().await;

        let response = self
            .inner
            .http
            .delete(&url)
            .bearer_auth(&self.inner.api_token)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            self.handle_error(status.as_u16(), response).await
        }
    }

    /// Build a URL with encoded query parameters
    fn build_url(&self, path: &str, params: &[(&str, String)]) -> String {
        let mut url = format!("{}{}", self.inner.base_url.trim_end_matches('/'), path);

        if !params.is_empty() {
            let query = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())))
                .finish();
            url.push('?');
            url.push_str(&query);
        }

        url
    }

    /// Map a transport failure onto the error taxonomy
    fn transport_error(&self, err: &reqwest::Error) -> ZoneError {
        if err.is_timeout() {
            ZoneError::Timeout(self.inner.timeout.as_secs())
        } else if err.is_decode() {
            ZoneError::Unknown {
                code: None,
                message: format!("malformed response body: {err}"),
            }
        } else {
            ZoneError::Connection(err.to_string())
        }
    }

    /// Handle an API response that returns a JSON envelope
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<Envelope<T>> {
        let status = response.status();

        if status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| self.transport_error(&e))?;
            serde_json::from_str(&body).map_err(ZoneError::Json)
        } else {
            self.handle_error(status.as_u16(), response).await
        }
    }

    /// Convert an error response to a ZoneError
    async fn handle_error<T>(&self, status: u16, response: reqwest::Response) -> Result<T> {
        let retry_after = parse_retry_after(response.headers());
        let url = response.url().path().to_string();
        let body = response.text().await.unwrap_or_default();

        // Prefer the envelope's error message over the raw body
        let message = serde_json::from_str::<Envelope<serde_json::Value>>(&body)
            .ok()
            .filter(|env| !env.errors.is_empty())
            .map_or(body, |env| first_message(&env.errors));

        Err(status_error(status, message, url, retry_after))
    }
}

/// Map an HTTP status to the error taxonomy
pub(crate) fn status_error(
    status: u16,
    message: String,
    resource: String,
    retry_after: Option<u64>,
) -> ZoneError {
    match status {
        400 => ZoneError::BadRequest { message },
        401 => ZoneError::Unauthorized { message },
        403 => ZoneError::Forbidden { message },
        404 => ZoneError::NotFound {
            resource: if message.is_empty() { resource } else { message },
        },
        409 => ZoneError::Conflict { message },
        429 => {
            warn!(?retry_after, "Rate limited by the Directory");
            ZoneError::RateLimited { retry_after }
        }
        _ => ZoneError::Unknown {
            code: Some(status),
            message,
        },
    }
}

fn parse_retry_after(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

fn first_message(errors: &[ApiMessage]) -> String {
    errors.first().map_or_else(
        || "request failed without an error message".to_string(),
        |e| match e.code {
            Some(code) => format!("{} (code {code})", e.message),
            None => e.message.clone(),
        },
    )
}

/// Builder for configuring a [`DirectoryClient`]
pub struct DirectoryClientBuilder {
    api_token: String,
    base_url: String,
    timeout: Duration,
    user_agent: String,
    rate_limit: RateLimitConfig,
}

impl DirectoryClientBuilder {
    /// Create a new builder with the given API token
    #[must_use]
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("zonekeeper/{}", env!("CARGO_PKG_VERSION")),
            rate_limit: RateLimitConfig::default(),
        }
    }

    /// Set the base URL (useful for testing)
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Set client-side rate limiting
    #[must_use]
    pub const fn rate_limit(mut self, config: RateLimitConfig) -> Self {
        self.rate_limit = config;
        self
    }

    /// Build the client
    pub fn build(self) -> Result<DirectoryClient> {
        if self.api_token.trim().is_empty() {
            return Err(ZoneError::Config("API token must not be empty".to_string()));
        }

        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .gzip(true)
            .build()
            .map_err(|e| ZoneError::Config(format!("failed to build HTTP client: {e}")))?;

        let quota = Quota::per_second(
            NonZeroU32::new(self.rate_limit.requests_per_second).unwrap_or(NonZeroU32::MIN),
        )
        .allow_burst(NonZeroU32::new(self.rate_limit.burst).unwrap_or(NonZeroU32::MIN));

        Ok(DirectoryClient {
            inner: Arc::new(ClientInner {
                http,
                api_token: self.api_token,
                base_url: self.base_url,
                timeout: self.timeout,
                rate_limiter: RateLimiter::direct(quota),
            }),
        })
    }
}
