//! HTTP client used to query passive subdomain sources.

use async_trait::async_trait;
use dnspector_core::{DnspectorError, Result};
use reqwest::Client as HttpClient;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Default per-request timeout for passive sources
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Anything that can GET a URL and hand back the body.
///
/// Implementations must bound every request by a timeout and map non-2xx
/// responses to errors.
#[async_trait]
pub trait HttpFetcher: Send + Sync {
    /// Fetch `url` and return the response body as text
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Read-only HTTP client for passive sources
#[derive(Clone)]
pub struct PassiveClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    timeout: Duration,
}

impl Default for PassiveClient {
    fn default() -> Self {
        Self::new()
    }
}

impl PassiveClient {
    /// Create a client with default settings
    #[must_use]
    pub fn new() -> Self {
        PassiveClientBuilder::new().build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder() -> PassiveClientBuilder {
        PassiveClientBuilder::new()
    }

    /// Per-request timeout this client was built with
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.inner.timeout
    }

    /// Perform a GET request and return the body
    pub async fn get_text(&self, url: &str) -> Result<String> {
        let parsed = url::Url::parse(url).map_err(|e| DnspectorError::InvalidUrl(format!("{url}: {e}")))?;
        debug!(url = %parsed, "GET request");

        let response = self
            .inner
            .http
            .get(parsed)
            .send()
            .await
            .map_err(|e| self.map_transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DnspectorError::Status {
                code: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| self.map_transport_error(&e))
    }

    fn map_transport_error(&self, err: &reqwest::Error) -> DnspectorError {
        if err.is_timeout() {
            DnspectorError::Timeout(self.inner.timeout)
        } else if err.is_connect() {
            DnspectorError::Connection(err.to_string())
        } else {
            DnspectorError::Http(err.to_string())
        }
    }
}

#[async_trait]
impl HttpFetcher for PassiveClient {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.get_text(url).await
    }
}

/// Builder for configuring a [`PassiveClient`]
pub struct PassiveClientBuilder {
    timeout: Duration,
    user_agent: String,
}

impl Default for PassiveClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PassiveClientBuilder {
    /// Create a builder with default settings
    #[must_use]
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("dnspector/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the per-request timeout
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

    /// Build the client
    #[must_use]
    pub fn build(self) -> PassiveClient {
        let http = HttpClient::builder()
            .timeout(self.timeout)
            .connect_timeout(self.timeout)
            .user_agent(&self.user_agent)
            .gzip(true)
            .build()
            .expect("Failed to build HTTP client");

        PassiveClient {
            inner: Arc::new(ClientInner {
                http,
                timeout: self.timeout,
            }),
        }
    }
}
