//! Client for the ani.zip mapping service.
//!
//! One endpoint is used: `GET <base>/mappings?<namespace>_id=<id>`, which
//! returns a [`MediaRecord`] as JSON.
//!
//! `200 OK` is the only success. Every other status, including rate limits
//! and server errors, is reported as [`AnifetchError::NotFound`] carrying
//! the status code.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use super::traits::MediaResolver;
use crate::telemetry;
use crate::types::{MediaRecord, Namespace};
use crate::{AnifetchError, Result};

/// Default base URL of the mapping service.
pub const DEFAULT_BASE_URL: &str = "https://api.ani.zip";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Service label used in logs and metrics.
const SERVICE: &str = "anizip";

/// Configuration for [`AniZipClient`].
///
/// ```rust
/// # use anifetch::AniZipConfig;
/// # use std::time::Duration;
/// let config = AniZipConfig::new().timeout(Duration::from_secs(10));
/// assert_eq!(config.base_url, "https://api.ani.zip");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AniZipConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
    /// Per-request timeout. Default: 30s.
    pub timeout: Duration,
}

impl Default for AniZipConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl AniZipConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at a different host (mirrors, wiremock).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Stateless client for the mapping service.
#[derive(Clone)]
pub struct AniZipClient {
    http: Client,
    base_url: String,
}

impl AniZipClient {
    /// Create a client for the public service.
    pub fn new() -> Result<Self> {
        Self::from_config(&AniZipConfig::default())
    }

    /// Create a client with a custom base URL (for testing with wiremock).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        Self::from_config(&AniZipConfig::new().base_url(base_url))
    }

    pub fn from_config(config: &AniZipConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                AnifetchError::Configuration(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The lookup URL for `(namespace, id)`.
    pub fn mappings_url(&self, namespace: &Namespace, id: i64) -> String {
        format!("{}/mappings?{namespace}_id={id}", self.base_url)
    }

    /// Fetch the media record for `(namespace, id)`.
    pub async fn fetch_media(&self, namespace: &Namespace, id: i64) -> Result<MediaRecord> {
        let url = self.mappings_url(namespace, id);
        let started = Instant::now();

        let result = self.fetch(&url).await;

        metrics::histogram!(telemetry::REMOTE_REQUEST_DURATION_SECONDS, "service" => SERVICE)
            .record(started.elapsed().as_secs_f64());
        metrics::counter!(telemetry::REMOTE_REQUESTS_TOTAL,
            "service" => SERVICE,
            "status" => status_label(&result),
        )
        .increment(1);

        match &result {
            Ok(_) => debug!(%namespace, id, "fetched media record"),
            Err(e) => debug!(%namespace, id, error = %e, "media lookup failed"),
        }
        result
    }

    async fn fetch(&self, url: &str) -> Result<MediaRecord> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| AnifetchError::Transport(e.to_string()))?;

        if response.status() != StatusCode::OK {
            return Err(AnifetchError::NotFound {
                status: response.status().as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AnifetchError::Transport(e.to_string()))?;

        serde_json::from_slice(&body).map_err(|e| AnifetchError::Decode(e.to_string()))
    }
}

/// Metric label for a lookup outcome.
pub(crate) fn status_label<T>(result: &Result<T>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(AnifetchError::NotFound { .. }) => "not_found",
        Err(AnifetchError::Transport(_)) => "transport",
        Err(AnifetchError::Decode(_)) => "decode",
        Err(_) => "error",
    }
}

#[async_trait]
impl MediaResolver for AniZipClient {
    fn name(&self) -> &str {
        SERVICE
    }

    async fn resolve(&self, namespace: &Namespace, id: i64) -> Result<MediaRecord> {
        self.fetch_media(namespace, id).await
    }
}
