//! Torrent page client: magnet extraction and `.torrent` downloads.
//!
//! Torrent index pages (nyaa-style) link their magnet as an anchor
//! `href="magnet:?..."`. [`NyaaClient::resolve_magnet`] fetches the page and
//! returns the first such link with HTML entities in the query decoded.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use regex::Regex;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::anizip::status_label;
use super::traits::MagnetResolver;
use crate::telemetry;
use crate::{AnifetchError, Result};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const SERVICE: &str = "nyaa";

static MAGNET_HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"href\s*=\s*["'](magnet:\?[^"']+)["']"#).expect("magnet pattern is valid")
});

/// Client for torrent index pages.
#[derive(Clone)]
pub struct NyaaClient {
    http: Client,
}

impl NyaaClient {
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build().map_err(|e| {
            AnifetchError::Configuration(format!("failed to build HTTP client: {e}"))
        })?;
        Ok(Self { http })
    }

    /// Fetch a torrent page and return its magnet link.
    pub async fn fetch_magnet(&self, url: &str) -> Result<String> {
        let url = parse_url(url)?;
        let started = Instant::now();

        let result = match self.fetch_page(url.clone()).await {
            Ok(page) => extract_magnet(&page)
                .ok_or_else(|| AnifetchError::Decode(format!("no magnet link found on {url}"))),
            Err(e) => Err(e),
        };

        record_request(started, &result);
        debug!(%url, ok = result.is_ok(), "magnet lookup finished");
        result
    }

    /// Download a `.torrent` file into `destination`, creating the directory
    /// if needed. The file is named after the last path segment of `url`.
    ///
    /// Returns the path written.
    pub async fn download_torrent_file(&self, url: &str, destination: &Path) -> Result<PathBuf> {
        let url = parse_url(url)?;
        let file_name = file_name_of(&url)?;
        let started = Instant::now();

        let result = self.fetch_bytes(url.clone()).await;
        record_request(started, &result);
        let body = result?;

        tokio::fs::create_dir_all(destination).await?;
        let path = destination.join(file_name);
        tokio::fs::write(&path, &body).await?;
        debug!(%url, path = %path.display(), bytes = body.len(), "saved torrent file");
        Ok(path)
    }

    async fn fetch_page(&self, url: Url) -> Result<String> {
        self.get_ok(url)
            .await?
            .text()
            .await
            .map_err(|e| AnifetchError::Transport(e.to_string()))
    }

    async fn fetch_bytes(&self, url: Url) -> Result<Vec<u8>> {
        let body = self
            .get_ok(url)
            .await?
            .bytes()
            .await
            .map_err(|e| AnifetchError::Transport(e.to_string()))?;
        Ok(body.to_vec())
    }

    async fn get_ok(&self, url: Url) -> Result<reqwest::Response> {
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
        Ok(response)
    }
}

/// The name a `.torrent` URL is saved under: its last path segment.
pub(crate) fn torrent_file_name(url: &str) -> Result<String> {
    file_name_of(&parse_url(url)?)
}

fn file_name_of(url: &Url) -> Result<String> {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| AnifetchError::InvalidInput(format!("cannot derive a file name from {url}")))
}

fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|e| AnifetchError::InvalidInput(format!("invalid URL '{url}': {e}")))
}

fn record_request<T>(started: Instant, result: &Result<T>) {
    metrics::histogram!(telemetry::REMOTE_REQUEST_DURATION_SECONDS, "service" => SERVICE)
        .record(started.elapsed().as_secs_f64());
    metrics::counter!(telemetry::REMOTE_REQUESTS_TOTAL,
        "service" => SERVICE,
        "status" => status_label(result),
    )
    .increment(1);
}

/// First magnet link in an HTML page, with `&amp;` decoded.
fn extract_magnet(page: &str) -> Option<String> {
    MAGNET_HREF
        .captures(page)
        .map(|caps| caps[1].replace("&amp;", "&"))
}

#[async_trait]
impl MagnetResolver for NyaaClient {
    fn name(&self) -> &str {
        SERVICE
    }

    async fn resolve_magnet(&self, url: &str) -> Result<String> {
        self.fetch_magnet(url).await
    }
}
