//! Turning download requests into work for the ingestion step.
//!
//! Two entrypoints:
//!
//! - [`resolve_download`] resolves every torrent page of a
//!   [`DownloadRequest`] into a magnet through the [`BatchFetcher`] and
//!   yields a [`DownloadPlan`]. All-or-nothing: one unresolvable page fails
//!   the request.
//! - [`download_torrent_files`] saves `.torrent` files to disk. Every
//!   download is attempted; a single failure is reported as-is, several
//!   failures are summarized as [`AnifetchError::MultipleFailures`]. Two
//!   URLs that map to the same file name fail the call up front.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use futures_util::future::join_all;
use tracing::{info, warn};

use crate::batch::BatchFetcher;
use crate::providers::nyaa::torrent_file_name;
use crate::providers::{MagnetResolver, NyaaClient};
use crate::types::{DownloadPlan, DownloadRequest};
use crate::{AnifetchError, Result};

/// Resolve magnets for every URL in `urls`, in input order.
pub async fn resolve_magnets<M>(
    resolver: &M,
    fetcher: &BatchFetcher,
    urls: &[String],
) -> Result<Vec<String>>
where
    M: MagnetResolver + ?Sized,
{
    fetcher
        .fetch_all(urls, |url| resolver.resolve_magnet(url))
        .await
}

/// Resolve a download request into a plan for the ingestion step.
///
/// Fails with `InvalidInput` when the destination is empty, or with the
/// batch error when any page cannot be resolved.
pub async fn resolve_download<M>(
    request: DownloadRequest,
    resolver: &M,
    fetcher: &BatchFetcher,
) -> Result<DownloadPlan>
where
    M: MagnetResolver + ?Sized,
{
    if request.destination.trim().is_empty() {
        return Err(AnifetchError::InvalidInput(
            "destination must not be empty".to_string(),
        ));
    }

    let magnets = resolve_magnets(resolver, fetcher, &request.urls).await?;
    info!(
        count = magnets.len(),
        destination = %request.destination,
        resolver = resolver.name(),
        "resolved magnets"
    );

    let smart_select = request.smart_select.enabled.then_some(request.smart_select);

    Ok(DownloadPlan {
        magnets,
        destination: PathBuf::from(request.destination),
        smart_select,
        media: request.media,
    })
}

/// Download every `.torrent` file in `urls` into `destination`.
///
/// Returns the written paths in input order. Each file is named after the
/// last path segment of its URL; URLs that would share a file name are
/// rejected with `InvalidInput` before anything is downloaded.
pub async fn download_torrent_files(
    client: &NyaaClient,
    urls: &[String],
    destination: &Path,
) -> Result<Vec<PathBuf>> {
    let mut names = HashSet::with_capacity(urls.len());
    for url in urls {
        // Unparseable URLs are reported by their own download
        if let Ok(name) = torrent_file_name(url)
            && !names.insert(name.clone())
        {
            return Err(AnifetchError::InvalidInput(format!(
                "more than one URL would be saved as {name}"
            )));
        }
    }

    let results = join_all(
        urls.iter()
            .map(|url| client.download_torrent_file(url, destination)),
    )
    .await;

    let total = results.len();
    let mut paths = Vec::with_capacity(total);
    let mut errors = Vec::new();
    for (url, result) in urls.iter().zip(results) {
        match result {
            Ok(path) => paths.push(path),
            Err(e) => {
                warn!(%url, error = %e, "torrent file download failed");
                errors.push(e);
            }
        }
    }

    match errors.len() {
        0 => Ok(paths),
        1 => Err(errors.remove(0)),
        failed => Err(AnifetchError::MultipleFailures { failed, total }),
    }
}
