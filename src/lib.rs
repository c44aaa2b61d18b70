//! Anifetch - cached anime metadata resolution and concurrent batch fetching
//!
//! This crate resolves anime identifiers from one catalog (AniList, MAL,
//! Kitsu, ...) into a full media record through a remote mapping service,
//! caching successful lookups so each `(namespace, id)` pair is fetched at
//! most once. It also runs batches of independent remote lookups
//! concurrently with all-or-nothing semantics, which the download flow uses
//! to turn torrent pages into magnet links.
//!
//! # Metadata Example
//!
//! ```rust,no_run
//! use anifetch::{AniZipClient, CacheConfig, CachedResolver, Namespace};
//!
//! #[tokio::main]
//! async fn main() -> anifetch::Result<()> {
//!     let resolver = CachedResolver::new(AniZipClient::new()?, &CacheConfig::default());
//!
//!     let media = resolver.resolve_cached(&Namespace::ANILIST, 21).await?;
//!     println!("{}: {} episodes", media.title(), media.episode_count);
//!     println!("mal id: {:?}", media.mappings().mal_id);
//!     Ok(())
//! }
//! ```
//!
//! # Batch Example
//!
//! ```rust,no_run
//! use anifetch::{BatchConfig, BatchFetcher, NyaaClient, resolve_magnets};
//!
//! #[tokio::main]
//! async fn main() -> anifetch::Result<()> {
//!     let nyaa = NyaaClient::new()?;
//!     let fetcher = BatchFetcher::new(BatchConfig::new().max_concurrency(8));
//!
//!     let pages = vec![
//!         "https://nyaa.si/view/1".to_string(),
//!         "https://nyaa.si/view/2".to_string(),
//!     ];
//!     for magnet in resolve_magnets(&nyaa, &fetcher, &pages).await? {
//!         println!("{magnet}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod batch;
pub mod cache;
#[cfg(feature = "cli")]
pub mod config;
pub mod download;
pub mod error;
pub mod providers;
pub mod telemetry;
pub mod types;

// Re-export main types at crate root
pub use batch::{BatchConfig, BatchFetcher};
pub use cache::{CacheConfig, CacheEntry, MediaCache, ResultCache};
pub use download::{download_torrent_files, resolve_download, resolve_magnets};
pub use error::{AnifetchError, Result};
pub use providers::{
    AniZipClient, AniZipConfig, CachedResolver, MagnetResolver, MediaResolver, NyaaClient,
};

// Re-export all types
pub use types::{
    CacheKey, DownloadPlan, DownloadRequest, Episode, Mappings, MediaDescriptor, MediaRecord,
    Namespace, SmartSelect,
};
