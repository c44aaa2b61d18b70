//! Remote service clients and resolver decorators.
//!
//! - [`AniZipClient`]: media metadata lookups by catalog id
//! - [`NyaaClient`]: magnet extraction and `.torrent` downloads
//! - [`CachedResolver`]: caching, single-flight front for any
//!   [`MediaResolver`]

pub mod anizip;
pub mod cached;
pub mod nyaa;
pub mod traits;

pub use anizip::{AniZipClient, AniZipConfig};
pub use cached::CachedResolver;
pub use nyaa::NyaaClient;
pub use traits::{MagnetResolver, MediaResolver};
