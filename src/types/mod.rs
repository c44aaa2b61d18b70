//! Public types for the anifetch API.

mod download;
mod key;
mod media;
mod namespace;

pub use download::{DownloadPlan, DownloadRequest, MediaDescriptor, SmartSelect};
pub use key::CacheKey;
pub use media::{Episode, Mappings, MediaRecord};
pub use namespace::Namespace;
