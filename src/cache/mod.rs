//! Caching subsystem.
//!
//! - [`ResultCache`]: generic keyed store of successfully computed values,
//!   safe for concurrent use, unbounded unless [`CacheConfig`] says
//!   otherwise.
//!
//! - [`MediaCache`]: the concrete cache used by
//!   [`CachedResolver`](crate::providers::CachedResolver): media records
//!   keyed on `(namespace, id)`.

pub mod result;

use std::sync::Arc;

pub use result::{CacheConfig, CacheEntry, ResultCache};

use crate::types::{CacheKey, MediaRecord};

/// Media metadata keyed on `(namespace, id)`.
pub type MediaCache = ResultCache<CacheKey, Arc<MediaRecord>>;
