//! Resolver traits for the remote services.
//!
//! Each remote capability gets its own small trait so that decorators
//! (caching) and batch drivers can be written against the capability rather
//! than a concrete HTTP client, and tests can substitute in-memory fakes.
//!
//! Implementations perform exactly one remote call per invocation: no
//! retries, no caching, no shared mutable state.

use async_trait::async_trait;

use crate::Result;
use crate::types::{MediaRecord, Namespace};

// ============================================================================
// Media Resolver
// ============================================================================

/// Looks up media metadata by catalog identifier.
#[async_trait]
pub trait MediaResolver: Send + Sync {
    /// Service name for logging/metrics.
    fn name(&self) -> &str;

    /// Fetch and decode the record for `(namespace, id)`.
    ///
    /// Errors:
    /// - `Transport` when the service cannot be reached
    /// - `NotFound` for any non-success status
    /// - `Decode` when the body is not a valid record
    async fn resolve(&self, namespace: &Namespace, id: i64) -> Result<MediaRecord>;
}

// ============================================================================
// Magnet Resolver
// ============================================================================

/// Turns a torrent page URL into a magnet link.
#[async_trait]
pub trait MagnetResolver: Send + Sync {
    /// Service name for logging/metrics.
    fn name(&self) -> &str;

    async fn resolve_magnet(&self, url: &str) -> Result<String>;
}
