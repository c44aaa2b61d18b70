//! Telemetry metric name constants.
//!
//! Consumers install their own `metrics` recorder (e.g. prometheus, statsd);
//! without a recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `anifetch_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `service`: remote service name (e.g. "anizip", "nyaa")
//! - `status`: outcome: "ok", "not_found", "transport", "decode" or "error"

/// Total remote requests issued.
///
/// Labels: `service`, `status`.
pub const REMOTE_REQUESTS_TOTAL: &str = "anifetch_remote_requests_total";

/// Remote request duration in seconds.
///
/// Labels: `service`.
pub const REMOTE_REQUEST_DURATION_SECONDS: &str = "anifetch_remote_request_duration_seconds";

/// Total metadata cache hits.
///
/// Labels: `service`.
pub const CACHE_HITS_TOTAL: &str = "anifetch_cache_hits_total";

/// Total metadata cache misses (including misses that joined an in-flight lookup).
///
/// Labels: `service`.
pub const CACHE_MISSES_TOTAL: &str = "anifetch_cache_misses_total";

/// Total batches finished.
///
/// Labels: `status` ("ok" | "error").
pub const BATCHES_TOTAL: &str = "anifetch_batches_total";
