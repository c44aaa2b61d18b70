//! Concurrent all-or-nothing batch fetching.
//!
//! [`BatchFetcher::fetch_all`] starts one unit of work per input, waits for
//! the units, and either returns every output in input order or fails the
//! whole batch. Partial results are never returned.
//!
//! # Error selection
//!
//! By default every unit runs to completion, and when several fail the
//! reported error is the one with the lowest input index, wrapped in
//! [`AnifetchError::Batch`]. This keeps the outcome independent of network
//! timing.
//!
//! With [`BatchConfig::fail_fast`] units are driven in completion order and
//! the batch returns as soon as any unit fails, whatever its index. The
//! remaining units are dropped (cancelled at their next await point) and
//! queued units never start. The reported error is then the first one
//! observed, which depends on completion order. Outputs of a successful
//! batch are still returned in input order.
//!
//! ```text
//!   inputs:   u0        u1        u2
//!              │         │         │      dispatched together
//!              ▼         ▼         ▼      (at most max_concurrency in flight)
//!            ┌───┐     ┌───┐     ┌───┐
//!            │ f │     │ f │     │ f │
//!            └─┬─┘     └─┬─┘     └─┬─┘
//!              └────┬────┴────┬────┘
//!                   ▼  join   ▼
//!         Ok([o0, o1, o2])  or  Err(Batch { index, source })
//! ```

use futures_util::future::join_all;
use futures_util::{StreamExt, stream};
use tracing::{info, warn};

use crate::telemetry;
use crate::{AnifetchError, Result};

/// Configuration for [`BatchFetcher`].
///
/// ```rust
/// # use anifetch::BatchConfig;
/// let config = BatchConfig::new().max_concurrency(4);
/// assert!(!config.fail_fast);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchConfig {
    /// Maximum units in flight at once. Default: unlimited.
    pub max_concurrency: Option<usize>,
    /// Stop at the first failure and drop the remaining units.
    /// Default: false (every unit runs to completion).
    pub fail_fast: bool,
}

impl BatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the number of units in flight. Zero is treated as one.
    pub fn max_concurrency(mut self, n: usize) -> Self {
        self.max_concurrency = Some(n.max(1));
        self
    }

    pub fn fail_fast(mut self, enabled: bool) -> Self {
        self.fail_fast = enabled;
        self
    }
}

/// Runs a batch of independent fallible units concurrently.
#[derive(Debug, Clone, Default)]
pub struct BatchFetcher {
    config: BatchConfig,
}

impl BatchFetcher {
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Run `f` over every item concurrently.
    ///
    /// Returns the outputs in the order of `items`, or a
    /// [`AnifetchError::Batch`] naming the failing input. An empty input
    /// yields an empty output.
    pub async fn fetch_all<I, T, F, Fut>(&self, items: I, f: F) -> Result<Vec<T>>
    where
        I: IntoIterator,
        F: Fn(I::Item) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let units: Vec<_> = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                let unit = f(item);
                async move { (index, unit.await) }
            })
            .collect();

        let outcome = if self.config.fail_fast {
            let limit = self.config.max_concurrency.unwrap_or(units.len()).max(1);
            first_failure(units, limit).await
        } else {
            let results = match self.config.max_concurrency {
                None => join_all(units).await,
                Some(limit) => stream::iter(units).buffered(limit).collect().await,
            };
            collect_in_order(results)
        };

        match outcome {
            Ok(outputs) => {
                metrics::counter!(telemetry::BATCHES_TOTAL, "status" => "ok").increment(1);
                info!(units = outputs.len(), "batch completed");
                Ok(outputs)
            }
            Err((index, source)) => {
                metrics::counter!(telemetry::BATCHES_TOTAL, "status" => "error").increment(1);
                warn!(index, error = %source, "batch failed");
                Err(AnifetchError::Batch {
                    index,
                    source: Box::new(source),
                })
            }
        }
    }
}

/// Drive units in completion order and stop at the first error. Units still
/// pending at that point are dropped; units not yet started never start.
async fn first_failure<T, Fut>(
    units: Vec<Fut>,
    limit: usize,
) -> std::result::Result<Vec<T>, (usize, AnifetchError)>
where
    Fut: Future<Output = (usize, Result<T>)>,
{
    let mut slots: Vec<Option<T>> = std::iter::repeat_with(|| None).take(units.len()).collect();
    let mut completed = stream::iter(units).buffer_unordered(limit);

    while let Some((index, result)) = completed.next().await {
        match result {
            Ok(output) => slots[index] = Some(output),
            Err(e) => return Err((index, e)),
        }
    }
    Ok(slots.into_iter().flatten().collect())
}

/// Unzip per-unit results, keeping input order. The first error by input
/// index wins; later errors are logged and dropped.
fn collect_in_order<T>(
    results: Vec<(usize, Result<T>)>,
) -> std::result::Result<Vec<T>, (usize, AnifetchError)> {
    let mut outputs = Vec::with_capacity(results.len());
    let mut first_err = None;
    for (index, result) in results {
        match result {
            Ok(output) => outputs.push(output),
            Err(e) if first_err.is_none() => first_err = Some((index, e)),
            Err(e) => warn!(index, error = %e, "additional batch unit failed"),
        }
    }
    match first_err {
        Some(err) => Err(err),
        None => Ok(outputs),
    }
}
