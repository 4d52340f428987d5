use crate::catalog::{PAGE_SIZE, Result};
use std::future::Future;
use std::ops::ControlFlow;
use tracing::{debug, warn};

/// Sequential pager over an upstream listing with a per-call item cap.
///
/// Batches are fetched one after another: each offset and each stop
/// decision depends on the previous batch. A failure on the first batch is
/// returned to the caller; a failure on a later batch ends the loop and
/// keeps what was already collected.
#[derive(Debug, Clone, Copy)]
pub struct BatchAggregator {
    page_size: usize,
}

impl Default for BatchAggregator {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl BatchAggregator {
    #[must_use]
    pub const fn new(page_size: usize) -> Self {
        Self { page_size }
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Collect up to `desired` items starting at `start`.
    ///
    /// Stops on an empty batch, a short batch, or once `desired` items are
    /// held. Never returns more than `desired`.
    pub async fn fetch_n<T, F, Fut>(&self, desired: usize, start: usize, mut fetch: F) -> Result<Vec<T>>
    where
        F: FnMut(usize, usize) -> Fut,
        Fut: Future<Output = Result<Vec<T>>>,
    {
        let mut items = Vec::new();
        let mut offset = start;
        let mut calls = 0usize;

        while items.len() < desired {
            let requested = (desired - items.len()).min(self.page_size);
            let Some(batch) = Self::next_batch(calls, fetch(requested, offset).await)? else {
                break;
            };
            calls += 1;

            let received = batch.len();
            items.extend(batch);

            if received == 0 || received < requested {
                debug!("Upstream exhausted at offset {} ({} items)", offset, received);
                break;
            }
            offset = offset.saturating_add(requested);
        }

        items.truncate(desired);
        debug!("Aggregated {} items in {} calls", items.len(), calls);
        Ok(items)
    }

    /// Walk full-size batches from offset 0, handing each to `on_batch`.
    ///
    /// Stops after `max_batches`, on an empty or short batch, or when
    /// `on_batch` breaks. Returns the number of upstream calls made.
    pub async fn scan<T, F, Fut, V>(&self, max_batches: usize, mut fetch: F, mut on_batch: V) -> Result<usize>
    where
        F: FnMut(usize, usize) -> Fut,
        Fut: Future<Output = Result<Vec<T>>>,
        V: FnMut(Vec<T>) -> ControlFlow<()>,
    {
        let mut calls = 0usize;

        for batch_index in 0..max_batches {
            let offset = batch_index * self.page_size;
            let Some(batch) = Self::next_batch(calls, fetch(self.page_size, offset).await)? else {
                break;
            };
            calls += 1;

            let received = batch.len();
            if received == 0 {
                break;
            }
            if on_batch(batch).is_break() || received < self.page_size {
                break;
            }
        }

        Ok(calls)
    }

    /// Apply the first-batch-fails / later-batch-truncates policy
    fn next_batch<T>(calls: usize, result: Result<Vec<T>>) -> Result<Option<Vec<T>>> {
        match result {
            Ok(batch) => Ok(Some(batch)),
            Err(e) if calls == 0 => Err(e),
            Err(e) => {
                warn!("Batch {} failed, keeping partial results: {}", calls + 1, e);
                Ok(None)
            }
        }
    }
}
