//! Sequential bulk submission in fixed-size batches.
//!
//! A [`BatchRunner`] splits a list of items into batches, hands each batch to
//! a [`BatchSubmitter`], waits for the response, pauses, and moves on. The
//! first failing batch stops the run; batches already accepted stay accepted.

use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{EngineError, EngineResult};

/// Default number of items per batch.
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Default pause between batches.
pub const DEFAULT_INTER_BATCH_DELAY: Duration = Duration::from_millis(100);

/// Batch sizing and pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchConfig {
    /// Items per batch. Zero is treated as one.
    pub batch_size: usize,
    /// Pause after each successful batch.
    pub inter_batch_delay: Duration,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            inter_batch_delay: DEFAULT_INTER_BATCH_DELAY,
        }
    }
}

/// What a submitter reports back for one accepted batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchResponse<D> {
    /// Items processed in this batch.
    pub processed: usize,
    /// Amount processed in this batch.
    pub amount: Decimal,
    /// Per-item details.
    pub details: Vec<D>,
}

/// Receives batches for processing.
#[async_trait]
pub trait BatchSubmitter<T: Sync>: Send + Sync {
    /// Per-item detail returned with each response.
    type Detail: Send;

    /// Processes one batch. An error rejects the whole batch.
    async fn submit(&self, batch: &[T]) -> EngineResult<BatchResponse<Self::Detail>>;
}

/// Running totals reported after each accepted batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchProgress {
    /// Items processed so far.
    pub processed_count: usize,
    /// Total number of items submitted to the run.
    pub total_items: usize,
    /// One-based number of the batch just completed.
    pub current_batch: usize,
    /// Number of batches in the run.
    pub total_batches: usize,
    /// Amount processed so far.
    pub total_amount: Decimal,
}

/// The result of a run.
#[derive(Debug)]
pub struct BatchOutcome<D> {
    /// Items processed before the run ended.
    pub processed_count: usize,
    /// Amount processed before the run ended.
    pub total_amount: Decimal,
    /// Details from every accepted batch, in order.
    pub results: Vec<D>,
    /// The failure that stopped the run, if any.
    pub error: Option<EngineError>,
}

impl<D> BatchOutcome<D> {
    /// Returns true when every batch was accepted.
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

/// Drives a [`BatchSubmitter`] over a list of items.
#[derive(Debug, Clone, Default)]
pub struct BatchRunner {
    config: BatchConfig,
}

impl BatchRunner {
    /// Creates a runner with the given configuration.
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    /// Splits items into batches of the configured size.
    pub fn batches<'a, T>(&self, items: &'a [T]) -> Vec<&'a [T]> {
        items.chunks(self.config.batch_size.max(1)).collect()
    }

    /// Submits every batch in order.
    ///
    /// `on_progress` is called after each accepted batch. No batch is retried.
    pub async fn run<T, S, F>(
        &self,
        items: &[T],
        submitter: &S,
        mut on_progress: F,
    ) -> BatchOutcome<S::Detail>
    where
        T: Sync,
        S: BatchSubmitter<T> + ?Sized,
        F: FnMut(&BatchProgress),
    {
        let batches = self.batches(items);
        let total_batches = batches.len();
        let mut outcome = BatchOutcome {
            processed_count: 0,
            total_amount: Decimal::ZERO,
            results: Vec::new(),
            error: None,
        };

        info!(
            total_items = items.len(),
            total_batches,
            batch_size = self.config.batch_size,
            "Starting batch run"
        );

        for (index, batch) in batches.into_iter().enumerate() {
            let batch_number = index + 1;
            match submitter.submit(batch).await {
                Ok(response) => {
                    outcome.processed_count += response.processed;
                    outcome.total_amount += response.amount;
                    outcome.results.extend(response.details);

                    debug!(batch_number, processed = response.processed, "Batch accepted");
                    on_progress(&BatchProgress {
                        processed_count: outcome.processed_count,
                        total_items: items.len(),
                        current_batch: batch_number,
                        total_batches,
                        total_amount: outcome.total_amount,
                    });

                    if batch_number < total_batches && !self.config.inter_batch_delay.is_zero() {
                        tokio::time::sleep(self.config.inter_batch_delay).await;
                    }
                }
                Err(error) => {
                    warn!(
                        batch_number,
                        processed_count = outcome.processed_count,
                        error = %error,
                        "Batch rejected; stopping run"
                    );
                    outcome.error = Some(EngineError::BatchFailed {
                        batch_number,
                        message: error.to_string(),
                    });
                    return outcome;
                }
            }
        }

        info!(
            processed_count = outcome.processed_count,
            total_amount = %outcome.total_amount,
            "Batch run complete"
        );
        outcome
    }
}
