//! Asynchronous, batched click recording.
//!
//! The redirect path performs one non-blocking `try_send` and moves on; a
//! dedicated worker task drains the queue and writes batches. Analytics loss
//! under extreme load is an accepted degradation — a full queue drops the
//! newest event, preserving the earliest-funnel signal, and never surfaces
//! anything to the redirect caller.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use metrics::counter;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_retry::Retry;
use tokio_retry::strategy::ExponentialBackoff;
use tracing::{debug, error, warn};

use crate::config::EngineConfig;
use crate::domain::entities::ClickEvent;
use crate::domain::repositories::ClickRepository;

/// Handle for enqueueing click events.
///
/// Cheap to clone; all clones feed the same bounded queue. Dropping every
/// clone closes the queue, after which the worker flushes what remains and
/// exits — awaiting the [`JoinHandle`] from [`ClickRecorder::spawn`] gives a
/// clean shutdown.
#[derive(Clone)]
pub struct ClickRecorder {
    tx: mpsc::Sender<ClickEvent>,
    dropped: Arc<AtomicU64>,
}

impl ClickRecorder {
    /// Starts the flush worker and returns the enqueue handle.
    pub fn spawn<C>(repo: Arc<C>, config: &EngineConfig) -> (Self, JoinHandle<()>)
    where
        C: ClickRepository + 'static,
    {
        let (tx, rx) = mpsc::channel(config.click_queue_capacity);

        let worker = FlushWorker {
            repo,
            batch_size: config.click_flush_batch,
            flush_interval: Duration::from_millis(config.click_flush_interval_ms),
            max_attempts: config.click_flush_max_attempts,
            backoff_base: Duration::from_millis(config.click_flush_backoff_ms),
        };
        let handle = tokio::spawn(worker.run(rx));

        (
            Self {
                tx,
                dropped: Arc::new(AtomicU64::new(0)),
            },
            handle,
        )
    }

    /// Enqueues a click event without blocking.
    ///
    /// On a full (or closed) queue the event is dropped and counted; the
    /// caller never observes a failure.
    pub fn enqueue(&self, event: ClickEvent) {
        if self.tx.try_send(event).is_err() {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            counter!("linkgate_clicks_dropped_total").increment(1);
        }
    }

    /// Number of events dropped at enqueue since startup.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

struct FlushWorker<C> {
    repo: Arc<C>,
    batch_size: usize,
    flush_interval: Duration,
    max_attempts: usize,
    backoff_base: Duration,
}

impl<C: ClickRepository> FlushWorker<C> {
    /// Drains the queue, flushing on batch size or timer, whichever first.
    async fn run(self, mut rx: mpsc::Receiver<ClickEvent>) {
        let mut buffer: Vec<ClickEvent> = Vec::with_capacity(self.batch_size);
        let mut ticker = tokio::time::interval(self.flush_interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                received = rx.recv() => match received {
                    Some(event) => {
                        buffer.push(event);
                        if buffer.len() >= self.batch_size {
                            self.flush(&mut buffer).await;
                        }
                    }
                    None => {
                        // All senders gone: final flush, then shut down.
                        self.flush(&mut buffer).await;
                        return;
                    }
                },
                _ = ticker.tick() => {
                    self.flush(&mut buffer).await;
                }
            }
        }
    }

    /// Writes the buffered batch, retrying with exponential backoff.
    ///
    /// After the attempt budget the batch is discarded: a redirect has long
    /// since been answered, so the only honest options are late delivery or
    /// counted loss.
    async fn flush(&self, buffer: &mut Vec<ClickEvent>) {
        if buffer.is_empty() {
            return;
        }

        let batch = std::mem::take(buffer);
        let strategy = ExponentialBackoff::from_millis(self.backoff_base.as_millis() as u64)
            .max_delay(Duration::from_secs(5))
            .take(self.max_attempts.saturating_sub(1));

        match Retry::spawn(strategy, || async {
            self.repo.insert_batch(&batch).await.inspect_err(|e| {
                warn!(batch_len = batch.len(), error = %e, "click flush attempt failed");
            })
        })
        .await
        {
            Ok(written) => debug!(written, "flushed click batch"),
            Err(e) => {
                counter!("linkgate_click_flush_failures_total").increment(1);
                error!(
                    discarded = batch.len(),
                    error = %e,
                    "click batch discarded after retries"
                );
            }
        }
    }
}
