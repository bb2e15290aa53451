//! The FIFO slot queue that yields results in submission order.

use super::config::RunnerConfig;
use super::pool::{TaskHandle, WorkerPool};
use super::task::{Task, TaskResult};
use crate::cancellation::CancellationToken;
use crate::errors::{ConfigError, TaskError};
use futures::Stream;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Number of non-head occupied slots required before the slow-head retry
/// heuristic may fire: the head must be the sole straggler among at least
/// four occupied slots.
const MIN_TRAILING_SLOTS_FOR_RETRY: usize = 3;

/// One submitted-but-unconsumed task.
///
/// The task descriptor is kept alongside the handle so a slow head can be
/// resubmitted with the same parameters.
struct Slot<T> {
    task: Task<T>,
    handle: TaskHandle<T>,
    retries_left: u32,
}

/// Rate-limited, order-preserving result sequence.
///
/// Pulls tasks lazily from `source`, keeps at most
/// `config.max_active_tasks` of them in flight on `pool`, and yields their
/// results in submission order. Unlike a plain join-all, no task beyond the
/// bound is submitted while results sit unconsumed, so a slow consumer
/// exerts backpressure on the producer.
///
/// A task failure is yielded at that task's output position; afterwards no
/// further tasks are submitted and the remaining in-flight slots are
/// awaited and discarded.
pub struct OrderedResults<T, S, P>
where
    S: Iterator<Item = Task<T>>,
    P: WorkerPool<T>,
{
    source: S,
    pool: P,
    config: RunnerConfig,
    queue: VecDeque<Slot<T>>,
    cancel: Arc<CancellationToken>,
    /// Total tasks handed to the pool, resubmissions excluded.
    submitted: usize,
    /// The source returned None; never pull it again.
    source_drained: bool,
    /// A failure or cancellation was surfaced, or the queue ran dry.
    finished: bool,
}

impl<T, S, P> OrderedResults<T, S, P>
where
    S: Iterator<Item = Task<T>>,
    P: WorkerPool<T>,
{
    /// Creates the runner and primes the pipeline.
    ///
    /// Up to `config.max_active_tasks` tasks are pulled and submitted
    /// immediately (fewer if the source is exhausted first).
    pub fn new(source: S, pool: P, config: RunnerConfig) -> Result<Self, ConfigError> {
        Self::with_cancellation(source, pool, config, Arc::new(CancellationToken::new()))
    }

    /// Like [`OrderedResults::new`], with a caller-supplied cancellation
    /// token.
    ///
    /// The token is checked before every submission. Once cancelled, no
    /// new tasks are submitted, remaining slots are awaited and discarded,
    /// and the next pull yields [`TaskError::Cancelled`].
    pub fn with_cancellation(
        source: S,
        pool: P,
        config: RunnerConfig,
        cancel: Arc<CancellationToken>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut runner = Self {
            source,
            pool,
            queue: VecDeque::with_capacity(config.max_active_tasks),
            config,
            cancel,
            submitted: 0,
            source_drained: false,
            finished: false,
        };
        for _ in 0..runner.config.max_active_tasks {
            if !runner.submit_next() {
                break;
            }
        }
        Ok(runner)
    }

    /// Yields the next result in submission order, or `None` when every
    /// task has been consumed.
    ///
    /// This is the runner's only suspension point: it blocks while the
    /// oldest outstanding task is still running. The freed slot is refilled
    /// before the result is yielded, so a new task starts as soon as
    /// capacity opens rather than on the following pull.
    pub async fn next(&mut self) -> Option<TaskResult<T>> {
        if self.finished {
            return None;
        }
        if self.cancel.is_cancelled() {
            return Some(self.surface_cancellation().await);
        }
        let Some(slot) = self.queue.pop_front() else {
            self.finished = true;
            return None;
        };
        match self.wait_for_head(slot).await {
            Ok(value) => {
                self.submit_next();
                Some(Ok(value))
            }
            Err(err) => {
                debug!(error = %err, "task failed; halting submissions");
                self.finished = true;
                self.drain().await;
                Some(Err(err))
            }
        }
    }

    /// Drives the runner to completion and collects every result.
    ///
    /// Stops at the first failure, after draining in-flight slots.
    pub async fn collect(mut self) -> TaskResult<Vec<T>> {
        let mut results = Vec::new();
        while let Some(result) = self.next().await {
            results.push(result?);
        }
        Ok(results)
    }

    /// Adapts the runner into a [`futures::Stream`] of results.
    pub fn into_stream(self) -> impl Stream<Item = TaskResult<T>> {
        futures::stream::unfold(self, |mut runner| async move {
            runner.next().await.map(|result| (result, runner))
        })
    }

    /// Returns the cancellation token governing this run.
    #[must_use]
    pub fn cancellation_token(&self) -> &Arc<CancellationToken> {
        &self.cancel
    }

    /// Number of occupied slots (running or holding an unread result).
    #[must_use]
    pub fn occupied_slots(&self) -> usize {
        self.queue.len()
    }

    /// Total tasks handed to the pool so far, resubmissions excluded.
    #[must_use]
    pub fn submitted(&self) -> usize {
        self.submitted
    }

    /// Pulls one task from the source and submits it, if a task remains
    /// and the run is not cancelled. Returns whether a submission happened.
    fn submit_next(&mut self) -> bool {
        if self.source_drained || self.cancel.is_cancelled() {
            return false;
        }
        match self.source.next() {
            Some(task) => {
                let handle = self.pool.submit(&task);
                debug!(position = self.submitted, "submitted task");
                self.submitted += 1;
                self.queue.push_back(Slot {
                    task,
                    handle,
                    retries_left: self.config.num_retries,
                });
                true
            }
            None => {
                self.source_drained = true;
                false
            }
        }
    }

    /// Waits for the head slot, resubmitting it under the slow-head
    /// heuristic when retries are enabled.
    async fn wait_for_head(&mut self, mut slot: Slot<T>) -> TaskResult<T> {
        if self.config.num_retries == 0 {
            return slot.handle.wait().await;
        }
        let retry_after = self.config.retry_after();
        loop {
            match timeout(retry_after, slot.handle.wait()).await {
                Ok(result) => return result,
                Err(_elapsed) => {
                    if slot.retries_left > 0
                        && self.queue.len() >= MIN_TRAILING_SLOTS_FOR_RETRY
                        && self.queue.iter().all(|s| s.handle.is_finished())
                    {
                        warn!(
                            retries_left = slot.retries_left,
                            "head task timed out behind finished slots; resubmitting"
                        );
                        // The stale attempt cannot be interrupted; it keeps
                        // its worker until it finishes and its result is
                        // dropped, shrinking the effective pool by one.
                        let Slot {
                            task,
                            handle: stale,
                            retries_left,
                        } = slot;
                        drop(stale);
                        let handle = self.pool.submit(&task);
                        slot = Slot {
                            task,
                            handle,
                            retries_left: retries_left - 1,
                        };
                    }
                }
            }
        }
    }

    /// Awaits and discards every remaining slot, then reports cancellation.
    async fn surface_cancellation(&mut self) -> TaskResult<T> {
        self.finished = true;
        self.drain().await;
        let reason = self
            .cancel
            .reason()
            .unwrap_or_else(|| "cancelled".to_string());
        Err(TaskError::Cancelled(reason))
    }

    /// Await-and-discard: submitted slots run to completion but their
    /// results are dropped.
    async fn drain(&mut self) {
        if !self.queue.is_empty() {
            debug!(slots = self.queue.len(), "draining in-flight slots");
        }
        while let Some(mut slot) = self.queue.pop_front() {
            let _ = slot.handle.wait().await;
        }
    }
}

impl<T, S, P> std::fmt::Debug for OrderedResults<T, S, P>
where
    S: Iterator<Item = Task<T>>,
    P: WorkerPool<T>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderedResults")
            .field("occupied_slots", &self.queue.len())
            .field("submitted", &self.submitted)
            .field("source_drained", &self.source_drained)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}
