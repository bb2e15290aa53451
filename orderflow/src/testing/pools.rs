//! Instrumented worker pools.

use crate::runner::{Task, TaskHandle, WorkerPool};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A pool wrapper that records submission counts and the high-water mark
/// of simultaneously occupied slots.
///
/// A submission counts as occupying a slot until its handle is dropped,
/// which the runner does the moment the slot's result is consumed or
/// discarded. Clones share the same counters, so a test can keep one clone
/// while handing the other to the runner.
pub struct RecordingPool<P> {
    inner: P,
    submitted: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    high_water: Arc<AtomicUsize>,
}

impl<P> RecordingPool<P> {
    /// Wraps a pool with fresh counters.
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            submitted: Arc::new(AtomicUsize::new(0)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            high_water: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Total submissions, including resubmissions.
    pub fn submissions(&self) -> usize {
        self.submitted.load(Ordering::SeqCst)
    }

    /// Submissions whose handles are still live.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Highest number of simultaneously occupied slots observed.
    pub fn high_water_mark(&self) -> usize {
        self.high_water.load(Ordering::SeqCst)
    }
}

impl<P: Clone> Clone for RecordingPool<P> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            submitted: Arc::clone(&self.submitted),
            in_flight: Arc::clone(&self.in_flight),
            high_water: Arc::clone(&self.high_water),
        }
    }
}

impl<T, P: WorkerPool<T>> WorkerPool<T> for RecordingPool<P> {
    fn submit(&self, task: &Task<T>) -> TaskHandle<T> {
        let handle = self.inner.submit(task);
        self.submitted.fetch_add(1, Ordering::SeqCst);
        let occupied = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.high_water.fetch_max(occupied, Ordering::SeqCst);

        let in_flight = Arc::clone(&self.in_flight);
        handle.with_drop_hook(move || {
            in_flight.fetch_sub(1, Ordering::SeqCst);
        })
    }
}
