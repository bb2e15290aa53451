//! Task descriptors consumed by the runner.

use crate::errors::TaskError;
use futures::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;

/// The outcome of executing one task.
pub type TaskResult<T> = Result<T, TaskError>;

/// A deferred unit of work.
///
/// A task wraps a factory that produces the future to run. The factory is
/// invoked once per submission; it is only invoked again when the runner
/// resubmits a slow head task, so tasks used with retries enabled must be
/// idempotent.
pub struct Task<T> {
    factory: Arc<dyn Fn() -> BoxFuture<'static, TaskResult<T>> + Send + Sync>,
}

impl<T> Task<T> {
    /// Creates a task from a future factory.
    pub fn new<F, Fut>(factory: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = TaskResult<T>> + Send + 'static,
    {
        Self {
            factory: Arc::new(move || Box::pin(factory())),
        }
    }

    /// Produces the future for one execution attempt.
    pub(crate) fn invoke(&self) -> BoxFuture<'static, TaskResult<T>> {
        (self.factory)()
    }
}

impl<T> Clone for Task<T> {
    fn clone(&self) -> Self {
        Self {
            factory: Arc::clone(&self.factory),
        }
    }
}

impl<T> std::fmt::Debug for Task<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task").finish_non_exhaustive()
    }
}
