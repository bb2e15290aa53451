//! Worker pool capability and the stock tokio-backed pool.

use super::task::{Task, TaskResult};
use crate::errors::TaskError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{oneshot, Semaphore};

/// Capability for executing tasks decoupled from the caller.
///
/// The runner drives the pool through exactly four operations: submission
/// (this trait), and completion-check, blocking-wait, and result retrieval
/// (all on the returned [`TaskHandle`]). Any thread pool or task executor
/// that can deliver a result through a [`TaskCompletion`] satisfies it.
pub trait WorkerPool<T>: Send + Sync {
    /// Submits a task for execution and returns a handle to its result.
    ///
    /// Submission must not block on the task itself; the handle reports a
    /// [`TaskError::Rejected`] if the pool drops the task before running it.
    fn submit(&self, task: &Task<T>) -> TaskHandle<T>;
}

impl<T, P: WorkerPool<T> + ?Sized> WorkerPool<T> for Arc<P> {
    fn submit(&self, task: &Task<T>) -> TaskHandle<T> {
        (**self).submit(task)
    }
}

/// Handle to one submitted task.
///
/// Owns the task's result until the runner consumes it. The runner drops
/// the handle the moment its slot is consumed or discarded, so a drop
/// hook observes exactly when a submission stops occupying a slot.
pub struct TaskHandle<T> {
    done: Arc<AtomicBool>,
    rx: oneshot::Receiver<TaskResult<T>>,
    on_drop: Option<Box<dyn FnOnce() + Send>>,
}

/// Pool-side completion for a [`TaskHandle`].
///
/// Dropping a completion without calling [`TaskCompletion::complete`]
/// surfaces as [`TaskError::Rejected`] on the handle.
pub struct TaskCompletion<T> {
    done: Arc<AtomicBool>,
    tx: oneshot::Sender<TaskResult<T>>,
}

impl<T> TaskHandle<T> {
    /// Creates a linked completion/handle pair.
    #[must_use]
    pub fn channel() -> (TaskCompletion<T>, TaskHandle<T>) {
        let done = Arc::new(AtomicBool::new(false));
        let (tx, rx) = oneshot::channel();
        (
            TaskCompletion {
                done: Arc::clone(&done),
                tx,
            },
            TaskHandle {
                done,
                rx,
                on_drop: None,
            },
        )
    }

    /// Attaches a hook invoked when the handle is dropped.
    ///
    /// Used by instrumented pools to observe slot occupancy.
    #[must_use]
    pub fn with_drop_hook(mut self, hook: impl FnOnce() + Send + 'static) -> Self {
        self.on_drop = Some(Box::new(hook));
        self
    }

    /// Returns whether the task has produced a result.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.done.load(Ordering::SeqCst)
    }

    /// Waits for the task to finish and returns its result.
    ///
    /// Takes `&mut self` so the caller can race it against a timeout and
    /// wait again on the same handle afterwards.
    pub async fn wait(&mut self) -> TaskResult<T> {
        match (&mut self.rx).await {
            Ok(result) => result,
            Err(_) => Err(TaskError::Rejected(
                "worker dropped the task without reporting a result".to_string(),
            )),
        }
    }
}

impl<T> Drop for TaskHandle<T> {
    fn drop(&mut self) {
        if let Some(hook) = self.on_drop.take() {
            hook();
        }
    }
}

impl<T> std::fmt::Debug for TaskHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskHandle")
            .field("finished", &self.is_finished())
            .finish_non_exhaustive()
    }
}

impl<T> std::fmt::Debug for TaskCompletion<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskCompletion").finish_non_exhaustive()
    }
}

impl<T> TaskCompletion<T> {
    /// Delivers the task's result to the handle.
    pub fn complete(self, result: TaskResult<T>) {
        // Order matters: the done flag must be visible before the result
        // is delivered, so is_finished() never claims an undelivered slot.
        self.done.store(true, Ordering::SeqCst);
        let _ = self.tx.send(result);
    }
}

/// A fixed-size worker pool backed by the tokio runtime.
///
/// Each submission spawns onto the runtime, but a semaphore caps the
/// number of task bodies polled concurrently at `max_workers`.
#[derive(Debug, Clone)]
pub struct TokioWorkerPool {
    workers: Arc<Semaphore>,
}

impl TokioWorkerPool {
    /// Creates a pool with a fixed number of workers.
    #[must_use]
    pub fn new(max_workers: usize) -> Self {
        Self {
            workers: Arc::new(Semaphore::new(max_workers)),
        }
    }

    /// Returns the number of idle workers.
    #[must_use]
    pub fn idle_workers(&self) -> usize {
        self.workers.available_permits()
    }
}

impl<T: Send + 'static> WorkerPool<T> for TokioWorkerPool {
    fn submit(&self, task: &Task<T>) -> TaskHandle<T> {
        let fut = task.invoke();
        let (completion, handle) = TaskHandle::channel();
        let workers = Arc::clone(&self.workers);
        tokio::spawn(async move {
            match workers.acquire_owned().await {
                Ok(_permit) => completion.complete(fut.await),
                Err(_) => completion.complete(Err(TaskError::Rejected(
                    "worker pool is closed".to_string(),
                ))),
            }
        });
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_submit_and_wait() {
        let pool = TokioWorkerPool::new(2);
        let task = Task::new(|| async { Ok(7) });
        let mut handle = pool.submit(&task);
        assert_eq!(handle.wait().await, Ok(7));
    }

    #[tokio::test]
    async fn test_is_finished_after_completion() {
        let pool = TokioWorkerPool::new(1);
        let task = Task::new(|| async { Ok(()) });
        let mut handle = pool.submit(&task);
        let _ = handle.wait().await;
        assert!(handle.is_finished());
    }

    #[tokio::test]
    async fn test_dropped_completion_is_rejection() {
        let (completion, mut handle) = TaskHandle::<u32>::channel();
        drop(completion);
        assert!(matches!(handle.wait().await, Err(TaskError::Rejected(_))));
    }

    #[tokio::test]
    async fn test_worker_cap_respected() {
        let pool = TokioWorkerPool::new(1);
        let slow = Task::new(|| async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(1)
        });
        let fast = Task::new(|| async { Ok(2) });

        let mut first = pool.submit(&slow);
        let mut second = pool.submit(&fast);

        // The single worker is busy with the slow task, so the fast one
        // cannot have finished yet.
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(!second.is_finished());

        assert_eq!(first.wait().await, Ok(1));
        assert_eq!(second.wait().await, Ok(2));
    }
}
