//! Reusable task fixtures.

use crate::errors::TaskError;
use crate::runner::Task;
use rand::Rng;
use std::time::Duration;

/// A task that resolves to `value` without suspending.
pub fn immediate_task<T: Clone + Send + Sync + 'static>(value: T) -> Task<T> {
    Task::new(move || {
        let value = value.clone();
        async move { Ok(value) }
    })
}

/// A task that sleeps for `delay` and then resolves to `value`.
pub fn sleep_task<T: Clone + Send + Sync + 'static>(value: T, delay: Duration) -> Task<T> {
    Task::new(move || {
        let value = value.clone();
        async move {
            tokio::time::sleep(delay).await;
            Ok(value)
        }
    })
}

/// A task that fails with `message`.
pub fn failing_task<T: Send + 'static>(message: &str) -> Task<T> {
    let message = message.to_string();
    Task::new(move || {
        let message = message.clone();
        async move { Err(TaskError::Failed(message)) }
    })
}

/// `count` tasks that each sleep a random duration up to `max_delay` and
/// resolve to their own index.
///
/// Delays are drawn once, at construction, so a resubmitted task sleeps
/// the same amount again.
pub fn indexed_sleep_tasks(count: usize, max_delay: Duration) -> Vec<Task<usize>> {
    let mut rng = rand::thread_rng();
    let max_millis = u64::try_from(max_delay.as_millis()).unwrap_or(u64::MAX);
    (0..count)
        .map(|index| {
            let delay = Duration::from_millis(rng.gen_range(0..=max_millis));
            sleep_task(index, delay)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_immediate_task() {
        let task = immediate_task("hello");
        assert_eq!(task.invoke().await, Ok("hello"));
    }

    #[tokio::test]
    async fn test_failing_task() {
        let task: Task<()> = failing_task("nope");
        assert_eq!(task.invoke().await, Err(TaskError::failed("nope")));
    }

    #[test]
    fn test_indexed_sleep_tasks_count() {
        let tasks = indexed_sleep_tasks(5, Duration::from_millis(10));
        assert_eq!(tasks.len(), 5);
    }
}
