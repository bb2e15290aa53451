//! Error types for the orderflow crate.
//!
//! Task failures are surfaced to the consumer at the output position
//! matching the task's submission order, never at completion order.

use thiserror::Error;

/// The umbrella error type for orderflow operations.
#[derive(Debug, Error)]
pub enum OrderflowError {
    /// A task execution failure.
    #[error("{0}")]
    Task(#[from] TaskError),

    /// A runner configuration error.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// A version string could not be parsed.
    #[error("{0}")]
    Version(#[from] VersionError),

    /// A chunking request was malformed.
    #[error("{0}")]
    Chunk(#[from] ChunkError),
}

/// Failure produced while executing or scheduling a single task.
///
/// Cloneable so that an instrumented pool or a drained slot can keep a
/// copy without taking the consumer's error away from it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskError {
    /// The task itself returned an error.
    #[error("task failed: {0}")]
    Failed(String),

    /// The worker pool dropped or refused the task before it produced a
    /// result. Treated exactly like an execution failure of that task.
    #[error("worker pool rejected task: {0}")]
    Rejected(String),

    /// The run was cancelled before this task's result was produced.
    #[error("run cancelled: {0}")]
    Cancelled(String),
}

impl TaskError {
    /// Shorthand for a plain execution failure.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// Error raised when a runner configuration is invalid.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// `max_active_tasks` must be at least 1.
    #[error("max_active_tasks must be >= 1, got {given}")]
    ZeroMaxActiveTasks {
        /// The rejected value.
        given: usize,
    },
}

/// Error raised when a version string cannot be parsed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VersionError {
    /// More than three dot-separated components were supplied.
    #[error("expected at most 3 version components, got {found} in {input:?}")]
    TooManyComponents {
        /// Number of components found.
        found: usize,
        /// The offending input.
        input: String,
    },

    /// A component was empty or not a base-10 integer.
    #[error("invalid version component {component:?} in {input:?}")]
    InvalidComponent {
        /// The offending component.
        component: String,
        /// The offending input.
        input: String,
    },
}

/// Error raised when a chunking request is malformed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChunkError {
    /// The target aggregate size must be positive.
    #[error("target chunk size must be > 0")]
    ZeroTargetSize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_error_display() {
        let err = TaskError::failed("connection reset");
        assert_eq!(err.to_string(), "task failed: connection reset");
    }

    #[test]
    fn test_umbrella_conversion() {
        let err: OrderflowError = TaskError::Cancelled("shutdown".into()).into();
        assert_eq!(err.to_string(), "run cancelled: shutdown");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::ZeroMaxActiveTasks { given: 0 };
        assert!(err.to_string().contains("got 0"));
    }
}
