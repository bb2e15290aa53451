//! Configuration for the ordered task runner.

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for [`OrderedResults`](super::OrderedResults).
///
/// All state lives in this value; the runner holds no process-wide
/// configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Maximum number of tasks running or holding an unconsumed result.
    /// Must be at least 1; a value of 1 degenerates to sequential,
    /// in-order execution.
    pub max_active_tasks: usize,
    /// How many times a slow head task may be resubmitted. Zero disables
    /// the retry heuristic entirely.
    pub num_retries: u32,
    /// How long the head task may run before it becomes a retry candidate,
    /// in milliseconds.
    pub retry_after_ms: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            max_active_tasks: 4,
            num_retries: 0,
            retry_after_ms: 90_000,
        }
    }
}

impl RunnerConfig {
    /// Creates a config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the concurrency bound.
    #[must_use]
    pub fn with_max_active_tasks(mut self, max_active_tasks: usize) -> Self {
        self.max_active_tasks = max_active_tasks;
        self
    }

    /// Enables the slow-head retry heuristic.
    ///
    /// Tasks run under a retrying config must be idempotent: a resubmitted
    /// attempt runs alongside the stale one, which cannot be interrupted.
    #[must_use]
    pub fn with_retries(mut self, num_retries: u32, retry_after: Duration) -> Self {
        self.num_retries = num_retries;
        self.retry_after_ms = u64::try_from(retry_after.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Returns the retry window as a [`Duration`].
    #[must_use]
    pub fn retry_after(&self) -> Duration {
        Duration::from_millis(self.retry_after_ms)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_active_tasks == 0 {
            return Err(ConfigError::ZeroMaxActiveTasks { given: 0 });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(RunnerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_bound_rejected() {
        let config = RunnerConfig::default().with_max_active_tasks(0);
        assert_eq!(
            config.validate(),
            Err(crate::errors::ConfigError::ZeroMaxActiveTasks { given: 0 })
        );
    }

    #[test]
    fn test_with_retries() {
        let config = RunnerConfig::new().with_retries(2, Duration::from_millis(250));
        assert_eq!(config.num_retries, 2);
        assert_eq!(config.retry_after(), Duration::from_millis(250));
    }

    #[test]
    fn test_config_serde_round_trip() {
        let config = RunnerConfig::new().with_max_active_tasks(8);
        let json = serde_json::to_string(&config).expect("serialize");
        let back: RunnerConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.max_active_tasks, 8);
    }
}
