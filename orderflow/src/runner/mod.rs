//! The bounded, order-preserving concurrent task runner.
//!
//! This module provides:
//! - Task descriptors and task sources
//! - The worker pool capability and a stock tokio-backed pool
//! - The FIFO slot queue that yields results in submission order

mod config;
mod ordered;
mod pool;
mod task;


pub use config::RunnerConfig;
pub use ordered::OrderedResults;
pub use pool::{TaskCompletion, TaskHandle, TokioWorkerPool, WorkerPool};
pub use task::{Task, TaskResult};
