//! Test utilities: instrumented pools and task fixtures.
//!
//! Exposed as a regular module so downstream crates can exercise the
//! runner's ordering and bound guarantees in their own tests.

mod fixtures;
mod pools;

pub use fixtures::{failing_task, immediate_task, indexed_sleep_tasks, sleep_task};
pub use pools::RecordingPool;
