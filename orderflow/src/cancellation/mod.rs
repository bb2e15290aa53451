//! Cooperative cancellation for in-flight runs.
//!
//! The runner checks the token before every submission; it never
//! interrupts a task that is already running on a worker.

mod token;

pub use token::CancellationToken;
