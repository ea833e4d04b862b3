//! Batch item-processing pipeline.
//!
//! One batch run fetches the full id snapshot from the store, submits one
//! task per id to the shared [`WorkerPool`], and joins every task before
//! resolving:
//!
//! 1. **Per-item task**: look the item up, mark it processed, persist it,
//!    and append the saved record to the run's aggregator. An absent item
//!    is a silent skip.
//! 2. **Completion barrier**: the run resolves only once every task has
//!    settled; a failing task never cancels its siblings.
//! 3. **Resolution**: all tasks ok yields the aggregated snapshot; any
//!    failure collapses the run to a single error carrying the first cause.
//!    Mutations persisted by successful siblings are not rolled back.
//!
//! The pool is an owned resource handed to the handler at construction and
//! shared across runs; it is created at service init and drained at
//! teardown.

mod aggregator;
mod handler;
mod pool;
mod types;

pub use aggregator::ProcessedItems;
pub use handler::ProcessHandler;
pub use pool::{PoolClosed, WorkerPool};
pub use types::{ProcessError, ProcessResult, DEFAULT_WORKERS};
