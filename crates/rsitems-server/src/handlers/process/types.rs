//! Data types for batch processing.

use rsitems_storage::{ItemId, StorageError};

use super::pool::PoolClosed;

/// Default number of worker slots in the shared pool.
pub const DEFAULT_WORKERS: usize = 10;

/// Errors that can occur during a batch run.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    /// Fetching the id snapshot failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Lookup or save failed while processing a single item.
    #[error("failed to process item {id}")]
    ItemFailed {
        id: ItemId,
        #[source]
        source: StorageError,
    },

    /// A task was submitted after the pool shut down.
    #[error("worker pool is shut down")]
    PoolClosed,

    /// A task aborted without producing an outcome.
    #[error("processing task panicked: {message}")]
    TaskPanicked { message: String },
}

impl From<PoolClosed> for ProcessError {
    fn from(_: PoolClosed) -> Self {
        ProcessError::PoolClosed
    }
}

/// Result type for batch processing.
pub type ProcessResult<T> = Result<T, ProcessError>;
