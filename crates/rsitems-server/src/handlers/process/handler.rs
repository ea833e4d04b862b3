//! Batch processing handler.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use rsitems_domain::PROCESSED_STATUS;
use rsitems_storage::{ItemId, ItemStore, StoredItem};

use super::aggregator::ProcessedItems;
use super::pool::{PoolClosed, WorkerPool};
use super::types::{ProcessError, ProcessResult};

/// Runs batch processing over every stored item.
pub struct ProcessHandler<S: ItemStore> {
    store: Arc<S>,
    pool: Arc<WorkerPool>,
}

impl<S: ItemStore> ProcessHandler<S> {
    /// Creates a handler that runs batches on the given pool.
    pub fn new(store: Arc<S>, pool: Arc<WorkerPool>) -> Self {
        Self { store, pool }
    }

    /// Processes every item currently in the store.
    ///
    /// Takes a snapshot of the stored ids, submits one task per id to the
    /// pool, and waits for all of them. Each task marks its item
    /// `PROCESSED`, saves it, and records the saved form. Ids whose item
    /// has vanished by the time the task runs are skipped.
    ///
    /// The run resolves after every task has settled. If any task failed,
    /// the whole run fails with the first failure; items already saved by
    /// sibling tasks stay saved.
    #[instrument(skip(self))]
    pub async fn process_items(&self) -> ProcessResult<Vec<StoredItem>> {
        let ids = self.store.list_all_ids().await?;
        info!(count = ids.len(), "starting batch processing run");

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let collected = Arc::new(ProcessedItems::new());

        let handles: Vec<_> = ids
            .into_iter()
            .map(|id| {
                let store = Arc::clone(&self.store);
                let sink = Arc::clone(&collected);
                self.pool
                    .submit(async move { process_one(store, sink, id).await })
            })
            .collect();

        // Completion barrier: every task settles before the run resolves,
        // and a failing task never cancels its siblings.
        let mut first_error: Option<ProcessError> = None;
        for joined in futures::future::join_all(handles).await {
            let outcome = match joined {
                Ok(Ok(outcome)) => outcome,
                Ok(Err(PoolClosed)) => Err(ProcessError::PoolClosed),
                Err(join_err) => Err(ProcessError::TaskPanicked {
                    message: join_err.to_string(),
                }),
            };
            if let Err(error) = outcome {
                warn!(%error, "batch task failed");
                first_error.get_or_insert(error);
            }
        }

        if let Some(error) = first_error {
            return Err(error);
        }

        let items = match Arc::try_unwrap(collected) {
            Ok(collected) => collected.into_items(),
            Err(shared) => shared.snapshot(),
        };
        info!(processed = items.len(), "batch processing run complete");
        Ok(items)
    }
}

/// Processes a single item: look it up, mark it processed, persist it, and
/// record the saved form. An absent item is a silent skip.
async fn process_one<S: ItemStore>(
    store: Arc<S>,
    sink: Arc<ProcessedItems>,
    id: ItemId,
) -> Result<(), ProcessError> {
    let fetched = store
        .get_item(id)
        .await
        .map_err(|source| ProcessError::ItemFailed { id, source })?;

    let Some(mut item) = fetched else {
        // Deleted between the id snapshot and this task running.
        return Ok(());
    };

    item.status = PROCESSED_STATUS.to_string();
    let saved = store
        .save_item(item)
        .await
        .map_err(|source| ProcessError::ItemFailed { id, source })?;

    sink.push(saved);
    Ok(())
}
