//! In-memory storage implementation.
//!
//! Default backend and the one used by the test suite. Uses DashMap for
//! thread-safe concurrent access without a global lock, and an atomic
//! counter for identifier assignment.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use tracing::instrument;

use crate::error::{StorageError, StorageResult};
use crate::traits::{HealthStatus, ItemId, ItemStore, StoredItem};

/// In-memory implementation of ItemStore.
///
/// # Performance Characteristics
///
/// - **Get/save/delete**: O(1) average (DashMap shard lookup)
/// - **List operations**: O(N) over stored items
///
/// Identifier assignment is a single atomic increment, so concurrent first
/// saves never collide.
#[derive(Debug, Default)]
pub struct MemoryItemStore {
    items: DashMap<ItemId, StoredItem>,
    id_seq: AtomicU64,
}

impl MemoryItemStore {
    /// Creates a new in-memory item store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new in-memory item store wrapped in Arc.
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    fn next_id(&self) -> ItemId {
        self.id_seq.fetch_add(1, Ordering::Relaxed) + 1
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn list_all_ids(&self) -> StorageResult<Vec<ItemId>> {
        Ok(self.items.iter().map(|entry| *entry.key()).collect())
    }

    async fn get_item(&self, id: ItemId) -> StorageResult<Option<StoredItem>> {
        Ok(self.items.get(&id).map(|entry| entry.value().clone()))
    }

    #[instrument(skip(self, item), fields(item_id = ?item.id))]
    async fn save_item(&self, mut item: StoredItem) -> StorageResult<StoredItem> {
        let now = Utc::now();
        let id = match item.id {
            Some(id) => {
                // Keep the sequence ahead of caller-supplied ids so a later
                // assigned id can never collide with this record.
                self.id_seq.fetch_max(id, Ordering::Relaxed);
                id
            }
            None => self.next_id(),
        };
        item.id = Some(id);
        item.updated_at = now;

        // Use the entry API so created_at survives concurrent overwrites.
        use dashmap::mapref::entry::Entry;
        match self.items.entry(id) {
            Entry::Occupied(mut entry) => {
                item.created_at = entry.get().created_at;
                entry.insert(item.clone());
            }
            Entry::Vacant(entry) => {
                item.created_at = now;
                entry.insert(item.clone());
            }
        }

        Ok(item)
    }

    #[instrument(skip(self))]
    async fn delete_item(&self, id: ItemId) -> StorageResult<()> {
        if self.items.remove(&id).is_none() {
            return Err(StorageError::ItemNotFound { id });
        }
        Ok(())
    }

    async fn list_items(&self) -> StorageResult<Vec<StoredItem>> {
        Ok(self.items.iter().map(|entry| entry.value().clone()).collect())
    }

    async fn health_check(&self) -> StorageResult<HealthStatus> {
        // In-memory storage is always healthy - no external dependencies
        Ok(HealthStatus {
            healthy: true,
            latency: std::time::Duration::ZERO,
            message: Some("in-memory storage".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item(name: &str) -> StoredItem {
        StoredItem::new(name, "a test item", "NEW", "test@mail.com")
    }

    #[tokio::test]
    async fn test_store_starts_empty() {
        let store = MemoryItemStore::new();
        assert!(store.list_all_ids().await.unwrap().is_empty());
        assert!(store.list_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_assigns_identifier() {
        let store = MemoryItemStore::new();
        let saved = store.save_item(sample_item("first")).await.unwrap();

        assert_eq!(saved.id, Some(1));
        assert_eq!(saved.name, "first");

        let fetched = store.get_item(1).await.unwrap().unwrap();
        assert_eq!(fetched, saved);
    }

    #[tokio::test]
    async fn test_save_with_id_overwrites_in_place() {
        let store = MemoryItemStore::new();
        let saved = store.save_item(sample_item("original")).await.unwrap();
        let id = saved.id.unwrap();

        let mut updated = saved.clone();
        updated.name = "renamed".to_string();
        let saved_again = store.save_item(updated).await.unwrap();

        assert_eq!(saved_again.id, Some(id));
        assert_eq!(saved_again.name, "renamed");
        // created_at survives the overwrite; updated_at moves forward
        assert_eq!(saved_again.created_at, saved.created_at);
        assert!(saved_again.updated_at >= saved.updated_at);

        let fetched = store.get_item(id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "renamed");
        assert_eq!(store.list_all_ids().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_assigned_ids_skip_caller_supplied_ones() {
        let store = MemoryItemStore::new();

        let mut explicit = sample_item("precious");
        explicit.id = Some(2);
        store.save_item(explicit).await.unwrap();

        // Store-assigned saves must not reuse id 2.
        let first = store.save_item(sample_item("one")).await.unwrap();
        let second = store.save_item(sample_item("two")).await.unwrap();

        assert_ne!(first.id, Some(2));
        assert_ne!(second.id, Some(2));
        assert_eq!(
            store.get_item(2).await.unwrap().unwrap().name,
            "precious",
            "caller-supplied record must survive later assigned saves"
        );
        assert_eq!(store.list_items().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_get_nonexistent_item_is_none() {
        let store = MemoryItemStore::new();
        assert!(store.get_item(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_item() {
        let store = MemoryItemStore::new();
        let saved = store.save_item(sample_item("doomed")).await.unwrap();
        let id = saved.id.unwrap();

        store.delete_item(id).await.unwrap();
        assert!(store.get_item(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_nonexistent_item_fails() {
        let store = MemoryItemStore::new();
        let result = store.delete_item(999).await;
        assert!(matches!(
            result,
            Err(StorageError::ItemNotFound { id: 999 })
        ));
    }

    #[tokio::test]
    async fn test_list_all_ids_matches_saved_items() {
        let store = MemoryItemStore::new();
        for i in 0..5 {
            store.save_item(sample_item(&format!("item{i}"))).await.unwrap();
        }

        let mut ids = store.list_all_ids().await.unwrap();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    // Test: Concurrent first saves get unique identifiers and lose nothing
    #[tokio::test]
    async fn test_concurrent_saves_dont_lose_data() {
        let store = MemoryItemStore::new_shared();

        let num_tasks = 100;
        let mut handles = Vec::with_capacity(num_tasks);

        for i in 0..num_tasks {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .save_item(sample_item(&format!("item{i}")))
                    .await
                    .unwrap()
            }));
        }

        let mut ids = Vec::with_capacity(num_tasks);
        for handle in handles {
            ids.push(handle.await.unwrap().id.unwrap());
        }

        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), num_tasks, "identifiers must be unique");

        let stored = store.list_items().await.unwrap();
        assert_eq!(
            stored.len(),
            num_tasks,
            "all concurrent saves should be preserved"
        );
    }

    // Test: Concurrent reads while writing return consistent records
    #[tokio::test]
    async fn test_concurrent_reads_while_writing() {
        let store = MemoryItemStore::new_shared();

        for i in 0..50 {
            store.save_item(sample_item(&format!("seed{i}"))).await.unwrap();
        }

        let mut handles = Vec::new();

        for i in 0..50 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .save_item(sample_item(&format!("new{i}")))
                    .await
                    .unwrap();
            }));
        }

        for _ in 0..50 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                let items = store.list_items().await.unwrap();
                assert!(
                    items.len() >= 50,
                    "readers should always see the seeded items, got {}",
                    items.len()
                );
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.list_items().await.unwrap().len(), 100);
    }

    #[tokio::test]
    async fn test_health_check_reports_healthy() {
        let store = MemoryItemStore::new();
        let status = store.health_check().await.unwrap();

        assert!(status.healthy);
        assert_eq!(status.latency, std::time::Duration::ZERO);
        assert_eq!(status.message, Some("in-memory storage".to_string()));
    }
}
