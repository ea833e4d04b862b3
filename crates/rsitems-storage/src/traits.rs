//! ItemStore trait definition.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::StorageResult;

/// Identifier assigned to a stored item.
pub type ItemId = u64;

/// A stored item record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredItem {
    /// `None` until the store assigns an identifier on first save.
    pub id: Option<ItemId>,
    pub name: String,
    pub description: String,
    pub status: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredItem {
    /// Creates an unsaved item with the given fields.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        status: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            status: status.into(),
            email: email.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Health status of a storage backend.
#[derive(Debug, Clone)]
pub struct HealthStatus {
    pub healthy: bool,
    pub latency: std::time::Duration,
    pub message: Option<String>,
}

/// Abstract storage interface for item records.
///
/// Implementations must be thread-safe (Send + Sync) and tolerate concurrent
/// reads and writes to different records without external synchronization.
#[async_trait]
pub trait ItemStore: Send + Sync + 'static {
    /// Returns the identifiers of all stored items.
    async fn list_all_ids(&self) -> StorageResult<Vec<ItemId>>;

    /// Gets an item by id. An absent item is a normal, non-error outcome.
    async fn get_item(&self, id: ItemId) -> StorageResult<Option<StoredItem>>;

    /// Persists an item and returns its canonical persisted form.
    ///
    /// Assigns an identifier when the item has none; an item carrying an
    /// existing identifier is overwritten in place.
    async fn save_item(&self, item: StoredItem) -> StorageResult<StoredItem>;

    /// Deletes an item by id.
    async fn delete_item(&self, id: ItemId) -> StorageResult<()>;

    /// Returns all stored items.
    async fn list_items(&self) -> StorageResult<Vec<StoredItem>>;

    /// Reports backend health.
    async fn health_check(&self) -> StorageResult<HealthStatus>;
}
