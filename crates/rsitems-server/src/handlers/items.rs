//! Item CRUD handler.
//!
//! Validates caller-supplied fields against the domain rules, then delegates
//! persistence to the [`ItemStore`]. Status-code mapping belongs to the
//! transport layer; this handler only distinguishes outcomes through
//! [`ItemError`].

use std::sync::Arc;

use tracing::instrument;

use rsitems_domain::{validate_item_fields, DomainError};
use rsitems_storage::{ItemId, ItemStore, StorageError, StoredItem};

/// Caller-supplied fields for creating or updating an item.
#[derive(Debug, Clone)]
pub struct ItemDraft {
    pub name: String,
    pub description: String,
    pub status: String,
    pub email: String,
}

impl ItemDraft {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        status: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            status: status.into(),
            email: email.into(),
        }
    }

    fn validate(&self) -> Result<(), DomainError> {
        validate_item_fields(&self.name, &self.status, &self.email)
    }

    fn into_stored(self, id: Option<ItemId>) -> StoredItem {
        let mut item = StoredItem::new(self.name, self.description, self.status, self.email);
        item.id = id;
        item
    }
}

/// Errors surfaced by item CRUD operations.
#[derive(Debug, thiserror::Error)]
pub enum ItemError {
    /// A field failed domain validation.
    #[error(transparent)]
    Validation(#[from] DomainError),

    /// The addressed item does not exist.
    #[error("item not found: {id}")]
    NotFound { id: ItemId },

    /// Storage failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Handler for item CRUD operations.
pub struct ItemHandler<S: ItemStore> {
    store: Arc<S>,
}

impl<S: ItemStore> ItemHandler<S> {
    /// Creates a new item handler over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Returns all stored items.
    pub async fn list(&self) -> Result<Vec<StoredItem>, ItemError> {
        Ok(self.store.list_items().await?)
    }

    /// Gets an item by id. Absent is a normal outcome.
    pub async fn get(&self, id: ItemId) -> Result<Option<StoredItem>, ItemError> {
        Ok(self.store.get_item(id).await?)
    }

    /// Validates and persists a new item; the store assigns the identifier.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create(&self, draft: ItemDraft) -> Result<StoredItem, ItemError> {
        draft.validate()?;
        Ok(self.store.save_item(draft.into_stored(None)).await?)
    }

    /// Validates and persists new field values for an existing item.
    #[instrument(skip(self, draft))]
    pub async fn update(&self, id: ItemId, draft: ItemDraft) -> Result<StoredItem, ItemError> {
        draft.validate()?;
        if self.store.get_item(id).await?.is_none() {
            return Err(ItemError::NotFound { id });
        }
        Ok(self.store.save_item(draft.into_stored(Some(id))).await?)
    }

    /// Deletes an existing item.
    ///
    /// The store's own not-found is mapped here, so a concurrent delete of
    /// the same id still surfaces as [`ItemError::NotFound`].
    #[instrument(skip(self))]
    pub async fn delete(&self, id: ItemId) -> Result<(), ItemError> {
        match self.store.delete_item(id).await {
            Ok(()) => Ok(()),
            Err(StorageError::ItemNotFound { .. }) => Err(ItemError::NotFound { id }),
            Err(other) => Err(ItemError::Storage(other)),
        }
    }
}
