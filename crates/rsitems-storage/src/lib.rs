//! rsitems-storage: Storage abstraction layer
//!
//! This crate provides the storage abstraction for rsitems, including:
//! - ItemStore trait for item persistence
//! - In-memory implementation used for tests and as the default backend
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              rsitems-storage                 │
//! ├─────────────────────────────────────────────┤
//! │  traits.rs   - ItemStore trait definition   │
//! │  memory.rs   - In-memory implementation     │
//! └─────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod memory;
pub mod traits;

// Re-export commonly used types
pub use error::{StorageError, StorageResult};
pub use memory::MemoryItemStore;
pub use traits::{HealthStatus, ItemId, ItemStore, StoredItem};
