//! rsitems-server: Request handlers and business logic
//!
//! This crate contains the business logic layer including:
//! - Item handler for CRUD operations with field validation
//! - Process handler for the concurrent batch pipeline
//! - Worker pool shared across batch runs
//! - Configuration management
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              rsitems-server                  │
//! ├─────────────────────────────────────────────┤
//! │  config.rs   - Configuration management     │
//! │  logging.rs  - Tracing subscriber setup     │
//! │  handlers/   - Request handlers             │
//! │    items.rs       - Item CRUD               │
//! │    process/       - Batch processing        │
//! └─────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod handlers;
pub mod logging;

// Re-exports for convenience
pub use config::{ConfigLoadError, ServerConfig};
pub use logging::init_logging;
pub use handlers::items::{ItemDraft, ItemError, ItemHandler};
pub use handlers::process::{ProcessError, ProcessHandler, WorkerPool};
