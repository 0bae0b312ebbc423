//! Service layer for business logic.
//!
//! Pure operations over configuration snapshots (mutations, navigation,
//! style resolution, history, sync codes) plus the storage and image
//! ingestion seams used by the editor.

pub mod assistant;
pub mod history;
pub mod images;
pub mod mutations;
pub mod navigation;
pub mod storage;
pub mod style;
pub mod sync_codec;

// Re-export commonly used types and functions
pub use assistant::AssistantContext;
pub use history::History;
pub use images::{DataUriIngestor, ImageIngestor};
pub use mutations::Direction;
pub use navigation::{listed_sections, navigation, NavEntry, ViewMode};
pub use storage::{BlobStore, FileStore, MemoryStore, Workspace};
