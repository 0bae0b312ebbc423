//! CLI command handlers for Pagewright.
//!
//! This module provides headless, scriptable access to the editing engine:
//! every command loads the stored workspace, applies at most one edit and
//! writes it back.

pub mod assistant;
pub mod common;
pub mod config;
pub mod element;
pub mod history;
pub mod render;
pub mod section;
pub mod show;
pub mod site;
pub mod sync;

// Re-export types used by main.rs and tests
pub use assistant::AssistantContextArgs;
pub use common::{CliError, CliResult, DataArgs, ExitCode};
pub use config::ConfigArgs;
pub use element::ElementArgs;
pub use history::{HistoryArgs, UndoArgs};
pub use render::RenderArgs;
pub use section::SectionArgs;
pub use show::{NavArgs, ShowArgs};
pub use site::SiteArgs;
pub use sync::{ExportArgs, ImportArgs};
