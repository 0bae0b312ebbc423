//! Shared plumbing for CLI commands: errors, exit codes, editor access and output.

use crate::config::Config;
use crate::editor::Editor;
use crate::error::{EditorError, IngestError};
use crate::services::storage::FileStore;
use clap::Args;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Invalid input, invalid sync code or nothing to undo
    ValidationError = 1,
    /// Reading or writing files failed
    IoError = 2,
    /// A named section or element does not exist
    NotFound = 3,
}

impl ExitCode {
    /// Numeric process exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// A failed CLI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code to report
    pub kind: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// Invalid input.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::ValidationError,
            message: message.into(),
        }
    }

    /// File system failure.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::IoError,
            message: message.into(),
        }
    }

    /// Missing section or element.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::NotFound,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<EditorError> for CliError {
    fn from(err: EditorError) -> Self {
        match err {
            EditorError::Storage(_) | EditorError::Encode(_) => Self::io(err.to_string()),
            EditorError::NothingToRestore
            | EditorError::NoActiveDrag
            | EditorError::NonFiniteOffset { .. }
            | EditorError::Decode(_) => Self::validation(err.to_string()),
        }
    }
}

impl From<IngestError> for CliError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::Read { .. } => Self::io(err.to_string()),
            IngestError::Empty { .. } | IngestError::NotAnImage { .. } => {
                Self::validation(err.to_string())
            }
        }
    }
}

/// Result type of every command.
pub type CliResult<T> = Result<T, CliError>;

/// Storage location options shared by every command that touches the workspace.
#[derive(Args, Debug, Clone, Default)]
pub struct DataArgs {
    /// Workspace directory (overrides `paths.data_dir` from config)
    #[arg(long, value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,
}

impl DataArgs {
    /// Opens an editor over the selected workspace directory.
    pub fn open_editor(&self) -> CliResult<Editor<FileStore>> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e}")))?;
        let dir = match &self.data_dir {
            Some(dir) => dir.clone(),
            None => config
                .data_dir()
                .map_err(|e| CliError::io(format!("Failed to resolve data directory: {e}")))?,
        };

        Ok(Editor::open(FileStore::new(dir))?
            .with_coalesced_adjustments(config.editor.coalesce_adjustments))
    }
}

/// Fails with [`ExitCode::NotFound`] unless the section exists.
pub fn require_section(editor: &Editor<FileStore>, section_id: &str) -> CliResult<()> {
    editor
        .config()
        .section(section_id)
        .map(|_| ())
        .ok_or_else(|| CliError::not_found(format!("Section '{section_id}' not found")))
}

/// Fails with [`ExitCode::NotFound`] unless the element exists in the section.
pub fn require_element(
    editor: &Editor<FileStore>,
    section_id: &str,
    element_id: &str,
) -> CliResult<()> {
    require_section(editor, section_id)?;
    editor
        .config()
        .section(section_id)
        .and_then(|s| s.element(element_id))
        .map(|_| ())
        .ok_or_else(|| {
            CliError::not_found(format!(
                "Element '{element_id}' not found in section '{section_id}'"
            ))
        })
}

/// Parses a JSON patch given on the command line.
pub fn parse_patch<T: DeserializeOwned>(json: &str) -> CliResult<T> {
    serde_json::from_str(json).map_err(|e| CliError::validation(format!("Invalid patch: {e}")))
}

/// Prints a value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}

/// Prints the outcome of an edit.
pub fn report_change(changed: bool, message: &str) {
    if changed {
        println!("{message}");
    } else {
        println!("No changes.");
    }
}
