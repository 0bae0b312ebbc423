//! Shared test fixtures for E2E CLI and editing tests.
#![allow(dead_code)] // Not every test file uses every fixture

use pagewright::models::{ElementKind, SiteConfiguration};
use pagewright::services::mutations;
use pagewright::services::storage::{FileStore, Workspace};
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Path to the pagewright binary
pub fn pagewright_bin() -> &'static str {
    env!("CARGO_BIN_EXE_pagewright")
}

/// Isolated config and data directories for one test.
pub struct TestEnv {
    /// Holds config.toml
    pub config_dir: TempDir,
    /// Holds the stored workspace
    pub data_dir: TempDir,
}

impl TestEnv {
    /// Creates fresh, empty directories.
    pub fn new() -> Self {
        Self {
            config_dir: TempDir::new().expect("Failed to create config dir"),
            data_dir: TempDir::new().expect("Failed to create data dir"),
        }
    }

    /// Builds a command bound to this environment.
    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(pagewright_bin());
        cmd.env("PAGEWRIGHT_CONFIG_DIR", self.config_dir.path());
        cmd.env_remove("RUST_LOG");
        cmd.arg("--data-dir").arg(self.data_dir.path());
        cmd.args(args);
        cmd
    }

    /// Runs a command and returns its raw output.
    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args)
            .output()
            .expect("Failed to execute command")
    }

    /// Runs a command, asserts it succeeded and returns stdout.
    pub fn run_ok(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert_eq!(
            output.status.code(),
            Some(0),
            "`{}` should succeed. stderr: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    /// Runs a command expecting JSON on stdout.
    pub fn run_json(&self, args: &[&str]) -> serde_json::Value {
        let stdout = self.run_ok(args);
        serde_json::from_str(&stdout).expect("Should parse JSON output")
    }

    /// Reads what the binary stored.
    pub fn workspace(&self) -> Workspace {
        load_workspace(self.data_dir.path())
    }

    /// Adds an element through the CLI and returns its id.
    pub fn add_element(&self, section: &str, kind: &str) -> String {
        self.run_ok(&["element", "add", section, kind]);
        let config = self.workspace().config;
        let count = config.section(section).expect("section exists").elements.len();
        element_id(&config, section, count - 1)
    }
}

/// Loads the workspace stored in `dir`.
pub fn load_workspace(dir: &Path) -> Workspace {
    Workspace::load(&FileStore::new(dir)).expect("Failed to load workspace")
}

/// Default configuration with a text, an image and a logo element in `space`.
pub fn config_with_elements() -> SiteConfiguration {
    let config = SiteConfiguration::default();
    let config = mutations::add_element(&config, "space", ElementKind::Text);
    let config = mutations::add_element(&config, "space", ElementKind::Image);
    mutations::add_element(&config, "space", ElementKind::Logo)
}

/// Id of the element at `index` in `section`.
pub fn element_id(config: &SiteConfiguration, section: &str, index: usize) -> String {
    config
        .section(section)
        .and_then(|s| s.elements.get(index))
        .map(|e| e.id.clone())
        .expect("element should exist")
}

/// Minimal PNG signature, enough for image ingestion.
pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
