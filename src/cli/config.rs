//! Configuration management CLI commands.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::Config;
use clap::{Args, Subcommand};
use serde::Serialize;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set a configuration value
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set a configuration value
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Dotted key: paths.data_dir, editor.coalesce_adjustments or ui.log_level
    key: String,

    /// New value (an empty string resets paths.data_dir)
    value: String,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput {
    config_file: String,
    paths: PathsOutput,
    editor: EditorOutput,
    ui: UiOutput,
}

#[derive(Serialize, Debug)]
struct PathsOutput {
    data_dir: String,
    data_dir_is_default: bool,
}

#[derive(Serialize, Debug)]
struct EditorOutput {
    coalesce_adjustments: bool,
}

#[derive(Serialize, Debug)]
struct UiOutput {
    log_level: String,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e}")))?;
        let output = ConfigOutput::from_config(&config)?;

        if self.json {
            print_json(&output)?;
        } else {
            output.print_human_readable();
        }

        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        let mut config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e}")))?;

        config
            .set(&self.key, &self.value)
            .map_err(|e| CliError::validation(e.to_string()))?;

        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e}")))?;

        println!("Configuration updated successfully.");
        Ok(())
    }
}

impl ConfigOutput {
    fn from_config(config: &Config) -> CliResult<Self> {
        let config_file = Config::config_file_path()
            .map_err(|e| CliError::io(format!("Failed to resolve config path: {e}")))?;
        let data_dir = config
            .data_dir()
            .map_err(|e| CliError::io(format!("Failed to resolve data directory: {e}")))?;

        Ok(Self {
            config_file: config_file.to_string_lossy().to_string(),
            paths: PathsOutput {
                data_dir: data_dir.to_string_lossy().to_string(),
                data_dir_is_default: config.paths.data_dir.is_none(),
            },
            editor: EditorOutput {
                coalesce_adjustments: config.editor.coalesce_adjustments,
            },
            ui: UiOutput {
                log_level: config.ui.log_level.clone(),
            },
        })
    }

    fn print_human_readable(&self) {
        println!("Pagewright Configuration");
        println!("========================");
        println!();
        println!("File: {}", self.config_file);
        println!();

        println!("Paths:");
        let default_marker = if self.paths.data_dir_is_default {
            " (default)"
        } else {
            ""
        };
        println!("  Data Directory: {}{default_marker}", self.paths.data_dir);
        println!();

        println!("Editor:");
        println!(
            "  Coalesce Adjustments: {}",
            self.editor.coalesce_adjustments
        );
        println!();

        println!("UI:");
        println!("  Log Level: {}", self.ui.log_level);
        println!();
    }
}
