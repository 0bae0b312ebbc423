//! Pagewright - scriptable editor for a site's sections, elements and styles
//!
//! Each invocation loads the stored workspace, runs one command and writes
//! the result back.

use clap::{Parser, Subcommand};
use pagewright::cli::{
    AssistantContextArgs, CliResult, ConfigArgs, DataArgs, ElementArgs, ExportArgs, HistoryArgs,
    ImportArgs, NavArgs, RenderArgs, SectionArgs, ShowArgs, SiteArgs, UndoArgs,
};
use pagewright::config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Pagewright - visual site configuration editor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    data: DataArgs,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the current configuration
    Show(ShowArgs),
    /// Show the navigation menu
    Nav(NavArgs),
    /// Edit sections
    Section(SectionArgs),
    /// Edit elements inside sections
    Element(ElementArgs),
    /// Edit site-wide fields and logos
    Site(SiteArgs),
    /// Print the configuration as a sync code
    Export(ExportArgs),
    /// Replace the configuration with one from a sync code
    Import(ImportArgs),
    /// Restore the previous configuration
    Undo(UndoArgs),
    /// List stored undo snapshots
    History(HistoryArgs),
    /// Print the resolved presentation of a section or element
    Render(RenderArgs),
    /// Print the chat assistant's system context
    AssistantContext(AssistantContextArgs),
    /// Manage application configuration
    Config(ConfigArgs),
}

impl Command {
    fn execute(&self, data: &DataArgs) -> CliResult<()> {
        match self {
            Self::Show(args) => args.execute(data),
            Self::Nav(args) => args.execute(data),
            Self::Section(args) => args.execute(data),
            Self::Element(args) => args.execute(data),
            Self::Site(args) => args.execute(data),
            Self::Export(args) => args.execute(data),
            Self::Import(args) => args.execute(data),
            Self::Undo(args) => args.execute(data),
            Self::History(args) => args.execute(data),
            Self::Render(args) => args.execute(data),
            Self::AssistantContext(args) => args.execute(data),
            Self::Config(args) => args.execute(),
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        Config::load().map_or_else(|_| "warn".to_string(), |config| config.ui.log_level)
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = cli.command.execute(&cli.data) {
        eprintln!("Error: {e}");
        std::process::exit(e.kind.code());
    }
}
