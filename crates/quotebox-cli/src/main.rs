//! Quotebox CLI
//!
//! Command-line interface for Quotebox - a local quote collection.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use quotebox_core::{Config, RecordingSurface, Widget};

mod commands;
mod output;
mod tui;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "quotebox")]
#[command(about = "Quotebox - random quotes from your own collection")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use a different config file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI interface
    Tui,
    /// Show a random quote
    Show,
    /// Show the quote last viewed in this session
    Last,
    /// Add a quote
    Add {
        /// The quote itself
        text: String,
        /// Category label
        category: String,
    },
    /// List all quotes
    #[command(alias = "ls")]
    List,
    /// Export all quotes to quotes.json
    Export {
        /// Directory to write to (defaults to export_dir)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
    /// Import quotes from a JSON file
    Import {
        /// JSON file holding an array of {text, category} objects
        file: Option<PathBuf>,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, session_dir, export_dir, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));
    let config_path = cli.config.as_ref();

    // Commands that don't need the widget
    if let Some(Commands::Config { command }) = &cli.command {
        return handle_config_command(command.clone(), config_path, &output);
    }

    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    // Handle TUI (default when no command given)
    let Some(command) = cli.command else {
        return tui::run(config).await;
    };
    if matches!(command, Commands::Tui) {
        return tui::run(config).await;
    }

    init_cli_logging();

    let mut widget = Widget::open_with_config(&config, RecordingSurface::new());

    match command {
        Commands::Tui | Commands::Config { .. } => unreachable!(), // Handled above
        Commands::Show => commands::quote::show(&mut widget, &output),
        Commands::Last => commands::quote::last(&widget, &output),
        Commands::Add { text, category } => {
            commands::quote::add(&mut widget, text, category, &output)
        }
        Commands::List => commands::quote::list(&widget, &output),
        Commands::Export { dir } => commands::transfer::export(&widget, &config, dir, &output),
        Commands::Import { file } => commands::transfer::import(&mut widget, file, &output).await,
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

/// Log to stderr for one-shot commands, filtered by QUOTEBOX_LOG (default: warn)
fn init_cli_logging() {
    let level = std::env::var("QUOTEBOX_LOG").unwrap_or_else(|_| "warn".to_string());
    let env_filter = EnvFilter::new(format!("quotebox_core={},quotebox={}", level, level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_to_tui() {
        let cli = Cli::try_parse_from(["quotebox"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from(["quotebox", "add", "Stay hungry.", "Wisdom"]).unwrap();
        match cli.command {
            Some(Commands::Add { text, category }) => {
                assert_eq!(text, "Stay hungry.");
                assert_eq!(category, "Wisdom");
            }
            _ => panic!("expected add command"),
        }
    }

    #[test]
    fn test_parse_import_without_file() {
        let cli = Cli::try_parse_from(["quotebox", "import"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Import { file: None })));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["quotebox", "list", "--json"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Some(Commands::List)));
    }
}
