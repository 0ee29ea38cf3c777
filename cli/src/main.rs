//! # faves CLI
//!
//! Bookmark files per workspace or globally and jump back to them.
//!
//! ## Usage
//!
//! - `faves add [FILE]` - Favorite a file in the current workspace
//! - `faves add --global [FILE]` - Favorite a file for every workspace
//! - `faves search` - Pick a favorite and open it
//! - `faves search NAME` - Open the favorite with alias NAME
//! - `faves exec favorites.toggle FILE` - Run a command by identifier
//!
//! When FILE is omitted, `$FAVES_ACTIVE_FILE` stands in for the editor's
//! active file.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod host;
mod output;

use commands::edit::EditAction;
use commands::{edit_command, exec_command, list_commands, reset_command, search_command};
use config::CliConfigLoader;

/// faves - favorite files and jump back to them
#[derive(Parser)]
#[command(name = "faves")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Favorite files per workspace or globally and jump back to them")]
#[command(long_about = None)]
struct Cli {
    /// Workspace folder (repeatable; defaults to the git root or working directory)
    #[arg(short, long = "workspace", global = true)]
    workspaces: Vec<PathBuf>,

    /// Directory holding the global settings file
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Editor command used to open files
    #[arg(long, global = true)]
    editor: Option<String>,

    /// Print the path of opened favorites instead of launching a program
    #[arg(long, global = true)]
    print: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a file to favorites
    Add {
        /// Use the global favorites list
        #[arg(short, long)]
        global: bool,
        /// File path or URI (defaults to the active file)
        file: Option<String>,
    },

    /// Remove a file from favorites
    Remove {
        #[arg(short, long)]
        global: bool,
        file: Option<String>,
    },

    /// Add the file if missing, remove it otherwise
    Toggle {
        #[arg(short, long)]
        global: bool,
        file: Option<String>,
    },

    /// Pick a favorite and open it
    Search {
        /// Label favorites by alias
        #[arg(short, long)]
        alias: bool,
        /// Open the favorite with this alias directly
        name: Option<String>,
    },

    /// Run a command by identifier
    Exec {
        /// Command identifier, e.g. favorites.globalToggle
        id: String,
        /// File path or URI the command applies to
        file: Option<String>,
        /// JSON arguments, e.g. '{"alias": "notes"}'
        #[arg(long)]
        args: Option<String>,
    },

    /// List command identifiers
    Commands,

    /// Reload favorites from settings (requires FAVES_TEST_MODE)
    Reset,
}

/// Build a configuration loader from CLI arguments
fn build_config_loader(cli: &Cli) -> CliConfigLoader {
    let mut loader = CliConfigLoader::new().with_print_only(cli.print);

    for workspace in &cli.workspaces {
        loader = loader.with_workspace(workspace.clone());
    }

    if let Some(config_dir) = &cli.config_dir {
        loader = loader.with_config_dir_override(config_dir.clone());
    }

    if let Some(editor) = &cli.editor {
        loader = loader.with_editor_override(editor.clone());
    }

    loader
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    faves_core::init_tracing(cli.verbose);
    tracing::debug!("faves-core {}", faves_core::VERSION);

    let loader = build_config_loader(&cli);

    match cli.command {
        Commands::Add { global, file } => edit_command(loader, EditAction::Add, global, file).await,
        Commands::Remove { global, file } => {
            edit_command(loader, EditAction::Remove, global, file).await
        }
        Commands::Toggle { global, file } => {
            edit_command(loader, EditAction::Toggle, global, file).await
        }
        Commands::Search { alias, name } => search_command(loader, alias, name).await,
        Commands::Exec { id, file, args } => exec_command(loader, id, file, args).await,
        Commands::Commands => {
            list_commands();
            Ok(())
        }
        Commands::Reset => reset_command(loader).await,
    }
}
