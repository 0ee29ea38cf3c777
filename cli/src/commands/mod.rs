//! CLI command implementations

pub mod edit;
pub mod exec;
pub mod search;

pub use edit::edit_command;
pub use exec::{exec_command, list_commands, reset_command};
pub use search::search_command;

use crate::config::loader::absolutize;
use crate::config::CliConfigLoader;
use crate::host::TerminalHost;
use anyhow::{Context, Result};
use faves_core::{Command, CommandOutcome, Faves, FavesConfig, FileHandle};
use std::path::Path;
use tracing::debug;

/// Load configuration, activate the extension and run one command
///
/// Returns an error when the command reported a failure to the user, so the
/// process exits non-zero.
pub(crate) async fn run_command(loader: &CliConfigLoader, command: Command) -> Result<()> {
    let config = loader.load()?;
    debug!("Workspace roots: {:?}", config.workspace_roots);

    let faves_config = FavesConfig {
        test_mode: config.test_mode,
    };
    let active_file = config.active_file.as_deref().map(parse_file_arg).transpose()?;
    let host = TerminalHost::new(config).with_active_file(active_file);
    let mut faves = Faves::activate(&host, faves_config).await;

    let id = command.id();
    finish(id, faves.execute(&host, command).await)
}

fn finish(id: &str, outcome: CommandOutcome) -> Result<()> {
    debug!("{} finished: {:?}", id, outcome);
    if outcome.is_failure() {
        anyhow::bail!("{} failed", id);
    }
    Ok(())
}

/// Turn a FILE argument into a handle
///
/// Relative paths resolve against the working directory, and paths of
/// existing files are canonicalized like the workspace roots.
pub(crate) fn parse_file_arg(input: &str) -> Result<FileHandle> {
    let handle = FileHandle::parse(input)?;
    let cwd = std::env::current_dir().context("Failed to read the working directory")?;
    Ok(FileHandle::with_scheme(
        handle.scheme(),
        resolve_path(&cwd, handle.path()),
    ))
}

fn resolve_path(cwd: &Path, path: &Path) -> std::path::PathBuf {
    let path = absolutize(cwd, path);
    // Workspace roots are canonical; match them when the file exists
    path.canonicalize().unwrap_or(path)
}
