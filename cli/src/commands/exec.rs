//! Run a command by its registered identifier

use super::{parse_file_arg, run_command};
use crate::config::CliConfigLoader;
use anyhow::{Context, Result};
use faves_core::commands::ids;
use faves_core::Command;

/// Execute `id` with an optional target file and JSON arguments
pub async fn exec_command(
    loader: CliConfigLoader,
    id: String,
    file: Option<String>,
    args: Option<String>,
) -> Result<()> {
    let file = file.as_deref().map(parse_file_arg).transpose()?;
    let args = args
        .as_deref()
        .map(serde_json::from_str::<serde_json::Value>)
        .transpose()
        .context("Command arguments must be JSON")?;

    let command = Command::from_id(&id, file, args)?;
    run_command(&loader, command).await
}

/// Reload both stores from settings (test mode only)
pub async fn reset_command(loader: CliConfigLoader) -> Result<()> {
    run_command(&loader, Command::from_id(ids::RESET_FOR_TEST, None, None)?).await
}

/// Print every command identifier
pub fn list_commands() {
    for id in ids::ALL {
        println!("{}", id);
    }
}
