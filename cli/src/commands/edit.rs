//! Add, remove and toggle favorites

use super::{parse_file_arg, run_command};
use crate::config::CliConfigLoader;
use anyhow::Result;
use faves_core::{Command, Scope};

/// Which edit to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    Add,
    Remove,
    Toggle,
}

/// Edit the favorites of `scope`; `file` defaults to the active file
pub async fn edit_command(
    loader: CliConfigLoader,
    action: EditAction,
    global: bool,
    file: Option<String>,
) -> Result<()> {
    let scope = if global { Scope::Global } else { Scope::Workspace };
    let file = file.as_deref().map(parse_file_arg).transpose()?;

    let command = match action {
        EditAction::Add => Command::Add { scope, file },
        EditAction::Remove => Command::Remove { scope, file },
        EditAction::Toggle => Command::Toggle { scope, file },
    };
    run_command(&loader, command).await
}
