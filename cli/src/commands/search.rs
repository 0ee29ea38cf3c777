//! Pick a favorite and open it

use super::run_command;
use crate::config::CliConfigLoader;
use anyhow::Result;
use faves_core::{Command, SearchOptions};

/// Search favorites; `name` jumps straight to the favorite with that alias
pub async fn search_command(
    loader: CliConfigLoader,
    use_alias: bool,
    name: Option<String>,
) -> Result<()> {
    let options = match name {
        Some(alias) => SearchOptions::by_alias(alias),
        None => SearchOptions {
            use_alias,
            alias: None,
        },
    };
    run_command(&loader, Command::Search(options)).await
}
