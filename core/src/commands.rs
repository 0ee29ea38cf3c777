//! Extension commands and their argument parsing

use crate::error::{HostError, Result};
use crate::favorite::FileHandle;
use crate::scope::Scope;
use crate::search::SearchOptions;
use serde::Deserialize;

/// Command identifiers exposed to the host
pub mod ids {
    pub const ADD: &str = "favorites.add";
    pub const REMOVE: &str = "favorites.remove";
    pub const TOGGLE: &str = "favorites.toggle";
    pub const GLOBAL_ADD: &str = "favorites.globalAdd";
    pub const GLOBAL_REMOVE: &str = "favorites.globalRemove";
    pub const GLOBAL_TOGGLE: &str = "favorites.globalToggle";
    pub const SEARCH: &str = "favorites.search";
    pub const RESET_FOR_TEST: &str = "favorites.resetForTest";

    /// Every command, in registration order
    pub const ALL: &[&str] = &[
        ADD,
        REMOVE,
        TOGGLE,
        GLOBAL_ADD,
        GLOBAL_REMOVE,
        GLOBAL_TOGGLE,
        SEARCH,
        RESET_FOR_TEST,
    ];
}

/// A parsed command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Favorite a file; `None` means the active file
    Add { scope: Scope, file: Option<FileHandle> },
    Remove { scope: Scope, file: Option<FileHandle> },
    Toggle { scope: Scope, file: Option<FileHandle> },
    Search(SearchOptions),
    /// Reload both stores; only honored in test mode
    ResetForTest,
}

/// `alias` may select alias mode (`true`) or name an alias to jump to
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AliasArg {
    Mode(bool),
    Name(String),
}

#[derive(Debug, Default, Deserialize)]
struct SearchArgs {
    #[serde(default)]
    alias: Option<AliasArg>,
}

impl Command {
    /// Identifier this command is registered under
    pub fn id(&self) -> &'static str {
        match self {
            Command::Add { scope: Scope::Workspace, .. } => ids::ADD,
            Command::Add { scope: Scope::Global, .. } => ids::GLOBAL_ADD,
            Command::Remove { scope: Scope::Workspace, .. } => ids::REMOVE,
            Command::Remove { scope: Scope::Global, .. } => ids::GLOBAL_REMOVE,
            Command::Toggle { scope: Scope::Workspace, .. } => ids::TOGGLE,
            Command::Toggle { scope: Scope::Global, .. } => ids::GLOBAL_TOGGLE,
            Command::Search(_) => ids::SEARCH,
            Command::ResetForTest => ids::RESET_FOR_TEST,
        }
    }

    /// Build a command from its identifier, target file and JSON arguments
    pub fn from_id(
        id: &str,
        file: Option<FileHandle>,
        args: Option<serde_json::Value>,
    ) -> Result<Self> {
        let command = match id {
            ids::ADD => Command::Add { scope: Scope::Workspace, file },
            ids::REMOVE => Command::Remove { scope: Scope::Workspace, file },
            ids::TOGGLE => Command::Toggle { scope: Scope::Workspace, file },
            ids::GLOBAL_ADD => Command::Add { scope: Scope::Global, file },
            ids::GLOBAL_REMOVE => Command::Remove { scope: Scope::Global, file },
            ids::GLOBAL_TOGGLE => Command::Toggle { scope: Scope::Global, file },
            ids::SEARCH => Command::Search(parse_search_args(id, args)?),
            ids::RESET_FOR_TEST => Command::ResetForTest,
            _ => return Err(HostError::UnknownCommand { id: id.to_string() }.into()),
        };
        Ok(command)
    }
}

fn parse_search_args(id: &str, args: Option<serde_json::Value>) -> Result<SearchOptions> {
    let args = match args {
        None | Some(serde_json::Value::Null) => SearchArgs::default(),
        Some(value) => serde_json::from_value(value).map_err(|e| HostError::InvalidArguments {
            id: id.to_string(),
            message: e.to_string(),
        })?,
    };

    Ok(match args.alias {
        None => SearchOptions::default(),
        Some(AliasArg::Mode(use_alias)) => SearchOptions {
            use_alias,
            alias: None,
        },
        Some(AliasArg::Name(alias)) => SearchOptions::by_alias(alias),
    })
}
