//! Extension root: owns both favorite stores and dispatches commands

use crate::commands::Command;
use crate::error::ResolveError;
use crate::favorite::FileHandle;
use crate::host::{ConfigurationChange, EditorHost};
use crate::open::OpenerRegistry;
use crate::scope::{Scope, CONFIG_SECTION};
use crate::search::{search_faves, SearchOutcome};
use crate::store::{FavesStore, StoreUpdate};
use tracing::{debug, info};

/// Runtime switches for the extension
#[derive(Debug, Clone, Default)]
pub struct FavesConfig {
    /// Enables the reset command used by integration tests
    pub test_mode: bool,
}

/// What a command ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Store(StoreUpdate),
    Search(SearchOutcome),
    Reloaded,
    /// The command was refused and an error was shown
    Rejected,
}

impl CommandOutcome {
    /// Whether the command reported an error to the user
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            CommandOutcome::Rejected
                | CommandOutcome::Store(StoreUpdate::Rejected)
                | CommandOutcome::Store(StoreUpdate::Failed)
                | CommandOutcome::Search(SearchOutcome::Failed)
        )
    }
}

/// The favorites extension
pub struct Faves {
    /// One store per scope, in [`Scope::ALL`] order
    stores: Vec<FavesStore>,
    openers: OpenerRegistry,
    config: FavesConfig,
}

impl Faves {
    /// Create both stores and load them from configuration
    pub async fn activate(host: &dyn EditorHost, config: FavesConfig) -> Self {
        let mut stores = Vec::with_capacity(Scope::ALL.len());
        for scope in Scope::ALL {
            stores.push(FavesStore::load(host, scope).await);
        }
        info!(
            "Activated with {} workspace and {} global favorites",
            stores[0].len(),
            stores[1].len()
        );

        let openers = OpenerRegistry::default();
        debug!("Openers registered for {:?}", openers.schemes());

        Self {
            stores,
            openers,
            config,
        }
    }

    pub fn store(&self, scope: Scope) -> &FavesStore {
        match scope {
            Scope::Workspace => &self.stores[0],
            Scope::Global => &self.stores[1],
        }
    }

    fn store_mut(&mut self, scope: Scope) -> &mut FavesStore {
        match scope {
            Scope::Workspace => &mut self.stores[0],
            Scope::Global => &mut self.stores[1],
        }
    }

    /// Run a command, reporting every failure to the user
    pub async fn execute(&mut self, host: &dyn EditorHost, command: Command) -> CommandOutcome {
        debug!("Executing {}", command.id());
        match command {
            Command::Add { scope, file } => match active_file(host, file).await {
                Some(file) => CommandOutcome::Store(self.store_mut(scope).add(host, &file).await),
                None => CommandOutcome::Rejected,
            },
            Command::Remove { scope, file } => match active_file(host, file).await {
                Some(file) => {
                    CommandOutcome::Store(self.store_mut(scope).remove(host, &file).await)
                }
                None => CommandOutcome::Rejected,
            },
            Command::Toggle { scope, file } => match active_file(host, file).await {
                Some(file) => {
                    CommandOutcome::Store(self.store_mut(scope).toggle(host, &file).await)
                }
                None => CommandOutcome::Rejected,
            },
            Command::Search(options) => CommandOutcome::Search(
                search_faves(host, &mut self.stores, &self.openers, &options).await,
            ),
            Command::ResetForTest => {
                if !self.config.test_mode {
                    host.error("The reset command may only be run in test mode")
                        .await;
                    return CommandOutcome::Rejected;
                }
                self.reload(host).await;
                CommandOutcome::Reloaded
            }
        }
    }

    /// Parse and run a command by identifier
    pub async fn execute_id(
        &mut self,
        host: &dyn EditorHost,
        id: &str,
        file: Option<FileHandle>,
        args: Option<serde_json::Value>,
    ) -> CommandOutcome {
        match Command::from_id(id, file, args) {
            Ok(command) => self.execute(host, command).await,
            Err(e) => {
                host.error(&e.to_string()).await;
                CommandOutcome::Rejected
            }
        }
    }

    /// Reload every store from configuration
    pub async fn reload(&mut self, host: &dyn EditorHost) {
        for store in &mut self.stores {
            store.reload(host).await;
        }
    }

    /// React to a host configuration change; returns whether stores reloaded
    pub async fn on_configuration_changed(
        &mut self,
        host: &dyn EditorHost,
        change: &ConfigurationChange,
    ) -> bool {
        if !change.affects_configuration(CONFIG_SECTION) {
            return false;
        }
        debug!("Configuration changed: {:?}", change.keys);
        self.reload(host).await;
        true
    }
}

/// The explicit file, else the host's active file, else an error
async fn active_file(host: &dyn EditorHost, file: Option<FileHandle>) -> Option<FileHandle> {
    let file = file.or_else(|| host.active_file());
    if file.is_none() {
        host.error(&ResolveError::NoActiveFile.to_string()).await;
    }
    file
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::ids;
    use crate::favorite::{schemes, Favorite};
    use crate::host::{MessageLevel, PickerEvent};
    use crate::search::SearchOptions;
    use crate::testing::{FakeHost, OpenKind};
    use std::fs;
    use tempfile::TempDir;

    fn fixture() -> (TempDir, FakeHost) {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/main.rs"), "").unwrap();
        fs::write(dir.path().join("README.md"), "").unwrap();
        let host = FakeHost::new(&[dir.path()]);
        (dir, host)
    }

    #[tokio::test]
    async fn test_commands_use_active_file() {
        let (dir, host) = fixture();
        let host = host.with_active(FileHandle::file(dir.path().join("src/main.rs")));
        let mut faves = Faves::activate(&host, FavesConfig::default()).await;

        host.push_input(Some("main"));
        let outcome = faves.execute_id(&host, ids::GLOBAL_ADD, None, None).await;
        assert_eq!(outcome, CommandOutcome::Store(StoreUpdate::Added));
        assert!(faves.store(Scope::Global).contains("src/main.rs"));
        assert!(faves.store(Scope::Workspace).is_empty());

        host.push_input(None);
        let outcome = faves.execute_id(&host, ids::TOGGLE, None, None).await;
        assert_eq!(outcome, CommandOutcome::Store(StoreUpdate::Added));
        assert_eq!(faves.store(Scope::Workspace).len(), 1);
    }

    #[tokio::test]
    async fn test_missing_active_file_is_rejected() {
        let (_dir, host) = fixture();
        let mut faves = Faves::activate(&host, FavesConfig::default()).await;

        for id in [ids::ADD, ids::REMOVE, ids::GLOBAL_TOGGLE] {
            let outcome = faves.execute_id(&host, id, None, None).await;
            assert_eq!(outcome, CommandOutcome::Rejected);
        }
        assert_eq!(
            host.messages()
                .iter()
                .filter(|(level, content)| *level == MessageLevel::Error
                    && content == "No active file")
                .count(),
            3
        );
    }

    #[tokio::test]
    async fn test_unsupported_scheme_is_rejected() {
        let (_dir, host) = fixture();
        let mut faves = Faves::activate(&host, FavesConfig::default()).await;

        let file = FileHandle::with_scheme("untitled", "/Untitled-1");
        let outcome = faves
            .execute(
                &host,
                Command::Add {
                    scope: Scope::Workspace,
                    file: Some(file),
                },
            )
            .await;

        assert_eq!(outcome, CommandOutcome::Store(StoreUpdate::Rejected));
        assert!(outcome.is_failure());
        assert!(host.has_message(MessageLevel::Error, "Unsupported file scheme: untitled"));
        assert!(faves.store(Scope::Workspace).is_empty());
    }

    #[tokio::test]
    async fn test_global_commands_outside_workspace_are_failures() {
        let (_dir, host) = fixture();
        let mut faves = Faves::activate(&host, FavesConfig::default()).await;
        let outside = FileHandle::file("/elsewhere/x.txt");

        for id in [ids::GLOBAL_ADD, ids::GLOBAL_REMOVE, ids::GLOBAL_TOGGLE] {
            let outcome = faves
                .execute_id(&host, id, Some(outside.clone()), None)
                .await;
            assert_eq!(outcome, CommandOutcome::Store(StoreUpdate::Rejected));
            assert!(outcome.is_failure(), "{}", id);
        }
        assert!(host.has_message(MessageLevel::Error, "File is not in a workspace folder"));

        // Informational outcomes are not failures
        let outcome = faves
            .execute_id(&host, ids::REMOVE, Some(outside), None)
            .await;
        assert_eq!(outcome, CommandOutcome::Store(StoreUpdate::Unchanged));
        assert!(!outcome.is_failure());
    }

    #[tokio::test]
    async fn test_reset_requires_test_mode() {
        let (_dir, host) = fixture();
        let mut faves = Faves::activate(&host, FavesConfig::default()).await;

        let outcome = faves.execute(&host, Command::ResetForTest).await;
        assert_eq!(outcome, CommandOutcome::Rejected);
        assert!(outcome.is_failure());
        assert!(host.has_message(
            MessageLevel::Error,
            "The reset command may only be run in test mode"
        ));
    }

    #[tokio::test]
    async fn test_reset_reloads_in_test_mode() {
        let (dir, host) = fixture();
        let mut faves = Faves::activate(&host, FavesConfig { test_mode: true }).await;
        assert!(faves.store(Scope::Workspace).is_empty());

        let readme = dir.path().join("README.md").to_string_lossy().into_owned();
        host.set_favorites(Scope::Workspace, vec![Favorite::new(readme.clone())]);
        host.set_favorites(Scope::Global, vec![Favorite::new("src/main.rs")]);

        let outcome = faves.execute_id(&host, ids::RESET_FOR_TEST, None, None).await;
        assert_eq!(outcome, CommandOutcome::Reloaded);
        assert!(faves.store(Scope::Workspace).contains(&readme));
        assert!(faves.store(Scope::Global).contains("src/main.rs"));
    }

    #[tokio::test]
    async fn test_configuration_change_reloads_stores() {
        let (_dir, host) = fixture();
        let mut faves = Faves::activate(&host, FavesConfig::default()).await;
        host.set_favorites(Scope::Global, vec![Favorite::new("src/main.rs")]);

        let unrelated = ConfigurationChange::new(["editor.tabSize"]);
        assert!(!faves.on_configuration_changed(&host, &unrelated).await);
        assert!(faves.store(Scope::Global).is_empty());

        let change = ConfigurationChange::new(["faves.globalFavorites"]);
        assert!(faves.on_configuration_changed(&host, &change).await);
        assert!(faves.store(Scope::Global).contains("src/main.rs"));
    }

    #[tokio::test]
    async fn test_search_command_round_trip() {
        let (dir, host) = fixture();
        let mut faves = Faves::activate(&host, FavesConfig::default()).await;

        let outcome = faves
            .execute(&host, Command::Search(SearchOptions::default()))
            .await;
        assert_eq!(outcome, CommandOutcome::Search(SearchOutcome::NoFavorites));

        let main = FileHandle::file(dir.path().join("src/main.rs"));
        host.push_input(Some(" m "));
        faves.execute_id(&host, ids::GLOBAL_ADD, Some(main.clone()), None).await;

        let outcome = faves
            .execute_id(
                &host,
                ids::SEARCH,
                None,
                Some(serde_json::json!({"alias": "m"})),
            )
            .await;
        assert_eq!(outcome, CommandOutcome::Search(SearchOutcome::Opened(main.clone())));

        host.push_picker_event(PickerEvent::Accepted { selected: vec![0] });
        let outcome = faves
            .execute_id(
                &host,
                ids::SEARCH,
                None,
                Some(serde_json::json!({"alias": true})),
            )
            .await;
        assert_eq!(outcome, CommandOutcome::Search(SearchOutcome::Opened(main.clone())));
        assert_eq!(host.picker_snapshots(), vec![vec!["m".to_string()]]);
        assert_eq!(
            host.opened(),
            vec![(OpenKind::Text, main.clone()), (OpenKind::Text, main)]
        );
        assert_eq!(
            host.favorites(Scope::Global),
            vec![Favorite::new("src/main.rs")
                .with_scheme(schemes::FILE)
                .with_alias(Some("m"))]
        );
    }
}
