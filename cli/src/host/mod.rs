//! Terminal implementation of the faves host
//!
//! Messages go to stdout/stderr, prompts and the picker use dialoguer,
//! configuration lives in JSON settings files and favorites are opened by
//! spawning the configured editor or notebook program.

pub mod picker;
pub mod settings;

use crate::config::{CliConfig, OpenMode};
use crate::output::print_message;
use async_trait::async_trait;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use faves_core::error::{HostError, Result};
use faves_core::host::{
    ConfigurationStore, ConfigurationTarget, Documents, InputBoxOptions, MessageLevel, Messenger,
    PickerHost, PickerOptions, Prompter, QuickPick, Workspace, WorkspaceFolder,
};
use faves_core::FileHandle;
use picker::{ListingQuickPick, TerminalQuickPick};
use settings::JsonSettingsStore;
use tokio::process::Command;
use tracing::{debug, info};

/// Host backed by the terminal and the local filesystem
pub struct TerminalHost {
    config: CliConfig,
    settings: JsonSettingsStore,
    active_file: Option<FileHandle>,
    interactive: bool,
}

impl TerminalHost {
    pub fn new(config: CliConfig) -> Self {
        let settings = JsonSettingsStore::new(
            config.workspace_settings.clone(),
            config.global_settings.clone(),
        );
        Self {
            config,
            settings,
            active_file: None,
            interactive: console::user_attended(),
        }
    }

    /// Set the file commands fall back to when no file is given
    pub fn with_active_file(mut self, active_file: Option<FileHandle>) -> Self {
        self.active_file = active_file;
        self
    }

    /// Run `program` with `location` appended to its arguments
    async fn spawn(&self, program: &[String], location: &FileHandle) -> Result<()> {
        if self.config.open_mode == OpenMode::Print {
            println!("{}", location.path().display());
            return Ok(());
        }

        let open_failed = |message: String| HostError::OpenFailed {
            path: location.path().display().to_string(),
            message,
        };
        let (binary, args) = program
            .split_first()
            .ok_or_else(|| open_failed("no program configured".to_string()))?;

        info!("Opening {} with {}", location, binary);
        let status = Command::new(binary)
            .args(args)
            .arg(location.path())
            .status()
            .await
            .map_err(|e| open_failed(e.to_string()))?;

        if !status.success() {
            return Err(open_failed(format!("{} exited with {}", binary, status)).into());
        }
        Ok(())
    }
}

#[async_trait]
impl Messenger for TerminalHost {
    async fn show_message(&self, level: MessageLevel, content: &str) {
        debug!("{:?}: {}", level, content);
        print_message(level, content);
    }
}

#[async_trait]
impl Prompter for TerminalHost {
    async fn input_box(&self, options: &InputBoxOptions) -> Option<String> {
        if !self.interactive {
            return None;
        }

        let prompt = format!("{} ({})", options.prompt, options.placeholder);
        tokio::task::spawn_blocking(move || {
            Input::<String>::with_theme(&ColorfulTheme::default())
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()
                .ok()
        })
        .await
        .ok()
        .flatten()
    }
}

impl PickerHost for TerminalHost {
    fn create_quick_pick(&self, options: PickerOptions) -> Box<dyn QuickPick> {
        if self.interactive {
            Box::new(TerminalQuickPick::new(options))
        } else {
            Box::new(ListingQuickPick)
        }
    }
}

#[async_trait]
impl Documents for TerminalHost {
    fn active_file(&self) -> Option<FileHandle> {
        self.active_file.clone()
    }

    async fn show_text_document(&self, location: &FileHandle) -> Result<()> {
        self.spawn(&self.config.editor, location).await
    }

    async fn show_notebook_document(&self, location: &FileHandle) -> Result<()> {
        self.spawn(&self.config.notebook, location).await
    }
}

#[async_trait]
impl Workspace for TerminalHost {
    fn workspace_folders(&self) -> Vec<WorkspaceFolder> {
        self.config
            .workspace_roots
            .iter()
            .map(|root| WorkspaceFolder::new(root.clone()))
            .collect()
    }
}

#[async_trait]
impl ConfigurationStore for TerminalHost {
    async fn get(&self, section: &str, key: &str) -> Option<serde_json::Value> {
        self.settings.get(section, key).await
    }

    async fn update(
        &self,
        section: &str,
        key: &str,
        value: serde_json::Value,
        target: ConfigurationTarget,
    ) -> Result<()> {
        self.settings.update(section, key, value, target).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faves_core::{Faves, FavesConfig, Scope, StoreUpdate};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn config(root: &std::path::Path, global: PathBuf) -> CliConfig {
        CliConfig {
            workspace_roots: vec![root.to_path_buf()],
            workspace_settings: Some(root.join(".faves/settings.json")),
            global_settings: global,
            editor: vec!["true".to_string()],
            notebook: vec!["true".to_string()],
            open_mode: OpenMode::Print,
            test_mode: false,
            active_file: None,
        }
    }

    /// Host that never prompts, whatever the test runner's stdout is
    fn quiet_host(config: CliConfig) -> TerminalHost {
        let mut host = TerminalHost::new(config);
        host.interactive = false;
        host
    }

    #[tokio::test]
    async fn test_favorites_persist_across_sessions() {
        let root = TempDir::new().unwrap();
        let global_dir = TempDir::new().unwrap();
        fs::write(root.path().join("notes.md"), "").unwrap();
        let global = global_dir.path().join("settings.json");

        let host = quiet_host(config(root.path(), global.clone()));
        let mut faves = Faves::activate(&host, FavesConfig::default()).await;
        let handle = FileHandle::file(root.path().join("notes.md"));

        assert!(faves.store(Scope::Global).is_empty());
        // Non-interactive: the alias prompt answers "no alias"
        let outcome = faves
            .execute(
                &host,
                faves_core::Command::Add {
                    scope: Scope::Global,
                    file: Some(handle),
                },
            )
            .await;
        assert_eq!(outcome, faves_core::CommandOutcome::Store(StoreUpdate::Added));

        let host = quiet_host(config(root.path(), global.clone()));
        let faves = Faves::activate(&host, FavesConfig::default()).await;
        let store = faves.store(Scope::Global);
        assert_eq!(store.len(), 1);
        assert!(store.contains("notes.md"));
        assert_eq!(store.get("notes.md").unwrap().alias, None);

        let persisted: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&global).unwrap()).unwrap();
        assert_eq!(
            persisted,
            serde_json::json!({"faves.globalFavorites": [{"path": "notes.md", "scheme": "file"}]})
        );
    }

    #[tokio::test]
    async fn test_active_file_is_used_when_no_file_given() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("todo.txt"), "").unwrap();
        let workspace_settings = root.path().join(".faves/settings.json");

        let host = quiet_host(config(root.path(), root.path().join("global.json")))
            .with_active_file(Some(FileHandle::file(root.path().join("todo.txt"))));
        let mut faves = Faves::activate(&host, FavesConfig::default()).await;
        let outcome = faves
            .execute(
                &host,
                faves_core::Command::Toggle {
                    scope: Scope::Workspace,
                    file: None,
                },
            )
            .await;

        assert_eq!(outcome, faves_core::CommandOutcome::Store(StoreUpdate::Added));
        assert!(workspace_settings.exists());
        let key = root.path().join("todo.txt").to_string_lossy().to_string();
        assert!(faves.store(Scope::Workspace).contains(&key));
    }

    #[tokio::test]
    async fn test_workspace_folders_from_config() {
        let root = TempDir::new().unwrap();
        let host = quiet_host(config(root.path(), root.path().join("global.json")));
        let folders = host.workspace_folders();
        assert_eq!(folders.len(), 1);
        assert_eq!(folders[0].path, root.path());
    }
}
