//! Host editor abstraction
//!
//! faves never talks to an editor directly. Everything it needs from the
//! outside world (messages, prompts, the picker, document opening, workspace
//! folders and the configuration store) goes through the traits in this
//! module, so different hosts (a terminal, an editor bridge, a test fake) can
//! drive the same core.

use crate::error::Result;
use crate::favorite::FileHandle;
use crate::search::PickerItem;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Severity of a user-facing message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

/// User-facing notifications
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Show a message with the given level
    async fn show_message(&self, level: MessageLevel, content: &str);

    /// Show an informational message
    async fn info(&self, content: &str) {
        self.show_message(MessageLevel::Info, content).await
    }

    /// Show a warning message
    async fn warning(&self, content: &str) {
        self.show_message(MessageLevel::Warning, content).await
    }

    /// Show an error message
    async fn error(&self, content: &str) {
        self.show_message(MessageLevel::Error, content).await
    }
}

/// Options for a single-line input box
#[derive(Debug, Clone, Default)]
pub struct InputBoxOptions {
    pub prompt: String,
    pub placeholder: String,
}

/// Modal text prompts
#[async_trait]
pub trait Prompter: Send + Sync {
    /// Ask for a line of text; `None` when the prompt was dismissed
    async fn input_box(&self, options: &InputBoxOptions) -> Option<String>;
}

/// Options for a picker session
#[derive(Debug, Clone, Default)]
pub struct PickerOptions {
    pub placeholder: String,
    /// Whether typed filter text should also match item descriptions
    pub match_on_description: bool,
}

/// One user interaction with an open picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEvent {
    /// A button on the item at `item` was pressed
    ButtonPressed { item: usize, button: String },
    /// The user accepted with the given item indices selected
    Accepted { selected: Vec<usize> },
    /// The picker was hidden without accepting
    Dismissed,
}

/// An open picker session
#[async_trait]
pub trait QuickPick: Send {
    /// Show `items` (replacing whatever was shown before) and wait for the
    /// next interaction
    async fn next_event(&mut self, items: &[PickerItem]) -> PickerEvent;

    /// Close the picker and release its resources
    async fn close(&mut self);
}

/// Factory for picker sessions
pub trait PickerHost: Send + Sync {
    fn create_quick_pick(&self, options: PickerOptions) -> Box<dyn QuickPick>;
}

/// Document and editor access
#[async_trait]
pub trait Documents: Send + Sync {
    /// The file behind the active editor, if any
    fn active_file(&self) -> Option<FileHandle> {
        None
    }

    /// Open a file in a text editor
    async fn show_text_document(&self, location: &FileHandle) -> Result<()>;

    /// Open a file as a notebook
    async fn show_notebook_document(&self, location: &FileHandle) -> Result<()>;
}

/// A root folder of the open workspace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceFolder {
    pub name: String,
    pub path: PathBuf,
}

impl WorkspaceFolder {
    /// Folder named after the last component of its path
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        let name = crate::favorite::basename(&path);
        Self { name, path }
    }
}

/// Workspace layout and filesystem checks
#[async_trait]
pub trait Workspace: Send + Sync {
    /// Currently open workspace roots, in host order
    fn workspace_folders(&self) -> Vec<WorkspaceFolder>;

    /// The innermost open root containing `path`
    fn workspace_folder_for(&self, path: &Path) -> Option<WorkspaceFolder> {
        self.workspace_folders()
            .into_iter()
            .filter(|folder| path.starts_with(&folder.path))
            .max_by_key(|folder| folder.path.components().count())
    }

    /// Whether `path` exists and is a regular file (symlinks are not followed)
    async fn is_regular_file(&self, path: &Path) -> bool {
        tokio::fs::symlink_metadata(path)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false)
    }
}

/// Where a configuration value is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfigurationTarget {
    /// User-level settings shared by every workspace
    Global,
    /// Settings of the open workspace
    Workspace,
}

/// Notification that configuration values changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigurationChange {
    /// Fully qualified keys that changed, e.g. `faves.favorites`
    pub keys: Vec<String>,
}

impl ConfigurationChange {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `section` or anything below it changed
    pub fn affects_configuration(&self, section: &str) -> bool {
        self.keys.iter().any(|key| {
            key == section
                || key
                    .strip_prefix(section)
                    .is_some_and(|rest| rest.starts_with('.'))
                || section
                    .strip_prefix(key.as_str())
                    .is_some_and(|rest| rest.starts_with('.'))
        })
    }
}

/// Keyed configuration storage
#[async_trait]
pub trait ConfigurationStore: Send + Sync {
    /// Effective value of `section.key`, if set anywhere
    async fn get(&self, section: &str, key: &str) -> Option<serde_json::Value>;

    /// Replace the value of `section.key` at `target`
    async fn update(
        &self,
        section: &str,
        key: &str,
        value: serde_json::Value,
        target: ConfigurationTarget,
    ) -> Result<()>;
}

/// Everything faves needs from its host
pub trait EditorHost:
    Messenger + Prompter + PickerHost + Documents + Workspace + ConfigurationStore
{
}

impl<T> EditorHost for T where
    T: Messenger + Prompter + PickerHost + Documents + Workspace + ConfigurationStore
{
}
