//! Scripted in-memory host used by the unit tests

use crate::error::{ConfigError, Result};
use crate::favorite::{Favorite, FileHandle};
use crate::host::{
    ConfigurationStore, ConfigurationTarget, Documents, InputBoxOptions, MessageLevel, Messenger,
    PickerEvent, PickerHost, PickerOptions, Prompter, QuickPick, Workspace, WorkspaceFolder,
};
use crate::scope::{Scope, CONFIG_SECTION};
use crate::search::PickerItem;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// How a document was opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenKind {
    Text,
    Notebook,
}

#[derive(Default)]
struct FakeState {
    workspace_config: HashMap<String, Value>,
    global_config: HashMap<String, Value>,
    fail_writes: bool,
    writes: usize,
    messages: Vec<(MessageLevel, String)>,
    inputs: VecDeque<Option<String>>,
    prompts: usize,
    picker_events: VecDeque<PickerEvent>,
    picker_options: Vec<PickerOptions>,
    picker_snapshots: Vec<Vec<String>>,
    pickers_closed: usize,
    opened: Vec<(OpenKind, FileHandle)>,
}

/// Host whose UI answers come from a script and whose config lives in memory
pub struct FakeHost {
    folders: Vec<WorkspaceFolder>,
    active: Option<FileHandle>,
    state: Arc<Mutex<FakeState>>,
}

impl FakeHost {
    pub fn new(roots: &[&Path]) -> Self {
        Self {
            folders: roots.iter().map(|root| WorkspaceFolder::new(*root)).collect(),
            active: None,
            state: Arc::new(Mutex::new(FakeState::default())),
        }
    }

    pub fn with_active(mut self, handle: FileHandle) -> Self {
        self.active = Some(handle);
        self
    }

    /// Seed a scope's persisted favorites
    pub fn set_favorites(&self, scope: Scope, faves: Vec<Favorite>) {
        let value = serde_json::to_value(faves).unwrap();
        self.set_raw(scope, value);
    }

    /// Seed a scope's persisted value verbatim
    pub fn set_raw(&self, scope: Scope, value: Value) {
        let mut state = self.state.lock().unwrap();
        let config = match scope.target() {
            ConfigurationTarget::Workspace => &mut state.workspace_config,
            ConfigurationTarget::Global => &mut state.global_config,
        };
        config.insert(scope.config_key(), value);
    }

    /// Value currently persisted for a scope, verbatim
    pub fn raw(&self, scope: Scope) -> Option<Value> {
        let state = self.state.lock().unwrap();
        let config = match scope.target() {
            ConfigurationTarget::Workspace => &state.workspace_config,
            ConfigurationTarget::Global => &state.global_config,
        };
        config.get(&scope.config_key()).cloned()
    }

    /// Favorites currently persisted for a scope
    pub fn favorites(&self, scope: Scope) -> Vec<Favorite> {
        let state = self.state.lock().unwrap();
        let config = match scope.target() {
            ConfigurationTarget::Workspace => &state.workspace_config,
            ConfigurationTarget::Global => &state.global_config,
        };
        config
            .get(&scope.config_key())
            .map(|value| serde_json::from_value(value.clone()).unwrap())
            .unwrap_or_default()
    }

    pub fn push_input(&self, input: Option<&str>) {
        self.state
            .lock()
            .unwrap()
            .inputs
            .push_back(input.map(str::to_string));
    }

    pub fn push_picker_event(&self, event: PickerEvent) {
        self.state.lock().unwrap().picker_events.push_back(event);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.state.lock().unwrap().fail_writes = fail;
    }

    pub fn writes(&self) -> usize {
        self.state.lock().unwrap().writes
    }

    pub fn prompts(&self) -> usize {
        self.state.lock().unwrap().prompts
    }

    pub fn messages(&self) -> Vec<(MessageLevel, String)> {
        self.state.lock().unwrap().messages.clone()
    }

    pub fn has_message(&self, level: MessageLevel, content: &str) -> bool {
        self.messages()
            .iter()
            .any(|(l, c)| *l == level && c == content)
    }

    pub fn opened(&self) -> Vec<(OpenKind, FileHandle)> {
        self.state.lock().unwrap().opened.clone()
    }

    pub fn picker_options(&self) -> Vec<PickerOptions> {
        self.state.lock().unwrap().picker_options.clone()
    }

    /// Labels shown each time the picker waited for an event
    pub fn picker_snapshots(&self) -> Vec<Vec<String>> {
        self.state.lock().unwrap().picker_snapshots.clone()
    }

    pub fn pickers_closed(&self) -> usize {
        self.state.lock().unwrap().pickers_closed
    }
}

#[async_trait]
impl Messenger for FakeHost {
    async fn show_message(&self, level: MessageLevel, content: &str) {
        self.state
            .lock()
            .unwrap()
            .messages
            .push((level, content.to_string()));
    }
}

#[async_trait]
impl Prompter for FakeHost {
    async fn input_box(&self, _options: &InputBoxOptions) -> Option<String> {
        let mut state = self.state.lock().unwrap();
        state.prompts += 1;
        state.inputs.pop_front().flatten()
    }
}

struct FakeQuickPick {
    state: Arc<Mutex<FakeState>>,
}

#[async_trait]
impl QuickPick for FakeQuickPick {
    async fn next_event(&mut self, items: &[PickerItem]) -> PickerEvent {
        let mut state = self.state.lock().unwrap();
        state
            .picker_snapshots
            .push(items.iter().map(|item| item.label.clone()).collect());
        state
            .picker_events
            .pop_front()
            .unwrap_or(PickerEvent::Dismissed)
    }

    async fn close(&mut self) {
        self.state.lock().unwrap().pickers_closed += 1;
    }
}

impl PickerHost for FakeHost {
    fn create_quick_pick(&self, options: PickerOptions) -> Box<dyn QuickPick> {
        self.state.lock().unwrap().picker_options.push(options);
        Box::new(FakeQuickPick {
            state: Arc::clone(&self.state),
        })
    }
}

#[async_trait]
impl Documents for FakeHost {
    fn active_file(&self) -> Option<FileHandle> {
        self.active.clone()
    }

    async fn show_text_document(&self, location: &FileHandle) -> Result<()> {
        self.state
            .lock()
            .unwrap()
            .opened
            .push((OpenKind::Text, location.clone()));
        Ok(())
    }

    async fn show_notebook_document(&self, location: &FileHandle) -> Result<()> {
        self.state
            .lock()
            .unwrap()
            .opened
            .push((OpenKind::Notebook, location.clone()));
        Ok(())
    }
}

#[async_trait]
impl Workspace for FakeHost {
    fn workspace_folders(&self) -> Vec<WorkspaceFolder> {
        self.folders.clone()
    }
}

#[async_trait]
impl ConfigurationStore for FakeHost {
    async fn get(&self, section: &str, key: &str) -> Option<Value> {
        let full_key = format!("{}.{}", section, key);
        let state = self.state.lock().unwrap();
        state
            .workspace_config
            .get(&full_key)
            .or_else(|| state.global_config.get(&full_key))
            .cloned()
    }

    async fn update(
        &self,
        section: &str,
        key: &str,
        value: Value,
        target: ConfigurationTarget,
    ) -> Result<()> {
        assert_eq!(section, CONFIG_SECTION);
        let full_key = format!("{}.{}", section, key);
        let mut state = self.state.lock().unwrap();
        if state.fail_writes {
            return Err(ConfigError::WriteFailed {
                key: full_key,
                message: "settings are read-only".to_string(),
            }
            .into());
        }
        state.writes += 1;
        let config = match target {
            ConfigurationTarget::Workspace => &mut state.workspace_config,
            ConfigurationTarget::Global => &mut state.global_config,
        };
        config.insert(full_key, value);
        Ok(())
    }
}
