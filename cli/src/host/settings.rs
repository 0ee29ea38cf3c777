//! JSON settings files backing the configuration store
//!
//! Values are stored under flat, fully qualified keys (`"faves.favorites"`),
//! one file per target. Reads prefer the workspace file over the global one.

use async_trait::async_trait;
use faves_core::error::{ConfigError, Result};
use faves_core::host::{ConfigurationStore, ConfigurationTarget};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

/// Configuration store persisted as JSON settings files
#[derive(Debug, Clone)]
pub struct JsonSettingsStore {
    workspace_path: Option<PathBuf>,
    global_path: PathBuf,
}

impl JsonSettingsStore {
    pub fn new(workspace_path: Option<PathBuf>, global_path: PathBuf) -> Self {
        Self {
            workspace_path,
            global_path,
        }
    }

    fn path_for(&self, target: ConfigurationTarget) -> Result<&Path> {
        match target {
            ConfigurationTarget::Global => Ok(self.global_path.as_path()),
            ConfigurationTarget::Workspace => self
                .workspace_path
                .as_deref()
                .ok_or_else(|| ConfigError::NoWorkspace.into()),
        }
    }

    /// Load a settings file; a missing file is empty
    async fn read_settings(path: &Path) -> Result<Map<String, Value>> {
        if !path.exists() {
            return Ok(Map::new());
        }

        let content = fs::read_to_string(path).await?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str(&content)? {
            Value::Object(map) => Ok(map),
            _ => Err(ConfigError::InvalidValue {
                key: path.display().to_string(),
                message: "settings file must contain a JSON object".to_string(),
            }
            .into()),
        }
    }

    async fn lookup(path: &Path, full_key: &str) -> Option<Value> {
        match Self::read_settings(path).await {
            Ok(mut settings) => settings.remove(full_key),
            Err(e) => {
                warn!("Ignoring unreadable settings file {}: {}", path.display(), e);
                None
            }
        }
    }
}

#[async_trait]
impl ConfigurationStore for JsonSettingsStore {
    async fn get(&self, section: &str, key: &str) -> Option<Value> {
        let full_key = format!("{}.{}", section, key);

        if let Some(workspace_path) = &self.workspace_path {
            if let Some(value) = Self::lookup(workspace_path, &full_key).await {
                return Some(value);
            }
        }
        Self::lookup(&self.global_path, &full_key).await
    }

    async fn update(
        &self,
        section: &str,
        key: &str,
        value: Value,
        target: ConfigurationTarget,
    ) -> Result<()> {
        let full_key = format!("{}.{}", section, key);
        let path = self.path_for(target)?;

        // Refuse to clobber a file we cannot parse
        let mut settings = Self::read_settings(path).await.map_err(|e| ConfigError::WriteFailed {
            key: full_key.clone(),
            message: e.to_string(),
        })?;
        settings.insert(full_key.clone(), value);

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(&Value::Object(settings))?;
        fs::write(path, content + "\n").await?;
        debug!("Wrote {} to {}", full_key, path.display());

        Ok(())
    }
}
