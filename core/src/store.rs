//! Per-scope favorite store backed by the host configuration

use crate::error::Result;
use crate::favorite::{basename, normalize_alias, Favorite, FileHandle};
use crate::host::{EditorHost, InputBoxOptions};
use crate::scope::{Scope, CONFIG_SECTION};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// What a store mutation ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreUpdate {
    Added,
    Removed,
    /// Nothing changed (duplicate add, missing remove)
    Unchanged,
    /// The handle could not be resolved to a key; an error was shown
    Rejected,
    /// The write was rejected and the store was reloaded from configuration
    Failed,
}

/// In-memory owner of one scope's favorites
#[derive(Debug, Clone)]
pub struct FavesStore {
    scope: Scope,
    faves: HashMap<String, Favorite>,
    /// Persisted form of entries that only partly parsed, keyed by path;
    /// written back verbatim while the favorite exists
    raw_entries: HashMap<String, Value>,
    /// Entries without a usable path, written back after the favorites
    unreadable: Vec<Value>,
}

impl FavesStore {
    fn empty(scope: Scope) -> Self {
        Self {
            scope,
            faves: HashMap::new(),
            raw_entries: HashMap::new(),
            unreadable: Vec::new(),
        }
    }

    /// Create a store and hydrate it from the host configuration
    pub async fn load(host: &dyn EditorHost, scope: Scope) -> Self {
        let mut store = Self::empty(scope);
        store.reload(host).await;
        store
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn get(&self, key: &str) -> Option<&Favorite> {
        self.faves.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.faves.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.faves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faves.is_empty()
    }

    /// Favorites sorted ascending by path
    pub fn ordered_faves(&self) -> Vec<&Favorite> {
        let mut faves: Vec<&Favorite> = self.faves.values().collect();
        faves.sort_by(|a, b| a.path.cmp(&b.path));
        faves
    }

    /// Replace the in-memory map with the persisted collection
    ///
    /// Entries are read one at a time so a bad entry never hides its
    /// neighbours; whatever cannot be understood is kept for write-back.
    pub async fn reload(&mut self, host: &dyn EditorHost) {
        let value = host.get(CONFIG_SECTION, self.scope.subsection()).await;
        let entries = match value {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(entries)) => entries,
            Some(other) => {
                warn!(
                    "Ignoring {}: expected a list, found {}",
                    self.scope.config_key(),
                    other
                );
                Vec::new()
            }
        };

        self.faves.clear();
        self.raw_entries.clear();
        self.unreadable.clear();
        for entry in entries {
            match serde_json::from_value::<Favorite>(entry.clone()) {
                Ok(fave) => {
                    self.faves.insert(fave.path.clone(), fave);
                }
                Err(e) => match lenient_favorite(&entry) {
                    Some(fave) => {
                        warn!("Partly malformed {} entry {}: {}", self.scope, entry, e);
                        self.raw_entries.insert(fave.path.clone(), entry);
                        self.faves.insert(fave.path.clone(), fave);
                    }
                    None => {
                        warn!("Skipping {} entry without a path: {}", self.scope, entry);
                        self.unreadable.push(entry);
                    }
                },
            }
        }
        debug!("Loaded {} {} favorites", self.faves.len(), self.scope);
    }

    /// Add `handle`, prompting for an optional alias
    pub async fn add(&mut self, host: &dyn EditorHost, handle: &FileHandle) -> StoreUpdate {
        let Some(key) = self.resolve_key(host, handle).await else {
            return StoreUpdate::Rejected;
        };
        self.add_key(host, handle, key).await
    }

    /// Remove `handle` if it is a favorite
    pub async fn remove(&mut self, host: &dyn EditorHost, handle: &FileHandle) -> StoreUpdate {
        let Some(key) = self.resolve_key(host, handle).await else {
            return StoreUpdate::Rejected;
        };
        self.remove_path(host, &key).await
    }

    /// Remove the favorite stored under `key`
    pub async fn remove_path(&mut self, host: &dyn EditorHost, key: &str) -> StoreUpdate {
        if self.faves.remove(key).is_none() {
            host.info("File already removed from favorites").await;
            return StoreUpdate::Unchanged;
        }
        self.raw_entries.remove(key);

        let name = basename(Path::new(key));
        match self.persist(host).await {
            Ok(()) => {
                host.info(&format!(
                    "{} was removed from {}",
                    name,
                    self.scope.config_key()
                ))
                .await;
                StoreUpdate::Removed
            }
            Err(e) => {
                host.error(&format!(
                    "Failed to remove {} from {}: {}",
                    name,
                    self.scope.config_key(),
                    e
                ))
                .await;
                self.reload(host).await;
                StoreUpdate::Failed
            }
        }
    }

    /// Remove `handle` if present, otherwise add it
    pub async fn toggle(&mut self, host: &dyn EditorHost, handle: &FileHandle) -> StoreUpdate {
        let Some(key) = self.resolve_key(host, handle).await else {
            return StoreUpdate::Rejected;
        };

        if self.faves.contains_key(&key) {
            self.remove_path(host, &key).await
        } else {
            self.add_key(host, handle, key).await
        }
    }

    async fn add_key(&mut self, host: &dyn EditorHost, handle: &FileHandle, key: String) -> StoreUpdate {
        if self.faves.contains_key(&key) {
            host.info("File already exists in favorites").await;
            return StoreUpdate::Unchanged;
        }

        let alias = host
            .input_box(&InputBoxOptions {
                prompt: "Fave alias".to_string(),
                placeholder: "alias (leave blank for no alias)".to_string(),
            })
            .await;

        let fave = Favorite {
            path: key.clone(),
            scheme: Some(handle.scheme().to_string()),
            alias: normalize_alias(alias.as_deref()),
        };
        debug!("Adding {} favorite {:?}", self.scope, fave);
        self.faves.insert(key, fave);

        let name = handle.basename();
        match self.persist(host).await {
            Ok(()) => {
                host.info(&format!("{} was added to {}", name, self.scope.config_key()))
                    .await;
                StoreUpdate::Added
            }
            Err(e) => {
                host.error(&format!(
                    "Failed to add {} to {}: {}",
                    name,
                    self.scope.config_key(),
                    e
                ))
                .await;
                self.reload(host).await;
                StoreUpdate::Failed
            }
        }
    }

    /// Resolve a handle to a key, reporting failures to the user
    async fn resolve_key(&self, host: &dyn EditorHost, handle: &FileHandle) -> Option<String> {
        match self.scope.handle_to_key(host, handle) {
            Ok(key) => Some(key),
            Err(e) => {
                host.error(&e.to_string()).await;
                None
            }
        }
    }

    /// Write the whole collection, sorted by path
    async fn persist(&self, host: &dyn EditorHost) -> Result<()> {
        let mut entries = Vec::with_capacity(self.faves.len() + self.unreadable.len());
        for fave in self.ordered_faves() {
            match self.raw_entries.get(&fave.path) {
                Some(raw) => entries.push(raw.clone()),
                None => entries.push(serde_json::to_value(fave)?),
            }
        }
        entries.extend(self.unreadable.iter().cloned());

        host.update(
            CONFIG_SECTION,
            self.scope.subsection(),
            Value::Array(entries),
            self.scope.target(),
        )
        .await
    }
}

/// Best-effort read of an entry that failed strict parsing: a string `path`
/// is required, other fields are kept only when they have the right type
fn lenient_favorite(entry: &Value) -> Option<Favorite> {
    let path = entry.get("path")?.as_str()?;
    let field = |name: &str| entry.get(name).and_then(Value::as_str);

    let mut fave = Favorite::new(path).with_alias(field("alias"));
    fave.scheme = field("scheme").map(str::to_string);
    Some(fave)
}
