//! Favorite scopes and handle <-> key resolution
//!
//! Workspace favorites are keyed by absolute path and only mean something in
//! the workspace that recorded them. Global favorites are keyed by a path
//! relative to a workspace root, so the same favorite resolves in every
//! workspace sharing that layout, possibly under several roots at once.

use crate::error::ResolveError;
use crate::favorite::{schemes, Favorite, FileHandle};
use crate::host::{ConfigurationTarget, Workspace};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Configuration section every scope persists under
pub const CONFIG_SECTION: &str = "faves";

/// Icon shown next to workspace favorites
pub const WORKSPACE_ICON: &str = "home";

/// Icon shown next to global favorites
pub const GLOBAL_ICON: &str = "globe";

/// The two favorite scopes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Workspace,
    Global,
}

impl Scope {
    /// Stores are registered in this order; alias lookups honor it
    pub const ALL: [Scope; 2] = [Scope::Workspace, Scope::Global];

    /// Configuration key below [`CONFIG_SECTION`]
    pub fn subsection(&self) -> &'static str {
        match self {
            Scope::Workspace => "favorites",
            Scope::Global => "globalFavorites",
        }
    }

    /// Fully qualified configuration key
    pub fn config_key(&self) -> String {
        format!("{}.{}", CONFIG_SECTION, self.subsection())
    }

    /// Where this scope's favorites are written
    pub fn target(&self) -> ConfigurationTarget {
        match self {
            Scope::Workspace => ConfigurationTarget::Workspace,
            Scope::Global => ConfigurationTarget::Global,
        }
    }

    /// Icon identifying the scope in the picker
    pub fn icon(&self) -> &'static str {
        match self {
            Scope::Workspace => WORKSPACE_ICON,
            Scope::Global => GLOBAL_ICON,
        }
    }

    /// Translate a handle into this scope's favorite key
    pub fn handle_to_key<W>(&self, workspace: &W, handle: &FileHandle) -> Result<String, ResolveError>
    where
        W: Workspace + ?Sized,
    {
        if !handle.is_supported() {
            return Err(ResolveError::UnsupportedScheme {
                scheme: handle.scheme().to_string(),
            });
        }

        match self {
            Scope::Workspace => Ok(path_key(handle.path())),
            Scope::Global => {
                let folder = workspace
                    .workspace_folder_for(handle.path())
                    .ok_or(ResolveError::NotInWorkspace)?;
                let relative = handle
                    .path()
                    .strip_prefix(&folder.path)
                    .map_err(|_| ResolveError::NotInWorkspace)?;
                Ok(path_key(relative))
            }
        }
    }

    /// Candidate locations for a stored favorite
    ///
    /// Workspace favorites always yield their single stored path, unchecked.
    /// Global favorites yield one handle per open root under which the
    /// relative path names an existing regular file. Handles carry the
    /// stored scheme (`file` for legacy records).
    pub async fn key_to_handles<W>(&self, workspace: &W, fave: &Favorite) -> Vec<FileHandle>
    where
        W: Workspace + ?Sized,
    {
        let scheme = fave.scheme.as_deref().unwrap_or(schemes::FILE);
        match self {
            Scope::Workspace => vec![FileHandle::with_scheme(scheme, &fave.path)],
            Scope::Global => {
                let mut handles = Vec::new();
                for folder in workspace.workspace_folders() {
                    let joined = folder.path.join(&fave.path);
                    if workspace.is_regular_file(&joined).await {
                        handles.push(FileHandle::with_scheme(scheme, joined));
                    }
                }
                handles
            }
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Scope::Workspace => "workspace",
            Scope::Global => "global",
        })
    }
}

fn path_key(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
