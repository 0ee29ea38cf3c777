//! Favorite records and the file handles they point at

use crate::error::ResolveError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

/// Resource schemes a favorite can be recorded with
pub mod schemes {
    /// Plain files on disk
    pub const FILE: &str = "file";
    /// Cells of a notebook document
    pub const NOTEBOOK_CELL: &str = "vscode-notebook-cell";

    /// Every scheme a handle may carry to be favorited
    pub const SUPPORTED: &[&str] = &[FILE, NOTEBOOK_CELL];
}

/// A persisted favorite
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    /// Absolute path (workspace scope) or workspace-relative path (global scope)
    pub path: String,

    /// Scheme of the favorited resource; absent on records written before
    /// schemes were tracked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,

    /// Optional alias, always trimmed and never empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl Favorite {
    /// Create a favorite without an alias
    pub fn new<S: Into<String>>(path: S) -> Self {
        Self {
            path: path.into(),
            scheme: None,
            alias: None,
        }
    }

    /// Set the scheme
    pub fn with_scheme<S: Into<String>>(mut self, scheme: S) -> Self {
        self.scheme = Some(scheme.into());
        self
    }

    /// Set the alias from raw user input
    pub fn with_alias(mut self, alias: Option<&str>) -> Self {
        self.alias = normalize_alias(alias);
        self
    }

    /// The alias, if one is set and non-empty
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref().filter(|alias| !alias.is_empty())
    }

    /// Last component of the stored path
    pub fn basename(&self) -> String {
        basename(Path::new(&self.path))
    }
}

/// Trim raw alias input; blank input means no alias
pub fn normalize_alias(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|alias| !alias.is_empty())
        .map(str::to_string)
}

/// File name of a path, or the whole path when it has none
pub fn basename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// A reference to a resource the host can open
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileHandle {
    scheme: String,
    path: PathBuf,
}

impl FileHandle {
    /// Handle for a plain file
    pub fn file<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            scheme: schemes::FILE.to_string(),
            path: path.into(),
        }
    }

    /// Handle with an explicit scheme
    pub fn with_scheme<S: Into<String>, P: Into<PathBuf>>(scheme: S, path: P) -> Self {
        Self {
            scheme: scheme.into(),
            path: path.into(),
        }
    }

    /// Parse either a plain path or a `scheme:/path` URI
    pub fn parse(input: &str) -> std::result::Result<Self, ResolveError> {
        let invalid = || ResolveError::InvalidHandle {
            input: input.to_string(),
        };

        // Single-letter schemes are drive letters, not URIs
        let url = match Url::parse(input) {
            Ok(url) if url.scheme().len() > 1 => url,
            _ => return Ok(Self::file(input)),
        };

        if url.scheme() == schemes::FILE {
            let path = url.to_file_path().map_err(|_| invalid())?;
            return Ok(Self::file(path));
        }

        // Decode the path portion by re-reading it as a file URL
        let path = Url::parse(&format!("file://{}", url.path()))
            .ok()
            .and_then(|file_url| file_url.to_file_path().ok())
            .ok_or_else(invalid)?;
        Ok(Self::with_scheme(url.scheme(), path))
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether favorites may be recorded for this handle's scheme
    pub fn is_supported(&self) -> bool {
        schemes::SUPPORTED.contains(&self.scheme.as_str())
    }

    pub fn basename(&self) -> String {
        basename(&self.path)
    }
}

impl fmt::Display for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scheme == schemes::FILE {
            write!(f, "{}", self.path.display())
        } else {
            write!(f, "{}:{}", self.scheme, self.path.display())
        }
    }
}
