//! CLI configuration loader for faves
//!
//! Resolves everything the terminal host needs, with flag overrides taking
//! priority over environment variables and defaults:
//! 1. Workspace roots: --workspace (repeatable), else the git repository root
//!    of the working directory, else the working directory itself
//! 2. Global settings directory: --config-dir, $FAVES_CONFIG_DIR, else
//!    $XDG_CONFIG_HOME/faves or the platform config dir
//! 3. Editor: --editor, $VISUAL, $EDITOR, else `vi`
//! 4. Notebook command: $FAVES_NOTEBOOK_COMMAND, else `jupyter notebook`
//! 5. Test mode: $FAVES_TEST_MODE
//! 6. Active file: $FAVES_ACTIVE_FILE, set by editor integrations

use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

/// Directory holding faves settings, both per workspace and globally
const SETTINGS_DIR: &str = ".faves";

/// Settings file name inside a settings directory
const SETTINGS_FILE: &str = "settings.json";

const DEFAULT_EDITOR: &str = "vi";
const DEFAULT_NOTEBOOK_COMMAND: &str = "jupyter notebook";

/// How favorites are opened
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenMode {
    /// Spawn the configured program with the file path appended
    Spawn,
    /// Print the path to stdout for shell integration
    Print,
}

/// Fully resolved CLI configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Open workspace roots, in priority order
    pub workspace_roots: Vec<PathBuf>,
    /// Settings file for the workspace target, if a workspace is open
    pub workspace_settings: Option<PathBuf>,
    /// Settings file for the global target
    pub global_settings: PathBuf,
    /// Editor program and leading arguments
    pub editor: Vec<String>,
    /// Notebook program and leading arguments
    pub notebook: Vec<String>,
    pub open_mode: OpenMode,
    pub test_mode: bool,
    /// Path or URI of the file the caller's editor has focused
    pub active_file: Option<String>,
}

/// CLI configuration loader
#[derive(Debug, Default)]
pub struct CliConfigLoader {
    workspace_overrides: Vec<PathBuf>,
    config_dir_override: Option<PathBuf>,
    editor_override: Option<String>,
    print_only: bool,
}

impl CliConfigLoader {
    /// Create a new loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an explicit workspace root
    pub fn with_workspace(mut self, root: PathBuf) -> Self {
        self.workspace_overrides.push(root);
        self
    }

    /// Set global settings directory override
    pub fn with_config_dir_override(mut self, dir: PathBuf) -> Self {
        self.config_dir_override = Some(dir);
        self
    }

    /// Set editor override
    pub fn with_editor_override(mut self, editor: String) -> Self {
        self.editor_override = Some(editor);
        self
    }

    /// Print paths instead of opening them
    pub fn with_print_only(mut self, print_only: bool) -> Self {
        self.print_only = print_only;
        self
    }

    /// Load and resolve configuration
    pub fn load(&self) -> Result<CliConfig> {
        let cwd = std::env::current_dir().context("Failed to read the working directory")?;

        // Step 1: Workspace roots
        let workspace_roots = self.resolve_workspace_roots(&cwd)?;
        let workspace_settings = workspace_roots
            .first()
            .map(|root| root.join(SETTINGS_DIR).join(SETTINGS_FILE));

        // Step 2: Global settings
        let global_settings = self.resolve_config_dir()?.join(SETTINGS_FILE);

        // Step 3: Programs used to open favorites
        let editor_line = self
            .editor_override
            .clone()
            .or_else(|| env_non_empty("VISUAL"))
            .or_else(|| env_non_empty("EDITOR"))
            .unwrap_or_else(|| DEFAULT_EDITOR.to_string());
        let notebook_line = env_non_empty("FAVES_NOTEBOOK_COMMAND")
            .unwrap_or_else(|| DEFAULT_NOTEBOOK_COMMAND.to_string());

        let open_mode = if self.print_only {
            OpenMode::Print
        } else {
            OpenMode::Spawn
        };

        Ok(CliConfig {
            workspace_roots,
            workspace_settings,
            global_settings,
            editor: split_command(&editor_line)?,
            notebook: split_command(&notebook_line)?,
            open_mode,
            test_mode: env_flag("FAVES_TEST_MODE"),
            active_file: env_non_empty("FAVES_ACTIVE_FILE"),
        })
    }

    fn resolve_workspace_roots(&self, cwd: &Path) -> Result<Vec<PathBuf>> {
        if !self.workspace_overrides.is_empty() {
            let mut roots = Vec::new();
            for root in &self.workspace_overrides {
                let root = absolutize(cwd, &expand_path(root)?);
                let root = root
                    .canonicalize()
                    .with_context(|| format!("Workspace folder not found: {}", root.display()))?;
                if !roots.contains(&root) {
                    roots.push(root);
                }
            }
            return Ok(roots);
        }

        let root = find_git_root(cwd).unwrap_or_else(|| cwd.to_path_buf());
        Ok(vec![root.canonicalize().unwrap_or(root)])
    }

    fn resolve_config_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.config_dir_override {
            return expand_path(dir);
        }
        if let Some(dir) = env_non_empty("FAVES_CONFIG_DIR") {
            return expand_path(Path::new(&dir));
        }
        get_xdg_config_dir()
            .map(|dir| dir.join("faves"))
            .ok_or_else(|| anyhow!("Could not determine a configuration directory; pass --config-dir"))
    }
}

/// Find git repository root
fn find_git_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join(".git").exists() {
            return Some(current);
        }

        if let Some(parent) = current.parent() {
            current = parent.to_path_buf();
        } else {
            break;
        }
    }

    None
}

/// Get XDG config directory
fn get_xdg_config_dir() -> Option<PathBuf> {
    env_non_empty("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
}

/// Expand `~` and environment variables in a path
fn expand_path(path: &Path) -> Result<PathBuf> {
    let raw = path.to_string_lossy();
    let expanded = shellexpand::full(&raw)
        .with_context(|| format!("Failed to expand path: {}", raw))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

pub(crate) fn absolutize(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Split a command line into program and arguments, resolving the program
/// on PATH when possible
fn split_command(line: &str) -> Result<Vec<String>> {
    let mut parts: Vec<String> = line.split_whitespace().map(str::to_string).collect();
    let program = parts
        .first_mut()
        .ok_or_else(|| anyhow!("Empty command: '{}'", line))?;

    let expanded = shellexpand::tilde(program.as_str()).into_owned();
    *program = match which::which(&expanded) {
        Ok(resolved) => resolved.to_string_lossy().into_owned(),
        Err(_) => expanded,
    };
    Ok(parts)
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn env_flag(name: &str) -> bool {
    matches!(
        env_non_empty(name).as_deref().map(str::trim),
        Some("1") | Some("true") | Some("yes")
    )
}
