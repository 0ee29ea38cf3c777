//! Error types and handling for faves core

use thiserror::Error;

/// Result type alias for faves operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for faves core
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Handle to key resolution errors
    #[error("{0}")]
    Resolve(#[from] ResolveError),

    /// Errors reported by the host editor
    #[error("Host error: {0}")]
    Host(#[from] HostError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to write {key}: {message}")]
    WriteFailed { key: String, message: String },

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("No workspace is open")]
    NoWorkspace,
}

/// Errors raised while translating a file handle into a favorite key
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("No active file")]
    NoActiveFile,

    #[error("File is not in a workspace folder")]
    NotInWorkspace,

    #[error("Unsupported file scheme: {scheme}")]
    UnsupportedScheme { scheme: String },

    #[error("Invalid file reference: {input}")]
    InvalidHandle { input: String },
}

/// Errors surfaced by host collaborators (document opening, UI)
#[derive(Error, Debug)]
pub enum HostError {
    #[error("Failed to open {path}: {message}")]
    OpenFailed { path: String, message: String },

    #[error("Unknown command: {id}")]
    UnknownCommand { id: String },

    #[error("Invalid arguments for {id}: {message}")]
    InvalidArguments { id: String, message: String },
}
