//! CLI configuration

pub mod loader;

pub use loader::{CliConfig, CliConfigLoader, OpenMode};
