//! # faves Core
//!
//! Core library for faves - bookmark files per workspace or globally and jump
//! back to them through a searchable picker or directly by alias.
//!
//! The host editor (configuration storage, prompts, the picker, document
//! opening) is abstracted behind the traits in [`host`]; this crate holds the
//! favorite stores, scope resolution and search logic that run on top of it.

// Core modules
pub mod commands;
pub mod error;
pub mod faves;
pub mod favorite;
pub mod host;
pub mod open;
pub mod scope;
pub mod search;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use commands::Command;
pub use error::{Error, Result};
pub use faves::{CommandOutcome, Faves, FavesConfig};
pub use favorite::{Favorite, FileHandle};
pub use host::EditorHost;
pub use open::OpenerRegistry;
pub use scope::Scope;
pub use search::{SearchOptions, SearchOutcome};
pub use store::{FavesStore, StoreUpdate};

/// Current version of the faves-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize tracing on stderr
///
/// `RUST_LOG` wins when set; otherwise `verbose` selects debug output and the
/// default shows warnings and errors only.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
