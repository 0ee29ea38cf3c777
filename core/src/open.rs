//! Scheme-keyed document opening

use crate::error::Result;
use crate::favorite::{schemes, FileHandle};
use crate::host::EditorHost;
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::debug;

/// Opens a resolved favorite location in the host
#[async_trait]
pub trait DocumentOpener: Send + Sync {
    /// Scheme this opener handles
    fn scheme(&self) -> &str;

    /// Open `location`
    async fn open(&self, host: &dyn EditorHost, location: &FileHandle) -> Result<()>;
}

/// Opens files in a text editor
pub struct TextDocumentOpener;

#[async_trait]
impl DocumentOpener for TextDocumentOpener {
    fn scheme(&self) -> &str {
        schemes::FILE
    }

    async fn open(&self, host: &dyn EditorHost, location: &FileHandle) -> Result<()> {
        host.show_text_document(location).await
    }
}

/// Opens notebook files in the notebook editor
pub struct NotebookOpener;

#[async_trait]
impl DocumentOpener for NotebookOpener {
    fn scheme(&self) -> &str {
        schemes::NOTEBOOK_CELL
    }

    async fn open(&self, host: &dyn EditorHost, location: &FileHandle) -> Result<()> {
        host.show_notebook_document(location).await
    }
}

/// Registry mapping schemes to openers, with a fallback for everything else
pub struct OpenerRegistry {
    openers: HashMap<String, Box<dyn DocumentOpener>>,
    fallback: Box<dyn DocumentOpener>,
}

impl OpenerRegistry {
    /// Create an empty registry that sends every scheme to `fallback`
    pub fn new(fallback: Box<dyn DocumentOpener>) -> Self {
        Self {
            openers: HashMap::new(),
            fallback,
        }
    }

    /// Register an opener under its scheme
    pub fn register(&mut self, opener: Box<dyn DocumentOpener>) {
        self.openers.insert(opener.scheme().to_string(), opener);
    }

    /// List the registered schemes
    pub(crate) fn schemes(&self) -> Vec<&str> {
        self.openers.keys().map(|s| s.as_str()).collect()
    }

    /// Open `location` with the opener registered for `scheme`
    ///
    /// Unknown or unrecorded schemes warn and fall back to a plain file open.
    pub async fn open(
        &self,
        host: &dyn EditorHost,
        scheme: Option<&str>,
        location: &FileHandle,
    ) -> Result<()> {
        match scheme.and_then(|scheme| self.openers.get(scheme)) {
            Some(opener) => {
                debug!("Opening {} with {} opener", location, opener.scheme());
                opener.open(host, location).await
            }
            None => {
                host.warning(&format!(
                    "Unknown scheme '{}'; opening as a file",
                    scheme.unwrap_or("undefined")
                ))
                .await;
                self.fallback.open(host, location).await
            }
        }
    }
}

impl Default for OpenerRegistry {
    fn default() -> Self {
        let mut registry = Self::new(Box::new(TextDocumentOpener));

        registry.register(Box::new(TextDocumentOpener));
        registry.register(Box::new(NotebookOpener));

        registry
    }
}
