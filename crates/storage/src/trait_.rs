//! Storage trait abstraction.

use std::path::Path;
use async_trait::async_trait;

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Item not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// The documents kept in the data directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Document {
    /// Learner progress
    Progress,
    /// Application settings
    Settings,
}

impl Document {
    /// Logical name of the document.
    pub fn name(&self) -> &'static str {
        match self {
            Document::Progress => "progress",
            Document::Settings => "settings",
        }
    }

    /// File name the document is stored under.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.name())
    }
}

impl std::fmt::Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Storage abstraction for Wordwise data.
///
/// Documents are opaque JSON values here; validation and migration happen in
/// the caller. Every call is a single attempt with no retries.
#[async_trait]
pub trait Storage: Send + Sync {
    // === Named documents ===

    /// Save a document (create or overwrite).
    async fn save_document(&mut self, doc: Document, value: &serde_json::Value) -> Result<()>;

    /// Load a document, `None` if it was never saved.
    async fn load_document(&self, doc: Document) -> Result<Option<serde_json::Value>>;

    /// Remove a stored document. Missing documents are not an error.
    async fn delete_document(&mut self, doc: Document) -> Result<()>;

    // === User-chosen files ===

    /// Write a JSON value to an arbitrary path (export).
    async fn write_file(&self, path: &Path, value: &serde_json::Value) -> Result<()>;

    /// Read the raw text of an arbitrary file (import).
    async fn read_file(&self, path: &Path) -> Result<String>;
}
