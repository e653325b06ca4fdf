//! JSON file storage implementation.
//!
//! Stores each document as a pretty-printed JSON file in a data directory,
//! e.g. `.wordwise/progress.json` and `.wordwise/settings.json`.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;
use super::{Document, Storage, StorageError, Result};

/// File-based JSON storage backend.
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    /// Create storage rooted at `root`, creating the directory if needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    fn document_path(&self, doc: Document) -> PathBuf {
        self.root.join(doc.file_name())
    }
}

#[async_trait::async_trait]
impl Storage for JsonStorage {
    async fn save_document(&mut self, doc: Document, value: &serde_json::Value) -> Result<()> {
        let path = self.document_path(doc);
        write_json(&path, value).await?;
        debug!(document = %doc, path = %path.display(), "saved document");
        Ok(())
    }

    async fn load_document(&self, doc: Document) -> Result<Option<serde_json::Value>> {
        let path = self.document_path(doc);
        let value = read_json(&path).await?;
        debug!(document = %doc, found = value.is_some(), "loaded document");
        Ok(value)
    }

    async fn delete_document(&mut self, doc: Document) -> Result<()> {
        fs::remove_file(self.document_path(doc)).await.or_else(|e| {
            if e.kind() == std::io::ErrorKind::NotFound { Ok(()) } else { Err(e) }
        })?;
        Ok(())
    }

    async fn write_file(&self, path: &Path, value: &serde_json::Value) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        write_json(path, value).await?;
        debug!(path = %path.display(), "exported file");
        Ok(())
    }

    async fn read_file(&self, path: &Path) -> Result<String> {
        match fs::read_to_string(path).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(path.display().to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

async fn write_json(path: &Path, value: &serde_json::Value) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json.as_bytes()).await?;
    Ok(())
}

async fn read_json(path: &Path) -> Result<Option<serde_json::Value>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
