//! File-based storage: one text document per file.

use super::{PersistenceError, PersistenceResult, Storage};
use crate::codec;
use crate::document::Document;
use std::fs;
use std::path::{Path, PathBuf};

/// Extension of stored documents.
pub const DOCUMENT_EXTENSION: &str = "shapes";

/// Stores documents as `<id>.shapes` files in a directory.
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    /// Open a storage directory, creating it when missing.
    pub fn new(base_path: PathBuf) -> PersistenceResult<Self> {
        fs::create_dir_all(&base_path)?;
        Ok(Self { base_path })
    }

    /// Storage under the per-user data directory.
    ///
    /// On Unix: `~/.local/share/shapewright/documents/`
    /// On Windows: `%LOCALAPPDATA%\shapewright\documents\`
    pub fn default_location() -> PersistenceResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| {
                PersistenceError::Unknown("Could not determine home directory".to_string())
            })?;

        Self::new(base.join("shapewright").join("documents"))
    }

    /// File holding `id`. Characters outside `[A-Za-z0-9_-]` map to `_`.
    fn document_path(&self, id: &str) -> PathBuf {
        let stem: String = id
            .chars()
            .map(|c| match c {
                c if c.is_alphanumeric() => c,
                '-' | '_' => c,
                _ => '_',
            })
            .collect();
        self.base_path.join(format!("{stem}.{DOCUMENT_EXTENSION}"))
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Write a document to an arbitrary path.
    pub fn save_to_path(path: &Path, document: &Document) -> PersistenceResult<()> {
        fs::write(path, codec::encode(document))?;
        log::info!("Saved document to {}", path.display());
        Ok(())
    }

    /// Read a document from an arbitrary path.
    pub fn load_from_path(path: &Path) -> PersistenceResult<Document> {
        let text = fs::read_to_string(path)?;
        let document = codec::decode(&text)?;
        log::info!(
            "Loaded {} shapes from {}",
            document.len(),
            path.display()
        );
        Ok(document)
    }
}

impl Storage for FileStorage {
    fn save(&self, id: &str, document: &Document) -> PersistenceResult<()> {
        Self::save_to_path(&self.document_path(id), document)
    }

    fn load(&self, id: &str) -> PersistenceResult<Document> {
        let path = self.document_path(id);
        if !path.exists() {
            return Err(PersistenceError::NotFound(id.to_string()));
        }
        Self::load_from_path(&path)
    }

    fn delete(&self, id: &str) -> PersistenceResult<()> {
        let path = self.document_path(id);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    fn list(&self) -> PersistenceResult<Vec<String>> {
        let mut ids: Vec<String> = fs::read_dir(&self.base_path)?
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == DOCUMENT_EXTENSION))
            .filter_map(|path| path.file_stem()?.to_str().map(str::to_string))
            .collect();
        ids.sort();
        Ok(ids)
    }

    fn exists(&self, id: &str) -> PersistenceResult<bool> {
        Ok(self.document_path(id).exists())
    }
}
