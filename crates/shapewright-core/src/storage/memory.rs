//! In-memory storage implementation.

use super::{PersistenceError, PersistenceResult, Storage};
use crate::codec;
use crate::document::Document;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use.
///
/// Documents are kept in their encoded text form, so loading goes through
/// the same decoder as files do.
#[derive(Default)]
pub struct MemoryStorage {
    documents: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_error(e: impl std::fmt::Display) -> PersistenceError {
        PersistenceError::Unknown(format!("Lock error: {e}"))
    }
}

impl Storage for MemoryStorage {
    fn save(&self, id: &str, document: &Document) -> PersistenceResult<()> {
        let text = codec::encode(document);
        let mut docs = self.documents.write().map_err(Self::lock_error)?;
        docs.insert(id.to_string(), text);
        Ok(())
    }

    fn load(&self, id: &str) -> PersistenceResult<Document> {
        let docs = self.documents.read().map_err(Self::lock_error)?;
        let text = docs
            .get(id)
            .ok_or_else(|| PersistenceError::NotFound(id.to_string()))?;
        Ok(codec::decode(text)?)
    }

    fn delete(&self, id: &str) -> PersistenceResult<()> {
        let mut docs = self.documents.write().map_err(Self::lock_error)?;
        docs.remove(id);
        Ok(())
    }

    fn list(&self) -> PersistenceResult<Vec<String>> {
        let docs = self.documents.read().map_err(Self::lock_error)?;
        Ok(docs.keys().cloned().collect())
    }

    fn exists(&self, id: &str) -> PersistenceResult<bool> {
        let docs = self.documents.read().map_err(Self::lock_error)?;
        Ok(docs.contains_key(id))
    }
}
