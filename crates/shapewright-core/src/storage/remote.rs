//! Remote document store reached through an explicit session.
//!
//! The transport itself is abstracted by [`RemoteStore`]: it moves the list of
//! encoded lines and reports failures. [`RemoteSession`] holds the connection
//! state and refuses to talk to the store while disconnected.

use super::{PersistenceError, PersistenceResult};
use crate::codec;
use crate::config::RemoteConfig;
use crate::document::Document;

/// State of a remote session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
}

/// A store holding one document as encoded lines.
pub trait RemoteStore {
    /// Open the transport to `config`. The default accepts any address.
    fn connect(&mut self, config: &RemoteConfig) -> PersistenceResult<()> {
        let _ = config;
        Ok(())
    }

    /// Close the transport.
    fn disconnect(&mut self) {}

    /// Replace the stored document.
    fn save_lines(&mut self, lines: &[String]) -> PersistenceResult<()>;

    /// Fetch the stored document. Empty when nothing was saved.
    fn load_lines(&mut self) -> PersistenceResult<Vec<String>>;
}

/// In-process remote store, mainly for tests and offline use.
#[derive(Debug, Default, Clone)]
pub struct MemoryRemoteStore {
    lines: Vec<String>,
    /// When set, connecting fails as if the host refused.
    pub refuse_connections: bool,
}

impl MemoryRemoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines currently stored.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl RemoteStore for MemoryRemoteStore {
    fn connect(&mut self, config: &RemoteConfig) -> PersistenceResult<()> {
        if self.refuse_connections {
            return Err(PersistenceError::Unreachable(format!(
                "connection refused by {}",
                config.address()
            )));
        }
        Ok(())
    }

    fn save_lines(&mut self, lines: &[String]) -> PersistenceResult<()> {
        self.lines = lines.to_vec();
        Ok(())
    }

    fn load_lines(&mut self) -> PersistenceResult<Vec<String>> {
        Ok(self.lines.clone())
    }
}

/// Connection to a remote store.
pub struct RemoteSession<S: RemoteStore> {
    store: S,
    config: RemoteConfig,
    state: ConnectionState,
}

impl<S: RemoteStore> RemoteSession<S> {
    /// Create a disconnected session.
    pub fn new(store: S, config: RemoteConfig) -> Self {
        Self {
            store,
            config,
            state: ConnectionState::Disconnected,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Connect to the configured address. Reconnecting is a no-op.
    pub fn connect(&mut self) -> PersistenceResult<()> {
        if self.is_connected() {
            return Ok(());
        }
        self.store.connect(&self.config)?;
        self.state = ConnectionState::Connected;
        log::info!("Connected to remote store at {}", self.config.address());
        Ok(())
    }

    pub fn disconnect(&mut self) {
        if self.is_connected() {
            self.store.disconnect();
            self.state = ConnectionState::Disconnected;
            log::info!("Disconnected from remote store");
        }
    }

    /// Upload a document.
    pub fn save(&mut self, document: &Document) -> PersistenceResult<()> {
        self.ensure_connected()?;
        let lines = codec::encode_lines(document);
        self.store.save_lines(&lines)?;
        log::info!("Saved {} shapes to remote store", document.len());
        Ok(())
    }

    /// Download the stored document.
    pub fn load(&mut self) -> PersistenceResult<Document> {
        self.ensure_connected()?;
        let lines = self.store.load_lines()?;
        if lines.is_empty() {
            return Err(PersistenceError::NotFound(
                "remote store holds no document".to_string(),
            ));
        }
        let document = codec::decode_lines(&lines)?;
        log::info!("Loaded {} shapes from remote store", document.len());
        Ok(document)
    }

    fn ensure_connected(&self) -> PersistenceResult<()> {
        if self.is_connected() {
            Ok(())
        } else {
            Err(PersistenceError::Unreachable(
                "not connected to the remote store".to_string(),
            ))
        }
    }
}
