//! Persistence for the chat transcript.
//!
//! The transcript lives under a single key as a JSON array of messages.
//! Native builds keep one JSON file per key in the app data directory, the
//! web build keeps it in the browser's `localStorage`, and tests use the
//! in-memory store.

use crate::types::ChatMessage;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[cfg(not(target_arch = "wasm32"))]
use std::{fs, path::PathBuf};

pub const CHAT_HISTORY_KEY: &str = "chatHistory";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage io failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored transcript is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage lock poisoned")]
    Poisoned,

    #[error("browser storage unavailable: {0}")]
    Browser(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Key-value storage for raw string blobs.
pub trait MessageStore: Send + Sync {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Reads the transcript; a missing key is an empty conversation.
    fn load(&self) -> StorageResult<Vec<ChatMessage>> {
        match self.get(CHAT_HISTORY_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, messages: &[ChatMessage]) -> StorageResult<()> {
        let raw = serde_json::to_string(messages)?;
        self.set(CHAT_HISTORY_KEY, &raw)
    }
}

impl<S: MessageStore + ?Sized> MessageStore for Arc<S> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }
}

#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MessageStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key inside `dir`.
#[cfg(not(target_arch = "wasm32"))]
pub struct FileStore {
    dir: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl MessageStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// Store used by the running app.
#[cfg(not(target_arch = "wasm32"))]
pub fn default_store(config: &crate::config::Config) -> Box<dyn MessageStore> {
    Box::new(FileStore::new(config.storage_dir()))
}

/// The page's `localStorage`, looked up on every access.
///
/// `web_sys::Storage` is tied to the JS thread, so nothing is cached here.
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> StorageResult<web_sys::Storage> {
        let window =
            web_sys::window().ok_or_else(|| StorageError::Browser("no window".to_string()))?;
        window
            .local_storage()
            .map_err(|err| StorageError::Browser(format!("{err:?}")))?
            .ok_or_else(|| StorageError::Browser("localStorage disabled".to_string()))
    }
}

#[cfg(target_arch = "wasm32")]
impl MessageStore for LocalStorageStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Self::storage()?
            .get_item(key)
            .map_err(|err| StorageError::Browser(format!("{err:?}")))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|err| StorageError::Browser(format!("{err:?}")))
    }
}

#[cfg(target_arch = "wasm32")]
pub fn default_store(_config: &crate::config::Config) -> Box<dyn MessageStore> {
    Box::new(LocalStorageStore)
}
