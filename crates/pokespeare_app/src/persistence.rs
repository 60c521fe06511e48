use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use engine_logging::{engine_debug, engine_error, engine_info, engine_warn};
use pokespeare_core::ComposedResult;
use pokespeare_engine::{BlobWriter, PersistError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Storage key of the durable state blob.
pub const STATE_KEY: &str = "persistence.state";

/// Named binary blobs.
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PersistError>;
    /// Stores `value` under `key`; `None` removes the blob.
    fn set(&self, key: &str, value: Option<&[u8]>) -> Result<(), PersistError>;
}

/// One file per key inside a directory, replaced atomically on every write.
#[derive(Debug, Clone)]
pub struct FileStorage {
    writer: BlobWriter,
}

impl FileStorage {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            writer: BlobWriter::new(dir),
        }
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PersistError> {
        self.writer.read(key)
    }

    fn set(&self, key: &str, value: Option<&[u8]>) -> Result<(), PersistError> {
        match value {
            Some(bytes) => self.writer.write(key, bytes).map(|_| ()),
            None => self.writer.remove(key),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PersistError> {
        let blobs = self.blobs.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(blobs.get(key).cloned())
    }

    fn set(&self, key: &str, value: Option<&[u8]>) -> Result<(), PersistError> {
        let mut blobs = self.blobs.lock().unwrap_or_else(PoisonError::into_inner);
        match value {
            Some(bytes) => blobs.insert(key.to_string(), bytes.to_vec()),
            None => blobs.remove(key),
        };
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("state blob is not utf-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("state blob could not be parsed: {0}")]
    Parse(String),
    #[error("state could not be serialized: {0}")]
    Serialize(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedFavorite {
    name: String,
    artwork: Option<String>,
    description: String,
    sprite: Option<String>,
}

/// Everything that survives a restart. Session fields are deliberately absent.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedState {
    favorites: Vec<PersistedFavorite>,
}

pub fn encode_favorites(favorites: &[ComposedResult]) -> Result<Vec<u8>, CodecError> {
    let state = PersistedState {
        favorites: favorites
            .iter()
            .map(|favorite| PersistedFavorite {
                name: favorite.name.clone(),
                artwork: favorite.artwork.as_ref().map(Url::to_string),
                description: favorite.description.clone(),
                sprite: favorite.sprite.as_ref().map(Url::to_string),
            })
            .collect(),
    };

    let pretty = ron::ser::PrettyConfig::new();
    ron::ser::to_string_pretty(&state, pretty)
        .map(String::into_bytes)
        .map_err(|err| CodecError::Serialize(err.to_string()))
}

pub fn decode_favorites(bytes: &[u8]) -> Result<Vec<ComposedResult>, CodecError> {
    let text = std::str::from_utf8(bytes)?;
    let state: PersistedState =
        ron::from_str(text).map_err(|err| CodecError::Parse(err.to_string()))?;

    Ok(state
        .favorites
        .into_iter()
        .map(|favorite| ComposedResult {
            artwork: parse_stored_url(&favorite.name, favorite.artwork),
            sprite: parse_stored_url(&favorite.name, favorite.sprite),
            name: favorite.name,
            description: favorite.description,
        })
        .collect())
}

fn parse_stored_url(owner: &str, raw: Option<String>) -> Option<Url> {
    let raw = raw?;
    match Url::parse(&raw) {
        Ok(url) => Some(url),
        Err(err) => {
            engine_warn!("Dropping stored url {:?} of {}: {}", raw, owner, err);
            None
        }
    }
}

/// Favorites saved under [`STATE_KEY`]. Missing or unreadable state yields none.
pub fn load_favorites(storage: &dyn Storage) -> Vec<ComposedResult> {
    let bytes = match storage.get(STATE_KEY) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            engine_debug!("No persisted state under {}", STATE_KEY);
            return Vec::new();
        }
        Err(err) => {
            engine_warn!("Failed to read persisted state: {}", err);
            return Vec::new();
        }
    };

    match decode_favorites(&bytes) {
        Ok(favorites) => {
            engine_info!("Loaded {} persisted favorites", favorites.len());
            favorites
        }
        Err(err) => {
            engine_warn!("Ignoring persisted state: {}", err);
            Vec::new()
        }
    }
}

/// Best-effort write of the favorites; failures are logged and dropped.
pub fn save_favorites(storage: &dyn Storage, favorites: &[ComposedResult]) {
    let bytes = match encode_favorites(favorites) {
        Ok(bytes) => bytes,
        Err(err) => {
            engine_error!("Failed to serialize persisted state: {}", err);
            return;
        }
    };

    if let Err(err) = storage.set(STATE_KEY, Some(&bytes)) {
        engine_error!("Failed to write persisted state: {}", err);
    }
}
