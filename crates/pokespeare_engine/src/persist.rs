use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use engine_logging::engine_debug;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("storage directory unusable: {0}")]
    StorageDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Creates `dir` if needed. An existing non-directory at that path is an error.
pub fn ensure_storage_dir(dir: &Path) -> Result<(), PersistError> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(PersistError::StorageDir(format!(
            "{} is not a directory",
            dir.display()
        ))),
        Err(err) if err.kind() == io::ErrorKind::NotFound => fs::create_dir_all(dir)
            .map_err(|err| PersistError::StorageDir(format!("{}: {err}", dir.display()))),
        Err(err) => Err(PersistError::StorageDir(format!("{}: {err}", dir.display()))),
    }
}

/// Key-addressed blobs, one file per key under a storage directory.
///
/// Readers never observe a half-written blob: content lands in a temp file in the
/// same directory and replaces the old file in one rename.
#[derive(Debug, Clone)]
pub struct BlobWriter {
    dir: PathBuf,
}

impl BlobWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Replaces the blob stored under `key` and returns its path.
    pub fn write(&self, key: &str, content: &[u8]) -> Result<PathBuf, PersistError> {
        ensure_storage_dir(&self.dir)?;
        let target = self.blob_path(key);

        let mut staged = NamedTempFile::new_in(&self.dir)?;
        staged.write_all(content)?;
        staged.as_file().sync_all()?;
        staged
            .persist(&target)
            .map_err(|err| PersistError::Io(err.error))?;

        engine_debug!("Stored {} bytes under {:?}", content.len(), target);
        Ok(target)
    }

    pub fn read(&self, key: &str) -> Result<Option<Vec<u8>>, PersistError> {
        absent_as_none(fs::read(self.blob_path(key)))
    }

    /// Deletes the blob under `key`, if any.
    pub fn remove(&self, key: &str) -> Result<(), PersistError> {
        absent_as_none(fs::remove_file(self.blob_path(key))).map(|_| ())
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

fn absent_as_none<T>(outcome: io::Result<T>) -> Result<Option<T>, PersistError> {
    match outcome {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(PersistError::Io(err)),
    }
}
