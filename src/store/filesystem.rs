//! Lock store on the local (or a shared) filesystem.
//!
//! # Layouts
//!
//! - **Directory**: one file per key, named `<sha256(key)>.lock`, under a
//!   configured directory. Hashing keeps arbitrary ids safe as file names.
//! - **Single file**: one explicit path holding the lock for
//!   [`DEFAULT_LOCK_KEY`] only. Any other key is rejected, so distinct ids
//!   can never share the file.
//!
//! A missing file or missing directory reads as an absent lock. Any other
//! I/O failure is a store fault.

use super::LockStore;
use crate::error::{LatchError, Result};
use crate::fs::atomic_write;
use crate::locks::{DEFAULT_LOCK_KEY, Lock};
use crate::serialiser::{JsonLockSerialiser, LockSerialiser};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
enum Layout {
    Directory(PathBuf),
    SingleFile(PathBuf),
}

/// Lock store persisting serialised locks to files.
pub struct FilesystemLockStore {
    layout: Layout,
    serialiser: Box<dyn LockSerialiser>,
}

impl FilesystemLockStore {
    /// One file per key under `dir`, JSON encoded.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            layout: Layout::Directory(dir.into()),
            serialiser: Box::new(JsonLockSerialiser),
        }
    }

    /// The default-key lock stored in the single file at `path`, JSON encoded.
    pub fn single_file(path: impl Into<PathBuf>) -> Self {
        Self {
            layout: Layout::SingleFile(path.into()),
            serialiser: Box::new(JsonLockSerialiser),
        }
    }

    /// Replace the serialiser.
    pub fn with_serialiser(mut self, serialiser: impl LockSerialiser + 'static) -> Self {
        self.serialiser = Box::new(serialiser);
        self
    }

    /// Path of the file backing `key`.
    ///
    /// The single-file layout only serves [`DEFAULT_LOCK_KEY`].
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        match &self.layout {
            Layout::Directory(dir) => Ok(dir.join(format!("{}.lock", hash_key(key)))),
            Layout::SingleFile(path) if key == DEFAULT_LOCK_KEY => Ok(path.clone()),
            Layout::SingleFile(path) => Err(LatchError::Store(format!(
                "lock file '{}' only holds the default lock, not '{}'",
                path.display(),
                key
            ))),
        }
    }
}

impl std::fmt::Debug for FilesystemLockStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilesystemLockStore")
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

impl LockStore for FilesystemLockStore {
    fn read(&self, key: &str) -> Result<Lock> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => self.serialiser.unserialise(&bytes).map_err(|e| match e {
                LatchError::Serialisation(msg) => {
                    LatchError::Serialisation(format!("lock file '{}': {}", path.display(), msg))
                }
                other => other,
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Lock::Absent),
            Err(e) => Err(read_error(&path, e)),
        }
    }

    fn write(&self, key: &str, lock: &Lock) -> Result<()> {
        let bytes = self.serialiser.serialise(lock)?;
        atomic_write(self.path_for(key)?, &bytes)
    }

    fn delete(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(LatchError::Store(format!(
                "failed to delete lock file '{}': {}",
                path.display(),
                e
            ))),
        }
    }
}

fn hash_key(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn read_error(path: &Path, e: std::io::Error) -> LatchError {
    LatchError::Store(format!(
        "failed to read lock file '{}': {}",
        path.display(),
        e
    ))
}
