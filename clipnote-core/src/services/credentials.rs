//! File-backed credential persistence
//!
//! Credentials are stored as plain JSON in the platform data directory so
//! a session survives restarts. Failure to load is never fatal to the
//! caller; the session simply starts anonymous.

use std::fs;
use std::io;
use std::path::PathBuf;

use clipnote_model::SavedCredentials;
use directories::ProjectDirs;

use crate::error::StorageError;
use crate::services::traits::CredentialStore;

const CREDENTIALS_FILE: &str = "credentials.json";

/// Stores credentials in a JSON file under the platform data directory
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Create a store rooted at the platform data directory
    pub fn new() -> Result<Self, StorageError> {
        let dirs = ProjectDirs::from("", "clipnote", "clipnote").ok_or_else(|| {
            StorageError::InitFailed("could not determine data directory".to_string())
        })?;
        let dir = dirs.data_dir().to_path_buf();
        fs::create_dir_all(&dir).map_err(StorageError::WriteFailed)?;
        Ok(Self {
            path: dir.join(CREDENTIALS_FILE),
        })
    }

    /// Create a store backed by an explicit file path
    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<SavedCredentials>, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::ReadFailed(e)),
        };
        let credentials =
            serde_json::from_str(&contents).map_err(|_| StorageError::CorruptedData)?;
        Ok(Some(credentials))
    }

    fn save(&self, credentials: &SavedCredentials) -> Result<(), StorageError> {
        let contents = serde_json::to_string_pretty(credentials)
            .map_err(|e| StorageError::WriteFailed(io::Error::other(e)))?;
        fs::write(&self.path, contents).map_err(StorageError::WriteFailed)
    }

    fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::WriteFailed(e)),
        }
    }
}
