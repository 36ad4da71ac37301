//! Persisted credential storage.
//!
//! The credential is the only state that survives a restart. Only the auth gate
//! and logout write to it.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::{env_non_empty, ENV_CREDENTIAL_PATH};
use crate::errors::SecureLinkError;

/// Fixed key the bearer credential lives under.
pub const CREDENTIAL_KEY: &str = "authToken";

pub const DEFAULT_CREDENTIAL_FILE: &str = "securelink-credentials.json";

pub trait CredentialStore {
    fn load(&self) -> Result<Option<String>, SecureLinkError>;
    fn save(&self, token: &str) -> Result<(), SecureLinkError>;
    fn clear(&self) -> Result<(), SecureLinkError>;
}

/// Key/value JSON file, the on-disk counterpart of browser local storage.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Uses `SECURELINK_CREDENTIAL_PATH`, falling back to `securelink-credentials.json`.
    pub fn from_env() -> Self {
        Self::new(
            env_non_empty(ENV_CREDENTIAL_PATH).unwrap_or_else(|| DEFAULT_CREDENTIAL_FILE.to_string()),
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, SecureLinkError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|e| SecureLinkError::Storage(e.to_string())),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(SecureLinkError::Storage(err.to_string())),
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), SecureLinkError> {
        let contents = serde_json::to_string_pretty(entries)
            .map_err(|e| SecureLinkError::Storage(e.to_string()))?;
        fs::write(&self.path, contents).map_err(|e| SecureLinkError::Storage(e.to_string()))
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<String>, SecureLinkError> {
        Ok(self
            .read_entries()?
            .remove(CREDENTIAL_KEY)
            .filter(|token| !token.is_empty()))
    }

    fn save(&self, token: &str) -> Result<(), SecureLinkError> {
        let mut entries = self.read_entries()?;
        entries.insert(CREDENTIAL_KEY.to_string(), token.to_string());
        self.write_entries(&entries)
    }

    fn clear(&self) -> Result<(), SecureLinkError> {
        let mut entries = self.read_entries()?;
        if entries.remove(CREDENTIAL_KEY).is_none() {
            return Ok(());
        }
        self.write_entries(&entries)
    }
}

/// In-process store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    token: RefCell<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: RefCell::new(Some(token.to_string())),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<String>, SecureLinkError> {
        Ok(self.token.borrow().clone())
    }

    fn save(&self, token: &str) -> Result<(), SecureLinkError> {
        *self.token.borrow_mut() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), SecureLinkError> {
        self.token.borrow_mut().take();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("creds.json");

        let store = FileCredentialStore::new(&path);
        assert_eq!(store.load().unwrap(), None);
        store.save("jwt-1").unwrap();

        let reopened = FileCredentialStore::new(&path);
        assert_eq!(reopened.load().unwrap().as_deref(), Some("jwt-1"));

        reopened.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn file_store_keeps_unrelated_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("creds.json");
        fs::write(&path, r#"{"theme":"dark"}"#).unwrap();

        let store = FileCredentialStore::new(&path);
        store.save("jwt").unwrap();
        store.clear().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("theme"));
        assert!(!contents.contains(CREDENTIAL_KEY));
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("creds.json");
        fs::write(&path, "not json").unwrap();

        let store = FileCredentialStore::new(&path);
        assert!(matches!(store.load(), Err(SecureLinkError::Storage(_))));
    }

    #[test]
    fn memory_store() {
        let store = MemoryCredentialStore::with_token("abc");
        assert_eq!(store.load().unwrap().as_deref(), Some("abc"));
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
