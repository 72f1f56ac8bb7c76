use std::{
    collections::BTreeMap,
    path::PathBuf,
};

use tracing::debug;

use crate::{
    errors::Result,
    utils::{
        persistence::{ensure_dir, load_json_or_default, save_json},
        PathResolver,
    },
};

use super::KeyValueStore;

/// Durable store backed by a single JSON object on disk.
///
/// The whole map is cached in memory; every mutation rewrites the file
/// atomically so a crash never leaves a half-written store behind.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        let entries = load_json_or_default(&path)?;
        Ok(Self { path, entries })
    }

    /// Opens the store inside `root`, or inside the default home when `None`.
    pub fn open_in(root: Option<PathBuf>) -> Result<Self> {
        let base = PathResolver::resolve_base(root);
        Self::open(PathResolver::storage_file_in(&base))
    }

    fn flush(&self) -> Result<()> {
        save_json(&self.entries, &self.path)?;
        debug!(path = %self.path.display(), keys = self.entries.len(), "durable store written");
        Ok(())
    }
}

impl KeyValueStore for JsonStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.entries.get(key).map(String::as_str) == Some(value) {
            return Ok(());
        }
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{KEY_AUTHENTICATED, KEY_USER_PIN};

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let mut store = JsonStore::open(&path).unwrap();
        store.set_flag(KEY_AUTHENTICATED, true).unwrap();
        store.set(KEY_USER_PIN, "4321").unwrap();

        let reopened = JsonStore::open(&path).unwrap();
        assert!(reopened.get_flag(KEY_AUTHENTICATED).unwrap());
        assert_eq!(reopened.get(KEY_USER_PIN).unwrap().as_deref(), Some("4321"));
    }

    #[test]
    fn remove_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let mut store = JsonStore::open(&path).unwrap();
        store.set(KEY_USER_PIN, "4321").unwrap();
        store.remove(KEY_USER_PIN).unwrap();

        let reopened = JsonStore::open(&path).unwrap();
        assert_eq!(reopened.get(KEY_USER_PIN).unwrap(), None);
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "not json").unwrap();

        let err = JsonStore::open(&path).expect_err("corrupt store must fail");
        assert!(format!("{err}").starts_with("Persistence error"));
    }
}
