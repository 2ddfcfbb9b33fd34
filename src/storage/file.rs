// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON-file backed persistent store.
//!
//! The whole map is rewritten on every mutation, and a change is visible to
//! readers only once the file write succeeded. A missing or corrupt file
//! loads as empty, which the auth module reads as "no session".
//!
//! The file is a few hundred bytes, so writes stay synchronous.

use super::KeyValueStore;
use crate::error::{AppError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "Discarding corrupt session store");
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };

        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| AppError::Storage("session store lock poisoned".to_string()))
    }

    /// Apply `f` to a copy, persist it, and only then make it visible.
    fn mutate(&self, f: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<()> {
        let mut entries = self.lock()?;
        let mut next = entries.clone();
        f(&mut next);

        self.persist(&next)?;
        *entries = next;
        Ok(())
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let raw =
            serde_json::to_string_pretty(entries).map_err(|e| AppError::Storage(e.to_string()))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| AppError::Storage(e.to_string()))?;
        }
        fs::write(&self.path, raw).map_err(|e| AppError::Storage(e.to_string()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.mutate(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.mutate(|entries| {
            entries.remove(key);
        })
    }

    /// Drops the keys from memory even if the file cannot be rewritten, so
    /// an ended session stays ended for this process.
    fn remove_all(&self, keys: &[&str]) -> Result<()> {
        let mut entries = self.lock()?;
        for key in keys {
            entries.remove(*key);
        }
        self.persist(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::keys;

    #[test]
    fn survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = FileStore::open(&path);
        store.set(keys::ACCESS_TOKEN, "token-1").unwrap();
        store.set(keys::TOKEN_EXPIRY, "1700000000000").unwrap();
        drop(store);

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get(keys::ACCESS_TOKEN).as_deref(), Some("token-1"));

        reopened.remove(keys::ACCESS_TOKEN).unwrap();
        assert!(FileStore::open(&path).get(keys::ACCESS_TOKEN).is_none());
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        let store = FileStore::open(&path);
        assert!(store.get(keys::ACCESS_TOKEN).is_none());
        store.set(keys::ACCESS_TOKEN, "fresh").unwrap();
        assert_eq!(store.get(keys::ACCESS_TOKEN).as_deref(), Some("fresh"));
    }

    #[test]
    fn failed_write_leaves_entries_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileStore::open(&path);
        store.set(keys::ACCESS_TOKEN, "token-1").unwrap();

        // A directory in place of the file makes every write fail.
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        assert!(store.set(keys::ACCESS_TOKEN, "token-2").is_err());
        assert_eq!(store.get(keys::ACCESS_TOKEN).as_deref(), Some("token-1"));
        assert!(store.remove(keys::ACCESS_TOKEN).is_err());
        assert_eq!(store.get(keys::ACCESS_TOKEN).as_deref(), Some("token-1"));
    }

    #[test]
    fn remove_all_clears_memory_when_write_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileStore::open(&path);
        store.set(keys::ACCESS_TOKEN, "token-1").unwrap();
        store.set(keys::TOKEN_EXPIRY, "1700000000000").unwrap();

        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        assert!(store.remove_all(&keys::SESSION).is_err());
        for key in keys::SESSION {
            assert!(store.get(key).is_none());
        }
    }
}
