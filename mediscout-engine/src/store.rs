//! String key-value stores backing the cohort cache and the account list.
//!
//! Values are JSON text, mirroring browser `localStorage`. The wasm bridge
//! provides a `localStorage` implementation; natively use [`MemoryStore`] or
//! [`JsonFileStore`].

use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use mediscout_core::MediscoutError;

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<(), MediscoutError>;
    fn remove(&mut self, key: &str) -> Result<(), MediscoutError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), MediscoutError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), MediscoutError> {
        (**self).remove(key)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), MediscoutError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), MediscoutError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// All entries kept in one JSON object on disk, rewritten on every change.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Opens the store at `path`. A missing file is an empty store; an
    /// unreadable one is an error rather than silently discarded.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, MediscoutError> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let data = fs::read_to_string(&path).map_err(|err| {
                MediscoutError::Storage(format!("Failed to read {}: {err}", path.display()))
            })?;
            serde_json::from_str(&data).map_err(|err| {
                MediscoutError::Serialization(format!("Invalid store {}: {err}", path.display()))
            })?
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), MediscoutError> {
        let serialized = serde_json::to_vec_pretty(&self.entries)
            .map_err(|err| MediscoutError::Serialization(err.to_string()))?;

        // Write a sibling temp file, then rename it over the store.
        let temp_path = self.path.with_extension("tmp");
        let mut file = File::create(&temp_path)
            .map_err(|err| MediscoutError::Storage(format!("Failed to create file: {err}")))?;
        file.write_all(&serialized)
            .map_err(|err| MediscoutError::Storage(format!("Failed to write data: {err}")))?;
        file.sync_all()
            .map_err(|err| MediscoutError::Storage(format!("Failed to sync data: {err}")))?;
        fs::rename(&temp_path, &self.path)
            .map_err(|err| MediscoutError::Storage(format!("Failed to rename file: {err}")))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), MediscoutError> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), MediscoutError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}
