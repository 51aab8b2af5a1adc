use crate::domain::errors::StorageError;
use crate::domain::ports::KeyValueStore;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory store for tests and throwaway sessions. Data is lost on exit.
#[derive(Default)]
pub struct InMemoryKeyValueStore {
    values: RwLock<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a raw value (e.g. a corrupt document)
    pub fn with_raw(self, key: &str, value: &str) -> Self {
        if let Ok(mut values) = self.values.write() {
            values.insert(key.to_string(), value.to_string());
        }
        self
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.read().ok()?.get(key).cloned()
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
