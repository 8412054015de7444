//! Durable key-value storage for settings.

use std::collections::HashMap;
use crate::error::Error;

/// Key-value storage capability.
pub trait KeyValueStore {
    /// Read value by key.
    fn get(&self, key: &str) -> Option<String>;

    /// Write value by key.
    fn set(&mut self, key: &str, value: &str) -> Result<(), Error>;

    /// Write several values, all or none of them.
    /// The default implementation writes one by one and stops at the first failure.
    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<(), Error> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}

/// Non-persistent storage.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {

    /// Create empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage with initial values.
    pub fn with_values(values: &[(&str, &str)]) -> Self {
        MemoryStore {
            values: values.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect(),
        }
    }
}

impl KeyValueStore for MemoryStore {

    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
