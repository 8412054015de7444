//! Settings persisted as a flat TOML table.

use std::fs;
use std::path::PathBuf;
use parley_lib::storage::KeyValueStore;
use toml::{Table, Value};
use tracing::debug;
use crate::error::AppError;

/// Key-value storage backed by a TOML file.
pub struct TomlFileStore {
    path: PathBuf,
    table: Table,
}

impl TomlFileStore {

    /// Open the file, a missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();

        let table: Table = if fs::exists(&path)? {
            toml::from_str(&fs::read_to_string(&path)?)?
        } else {
            Table::new()
        };

        debug!(path = %path.display(), entries = table.len(), "settings file opened");

        Ok(TomlFileStore { path, table })
    }

    fn save(&self) -> Result<(), AppError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }

        fs::write(&self.path, toml::to_string(&self.table)?)?;

        // The file holds the API key.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }
}

impl KeyValueStore for TomlFileStore {

    fn get(&self, key: &str) -> Option<String> {
        self.table.get(key)
            .and_then(Value::as_str)
            .map(str::to_owned)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), parley_lib::Error> {
        self.set_many(&[(key, value)])
    }

    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<(), parley_lib::Error> {
        let previous = self.table.clone();

        for (key, value) in entries {
            self.table.insert((*key).to_owned(), Value::String((*value).to_owned()));
        }

        self.save().map_err(|err| {
            self.table = previous;
            parley_lib::Error::Storage(format!("{}: {}", self.path.display(), err))
        })
    }
}
