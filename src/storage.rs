//! a small durable key/value store kept as a json object of strings on disk

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::PathBuf;

pub const USER_KEY: &str = "user";
pub const THEME_KEY: &str = "theme";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to access storage file \"{}\": {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("storage file \"{}\" is not a json object of strings: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug)]
pub struct LocalStorage {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl LocalStorage {
    /// opens the storage file. a missing file is an empty storage
    pub fn load<P>(path: P) -> Result<Self, StorageError>
    where
        P: Into<PathBuf>
    {
        let path = path.into();

        let items = match std::fs::read(&path) {
            Ok(bytes) if bytes.iter().all(|b| b.is_ascii_whitespace()) => BTreeMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| StorageError::Json {
                path: path.clone(),
                source
            })?,
            Err(err) if err.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StorageError::Io { path, source }),
        };

        Ok(LocalStorage { path, items })
    }

    pub fn get_item(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(|v| v.as_str())
    }

    pub fn set_item<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.items.insert(key.into(), value.into());
    }

    pub fn remove_item(&mut self, key: &str) -> Option<String> {
        self.items.remove(key)
    }

    /// drops every key not listed
    pub fn retain_keys(&mut self, keep: &[&str]) {
        self.items.retain(|key, _| keep.contains(&key.as_str()));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn save(&self) -> Result<(), StorageError> {
        let file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .map_err(|source| StorageError::Io {
                path: self.path.clone(),
                source
            })?;
        let writer = std::io::BufWriter::new(file);

        serde_json::to_writer_pretty(writer, &self.items).map_err(|source| StorageError::Json {
            path: self.path.clone(),
            source
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::load(dir.path().join("storage.json")).unwrap();

        assert_eq!(storage.len(), 0);
        assert_eq!(storage.get_item(THEME_KEY), None);
    }

    #[test]
    fn items_survive_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let mut storage = LocalStorage::load(&path).unwrap();
        storage.set_item(THEME_KEY, "dark");
        storage.set_item(USER_KEY, "{}");
        storage.save().unwrap();

        let mut reloaded = LocalStorage::load(&path).unwrap();
        assert_eq!(reloaded.get_item(THEME_KEY), Some("dark"));

        reloaded.retain_keys(&[THEME_KEY]);
        assert_eq!(reloaded.get_item(USER_KEY), None);
        assert_eq!(reloaded.len(), 1);
    }

    #[test]
    fn garbage_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        std::fs::write(&path, "[1, 2").unwrap();

        assert!(matches!(LocalStorage::load(&path), Err(StorageError::Json { .. })));
    }
}
