//! File-backed state store
//!
//! This module provides the properties-file implementation of the
//! `StateStore` trait.

use crate::store::traits::{StateStore, StoreError, StoreResult};
use crate::store::Properties;
use chrono::Utc;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// State store backed by a single properties file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Opens the state file, creating it and its directory if needed
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the properties file
    ///
    /// # Returns
    ///
    /// * `Ok(FileStore)` - The file exists and is a regular file
    /// * `Err(StoreError)` - The path or its parent is occupied by something
    ///   else, or could not be created
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if parent.exists() && !parent.is_dir() {
                return Err(StoreError::NotADirectory(parent.to_path_buf()));
            }
            if !parent.exists() {
                tracing::info!("Creating state directory {}", parent.display());
                fs::create_dir_all(parent)?;
            }
        }

        if path.exists() && !path.is_file() {
            return Err(StoreError::NotAFile(path.to_path_buf()));
        }

        if !path.exists() {
            tracing::info!("Creating empty state file {}", path.display());
            fs::File::create(path)?;
        }

        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn directory(&self) -> &Path {
        self.path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    }
}

impl StateStore for FileStore {
    fn load(&self) -> StoreResult<Properties> {
        let text = fs::read_to_string(&self.path)?;
        let properties = Properties::parse(&text)?;
        tracing::debug!(
            "Loaded {} entries from {}",
            properties.len(),
            self.path.display()
        );
        Ok(properties)
    }

    /// Writes the mapping to a temp file in the same directory and renames
    /// it over the state file
    ///
    /// The temp file is removed on every error path.
    fn persist(&mut self, properties: &Properties) -> StoreResult<()> {
        let header = vec![
            "sitewatch state".to_string(),
            Utc::now().format("%a %b %d %H:%M:%S UTC %Y").to_string(),
        ];

        let mut temp = NamedTempFile::new_in(self.directory())?;
        temp.write_all(properties.to_text(&header).as_bytes())?;
        temp.flush()?;
        temp.persist(&self.path).map_err(|e| e.error)?;

        tracing::debug!(
            "Persisted {} entries to {}",
            properties.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_directory_and_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".websitechangetracker").join(".properties");

        let store = FileStore::open(&path).unwrap();

        assert!(path.is_file());
        assert_eq!(store.path(), path.as_path());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_open_keeps_existing_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.properties");
        fs::write(&path, "sites=alpha\n").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.load().unwrap().get("sites"), Some("alpha"));
    }

    #[test]
    fn test_open_rejects_directory_at_file_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".properties");
        fs::create_dir(&path).unwrap();

        let result = FileStore::open(&path);
        assert!(matches!(result, Err(StoreError::NotAFile(_))));
    }

    #[test]
    fn test_open_rejects_file_at_directory_path() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join(".websitechangetracker");
        fs::write(&blocker, "").unwrap();

        let result = FileStore::open(&blocker.join(".properties"));
        assert!(matches!(result, Err(StoreError::NotADirectory(_))));
    }

    #[test]
    fn test_persist_and_reload_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.properties");
        let mut store = FileStore::open(&path).unwrap();

        let props: Properties = [
            ("sites", "alpha, beta"),
            ("url_alpha", "https://alpha.example/?q=1"),
            ("hash_alpha", "ABC123"),
            ("down_alpha", "false"),
        ]
        .into_iter()
        .collect();

        store.persist(&props).unwrap();

        assert_eq!(store.load().unwrap(), props);

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("#sitewatch state\n#"));
    }

    #[test]
    fn test_persist_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.properties");
        let mut store = FileStore::open(&path).unwrap();

        for round in 0..3 {
            store
                .persist(&[("round", round.to_string())].into_iter().collect())
                .unwrap();
        }

        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("state.properties")]);
        assert_eq!(store.load().unwrap().get("round"), Some("2"));
    }

    #[test]
    fn test_persist_fails_cleanly_when_directory_is_gone() {
        let dir = TempDir::new().unwrap();
        let state_dir = dir.path().join("watch");
        let path = state_dir.join(".properties");
        let mut store = FileStore::open(&path).unwrap();

        fs::remove_dir_all(&state_dir).unwrap();

        let result = store.persist(&[("sites", "alpha")].into_iter().collect());
        assert!(matches!(result, Err(StoreError::Io(_))));
        assert!(!state_dir.exists());
    }

    #[test]
    fn test_persist_overwrites_previous_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.properties");
        fs::write(&path, "stale=1\n").unwrap();
        let mut store = FileStore::open(&path).unwrap();

        store
            .persist(&[("fresh", "2")].into_iter().collect())
            .unwrap();

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.get("fresh"), Some("2"));
        assert!(!reloaded.contains("stale"));
    }
}
