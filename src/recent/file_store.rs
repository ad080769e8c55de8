//! JSON file backed recent-search store with atomic writes

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::store::{RecentSearchStore, StoreError};

const RECENT_FILENAME: &str = "recent-searches.json";

/// Stores the recent list as a JSON array of strings.
///
/// A missing file reads as an empty list. Writes go to a temp file that is
/// then renamed over the target, so readers never see a partial file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default file name inside `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(RECENT_FILENAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the backing file; a missing file is not an error
    pub fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl RecentSearchStore for FileStore {
    fn get(&self) -> Result<Vec<String>, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&json)?)
    }

    fn set(&mut self, queries: &[String]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| StoreError::Unavailable(format!("invalid store path: {:?}", self.path)))?;
        let mut temp_name = file_name.to_os_string();
        temp_name.push(".tmp");
        let temp_path = self.path.with_file_name(temp_name);

        let json = serde_json::to_string_pretty(queries)?;
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}
