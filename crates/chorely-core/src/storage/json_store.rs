//! Directory-of-JSON-files backend.
//!
//! Layout: `<dir>/chores.json`, `<dir>/people.json`, `<dir>/history.json`.
//! Writes go through a temporary file and a rename so a crash mid-write
//! leaves the previous content in place.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::{data_dir, Collection, CollectionStore};
use crate::error::PersistenceError;

#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// Open the store in the default data directory.
    pub fn open() -> Result<Self, PersistenceError> {
        Self::at(data_dir()?)
    }

    /// Open a store rooted at `dir`, creating it if needed.
    pub fn at(dir: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .map_err(|e| PersistenceError::DataDir(format!("{}: {e}", dir.display())))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, collection: Collection) -> PathBuf {
        self.dir.join(collection.file_name())
    }

    fn sibling(&self, collection: Collection, suffix: &str) -> PathBuf {
        self.dir.join(format!("{}.{suffix}", collection.file_name()))
    }
}

impl CollectionStore for JsonStore {
    fn read_raw(&self, collection: Collection) -> std::io::Result<Option<String>> {
        match std::fs::read_to_string(self.path_for(collection)) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn write_raw(&self, collection: Collection, content: &str) -> Result<(), PersistenceError> {
        let path = self.path_for(collection);
        let tmp = self.sibling(collection, "tmp");
        std::fs::write(&tmp, content).map_err(|source| PersistenceError::Write {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &path).map_err(|source| PersistenceError::Write {
            path: path.clone(),
            source,
        })?;
        debug!("Saved {} collection to {}", collection, path.display());
        Ok(())
    }

    fn quarantine(&self, collection: Collection, content: &str) {
        let backup = self.sibling(collection, "corrupt");
        match std::fs::write(&backup, content) {
            Ok(()) => warn!("Kept unreadable {} data at {}", collection, backup.display()),
            Err(err) => warn!("Cannot back up unreadable {} data: {}", collection, err),
        }
    }
}
