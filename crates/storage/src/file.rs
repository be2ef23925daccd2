use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{Store, StoreError};

/// File-backed store keeping one file per key in a directory. The native
/// counterpart to a browser's origin-scoped key-value storage.
pub struct FileStore {
    directory: PathBuf,
}

impl FileStore {
    pub fn new(directory: impl AsRef<Path>) -> Result<Self, StoreError> {
        let directory = directory.as_ref().to_path_buf();
        fs::create_dir_all(&directory).map_err(|err| StoreError::Unavailable(err.to_string()))?;
        Ok(Self { directory })
    }

    fn path(&self, key: &str) -> PathBuf {
        self.directory.join(key)
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Unavailable(err.to_string())),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::write(self.path(key), value).map_err(|err| StoreError::Unavailable(err.to_string()))
    }
}
