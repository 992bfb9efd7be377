use std::{
    fs, io,
    path::{Path, PathBuf},
};

use lines_core::SaveStore;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Keeps the saved game in a single file on disk.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SaveStore for FileStore {
    type Error = StoreError;

    fn load(&mut self) -> Result<Option<Vec<u8>>, StoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    fn save(&mut self, bytes: &[u8]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        // write next to the target, then swap, so a crash never leaves half a save
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("lines-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn missing_file_loads_as_none() {
        let mut store = FileStore::new(scratch_dir("missing").join("save.json"));

        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_creates_directories_and_round_trips() {
        let dir = scratch_dir("roundtrip");
        let mut store = FileStore::new(dir.join("nested").join("save.json"));

        store.save(b"{\"version\":1}").unwrap();

        assert_eq!(store.load().unwrap().as_deref(), Some(&b"{\"version\":1}"[..]));
        assert!(!store.path().with_extension("tmp").exists());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn unreadable_path_is_an_error() {
        let dir = scratch_dir("unreadable");
        fs::create_dir_all(dir.join("save.json")).unwrap();
        let mut store = FileStore::new(dir.join("save.json"));

        assert!(store.load().is_err());
        fs::remove_dir_all(dir).unwrap();
    }
}
