//! JSON file store adapter
//!
//! Persists the `users` and `proposals` collections as pretty-printed JSON
//! arrays in the data directory, matching the browser-storage layout of the
//! legacy web portal so exported state round-trips losslessly.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::result::Result;
use crate::domain::{Proposal, User};
use crate::ports::Store;

const USERS_FILE: &str = "users.json";
const PROPOSALS_FILE: &str = "proposals.json";
const LOCK_FILE: &str = ".commons.lock";

/// File-backed store for the two portal collections
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at the given data directory
    pub fn new(data_dir: &Path) -> Result<Self> {
        fs::create_dir_all(data_dir)?;
        Ok(Self {
            data_dir: data_dir.to_path_buf(),
        })
    }

    /// Acquire the advisory lock guarding the data directory
    ///
    /// The lock is released when the returned handle is dropped. It keeps
    /// concurrent CLI invocations from interleaving full-collection writes.
    fn lock(&self) -> Result<File> {
        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.data_dir.join(LOCK_FILE))?;
        lock.lock_exclusive()?;
        Ok(lock)
    }

    fn load_collection<T: DeserializeOwned>(&self, filename: &str) -> Result<Vec<T>> {
        let path = self.data_dir.join(filename);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let _guard = self.lock()?;
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn save_collection<T: Serialize>(&self, filename: &str, items: &[T]) -> Result<()> {
        let _guard = self.lock()?;
        let content = serde_json::to_string_pretty(items)?;
        fs::write(self.data_dir.join(filename), content)?;
        Ok(())
    }
}

impl Store for JsonFileStore {
    fn load_users(&self) -> Result<Vec<User>> {
        self.load_collection(USERS_FILE)
    }

    fn save_users(&self, users: &[User]) -> Result<()> {
        self.save_collection(USERS_FILE, users)
    }

    fn load_proposals(&self) -> Result<Vec<Proposal>> {
        self.load_collection(PROPOSALS_FILE)
    }

    fn save_proposals(&self, proposals: &[Proposal]) -> Result<()> {
        self.save_collection(PROPOSALS_FILE, proposals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::User;
    use tempfile::tempdir;

    #[test]
    fn test_empty_store_loads_empty_collections() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();
        assert!(store.load_users().unwrap().is_empty());
        assert!(store.load_proposals().unwrap().is_empty());
    }

    #[test]
    fn test_users_round_trip() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();

        let users = vec![
            User::new_owner("张伟", "13900000002", "password", "1号楼", "305"),
            User::new_owner("王芳", "13900000003", "password", "1号楼", "602"),
        ];
        store.save_users(&users).unwrap();

        let loaded = store.load_users().unwrap();
        assert_eq!(loaded, users);
    }
}
