//! In-memory store adapter for tests

use std::sync::Mutex;

use crate::domain::result::{Error, Result};
use crate::domain::{Proposal, User};
use crate::ports::Store;

/// Volatile store holding both collections in memory
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
    proposals: Mutex<Vec<Proposal>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given collections
    pub fn with_data(users: Vec<User>, proposals: Vec<Proposal>) -> Self {
        Self {
            users: Mutex::new(users),
            proposals: Mutex::new(proposals),
        }
    }
}

fn poisoned(e: impl std::fmt::Display) -> Error {
    Error::invalid_state(format!("store lock poisoned: {}", e))
}

impl Store for MemoryStore {
    fn load_users(&self) -> Result<Vec<User>> {
        Ok(self.users.lock().map_err(poisoned)?.clone())
    }

    fn save_users(&self, users: &[User]) -> Result<()> {
        *self.users.lock().map_err(poisoned)? = users.to_vec();
        Ok(())
    }

    fn load_proposals(&self) -> Result<Vec<Proposal>> {
        Ok(self.proposals.lock().map_err(poisoned)?.clone())
    }

    fn save_proposals(&self, proposals: &[Proposal]) -> Result<()> {
        *self.proposals.lock().map_err(poisoned)? = proposals.to_vec();
        Ok(())
    }
}
