//! Store port - persistence abstraction
//!
//! The portal persists two independent collections, `users` and `proposals`,
//! each as a whole JSON array. Commands own the collections: every operation
//! loads a snapshot, applies one in-memory update, and writes the full
//! collection back. Adapters provide the actual storage.

use crate::domain::result::Result;
use crate::domain::{Proposal, User};

/// Persistence abstraction for the two portal collections
///
/// Loads return owned snapshots; the store never hands out mutable
/// references to its backing data.
pub trait Store: Send + Sync {
    /// Load the full user collection
    fn load_users(&self) -> Result<Vec<User>>;

    /// Replace the full user collection
    fn save_users(&self, users: &[User]) -> Result<()>;

    /// Load the full proposal collection
    fn load_proposals(&self) -> Result<Vec<Proposal>>;

    /// Replace the full proposal collection
    fn save_proposals(&self, proposals: &[Proposal]) -> Result<()>;
}
