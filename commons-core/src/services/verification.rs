//! Verification service - the per-user PENDING → VERIFIED/REJECTED workflow

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::result::{Error, Result};
use crate::domain::{User, UserRole, UserStatus};
use crate::ports::Store;

/// Verification workflow for pending owners
pub struct VerificationService {
    store: Arc<dyn Store>,
}

impl VerificationService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Settle a pending user as VERIFIED or REJECTED
    ///
    /// Allowed for the SUPER_ADMIN unconditionally, or for a BUILDING_ADMIN
    /// whose managed building equals the target's residence building. Both
    /// outcomes are terminal: settling an already settled user is an
    /// invalid-state error, not a silent overwrite.
    pub fn verify_user(&self, actor: &User, user_id: &str, approve: bool) -> Result<User> {
        let mut users = self.store.load_users()?;
        let target = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| Error::not_found(format!("user {}", user_id)))?;

        let allowed = match actor.role {
            UserRole::SuperAdmin => true,
            UserRole::BuildingAdmin => {
                actor.managed_building.as_deref() == Some(target.building.as_str())
            }
            UserRole::Owner => false,
        };
        if !allowed {
            return Err(Error::forbidden(format!(
                "cannot verify users of building {}",
                target.building
            )));
        }

        if target.status != UserStatus::Pending {
            return Err(Error::invalid_state(format!(
                "user {} is not pending",
                user_id
            )));
        }

        target.status = if approve {
            UserStatus::Verified
        } else {
            UserStatus::Rejected
        };
        let settled = target.clone();
        self.store.save_users(&users)?;
        Ok(settled)
    }

    /// Pending owners of one building, for the steward dashboard
    pub fn pending_for_building(&self, building: &str) -> Result<Vec<User>> {
        let users = self.store.load_users()?;
        Ok(users
            .into_iter()
            .filter(|u| {
                u.role == UserRole::Owner
                    && u.status == UserStatus::Pending
                    && u.building == building
            })
            .collect())
    }

    /// Pending owners whose building currently has no steward
    ///
    /// Derived view, recomputed on every call: admin assignment is dynamic,
    /// so demoting the only steward of a building immediately orphans its
    /// pending owners.
    pub fn orphaned_pending_owners(&self) -> Result<Vec<User>> {
        let users = self.store.load_users()?;
        Ok(orphaned_pending_owners(&users))
    }
}

/// Compute the orphaned pending owners of a user collection
pub fn orphaned_pending_owners(users: &[User]) -> Vec<User> {
    let managed: HashSet<&str> = users
        .iter()
        .filter(|u| u.role == UserRole::BuildingAdmin)
        .filter_map(|u| u.managed_building.as_deref())
        .collect();

    users
        .iter()
        .filter(|u| {
            u.role == UserRole::Owner
                && u.status == UserStatus::Pending
                && !managed.contains(u.building.as_str())
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::seed::{bootstrap_admin, demo_users};
    use crate::adapters::MemoryStore;

    fn service_with_demo() -> (VerificationService, User) {
        let admin = bootstrap_admin("18688835658", "895600");
        let mut users = vec![admin.clone()];
        users.extend(demo_users());
        let store = Arc::new(MemoryStore::with_data(users, Vec::new()));
        (VerificationService::new(store), admin)
    }

    #[test]
    fn test_super_admin_verifies_unconditionally() {
        let (service, admin) = service_with_demo();
        let settled = service.verify_user(&admin, "u-b3-owner1", true).unwrap();
        assert_eq!(settled.status, UserStatus::Verified);
    }

    #[test]
    fn test_building_admin_scope_is_managed_building() {
        let (service, _) = service_with_demo();
        let users = service.store.load_users().unwrap();
        let steward = users.iter().find(|u| u.id == "u-b1-admin").unwrap().clone();

        // In scope: pending owner of building 1
        assert!(service.verify_user(&steward, "u-b1-owner1", true).is_ok());

        // Out of scope: pending owner of building 2
        let err = service.verify_user(&steward, "u-b2-owner1", true).unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)));
    }

    #[test]
    fn test_settled_users_are_terminal() {
        let (service, admin) = service_with_demo();
        service.verify_user(&admin, "u-b1-owner1", false).unwrap();

        let err = service.verify_user(&admin, "u-b1-owner1", true).unwrap_err();
        assert!(matches!(err, Error::InvalidState(_)));
    }

    #[test]
    fn test_orphaned_view_tracks_admin_assignment() {
        let (service, _) = service_with_demo();

        // Building 3 has no steward, so both of its pending owners show up
        let orphaned = service.orphaned_pending_owners().unwrap();
        let ids: Vec<&str> = orphaned.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["u-b3-owner1", "u-b3-owner2"]);
    }

    #[test]
    fn test_pending_for_building() {
        let (service, _) = service_with_demo();
        let pending = service.pending_for_building("1号楼").unwrap();
        assert_eq!(pending.len(), 2);
        assert!(pending.iter().all(|u| u.status == UserStatus::Pending));
    }
}
