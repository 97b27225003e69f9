//! Directory service - user administration
//!
//! Promotion and demotion between owner and building steward, hard removal,
//! profile edits, and bulk import/export. Everything here except scoped
//! removal is reserved to the SUPER_ADMIN.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::result::{Error, Result};
use crate::domain::{ImportRecord, User, UserRole, UserStatus, UserUpdate};
use crate::ports::Store;

/// Defaults applied to incomplete import records
const DEFAULT_IMPORT_NAME: &str = "未命名";
const DEFAULT_IMPORT_PLACE: &str = "未知";
const DEFAULT_IMPORT_PASSWORD: &str = "123456";

/// Outcome of a bulk import
///
/// Duplicates are counted, not reported individually.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ImportSummary {
    pub inserted: usize,
    pub skipped: usize,
}

/// User administration service
pub struct DirectoryService {
    store: Arc<dyn Store>,
}

impl DirectoryService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// List all users
    pub fn all_users(&self) -> Result<Vec<User>> {
        self.store.load_users()
    }

    fn require_super_admin(actor: &User, action: &str) -> Result<()> {
        if actor.role != UserRole::SuperAdmin {
            return Err(Error::forbidden(format!(
                "only the super admin may {}",
                action
            )));
        }
        Ok(())
    }

    /// Promote an owner to building steward for the given building
    ///
    /// The managed building may differ from the target's own residence.
    pub fn promote(&self, actor: &User, user_id: &str, managed_building: &str) -> Result<User> {
        Self::require_super_admin(actor, "change roles")?;

        let mut users = self.store.load_users()?;
        let target = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| Error::not_found(format!("user {}", user_id)))?;

        if target.role == UserRole::SuperAdmin {
            return Err(Error::invalid_state("the super admin cannot be re-roled"));
        }

        target.role = UserRole::BuildingAdmin;
        target.managed_building = Some(managed_building.to_string());
        let promoted = target.clone();
        self.store.save_users(&users)?;
        Ok(promoted)
    }

    /// Demote a building steward back to owner
    ///
    /// The managed-building scope is cleared immediately; pending owners the
    /// steward used to cover become orphaned unless another steward remains.
    pub fn demote(&self, actor: &User, user_id: &str) -> Result<User> {
        Self::require_super_admin(actor, "change roles")?;

        let mut users = self.store.load_users()?;
        let target = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| Error::not_found(format!("user {}", user_id)))?;

        if target.role == UserRole::SuperAdmin {
            return Err(Error::invalid_state("the super admin cannot be re-roled"));
        }

        target.role = UserRole::Owner;
        target.managed_building = None;
        let demoted = target.clone();
        self.store.save_users(&users)?;
        Ok(demoted)
    }

    /// Permanently delete a user record
    ///
    /// The super admin may remove anyone but itself. A building steward may
    /// remove pending and verified owners of its managed building only.
    pub fn remove_user(&self, actor: &User, user_id: &str) -> Result<()> {
        let mut users = self.store.load_users()?;
        let target = users
            .iter()
            .find(|u| u.id == user_id)
            .ok_or_else(|| Error::not_found(format!("user {}", user_id)))?;

        match actor.role {
            UserRole::SuperAdmin => {
                if actor.id == user_id {
                    return Err(Error::invalid_state(
                        "the super admin cannot remove its own account",
                    ));
                }
            }
            UserRole::BuildingAdmin => {
                let in_scope = actor.managed_building.as_deref()
                    == Some(target.building.as_str())
                    && target.role == UserRole::Owner
                    && matches!(target.status, UserStatus::Pending | UserStatus::Verified);
                if !in_scope {
                    return Err(Error::forbidden(format!(
                        "cannot remove user {}",
                        user_id
                    )));
                }
            }
            UserRole::Owner => {
                return Err(Error::forbidden("owners cannot remove accounts"));
            }
        }

        users.retain(|u| u.id != user_id);
        self.store.save_users(&users)
    }

    /// Partially update a user's name, phone, building, or unit
    ///
    /// Phone uniqueness is enforced here the same way registration enforces
    /// it.
    pub fn edit_user(&self, actor: &User, user_id: &str, update: &UserUpdate) -> Result<User> {
        Self::require_super_admin(actor, "edit users")?;

        let mut users = self.store.load_users()?;
        if let Some(phone) = &update.phone_number {
            if users.iter().any(|u| u.id != user_id && &u.phone_number == phone) {
                return Err(Error::DuplicatePhone(phone.clone()));
            }
        }

        let target = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| Error::not_found(format!("user {}", user_id)))?;

        update.apply(target);
        let edited = target.clone();
        self.store.save_users(&users)?;
        Ok(edited)
    }

    /// Bulk-import owner records, auto-verified
    ///
    /// Records without a phone number are skipped, as are phone collisions
    /// with existing users or with earlier records in the same batch.
    pub fn import_users(&self, actor: &User, records: &[ImportRecord]) -> Result<ImportSummary> {
        Self::require_super_admin(actor, "import users")?;

        let mut users = self.store.load_users()?;
        let mut inserted = 0usize;
        let mut skipped = 0usize;

        for record in records {
            let Some(phone) = record.phone_number.as_deref().filter(|p| !p.is_empty()) else {
                skipped += 1;
                continue;
            };
            if users.iter().any(|u| u.phone_number == phone) {
                skipped += 1;
                continue;
            }

            let mut user = User::new_owner(
                record.name.as_deref().unwrap_or(DEFAULT_IMPORT_NAME),
                phone,
                record.password.as_deref().unwrap_or(DEFAULT_IMPORT_PASSWORD),
                record.building.as_deref().unwrap_or(DEFAULT_IMPORT_PLACE),
                record.unit.as_deref().unwrap_or(DEFAULT_IMPORT_PLACE),
            );
            user.status = UserStatus::Verified;
            users.push(user);
            inserted += 1;
        }

        if inserted > 0 {
            self.store.save_users(&users)?;
        }
        Ok(ImportSummary { inserted, skipped })
    }

    /// Export every user except the super admin
    ///
    /// Pure read projection; the presentation layer decides the file name.
    pub fn export_users(&self, actor: &User) -> Result<Vec<User>> {
        Self::require_super_admin(actor, "export users")?;

        let users = self.store.load_users()?;
        Ok(users
            .into_iter()
            .filter(|u| u.role != UserRole::SuperAdmin)
            .collect())
    }
}
