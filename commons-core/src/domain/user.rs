//! User domain model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of a portal account
///
/// OWNER is the only role permitted to vote. BUILDING_ADMIN verifies pending
/// owners within its managed building. SUPER_ADMIN manages everything and is
/// seeded exactly once at initialization, never created through registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Owner,
    BuildingAdmin,
    SuperAdmin,
}

/// Verification status of an account
///
/// PENDING transitions to VERIFIED or REJECTED; both are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    Pending,
    Verified,
    Rejected,
}

/// A resident or administrator account
///
/// Serialized camelCase so persisted collections round-trip with the
/// browser-storage layout of the legacy web portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: UserRole,
    pub building: String,
    pub unit: String,
    pub status: UserStatus,
    /// Login identifier, unique across all users
    pub phone_number: String,
    pub password: String,
    /// Building this admin verifies; set only for BUILDING_ADMIN and may
    /// differ from the admin's own residence building
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed_building: Option<String>,
}

impl User {
    /// Create a freshly registered owner, pending verification
    pub fn new_owner(
        name: impl Into<String>,
        phone_number: impl Into<String>,
        password: impl Into<String>,
        building: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            id: format!("u-{}", Uuid::new_v4()),
            name: name.into(),
            role: UserRole::Owner,
            building: building.into(),
            unit: unit.into(),
            status: UserStatus::Pending,
            phone_number: phone_number.into(),
            password: password.into(),
            managed_building: None,
        }
    }

    /// True for verified owners, the only accounts allowed to vote
    pub fn can_vote(&self) -> bool {
        self.role == UserRole::Owner && self.status == UserStatus::Verified
    }
}

/// Partial update for user administration
///
/// Each field is optional with `None` meaning "no change", so a partial edit
/// can never accidentally clear a field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub building: Option<String>,
    pub unit: Option<String>,
}

impl UserUpdate {
    /// Apply the update in place, leaving unset fields untouched
    pub fn apply(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(phone) = &self.phone_number {
            user.phone_number = phone.clone();
        }
        if let Some(building) = &self.building {
            user.building = building.clone();
        }
        if let Some(unit) = &self.unit {
            user.unit = unit.clone();
        }
    }
}

/// One record of a bulk import file
///
/// Only the phone number is required; records without it are skipped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub building: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_defaults() {
        let user = User::new_owner("张伟", "13900000002", "password", "1号楼", "305");
        assert_eq!(user.role, UserRole::Owner);
        assert_eq!(user.status, UserStatus::Pending);
        assert!(user.managed_building.is_none());
        assert!(!user.can_vote());
    }

    #[test]
    fn test_can_vote_requires_verified_owner() {
        let mut user = User::new_owner("王芳", "13900000003", "password", "1号楼", "602");
        user.status = UserStatus::Verified;
        assert!(user.can_vote());

        user.role = UserRole::BuildingAdmin;
        assert!(!user.can_vote());
    }

    #[test]
    fn test_update_leaves_unset_fields_untouched() {
        let mut user = User::new_owner("陈静", "13900000005", "password", "2号楼", "505");
        let update = UserUpdate {
            unit: Some("506".to_string()),
            ..UserUpdate::default()
        };
        update.apply(&mut user);
        assert_eq!(user.unit, "506");
        assert_eq!(user.name, "陈静");
        assert_eq!(user.building, "2号楼");
    }

    #[test]
    fn test_role_serialization_matches_stored_layout() {
        let user = User::new_owner("孙丽", "13900000007", "password", "3号楼", "909");
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["role"], "OWNER");
        assert_eq!(json["status"], "PENDING");
        assert_eq!(json["phoneNumber"], "13900000007");
        assert!(json.get("managedBuilding").is_none());
    }
}
