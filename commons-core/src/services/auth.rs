//! Auth service - login, registration, password changes

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::result::{Error, Result};
use crate::domain::User;
use crate::ports::{PasswordVerifier, Store};

/// A registration request
///
/// Callers can never choose role or status: registration always yields a
/// PENDING owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRegistration {
    pub name: String,
    pub phone_number: String,
    pub password: String,
    pub building: String,
    pub unit: String,
}

/// Auth service for login, registration, and password changes
pub struct AuthService {
    store: Arc<dyn Store>,
    passwords: Arc<dyn PasswordVerifier>,
}

impl AuthService {
    pub fn new(store: Arc<dyn Store>, passwords: Arc<dyn PasswordVerifier>) -> Self {
        Self { store, passwords }
    }

    /// Log in by phone number and password
    ///
    /// Both must match on the same record. There is no lockout and no rate
    /// limiting; the credential comparison goes through the verifier port.
    pub fn login(&self, phone_number: &str, password: &str) -> Result<User> {
        let users = self.store.load_users()?;
        users
            .into_iter()
            .find(|u| {
                u.phone_number == phone_number && self.passwords.verify(&u.password, password)
            })
            .ok_or(Error::Auth)
    }

    /// Register a new owner account, pending verification
    pub fn register(&self, registration: &NewRegistration) -> Result<User> {
        for (field, value) in [
            ("name", &registration.name),
            ("phoneNumber", &registration.phone_number),
            ("password", &registration.password),
            ("building", &registration.building),
            ("unit", &registration.unit),
        ] {
            if value.trim().is_empty() {
                return Err(Error::validation(format!("missing required field: {}", field)));
            }
        }

        let mut users = self.store.load_users()?;
        if users
            .iter()
            .any(|u| u.phone_number == registration.phone_number)
        {
            return Err(Error::DuplicatePhone(registration.phone_number.clone()));
        }

        let user = User::new_owner(
            &registration.name,
            &registration.phone_number,
            self.passwords.protect(&registration.password),
            &registration.building,
            &registration.unit,
        );
        users.push(user.clone());
        self.store.save_users(&users)?;
        Ok(user)
    }

    /// Overwrite a user's password
    ///
    /// No old-password confirmation is required; the legacy web portal
    /// behaved the same way and stored sessions are trusted.
    pub fn change_password(&self, user_id: &str, new_password: &str) -> Result<()> {
        if new_password.trim().is_empty() {
            return Err(Error::validation("missing required field: password"));
        }

        let mut users = self.store.load_users()?;
        let user = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| Error::not_found(format!("user {}", user_id)))?;

        user.password = self.passwords.protect(new_password);
        self.store.save_users(&users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MemoryStore, PlaintextPasswords};

    fn service() -> AuthService {
        AuthService::new(Arc::new(MemoryStore::new()), Arc::new(PlaintextPasswords))
    }

    fn registration(phone: &str) -> NewRegistration {
        NewRegistration {
            name: "张伟".to_string(),
            phone_number: phone.to_string(),
            password: "password".to_string(),
            building: "1号楼".to_string(),
            unit: "305".to_string(),
        }
    }

    #[test]
    fn test_login_requires_both_fields_to_match() {
        let auth = service();
        auth.register(&registration("13900000002")).unwrap();

        assert!(auth.login("13900000002", "password").is_ok());
        assert!(matches!(
            auth.login("13900000002", "wrong"),
            Err(Error::Auth)
        ));
        assert!(matches!(
            auth.login("13900000099", "password"),
            Err(Error::Auth)
        ));
    }

    #[test]
    fn test_register_rejects_duplicate_phone() {
        let auth = service();
        auth.register(&registration("13900000010")).unwrap();

        let err = auth.register(&registration("13900000010")).unwrap_err();
        assert!(matches!(err, Error::DuplicatePhone(_)));

        let users = auth.store.load_users().unwrap();
        assert_eq!(users.len(), 1);
    }

    #[test]
    fn test_register_rejects_missing_fields() {
        let auth = service();
        let mut r = registration("13900000002");
        r.unit = String::new();
        assert!(matches!(auth.register(&r), Err(Error::Validation(_))));
    }

    #[test]
    fn test_change_password_overwrites_unconditionally() {
        let auth = service();
        let user = auth.register(&registration("13900000002")).unwrap();

        auth.change_password(&user.id, "new-secret").unwrap();
        assert!(auth.login("13900000002", "new-secret").is_ok());
        assert!(auth.login("13900000002", "password").is_err());
    }

    #[test]
    fn test_change_password_unknown_user() {
        let auth = service();
        assert!(matches!(
            auth.change_password("u-missing", "secret"),
            Err(Error::NotFound(_))
        ));
    }
}
