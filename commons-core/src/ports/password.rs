//! Password verifier port
//!
//! Credential comparison sits behind this seam so that a hashing scheme can
//! be introduced later without touching login callers. The portal currently
//! stores and compares passwords in plaintext for compatibility with
//! collections exported from the legacy web portal.

/// Credential storage and comparison policy
pub trait PasswordVerifier: Send + Sync {
    /// Transform a plaintext password into its stored form
    fn protect(&self, plain: &str) -> String;

    /// Check a login attempt against the stored form
    fn verify(&self, stored: &str, attempt: &str) -> bool;
}
