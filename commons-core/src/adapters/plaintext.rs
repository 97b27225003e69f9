//! Plaintext password adapter
//!
//! Stores and compares passwords verbatim, matching the stored layout of
//! collections exported from the legacy web portal. The seam exists so a
//! hashing adapter can replace this without touching login callers.

use crate::ports::PasswordVerifier;

/// Verbatim password storage and comparison
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaintextPasswords;

impl PasswordVerifier for PlaintextPasswords {
    fn protect(&self, plain: &str) -> String {
        plain.to_string()
    }

    fn verify(&self, stored: &str, attempt: &str) -> bool {
        stored == attempt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plaintext_round_trip() {
        let verifier = PlaintextPasswords;
        let stored = verifier.protect("895600");
        assert!(verifier.verify(&stored, "895600"));
        assert!(!verifier.verify(&stored, "895601"));
    }
}
