//! Password hashing and verification
//!
//! Every password is hashed exactly once, on write, with a fresh random
//! salt. The cost parameters are the argon2 crate's fixed defaults for
//! every hash, balancing brute-force resistance against login latency.

use argon2::password_hash::SaltString;
use argon2::{password_hash, Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand::rngs::OsRng;

use crate::error::{BookrackError, Result};

/// Manages one-way password hashing
pub struct PasswordManager {
    argon2: Argon2<'static>,
}

impl PasswordManager {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Hashes a plaintext password with a freshly generated salt
    pub fn hash(&self, plaintext: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| BookrackError::HashError(format!("Failed to hash password: {}", e)))
    }

    /// Verifies a plaintext password against a stored hash.
    ///
    /// Returns `Ok(false)` on mismatch; errors only when the stored hash
    /// itself is malformed.
    pub fn verify(&self, plaintext: &str, stored: &str) -> Result<bool> {
        let parsed = PasswordHash::new(stored)
            .map_err(|e| BookrackError::HashError(format!("Malformed stored hash: {}", e)))?;

        match self.argon2.verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(BookrackError::HashError(format!(
                "Password verification failed: {}",
                e
            ))),
        }
    }
}

impl Default for PasswordManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_never_the_plaintext() {
        let passwords = PasswordManager::new();
        let hash = passwords.hash("secret1").unwrap();
        assert_ne!(hash, "secret1");
    }

    #[test]
    fn test_fresh_salt_per_call() {
        let passwords = PasswordManager::new();
        let first = passwords.hash("secret1").unwrap();
        let second = passwords.hash("secret1").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_roundtrip() {
        let passwords = PasswordManager::new();
        let hash = passwords.hash("secret1").unwrap();
        assert!(passwords.verify("secret1", &hash).unwrap());
        assert!(!passwords.verify("secret2", &hash).unwrap());
    }

    #[test]
    fn test_malformed_stored_hash_is_an_error() {
        let passwords = PasswordManager::new();
        assert!(passwords.verify("secret1", "not-a-phc-string").is_err());
    }
}
