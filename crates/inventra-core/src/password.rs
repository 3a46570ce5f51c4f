//! Password handling.
//!
//! A password exists in two forms that must never be confused:
//!
//! - [`PlainPassword`]: what the client sent. Only ever hashed or compared.
//! - [`PasswordHash`]: the salted bcrypt hash persisted by the store.
//!
//! The only way to obtain a `PasswordHash` from client input is
//! [`PlainPassword::hash`]. Stores rebuild persisted hashes with
//! `PasswordHash::from_stored`, which only exists with the `stored-hash`
//! feature.

use std::fmt;

use crate::errors::AppError;

/// A plaintext password taken from a request body.
#[derive(Clone)]
pub struct PlainPassword(String);

impl PlainPassword {
    pub fn new(password: impl Into<String>) -> Self {
        Self(password.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// One-way conversion into a salted hash.
    pub fn hash(&self, cost: u32) -> Result<PasswordHash, AppError> {
        hash_password(self, cost)
    }

    pub fn matches(&self, hash: &PasswordHash) -> Result<bool, AppError> {
        verify_password(self, hash)
    }
}

impl fmt::Debug for PlainPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PlainPassword(***)")
    }
}

/// A bcrypt hash as stored at rest.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Rebuilds a hash read back from persistent storage.
    #[cfg(any(test, feature = "stored-hash"))]
    pub fn from_stored(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(***)")
    }
}

pub fn hash_password(password: &PlainPassword, cost: u32) -> Result<PasswordHash, AppError> {
    bcrypt::hash(password.expose(), cost)
        .map(PasswordHash)
        .map_err(|e| AppError::internal_error(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &PlainPassword, hash: &PasswordHash) -> Result<bool, AppError> {
    bcrypt::verify(password.expose(), hash.as_str())
        .map_err(|e| AppError::internal_error(format!("Failed to verify password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    // bcrypt's minimum cost keeps the suite fast
    const COST: u32 = 4;

    #[test]
    fn test_hash_password_success() {
        let password = PlainPassword::new("testpassword123");
        let hash = password.hash(COST).unwrap();

        assert!(!hash.as_str().is_empty());
        assert_ne!(hash.as_str(), password.expose());
    }

    #[test]
    fn test_verify_password_correct() {
        let password = PlainPassword::new("correctpassword");
        let hash = password.hash(COST).unwrap();

        assert!(password.matches(&hash).unwrap());
    }

    #[test]
    fn test_verify_password_incorrect() {
        let hash = PlainPassword::new("correctpassword").hash(COST).unwrap();

        assert!(!PlainPassword::new("wrongpassword").matches(&hash).unwrap());
    }

    #[test]
    fn test_verify_password_invalid_hash() {
        let password = PlainPassword::new("testpassword");
        let invalid_hash = PasswordHash::from_stored("not_a_valid_bcrypt_hash");

        assert!(password.matches(&invalid_hash).is_err());
    }

    #[test]
    fn test_hash_generates_unique_hashes() {
        let password = PlainPassword::new("samepassword");
        let hash1 = password.hash(COST).unwrap();
        let hash2 = password.hash(COST).unwrap();

        assert_ne!(hash1, hash2);
        assert!(password.matches(&hash1).unwrap());
        assert!(password.matches(&hash2).unwrap());
    }

    #[test]
    fn test_hash_unicode_characters() {
        let password = PlainPassword::new("пароль密码🔒");
        let hash = password.hash(COST).unwrap();

        assert!(password.matches(&hash).unwrap());
    }

    #[test]
    fn test_stored_hash_still_verifies() {
        let password = PlainPassword::new("secret1");
        let hash = password.hash(COST).unwrap();

        let reloaded = PasswordHash::from_stored(hash.as_str());

        assert_eq!(reloaded, hash);
        assert!(password.matches(&reloaded).unwrap());
    }

    #[test]
    fn test_debug_does_not_leak() {
        let password = PlainPassword::new("hunter22");
        let hash = password.hash(COST).unwrap();

        assert!(!format!("{:?}", password).contains("hunter22"));
        assert!(!format!("{:?}", hash).contains(hash.as_str()));
    }
}
