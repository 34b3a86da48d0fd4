//! Password hashing and verification

use argon2::{
    Argon2, PasswordHash, PasswordHasher as _, PasswordVerifier, password_hash::SaltString,
};

use crate::error::{AccountError, AccountResult};

/// One-way password encryption
pub trait PasswordHasher: Send + Sync {
    /// Produce the stored representation of `password`
    fn hash(&self, password: &str) -> AccountResult<String>;

    /// Check `attempt` against a stored hash; a mismatch is `Ok(false)`
    fn verify(&self, attempt: &str, encrypted: &str) -> AccountResult<bool>;
}

/// Argon2id hasher producing PHC strings
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> AccountResult<String> {
        let salt = SaltString::generate(&mut rand::thread_rng());
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AccountError::PasswordHash(format!("Failed to hash password: {}", e)))?
            .to_string();

        Ok(hash)
    }

    fn verify(&self, attempt: &str, encrypted: &str) -> AccountResult<bool> {
        let parsed_hash = PasswordHash::new(encrypted).map_err(|e| {
            AccountError::PasswordHash(format!("Failed to parse password hash: {}", e))
        })?;

        let argon2 = Argon2::default();
        let result = argon2.verify_password(attempt.as_bytes(), &parsed_hash);

        Ok(result.is_ok())
    }
}
