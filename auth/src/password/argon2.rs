use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// One-way password hashing with a random per-call salt (Argon2id).
///
/// Stateless: a single instance can be shared across any number of tasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password.
    ///
    /// Every call draws a fresh salt, so hashing the same password twice
    /// yields two different strings. Never compare hashes for equality;
    /// use [`PasswordHasher::verify`].
    ///
    /// # Returns
    /// PHC string (algorithm, parameters, salt and digest)
    ///
    /// # Errors
    /// * `HashingFailed` - Argon2 rejected the input or parameters
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Check a plaintext password against a stored PHC hash.
    ///
    /// The digest comparison is constant time. A hash that cannot be parsed
    /// counts as a mismatch.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            tracing::debug!("Stored password hash is not a valid PHC string");
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert!(hasher.verify(password, &hash));
        assert!(!hasher.verify("wrong_password", &hash));
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = PasswordHasher::new();

        let first = hasher.hash("password").expect("Failed to hash password");
        let second = hasher.hash("password").expect("Failed to hash password");

        assert_ne!(first, second);
        assert!(hasher.verify("password", &first));
        assert!(hasher.verify("password", &second));
    }

    #[test]
    fn test_hash_does_not_contain_plaintext() {
        let hasher = PasswordHasher::new();
        let hash = hasher
            .hash("plaintext_secret")
            .expect("Failed to hash password");

        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("plaintext_secret"));
    }

    #[test]
    fn test_verify_malformed_hash_is_false() {
        let hasher = PasswordHasher::new();

        assert!(!hasher.verify("password", "invalid_hash"));
        assert!(!hasher.verify("password", ""));
        assert!(!hasher.verify("password", "$argon2id$v=19$garbage"));
    }
}
