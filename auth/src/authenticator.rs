use std::sync::OnceLock;

use chrono::Duration;

use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::TokenConfig;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuance.
///
/// Stateless apart from its immutable key material; share it behind an `Arc`.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    decoy_hash: OnceLock<String>,
}

const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,
    /// Always `bearer`
    pub token_type: &'static str,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator from token settings.
    pub fn new(config: TokenConfig) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(config),
            decoy_hash: OnceLock::new(),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue an access token for `subject_id`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match (or hash is malformed)
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject_id: i64,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.jwt_handler.create(subject_id)?;

        Ok(AuthenticationResult {
            access_token,
            token_type: "bearer",
        })
    }

    /// Refuse a login for which no stored hash exists.
    ///
    /// Runs one argon2 verification against a decoy hash so the refusal
    /// costs the same as a wrong password for a known account.
    pub fn reject_unknown(&self, password: &str) -> AuthenticationError {
        let decoy = self.decoy_hash.get_or_init(|| {
            self.password_hasher.hash(DECOY_PASSWORD).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to hash decoy password");
                String::new()
            })
        });
        let _ = self.password_hasher.verify(password, decoy);

        AuthenticationError::InvalidCredentials
    }

    /// Issue a token without password verification, using the default lifetime.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn generate_token(&self, subject_id: i64) -> Result<String, JwtError> {
        self.jwt_handler.create(subject_id)
    }

    /// Issue a token with an explicit lifetime.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn generate_token_with_ttl(
        &self,
        subject_id: i64,
        ttl: Duration,
    ) -> Result<String, JwtError> {
        self.jwt_handler.create_with_ttl(subject_id, ttl)
    }

    /// Verify a token and return the subject id it carries.
    ///
    /// # Errors
    /// * `InvalidToken` - Signature, expiry or subject check failed
    pub fn validate_token(&self, token: &str) -> Result<i64, JwtError> {
        self.jwt_handler.decode(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authenticator() -> Authenticator {
        Authenticator::new(TokenConfig::hs256("test_secret_key_at_least_32_bytes!", 30).unwrap())
    }

    #[test]
    fn test_authenticate_success() {
        let authenticator = authenticator();

        let password = "my_password";
        let hash = authenticator
            .hash_password(password)
            .expect("Failed to hash password");

        let result = authenticator
            .authenticate(password, &hash, 123)
            .expect("Authentication failed");

        assert!(!result.access_token.is_empty());
        assert_eq!(result.token_type, "bearer");

        let subject = authenticator
            .validate_token(&result.access_token)
            .expect("Token validation failed");
        assert_eq!(subject, 123);
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = authenticator();

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let result = authenticator.authenticate("wrong_password", &hash, 123);
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_malformed_hash() {
        let result = authenticator().authenticate("my_password", "not-a-hash", 123);
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_reject_unknown_verifies_against_decoy() {
        let authenticator = authenticator();

        assert!(matches!(
            authenticator.reject_unknown("any_password"),
            AuthenticationError::InvalidCredentials
        ));

        let decoy = authenticator.decoy_hash.get().expect("Decoy hash computed");
        assert!(decoy.starts_with("$argon2"));
        assert!(authenticator.verify_password(DECOY_PASSWORD, decoy));

        // Computed once and reused
        authenticator.reject_unknown(DECOY_PASSWORD);
        assert_eq!(authenticator.decoy_hash.get(), Some(decoy));
    }

    #[test]
    fn test_generate_and_validate_token() {
        let authenticator = authenticator();

        let token = authenticator
            .generate_token(42)
            .expect("Failed to generate token");

        assert_eq!(authenticator.validate_token(&token), Ok(42));
    }

    #[test]
    fn test_generate_expired_token() {
        let authenticator = authenticator();

        let token = authenticator
            .generate_token_with_ttl(42, Duration::minutes(-5))
            .expect("Failed to generate token");

        assert_eq!(
            authenticator.validate_token(&token),
            Err(JwtError::InvalidToken)
        );
    }

    #[test]
    fn test_validate_invalid_token() {
        let result = authenticator().validate_token("invalid.token.here");
        assert_eq!(result, Err(JwtError::InvalidToken));
    }
}
