use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::config::TokenConfig;
use super::errors::JwtError;

/// Issues and verifies signed, expiring access tokens.
///
/// Holds only immutable key material, so it is safe to share behind an
/// `Arc` across request tasks.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl JwtHandler {
    /// Create a handler from a validated [`TokenConfig`].
    pub fn new(config: TokenConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret()),
            decoding_key: DecodingKey::from_secret(config.secret()),
            algorithm: config.algorithm(),
            ttl: config.ttl(),
        }
    }

    /// Issue a token for `subject_id` using the configured lifetime.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed
    pub fn create(&self, subject_id: i64) -> Result<String, JwtError> {
        self.create_with_ttl(subject_id, self.ttl)
    }

    /// Issue a token for `subject_id` that expires `ttl` from now.
    ///
    /// Two tokens for the same subject issued within the same second are
    /// identical; tokens are not single-use so this is harmless.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed
    pub fn create_with_ttl(&self, subject_id: i64, ttl: Duration) -> Result<String, JwtError> {
        self.encode(&Claims::for_subject(subject_id, ttl))
    }

    /// Verify a token and return its subject id.
    ///
    /// Signature, algorithm, presence of `exp` and `sub`, expiry (no leeway)
    /// and integer subject are all checked.
    ///
    /// # Errors
    /// * `InvalidToken` - Any verification failure
    pub fn decode(&self, token: &str) -> Result<i64, JwtError> {
        let claims = self.decode_claims(token)?;

        claims.subject_id().ok_or_else(|| {
            tracing::debug!(subject = %claims.sub, "Token subject is not an integer id");
            JwtError::InvalidToken
        })
    }

    fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    fn decode_claims(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(reason = ?e.kind(), "Token verification failed");
                JwtError::InvalidToken
            })
    }
}
