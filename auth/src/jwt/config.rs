use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use jsonwebtoken::Algorithm;

use super::errors::JwtError;

/// Immutable signing configuration for [`JwtHandler`](super::JwtHandler).
///
/// Built once at startup from service configuration and moved into the
/// handler. Only symmetric HMAC algorithms are accepted.
#[derive(Clone)]
pub struct TokenConfig {
    secret: Vec<u8>,
    algorithm: Algorithm,
    ttl: Duration,
}

impl TokenConfig {
    /// Build a token configuration.
    ///
    /// # Arguments
    /// * `secret` - Shared HMAC secret
    /// * `algorithm` - Algorithm name (`HS256`, `HS384` or `HS512`)
    /// * `ttl_minutes` - Default lifetime of issued tokens
    ///
    /// # Errors
    /// * `EmptySecret` - Secret has no bytes
    /// * `UnsupportedAlgorithm` - Name is unknown or not an HMAC algorithm
    pub fn new(
        secret: impl Into<Vec<u8>>,
        algorithm: &str,
        ttl_minutes: i64,
    ) -> Result<Self, JwtError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(JwtError::EmptySecret);
        }

        let algorithm = match Algorithm::from_str(algorithm) {
            Ok(alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => alg,
            _ => return Err(JwtError::UnsupportedAlgorithm(algorithm.to_string())),
        };

        Ok(Self {
            secret,
            algorithm,
            ttl: Duration::minutes(ttl_minutes),
        })
    }

    /// HS256 configuration with the given default lifetime.
    pub fn hs256(secret: impl Into<Vec<u8>>, ttl_minutes: i64) -> Result<Self, JwtError> {
        Self::new(secret, "HS256", ttl_minutes)
    }

    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("ttl", &self.ttl)
            .finish()
    }
}
