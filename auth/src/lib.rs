//! Authentication primitives for the account service
//!
//! - Password hashing (Argon2id, random salt per hash)
//! - Signed, expiring access tokens (HMAC JWT) carrying an integer subject id
//! - An `Authenticator` that combines both for login flows
//!
//! Nothing here knows about users, storage or HTTP.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("other", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{JwtHandler, TokenConfig};
//!
//! let config = TokenConfig::new("secret_key_at_least_32_bytes_long!", "HS256", 30).unwrap();
//! let handler = JwtHandler::new(config);
//! let token = handler.create(123).unwrap();
//! assert_eq!(handler.decode(&token).unwrap(), 123);
//! ```
//!
//! ## Login Flow
//! ```
//! use auth::{Authenticator, TokenConfig};
//!
//! let auth = Authenticator::new(TokenConfig::hs256("secret_key_at_least_32_bytes_long!", 30).unwrap());
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth.authenticate("password123", &hash, 7).unwrap();
//!
//! // Later requests: validate token
//! assert_eq!(auth.validate_token(&result.access_token).unwrap(), 7);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenConfig;
pub use password::PasswordError;
pub use password::PasswordHasher;
