use thiserror::Error;

/// Error type for token operations.
///
/// Verification failures are deliberately collapsed into `InvalidToken`
/// so callers cannot tell a bad signature from an expired or malformed token.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Could not validate credentials")]
    InvalidToken,

    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Signing secret must not be empty")]
    EmptySecret,
}
