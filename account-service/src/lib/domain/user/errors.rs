use std::fmt;

use thiserror::Error;

use crate::user::models::UserId;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("value is not a valid integer: {0}")]
    InvalidFormat(String),
}

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error(
        "Username contains invalid characters (only alphanumeric, underscore, and hyphen allowed)"
    )]
    InvalidCharacters,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("value is not a valid email address: {0}")]
    InvalidFormat(String),
}

/// Error for Role parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("value is not a valid role (expected 'customer' or 'admin'): {0}")]
    Unknown(String),
}

/// Permission a caller lacked when an operation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Only admins may perform the operation.
    AdminOnly,
    /// Only the record's owner or an admin may perform the operation.
    SelfOrAdmin,
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Permission::AdminOnly => f.write_str("Only admin can access this."),
            Permission::SelfOrAdmin => f.write_str("Not authorized"),
        }
    }
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid role: {0}")]
    InvalidRole(#[from] RoleError),

    #[error("Password hashing failed: {0}")]
    Password(String),

    // Authentication and authorization
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error("{0}")]
    Forbidden(Permission),

    // Domain-level errors
    #[error("User with id {0} not found.")]
    NotFound(UserId),

    #[error("Username {0} already taken.")]
    UsernameAlreadyExists(String),

    #[error("Email {0} already has an account.")]
    EmailAlreadyExists(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Token error: {0}")]
    Token(String),
}

impl From<auth::PasswordError> for UserError {
    fn from(err: auth::PasswordError) -> Self {
        UserError::Password(err.to_string())
    }
}
