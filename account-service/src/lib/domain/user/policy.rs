//! Authorization gates shared by the user service operations.
//!
//! Mutating operations on an existing record apply these in a fixed order:
//! existence, then ownership/admin, then username and email uniqueness.
//! Creation checks username before email.

use crate::domain::user::errors::Permission;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;

/// Fail with `Forbidden(AdminOnly)` unless `caller` is an admin.
pub fn require_admin(caller: &User) -> Result<(), UserError> {
    if caller.is_admin() {
        Ok(())
    } else {
        tracing::debug!(caller_id = %caller.id, "Admin permission denied");
        Err(UserError::Forbidden(Permission::AdminOnly))
    }
}

/// Fail with `Forbidden(SelfOrAdmin)` unless `caller` owns `target_id` or is an admin.
pub fn require_self_or_admin(caller: &User, target_id: &UserId) -> Result<(), UserError> {
    if caller.id == *target_id || caller.is_admin() {
        Ok(())
    } else {
        tracing::debug!(
            caller_id = %caller.id,
            target_id = %target_id,
            "Self-or-admin permission denied"
        );
        Err(UserError::Forbidden(Permission::SelfOrAdmin))
    }
}

/// Unwrap a lookup result, failing with `NotFound(id)` when it is empty.
pub fn require_exists(record: Option<User>, id: &UserId) -> Result<User, UserError> {
    record.ok_or(UserError::NotFound(*id))
}

/// Fail with `UsernameAlreadyExists` if another record holds `candidate`.
///
/// A record whose id equals `excluding` is ignored, so an update may keep
/// its own username.
pub async fn require_unique_username<UR>(
    repository: &UR,
    candidate: &Username,
    excluding: Option<&UserId>,
) -> Result<(), UserError>
where
    UR: UserRepository + ?Sized,
{
    match repository.find_by_username(candidate).await? {
        Some(existing) if Some(&existing.id) != excluding => Err(
            UserError::UsernameAlreadyExists(candidate.as_str().to_string()),
        ),
        _ => Ok(()),
    }
}

/// Fail with `EmailAlreadyExists` if another record holds `candidate`.
pub async fn require_unique_email<UR>(
    repository: &UR,
    candidate: &EmailAddress,
    excluding: Option<&UserId>,
) -> Result<(), UserError>
where
    UR: UserRepository + ?Sized,
{
    match repository.find_by_email(candidate).await? {
        Some(existing) if Some(&existing.id) != excluding => Err(
            UserError::EmailAlreadyExists(candidate.as_str().to_string()),
        ),
        _ => Ok(()),
    }
}
