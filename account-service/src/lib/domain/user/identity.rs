use std::sync::Arc;

use auth::Authenticator;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Turns a presented bearer token into the caller's user record.
///
/// A bad token and a token whose subject no longer exists both surface as
/// `NotAuthenticated`, so callers cannot probe which ids exist.
pub struct IdentityResolver<UR>
where
    UR: UserRepository,
{
    authenticator: Arc<Authenticator>,
    repository: Arc<UR>,
}

impl<UR> IdentityResolver<UR>
where
    UR: UserRepository,
{
    pub fn new(authenticator: Arc<Authenticator>, repository: Arc<UR>) -> Self {
        Self {
            authenticator,
            repository,
        }
    }

    /// Resolve `token` to a stored user.
    ///
    /// # Errors
    /// * `NotAuthenticated` - Token failed verification or user is gone
    /// * `DatabaseError` - Lookup failed
    pub async fn resolve(&self, token: &str) -> Result<User, UserError> {
        let subject = self.authenticator.validate_token(token).map_err(|e| {
            tracing::debug!(error = %e, "Bearer token rejected");
            UserError::NotAuthenticated
        })?;

        let id = UserId(subject);
        self.repository.find_by_id(&id).await?.ok_or_else(|| {
            tracing::debug!(user_id = %id, "Token subject does not exist");
            UserError::NotAuthenticated
        })
    }
}
