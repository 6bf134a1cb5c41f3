use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::identity::IdentityResolver;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::policy;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
    identity: IdentityResolver<UR>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token codec
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            identity: IdentityResolver::new(Arc::clone(&authenticator), Arc::clone(&repository)),
            repository,
            authenticator,
        }
    }

    async fn find_existing(&self, id: &UserId) -> Result<User, UserError> {
        policy::require_exists(self.repository.find_by_id(id).await?, id)
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn resolve_identity(&self, token: &str) -> Result<User, UserError> {
        self.identity.resolve(token).await
    }

    async fn login(&self, username: &str, password: &str) -> Result<String, UserError> {
        let user = match Username::new(username.to_string()) {
            Ok(username) => self.repository.find_by_username(&username).await?,
            Err(_) => None,
        };

        let Some(user) = user else {
            self.authenticator.reject_unknown(password);
            return Err(UserError::InvalidCredentials);
        };

        let result = self
            .authenticator
            .authenticate(password, &user.password_hash, user.id.value())
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => UserError::InvalidCredentials,
                AuthenticationError::JwtError(err) => UserError::Token(err.to_string()),
            })?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(result.access_token)
    }

    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        policy::require_unique_username(self.repository.as_ref(), &command.username, None).await?;
        policy::require_unique_email(self.repository.as_ref(), &command.email, None).await?;

        let password_hash = self.authenticator.hash_password(&command.password)?;

        let user = self
            .repository
            .create(NewUser {
                username: command.username,
                email: command.email,
                role: command.role,
                password_hash,
                created_at: Utc::now(),
            })
            .await?;

        tracing::info!(
            user_id = %user.id,
            username = %user.username,
            role = %user.role,
            "User created"
        );

        Ok(user)
    }

    async fn list_users(&self, caller: &User) -> Result<Vec<User>, UserError> {
        policy::require_admin(caller)?;

        self.repository.list_all().await
    }

    async fn get_user(&self, caller: &User, id: &UserId) -> Result<User, UserError> {
        let target = self.find_existing(id).await?;
        policy::require_self_or_admin(caller, id)?;

        Ok(target)
    }

    async fn update_user(
        &self,
        caller: &User,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let target = self.find_existing(id).await?;
        policy::require_self_or_admin(caller, id)?;
        policy::require_unique_username(self.repository.as_ref(), &command.username, Some(id))
            .await?;
        policy::require_unique_email(self.repository.as_ref(), &command.email, Some(id)).await?;

        let password_hash = self.authenticator.hash_password(&command.password)?;

        let updated_user = self
            .repository
            .update(User {
                id: target.id,
                username: command.username,
                email: command.email,
                role: command.role,
                password_hash,
                created_at: target.created_at,
            })
            .await?;

        tracing::info!(
            user_id = %updated_user.id,
            caller_id = %caller.id,
            "User updated"
        );

        Ok(updated_user)
    }

    async fn delete_user(&self, caller: &User, id: &UserId) -> Result<(), UserError> {
        self.find_existing(id).await?;
        policy::require_self_or_admin(caller, id)?;

        self.repository.delete(id).await?;

        tracing::info!(user_id = %id, caller_id = %caller.id, "User deleted");

        Ok(())
    }
}
