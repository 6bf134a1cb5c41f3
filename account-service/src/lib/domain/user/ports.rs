use async_trait::async_trait;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::models::EmailAddress;
use crate::user::models::Username;

/// Port for user domain service operations.
///
/// Every operation on an existing record takes the already-resolved
/// `caller` so the service can apply the authorization policy.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Resolve the user a bearer token belongs to.
    ///
    /// # Errors
    /// * `NotAuthenticated` - Token is invalid or its subject no longer exists
    /// * `DatabaseError` - Database operation failed
    async fn resolve_identity(&self, token: &str) -> Result<User, UserError>;

    /// Verify a username/password pair and issue an access token.
    ///
    /// # Returns
    /// Signed access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password
    /// * `Token` - Token could not be signed
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, username: &str, password: &str) -> Result<String, UserError>;

    /// Create new user.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken (checked first)
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// List every user. Admin only.
    ///
    /// # Errors
    /// * `Forbidden` - Caller is not an admin
    /// * `DatabaseError` - Database operation failed
    async fn list_users(&self, caller: &User) -> Result<Vec<User>, UserError>;

    /// Retrieve a user by id. Owner or admin.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist (checked before authorization)
    /// * `Forbidden` - Caller is neither the owner nor an admin
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, caller: &User, id: &UserId) -> Result<User, UserError>;

    /// Replace the mutable fields of a user. Owner or admin.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Forbidden` - Caller is neither the owner nor an admin
    /// * `UsernameAlreadyExists` - New username belongs to another user
    /// * `EmailAlreadyExists` - New email belongs to another user
    /// * `DatabaseError` - Database operation failed
    async fn update_user(
        &self,
        caller: &User,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError>;

    /// Delete a user. Owner or admin.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Forbidden` - Caller is neither the owner nor an admin
    /// * `DatabaseError` - Database operation failed
    async fn delete_user(&self, caller: &User, id: &UserId) -> Result<(), UserError>;
}

/// Persistence operations for user aggregate.
///
/// Implementations must enforce username and email uniqueness themselves;
/// the service's pre-checks only exist to produce a friendly error early.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user and assign its id.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by username.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;

    /// Retrieve all users ordered by id.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<User>, UserError>;

    /// Overwrite username, email, role and password hash of an existing user.
    ///
    /// `id` selects the record; `created_at` is never written.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `UsernameAlreadyExists` - New username is already taken
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, user: User) -> Result<User, UserError>;

    /// Remove user from storage.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &UserId) -> Result<(), UserError>;
}
