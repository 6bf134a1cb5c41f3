use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// Process-local record store.
///
/// Ids are assigned from 1 upward and never reused. Uniqueness of username
/// and email is checked under the write lock, so concurrent creations
/// cannot both succeed. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    state: RwLock<State>,
}

#[derive(Debug, Default)]
struct State {
    last_id: i64,
    users: BTreeMap<i64, User>,
}

impl State {
    fn check_unique(
        &self,
        username: &Username,
        email: &EmailAddress,
        excluding: Option<UserId>,
    ) -> Result<(), UserError> {
        let is_other = |user: &&User| Some(user.id) != excluding;

        if self
            .users
            .values()
            .filter(is_other)
            .any(|user| user.username == *username)
        {
            return Err(UserError::UsernameAlreadyExists(username.as_str().to_string()));
        }
        if self
            .users
            .values()
            .filter(is_other)
            .any(|user| user.email == *email)
        {
            return Err(UserError::EmailAlreadyExists(email.as_str().to_string()));
        }
        Ok(())
    }
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut state = self.state.write().await;
        state.check_unique(&user.username, &user.email, None)?;

        state.last_id += 1;
        let created = User {
            id: UserId(state.last_id),
            username: user.username,
            email: user.email,
            role: user.role,
            password_hash: user.password_hash,
            created_at: user.created_at,
        };
        state.users.insert(created.id.value(), created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.state.read().await.users.get(&id.value()).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|user| user.username == *username)
            .cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|user| user.email == *email).cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        Ok(self.state.read().await.users.values().cloned().collect())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut state = self.state.write().await;
        state.check_unique(&user.username, &user.email, Some(user.id))?;

        let stored = state
            .users
            .get_mut(&user.id.value())
            .ok_or(UserError::NotFound(user.id))?;

        stored.username = user.username;
        stored.email = user.email;
        stored.role = user.role;
        stored.password_hash = user.password_hash;

        Ok(stored.clone())
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        self.state
            .write()
            .await
            .users
            .remove(&id.value())
            .map(|_| ())
            .ok_or(UserError::NotFound(*id))
    }
}
