use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

const USER_COLUMNS: &str = "id, username, email, role, password_hash, created_at";

/// Postgres-backed record store.
///
/// The `users_username_key` and `users_email_key` unique constraints are the
/// authoritative uniqueness guard; violations map back to conflict errors.
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    role: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    /// A stored row that fails domain validation is a store fault, not a
    /// client input error.
    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let corrupt = |e: &dyn std::fmt::Display| {
            UserError::DatabaseError(format!("corrupt users row {}: {}", id, e))
        };

        Ok(User {
            id: UserId(id),
            username: Username::new(row.username).map_err(|e| corrupt(&e))?,
            email: EmailAddress::new(row.email).map_err(|e| corrupt(&e))?,
            role: row.role.parse::<Role>().map_err(|e| corrupt(&e))?,
            password_hash: row.password_hash,
            created_at: row.created_at,
        })
    }
}

fn map_write_error(e: sqlx::Error, username: &Username, email: &EmailAddress) -> UserError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            if db_err.constraint() == Some("users_username_key") {
                return UserError::UsernameAlreadyExists(username.as_str().to_string());
            }
            if db_err.constraint() == Some("users_email_key") {
                return UserError::EmailAlreadyExists(email.as_str().to_string());
            }
        }
    }
    UserError::DatabaseError(e.to_string())
}

fn database_error(e: sqlx::Error) -> UserError {
    UserError::DatabaseError(e.to_string())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (username, email, role, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(user.role.as_str())
        .bind(&user.password_hash)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &user.username, &user.email))?;

        row.try_into()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?
        .map(User::try_from)
        .transpose()
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?
        .map(User::try_from)
        .transpose()
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?
        .map(User::try_from)
        .transpose()
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        sqlx::query_as::<_, UserRow>(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users
            SET username = $2, email = $3, role = $4, password_hash = $5
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.id.value())
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(user.role.as_str())
        .bind(&user.password_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &user.username, &user.email))?;

        match row {
            Some(row) => row.try_into(),
            None => Err(UserError::NotFound(user.id)),
        }
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(*id));
        }

        Ok(())
    }
}
