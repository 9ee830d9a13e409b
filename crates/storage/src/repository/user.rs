use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::UserStore;
use crate::Database;
use crate::error::{Result, StorageError};
use crate::models::{NewUser, NormalizedEmail, User};

const USER_COLUMNS: &str =
    "user_id, first_name, last_name, email, height, is_admin, created_at";

/// Repository for User database operations
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, user_id: Uuid) -> Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound("User"))?;

        Ok(user)
    }

    pub async fn find_by_email(&self, email: &NormalizedEmail) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }

    pub async fn create(&self, user: &NewUser) -> Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (user_id, first_name, last_name, email, height, is_admin)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.email.as_str())
        .bind(user.height)
        .bind(user.is_admin)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            StorageError::on_unique_violation(e, "User with this email already exists")
        })?;

        Ok(user)
    }

    pub async fn set_admin(&self, user_id: Uuid, is_admin: bool) -> Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET is_admin = $2 WHERE user_id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(user_id)
        .bind(is_admin)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound("User"))?;

        Ok(user)
    }
}

#[async_trait]
impl UserStore for Database {
    async fn find_user(&self, user_id: Uuid) -> Result<User> {
        UserRepository::new(self.pool()).find_by_id(user_id).await
    }

    async fn find_user_by_email(&self, email: &NormalizedEmail) -> Result<Option<User>> {
        UserRepository::new(self.pool()).find_by_email(email).await
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        UserRepository::new(self.pool()).list().await
    }

    async fn create_user(&self, user: &NewUser) -> Result<User> {
        UserRepository::new(self.pool()).create(user).await
    }

    async fn set_admin(&self, user_id: Uuid, is_admin: bool) -> Result<User> {
        UserRepository::new(self.pool()).set_admin(user_id, is_admin).await
    }
}
