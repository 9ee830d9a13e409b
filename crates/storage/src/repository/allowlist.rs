use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::AllowlistStore;
use crate::Database;
use crate::error::{Result, StorageError};
use crate::models::{AllowlistEntry, Competition, NormalizedEmail};

pub struct AllowlistRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AllowlistRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, competition_id: Uuid) -> Result<Vec<AllowlistEntry>> {
        let entries = sqlx::query_as::<_, AllowlistEntry>(
            r#"
            SELECT entry_id, competition_id, email, created_at
            FROM competition_allowlist
            WHERE competition_id = $1
            ORDER BY created_at ASC, email ASC
            "#,
        )
        .bind(competition_id)
        .fetch_all(self.pool)
        .await?;

        Ok(entries)
    }

    pub async fn contains(&self, competition_id: Uuid, email: &NormalizedEmail) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM competition_allowlist
                WHERE competition_id = $1 AND email = $2
            )
            "#,
        )
        .bind(competition_id)
        .bind(email.as_str())
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }

    pub async fn competitions_for_email(&self, email: &NormalizedEmail) -> Result<Vec<Competition>> {
        let competitions = sqlx::query_as::<_, Competition>(
            r#"
            SELECT c.competition_id, c.name, c.description, c.start_date, c.end_date,
                   c.status, c.created_by, c.created_at
            FROM competition_allowlist a
            INNER JOIN competitions c ON a.competition_id = c.competition_id
            WHERE a.email = $1
            ORDER BY c.created_at DESC
            "#,
        )
        .bind(email.as_str())
        .fetch_all(self.pool)
        .await?;

        Ok(competitions)
    }

    pub async fn create(
        &self,
        competition_id: Uuid,
        email: &NormalizedEmail,
    ) -> Result<AllowlistEntry> {
        let entry = sqlx::query_as::<_, AllowlistEntry>(
            r#"
            INSERT INTO competition_allowlist (entry_id, competition_id, email)
            VALUES ($1, $2, $3)
            RETURNING entry_id, competition_id, email, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(competition_id)
        .bind(email.as_str())
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::on_unique_violation(e, "Email is already on the allowlist"))?;

        Ok(entry)
    }

    pub async fn delete(&self, competition_id: Uuid, email: &NormalizedEmail) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM competition_allowlist
            WHERE competition_id = $1 AND email = $2
            "#,
        )
        .bind(competition_id)
        .bind(email.as_str())
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl AllowlistStore for Database {
    async fn allowlist(&self, competition_id: Uuid) -> Result<Vec<AllowlistEntry>> {
        AllowlistRepository::new(self.pool()).list(competition_id).await
    }

    async fn is_allowlisted(&self, competition_id: Uuid, email: &NormalizedEmail) -> Result<bool> {
        AllowlistRepository::new(self.pool())
            .contains(competition_id, email)
            .await
    }

    async fn allowlisted_competitions(&self, email: &NormalizedEmail) -> Result<Vec<Competition>> {
        AllowlistRepository::new(self.pool())
            .competitions_for_email(email)
            .await
    }

    async fn add_allowlist_entry(
        &self,
        competition_id: Uuid,
        email: &NormalizedEmail,
    ) -> Result<AllowlistEntry> {
        AllowlistRepository::new(self.pool())
            .create(competition_id, email)
            .await
    }

    async fn remove_allowlist_entry(
        &self,
        competition_id: Uuid,
        email: &NormalizedEmail,
    ) -> Result<bool> {
        AllowlistRepository::new(self.pool())
            .delete(competition_id, email)
            .await
    }
}
