use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::CompetitionStore;
use crate::Database;
use crate::error::{Result, StorageError};
use crate::models::{Competition, NewCompetition};

const COMPETITION_COLUMNS: &str = "competition_id, name, description, start_date, end_date, \
                                   status, created_by, created_at";

/// Repository for Competition database operations
pub struct CompetitionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CompetitionRepository<'a> {
    /// Create a new CompetitionRepository
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all competitions
    pub async fn list(&self) -> Result<Vec<Competition>> {
        let competitions = sqlx::query_as::<_, Competition>(&format!(
            "SELECT {COMPETITION_COLUMNS} FROM competitions ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(competitions)
    }

    /// List the competitions a user participates in
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Competition>> {
        let competitions = sqlx::query_as::<_, Competition>(
            r#"
            SELECT c.competition_id, c.name, c.description, c.start_date, c.end_date,
                   c.status, c.created_by, c.created_at
            FROM competition_participants cp
            INNER JOIN competitions c ON cp.competition_id = c.competition_id
            WHERE cp.user_id = $1
            ORDER BY c.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(competitions)
    }

    /// Get a competition by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Competition> {
        let competition = sqlx::query_as::<_, Competition>(&format!(
            "SELECT {COMPETITION_COLUMNS} FROM competitions WHERE competition_id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound("Competition"))?;

        Ok(competition)
    }

    /// Create a new competition
    pub async fn create(&self, req: &NewCompetition) -> Result<Competition> {
        let competition = sqlx::query_as::<_, Competition>(&format!(
            r#"
            INSERT INTO competitions (
                competition_id, name, description, start_date, end_date, status, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {COMPETITION_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&req.name)
        .bind(&req.description)
        .bind(req.start_date)
        .bind(req.end_date)
        .bind(req.status)
        .bind(req.created_by)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::on_unique_violation(e, "Competition already exists"))?;

        Ok(competition)
    }

    /// Update an existing competition
    pub async fn update(&self, competition: &Competition) -> Result<Competition> {
        let competition = sqlx::query_as::<_, Competition>(&format!(
            r#"
            UPDATE competitions
            SET
                name = $2,
                description = $3,
                start_date = $4,
                end_date = $5,
                status = $6
            WHERE competition_id = $1
            RETURNING {COMPETITION_COLUMNS}
            "#
        ))
        .bind(competition.competition_id)
        .bind(&competition.name)
        .bind(&competition.description)
        .bind(competition.start_date)
        .bind(competition.end_date)
        .bind(competition.status)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound("Competition"))?;

        Ok(competition)
    }
}

#[async_trait]
impl CompetitionStore for Database {
    async fn find_competition(&self, competition_id: Uuid) -> Result<Competition> {
        CompetitionRepository::new(self.pool())
            .find_by_id(competition_id)
            .await
    }

    async fn list_competitions(&self) -> Result<Vec<Competition>> {
        CompetitionRepository::new(self.pool()).list().await
    }

    async fn competitions_for_user(&self, user_id: Uuid) -> Result<Vec<Competition>> {
        CompetitionRepository::new(self.pool())
            .list_for_user(user_id)
            .await
    }

    async fn create_competition(&self, competition: &NewCompetition) -> Result<Competition> {
        CompetitionRepository::new(self.pool()).create(competition).await
    }

    async fn update_competition(&self, competition: &Competition) -> Result<Competition> {
        CompetitionRepository::new(self.pool()).update(competition).await
    }
}
