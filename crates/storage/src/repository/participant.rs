use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::ParticipantStore;
use crate::Database;
use crate::error::{Result, StorageError};
use crate::models::{CompetitionParticipant, ParticipantStatus};

pub struct ParticipantRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ParticipantRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, competition_id: Uuid) -> Result<Vec<CompetitionParticipant>> {
        let participants = sqlx::query_as::<_, CompetitionParticipant>(
            r#"
            SELECT participant_id, competition_id, user_id, status, joined_at
            FROM competition_participants
            WHERE competition_id = $1
            ORDER BY joined_at ASC, participant_id ASC
            "#,
        )
        .bind(competition_id)
        .fetch_all(self.pool)
        .await?;

        Ok(participants)
    }

    pub async fn find(
        &self,
        competition_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<CompetitionParticipant>> {
        let participant = sqlx::query_as::<_, CompetitionParticipant>(
            r#"
            SELECT participant_id, competition_id, user_id, status, joined_at
            FROM competition_participants
            WHERE competition_id = $1 AND user_id = $2
            "#,
        )
        .bind(competition_id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(participant)
    }

    pub async fn create(
        &self,
        competition_id: Uuid,
        user_id: Uuid,
        status: ParticipantStatus,
    ) -> Result<CompetitionParticipant> {
        let participant = sqlx::query_as::<_, CompetitionParticipant>(
            r#"
            INSERT INTO competition_participants (participant_id, competition_id, user_id, status)
            VALUES ($1, $2, $3, $4)
            RETURNING participant_id, competition_id, user_id, status, joined_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(competition_id)
        .bind(user_id)
        .bind(status)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            StorageError::on_unique_violation(e, "User is already participating in this competition")
        })?;

        Ok(participant)
    }
}

#[async_trait]
impl ParticipantStore for Database {
    async fn participants(&self, competition_id: Uuid) -> Result<Vec<CompetitionParticipant>> {
        ParticipantRepository::new(self.pool()).list(competition_id).await
    }

    async fn find_participant(
        &self,
        competition_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<CompetitionParticipant>> {
        ParticipantRepository::new(self.pool())
            .find(competition_id, user_id)
            .await
    }

    async fn add_participant(
        &self,
        competition_id: Uuid,
        user_id: Uuid,
        status: ParticipantStatus,
    ) -> Result<CompetitionParticipant> {
        ParticipantRepository::new(self.pool())
            .create(competition_id, user_id, status)
            .await
    }
}
