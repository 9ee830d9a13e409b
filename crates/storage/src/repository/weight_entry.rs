use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::WeightEntryStore;
use crate::Database;
use crate::error::Result;
use crate::models::{DateRange, NewWeightEntry, WeightEntry};

pub struct WeightEntryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> WeightEntryRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Entries for one user, ordered by date then insertion.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        range: Option<DateRange>,
    ) -> Result<Vec<WeightEntry>> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(
            r#"
            SELECT entry_id, user_id, date, weight, notes, created_at
            FROM weight_entries
            WHERE user_id =
            "#,
        );
        query.push_bind(user_id);

        if let Some(range) = range {
            query.push(" AND date >= ");
            query.push_bind(range.start);

            if let Some(end) = range.end {
                query.push(" AND date <= ");
                query.push_bind(end);
            }
        }

        query.push(" ORDER BY date ASC, entry_id ASC");

        let entries = query
            .build_query_as::<WeightEntry>()
            .fetch_all(self.pool)
            .await?;

        Ok(entries)
    }

    pub async fn create(&self, entry: &NewWeightEntry) -> Result<WeightEntry> {
        let entry = sqlx::query_as::<_, WeightEntry>(
            r#"
            INSERT INTO weight_entries (user_id, date, weight, notes)
            VALUES ($1, $2, $3, $4)
            RETURNING entry_id, user_id, date, weight, notes, created_at
            "#,
        )
        .bind(entry.user_id)
        .bind(entry.date)
        .bind(entry.weight)
        .bind(&entry.notes)
        .fetch_one(self.pool)
        .await?;

        Ok(entry)
    }
}

#[async_trait]
impl WeightEntryStore for Database {
    async fn entries_for_user(
        &self,
        user_id: Uuid,
        range: Option<DateRange>,
    ) -> Result<Vec<WeightEntry>> {
        WeightEntryRepository::new(self.pool())
            .list_for_user(user_id, range)
            .await
    }

    async fn add_entry(&self, entry: &NewWeightEntry) -> Result<WeightEntry> {
        WeightEntryRepository::new(self.pool()).create(entry).await
    }
}
