#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use storage::MemoryStore;
use storage::config::AccessConfig;
use storage::error::{Result, StorageError};
use storage::models::{
    AllowlistEntry, Competition, CompetitionParticipant, CompetitionStatus, DateRange,
    NewCompetition, NewUser, NewWeightEntry, NormalizedEmail, ParticipantStatus, User,
    WeightEntry,
};
use storage::repository::{
    AllowlistStore, CompetitionStore, ParticipantStore, UserStore, WeightEntryStore,
};
use storage::services::access::AccessPolicy;
use uuid::Uuid;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const SUPER_ADMIN_EMAIL: &str = "root@example.com";

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn policy() -> AccessPolicy {
    AccessPolicy::new(AccessConfig::new([ADMIN_EMAIL], [SUPER_ADMIN_EMAIL]))
}

pub async fn user(store: &MemoryStore, email: &str, height: f64, is_admin: bool) -> User {
    store
        .create_user(&NewUser {
            first_name: email.split('@').next().unwrap().to_string(),
            last_name: "Tester".to_string(),
            email: NormalizedEmail::new(email),
            height,
            is_admin,
        })
        .await
        .unwrap()
}

pub async fn competition(
    store: &MemoryStore,
    created_by: Uuid,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
) -> Competition {
    store
        .create_competition(&NewCompetition {
            name: "Spring Cut".to_string(),
            description: None,
            start_date,
            end_date,
            status: CompetitionStatus::Active,
            created_by,
        })
        .await
        .unwrap()
}

pub async fn weigh_in(store: &MemoryStore, user_id: Uuid, on: NaiveDate, weight: f64) {
    store
        .add_entry(&NewWeightEntry {
            user_id,
            date: on,
            weight,
            notes: None,
        })
        .await
        .unwrap();
}

/// [`MemoryStore`] whose participant inserts into one competition fail as if
/// the database connection had dropped.
pub struct FailingEnrollments {
    pub inner: MemoryStore,
    pub competition_id: Uuid,
}

#[async_trait]
impl UserStore for FailingEnrollments {
    async fn find_user(&self, user_id: Uuid) -> Result<User> {
        self.inner.find_user(user_id).await
    }

    async fn find_user_by_email(&self, email: &NormalizedEmail) -> Result<Option<User>> {
        self.inner.find_user_by_email(email).await
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.inner.list_users().await
    }

    async fn create_user(&self, user: &NewUser) -> Result<User> {
        self.inner.create_user(user).await
    }

    async fn set_admin(&self, user_id: Uuid, is_admin: bool) -> Result<User> {
        self.inner.set_admin(user_id, is_admin).await
    }
}

#[async_trait]
impl WeightEntryStore for FailingEnrollments {
    async fn entries_for_user(
        &self,
        user_id: Uuid,
        range: Option<DateRange>,
    ) -> Result<Vec<WeightEntry>> {
        self.inner.entries_for_user(user_id, range).await
    }

    async fn add_entry(&self, entry: &NewWeightEntry) -> Result<WeightEntry> {
        self.inner.add_entry(entry).await
    }
}

#[async_trait]
impl CompetitionStore for FailingEnrollments {
    async fn find_competition(&self, competition_id: Uuid) -> Result<Competition> {
        self.inner.find_competition(competition_id).await
    }

    async fn list_competitions(&self) -> Result<Vec<Competition>> {
        self.inner.list_competitions().await
    }

    async fn competitions_for_user(&self, user_id: Uuid) -> Result<Vec<Competition>> {
        self.inner.competitions_for_user(user_id).await
    }

    async fn create_competition(&self, competition: &NewCompetition) -> Result<Competition> {
        self.inner.create_competition(competition).await
    }

    async fn update_competition(&self, competition: &Competition) -> Result<Competition> {
        self.inner.update_competition(competition).await
    }
}

#[async_trait]
impl ParticipantStore for FailingEnrollments {
    async fn participants(&self, competition_id: Uuid) -> Result<Vec<CompetitionParticipant>> {
        self.inner.participants(competition_id).await
    }

    async fn find_participant(
        &self,
        competition_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<CompetitionParticipant>> {
        self.inner.find_participant(competition_id, user_id).await
    }

    async fn add_participant(
        &self,
        competition_id: Uuid,
        user_id: Uuid,
        status: ParticipantStatus,
    ) -> Result<CompetitionParticipant> {
        if competition_id == self.competition_id {
            return Err(StorageError::Database(sqlx::Error::PoolTimedOut));
        }
        self.inner.add_participant(competition_id, user_id, status).await
    }
}

#[async_trait]
impl AllowlistStore for FailingEnrollments {
    async fn allowlist(&self, competition_id: Uuid) -> Result<Vec<AllowlistEntry>> {
        self.inner.allowlist(competition_id).await
    }

    async fn is_allowlisted(&self, competition_id: Uuid, email: &NormalizedEmail) -> Result<bool> {
        self.inner.is_allowlisted(competition_id, email).await
    }

    async fn allowlisted_competitions(&self, email: &NormalizedEmail) -> Result<Vec<Competition>> {
        self.inner.allowlisted_competitions(email).await
    }

    async fn add_allowlist_entry(
        &self,
        competition_id: Uuid,
        email: &NormalizedEmail,
    ) -> Result<AllowlistEntry> {
        self.inner.add_allowlist_entry(competition_id, email).await
    }

    async fn remove_allowlist_entry(
        &self,
        competition_id: Uuid,
        email: &NormalizedEmail,
    ) -> Result<bool> {
        self.inner.remove_allowlist_entry(competition_id, email).await
    }
}
