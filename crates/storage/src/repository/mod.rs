//! Typed store interfaces over users, weigh-ins, competitions and enrollment.
//!
//! Every trait is implemented by [`Database`](crate::Database) (PostgreSQL) and
//! by [`MemoryStore`]. Services are generic over [`Store`] so both backends run
//! the same code paths.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    AllowlistEntry, Competition, CompetitionParticipant, DateRange, NewCompetition, NewUser,
    NewWeightEntry, NormalizedEmail, ParticipantStatus, User, WeightEntry,
};

pub mod allowlist;
pub mod competition;
mod memory;
pub mod participant;
pub mod user;
pub mod weight_entry;

pub use memory::MemoryStore;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user(&self, user_id: Uuid) -> Result<User>;

    async fn find_user_by_email(&self, email: &NormalizedEmail) -> Result<Option<User>>;

    /// Newest accounts first.
    async fn list_users(&self) -> Result<Vec<User>>;

    async fn create_user(&self, user: &NewUser) -> Result<User>;

    async fn set_admin(&self, user_id: Uuid, is_admin: bool) -> Result<User>;
}

#[async_trait]
pub trait WeightEntryStore: Send + Sync {
    /// Entries of one user ordered by `(date, entry_id)`, optionally limited to `range`.
    async fn entries_for_user(
        &self,
        user_id: Uuid,
        range: Option<DateRange>,
    ) -> Result<Vec<WeightEntry>>;

    async fn add_entry(&self, entry: &NewWeightEntry) -> Result<WeightEntry>;
}

#[async_trait]
pub trait CompetitionStore: Send + Sync {
    async fn find_competition(&self, competition_id: Uuid) -> Result<Competition>;

    /// Newest competitions first.
    async fn list_competitions(&self) -> Result<Vec<Competition>>;

    /// Competitions the user participates in, newest first.
    async fn competitions_for_user(&self, user_id: Uuid) -> Result<Vec<Competition>>;

    async fn create_competition(&self, competition: &NewCompetition) -> Result<Competition>;

    /// Overwrites every mutable column with the values in `competition`.
    async fn update_competition(&self, competition: &Competition) -> Result<Competition>;
}

#[async_trait]
pub trait ParticipantStore: Send + Sync {
    /// Participants in join order.
    async fn participants(&self, competition_id: Uuid) -> Result<Vec<CompetitionParticipant>>;

    async fn find_participant(
        &self,
        competition_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<CompetitionParticipant>>;

    /// Plain insert. Performs no authorization; a second record for the same
    /// pair is rejected as `Duplicate` by the store's uniqueness constraint.
    async fn add_participant(
        &self,
        competition_id: Uuid,
        user_id: Uuid,
        status: ParticipantStatus,
    ) -> Result<CompetitionParticipant>;
}

#[async_trait]
pub trait AllowlistStore: Send + Sync {
    async fn allowlist(&self, competition_id: Uuid) -> Result<Vec<AllowlistEntry>>;

    async fn is_allowlisted(&self, competition_id: Uuid, email: &NormalizedEmail) -> Result<bool>;

    /// Every competition whose allowlist holds `email`.
    async fn allowlisted_competitions(&self, email: &NormalizedEmail) -> Result<Vec<Competition>>;

    async fn add_allowlist_entry(
        &self,
        competition_id: Uuid,
        email: &NormalizedEmail,
    ) -> Result<AllowlistEntry>;

    /// Returns whether an entry was removed.
    async fn remove_allowlist_entry(
        &self,
        competition_id: Uuid,
        email: &NormalizedEmail,
    ) -> Result<bool>;
}

/// Everything the services need from a backend.
pub trait Store:
    UserStore + WeightEntryStore + CompetitionStore + ParticipantStore + AllowlistStore
{
}

impl<T> Store for T where
    T: UserStore + WeightEntryStore + CompetitionStore + ParticipantStore + AllowlistStore + ?Sized
{
}
