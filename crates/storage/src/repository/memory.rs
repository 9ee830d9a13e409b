use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{AllowlistStore, CompetitionStore, ParticipantStore, UserStore, WeightEntryStore};
use crate::error::{Result, StorageError};
use crate::models::{
    AllowlistEntry, Competition, CompetitionParticipant, DateRange, NewCompetition, NewUser,
    NewWeightEntry, NormalizedEmail, ParticipantStatus, User, WeightEntry,
};

/// Process-local store with the same uniqueness rules as the PostgreSQL schema.
///
/// Used for tests and local development without a database.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    users: Vec<User>,
    entries: Vec<WeightEntry>,
    next_entry_id: i64,
    competitions: Vec<Competition>,
    participants: Vec<CompetitionParticipant>,
    allowlist: Vec<AllowlistEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Newest first; rows inserted later win ties on identical timestamps.
fn newest_first<T, F>(rows: impl DoubleEndedIterator<Item = T>, created_at: F) -> Vec<T>
where
    F: Fn(&T) -> NaiveDateTime,
{
    let mut rows: Vec<T> = rows.rev().collect();
    rows.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    rows
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user(&self, user_id: Uuid) -> Result<User> {
        let state = self.state.read().await;
        state
            .users
            .iter()
            .find(|u| u.user_id == user_id)
            .cloned()
            .ok_or(StorageError::NotFound("User"))
    }

    async fn find_user_by_email(&self, email: &NormalizedEmail) -> Result<Option<User>> {
        let state = self.state.read().await;
        Ok(state
            .users
            .iter()
            .find(|u| u.email == email.as_str())
            .cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let state = self.state.read().await;
        Ok(newest_first(state.users.iter().cloned(), |u| u.created_at))
    }

    async fn create_user(&self, user: &NewUser) -> Result<User> {
        let mut state = self.state.write().await;
        if state.users.iter().any(|u| u.email == user.email.as_str()) {
            return Err(StorageError::Duplicate(
                "User with this email already exists".to_string(),
            ));
        }

        let user = User {
            user_id: Uuid::new_v4(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.to_string(),
            height: user.height,
            is_admin: user.is_admin,
            created_at: now(),
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn set_admin(&self, user_id: Uuid, is_admin: bool) -> Result<User> {
        let mut state = self.state.write().await;
        let user = state
            .users
            .iter_mut()
            .find(|u| u.user_id == user_id)
            .ok_or(StorageError::NotFound("User"))?;
        user.is_admin = is_admin;
        Ok(user.clone())
    }
}

#[async_trait]
impl WeightEntryStore for MemoryStore {
    async fn entries_for_user(
        &self,
        user_id: Uuid,
        range: Option<DateRange>,
    ) -> Result<Vec<WeightEntry>> {
        let state = self.state.read().await;
        let mut entries: Vec<WeightEntry> = state
            .entries
            .iter()
            .filter(|e| e.user_id == user_id)
            .filter(|e| range.is_none_or(|r| r.contains(e.date)))
            .cloned()
            .collect();
        entries.sort_by_key(|e| (e.date, e.entry_id));
        Ok(entries)
    }

    async fn add_entry(&self, entry: &NewWeightEntry) -> Result<WeightEntry> {
        let mut state = self.state.write().await;
        if !state.users.iter().any(|u| u.user_id == entry.user_id) {
            return Err(StorageError::NotFound("User"));
        }

        state.next_entry_id += 1;
        let entry = WeightEntry {
            entry_id: state.next_entry_id,
            user_id: entry.user_id,
            date: entry.date,
            weight: entry.weight,
            notes: entry.notes.clone(),
            created_at: now(),
        };
        state.entries.push(entry.clone());
        Ok(entry)
    }
}

#[async_trait]
impl CompetitionStore for MemoryStore {
    async fn find_competition(&self, competition_id: Uuid) -> Result<Competition> {
        let state = self.state.read().await;
        state
            .competitions
            .iter()
            .find(|c| c.competition_id == competition_id)
            .cloned()
            .ok_or(StorageError::NotFound("Competition"))
    }

    async fn list_competitions(&self) -> Result<Vec<Competition>> {
        let state = self.state.read().await;
        Ok(newest_first(state.competitions.iter().cloned(), |c| {
            c.created_at
        }))
    }

    async fn competitions_for_user(&self, user_id: Uuid) -> Result<Vec<Competition>> {
        let state = self.state.read().await;
        let joined: HashSet<Uuid> = state
            .participants
            .iter()
            .filter(|p| p.user_id == user_id)
            .map(|p| p.competition_id)
            .collect();
        let competitions = state
            .competitions
            .iter()
            .filter(|c| joined.contains(&c.competition_id))
            .cloned();
        Ok(newest_first(competitions, |c| c.created_at))
    }

    async fn create_competition(&self, competition: &NewCompetition) -> Result<Competition> {
        let mut state = self.state.write().await;
        let competition = Competition {
            competition_id: Uuid::new_v4(),
            name: competition.name.clone(),
            description: competition.description.clone(),
            start_date: competition.start_date,
            end_date: competition.end_date,
            status: competition.status,
            created_by: competition.created_by,
            created_at: now(),
        };
        state.competitions.push(competition.clone());
        Ok(competition)
    }

    async fn update_competition(&self, competition: &Competition) -> Result<Competition> {
        let mut state = self.state.write().await;
        let stored = state
            .competitions
            .iter_mut()
            .find(|c| c.competition_id == competition.competition_id)
            .ok_or(StorageError::NotFound("Competition"))?;
        stored.name = competition.name.clone();
        stored.description = competition.description.clone();
        stored.start_date = competition.start_date;
        stored.end_date = competition.end_date;
        stored.status = competition.status;
        Ok(stored.clone())
    }
}

#[async_trait]
impl ParticipantStore for MemoryStore {
    async fn participants(&self, competition_id: Uuid) -> Result<Vec<CompetitionParticipant>> {
        let state = self.state.read().await;
        Ok(state
            .participants
            .iter()
            .filter(|p| p.competition_id == competition_id)
            .cloned()
            .collect())
    }

    async fn find_participant(
        &self,
        competition_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<CompetitionParticipant>> {
        let state = self.state.read().await;
        Ok(state
            .participants
            .iter()
            .find(|p| p.competition_id == competition_id && p.user_id == user_id)
            .cloned())
    }

    async fn add_participant(
        &self,
        competition_id: Uuid,
        user_id: Uuid,
        status: ParticipantStatus,
    ) -> Result<CompetitionParticipant> {
        let mut state = self.state.write().await;
        if !state
            .competitions
            .iter()
            .any(|c| c.competition_id == competition_id)
        {
            return Err(StorageError::NotFound("Competition"));
        }
        if !state.users.iter().any(|u| u.user_id == user_id) {
            return Err(StorageError::NotFound("User"));
        }
        if state
            .participants
            .iter()
            .any(|p| p.competition_id == competition_id && p.user_id == user_id)
        {
            return Err(StorageError::Duplicate(
                "User is already participating in this competition".to_string(),
            ));
        }

        let participant = CompetitionParticipant {
            participant_id: Uuid::new_v4(),
            competition_id,
            user_id,
            status,
            joined_at: now(),
        };
        state.participants.push(participant.clone());
        Ok(participant)
    }
}

#[async_trait]
impl AllowlistStore for MemoryStore {
    async fn allowlist(&self, competition_id: Uuid) -> Result<Vec<AllowlistEntry>> {
        let state = self.state.read().await;
        Ok(state
            .allowlist
            .iter()
            .filter(|a| a.competition_id == competition_id)
            .cloned()
            .collect())
    }

    async fn is_allowlisted(&self, competition_id: Uuid, email: &NormalizedEmail) -> Result<bool> {
        let state = self.state.read().await;
        Ok(state
            .allowlist
            .iter()
            .any(|a| a.competition_id == competition_id && a.email == email.as_str()))
    }

    async fn allowlisted_competitions(&self, email: &NormalizedEmail) -> Result<Vec<Competition>> {
        let state = self.state.read().await;
        let listed: HashSet<Uuid> = state
            .allowlist
            .iter()
            .filter(|a| a.email == email.as_str())
            .map(|a| a.competition_id)
            .collect();
        let competitions = state
            .competitions
            .iter()
            .filter(|c| listed.contains(&c.competition_id))
            .cloned();
        Ok(newest_first(competitions, |c| c.created_at))
    }

    async fn add_allowlist_entry(
        &self,
        competition_id: Uuid,
        email: &NormalizedEmail,
    ) -> Result<AllowlistEntry> {
        let mut state = self.state.write().await;
        if !state
            .competitions
            .iter()
            .any(|c| c.competition_id == competition_id)
        {
            return Err(StorageError::NotFound("Competition"));
        }
        if state
            .allowlist
            .iter()
            .any(|a| a.competition_id == competition_id && a.email == email.as_str())
        {
            return Err(StorageError::Duplicate(
                "Email is already on the allowlist".to_string(),
            ));
        }

        let entry = AllowlistEntry {
            entry_id: Uuid::new_v4(),
            competition_id,
            email: email.to_string(),
            created_at: now(),
        };
        state.allowlist.push(entry.clone());
        Ok(entry)
    }

    async fn remove_allowlist_entry(
        &self,
        competition_id: Uuid,
        email: &NormalizedEmail,
    ) -> Result<bool> {
        let mut state = self.state.write().await;
        let before = state.allowlist.len();
        state
            .allowlist
            .retain(|a| !(a.competition_id == competition_id && a.email == email.as_str()));
        Ok(state.allowlist.len() < before)
    }
}
