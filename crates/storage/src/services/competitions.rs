//! Competition lifecycle and the access-gated views over it.

use uuid::Uuid;
use validator::Validate;

use super::access::{self, AccessPolicy};
use super::enrollment;
use super::leaderboard;
use crate::Store;
use crate::dto::competition::{
    CompetitionDetailResponse, CreateCompetitionRequest, ParticipantDetail,
    UpdateCompetitionRequest,
};
use crate::dto::leaderboard::LeaderboardEntry;
use crate::error::{Result, StorageError};
use crate::models::{AllowlistEntry, Competition, NewCompetition, ParticipantStatus};

/// Loads the competition if `actor_id` created it or is an admin.
pub async fn require_administer<S>(
    store: &S,
    policy: &AccessPolicy,
    actor_id: Uuid,
    competition_id: Uuid,
) -> Result<Competition>
where
    S: Store + ?Sized,
{
    let competition = store.find_competition(competition_id).await?;
    let actor = access::load_actor(store, policy, actor_id).await?;

    if !policy.can_administer(&actor, &competition) {
        return Err(StorageError::Forbidden(
            "Only the creator or an admin can manage this competition".to_string(),
        ));
    }
    Ok(competition)
}

/// Loads the competition if `actor_id` participates or is an admin.
/// Returns whether the actor is a participant alongside it.
pub async fn require_view<S>(
    store: &S,
    policy: &AccessPolicy,
    actor_id: Uuid,
    competition_id: Uuid,
) -> Result<(Competition, bool)>
where
    S: Store + ?Sized,
{
    let competition = store.find_competition(competition_id).await?;
    let actor = access::load_actor(store, policy, actor_id).await?;
    let membership = access::membership(store, competition_id, &actor).await?;

    if !policy.can_view(&actor, &membership) {
        return Err(StorageError::Forbidden("Access denied".to_string()));
    }
    Ok((competition, membership.is_participant))
}

/// Admins only. The creator is enrolled as an active participant.
pub async fn create_competition<S>(
    store: &S,
    policy: &AccessPolicy,
    actor_id: Uuid,
    request: &CreateCompetitionRequest,
) -> Result<Competition>
where
    S: Store + ?Sized,
{
    let actor = access::load_actor(store, policy, actor_id).await?;
    if !actor.is_admin {
        return Err(StorageError::Forbidden(
            "Only admins can create competitions".to_string(),
        ));
    }

    request
        .validate()
        .map_err(|e| StorageError::Validation(e.to_string()))?;
    request
        .validate_dates()
        .map_err(|e| StorageError::Validation(e.to_string()))?;
    let name = request
        .trimmed_name()
        .map_err(|e| StorageError::Validation(e.to_string()))?;

    let competition = store
        .create_competition(&NewCompetition {
            name: name.to_string(),
            description: request.description.clone(),
            start_date: request.start_date,
            end_date: request.end_date,
            status: request.status,
            created_by: actor_id,
        })
        .await?;

    enrollment::add_participant(
        store,
        competition.competition_id,
        actor_id,
        ParticipantStatus::Active,
    )
    .await?;

    tracing::info!(
        competition_id = %competition.competition_id,
        created_by = %actor_id,
        "Created competition"
    );
    Ok(competition)
}

pub async fn update_competition<S>(
    store: &S,
    policy: &AccessPolicy,
    actor_id: Uuid,
    competition_id: Uuid,
    request: &UpdateCompetitionRequest,
) -> Result<Competition>
where
    S: Store + ?Sized,
{
    let mut competition = require_administer(store, policy, actor_id, competition_id).await?;

    if request.is_empty() {
        return Err(StorageError::Validation("No fields to update".to_string()));
    }
    request
        .validate()
        .map_err(|e| StorageError::Validation(e.to_string()))?;
    request
        .apply_to(&mut competition)
        .map_err(|e| StorageError::Validation(e.to_string()))?;

    let updated = store.update_competition(&competition).await?;
    tracing::info!(%competition_id, updated_by = %actor_id, "Updated competition");
    Ok(updated)
}

/// Competition with its participants and leaderboard, for participants and admins.
pub async fn get_competition<S>(
    store: &S,
    policy: &AccessPolicy,
    actor_id: Uuid,
    competition_id: Uuid,
) -> Result<CompetitionDetailResponse>
where
    S: Store + ?Sized,
{
    let (competition, is_participant) =
        require_view(store, policy, actor_id, competition_id).await?;

    let mut participants = Vec::new();
    for participant in store.participants(competition_id).await? {
        let user = store.find_user(participant.user_id).await?;
        participants.push(ParticipantDetail {
            participant_id: participant.participant_id,
            user_id: user.user_id,
            first_name: user.first_name,
            last_name: user.last_name,
            status: participant.status,
            joined_at: participant.joined_at,
        });
    }

    let leaderboard = leaderboard::leaderboard_for(store, &competition).await?;

    Ok(CompetitionDetailResponse {
        competition,
        participants,
        leaderboard,
        is_participant,
    })
}

/// View-gated competition leaderboard.
pub async fn competition_leaderboard<S>(
    store: &S,
    policy: &AccessPolicy,
    actor_id: Uuid,
    competition_id: Uuid,
) -> Result<Vec<LeaderboardEntry>>
where
    S: Store + ?Sized,
{
    let (competition, _) = require_view(store, policy, actor_id, competition_id).await?;
    leaderboard::leaderboard_for(store, &competition).await
}

/// The actor's own competitions, or every competition when an admin asks for `all`.
pub async fn list_competitions<S>(
    store: &S,
    policy: &AccessPolicy,
    actor_id: Uuid,
    all: bool,
) -> Result<Vec<Competition>>
where
    S: Store + ?Sized,
{
    let actor = access::load_actor(store, policy, actor_id).await?;

    if all && actor.is_admin {
        store.list_competitions().await
    } else {
        store.competitions_for_user(actor_id).await
    }
}

/// Allowlisted competitions the actor has not joined yet.
pub async fn available_competitions<S>(
    store: &S,
    policy: &AccessPolicy,
    actor_id: Uuid,
) -> Result<Vec<Competition>>
where
    S: Store + ?Sized,
{
    let actor = access::load_actor(store, policy, actor_id).await?;

    let mut available = Vec::new();
    for competition in store.allowlisted_competitions(&actor.email).await? {
        let joined = store
            .find_participant(competition.competition_id, actor_id)
            .await?
            .is_some();
        if !joined {
            available.push(competition);
        }
    }
    Ok(available)
}

pub async fn allowlist<S>(
    store: &S,
    policy: &AccessPolicy,
    actor_id: Uuid,
    competition_id: Uuid,
) -> Result<Vec<AllowlistEntry>>
where
    S: Store + ?Sized,
{
    require_administer(store, policy, actor_id, competition_id).await?;
    store.allowlist(competition_id).await
}
