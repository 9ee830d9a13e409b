//! Mutations of allowlist and participant state, including signup admission.
//!
//! Allowlist and participant duplicates are checked before inserting; the
//! check is not atomic against a concurrent identical request, and the
//! store's unique constraints report any race as `Duplicate`.

use uuid::Uuid;
use validator::Validate;

use super::access::{self, AccessPolicy, Admission};
use crate::Store;
use crate::dto::allowlist::BulkAllowlistResult;
use crate::dto::user::SignupRequest;
use crate::error::{Result, StorageError};
use crate::models::{
    AllowlistEntry, Competition, CompetitionParticipant, NewUser, NormalizedEmail,
    ParticipantStatus, User,
};

/// Result of a successful signup.
#[derive(Debug, Clone)]
pub struct Registration {
    pub user: User,
    /// Competitions the account was enrolled in from allowlists.
    pub enrolled_competitions: Vec<Uuid>,
    /// One message per allowlisted competition that could not be joined.
    pub enrollment_failures: Vec<String>,
}

pub async fn add_allowlist_entry<S>(
    store: &S,
    competition_id: Uuid,
    email: &str,
) -> Result<AllowlistEntry>
where
    S: Store + ?Sized,
{
    let email = NormalizedEmail::parse(email)?;
    store.find_competition(competition_id).await?;

    if store.is_allowlisted(competition_id, &email).await? {
        return Err(StorageError::Duplicate(
            "Email is already on the allowlist".to_string(),
        ));
    }

    let entry = store.add_allowlist_entry(competition_id, &email).await?;
    tracing::info!(%competition_id, email = %email, "Added email to allowlist");
    Ok(entry)
}

pub async fn remove_allowlist_entry<S>(store: &S, competition_id: Uuid, email: &str) -> Result<()>
where
    S: Store + ?Sized,
{
    let email = NormalizedEmail::parse(email)?;

    if !store.remove_allowlist_entry(competition_id, &email).await? {
        return Err(StorageError::NotFound("Allowlist entry"));
    }

    tracing::info!(%competition_id, email = %email, "Removed email from allowlist");
    Ok(())
}

/// Adds each email on its own. Duplicates are skipped; any other failure is
/// recorded in `errors` and the batch carries on.
pub async fn bulk_add_allowlist_entries<S, I>(
    store: &S,
    competition_id: Uuid,
    emails: I,
) -> Result<BulkAllowlistResult>
where
    S: Store + ?Sized,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    store.find_competition(competition_id).await?;

    let mut result = BulkAllowlistResult::default();
    for email in emails {
        let email = email.as_ref();
        match add_allowlist_entry(store, competition_id, email).await {
            Ok(_) => result.added += 1,
            Err(StorageError::Duplicate(_)) => result.skipped += 1,
            Err(e) => {
                tracing::warn!(%competition_id, email, error = %e, "Failed to add email to allowlist");
                result.errors.push(format!("Failed to add {email}: {e}"));
            }
        }
    }

    tracing::info!(
        %competition_id,
        added = result.added,
        skipped = result.skipped,
        failed = result.errors.len(),
        "Bulk allowlist update finished"
    );
    Ok(result)
}

/// Plain insert; callers check who may join first.
pub async fn add_participant<S>(
    store: &S,
    competition_id: Uuid,
    user_id: Uuid,
    status: ParticipantStatus,
) -> Result<CompetitionParticipant>
where
    S: Store + ?Sized,
{
    store.add_participant(competition_id, user_id, status).await
}

/// Joins `user_id` to a competition after checking admin or allowlist access.
pub async fn join_competition<S>(
    store: &S,
    policy: &AccessPolicy,
    competition_id: Uuid,
    user_id: Uuid,
) -> Result<CompetitionParticipant>
where
    S: Store + ?Sized,
{
    store.find_competition(competition_id).await?;
    let actor = access::load_actor(store, policy, user_id).await?;
    let membership = access::membership(store, competition_id, &actor).await?;

    if membership.is_participant {
        return Err(StorageError::Duplicate(
            "You are already participating in this competition".to_string(),
        ));
    }
    if !policy.can_join(&actor, &membership) {
        return Err(StorageError::Forbidden(
            "You are not authorized to join this competition".to_string(),
        ));
    }

    let participant =
        add_participant(store, competition_id, user_id, ParticipantStatus::Active).await?;
    tracing::info!(%competition_id, %user_id, "User joined competition");
    Ok(participant)
}

/// Creates an account for an admin email or an allowlisted email.
///
/// Allowlisted accounts are enrolled in every competition listing them. A
/// failed enrollment is logged and reported in the returned [`Registration`]
/// but never rolls back the account or the other enrollments.
pub async fn register_user<S>(
    store: &S,
    policy: &AccessPolicy,
    request: &SignupRequest,
) -> Result<Registration>
where
    S: Store + ?Sized,
{
    request
        .validate()
        .map_err(|e| StorageError::Validation(e.to_string()))?;
    let email = NormalizedEmail::parse(&request.email)?;

    if store.find_user_by_email(&email).await?.is_some() {
        return Err(StorageError::Duplicate(
            "User with this email already exists".to_string(),
        ));
    }

    let allowlisted = store.allowlisted_competitions(&email).await?;
    let (is_admin, competitions): (bool, Vec<Competition>) =
        match policy.admit_signup(&email, allowlisted) {
            Admission::Admin => (true, Vec::new()),
            Admission::Allowlisted(competitions) => (false, competitions),
            Admission::Refused => {
                tracing::warn!(email = %email, "Signup refused: email not on any allowlist");
                return Err(StorageError::Forbidden(
                    "This email is not authorized to sign up".to_string(),
                ));
            }
        };

    let user = store
        .create_user(&NewUser {
            first_name: request.first_name.trim().to_string(),
            last_name: request.last_name.trim().to_string(),
            email: email.clone(),
            height: request.height,
            is_admin,
        })
        .await?;
    tracing::info!(user_id = %user.user_id, is_admin = user.is_admin, "Registered user");

    let mut registration = Registration {
        user,
        enrolled_competitions: Vec::with_capacity(competitions.len()),
        enrollment_failures: Vec::new(),
    };

    for competition in competitions {
        let competition_id = competition.competition_id;
        match add_participant(
            store,
            competition_id,
            registration.user.user_id,
            ParticipantStatus::Active,
        )
        .await
        {
            Ok(_) => registration.enrolled_competitions.push(competition_id),
            Err(e) => {
                tracing::warn!(
                    %competition_id,
                    user_id = %registration.user.user_id,
                    error = %e,
                    "Failed to auto-enroll new user"
                );
                registration
                    .enrollment_failures
                    .push(format!("{}: {e}", competition.name));
            }
        }
    }

    Ok(registration)
}
