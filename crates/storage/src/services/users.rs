//! Account administration and weigh-in logging.

use uuid::Uuid;
use validator::Validate;

use super::access::{self, AccessPolicy};
use crate::Store;
use crate::dto::user::{AdminStatus, LogWeightRequest, UserResponse};
use crate::error::{Result, StorageError};
use crate::models::{DateRange, NewWeightEntry, WeightEntry};

/// Every account with its derived super-admin flag. Super-admins only.
pub async fn list_users<S>(
    store: &S,
    policy: &AccessPolicy,
    actor_id: Uuid,
) -> Result<Vec<UserResponse>>
where
    S: Store + ?Sized,
{
    let actor = access::load_actor(store, policy, actor_id).await?;
    if !policy.can_manage_users(&actor) {
        return Err(StorageError::Forbidden(
            "Only super admins can manage users".to_string(),
        ));
    }

    let users = store.list_users().await?;
    Ok(users
        .into_iter()
        .map(|user| {
            let is_super_admin = policy.is_super_admin_email(&user.normalized_email());
            UserResponse::new(user, is_super_admin)
        })
        .collect())
}

/// Grants or revokes the persisted admin flag.
///
/// Super-admins cannot be modified, and nobody can change their own flag.
pub async fn set_admin<S>(
    store: &S,
    policy: &AccessPolicy,
    actor_id: Uuid,
    target_id: Uuid,
    is_admin: bool,
) -> Result<UserResponse>
where
    S: Store + ?Sized,
{
    let actor = access::load_actor(store, policy, actor_id).await?;
    if !policy.can_manage_users(&actor) {
        return Err(StorageError::Forbidden(
            "Only super admins can manage users".to_string(),
        ));
    }

    let target = store.find_user(target_id).await?;
    if policy.is_super_admin_email(&target.normalized_email()) {
        return Err(StorageError::Forbidden(
            "Cannot modify super admin status".to_string(),
        ));
    }
    if target.user_id == actor.user_id {
        return Err(StorageError::Forbidden(
            "Cannot modify your own admin status".to_string(),
        ));
    }

    let updated = store.set_admin(target_id, is_admin).await?;
    tracing::info!(
        user_id = %target_id,
        is_admin,
        changed_by = %actor_id,
        "Changed admin status"
    );
    Ok(UserResponse::new(updated, false))
}

pub async fn admin_status<S>(store: &S, policy: &AccessPolicy, user_id: Uuid) -> Result<AdminStatus>
where
    S: Store + ?Sized,
{
    let actor = access::load_actor(store, policy, user_id).await?;
    Ok(AdminStatus {
        is_admin: actor.is_admin,
        is_super_admin: actor.is_super_admin,
    })
}

/// Appends a weigh-in for `user_id`.
pub async fn log_weight<S>(store: &S, user_id: Uuid, request: &LogWeightRequest) -> Result<WeightEntry>
where
    S: Store + ?Sized,
{
    request
        .validate()
        .map_err(|e| StorageError::Validation(e.to_string()))?;
    if !request.weight.is_finite() {
        return Err(StorageError::Validation("Weight must be a number".to_string()));
    }
    store.find_user(user_id).await?;

    let notes = request
        .notes
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(String::from);

    store
        .add_entry(&NewWeightEntry {
            user_id,
            date: request.date,
            weight: request.weight,
            notes,
        })
        .await
}

/// The user's own weigh-ins, oldest first.
pub async fn weight_history<S>(
    store: &S,
    user_id: Uuid,
    range: Option<DateRange>,
) -> Result<Vec<WeightEntry>>
where
    S: Store + ?Sized,
{
    store.find_user(user_id).await?;
    store.entries_for_user(user_id, range).await
}
