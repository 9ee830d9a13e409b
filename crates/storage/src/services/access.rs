//! Who may view, join or administer a competition, and who may sign up.
//!
//! Three independent grants exist: the admin flag (persisted, or implied by
//! the static super-admin list), competition ownership, and allowlist
//! membership. Super-admin status comes only from [`AccessConfig`] and can
//! never be changed through the store.

use uuid::Uuid;

use crate::Store;
use crate::config::AccessConfig;
use crate::error::Result;
use crate::models::{Competition, NormalizedEmail, User};

/// A user with effective privilege flags resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Uuid,
    pub email: NormalizedEmail,
    pub is_admin: bool,
    pub is_super_admin: bool,
}

/// How an actor relates to one competition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Membership {
    /// A participant record exists, whatever its status.
    pub is_participant: bool,
    pub is_allowlisted: bool,
}

/// Outcome of a signup attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Admission {
    /// Email is configured as admin or super-admin.
    Admin,
    /// Email is on these competitions' allowlists.
    Allowlisted(Vec<Competition>),
    Refused,
}

#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    config: AccessConfig,
}

impl AccessPolicy {
    pub fn new(config: AccessConfig) -> Self {
        Self { config }
    }

    pub fn is_super_admin_email(&self, email: &NormalizedEmail) -> bool {
        self.config.super_admin_emails.contains(email)
    }

    pub fn is_admin_email(&self, email: &NormalizedEmail) -> bool {
        self.config.admin_emails.contains(email) || self.is_super_admin_email(email)
    }

    pub fn actor(&self, user: &User) -> Actor {
        let email = user.normalized_email();
        let is_super_admin = self.is_super_admin_email(&email);
        Actor {
            user_id: user.user_id,
            email,
            is_admin: user.is_admin || is_super_admin,
            is_super_admin,
        }
    }

    pub fn can_view(&self, actor: &Actor, membership: &Membership) -> bool {
        actor.is_admin || membership.is_participant
    }

    pub fn can_administer(&self, actor: &Actor, competition: &Competition) -> bool {
        actor.is_admin || competition.is_created_by(actor.user_id)
    }

    pub fn can_manage_users(&self, actor: &Actor) -> bool {
        actor.is_super_admin
    }

    /// Existing participants can never join again, even when allowlisted.
    pub fn can_join(&self, actor: &Actor, membership: &Membership) -> bool {
        !membership.is_participant && (actor.is_admin || membership.is_allowlisted)
    }

    /// `allowlisted` holds every competition whose allowlist contains `email`.
    pub fn admit_signup(&self, email: &NormalizedEmail, allowlisted: Vec<Competition>) -> Admission {
        if self.is_admin_email(email) {
            Admission::Admin
        } else if allowlisted.is_empty() {
            Admission::Refused
        } else {
            Admission::Allowlisted(allowlisted)
        }
    }
}

pub async fn load_actor<S>(store: &S, policy: &AccessPolicy, user_id: Uuid) -> Result<Actor>
where
    S: Store + ?Sized,
{
    let user = store.find_user(user_id).await?;
    Ok(policy.actor(&user))
}

pub async fn membership<S>(store: &S, competition_id: Uuid, actor: &Actor) -> Result<Membership>
where
    S: Store + ?Sized,
{
    let is_participant = store
        .find_participant(competition_id, actor.user_id)
        .await?
        .is_some();
    let is_allowlisted = store.is_allowlisted(competition_id, &actor.email).await?;

    Ok(Membership {
        is_participant,
        is_allowlisted,
    })
}

pub async fn can_view<S>(
    store: &S,
    policy: &AccessPolicy,
    competition_id: Uuid,
    user_id: Uuid,
) -> Result<bool>
where
    S: Store + ?Sized,
{
    store.find_competition(competition_id).await?;
    let actor = load_actor(store, policy, user_id).await?;
    let membership = membership(store, competition_id, &actor).await?;
    Ok(policy.can_view(&actor, &membership))
}

pub async fn can_administer<S>(
    store: &S,
    policy: &AccessPolicy,
    competition_id: Uuid,
    user_id: Uuid,
) -> Result<bool>
where
    S: Store + ?Sized,
{
    let competition = store.find_competition(competition_id).await?;
    let actor = load_actor(store, policy, user_id).await?;
    Ok(policy.can_administer(&actor, &competition))
}

pub async fn can_manage_users<S>(store: &S, policy: &AccessPolicy, user_id: Uuid) -> Result<bool>
where
    S: Store + ?Sized,
{
    let actor = load_actor(store, policy, user_id).await?;
    Ok(policy.can_manage_users(&actor))
}

pub async fn can_join<S>(
    store: &S,
    policy: &AccessPolicy,
    competition_id: Uuid,
    user_id: Uuid,
) -> Result<bool>
where
    S: Store + ?Sized,
{
    store.find_competition(competition_id).await?;
    let actor = load_actor(store, policy, user_id).await?;
    let membership = membership(store, competition_id, &actor).await?;
    Ok(policy.can_join(&actor, &membership))
}
