mod common;

use common::{SUPER_ADMIN_EMAIL, date, policy, user, weigh_in};
use storage::MemoryStore;
use storage::dto::user::LogWeightRequest;
use storage::models::DateRange;
use storage::repository::WeightEntryStore;
use storage::services::users;

#[tokio::test]
async fn test_list_users_super_admin_only() {
    let store = MemoryStore::new();
    let policy = policy();
    let root = user(&store, SUPER_ADMIN_EMAIL, 70.0, false).await;
    let admin = user(&store, "staff@example.com", 70.0, true).await;

    let err = users::list_users(&store, &policy, admin.user_id).await.unwrap_err();
    assert_eq!(err.reason(), "forbidden");

    let listed = users::list_users(&store, &policy, root.user_id).await.unwrap();
    assert_eq!(listed.len(), 2);
    let root_row = listed.iter().find(|u| u.user_id == root.user_id).unwrap();
    assert!(root_row.is_super_admin);
    assert!(root_row.is_admin);
}

#[tokio::test]
async fn test_set_admin_promotes_and_guards_lockout() {
    let store = MemoryStore::new();
    let policy = policy();
    let root = user(&store, SUPER_ADMIN_EMAIL, 70.0, false).await;
    let member = user(&store, "member@example.com", 70.0, false).await;

    let promoted = users::set_admin(&store, &policy, root.user_id, member.user_id, true)
        .await
        .unwrap();
    assert!(promoted.is_admin);

    let err = users::set_admin(&store, &policy, root.user_id, root.user_id, false)
        .await
        .unwrap_err();
    assert_eq!(err.reason(), "forbidden");

    // A promoted admin still cannot touch the admin flags of others.
    let err = users::set_admin(&store, &policy, member.user_id, root.user_id, false)
        .await
        .unwrap_err();
    assert_eq!(err.reason(), "forbidden");

    let status = users::admin_status(&store, &policy, root.user_id).await.unwrap();
    assert!(status.is_super_admin);
    assert!(status.is_admin);
}

#[tokio::test]
async fn test_log_weight_validates_and_appends() {
    let store = MemoryStore::new();
    let member = user(&store, "member@example.com", 70.0, false).await;

    let entry = users::log_weight(
        &store,
        member.user_id,
        &LogWeightRequest {
            date: date(2025, 1, 2),
            weight: 181.5,
            notes: Some("  after run ".to_string()),
        },
    )
    .await
    .unwrap();
    assert_eq!(entry.notes.as_deref(), Some("after run"));

    let err = users::log_weight(
        &store,
        member.user_id,
        &LogWeightRequest {
            date: date(2025, 1, 3),
            weight: 0.0,
            notes: None,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.reason(), "validation");

    let entries = store.entries_for_user(member.user_id, None).await.unwrap();
    assert_eq!(entries.len(), 1);
}

#[tokio::test]
async fn test_weight_history_is_bounded_and_ordered() {
    let store = MemoryStore::new();
    let member = user(&store, "member@example.com", 70.0, false).await;
    weigh_in(&store, member.user_id, date(2025, 1, 20), 178.0).await;
    weigh_in(&store, member.user_id, date(2025, 1, 5), 182.0).await;
    weigh_in(&store, member.user_id, date(2025, 2, 10), 175.0).await;

    let all = users::weight_history(&store, member.user_id, None).await.unwrap();
    let dates: Vec<_> = all.iter().map(|e| e.date).collect();
    assert_eq!(dates, vec![date(2025, 1, 5), date(2025, 1, 20), date(2025, 2, 10)]);

    let january = DateRange::new(date(2025, 1, 1), Some(date(2025, 1, 31)));
    let scoped = users::weight_history(&store, member.user_id, Some(january))
        .await
        .unwrap();
    assert_eq!(scoped.len(), 2);

    let err = users::weight_history(&store, uuid::Uuid::new_v4(), None)
        .await
        .unwrap_err();
    assert_eq!(err.reason(), "not_found");
}
