//! Ranking of users by improvement score, scoped to a competition or global.

use std::cmp::Ordering;

use uuid::Uuid;

use super::bmi;
use super::series::{self, MIN_GLOBAL_ENTRIES, MIN_SCOPED_ENTRIES, ScopedSeries};
use crate::Store;
use crate::dto::leaderboard::LeaderboardEntry;
use crate::error::Result;
use crate::models::{Competition, DateRange, User};

/// Rows kept by the global leaderboard.
pub const GLOBAL_LEADERBOARD_SIZE: usize = 5;

/// Builds an unranked row from a user's scoped series.
///
/// With a single in-range entry both boundaries are the same row, so every
/// change is zero.
pub fn summarize(user: &User, series: &ScopedSeries<'_>) -> LeaderboardEntry {
    let first_weight = series.earliest.weight;
    let latest_weight = series.latest.weight;
    let first_index = bmi::index(first_weight, user.height);
    let latest_index = bmi::index(latest_weight, user.height);
    let index_change = first_index - latest_index;

    LeaderboardEntry {
        rank: 0,
        user_id: user.user_id,
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        height: user.height,
        first_weight,
        latest_weight,
        first_index,
        latest_index,
        index_change,
        weight_change: first_weight - latest_weight,
        observation_count: series.count,
        improvement_score: bmi::improvement_score(index_change, series.count),
        latest_band: bmi::band(latest_index),
    }
}

/// Highest score first; equal scores fall back to ascending user id.
fn by_score(a: &LeaderboardEntry, b: &LeaderboardEntry) -> Ordering {
    b.improvement_score
        .total_cmp(&a.improvement_score)
        .then_with(|| a.user_id.cmp(&b.user_id))
}

/// Sorts rows and assigns 1-based ranks.
pub fn rank(mut entries: Vec<LeaderboardEntry>) -> Vec<LeaderboardEntry> {
    entries.sort_by(by_score);
    for (position, entry) in entries.iter_mut().enumerate() {
        entry.rank = position + 1;
    }
    entries
}

/// Full leaderboard of an already loaded competition.
pub async fn leaderboard_for<S>(store: &S, competition: &Competition) -> Result<Vec<LeaderboardEntry>>
where
    S: Store + ?Sized,
{
    leaderboard_within(store, competition, None).await
}

/// Competition leaderboard over the competition window, narrowed by `window`
/// when given.
async fn leaderboard_within<S>(
    store: &S,
    competition: &Competition,
    window: Option<DateRange>,
) -> Result<Vec<LeaderboardEntry>>
where
    S: Store + ?Sized,
{
    let mut range = DateRange::for_competition(competition);
    if let Some(window) = window {
        range = range.intersect(&window);
    }
    let participants = store.participants(competition.competition_id).await?;

    let mut rows = Vec::with_capacity(participants.len());
    for participant in participants {
        let user = store.find_user(participant.user_id).await?;
        let entries = store.entries_for_user(user.user_id, Some(range)).await?;

        if let Some(series) = series::scope(&entries, Some(&range))
            && series.has_at_least(MIN_SCOPED_ENTRIES)
        {
            rows.push(summarize(&user, &series));
        }
    }

    tracing::debug!(
        competition_id = %competition.competition_id,
        ranked = rows.len(),
        "Computed competition leaderboard"
    );

    Ok(rank(rows))
}

/// Every participant with at least one entry inside the competition window.
pub async fn competition_leaderboard<S>(
    store: &S,
    competition_id: Uuid,
) -> Result<Vec<LeaderboardEntry>>
where
    S: Store + ?Sized,
{
    let competition = store.find_competition(competition_id).await?;
    leaderboard_for(store, &competition).await
}

/// Top users across all time, or within `range`, limited to those with a
/// trend to show.
pub async fn global_leaderboard<S>(
    store: &S,
    range: Option<DateRange>,
) -> Result<Vec<LeaderboardEntry>>
where
    S: Store + ?Sized,
{
    let users = store.list_users().await?;

    let mut rows = Vec::new();
    for user in users {
        let entries = store.entries_for_user(user.user_id, range).await?;

        if let Some(series) = series::scope(&entries, range.as_ref())
            && series.has_at_least(MIN_GLOBAL_ENTRIES)
        {
            rows.push(summarize(&user, &series));
        }
    }

    let mut ranked = rank(rows);
    ranked.truncate(GLOBAL_LEADERBOARD_SIZE);
    Ok(ranked)
}

/// Competition leaderboard when an id is given, the global one otherwise.
///
/// `range` bounds the observations considered. For a competition it can only
/// narrow the competition window, never widen it.
pub async fn compute_leaderboard<S>(
    store: &S,
    competition_id: Option<Uuid>,
    range: Option<DateRange>,
) -> Result<Vec<LeaderboardEntry>>
where
    S: Store + ?Sized,
{
    match competition_id {
        Some(id) => {
            let competition = store.find_competition(id).await?;
            leaderboard_within(store, &competition, range).await
        }
        None => global_leaderboard(store, range).await,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::{Band, WeightEntry};

    fn user(height: f64) -> User {
        User {
            user_id: Uuid::new_v4(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: "test@example.com".to_string(),
            height,
            is_admin: false,
            created_at: NaiveDate::from_ymd_opt(2025, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        }
    }

    fn entry(entry_id: i64, day: u32, weight: f64) -> WeightEntry {
        let date = NaiveDate::from_ymd_opt(2025, 1, day).unwrap();
        WeightEntry {
            entry_id,
            user_id: Uuid::nil(),
            date,
            weight,
            notes: None,
            created_at: date.and_hms_opt(7, 0, 0).unwrap(),
        }
    }

    fn row(user_id: Uuid, score: f64) -> LeaderboardEntry {
        LeaderboardEntry {
            rank: 0,
            user_id,
            first_name: String::new(),
            last_name: String::new(),
            height: 70.0,
            first_weight: 200.0,
            latest_weight: 200.0,
            first_index: 0.0,
            latest_index: 0.0,
            index_change: 0.0,
            weight_change: 0.0,
            observation_count: 1,
            improvement_score: score,
            latest_band: Band::Normal,
        }
    }

    #[test]
    fn test_summarize_computes_changes() {
        let u = user(70.0);
        let entries = vec![entry(1, 1, 200.0), entry(2, 15, 195.0), entry(3, 30, 190.0)];
        let series = series::scope(&entries, None).unwrap();

        let row = summarize(&u, &series);
        assert_eq!(row.first_weight, 200.0);
        assert_eq!(row.latest_weight, 190.0);
        assert_eq!(row.weight_change, 10.0);
        assert_eq!(row.observation_count, 3);

        let expected_change = bmi::index(200.0, 70.0) - bmi::index(190.0, 70.0);
        assert!((row.index_change - expected_change).abs() < 1e-9);
        assert!((row.improvement_score - (expected_change + 0.3)).abs() < 1e-9);
        assert_eq!(row.latest_band, Band::Overweight);
    }

    #[test]
    fn test_summarize_single_entry_has_zero_change() {
        let u = user(65.0);
        let entries = vec![entry(1, 10, 150.0)];
        let series = series::scope(&entries, None).unwrap();

        let row = summarize(&u, &series);
        assert_eq!(row.index_change, 0.0);
        assert_eq!(row.weight_change, 0.0);
        assert!((row.improvement_score - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_summarize_zero_height_scores_bonus_only() {
        let u = user(0.0);
        let entries = vec![entry(1, 1, 220.0), entry(2, 2, 200.0)];
        let series = series::scope(&entries, None).unwrap();

        let row = summarize(&u, &series);
        assert_eq!(row.first_index, 0.0);
        assert_eq!(row.latest_index, 0.0);
        assert_eq!(row.weight_change, 20.0);
        assert!((row.improvement_score - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_rank_orders_by_score_descending() {
        let a = Uuid::from_u128(1);
        let b = Uuid::from_u128(2);
        let c = Uuid::from_u128(3);

        let ranked = rank(vec![row(a, 0.5), row(b, 3.2), row(c, -1.0)]);
        let order: Vec<Uuid> = ranked.iter().map(|r| r.user_id).collect();
        assert_eq!(order, vec![b, a, c]);
        assert_eq!(
            ranked.iter().map(|r| r.rank).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_rank_ties_break_on_user_id() {
        let low = Uuid::from_u128(10);
        let high = Uuid::from_u128(20);

        let forward = rank(vec![row(low, 1.0), row(high, 1.0)]);
        let reverse = rank(vec![row(high, 1.0), row(low, 1.0)]);

        assert_eq!(forward[0].user_id, low);
        assert_eq!(reverse[0].user_id, low);
        assert_eq!(reverse[1].rank, 2);
    }

    #[test]
    fn test_rank_empty() {
        assert!(rank(Vec::new()).is_empty());
    }
}
