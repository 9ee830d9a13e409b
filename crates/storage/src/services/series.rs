//! Boundary observations of one user's weigh-ins within a date window.

use crate::models::{DateRange, WeightEntry};

/// A competition leaderboard needs a single in-range entry.
pub const MIN_SCOPED_ENTRIES: usize = 1;
/// The global leaderboard needs two entries to show a trend.
pub const MIN_GLOBAL_ENTRIES: usize = 2;

/// Earliest and latest in-range entries plus the in-range count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScopedSeries<'a> {
    pub earliest: &'a WeightEntry,
    pub latest: &'a WeightEntry,
    pub count: usize,
}

impl ScopedSeries<'_> {
    pub fn has_at_least(&self, count: usize) -> bool {
        self.count >= count
    }
}

/// Scopes `entries` to `range` (everything when `None`).
///
/// Entries are keyed by `(date, entry_id)`: among rows sharing a date, the
/// first inserted counts as earliest and the last inserted as latest. The
/// input order does not matter.
pub fn scope<'a>(entries: &'a [WeightEntry], range: Option<&DateRange>) -> Option<ScopedSeries<'a>> {
    let mut in_range = entries
        .iter()
        .filter(|entry| range.is_none_or(|r| r.contains(entry.date)));

    let first = in_range.next()?;
    let mut series = ScopedSeries {
        earliest: first,
        latest: first,
        count: 1,
    };

    for entry in in_range {
        let key = (entry.date, entry.entry_id);
        if key < (series.earliest.date, series.earliest.entry_id) {
            series.earliest = entry;
        }
        if key > (series.latest.date, series.latest.entry_id) {
            series.latest = entry;
        }
        series.count += 1;
    }

    Some(series)
}
