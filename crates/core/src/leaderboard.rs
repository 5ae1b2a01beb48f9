//! Leaderboard ordering and ranking.
//!
//! Counts come from the store; this module derives the percentage, applies
//! the requested sort, and numbers the rows in the order returned.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Per-user pick counts over settled fights.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickCounts {
    pub user_id: DbId,
    pub username: String,
    pub total_picks: i64,
    pub correct_picks: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedRow {
    pub rank: usize,
    pub user_id: DbId,
    pub username: String,
    pub total_picks: i64,
    pub correct_picks: i64,
    /// Whole percent, rounded half up.
    pub correct_percentage: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Same as [`SortKey::CorrectPicks`].
    Rank,
    Username,
    #[default]
    CorrectPicks,
    TotalPicks,
    CorrectPercentage,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Percentage of `correct` over `total`, rounded to the nearest whole number.
pub fn correct_percentage(correct: i64, total: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    (correct * 200 + total) / (total * 2)
}

/// Sort `rows` by `key`/`direction` and number them from 1.
///
/// The sort is stable, so rows that compare equal keep their input order.
pub fn rank_rows(rows: Vec<PickCounts>, key: SortKey, direction: SortDirection) -> Vec<RankedRow> {
    let mut rows: Vec<RankedRow> = rows
        .into_iter()
        .map(|r| RankedRow {
            rank: 0,
            correct_percentage: correct_percentage(r.correct_picks, r.total_picks),
            user_id: r.user_id,
            username: r.username,
            total_picks: r.total_picks,
            correct_picks: r.correct_picks,
        })
        .collect();

    rows.sort_by(|a, b| {
        let ord = compare(a, b, key);
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });

    for (index, row) in rows.iter_mut().enumerate() {
        row.rank = index + 1;
    }
    rows
}

fn compare(a: &RankedRow, b: &RankedRow, key: SortKey) -> Ordering {
    match key {
        SortKey::Rank | SortKey::CorrectPicks => a.correct_picks.cmp(&b.correct_picks),
        SortKey::TotalPicks => a.total_picks.cmp(&b.total_picks),
        SortKey::CorrectPercentage => a.correct_percentage.cmp(&b.correct_percentage),
        SortKey::Username => a
            .username
            .to_lowercase()
            .cmp(&b.username.to_lowercase())
            .then_with(|| a.username.cmp(&b.username)),
    }
}
