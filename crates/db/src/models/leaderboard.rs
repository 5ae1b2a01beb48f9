//! Leaderboard view row.

use fightpicks_core::leaderboard::PickCounts;
use fightpicks_core::types::DbId;
use sqlx::FromRow;

/// A row from the `leaderboard` view.
#[derive(Debug, Clone, FromRow)]
pub struct LeaderboardEntry {
    pub user_id: DbId,
    pub username: String,
    pub total_picks: i64,
    pub correct_picks: i64,
}

impl From<LeaderboardEntry> for PickCounts {
    fn from(row: LeaderboardEntry) -> Self {
        PickCounts {
            user_id: row.user_id,
            username: row.username,
            total_picks: row.total_picks,
            correct_picks: row.correct_picks,
        }
    }
}
