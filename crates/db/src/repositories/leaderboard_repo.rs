//! Repository for the `leaderboard` view.

use sqlx::PgPool;

use crate::models::leaderboard::LeaderboardEntry;

/// Read access to per-user pick counts over settled fights.
pub struct LeaderboardRepo;

impl LeaderboardRepo {
    /// All users with at least one settled pick, ordered by username.
    pub async fn list(pool: &PgPool) -> Result<Vec<LeaderboardEntry>, sqlx::Error> {
        sqlx::query_as::<_, LeaderboardEntry>(
            "SELECT user_id, username, total_picks, correct_picks \
             FROM leaderboard ORDER BY username",
        )
        .fetch_all(pool)
        .await
    }
}
