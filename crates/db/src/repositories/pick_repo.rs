//! Repository for the `picks` table.

use fightpicks_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::pick::{AttributedPickRow, Pick, PickCursor};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "user_id, fight_id, picked_fighter, created_at, updated_at";

/// Provides read/write operations for picks.
pub struct PickRepo;

impl PickRepo {
    /// Create or replace the pick for `(user_id, fight_id)` inside `tx`.
    ///
    /// The store's primary key on that pair makes concurrent submissions
    /// collapse to one row. Re-submitting the same fighter leaves the row
    /// untouched, so its place in submission order does not move.
    pub async fn upsert(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        user_id: DbId,
        fight_id: DbId,
        picked_fighter: &str,
    ) -> Result<Pick, sqlx::Error> {
        let query = format!(
            "INSERT INTO picks (user_id, fight_id, picked_fighter)
             VALUES ($1, $2, $3)
             ON CONFLICT (user_id, fight_id) DO UPDATE SET
                picked_fighter = EXCLUDED.picked_fighter,
                updated_at = CASE
                    WHEN picks.picked_fighter = EXCLUDED.picked_fighter THEN picks.updated_at
                    ELSE NOW()
                END
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Pick>(&query)
            .bind(user_id)
            .bind(fight_id)
            .bind(picked_fighter)
            .fetch_one(&mut **tx)
            .await
    }

    /// All picks made by one user.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Pick>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM picks WHERE user_id = $1 ORDER BY fight_id");
        sqlx::query_as::<_, Pick>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// One page of picks with their attributed usernames, in submission order.
    ///
    /// Usernames are aggregated per pick so the shape stays one row per pick
    /// even if the profile join fans out. Pass the last row's
    /// [`AttributedPickRow::cursor`] as `after` to fetch the next page.
    ///
    /// A changed pick moves forward in submission order, so pages read on
    /// separate snapshots can return the same pick twice. Read every page
    /// on one connection opened with [`crate::begin_read_snapshot`].
    pub async fn list_attributed_page(
        conn: &mut PgConnection,
        after: Option<PickCursor>,
        limit: i64,
    ) -> Result<Vec<AttributedPickRow>, sqlx::Error> {
        sqlx::query_as::<_, AttributedPickRow>(
            "SELECT p.user_id, p.fight_id, p.picked_fighter, p.updated_at, \
                    COALESCE( \
                        array_agg(pr.username ORDER BY pr.username) \
                            FILTER (WHERE pr.username IS NOT NULL), \
                        ARRAY[]::TEXT[] \
                    ) AS usernames \
             FROM picks p \
             LEFT JOIN profiles pr ON pr.id = p.user_id \
             WHERE $1::TIMESTAMPTZ IS NULL \
                OR (p.updated_at, p.user_id, p.fight_id) > ($1::TIMESTAMPTZ, $2::BIGINT, $3::BIGINT) \
             GROUP BY p.user_id, p.fight_id, p.picked_fighter, p.updated_at \
             ORDER BY p.updated_at, p.user_id, p.fight_id \
             LIMIT $4",
        )
        .bind(after.map(|c| c.updated_at))
        .bind(after.map(|c| c.user_id))
        .bind(after.map(|c| c.fight_id))
        .bind(limit)
        .fetch_all(conn)
        .await
    }
}
