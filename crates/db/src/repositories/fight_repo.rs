//! Repository for the `fights` table.

use fightpicks_core::types::DbId;
use sqlx::PgPool;

use crate::models::fight::{CreateFight, Fight, FightWithEvent};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, event_id, fighter_red, fighter_blue, fight_order, \
                       fight_date, is_final, winner, created_at, updated_at";

/// Provides read/write operations for fights.
pub struct FightRepo;

impl FightRepo {
    /// Insert a new fight, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateFight) -> Result<Fight, sqlx::Error> {
        let query = format!(
            "INSERT INTO fights (event_id, fighter_red, fighter_blue, fight_order, fight_date)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Fight>(&query)
            .bind(input.event_id)
            .bind(&input.fighter_red)
            .bind(&input.fighter_blue)
            .bind(input.fight_order)
            .bind(input.fight_date)
            .fetch_one(pool)
            .await
    }

    /// List every fight. Grouping and display order are applied by the board.
    pub async fn list(pool: &PgPool) -> Result<Vec<Fight>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM fights ORDER BY event_id, fight_order, id");
        sqlx::query_as::<_, Fight>(&query).fetch_all(pool).await
    }

    /// Read a fight and its event inside `tx`, holding share locks on both
    /// rows until the transaction ends.
    ///
    /// An administrative update that locks the fight or its card waits for
    /// the caller's transaction, so a lock decision taken here still holds
    /// when the caller writes.
    pub async fn find_with_event_for_share(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
    ) -> Result<Option<FightWithEvent>, sqlx::Error> {
        sqlx::query_as::<_, FightWithEvent>(
            "SELECT f.id, f.event_id, f.fighter_red, f.fighter_blue, f.fight_order, \
                    f.fight_date, f.is_final, f.winner, \
                    e.name AS event_name, e.event_date, \
                    e.is_locked AS event_is_locked, e.is_active AS event_is_active \
             FROM fights f \
             JOIN events e ON e.id = f.event_id \
             WHERE f.id = $1 \
             FOR SHARE OF f, e",
        )
        .bind(id)
        .fetch_optional(&mut **tx)
        .await
    }

    /// Record a result: marks the fight final with `winner`.
    ///
    /// Returns `None` if the fight does not exist.
    pub async fn settle(
        pool: &PgPool,
        id: DbId,
        winner: &str,
    ) -> Result<Option<Fight>, sqlx::Error> {
        let query = format!(
            "UPDATE fights SET is_final = true, winner = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Fight>(&query)
            .bind(id)
            .bind(winner)
            .fetch_optional(pool)
            .await
    }
}
