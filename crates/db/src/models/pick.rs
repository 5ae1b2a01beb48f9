//! Pick entity model and read projections.

use fightpicks_core::board::{AttributedPick, OwnPickRecord};
use fightpicks_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `picks` table. Identity is `(user_id, fight_id)`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Pick {
    pub user_id: DbId,
    pub fight_id: DbId,
    pub picked_fighter: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Pick> for OwnPickRecord {
    fn from(row: Pick) -> Self {
        OwnPickRecord {
            fight_id: row.fight_id,
            picked_fighter: row.picked_fighter,
        }
    }
}

/// A pick with every username the profile join produced for it.
#[derive(Debug, Clone, FromRow)]
pub struct AttributedPickRow {
    pub user_id: DbId,
    pub fight_id: DbId,
    pub picked_fighter: String,
    pub updated_at: Timestamp,
    pub usernames: Vec<String>,
}

impl AttributedPickRow {
    /// Keyset position of this row in submission order.
    pub fn cursor(&self) -> PickCursor {
        PickCursor {
            updated_at: self.updated_at,
            user_id: self.user_id,
            fight_id: self.fight_id,
        }
    }
}

impl From<AttributedPickRow> for AttributedPick {
    fn from(row: AttributedPickRow) -> Self {
        AttributedPick {
            user_id: row.user_id,
            fight_id: row.fight_id,
            picked_fighter: row.picked_fighter,
            usernames: row.usernames,
        }
    }
}

/// Position after which the next page of attributed picks starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickCursor {
    pub updated_at: Timestamp,
    pub user_id: DbId,
    pub fight_id: DbId,
}
