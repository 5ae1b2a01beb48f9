//! Fight entity model and DTOs.

use fightpicks_core::board::{EventRecord, FightRecord};
use fightpicks_core::types::{DbId, EventDate, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `fights` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Fight {
    pub id: DbId,
    pub event_id: DbId,
    pub fighter_red: String,
    pub fighter_blue: String,
    pub fight_order: i32,
    pub fight_date: Option<Timestamp>,
    pub is_final: bool,
    pub winner: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new fight.
#[derive(Debug, Deserialize)]
pub struct CreateFight {
    pub event_id: DbId,
    pub fighter_red: String,
    pub fighter_blue: String,
    pub fight_order: i32,
    pub fight_date: Option<Timestamp>,
}

/// A fight joined to its owning event, as read by the pick write path.
#[derive(Debug, Clone, FromRow)]
pub struct FightWithEvent {
    pub id: DbId,
    pub event_id: DbId,
    pub fighter_red: String,
    pub fighter_blue: String,
    pub fight_order: i32,
    pub fight_date: Option<Timestamp>,
    pub is_final: bool,
    pub winner: Option<String>,
    pub event_name: String,
    pub event_date: EventDate,
    pub event_is_locked: bool,
    pub event_is_active: bool,
}

impl FightWithEvent {
    /// Split into the core records the lock predicate takes.
    pub fn into_records(self) -> (FightRecord, EventRecord) {
        let event = EventRecord {
            id: self.event_id,
            name: self.event_name,
            event_date: self.event_date,
            is_locked: self.event_is_locked,
            is_active: self.event_is_active,
        };
        let fight = FightRecord {
            id: self.id,
            event_id: Some(self.event_id),
            fighter_red: self.fighter_red,
            fighter_blue: self.fighter_blue,
            fight_order: self.fight_order,
            fight_date: self.fight_date,
            is_final: self.is_final,
            winner: self.winner,
        };
        (fight, event)
    }
}

impl From<Fight> for FightRecord {
    fn from(row: Fight) -> Self {
        FightRecord {
            id: row.id,
            event_id: Some(row.event_id),
            fighter_red: row.fighter_red,
            fighter_blue: row.fighter_blue,
            fight_order: row.fight_order,
            fight_date: row.fight_date,
            is_final: row.is_final,
            winner: row.winner,
        }
    }
}
