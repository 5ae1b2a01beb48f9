//! Flat input records, one per row of the relational sources.
//!
//! These are decoupled from the `db` crate's `FromRow` structs so the board
//! logic can be exercised without a database.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, EventDate, Timestamp};

/// A fight card event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: DbId,
    pub name: String,
    pub event_date: EventDate,
    /// Authoritative event-wide lock flag set by the administrative process.
    pub is_locked: bool,
    pub is_active: bool,
}

/// A single bout on an event card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FightRecord {
    pub id: DbId,
    /// Owning event. `None` when the source row carried no resolvable reference.
    pub event_id: Option<DbId>,
    pub fighter_red: String,
    pub fighter_blue: String,
    pub fight_order: i32,
    /// Fight-level scheduled start, overriding the event lock once reached.
    pub fight_date: Option<Timestamp>,
    pub is_final: bool,
    /// Winning fighter name once the result is recorded.
    pub winner: Option<String>,
}

impl FightRecord {
    /// Whether `fighter` is exactly one of this fight's two competitors.
    pub fn has_competitor(&self, fighter: &str) -> bool {
        self.fighter_red == fighter || self.fighter_blue == fighter
    }
}

/// The calling user's own pick for one fight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnPickRecord {
    pub fight_id: DbId,
    pub picked_fighter: String,
}

/// A pick row with the username(s) the source attributed to it.
///
/// Exactly one username is correct; zero means the profile is missing and
/// more than one means the source join fanned out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributedPick {
    pub user_id: DbId,
    pub fight_id: DbId,
    pub picked_fighter: String,
    pub usernames: Vec<String>,
}
