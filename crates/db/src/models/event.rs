//! Event entity model and DTOs.

use fightpicks_core::board::EventRecord;
use fightpicks_core::types::{DbId, EventDate, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    pub name: String,
    pub event_date: EventDate,
    pub is_locked: bool,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new event.
#[derive(Debug, Deserialize)]
pub struct CreateEvent {
    pub name: String,
    pub event_date: EventDate,
    pub is_locked: Option<bool>,
    pub is_active: Option<bool>,
}

impl From<Event> for EventRecord {
    fn from(row: Event) -> Self {
        EventRecord {
            id: row.id,
            name: row.name,
            event_date: row.event_date,
            is_locked: row.is_locked,
            is_active: row.is_active,
        }
    }
}
