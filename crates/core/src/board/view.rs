//! View model assembly: the one structure the presentation layer renders.
//!
//! Everything a page needs is already resolved here (lock state, own pick,
//! tally per competitor), so rendering does no further lookups.

use std::collections::HashMap;

use serde::Serialize;

use super::grouping::GroupedBoard;
use super::lock::{evaluate_lock, LockReason};
use super::tally::PickTally;
use crate::types::{DbId, EventDate, Timestamp};

/// A board source that failed to load and was rendered empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardSection {
    Events,
    Fights,
    OwnPicks,
    Tally,
}

/// Whether the caller's own pick is backed by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PickStatus {
    /// Loaded from the store.
    Confirmed,
    /// Applied locally before the store confirmed it; replaced on reload.
    Tentative,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnPick {
    pub fighter: String,
    pub status: PickStatus,
}

/// Usernames that picked one competitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FighterTally {
    pub fighter: String,
    pub usernames: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FightCard {
    pub id: DbId,
    pub fighter_red: String,
    pub fighter_blue: String,
    pub fight_order: i32,
    pub fight_date: Option<Timestamp>,
    pub winner: Option<String>,
    pub locked: bool,
    pub lock_reason: Option<LockReason>,
    pub own_pick: Option<OwnPick>,
    /// Red corner first, then blue.
    pub tally: [FighterTally; 2],
}

impl FightCard {
    pub fn tally_for(&self, fighter: &str) -> Option<&FighterTally> {
        self.tally.iter().find(|t| t.fighter == fighter)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventSection {
    pub id: DbId,
    pub name: String,
    pub event_date: EventDate,
    pub is_locked: bool,
    pub is_active: bool,
    /// Expanded by default iff the event is unlocked.
    pub default_open: bool,
    pub fights: Vec<FightCard>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardView {
    pub events: Vec<EventSection>,
    /// Sections rendered empty because their source failed.
    pub degraded: Vec<BoardSection>,
    /// The instant lock states were evaluated against.
    pub evaluated_at: Timestamp,
}

impl BoardView {
    pub fn find_fight(&self, fight_id: DbId) -> Option<&FightCard> {
        self.events
            .iter()
            .flat_map(|e| e.fights.iter())
            .find(|f| f.id == fight_id)
    }

    fn find_fight_mut(&mut self, fight_id: DbId) -> Option<&mut FightCard> {
        self.events
            .iter_mut()
            .flat_map(|e| e.fights.iter_mut())
            .find(|f| f.id == fight_id)
    }

    /// Show `fighter` as the caller's pick before the store confirms it.
    ///
    /// Only applies to an open fight on this board and one of its two
    /// competitors. Returns whether the tentative pick was applied. The value
    /// is never treated as committed: the next authoritative load replaces
    /// the whole view.
    pub fn apply_tentative_pick(&mut self, fight_id: DbId, fighter: &str) -> bool {
        let Some(card) = self.find_fight_mut(fight_id) else {
            return false;
        };
        if card.locked || (card.fighter_red != fighter && card.fighter_blue != fighter) {
            return false;
        }
        card.own_pick = Some(OwnPick {
            fighter: fighter.to_string(),
            status: PickStatus::Tentative,
        });
        true
    }
}

/// Fold grouped fights, own picks, and tallies into a [`BoardView`].
///
/// Lock state is evaluated for every fight against `now`.
pub fn assemble_board(
    grouped: &GroupedBoard,
    own_picks: &HashMap<DbId, String>,
    tally: &PickTally,
    now: Timestamp,
) -> BoardView {
    let events = grouped
        .groups
        .iter()
        .map(|group| {
            let event = &group.event;
            let fights = group
                .fights
                .iter()
                .map(|fight| {
                    let lock = evaluate_lock(fight, event, now);
                    let competitor = |name: &str| FighterTally {
                        fighter: name.to_string(),
                        usernames: tally.usernames_for(fight.id, name).to_vec(),
                    };
                    FightCard {
                        id: fight.id,
                        fighter_red: fight.fighter_red.clone(),
                        fighter_blue: fight.fighter_blue.clone(),
                        fight_order: fight.fight_order,
                        fight_date: fight.fight_date,
                        winner: fight.winner.clone(),
                        locked: lock.is_locked(),
                        lock_reason: lock.reason(),
                        own_pick: own_picks.get(&fight.id).map(|fighter| OwnPick {
                            fighter: fighter.clone(),
                            status: PickStatus::Confirmed,
                        }),
                        tally: [competitor(&fight.fighter_red), competitor(&fight.fighter_blue)],
                    }
                })
                .collect();

            EventSection {
                id: event.id,
                name: event.name.clone(),
                event_date: event.event_date,
                is_locked: event.is_locked,
                is_active: event.is_active,
                default_open: !event.is_locked,
                fights,
            }
        })
        .collect();

    BoardView {
        events,
        degraded: Vec::new(),
        evaluated_at: now,
    }
}
