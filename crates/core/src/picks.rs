//! Pick submission rules.
//!
//! The write path calls [`check_submission`] with fight and event state read
//! at submission time. It uses the same [`evaluate_lock`] the board renders
//! with, so the displayed lock and the enforced lock cannot drift apart.

use crate::board::lock::{evaluate_lock, LockReason, LockState};
use crate::board::records::{EventRecord, FightRecord};
use crate::types::{DbId, Timestamp};

/// Why a pick write was refused. No partial effect ever accompanies one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PickRejection {
    /// The chosen name is not one of the fight's two competitors.
    #[error("'{fighter}' is not a competitor in fight {fight_id}")]
    InvalidSelection { fight_id: DbId, fighter: String },

    /// The fight no longer accepts picks.
    #[error("{0}")]
    LockedFight(LockReason),
}

/// Validate a pick of `fighter` for `fight` at `now`.
///
/// The selection is checked before the lock, so a bad name is reported as
/// such even on a locked fight.
pub fn check_submission(
    fight: &FightRecord,
    event: &EventRecord,
    fighter: &str,
    now: Timestamp,
) -> Result<(), PickRejection> {
    if !fight.has_competitor(fighter) {
        return Err(PickRejection::InvalidSelection {
            fight_id: fight.id,
            fighter: fighter.to_string(),
        });
    }

    match evaluate_lock(fight, event, now) {
        LockState::Open => Ok(()),
        LockState::Locked(reason) => Err(PickRejection::LockedFight(reason)),
    }
}
