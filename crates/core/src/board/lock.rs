//! The single lock predicate shared by the board and the pick write path.
//!
//! `locked(fight) = fight.is_final OR fight_date <= now OR event.is_locked`.
//! It is recomputed on every call against the caller's `now`; nothing here
//! caches a decision.

use serde::Serialize;

use super::records::{EventRecord, FightRecord};
use crate::types::Timestamp;

/// Why a fight no longer accepts picks.
///
/// Variants are listed in precedence order: a decided fight reports
/// [`LockReason::Decided`] even if its event is also locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LockReason {
    /// The fight is final.
    Decided,
    /// The fight's scheduled start time has passed.
    Started,
    /// The owning event is locked.
    EventLocked,
}

impl LockReason {
    /// User-facing explanation.
    pub fn message(self) -> &'static str {
        match self {
            LockReason::Decided => "This fight has already been decided",
            LockReason::Started => "This fight is past its scheduled start time",
            LockReason::EventLocked => "Picks for this event are closed",
        }
    }
}

impl std::fmt::Display for LockReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Lock decision for one fight at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Open,
    Locked(LockReason),
}

impl LockState {
    pub fn is_locked(self) -> bool {
        matches!(self, LockState::Locked(_))
    }

    pub fn reason(self) -> Option<LockReason> {
        match self {
            LockState::Open => None,
            LockState::Locked(reason) => Some(reason),
        }
    }
}

/// Evaluate the lock state of `fight` (owned by `event`) at `now`.
///
/// Fight-level causes win over the event flag, so a finished fight stays
/// locked while the rest of its card is still open.
pub fn evaluate_lock(fight: &FightRecord, event: &EventRecord, now: Timestamp) -> LockState {
    if fight.is_final {
        return LockState::Locked(LockReason::Decided);
    }
    if fight.fight_date.is_some_and(|starts_at| starts_at <= now) {
        return LockState::Locked(LockReason::Started);
    }
    if event.is_locked {
        return LockState::Locked(LockReason::EventLocked);
    }
    LockState::Open
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, TimeZone, Utc};

    use super::*;

    fn event(is_locked: bool) -> EventRecord {
        EventRecord {
            id: 1,
            name: "Fight Night".to_string(),
            event_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            is_locked,
            is_active: true,
        }
    }

    fn fight(fight_date: Option<Timestamp>, is_final: bool) -> FightRecord {
        FightRecord {
            id: 10,
            event_id: Some(1),
            fighter_red: "A".to_string(),
            fighter_blue: "B".to_string(),
            fight_order: 1,
            fight_date,
            is_final,
            winner: None,
        }
    }

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 2, 1, 20, 0, 0).unwrap()
    }

    #[test]
    fn open_when_nothing_locks() {
        let state = evaluate_lock(&fight(None, false), &event(false), now());
        assert_eq!(state, LockState::Open);
        assert!(!state.is_locked());
        assert_eq!(state.reason(), None);
    }

    #[test]
    fn event_flag_locks_fight() {
        let state = evaluate_lock(&fight(None, false), &event(true), now());
        assert_eq!(state, LockState::Locked(LockReason::EventLocked));
    }

    #[test]
    fn final_fight_overrides_open_event() {
        let state = evaluate_lock(&fight(None, true), &event(false), now());
        assert_eq!(state, LockState::Locked(LockReason::Decided));
    }

    #[test]
    fn past_fight_date_locks() {
        let f = fight(Some(now() - Duration::minutes(1)), false);
        let state = evaluate_lock(&f, &event(false), now());
        assert_eq!(state, LockState::Locked(LockReason::Started));
    }

    #[test]
    fn fight_date_equal_to_now_locks() {
        let f = fight(Some(now()), false);
        assert!(evaluate_lock(&f, &event(false), now()).is_locked());
    }

    #[test]
    fn future_fight_date_stays_open() {
        let f = fight(Some(now() + Duration::hours(2)), false);
        assert_eq!(evaluate_lock(&f, &event(false), now()), LockState::Open);
    }

    #[test]
    fn decided_takes_precedence_over_other_causes() {
        let f = fight(Some(now() - Duration::hours(1)), true);
        let state = evaluate_lock(&f, &event(true), now());
        assert_eq!(state.reason(), Some(LockReason::Decided));
    }

    #[test]
    fn lock_is_monotonic_in_time() {
        let start = now();
        let f = fight(Some(start), false);
        let e = event(false);

        let mut seen_locked = false;
        for minutes in -30..=30 {
            let locked = evaluate_lock(&f, &e, start + Duration::minutes(minutes)).is_locked();
            if seen_locked {
                assert!(locked, "lock must not release at offset {minutes}");
            }
            seen_locked |= locked;
        }
        assert!(seen_locked);
    }

    #[test]
    fn reasons_have_distinct_messages() {
        assert_ne!(LockReason::Decided.message(), LockReason::Started.message());
        assert_ne!(LockReason::Started.message(), LockReason::EventLocked.message());
        assert_eq!(LockReason::Decided.to_string(), LockReason::Decided.message());
    }
}
