//! Join & group engine: rebuilds the event -> fights relation from flat rows.
//!
//! A fight belongs to exactly one event. Fights whose reference is missing or
//! does not resolve are dropped and reported as a [`DataIntegrityAnomaly`];
//! they never land in a synthetic "unknown" bucket.

use std::collections::HashMap;

use serde::Serialize;

use super::records::{EventRecord, FightRecord};
use crate::types::DbId;

/// A data fault found while joining fights to events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataIntegrityAnomaly {
    /// The fight row carried no event reference at all. Dropped.
    MissingEventReference { fight_id: DbId },
    /// The referenced event is not in the loaded event set. Dropped.
    DanglingEventReference { fight_id: DbId, event_id: DbId },
    /// The event set held several records for the referenced id.
    ///
    /// When the duplicates are identical the first is used (`kept = true`);
    /// when they disagree the fight is dropped.
    AmbiguousEventReference {
        fight_id: DbId,
        event_id: DbId,
        matches: usize,
        kept: bool,
    },
}

/// One event with its fights in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventGroup {
    pub event: EventRecord,
    pub fights: Vec<FightRecord>,
}

/// Output of [`group_fights`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedBoard {
    /// Events ordered by `event_date` descending (ties by id ascending).
    pub groups: Vec<EventGroup>,
    pub anomalies: Vec<DataIntegrityAnomaly>,
}

enum Resolution<'a> {
    Resolved(&'a EventRecord),
    Dropped,
}

/// Group `fights` under their owning `events`.
///
/// Arrival order of either input does not matter: events come out newest
/// first and fights ascend by `fight_order` (ties by id). Events with no
/// resolvable fights are omitted.
pub fn group_fights(events: &[EventRecord], fights: &[FightRecord]) -> GroupedBoard {
    let mut by_id: HashMap<DbId, Vec<&EventRecord>> = HashMap::new();
    for event in events {
        by_id.entry(event.id).or_default().push(event);
    }

    let mut anomalies = Vec::new();
    let mut grouped: HashMap<DbId, EventGroup> = HashMap::new();

    for fight in fights {
        let event = match resolve_event(fight, &by_id, &mut anomalies) {
            Resolution::Resolved(event) => event,
            Resolution::Dropped => continue,
        };
        grouped
            .entry(event.id)
            .or_insert_with(|| EventGroup {
                event: event.clone(),
                fights: Vec::new(),
            })
            .fights
            .push(fight.clone());
    }

    let mut groups: Vec<EventGroup> = grouped.into_values().collect();
    for group in &mut groups {
        group
            .fights
            .sort_by(|a, b| a.fight_order.cmp(&b.fight_order).then(a.id.cmp(&b.id)));
    }
    groups.sort_by(|a, b| {
        b.event
            .event_date
            .cmp(&a.event.event_date)
            .then(a.event.id.cmp(&b.event.id))
    });

    GroupedBoard { groups, anomalies }
}

fn resolve_event<'a>(
    fight: &FightRecord,
    by_id: &HashMap<DbId, Vec<&'a EventRecord>>,
    anomalies: &mut Vec<DataIntegrityAnomaly>,
) -> Resolution<'a> {
    let Some(event_id) = fight.event_id else {
        anomalies.push(DataIntegrityAnomaly::MissingEventReference { fight_id: fight.id });
        return Resolution::Dropped;
    };

    match by_id.get(&event_id).map(Vec::as_slice) {
        None | Some([]) => {
            anomalies.push(DataIntegrityAnomaly::DanglingEventReference {
                fight_id: fight.id,
                event_id,
            });
            Resolution::Dropped
        }
        Some([only]) => Resolution::Resolved(*only),
        Some(matches @ [first, rest @ ..]) => {
            let kept = rest.iter().all(|other| *other == *first);
            anomalies.push(DataIntegrityAnomaly::AmbiguousEventReference {
                fight_id: fight.id,
                event_id,
                matches: matches.len(),
                kept,
            });
            if kept {
                Resolution::Resolved(*first)
            } else {
                Resolution::Dropped
            }
        }
    }
}
