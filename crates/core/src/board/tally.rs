//! Pick tally aggregation.
//!
//! Reduces attributed pick rows into `fight -> fighter -> [username]` with
//! usernames in arrival order, and extracts the caller's own picks.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Serialize;

use super::records::{AttributedPick, OwnPickRecord};
use crate::types::DbId;

/// A pick row whose attribution was not exactly one username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TallyAnomaly {
    /// No username came back for the pick; it counts toward nobody.
    Unattributed { fight_id: DbId, user_id: DbId },
    /// Several distinct usernames came back; the first was used.
    FanOut {
        fight_id: DbId,
        user_id: DbId,
        usernames: usize,
    },
    /// The same (fight, fighter, user) arrived more than once; repeats skipped.
    DuplicateRow { fight_id: DbId, user_id: DbId },
    /// The same (fight, user) arrived again with another fighter. The later
    /// row was kept and `dropped_fighter` was not counted.
    Superseded {
        fight_id: DbId,
        user_id: DbId,
        dropped_fighter: String,
    },
}

/// Per-fight, per-fighter list of usernames who picked that fighter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickTally {
    by_fight: HashMap<DbId, IndexMap<String, Vec<String>>>,
    pub anomalies: Vec<TallyAnomaly>,
}

impl PickTally {
    /// Usernames that picked `fighter` in `fight_id`, in arrival order.
    pub fn usernames_for(&self, fight_id: DbId, fighter: &str) -> &[String] {
        self.by_fight
            .get(&fight_id)
            .and_then(|fighters| fighters.get(fighter))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All fighter buckets for a fight, in the order they first appeared.
    pub fn fighters(&self, fight_id: DbId) -> Option<&IndexMap<String, Vec<String>>> {
        self.by_fight.get(&fight_id)
    }

    pub fn is_empty(&self) -> bool {
        self.by_fight.is_empty()
    }
}

/// Reduce attributed pick rows into a [`PickTally`].
///
/// Each (fight, user) contributes at most one username. When the source
/// repeats a pair, only its last row counts, whatever fighter the earlier
/// rows named.
pub fn tally_picks(picks: &[AttributedPick]) -> PickTally {
    let mut tally = PickTally::default();

    let mut last_row: HashMap<(DbId, DbId), usize> = HashMap::new();
    for (index, pick) in picks.iter().enumerate() {
        last_row.insert((pick.fight_id, pick.user_id), index);
    }

    for (index, pick) in picks.iter().enumerate() {
        let kept = last_row[&(pick.fight_id, pick.user_id)];
        if index != kept {
            let anomaly = if picks[kept].picked_fighter == pick.picked_fighter {
                TallyAnomaly::DuplicateRow {
                    fight_id: pick.fight_id,
                    user_id: pick.user_id,
                }
            } else {
                TallyAnomaly::Superseded {
                    fight_id: pick.fight_id,
                    user_id: pick.user_id,
                    dropped_fighter: pick.picked_fighter.clone(),
                }
            };
            tally.anomalies.push(anomaly);
            continue;
        }

        let bucket = tally
            .by_fight
            .entry(pick.fight_id)
            .or_default()
            .entry(pick.picked_fighter.clone())
            .or_default();

        let mut distinct: Vec<&String> = Vec::with_capacity(pick.usernames.len());
        for name in &pick.usernames {
            if !distinct.contains(&name) {
                distinct.push(name);
            }
        }

        let username = match distinct.as_slice() {
            [] => {
                tally.anomalies.push(TallyAnomaly::Unattributed {
                    fight_id: pick.fight_id,
                    user_id: pick.user_id,
                });
                continue;
            }
            [only] => *only,
            [first, ..] => {
                tally.anomalies.push(TallyAnomaly::FanOut {
                    fight_id: pick.fight_id,
                    user_id: pick.user_id,
                    usernames: distinct.len(),
                });
                *first
            }
        };

        if !bucket.contains(username) {
            bucket.push(username.clone());
        }
    }

    tally
}

/// Extract the caller's own pick per fight.
///
/// (user, fight) is unique in the store; should a source still repeat a
/// fight, the later row wins.
pub fn own_picks(records: &[OwnPickRecord]) -> HashMap<DbId, String> {
    records
        .iter()
        .map(|r| (r.fight_id, r.picked_fighter.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pick(user_id: DbId, fight_id: DbId, fighter: &str, usernames: &[&str]) -> AttributedPick {
        AttributedPick {
            user_id,
            fight_id,
            picked_fighter: fighter.to_string(),
            usernames: usernames.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn groups_by_fight_and_fighter_in_arrival_order() {
        let picks = vec![
            pick(3, 1, "A", &["carol"]),
            pick(1, 1, "B", &["alice"]),
            pick(2, 1, "A", &["bob"]),
            pick(1, 2, "C", &["alice"]),
        ];

        let tally = tally_picks(&picks);

        assert_eq!(tally.usernames_for(1, "A"), ["carol", "bob"]);
        assert_eq!(tally.usernames_for(1, "B"), ["alice"]);
        assert_eq!(tally.usernames_for(2, "C"), ["alice"]);
        assert!(tally.usernames_for(2, "D").is_empty());
        assert!(tally.usernames_for(99, "A").is_empty());
        assert!(tally.anomalies.is_empty());

        let fighters: Vec<&String> = tally.fighters(1).unwrap().keys().collect();
        assert_eq!(fighters, ["A", "B"]);
    }

    #[test]
    fn duplicate_rows_never_repeat_a_username() {
        let picks = vec![
            pick(1, 1, "A", &["alice"]),
            pick(1, 1, "A", &["alice"]),
            pick(1, 1, "A", &["alice", "alice"]),
        ];

        let tally = tally_picks(&picks);

        assert_eq!(tally.usernames_for(1, "A"), ["alice"]);
        assert_eq!(
            tally.anomalies,
            vec![
                TallyAnomaly::DuplicateRow { fight_id: 1, user_id: 1 },
                TallyAnomaly::DuplicateRow { fight_id: 1, user_id: 1 },
            ]
        );
    }

    #[test]
    fn changed_pick_counts_only_under_latest_fighter() {
        let picks = vec![
            pick(1, 1, "A", &["alice"]),
            pick(2, 1, "A", &["bob"]),
            pick(1, 1, "B", &["alice"]),
        ];

        let tally = tally_picks(&picks);

        assert_eq!(tally.usernames_for(1, "A"), ["bob"]);
        assert_eq!(tally.usernames_for(1, "B"), ["alice"]);
        assert_eq!(
            tally.anomalies,
            vec![TallyAnomaly::Superseded {
                fight_id: 1,
                user_id: 1,
                dropped_fighter: "A".to_string(),
            }]
        );
    }

    #[test]
    fn same_user_on_other_fights_is_not_superseded() {
        let picks = vec![pick(1, 1, "A", &["alice"]), pick(1, 2, "D", &["alice"])];

        let tally = tally_picks(&picks);

        assert_eq!(tally.usernames_for(1, "A"), ["alice"]);
        assert_eq!(tally.usernames_for(2, "D"), ["alice"]);
        assert!(tally.anomalies.is_empty());
    }

    #[test]
    fn repeated_username_in_one_row_is_not_fan_out() {
        let tally = tally_picks(&[pick(1, 1, "A", &["alice", "alice"])]);

        assert_eq!(tally.usernames_for(1, "A"), ["alice"]);
        assert!(tally.anomalies.is_empty());
    }

    #[test]
    fn fan_out_keeps_first_username_only() {
        let tally = tally_picks(&[pick(1, 1, "A", &["alice", "mallory"])]);

        assert_eq!(tally.usernames_for(1, "A"), ["alice"]);
        assert_eq!(
            tally.anomalies,
            vec![TallyAnomaly::FanOut {
                fight_id: 1,
                user_id: 1,
                usernames: 2
            }]
        );
    }

    #[test]
    fn unattributed_pick_creates_bucket_but_no_name() {
        let tally = tally_picks(&[pick(7, 1, "A", &[])]);

        assert!(tally.fighters(1).unwrap().contains_key("A"));
        assert!(tally.usernames_for(1, "A").is_empty());
        assert_eq!(
            tally.anomalies,
            vec![TallyAnomaly::Unattributed { fight_id: 1, user_id: 7 }]
        );
    }

    #[test]
    fn own_picks_keyed_by_fight() {
        let records = vec![
            OwnPickRecord {
                fight_id: 1,
                picked_fighter: "A".to_string(),
            },
            OwnPickRecord {
                fight_id: 2,
                picked_fighter: "D".to_string(),
            },
        ];

        let own = own_picks(&records);

        assert_eq!(own.len(), 2);
        assert_eq!(own[&1], "A");
        assert_eq!(own[&2], "D");
    }

    #[test]
    fn empty_input_gives_empty_tally() {
        let tally = tally_picks(&[]);
        assert!(tally.is_empty());
        assert!(own_picks(&[]).is_empty());
    }
}
