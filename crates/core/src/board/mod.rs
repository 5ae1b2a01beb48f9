//! Lock-aware, per-event board assembly.
//!
//! Data flows one way: flat records from the store are joined and grouped
//! ([`grouping`]), each fight is given a lock state ([`lock`]), the pick
//! rows are reduced to own picks and tallies ([`tally`]), and everything is
//! folded into the display structure ([`view`]).

pub mod grouping;
pub mod lock;
pub mod records;
pub mod tally;
pub mod view;

pub use grouping::{group_fights, DataIntegrityAnomaly, EventGroup, GroupedBoard};
pub use lock::{evaluate_lock, LockReason, LockState};
pub use records::{AttributedPick, EventRecord, FightRecord, OwnPickRecord};
pub use tally::{own_picks, tally_picks, PickTally, TallyAnomaly};
pub use view::{assemble_board, BoardSection, BoardView, EventSection, FightCard, FighterTally, OwnPick, PickStatus};
