//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO where rows are inserted through this crate
//! - A conversion into the matching `fightpicks_core` record where the
//!   board logic consumes the row

pub mod event;
pub mod fight;
pub mod leaderboard;
pub mod pick;
pub mod profile;
pub mod user;
