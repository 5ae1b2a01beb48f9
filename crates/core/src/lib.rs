//! Pure domain logic for the fight picks board.
//!
//! This crate has zero internal dependencies so the board assembly, lock
//! predicate, and submission rules can be shared by the API layer and any
//! future tooling without pulling in the database stack.

pub mod board;
pub mod error;
pub mod leaderboard;
pub mod picks;
pub mod profile;
pub mod types;
