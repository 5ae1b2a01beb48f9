//! Board read path and pick write path.
//!
//! - [`loader`] -- `load_board`: concurrent fetch, degrade, assemble.
//! - [`submit`] -- `submit_pick`: lock-checked upsert in one transaction.

pub mod loader;
pub mod submit;

pub use loader::{load_board, BoardSource, PgBoardSource};
pub use submit::submit_pick;
