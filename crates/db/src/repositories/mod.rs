//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` (or an open transaction) as the first argument.

pub mod event_repo;
pub mod fight_repo;
pub mod leaderboard_repo;
pub mod pick_repo;
pub mod profile_repo;
pub mod user_repo;

pub use event_repo::EventRepo;
pub use fight_repo::FightRepo;
pub use leaderboard_repo::LeaderboardRepo;
pub use pick_repo::PickRepo;
pub use profile_repo::ProfileRepo;
pub use user_repo::UserRepo;
