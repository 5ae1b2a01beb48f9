//! Pick submission.
//!
//! The fight and its event are read `FOR SHARE` inside the same transaction
//! as the upsert. A concurrent lock or settle of that fight waits for the
//! submission to commit, so the lock decision holds for the write it gates.

use chrono::Utc;
use fightpicks_core::error::CoreError;
use fightpicks_core::picks::check_submission;
use fightpicks_core::types::DbId;
use fightpicks_db::models::pick::Pick;
use fightpicks_db::repositories::{FightRepo, PickRepo};
use fightpicks_db::DbPool;

use crate::error::{AppError, AppResult};

/// Record `fighter` as `user_id`'s pick for `fight_id`.
///
/// Rejections leave the store untouched: the transaction is dropped, and
/// so rolled back, before any write happens.
pub async fn submit_pick(
    pool: &DbPool,
    user_id: Option<DbId>,
    fight_id: DbId,
    fighter: &str,
) -> AppResult<Pick> {
    let user_id = user_id.ok_or_else(|| {
        AppError::Core(CoreError::Unauthorized("Sign in to make picks".into()))
    })?;

    let mut tx = pool.begin().await?;

    let (fight, event) = FightRepo::find_with_event_for_share(&mut tx, fight_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Fight",
            id: fight_id,
        }))?
        .into_records();

    if let Err(rejection) = check_submission(&fight, &event, fighter, Utc::now()) {
        tracing::info!(user_id, fight_id, %rejection, "Pick rejected");
        return Err(rejection.into());
    }

    let pick = PickRepo::upsert(&mut tx, user_id, fight_id, fighter).await?;
    tx.commit().await?;

    tracing::info!(user_id, fight_id, fighter, "Pick saved");
    Ok(pick)
}
