//! Handler for `PUT /fights/{fight_id}/pick`.

use axum::extract::{Path, State};
use axum::Json;
use fightpicks_core::types::DbId;
use fightpicks_db::models::pick::Pick;
use serde::Deserialize;

use crate::board::submit_pick;
use crate::error::AppResult;
use crate::middleware::auth::MaybeAuth;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SubmitPickRequest {
    pub fighter: String,
}

/// PUT /api/v1/fights/{fight_id}/pick
///
/// Create or replace the caller's pick. Anonymous callers get 401.
pub async fn put_pick(
    State(state): State<AppState>,
    auth: MaybeAuth,
    Path(fight_id): Path<DbId>,
    Json(input): Json<SubmitPickRequest>,
) -> AppResult<Json<DataResponse<Pick>>> {
    let pick = submit_pick(&state.pool, auth.user_id(), fight_id, &input.fighter).await?;
    Ok(Json(DataResponse { data: pick }))
}
