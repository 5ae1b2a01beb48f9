//! Handler for the public `/leaderboard`.

use axum::extract::{Query, State};
use axum::Json;
use fightpicks_core::leaderboard::{rank_rows, RankedRow, SortDirection, SortKey};
use fightpicks_db::repositories::LeaderboardRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LeaderboardParams {
    #[serde(default)]
    pub sort: SortKey,
    #[serde(default)]
    pub dir: SortDirection,
}

/// GET /api/v1/leaderboard?sort=&dir=
///
/// Only settled fights count. Defaults to most correct picks first.
pub async fn list_leaderboard(
    State(state): State<AppState>,
    Query(params): Query<LeaderboardParams>,
) -> AppResult<Json<DataResponse<Vec<RankedRow>>>> {
    let rows = LeaderboardRepo::list(&state.pool).await?;
    let ranked = rank_rows(
        rows.into_iter().map(Into::into).collect(),
        params.sort,
        params.dir,
    );
    Ok(Json(DataResponse { data: ranked }))
}
