//! Handler for the `/board` resource.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use fightpicks_core::board::BoardView;

use crate::board::{load_board, PgBoardSource};
use crate::middleware::auth::MaybeAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/board
///
/// Events with their fights, lock state, the caller's picks, and who picked
/// whom. Works without a token; anonymous callers get no pick data.
/// Always 200: failed sources are reported in `degraded`.
pub async fn get_board(
    State(state): State<AppState>,
    auth: MaybeAuth,
) -> Json<DataResponse<BoardView>> {
    let source = PgBoardSource::new(state.pool.clone(), state.config.board_picks_page_size);
    let view = load_board(&source, auth.user_id(), Utc::now()).await;
    Json(DataResponse { data: view })
}
