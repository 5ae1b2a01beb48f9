pub mod health;

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/register            register (public)
/// /auth/login               login (public)
///
/// /board                    board view (token optional)
/// /fights/{fight_id}/pick   submit pick (PUT, auth required)
///
/// /profile                  get, update username (auth required)
/// /leaderboard              ranked standings (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/board", get(handlers::board::get_board))
        .route("/fights/{fight_id}/pick", put(handlers::picks::put_pick))
        .route(
            "/profile",
            get(handlers::profile::get_profile).put(handlers::profile::update_profile),
        )
        .route("/leaderboard", get(handlers::leaderboard::list_leaderboard))
}
