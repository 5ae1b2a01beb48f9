//! Handlers for the caller's `/profile`.

use axum::extract::State;
use axum::Json;
use fightpicks_core::error::CoreError;
use fightpicks_core::profile::UpdateUsername;
use fightpicks_db::models::profile::Profile;
use fightpicks_db::repositories::ProfileRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/profile
pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Profile>>> {
    let profile = ProfileRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: user.user_id,
        }))?;
    Ok(Json(DataResponse { data: profile }))
}

/// PUT /api/v1/profile
///
/// Change the display username. A name already in use is a 409.
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<UpdateUsername>,
) -> AppResult<Json<DataResponse<Profile>>> {
    let username = input.normalized()?;

    let profile = ProfileRepo::update_username(&state.pool, user.user_id, &username)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: user.user_id,
        }))?;

    tracing::info!(user_id = user.user_id, username = %profile.username, "Username changed");
    Ok(Json(DataResponse { data: profile }))
}
