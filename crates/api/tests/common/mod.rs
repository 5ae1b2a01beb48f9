#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use chrono::NaiveDate;
use fightpicks_api::auth::jwt::{generate_access_token, JwtConfig};
use fightpicks_api::config::ServerConfig;
use fightpicks_api::router::build_app_router;
use fightpicks_api::state::AppState;
use fightpicks_core::types::{DbId, Timestamp};
use fightpicks_db::models::event::{CreateEvent, Event};
use fightpicks_db::models::fight::{CreateFight, Fight};
use fightpicks_db::models::pick::Pick;
use fightpicks_db::models::user::{CreateUser, User};
use fightpicks_db::repositories::{EventRepo, FightRepo, ProfileRepo, UserRepo};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

/// Test configuration matching the development defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        board_picks_page_size: 2,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Full application router over `pool`, with the production middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_router(AppState {
        pool,
        config: Arc::new(test_config()),
    })
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, None, Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A user with a profile named `username`, plus a valid access token.
pub async fn signed_in_user(pool: &PgPool, username: &str) -> (User, String) {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: format!("{username}@test.com"),
            password_hash: "unused".to_string(),
        },
    )
    .await
    .unwrap();
    ProfileRepo::ensure_for_user(pool, user.id, username)
        .await
        .unwrap();
    let token = generate_access_token(user.id, &test_config().jwt).unwrap();
    (user, token)
}

pub async fn create_event(pool: &PgPool, name: &str, date: &str, is_locked: bool) -> Event {
    EventRepo::create(
        pool,
        &CreateEvent {
            name: name.to_string(),
            event_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            is_locked: Some(is_locked),
            is_active: None,
        },
    )
    .await
    .unwrap()
}

pub async fn create_fight(
    pool: &PgPool,
    event_id: DbId,
    red: &str,
    blue: &str,
    order: i32,
    fight_date: Option<Timestamp>,
) -> Fight {
    FightRepo::create(
        pool,
        &CreateFight {
            event_id,
            fighter_red: red.to_string(),
            fighter_blue: blue.to_string(),
            fight_order: order,
            fight_date,
        },
    )
    .await
    .unwrap()
}

// ---------------------------------------------------------------------------
// Stored state
// ---------------------------------------------------------------------------

/// The pick row currently stored for `(user_id, fight_id)`, read directly.
pub async fn stored_pick(pool: &PgPool, user_id: DbId, fight_id: DbId) -> Option<Pick> {
    sqlx::query_as::<_, Pick>(
        "SELECT user_id, fight_id, picked_fighter, created_at, updated_at \
         FROM picks WHERE user_id = $1 AND fight_id = $2",
    )
    .bind(user_id)
    .bind(fight_id)
    .fetch_optional(pool)
    .await
    .unwrap()
}

pub async fn pick_count(pool: &PgPool, fight_id: DbId) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM picks WHERE fight_id = $1")
        .bind(fight_id)
        .fetch_one(pool)
        .await
        .unwrap()
}
