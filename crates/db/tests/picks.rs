//! Integration tests for the pick, profile, and leaderboard repositories.
//!
//! Exercises the repository layer against a real database:
//! - Upsert semantics on `(user_id, fight_id)`
//! - Attributed picks projection and keyset pagination
//! - Profile creation with username collisions
//! - Leaderboard counts over settled fights

use chrono::NaiveDate;
use fightpicks_db::models::event::{CreateEvent, Event};
use fightpicks_db::models::fight::{CreateFight, Fight};
use fightpicks_db::models::pick::{AttributedPickRow, Pick, PickCursor};
use fightpicks_db::models::user::{CreateUser, User};
use fightpicks_db::repositories::{
    EventRepo, FightRepo, LeaderboardRepo, PickRepo, ProfileRepo, UserRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_user(pool: &PgPool, username: &str) -> User {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: format!("{username}@test.com"),
            password_hash: "not-a-real-hash".to_string(),
        },
    )
    .await
    .unwrap();
    ProfileRepo::ensure_for_user(pool, user.id, username)
        .await
        .unwrap();
    user
}

async fn new_event(pool: &PgPool, name: &str, date: &str) -> Event {
    EventRepo::create(
        pool,
        &CreateEvent {
            name: name.to_string(),
            event_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            is_locked: None,
            is_active: None,
        },
    )
    .await
    .unwrap()
}

async fn new_fight(pool: &PgPool, event_id: i64, red: &str, blue: &str, order: i32) -> Fight {
    FightRepo::create(
        pool,
        &CreateFight {
            event_id,
            fighter_red: red.to_string(),
            fighter_blue: blue.to_string(),
            fight_order: order,
            fight_date: None,
        },
    )
    .await
    .unwrap()
}

async fn upsert(pool: &PgPool, user_id: i64, fight_id: i64, fighter: &str) {
    let mut tx = pool.begin().await.unwrap();
    PickRepo::upsert(&mut tx, user_id, fight_id, fighter)
        .await
        .unwrap();
    tx.commit().await.unwrap();
}

async fn stored_pick(pool: &PgPool, user_id: i64, fight_id: i64) -> Option<Pick> {
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

async fn pick_count(pool: &PgPool, fight_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM picks WHERE fight_id = $1")
        .bind(fight_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn next_page(
    conn: &mut sqlx::PgConnection,
    cursor: &mut Option<PickCursor>,
    limit: i64,
) -> Vec<AttributedPickRow> {
    let page = PickRepo::list_attributed_page(conn, *cursor, limit)
        .await
        .unwrap();
    if let Some(last) = page.last() {
        *cursor = Some(last.cursor());
    }
    page
}

// ---------------------------------------------------------------------------
// Upsert
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn upsert_twice_leaves_one_row_with_latest_pick(pool: PgPool) {
    let user = new_user(&pool, "alice").await;
    let event = new_event(&pool, "UFC 300", "2024-04-13").await;
    let fight = new_fight(&pool, event.id, "A", "B", 1).await;

    upsert(&pool, user.id, fight.id, "A").await;
    upsert(&pool, user.id, fight.id, "B").await;

    assert_eq!(pick_count(&pool, fight.id).await, 1);
    let pick = stored_pick(&pool, user.id, fight.id)
        .await
        .expect("pick should exist");
    assert_eq!(pick.picked_fighter, "B");
}

#[sqlx::test(migrations = "./migrations")]
async fn upsert_same_fighter_keeps_submission_time(pool: PgPool) {
    let user = new_user(&pool, "alice").await;
    let event = new_event(&pool, "UFC 300", "2024-04-13").await;
    let fight = new_fight(&pool, event.id, "A", "B", 1).await;

    upsert(&pool, user.id, fight.id, "A").await;
    let first = stored_pick(&pool, user.id, fight.id).await.unwrap();
    upsert(&pool, user.id, fight.id, "A").await;
    let second = stored_pick(&pool, user.id, fight.id).await.unwrap();

    assert_eq!(first.updated_at, second.updated_at);
    assert_eq!(second.picked_fighter, "A");
}

// ---------------------------------------------------------------------------
// Attributed picks
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn attributed_picks_carry_username(pool: PgPool) {
    let alice = new_user(&pool, "alice").await;
    let event = new_event(&pool, "UFC 300", "2024-04-13").await;
    let fight = new_fight(&pool, event.id, "A", "B", 1).await;
    upsert(&pool, alice.id, fight.id, "A").await;

    let mut conn = pool.acquire().await.unwrap();
    let rows = PickRepo::list_attributed_page(&mut conn, None, 100)
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].user_id, alice.id);
    assert_eq!(rows[0].picked_fighter, "A");
    assert_eq!(rows[0].usernames, vec!["alice".to_string()]);
}

#[sqlx::test(migrations = "./migrations")]
async fn attributed_pages_cover_every_pick_once(pool: PgPool) {
    let event = new_event(&pool, "UFC 300", "2024-04-13").await;
    let fight_a = new_fight(&pool, event.id, "A", "B", 1).await;
    let fight_b = new_fight(&pool, event.id, "C", "D", 2).await;

    let mut expected = 0;
    for name in ["u1", "u2", "u3"] {
        let user = new_user(&pool, name).await;
        upsert(&pool, user.id, fight_a.id, "A").await;
        upsert(&pool, user.id, fight_b.id, "D").await;
        expected += 2;
    }

    let mut conn = pool.acquire().await.unwrap();
    let mut seen = Vec::new();
    let mut cursor = None;
    loop {
        let page = next_page(&mut conn, &mut cursor, 2).await;
        if page.is_empty() {
            break;
        }
        seen.extend(page.into_iter().map(|row| (row.user_id, row.fight_id)));
    }

    assert_eq!(seen.len(), expected);
    let mut deduped = seen.clone();
    deduped.sort_unstable();
    deduped.dedup();
    assert_eq!(deduped.len(), expected, "no pick may appear on two pages");
}

#[sqlx::test(migrations = "./migrations")]
async fn snapshot_paging_ignores_pick_changed_mid_read(pool: PgPool) {
    let alice = new_user(&pool, "alice").await;
    let bob = new_user(&pool, "bob").await;
    let event = new_event(&pool, "UFC 300", "2024-04-13").await;
    let fight = new_fight(&pool, event.id, "A", "B", 1).await;
    upsert(&pool, alice.id, fight.id, "A").await;
    upsert(&pool, bob.id, fight.id, "A").await;

    let mut snapshot = fightpicks_db::begin_read_snapshot(&pool).await.unwrap();
    let mut cursor = None;
    let mut seen = next_page(&mut snapshot, &mut cursor, 1).await;
    assert_eq!(seen[0].user_id, alice.id);

    // Moves alice's row past the cursor in submission order.
    upsert(&pool, alice.id, fight.id, "B").await;

    loop {
        let page = next_page(&mut snapshot, &mut cursor, 1).await;
        if page.is_empty() {
            break;
        }
        seen.extend(page);
    }
    snapshot.commit().await.unwrap();

    assert_eq!(seen.len(), 2, "each pick is read exactly once");
    let alice_rows: Vec<_> = seen.iter().filter(|r| r.user_id == alice.id).collect();
    assert_eq!(alice_rows.len(), 1);
    assert_eq!(alice_rows[0].picked_fighter, "A");
    assert_eq!(
        stored_pick(&pool, alice.id, fight.id).await.unwrap().picked_fighter,
        "B"
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn read_snapshot_rejects_writes(pool: PgPool) {
    let alice = new_user(&pool, "alice").await;
    let event = new_event(&pool, "UFC 300", "2024-04-13").await;
    let fight = new_fight(&pool, event.id, "A", "B", 1).await;

    let mut snapshot = fightpicks_db::begin_read_snapshot(&pool).await.unwrap();
    let result = PickRepo::upsert(&mut snapshot, alice.id, fight.id, "A").await;

    assert!(result.is_err());
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn ensure_profile_is_idempotent_and_suffixes_collisions(pool: PgPool) {
    let first = new_user(&pool, "jones").await;
    let again = ProfileRepo::ensure_for_user(&pool, first.id, "someone-else")
        .await
        .unwrap();
    assert_eq!(again.username, "jones");

    let second = UserRepo::create(
        &pool,
        &CreateUser {
            email: "jones@other.com".to_string(),
            password_hash: "x".to_string(),
        },
    )
    .await
    .unwrap();
    let profile = ProfileRepo::ensure_for_user(&pool, second.id, "jones")
        .await
        .unwrap();
    assert_eq!(profile.username, format!("jones-{}", second.id));
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_username_violates_unique_constraint(pool: PgPool) {
    new_user(&pool, "taken").await;
    let other = new_user(&pool, "free").await;

    let err = ProfileRepo::update_username(&pool, other.id, "taken")
        .await
        .unwrap_err();
    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.constraint(), Some("uq_profiles_username"));
        }
        unexpected => panic!("expected database error, got {unexpected:?}"),
    }
}

// ---------------------------------------------------------------------------
// Leaderboard
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn leaderboard_counts_only_settled_fights(pool: PgPool) {
    let alice = new_user(&pool, "alice").await;
    let bob = new_user(&pool, "bob").await;
    let event = new_event(&pool, "UFC 300", "2024-04-13").await;
    let settled = new_fight(&pool, event.id, "A", "B", 1).await;
    let pending = new_fight(&pool, event.id, "C", "D", 2).await;

    upsert(&pool, alice.id, settled.id, "A").await;
    upsert(&pool, bob.id, settled.id, "B").await;
    upsert(&pool, alice.id, pending.id, "C").await;
    FightRepo::settle(&pool, settled.id, "A").await.unwrap();

    let rows = LeaderboardRepo::list(&pool).await.unwrap();

    assert_eq!(rows.len(), 2);
    let alice_row = rows.iter().find(|r| r.user_id == alice.id).unwrap();
    assert_eq!(alice_row.total_picks, 1);
    assert_eq!(alice_row.correct_picks, 1);
    let bob_row = rows.iter().find(|r| r.user_id == bob.id).unwrap();
    assert_eq!(bob_row.total_picks, 1);
    assert_eq!(bob_row.correct_picks, 0);
}
