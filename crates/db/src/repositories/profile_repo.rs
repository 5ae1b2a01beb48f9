//! Repository for the `profiles` table.

use fightpicks_core::profile::suffixed_username;
use fightpicks_core::types::DbId;
use sqlx::PgPool;

use crate::models::profile::Profile;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, created_at, updated_at";

/// Provides read/write operations for profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Find the profile owned by a user.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Return the user's profile, creating it with `preferred` as username
    /// when it does not exist yet.
    ///
    /// If `preferred` is taken by someone else the user id is appended.
    pub async fn ensure_for_user(
        pool: &PgPool,
        user_id: DbId,
        preferred: &str,
    ) -> Result<Profile, sqlx::Error> {
        if let Some(existing) = Self::find_by_id(pool, user_id).await? {
            return Ok(existing);
        }

        let taken: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM profiles WHERE username = $1)")
                .bind(preferred)
                .fetch_one(pool)
                .await?;
        let username = if taken {
            tracing::debug!(user_id, preferred, "Default username taken, adding suffix");
            suffixed_username(preferred, user_id)
        } else {
            preferred.to_string()
        };

        let query = format!(
            "INSERT INTO profiles (id, username)
             VALUES ($1, $2)
             ON CONFLICT (id) DO UPDATE SET id = EXCLUDED.id
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .bind(username)
            .fetch_one(pool)
            .await
    }

    /// Change a user's display username.
    ///
    /// Returns `None` if the profile does not exist. A username already in
    /// use fails on `uq_profiles_username`.
    pub async fn update_username(
        pool: &PgPool,
        id: DbId,
        username: &str,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!(
            "UPDATE profiles SET username = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .bind(username)
            .fetch_optional(pool)
            .await
    }
}
