//! Repository for the `storyboards` table.

use sqlx::PgPool;

use playlet_core::types::DbId;

use crate::models::storyboard::{
    CreateStoryboard, Storyboard, UpdateStoryboard, DEFAULT_BOARD_NUMBER, DEFAULT_BOARD_TITLE,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, episode_id, board_number, title, description, created_at, updated_at";

/// Provides CRUD operations for storyboards.
pub struct StoryboardRepo;

impl StoryboardRepo {
    /// Insert a new storyboard under an episode, returning the created row.
    ///
    /// A duplicate `board_number` within the episode violates
    /// `uq_storyboards_episode_number` and surfaces as a conflict.
    pub async fn create(
        pool: &PgPool,
        episode_id: DbId,
        input: &CreateStoryboard,
    ) -> Result<Storyboard, sqlx::Error> {
        let query = format!(
            "INSERT INTO storyboards (episode_id, board_number, title, description)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Storyboard>(&query)
            .bind(episode_id)
            .bind(input.board_number)
            .bind(&input.title)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Fetch the episode's default storyboard (board 0), creating it if
    /// absent.
    ///
    /// Single-statement upsert so two concurrent ungrouped shot creations
    /// cannot race into creating two default boards. The no-op `DO UPDATE`
    /// makes the statement return the existing row on conflict.
    pub async fn find_or_create_default(
        pool: &PgPool,
        episode_id: DbId,
    ) -> Result<Storyboard, sqlx::Error> {
        let query = format!(
            "INSERT INTO storyboards (episode_id, board_number, title)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_storyboards_episode_number
             DO UPDATE SET episode_id = EXCLUDED.episode_id
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Storyboard>(&query)
            .bind(episode_id)
            .bind(DEFAULT_BOARD_NUMBER)
            .bind(DEFAULT_BOARD_TITLE)
            .fetch_one(pool)
            .await
    }

    /// Find a storyboard by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Storyboard>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM storyboards WHERE id = $1");
        sqlx::query_as::<_, Storyboard>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all storyboards for an episode, ordered by board number ascending.
    pub async fn list_by_episode(
        pool: &PgPool,
        episode_id: DbId,
    ) -> Result<Vec<Storyboard>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM storyboards WHERE episode_id = $1 ORDER BY board_number ASC"
        );
        sqlx::query_as::<_, Storyboard>(&query)
            .bind(episode_id)
            .fetch_all(pool)
            .await
    }

    /// Update a storyboard. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStoryboard,
    ) -> Result<Option<Storyboard>, sqlx::Error> {
        let query = format!(
            "UPDATE storyboards SET
                board_number = COALESCE($2, board_number),
                title = COALESCE($3, title),
                description = COALESCE($4, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Storyboard>(&query)
            .bind(id)
            .bind(input.board_number)
            .bind(&input.title)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a storyboard by ID. Returns `true` if a row was removed.
    ///
    /// The `shots.storyboard_id` FK is RESTRICT, so deleting a board that
    /// still owns shots fails at the database even if the handler-level
    /// occupancy check raced.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM storyboards WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
