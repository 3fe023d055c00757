//! Repository for the `episodes` table.

use sqlx::PgPool;

use playlet_core::types::DbId;

use crate::models::episode::{CreateEpisode, Episode, UpdateEpisode};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, project_id, episode_number, title, synopsis, status_id, created_at, updated_at";

/// Provides CRUD operations for episodes.
pub struct EpisodeRepo;

impl EpisodeRepo {
    /// Insert a new episode under a project, returning the created row.
    ///
    /// A duplicate `episode_number` within the project violates
    /// `uq_episodes_project_number` and surfaces as a conflict.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateEpisode,
    ) -> Result<Episode, sqlx::Error> {
        let query = format!(
            "INSERT INTO episodes (project_id, episode_number, title, synopsis, status_id)
             VALUES ($1, $2, $3, $4, COALESCE($5, 1))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Episode>(&query)
            .bind(project_id)
            .bind(input.episode_number)
            .bind(&input.title)
            .bind(&input.synopsis)
            .bind(input.status_id)
            .fetch_one(pool)
            .await
    }

    /// Find an episode by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Episode>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM episodes WHERE id = $1");
        sqlx::query_as::<_, Episode>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all episodes for a project, ordered by episode number ascending.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Episode>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM episodes WHERE project_id = $1 ORDER BY episode_number ASC"
        );
        sqlx::query_as::<_, Episode>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Episode numbers already taken within a project. Used by outline
    /// generation to skip existing episodes rather than conflict on them.
    pub async fn existing_numbers(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<i32>, sqlx::Error> {
        let rows: Vec<(i32,)> =
            sqlx::query_as("SELECT episode_number FROM episodes WHERE project_id = $1")
                .bind(project_id)
                .fetch_all(pool)
                .await?;
        Ok(rows.into_iter().map(|(n,)| n).collect())
    }

    /// Update an episode. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEpisode,
    ) -> Result<Option<Episode>, sqlx::Error> {
        let query = format!(
            "UPDATE episodes SET
                episode_number = COALESCE($2, episode_number),
                title = COALESCE($3, title),
                synopsis = COALESCE($4, synopsis),
                status_id = COALESCE($5, status_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Episode>(&query)
            .bind(id)
            .bind(input.episode_number)
            .bind(&input.title)
            .bind(&input.synopsis)
            .bind(input.status_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete an episode by ID. Child rows cascade. Returns `true` if a
    /// row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM episodes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
