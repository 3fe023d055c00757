//! Repository for the `shots` table.
//!
//! Besides plain CRUD, this repository owns the generation lifecycle
//! writes: claiming a shot for a generation attempt, settling it with
//! the produced artifact, or failing it. Uses `ShotStatus` from
//! `models::status` for all status transitions; no magic numbers.

use sqlx::PgPool;

use playlet_core::generation::GenerationKind;
use playlet_core::types::DbId;

use crate::models::shot::{CreateShot, Shot, UpdateShot};
use crate::models::status::ShotStatus;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, episode_id, storyboard_id, shot_number, shot_type, \
    camera_movement, shot_description, dialogue_text, video_prompt, \
    character_id, character_ids, scene_id, character_image, scene_image, \
    duration_secs, status_id, tts_audio_path, video_path, lipsync_video_path, \
    created_at, updated_at";

/// Artifact column written by a successful attempt of the given kind.
fn artifact_column(kind: GenerationKind) -> &'static str {
    match kind {
        GenerationKind::Speech => "tts_audio_path",
        GenerationKind::Video => "video_path",
        GenerationKind::LipSync => "lipsync_video_path",
    }
}

/// Provides CRUD and generation lifecycle operations for shots.
pub struct ShotRepo;

impl ShotRepo {
    /// Insert a new shot, returning the created row.
    ///
    /// New shots always start at status 1 (NotStarted). A duplicate
    /// `shot_number` within the storyboard violates
    /// `uq_shots_storyboard_number` and surfaces as a conflict.
    pub async fn create(pool: &PgPool, input: &CreateShot) -> Result<Shot, sqlx::Error> {
        let query = format!(
            "INSERT INTO shots
                (episode_id, storyboard_id, shot_number, shot_type, camera_movement,
                 shot_description, dialogue_text, video_prompt, character_id, character_ids,
                 scene_id, character_image, scene_image, duration_secs)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Shot>(&query)
            .bind(input.episode_id)
            .bind(input.storyboard_id)
            .bind(input.shot_number)
            .bind(&input.shot_type)
            .bind(&input.camera_movement)
            .bind(&input.shot_description)
            .bind(&input.dialogue_text)
            .bind(&input.video_prompt)
            .bind(input.character_id)
            .bind(&input.character_ids)
            .bind(input.scene_id)
            .bind(&input.character_image)
            .bind(&input.scene_image)
            .bind(input.duration_secs)
            .fetch_one(pool)
            .await
    }

    /// Find a shot by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Shot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM shots WHERE id = $1");
        sqlx::query_as::<_, Shot>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all shots for an episode, ordered by shot number ascending.
    pub async fn list_by_episode(
        pool: &PgPool,
        episode_id: DbId,
    ) -> Result<Vec<Shot>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM shots WHERE episode_id = $1 ORDER BY shot_number ASC");
        sqlx::query_as::<_, Shot>(&query)
            .bind(episode_id)
            .fetch_all(pool)
            .await
    }

    /// List all shots for a storyboard, ordered by shot number ascending.
    pub async fn list_by_storyboard(
        pool: &PgPool,
        storyboard_id: DbId,
    ) -> Result<Vec<Shot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM shots WHERE storyboard_id = $1 ORDER BY shot_number ASC"
        );
        sqlx::query_as::<_, Shot>(&query)
            .bind(storyboard_id)
            .fetch_all(pool)
            .await
    }

    /// Number of shots owned by a storyboard. Used to reject deleting an
    /// occupied board.
    pub async fn count_for_storyboard(
        pool: &PgPool,
        storyboard_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM shots WHERE storyboard_id = $1")
                .bind(storyboard_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }

    /// Apply an authoring edit. Only non-`None` fields in `input` are
    /// applied; status and artifact columns are out of reach by design.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateShot,
    ) -> Result<Option<Shot>, sqlx::Error> {
        let query = format!(
            "UPDATE shots SET
                shot_number = COALESCE($2, shot_number),
                shot_type = COALESCE($3, shot_type),
                camera_movement = COALESCE($4, camera_movement),
                shot_description = COALESCE($5, shot_description),
                dialogue_text = COALESCE($6, dialogue_text),
                video_prompt = COALESCE($7, video_prompt),
                character_id = COALESCE($8, character_id),
                character_ids = COALESCE($9, character_ids),
                scene_id = COALESCE($10, scene_id),
                character_image = COALESCE($11, character_image),
                scene_image = COALESCE($12, scene_image),
                duration_secs = COALESCE($13, duration_secs)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Shot>(&query)
            .bind(id)
            .bind(input.shot_number)
            .bind(&input.shot_type)
            .bind(&input.camera_movement)
            .bind(&input.shot_description)
            .bind(&input.dialogue_text)
            .bind(&input.video_prompt)
            .bind(input.character_id)
            .bind(&input.character_ids)
            .bind(input.scene_id)
            .bind(&input.character_image)
            .bind(&input.scene_image)
            .bind(input.duration_secs)
            .fetch_optional(pool)
            .await
    }

    /// Delete a shot by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM shots WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -- Generation lifecycle -------------------------------------------------

    /// Atomically claim a shot for a generation attempt.
    ///
    /// Single compare-and-set: the transition to `Generating` only
    /// happens if the shot is not already generating, so a second
    /// concurrent attempt for the same shot gets `None` back and the
    /// in-flight attempt keeps sole ownership of the eventual status
    /// write. `NotStarted`, `Failed`, and `Completed` are all claimable
    /// (first attempt, retry, regenerate).
    ///
    /// Returns `None` when the shot is missing *or* already generating;
    /// the caller distinguishes the two with a follow-up lookup.
    pub async fn claim_for_generation(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Shot>, sqlx::Error> {
        let query = format!(
            "UPDATE shots SET status_id = $2
             WHERE id = $1 AND status_id <> $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Shot>(&query)
            .bind(id)
            .bind(ShotStatus::Generating.id())
            .fetch_optional(pool)
            .await
    }

    /// Settle a claimed shot as completed, writing exactly the artifact
    /// column matching `kind`. The other artifact columns are untouched.
    ///
    /// Guarded on `Generating` so only the claim holder's settle applies.
    pub async fn complete_generation(
        pool: &PgPool,
        id: DbId,
        kind: GenerationKind,
        artifact_path: &str,
    ) -> Result<Option<Shot>, sqlx::Error> {
        let column = artifact_column(kind);
        let query = format!(
            "UPDATE shots SET status_id = $2, {column} = $3
             WHERE id = $1 AND status_id = $4
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Shot>(&query)
            .bind(id)
            .bind(ShotStatus::Completed.id())
            .bind(artifact_path)
            .bind(ShotStatus::Generating.id())
            .fetch_optional(pool)
            .await
    }

    /// Settle a claimed shot as failed. No artifact column is written.
    pub async fn fail_generation(pool: &PgPool, id: DbId) -> Result<Option<Shot>, sqlx::Error> {
        let query = format!(
            "UPDATE shots SET status_id = $2
             WHERE id = $1 AND status_id = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Shot>(&query)
            .bind(id)
            .bind(ShotStatus::Failed.id())
            .bind(ShotStatus::Generating.id())
            .fetch_optional(pool)
            .await
    }
}
