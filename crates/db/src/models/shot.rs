//! Shot entity model and DTOs.
//!
//! A shot is the smallest unit dispatched to a generation provider. The
//! generation tracker owns `status_id` and the three artifact columns;
//! [`UpdateShot`] deliberately omits them so authoring edits can never
//! clobber the outcome of an in-flight generation attempt. Tracker writes
//! go through the dedicated `ShotRepo` generation methods instead.

use playlet_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::status::StatusId;

/// A shot row from the `shots` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Shot {
    pub id: DbId,
    pub episode_id: DbId,
    pub storyboard_id: DbId,
    /// Ordering key, unique within the storyboard.
    pub shot_number: i32,
    pub shot_type: Option<String>,
    pub camera_movement: Option<String>,
    pub shot_description: Option<String>,
    pub dialogue_text: Option<String>,
    pub video_prompt: Option<String>,
    pub character_id: Option<DbId>,
    /// Zero-to-many participant character IDs as a JSONB array.
    pub character_ids: Option<serde_json::Value>,
    pub scene_id: Option<DbId>,
    pub character_image: Option<String>,
    pub scene_image: Option<String>,
    pub duration_secs: Option<f64>,
    pub status_id: StatusId,
    // -- Artifacts, written only by the generation tracker --
    pub tts_audio_path: Option<String>,
    pub video_path: Option<String>,
    pub lipsync_video_path: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new shot. The episode and storyboard references
/// are resolved by the caller before this reaches the repository.
///
/// `shot_number` is unique within the storyboard
/// (`uq_shots_storyboard_number`); a duplicate is rejected with 409.
#[derive(Debug, Clone)]
pub struct CreateShot {
    pub episode_id: DbId,
    pub storyboard_id: DbId,
    pub shot_number: i32,
    pub shot_type: Option<String>,
    pub camera_movement: Option<String>,
    pub shot_description: Option<String>,
    pub dialogue_text: Option<String>,
    pub video_prompt: Option<String>,
    pub character_id: Option<DbId>,
    pub character_ids: Option<serde_json::Value>,
    pub scene_id: Option<DbId>,
    pub character_image: Option<String>,
    pub scene_image: Option<String>,
    pub duration_secs: Option<f64>,
}

/// DTO for authoring edits to an existing shot. All fields are optional.
///
/// Status and artifact columns are absent on purpose; see the module docs.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateShot {
    pub shot_number: Option<i32>,
    pub shot_type: Option<String>,
    pub camera_movement: Option<String>,
    pub shot_description: Option<String>,
    pub dialogue_text: Option<String>,
    pub video_prompt: Option<String>,
    pub character_id: Option<DbId>,
    pub character_ids: Option<serde_json::Value>,
    pub scene_id: Option<DbId>,
    pub character_image: Option<String>,
    pub scene_image: Option<String>,
    pub duration_secs: Option<f64>,
}
