//! Project entity model and DTOs.

use playlet_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::status::StatusId;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub cover_image_path: Option<String>,
    pub total_episodes: i32,
    pub default_voice_id: Option<String>,
    pub status_id: StatusId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub description: Option<String>,
    pub cover_image_path: Option<String>,
    /// Defaults to 10 if omitted.
    pub total_episodes: Option<i32>,
    pub default_voice_id: Option<String>,
    /// Defaults to 1 (Draft) if omitted.
    pub status_id: Option<StatusId>,
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<String>,
    pub cover_image_path: Option<String>,
    pub total_episodes: Option<i32>,
    pub default_voice_id: Option<String>,
    pub status_id: Option<StatusId>,
}
