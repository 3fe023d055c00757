//! Character entity model and DTOs.

use playlet_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A cast member row from the `characters` table.
///
/// `traits` is free-form JSONB (age, personality, appearance, background).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Character {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub avatar_path: Option<String>,
    pub traits: Option<serde_json::Value>,
    pub voice_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new character.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCharacter {
    pub name: String,
    pub description: Option<String>,
    pub avatar_path: Option<String>,
    pub traits: Option<serde_json::Value>,
    pub voice_id: Option<String>,
}

/// DTO for updating an existing character. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCharacter {
    pub name: Option<String>,
    pub description: Option<String>,
    pub avatar_path: Option<String>,
    pub traits: Option<serde_json::Value>,
    pub voice_id: Option<String>,
}
