//! Storyboard entity model and DTOs.
//!
//! A storyboard is an ordered group of shots within an episode. Board
//! number 0 is reserved for the auto-created default board that receives
//! shots created without an explicit storyboard.

use playlet_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Board number of the auto-created default storyboard.
pub const DEFAULT_BOARD_NUMBER: i32 = 0;

/// Title given to the auto-created default storyboard.
pub const DEFAULT_BOARD_TITLE: &str = "Default";

/// A storyboard row from the `storyboards` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Storyboard {
    pub id: DbId,
    pub episode_id: DbId,
    pub board_number: i32,
    pub title: Option<String>,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new storyboard.
///
/// `board_number` is unique within the episode
/// (`uq_storyboards_episode_number`); a duplicate is rejected with 409.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStoryboard {
    pub board_number: i32,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// DTO for updating an existing storyboard. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStoryboard {
    pub board_number: Option<i32>,
    pub title: Option<String>,
    pub description: Option<String>,
}
