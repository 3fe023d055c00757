//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod character_repo;
pub mod episode_repo;
pub mod project_repo;
pub mod scene_repo;
pub mod shot_repo;
pub mod storyboard_repo;

pub use character_repo::CharacterRepo;
pub use episode_repo::EpisodeRepo;
pub use project_repo::ProjectRepo;
pub use scene_repo::SceneRepo;
pub use shot_repo::ShotRepo;
pub use storyboard_repo::StoryboardRepo;
