//! Integration tests for the shot generation lifecycle.
//!
//! Exercises the claim/settle repository methods against a real database:
//! - At most one in-flight attempt per shot (compare-and-set claim)
//! - Exactly one artifact column written per successful attempt
//! - Failure writes no artifact
//! - Terminal states are re-claimable (retry, regenerate)
//! - Authoring updates cannot revert generation outcomes

use assert_matches::assert_matches;
use sqlx::PgPool;

use playlet_core::generation::GenerationKind;
use playlet_db::models::episode::CreateEpisode;
use playlet_db::models::project::CreateProject;
use playlet_db::models::shot::{CreateShot, Shot, UpdateShot};
use playlet_db::models::status::ShotStatus;
use playlet_db::repositories::{EpisodeRepo, ProjectRepo, ShotRepo, StoryboardRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Create a project -> episode -> default board -> shot chain and return
/// the shot.
async fn seed_shot(pool: &PgPool) -> Shot {
    let project = ProjectRepo::create(
        pool,
        &CreateProject {
            name: "Lifecycle".to_string(),
            description: None,
            cover_image_path: None,
            total_episodes: None,
            default_voice_id: None,
            status_id: None,
        },
    )
    .await
    .unwrap();

    let episode = EpisodeRepo::create(
        pool,
        project.id,
        &CreateEpisode {
            episode_number: 1,
            title: None,
            synopsis: None,
            status_id: None,
        },
    )
    .await
    .unwrap();

    let board = StoryboardRepo::find_or_create_default(pool, episode.id)
        .await
        .unwrap();

    ShotRepo::create(
        pool,
        &CreateShot {
            episode_id: episode.id,
            storyboard_id: board.id,
            shot_number: 1,
            shot_type: None,
            camera_movement: None,
            shot_description: Some("Mara turns toward the door".to_string()),
            dialogue_text: None,
            video_prompt: None,
            character_id: None,
            character_ids: None,
            scene_id: None,
            character_image: None,
            scene_image: None,
            duration_secs: None,
        },
    )
    .await
    .unwrap()
}

// ---------------------------------------------------------------------------
// Claim semantics
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_new_shot_starts_not_started(pool: PgPool) {
    let shot = seed_shot(&pool).await;
    assert_eq!(shot.status_id, ShotStatus::NotStarted.id());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_claim_moves_shot_to_generating(pool: PgPool) {
    let shot = seed_shot(&pool).await;

    let claimed = ShotRepo::claim_for_generation(&pool, shot.id)
        .await
        .unwrap()
        .expect("fresh shot must be claimable");
    assert_eq!(claimed.status_id, ShotStatus::Generating.id());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_second_claim_is_rejected_and_changes_nothing(pool: PgPool) {
    let shot = seed_shot(&pool).await;

    ShotRepo::claim_for_generation(&pool, shot.id)
        .await
        .unwrap()
        .unwrap();

    let second = ShotRepo::claim_for_generation(&pool, shot.id).await.unwrap();
    assert_matches!(second, None, "a second in-flight claim must be rejected");

    let current = ShotRepo::find_by_id(&pool, shot.id).await.unwrap().unwrap();
    assert_eq!(current.status_id, ShotStatus::Generating.id());
    assert!(current.tts_audio_path.is_none());
    assert!(current.video_path.is_none());
    assert!(current.lipsync_video_path.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_claim_missing_shot_returns_none(pool: PgPool) {
    let claimed = ShotRepo::claim_for_generation(&pool, 999_999).await.unwrap();
    assert!(claimed.is_none());
}

// ---------------------------------------------------------------------------
// Settle semantics
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_complete_writes_exactly_one_artifact(pool: PgPool) {
    let shot = seed_shot(&pool).await;
    ShotRepo::claim_for_generation(&pool, shot.id)
        .await
        .unwrap()
        .unwrap();

    let settled = ShotRepo::complete_generation(
        &pool,
        shot.id,
        GenerationKind::Speech,
        "/uploads/audio/tts_1.mp3",
    )
    .await
    .unwrap()
    .expect("claimed shot must settle");

    assert_eq!(settled.status_id, ShotStatus::Completed.id());
    assert_eq!(
        settled.tts_audio_path.as_deref(),
        Some("/uploads/audio/tts_1.mp3")
    );
    assert!(settled.video_path.is_none());
    assert!(settled.lipsync_video_path.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_fail_writes_no_artifact(pool: PgPool) {
    let shot = seed_shot(&pool).await;
    ShotRepo::claim_for_generation(&pool, shot.id)
        .await
        .unwrap()
        .unwrap();

    let settled = ShotRepo::fail_generation(&pool, shot.id)
        .await
        .unwrap()
        .expect("claimed shot must settle");

    assert_eq!(settled.status_id, ShotStatus::Failed.id());
    assert!(settled.tts_audio_path.is_none());
    assert!(settled.video_path.is_none());
    assert!(settled.lipsync_video_path.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_settle_without_claim_is_a_noop(pool: PgPool) {
    let shot = seed_shot(&pool).await;

    let completed =
        ShotRepo::complete_generation(&pool, shot.id, GenerationKind::Speech, "/a.mp3")
            .await
            .unwrap();
    assert!(completed.is_none(), "settle must require a live claim");

    let failed = ShotRepo::fail_generation(&pool, shot.id).await.unwrap();
    assert!(failed.is_none());

    let current = ShotRepo::find_by_id(&pool, shot.id).await.unwrap().unwrap();
    assert_eq!(current.status_id, ShotStatus::NotStarted.id());
}

// ---------------------------------------------------------------------------
// Re-claimable terminal states
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_then_retried_round_trip(pool: PgPool) {
    let shot = seed_shot(&pool).await;

    // not_started -> generating -> failed
    ShotRepo::claim_for_generation(&pool, shot.id)
        .await
        .unwrap()
        .unwrap();
    ShotRepo::fail_generation(&pool, shot.id).await.unwrap().unwrap();

    // failed -> generating -> completed
    let reclaimed = ShotRepo::claim_for_generation(&pool, shot.id).await.unwrap();
    assert!(reclaimed.is_some(), "failed shots must be retryable");

    let settled = ShotRepo::complete_generation(
        &pool,
        shot.id,
        GenerationKind::Video,
        "/view?filename=wan_00012.mp4&type=output",
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(settled.status_id, ShotStatus::Completed.id());
    assert_eq!(
        settled.video_path.as_deref(),
        Some("/view?filename=wan_00012.mp4&type=output")
    );
    assert!(settled.tts_audio_path.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_regeneration_replaces_prior_artifact(pool: PgPool) {
    let shot = seed_shot(&pool).await;

    ShotRepo::claim_for_generation(&pool, shot.id)
        .await
        .unwrap()
        .unwrap();
    ShotRepo::complete_generation(&pool, shot.id, GenerationKind::Speech, "/uploads/audio/a.mp3")
        .await
        .unwrap()
        .unwrap();

    // completed -> generating -> completed with a new artifact
    let reclaimed = ShotRepo::claim_for_generation(&pool, shot.id).await.unwrap();
    assert!(reclaimed.is_some(), "completed shots must be regenerable");

    let settled = ShotRepo::complete_generation(
        &pool,
        shot.id,
        GenerationKind::Speech,
        "/uploads/audio/b.mp3",
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(settled.tts_audio_path.as_deref(), Some("/uploads/audio/b.mp3"));
}

// ---------------------------------------------------------------------------
// Authoring edits cannot revert generation outcomes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_authoring_update_preserves_generation_outcome(pool: PgPool) {
    let shot = seed_shot(&pool).await;

    ShotRepo::claim_for_generation(&pool, shot.id)
        .await
        .unwrap()
        .unwrap();
    ShotRepo::complete_generation(&pool, shot.id, GenerationKind::Speech, "/uploads/audio/a.mp3")
        .await
        .unwrap()
        .unwrap();

    let edit = UpdateShot {
        shot_number: None,
        shot_type: Some("close-up".to_string()),
        camera_movement: None,
        shot_description: Some("Tighter framing".to_string()),
        dialogue_text: None,
        video_prompt: None,
        character_id: None,
        character_ids: None,
        scene_id: None,
        character_image: None,
        scene_image: None,
        duration_secs: None,
    };
    let edited = ShotRepo::update(&pool, shot.id, &edit).await.unwrap().unwrap();

    assert_eq!(edited.shot_type.as_deref(), Some("close-up"));
    assert_eq!(edited.status_id, ShotStatus::Completed.id());
    assert_eq!(edited.tts_audio_path.as_deref(), Some("/uploads/audio/a.mp3"));
}
