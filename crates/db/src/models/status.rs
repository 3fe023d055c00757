//! Status helper enums mapping to SMALLSERIAL/SMALLINT lookup tables.
//!
//! Each enum variant's discriminant matches the seed data order (1-based)
//! in the corresponding `*_statuses` database table.

/// Status ID type matching SMALLINT/SMALLSERIAL in the database.
pub type StatusId = i16;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Return the database status ID.
            pub fn id(self) -> StatusId {
                self as StatusId
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }
    };
}

define_status_enum! {
    /// Project lifecycle status.
    ProjectStatus {
        Draft = 1,
        Active = 2,
        Completed = 3,
        Archived = 4,
    }
}

define_status_enum! {
    /// Episode authoring status.
    EpisodeStatus {
        Planned = 1,
        Scripted = 2,
        InProduction = 3,
        Completed = 4,
    }
}

define_status_enum! {
    /// Shot generation lifecycle status.
    ///
    /// `Generating` is the only non-settled state: every claim is matched
    /// by a transition to `Completed` or `Failed`. Both terminal states
    /// are re-claimable (retry after failure, regenerate after success).
    ShotStatus {
        NotStarted = 1,
        Generating = 2,
        Completed = 3,
        Failed = 4,
    }
}

/// Human-readable name for a shot status ID, matching the seeded
/// `shot_statuses.name` values. Unknown IDs map to `"unknown"`.
pub fn shot_status_name(id: StatusId) -> &'static str {
    match id {
        1 => "not_started",
        2 => "generating",
        3 => "completed",
        4 => "failed",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_status_ids_match_seed_data() {
        assert_eq!(ProjectStatus::Draft.id(), 1);
        assert_eq!(ProjectStatus::Active.id(), 2);
        assert_eq!(ProjectStatus::Completed.id(), 3);
        assert_eq!(ProjectStatus::Archived.id(), 4);
    }

    #[test]
    fn episode_status_ids_match_seed_data() {
        assert_eq!(EpisodeStatus::Planned.id(), 1);
        assert_eq!(EpisodeStatus::Scripted.id(), 2);
        assert_eq!(EpisodeStatus::InProduction.id(), 3);
        assert_eq!(EpisodeStatus::Completed.id(), 4);
    }

    #[test]
    fn shot_status_ids_match_seed_data() {
        assert_eq!(ShotStatus::NotStarted.id(), 1);
        assert_eq!(ShotStatus::Generating.id(), 2);
        assert_eq!(ShotStatus::Completed.id(), 3);
        assert_eq!(ShotStatus::Failed.id(), 4);
    }

    #[test]
    fn status_into_status_id() {
        let id: StatusId = ShotStatus::Generating.into();
        assert_eq!(id, 2);
    }

    #[test]
    fn shot_status_names_match_seed_data() {
        assert_eq!(shot_status_name(ShotStatus::NotStarted.id()), "not_started");
        assert_eq!(shot_status_name(ShotStatus::Generating.id()), "generating");
        assert_eq!(shot_status_name(ShotStatus::Completed.id()), "completed");
        assert_eq!(shot_status_name(ShotStatus::Failed.id()), "failed");
        assert_eq!(shot_status_name(99), "unknown");
    }
}
