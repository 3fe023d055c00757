use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// A precondition for the requested generation kind was not met.
    /// Never mutates unit state; the caller supplies the field and retries.
    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// An external generation provider failed or returned an unusable
    /// result. The diagnostic string is surfaced verbatim.
    #[error("Provider failure: {0}")]
    Provider(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
