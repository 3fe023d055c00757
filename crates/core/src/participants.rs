//! Participant list validation for shots.
//!
//! A shot may reference zero-to-many cast members. The API accepts the
//! list as a JSON array; this module checks it is an array of positive
//! integer IDs before it is stored as JSONB.

use crate::error::CoreError;
use crate::types::DbId;

/// Parse an optional JSON value into a participant ID list.
///
/// `None` (field absent) passes through unchanged. A present value must
/// be an array of positive integers; anything else is a validation error.
pub fn parse_participant_ids(
    value: Option<&serde_json::Value>,
) -> Result<Option<Vec<DbId>>, CoreError> {
    let Some(value) = value else {
        return Ok(None);
    };

    let items = value.as_array().ok_or_else(|| {
        CoreError::Validation("character_ids must be an array of numbers".to_string())
    })?;

    let mut parsed = Vec::with_capacity(items.len());
    for item in items {
        match item.as_i64() {
            Some(id) if id > 0 => parsed.push(id),
            _ => {
                return Err(CoreError::Validation(
                    "character_ids must be an array of positive integers".to_string(),
                ))
            }
        }
    }
    Ok(Some(parsed))
}
