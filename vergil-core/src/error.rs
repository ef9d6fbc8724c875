//! Error types for vergil2ics.

use thiserror::Error;

/// Errors that can occur while fetching and converting class schedules.
///
/// Expanding and assembling events never fails; these cover everything
/// upstream of that (lookup, transport, payload decoding).
#[derive(Error, Debug)]
pub enum VergilError {
    #[error("No class data found for {0}.\nCheck your class ID or semester code!")]
    ClassNotFound(String),

    #[error("Found {count} class data for {class_id}.\nPlease contact the developer to add more filter!")]
    MultipleClasses { class_id: String, count: usize },

    #[error("Network or API error: {0}")]
    Transport(String),

    #[error("Invalid API payload: {0}")]
    InvalidPayload(String),
}

/// Result type alias for vergil2ics operations.
pub type VergilResult<T> = Result<T, VergilError>;
