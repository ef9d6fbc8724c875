//! Concrete calendar occurrences produced by the recurrence expansion.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// One class session on one date.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    /// `<uuid-v5>@vergil2ics.local`, stable across runs
    pub uid: String,
    /// Generation time (DTSTAMP), the only field that differs between runs
    pub dtstamp: DateTime<Utc>,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub summary: String,
    pub location: String,
    pub description: String,
}
