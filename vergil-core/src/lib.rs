//! Core types for vergil2ics.
//!
//! This crate has no I/O. It provides:
//! - `model` for parsed class schedules
//! - `recurrence` for expanding weekly time slots into concrete events
//! - `calendar` and `ics` for assembling and serializing the result
//! - `api` for turning Vergil API responses into schedule records

pub mod api;
pub mod calendar;
pub mod error;
pub mod event;
pub mod ics;
pub mod model;
pub mod recurrence;

pub use calendar::Calendar;
pub use error::{VergilError, VergilResult};
pub use event::CalendarEvent;
pub use model::{ClassRecord, MeetingDetail, TimeSlot};

/// Timezone of the Morningside campus, used when none is configured.
pub const DEFAULT_TIMEZONE: chrono_tz::Tz = chrono_tz::America::New_York;
