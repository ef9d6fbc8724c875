//! Parsed class schedules.
//!
//! These are plain values: the API layer validates them once (see
//! [`crate::api`]) and nothing mutates them afterwards.

use std::fmt;

use chrono::{NaiveDate, NaiveTime, Weekday};

/// A weekly recurring time window, e.g. Tuesdays 10:10 to 11:25.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlot {
    pub day_of_week: Weekday,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// One contiguous block of a class's schedule, tied to one room and teacher.
///
/// `begin_date` and `end_date` are both inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingDetail {
    pub location: String,
    pub teacher: String,
    pub begin_date: NaiveDate,
    pub end_date: NaiveDate,
    pub time_slots: Vec<TimeSlot>,
}

/// A class as listed on Vergil.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRecord {
    /// Official course title
    pub name: String,
    /// Short course code (e.g. "COMS4118"), used in event titles and UIDs
    pub short_course_id: String,
    pub meeting_details: Vec<MeetingDetail>,
}

impl TimeSlot {
    pub fn new(day_of_week: Weekday, start: NaiveTime, end: NaiveTime) -> Self {
        TimeSlot {
            day_of_week,
            start,
            end,
        }
    }
}

impl ClassRecord {
    /// Event title, `"<short_course_id> - <name>"`.
    pub fn title(&self) -> String {
        format!("{} - {}", self.short_course_id, self.name)
    }

    /// Total number of weekly time slots across all meeting details.
    pub fn slot_count(&self) -> usize {
        self.meeting_details
            .iter()
            .map(|detail| detail.time_slots.len())
            .sum()
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} - {}",
            self.day_of_week,
            self.start.format("%I:%M %p"),
            self.end.format("%I:%M %p")
        )
    }
}

impl fmt::Display for MeetingDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let schedule = self
            .time_slots
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");

        writeln!(f, "Location: {}", self.location)?;
        writeln!(f, "Teacher: {}", self.teacher)?;
        writeln!(
            f,
            "Dates: {} to {}",
            self.begin_date.format("%B %d, %Y"),
            self.end_date.format("%B %d, %Y")
        )?;
        write!(f, "Schedule: {}", schedule)
    }
}

impl fmt::Display for ClassRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VergilClass: {} {}", self.short_course_id, self.name)?;
        for detail in &self.meeting_details {
            write!(f, "\n{}", detail)?;
        }
        Ok(())
    }
}
