//! Vergil class search API payloads.
//!
//! The search endpoint returns a JSON:API style document. Only the fields
//! needed to build a [`ClassRecord`] are modeled; everything else is ignored.

use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::Deserialize;

use crate::error::{VergilError, VergilResult};
use crate::model::{ClassRecord, MeetingDetail, TimeSlot};

/// Default class search endpoint.
pub const SEARCH_URL: &str = "https://sas-class.api.columbia.edu/search/classes/";

/// Query parameter holding the class identifier (e.g. "COMS4118W001").
pub const CLASS_ID_PARAM: &str = "class_identifier";

/// Query parameter holding the term calendar code (e.g. "20253" for Fall 2025).
pub const TERM_PARAM: &str = "course_term.term_calendar.term_calendar_code";

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Option<Vec<ClassData>>,
}

#[derive(Debug, Deserialize)]
pub struct ClassData {
    pub attributes: ClassAttributes,
}

#[derive(Debug, Deserialize)]
pub struct ClassAttributes {
    pub course_term: CourseTerm,
    #[serde(default)]
    pub meeting_details: Vec<MeetingDetailData>,
}

#[derive(Debug, Deserialize)]
pub struct CourseTerm {
    pub course_official_title: String,
    pub course_identifier2: String,
}

#[derive(Debug, Deserialize)]
pub struct MeetingDetailData {
    pub class_instructor: Instructor,
    pub meeting_pattern: MeetingPattern,
    pub room: Room,
    pub begin_date: String,
    pub end_date: String,
}

#[derive(Debug, Deserialize)]
pub struct Instructor {
    pub instructor_first_name: String,
    #[serde(default)]
    pub instructor_last_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MeetingPattern {
    #[serde(default)]
    pub meetingpatterndetail_set: Vec<PatternDetail>,
}

#[derive(Debug, Deserialize)]
pub struct PatternDetail {
    pub week_day: String,
    pub from_time: String,
    pub to_time: String,
}

#[derive(Debug, Deserialize)]
pub struct Room {
    pub room_name: String,
}

/// Decode a raw response body and pick out the single class it must contain.
pub fn parse_response(class_id: &str, body: &str) -> VergilResult<ClassRecord> {
    let response: SearchResponse = serde_json::from_str(body)
        .map_err(|e| VergilError::InvalidPayload(format!("{}: {}", class_id, e)))?;

    select_single(class_id, response)
}

/// Exactly one class must match an identifier within a term.
pub fn select_single(class_id: &str, response: SearchResponse) -> VergilResult<ClassRecord> {
    let mut data = response.data.unwrap_or_default();

    match data.len() {
        0 => Err(VergilError::ClassNotFound(class_id.to_string())),
        1 => data.remove(0).try_into(),
        count => Err(VergilError::MultipleClasses {
            class_id: class_id.to_string(),
            count,
        }),
    }
}

impl TryFrom<ClassData> for ClassRecord {
    type Error = VergilError;

    fn try_from(data: ClassData) -> VergilResult<Self> {
        let attributes = data.attributes;
        let meeting_details = attributes
            .meeting_details
            .into_iter()
            .map(MeetingDetail::try_from)
            .collect::<VergilResult<Vec<_>>>()?;

        Ok(ClassRecord {
            name: attributes.course_term.course_official_title,
            short_course_id: attributes.course_term.course_identifier2,
            meeting_details,
        })
    }
}

impl TryFrom<MeetingDetailData> for MeetingDetail {
    type Error = VergilError;

    fn try_from(data: MeetingDetailData) -> VergilResult<Self> {
        let begin_date = parse_date(&data.begin_date)?;
        let end_date = parse_date(&data.end_date)?;
        if begin_date > end_date {
            return Err(VergilError::InvalidPayload(format!(
                "meeting begins {} after it ends {}",
                begin_date, end_date
            )));
        }

        let time_slots = data
            .meeting_pattern
            .meetingpatterndetail_set
            .iter()
            .map(TimeSlot::try_from)
            .collect::<VergilResult<Vec<_>>>()?;

        Ok(MeetingDetail {
            location: data.room.room_name,
            teacher: data.class_instructor.full_name(),
            begin_date,
            end_date,
            time_slots,
        })
    }
}

impl TryFrom<&PatternDetail> for TimeSlot {
    type Error = VergilError;

    fn try_from(pattern: &PatternDetail) -> VergilResult<Self> {
        let day_of_week = parse_week_day(&pattern.week_day)?;
        let start = parse_time(&pattern.from_time)?;
        let end = parse_time(&pattern.to_time)?;
        if start >= end {
            return Err(VergilError::InvalidPayload(format!(
                "time slot starts at {} but ends at {}",
                start, end
            )));
        }

        Ok(TimeSlot::new(day_of_week, start, end))
    }
}

impl Instructor {
    /// First name, followed by the last name when Vergil has one.
    pub fn full_name(&self) -> String {
        match self.instructor_last_name.as_deref() {
            Some(last) if !last.is_empty() => format!("{} {}", self.instructor_first_name, last),
            _ => self.instructor_first_name.clone(),
        }
    }
}

/// Two-letter weekday codes used by meeting patterns.
pub fn parse_week_day(code: &str) -> VergilResult<Weekday> {
    match code {
        "Mo" => Ok(Weekday::Mon),
        "Tu" => Ok(Weekday::Tue),
        "We" => Ok(Weekday::Wed),
        "Th" => Ok(Weekday::Thu),
        "Fr" => Ok(Weekday::Fri),
        "Sa" => Ok(Weekday::Sat),
        "Su" => Ok(Weekday::Sun),
        other => Err(VergilError::InvalidPayload(format!(
            "unknown week day '{}'",
            other
        ))),
    }
}

fn parse_date(s: &str) -> VergilResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| VergilError::InvalidPayload(format!("invalid date '{}'", s)))
}

/// Accepts `HH:MM:SS` and `HH:MM`
fn parse_time(s: &str) -> VergilResult<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map_err(|_| VergilError::InvalidPayload(format!("invalid time '{}'", s)))
}
