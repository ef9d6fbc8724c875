//! Weekly expansion of time slots into concrete events.
//!
//! A [`TimeSlot`] inside a [`MeetingDetail`] stands for "every <weekday> between
//! `begin_date` and `end_date`". This module turns that into one
//! [`CalendarEvent`] per date, each with a UID that only depends on the course
//! code and the start time, so regenerating the calendar from unchanged data
//! yields the same UIDs and calendar clients update events instead of
//! duplicating them.

use chrono::{
    DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset,
    TimeZone, Utc, Weekday,
};
use chrono_tz::Tz;
use rrule::RRuleSet;
use uuid::Uuid;

use crate::event::CalendarEvent;
use crate::model::{ClassRecord, MeetingDetail, TimeSlot};

/// Suffix appended to every generated UID.
pub const UID_DOMAIN: &str = "vergil2ics.local";

/// First date on or after `begin` that falls on `day`.
pub fn first_occurrence(begin: NaiveDate, day: Weekday) -> NaiveDate {
    let target = day.num_days_from_monday();
    let current = begin.weekday().num_days_from_monday();
    let days_ahead = (target + 7 - current) % 7;

    begin + Duration::days(i64::from(days_ahead))
}

/// Weekly RRULE from `first` through the end of `end`.
///
/// Only dates matter here, so both bounds are pinned to UTC and the wall-clock
/// times are attached afterwards in [`localize`].
fn build_rrule_string(first: NaiveDate, end: NaiveDate) -> String {
    [
        format!("DTSTART:{}T000000Z", first.format("%Y%m%d")),
        format!(
            "RRULE:FREQ=WEEKLY;INTERVAL=1;UNTIL={}T235959Z",
            end.format("%Y%m%d")
        ),
    ]
    .join("\n")
}

/// Every date in `[begin_date, end_date]` on the slot's weekday, in order.
///
/// Empty when the range does not contain that weekday at all.
pub fn occurrence_dates(detail: &MeetingDetail, slot: &TimeSlot) -> Vec<NaiveDate> {
    let first = first_occurrence(detail.begin_date, slot.day_of_week);
    if first > detail.end_date {
        return Vec::new();
    }

    let rrule_str = build_rrule_string(first, detail.end_date);
    let rrule_set: RRuleSet = match rrule_str.parse() {
        Ok(set) => set,
        Err(e) => {
            tracing::warn!(rule = %rrule_str, error = %e, "failed to parse weekly rule");
            return Vec::new();
        }
    };

    rrule_set
        .all(u16::MAX)
        .dates
        .iter()
        .map(|dt| dt.date_naive())
        .collect()
}

/// Deterministic UID for an occurrence of `short_course_id` starting at `start`.
///
/// UUIDv5 (URL namespace) over the course code followed by the RFC 3339 start
/// time, e.g. `"COMS4118" + "2025-09-02T10:10:00-04:00"`.
pub fn event_uid(short_course_id: &str, start: &DateTime<Tz>) -> String {
    let name = format!("{}{}", short_course_id, start.to_rfc3339());
    let uuid = Uuid::new_v5(&Uuid::NAMESPACE_URL, name.as_bytes());

    format!("{}@{}", uuid, UID_DOMAIN)
}

/// Expand one time slot of one meeting detail into concrete events.
pub fn materialize(
    class: &ClassRecord,
    detail: &MeetingDetail,
    slot: &TimeSlot,
    tz: Tz,
) -> Vec<CalendarEvent> {
    let dtstamp = Utc::now();
    let summary = class.title();
    let description = format!("Teacher: {}", detail.teacher);

    let events: Vec<CalendarEvent> = occurrence_dates(detail, slot)
        .into_iter()
        .map(|date| {
            let start = localize(tz, date, slot.start);
            let end = localize(tz, date, slot.end);

            CalendarEvent {
                uid: event_uid(&class.short_course_id, &start),
                dtstamp,
                start,
                end,
                summary: summary.clone(),
                location: detail.location.clone(),
                description: description.clone(),
            }
        })
        .collect();

    tracing::debug!(
        course = %class.short_course_id,
        day = %slot.day_of_week,
        count = events.len(),
        "expanded time slot"
    );

    events
}

/// Attach `tz` to a wall-clock time.
///
/// Ambiguous times (DST fall-back) resolve to the earlier instant. Times inside
/// a DST gap keep the offset in effect before the gap, which moves them forward
/// by the size of the gap.
fn localize(tz: Tz, date: NaiveDate, time: NaiveTime) -> DateTime<Tz> {
    let naive = NaiveDateTime::new(date, time);

    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            let before_gap = tz.offset_from_utc_datetime(&(naive - Duration::days(1))).fix();
            let utc = naive - Duration::seconds(i64::from(before_gap.local_minus_utc()));
            tz.from_utc_datetime(&utc)
        }
    }
}
