//! ICS file generation.

use chrono::{DateTime, TimeZone, Utc};
use icalendar::{Component, EventLike};

use crate::calendar::Calendar;
use crate::event::CalendarEvent;

const PRODID: &str = "-//vergil2ics//EN";

/// Generate .ics content for every event in the calendar
pub fn generate_ics(calendar: &Calendar) -> String {
    let mut cal = icalendar::Calendar::new();

    if let Some(name) = calendar.name() {
        cal.name(name);
    }

    for event in calendar.events() {
        cal.push(to_ics_event(event));
    }

    let cal = cal.done();

    strip_ics_bloat(&cal.to_string())
}

fn to_ics_event(event: &CalendarEvent) -> icalendar::Event {
    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&event.uid);

    let dtstamp = event.dtstamp.format("%Y%m%dT%H%M%SZ").to_string();
    ics_event.add_property("DTSTAMP", &dtstamp);

    add_utc_property(&mut ics_event, "DTSTART", &event.start);
    add_utc_property(&mut ics_event, "DTEND", &event.end);

    ics_event.summary(&event.summary);
    ics_event.location(&event.location);
    ics_event.description(&event.description);

    ics_event.done()
}

/// Add a datetime as UTC with a Z suffix
///
/// UTC needs no VTIMEZONE, so the file stays valid for strict clients while
/// the instant still carries the campus offset.
fn add_utc_property<T: TimeZone>(ics_event: &mut icalendar::Event, name: &str, time: &DateTime<T>) {
    let utc = time.with_timezone(&Utc);
    ics_event.add_property(name, utc.format("%Y%m%dT%H%M%SZ").to_string());
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with our own
/// - Remove CALSCALE:GREGORIAN (it's the default)
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(PRODID);
            result.push_str("\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}
