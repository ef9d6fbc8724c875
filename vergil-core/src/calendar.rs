//! Calendar assembly.

use chrono_tz::Tz;

use crate::event::CalendarEvent;
use crate::ics::generate_ics;
use crate::model::ClassRecord;
use crate::recurrence::materialize;

/// The full set of generated events, ready to be serialized.
///
/// Events keep the order they were generated in: classes in input order,
/// then meeting details, then time slots, then dates. Nothing is deduplicated,
/// so the same class listed twice yields every event twice with equal UIDs.
#[derive(Debug, Clone, Default)]
pub struct Calendar {
    name: Option<String>,
    events: Vec<CalendarEvent>,
}

impl Calendar {
    /// Expand every time slot of every class into events.
    pub fn build(classes: &[ClassRecord], tz: Tz) -> Self {
        let mut events = Vec::new();

        for class in classes {
            let before = events.len();
            for detail in &class.meeting_details {
                for slot in &detail.time_slots {
                    events.extend(materialize(class, detail, slot, tz));
                }
            }
            tracing::debug!(
                course = %class.short_course_id,
                count = events.len() - before,
                "materialized class"
            );
        }

        Calendar { name: None, events }
    }

    /// Set the display name (X-WR-CALNAME) used by calendar clients.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Serialize to iCalendar text.
    pub fn to_ics(&self) -> String {
        generate_ics(self)
    }
}
