use anyhow::{Context, Result};
use std::path::Path;

use vergil_core::Calendar;

use crate::client::Client;
use crate::config::Config;

pub async fn run(config: &Config) -> Result<()> {
    let tz = config.timezone()?;
    let class_ids = config.class_ids()?;
    let client = Client::from_config(config)?;

    let classes = client.fetch_classes(class_ids).await?;

    let mut calendar = Calendar::build(&classes, tz);
    if let Some(name) = &config.calendar_name {
        calendar = calendar.with_name(name);
    }

    let output = config.output_path();
    write_calendar(&calendar, &output)?;

    tracing::info!(events = calendar.len(), path = %output.display(), "wrote calendar");
    println!(
        "[+] ics generated → {} ({} events from {} classes)",
        output.display(),
        calendar.len(),
        classes.len()
    );

    Ok(())
}

/// Write the calendar to `path`, creating parent directories as needed
pub fn write_calendar(calendar: &Calendar, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory at {}", parent.display()))?;
    }

    std::fs::write(path, calendar.to_ics())
        .with_context(|| format!("Failed to write calendar to {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime, Weekday};
    use tempfile::TempDir;
    use vergil_core::{ClassRecord, MeetingDetail, TimeSlot};

    fn make_calendar() -> Calendar {
        let class = ClassRecord {
            name: "Heterogeneous Computing".to_string(),
            short_course_id: "EECS4750".to_string(),
            meeting_details: vec![MeetingDetail {
                location: "627 Seeley W. Mudd Building".to_string(),
                teacher: "Zoran Kostic".to_string(),
                begin_date: NaiveDate::from_ymd_opt(2025, 9, 2).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2025, 9, 30).unwrap(),
                time_slots: vec![TimeSlot::new(
                    Weekday::Fri,
                    NaiveTime::from_hms_opt(10, 10, 0).unwrap(),
                    NaiveTime::from_hms_opt(12, 40, 0).unwrap(),
                )],
            }],
        };

        Calendar::build(&[class], vergil_core::DEFAULT_TIMEZONE)
    }

    #[test]
    fn test_write_calendar_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("output").join("vergil.ics");

        write_calendar(&make_calendar(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("BEGIN:VCALENDAR"));
        // Fridays between 09-02 and 09-30: 5, 12, 19, 26
        assert_eq!(content.matches("BEGIN:VEVENT").count(), 4);
    }

    #[test]
    fn test_write_calendar_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vergil.ics");
        std::fs::write(&path, "stale").unwrap();

        write_calendar(&make_calendar(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("stale"));
    }
}
