use std::str::FromStr;

use chrono::{FixedOffset, NaiveDate, NaiveTime, Utc};
use log::warn;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use thiserror::Error;

use crate::{Calendar, CalendarEvent, EventTime, ScheduleEvent};

pub const LOCATION_MARKER: &str = "Aula:";
pub const NO_LOCATION: &str = "No Location";

// Extended or basic ISO 8601: date, optional time (hour, minute, second,
// fraction with `.` or `,`), optional `Z` or `+hh[[:]mm]` offset after the time.
static ISO_8601: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(\d{4})-?(\d{2})-?(\d{2})(?:[T ](\d{2})(?::?(\d{2})(?::?(\d{2})(?:[.,](\d{1,9}))?)?)?(Z|[+-]\d{2}(?::?\d{2})?)?)?$",
    )
    .unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimestampError {
    #[error("not an ISO 8601 date or date-time")]
    Format,
    #[error("date, time or offset out of range")]
    OutOfRange,
}

fn number(captures: &Captures, index: usize) -> u32 {
    captures
        .get(index)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

fn parse_offset(offset: &str) -> Result<FixedOffset, TimestampError> {
    if offset == "Z" {
        return FixedOffset::east_opt(0).ok_or(TimestampError::OutOfRange);
    }

    let (sign, digits) = offset.split_at(1);
    let hours: i32 = digits[..2].parse().map_err(|_| TimestampError::Format)?;
    let minutes: i32 = match digits[2..].trim_start_matches(':') {
        "" => 0,
        minutes => minutes.parse().map_err(|_| TimestampError::Format)?,
    };

    let seconds = (hours * 60 + minutes) * 60;
    let seconds = if sign == "-" { -seconds } else { seconds };

    FixedOffset::east_opt(seconds).ok_or(TimestampError::OutOfRange)
}

impl FromStr for EventTime {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = ISO_8601.captures(s).ok_or(TimestampError::Format)?;

        let year: i32 = captures[1].parse().map_err(|_| TimestampError::Format)?;
        let date = NaiveDate::from_ymd_opt(year, number(&captures, 2), number(&captures, 3))
            .ok_or(TimestampError::OutOfRange)?;

        let nanos: u32 = captures
            .get(7)
            .and_then(|fraction| format!("{:0<9}", fraction.as_str()).parse().ok())
            .unwrap_or(0);

        let time = NaiveTime::from_hms_nano_opt(
            number(&captures, 4),
            number(&captures, 5),
            number(&captures, 6),
            nanos,
        )
        .ok_or(TimestampError::OutOfRange)?;

        let local = date.and_time(time);

        match captures.get(8) {
            None => Ok(EventTime::Local(local)),
            Some(offset) => local
                .and_local_timezone(parse_offset(offset.as_str())?)
                .single()
                .map(EventTime::Absolute)
                .ok_or(TimestampError::OutOfRange),
        }
    }
}

/// Absent or empty values are silently unset; malformed ones are logged and unset.
pub fn parse_timestamp(value: Option<&str>) -> Option<EventTime> {
    let value = value.filter(|value| !value.is_empty())?;

    match value.parse() {
        Ok(time) => Some(time),
        Err(err) => {
            warn!("Invalid datetime format: {value} ({err})");
            None
        }
    }
}

pub fn extract_location(title: &str) -> String {
    title
        .rsplit_once(LOCATION_MARKER)
        .map_or_else(|| NO_LOCATION.to_string(), |(_, room)| room.trim().to_string())
}

pub fn describe(event: &ScheduleEvent) -> String {
    format!(
        "Description: {}\nProfessor: {}\nObservations: {}\nExam: {}",
        event.description, event.professor, event.observations, event.exam
    )
}

impl From<&ScheduleEvent> for CalendarEvent {
    fn from(event: &ScheduleEvent) -> Self {
        CalendarEvent {
            name: event.title.clone(),
            begin: parse_timestamp(event.start.as_deref()),
            end: parse_timestamp(event.end.as_deref()),
            location: extract_location(&event.title),
            description: describe(event),
        }
    }
}

impl Calendar {
    pub fn from_schedule<S: Into<String>>(name: S, events: &[ScheduleEvent]) -> Self {
        Calendar {
            name: name.into(),
            created: Utc::now(),
            events: events.iter().map(CalendarEvent::from).collect(),
        }
    }
}
