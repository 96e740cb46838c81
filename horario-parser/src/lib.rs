mod builder;
mod parser;
mod structs;

#[cfg(feature = "ics")]
mod ics;

pub use builder::{
    describe, extract_location, parse_timestamp, TimestampError, LOCATION_MARKER, NO_LOCATION,
};
pub use parser::{extract_records, map_schedule_events, parse_schedule, ExtractError};
pub use structs::{
    Calendar, CalendarEvent, EventTime, Flag, RawExtendedProps, RawScheduleRecord, ScheduleEvent,
    NO_DESCRIPTION, NO_PROFESSOR, NO_TITLE,
};

#[cfg(feature = "ics")]
pub use crate::ics::TIMEZONE;
