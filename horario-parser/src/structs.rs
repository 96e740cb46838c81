use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde::Deserialize;

#[cfg(feature = "serialize")]
use serde::Serialize;

pub const NO_TITLE: &str = "No Title";
pub const NO_DESCRIPTION: &str = "No description";
pub const NO_PROFESSOR: &str = "No professor";

/// One element of the `eventos_calendario` array, exactly as the page ships it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawScheduleRecord {
    pub title: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    #[serde(rename = "extendedProps")]
    pub extended_props: Option<RawExtendedProps>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawExtendedProps {
    pub descripcion: Option<String>,
    pub profesor: Option<String>,
    pub obs: Option<Flag>,
    pub examen: Option<Flag>,
}

/// Loosely typed value of the `obs` and `examen` fields.
///
/// The page uses either a boolean or a free-form string for these.
/// Anything else is kept as raw JSON so a single odd record does not
/// sink the whole calendar.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
#[serde(untagged)]
pub enum Flag {
    Bool(bool),
    Text(String),
    Other(serde_json::Value),
}

impl Default for Flag {
    fn default() -> Self {
        Flag::Bool(false)
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flag::Bool(value) => write!(f, "{value}"),
            Flag::Text(text) => f.write_str(text),
            Flag::Other(value) => write!(f, "{value}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
pub struct ScheduleEvent {
    pub title: String,
    pub start: Option<String>,
    pub end: Option<String>,
    pub description: String,
    pub professor: String,
    pub observations: Flag,
    pub exam: Flag,
}

impl From<RawScheduleRecord> for ScheduleEvent {
    fn from(record: RawScheduleRecord) -> Self {
        let props = record.extended_props.unwrap_or_default();

        ScheduleEvent {
            title: record.title.unwrap_or_else(|| NO_TITLE.to_string()),
            start: record.start,
            end: record.end,
            description: props
                .descripcion
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            professor: props.profesor.unwrap_or_else(|| NO_PROFESSOR.to_string()),
            observations: props.obs.unwrap_or_default(),
            exam: props.examen.unwrap_or_default(),
        }
    }
}

/// A parsed event bound.
///
/// Sources carrying an offset (or a trailing `Z`) are absolute instants,
/// everything else is wall-clock time at the institution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
#[cfg_attr(feature = "serialize", serde(untagged))]
pub enum EventTime {
    Absolute(DateTime<FixedOffset>),
    Local(NaiveDateTime),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
pub struct CalendarEvent {
    pub name: String,
    #[cfg_attr(feature = "serialize", serde(skip_serializing_if = "Option::is_none"))]
    pub begin: Option<EventTime>,
    #[cfg_attr(feature = "serialize", serde(skip_serializing_if = "Option::is_none"))]
    pub end: Option<EventTime>,
    pub location: String,
    pub description: String,
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
pub struct Calendar {
    pub name: String,
    pub created: DateTime<Utc>,
    pub events: Vec<CalendarEvent>,
}
