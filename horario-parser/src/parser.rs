use log::error;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use thiserror::Error;

use crate::{RawScheduleRecord, ScheduleEvent};

macro_rules! selector {
    ($query:expr) => {{
        static SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse($query).unwrap());
        &SELECTOR
    }};
}

const RENDER_FUNCTION_MARKER: &str = "function renderHorarioJs";

static EVENTS_ASSIGNMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"var eventos_calendario\s*=\s*(\[[\s\S]*?\]);").unwrap());

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("could not find eventos_calendario in page")]
    NotFound,
    #[error("invalid JSON format in eventos_calendario: {0}")]
    MalformedJson(#[from] serde_json::Error),
}

/// Pulls the `eventos_calendario` array out of the schedule page.
///
/// Only scripts defining `renderHorarioJs` are searched, and the first one
/// holding the assignment wins.
pub fn extract_records<S: AsRef<str>>(html: S) -> Result<Vec<RawScheduleRecord>, ExtractError> {
    let literal = find_events_literal(html.as_ref()).ok_or(ExtractError::NotFound)?;

    serde_json::from_str(&literal).map_err(|err| {
        error!("Invalid JSON format in eventos_calendario: {err}");
        ExtractError::MalformedJson(err)
    })
}

fn find_events_literal(html: &str) -> Option<String> {
    let html = Html::parse_document(html);

    html.select(selector!("script"))
        .map(|script| script.text().collect::<String>())
        .filter(|content| content.contains(RENDER_FUNCTION_MARKER))
        .find_map(|content| {
            EVENTS_ASSIGNMENT
                .captures(&content)
                .map(|captures| captures[1].to_string())
        })
}

pub fn map_schedule_events(records: Vec<RawScheduleRecord>) -> Vec<ScheduleEvent> {
    records.into_iter().map(ScheduleEvent::from).collect()
}

pub fn parse_schedule<S: AsRef<str>>(html: S) -> Result<Vec<ScheduleEvent>, ExtractError> {
    extract_records(html).map(map_schedule_events)
}
