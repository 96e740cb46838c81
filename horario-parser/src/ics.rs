use chrono::Utc;
use ics::{
    escape_text,
    parameters::TzIDParam,
    properties::{Description, DtEnd, DtStart, Location, RRule, Summary, TzName},
    Daylight, Standard, TimeZone,
};

use crate::{Calendar, CalendarEvent, EventTime};

/// Zone used for timestamps the page gives without an offset.
pub const TIMEZONE: &str = "Europe/Madrid";

const UTC_FORMAT: &str = "%Y%m%dT%H%M%SZ";
const LOCAL_FORMAT: &str = "%Y%m%dT%H%M%S";

impl EventTime {
    fn to_ics_value(self) -> String {
        match self {
            EventTime::Absolute(instant) => {
                instant.with_timezone(&Utc).format(UTC_FORMAT).to_string()
            }
            EventTime::Local(local) => local.format(LOCAL_FORMAT).to_string(),
        }
    }

    fn is_local(self) -> bool {
        matches!(self, EventTime::Local(_))
    }
}

// UIDs only ever contain `[A-Za-z0-9-]`, whatever the titles look like.
fn uid_token(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

impl Calendar {
    #[must_use]
    pub fn to_ics(&self) -> ics::ICalendar<'_> {
        let mut cet_standard = Standard::new("19701025T030000", "+0200", "+0100");
        cet_standard.push(TzName::new("CET"));
        cet_standard.push(RRule::new("FREQ=YEARLY;BYMONTH=10;BYDAY=-1SU"));

        let mut cest_daylight = Daylight::new("19700329T020000", "+0100", "+0200");
        cest_daylight.push(TzName::new("CEST"));
        cest_daylight.push(RRule::new("FREQ=YEARLY;BYMONTH=3;BYDAY=-1SU"));

        let mut timezone = TimeZone::daylight(TIMEZONE, cest_daylight);
        timezone.add_standard(cet_standard);

        let mut icalendar = ics::ICalendar::new("2.0", &self.name);
        icalendar.add_timezone(timezone);

        let stamp = self.created.format(UTC_FORMAT).to_string();
        let uid_prefix = uid_token(&self.name);

        for (index, event) in self.events.iter().enumerate() {
            let uid = format!("{uid_prefix}-{index}");
            icalendar.add_event(event.to_ics(uid, stamp.clone()));
        }

        icalendar
    }
}

impl CalendarEvent {
    #[must_use]
    pub fn to_ics(&self, uid: String, stamp: String) -> ics::Event<'_> {
        let mut ics_event = ics::Event::new(uid, stamp);

        if let Some(begin) = self.begin {
            let mut dtstart = DtStart::new(begin.to_ics_value());
            if begin.is_local() {
                dtstart.add(TzIDParam::new(TIMEZONE));
            }
            ics_event.push(dtstart);
        }

        if let Some(end) = self.end {
            let mut dtend = DtEnd::new(end.to_ics_value());
            if end.is_local() {
                dtend.add(TzIDParam::new(TIMEZONE));
            }
            ics_event.push(dtend);
        }

        ics_event.push(Summary::new(escape_text(self.name.as_str())));
        ics_event.push(Location::new(escape_text(self.location.as_str())));
        ics_event.push(Description::new(escape_text(self.description.as_str())));

        ics_event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Flag, ScheduleEvent};

    fn unfold(ics: String) -> String {
        ics.replace("\r\n ", "")
    }

    fn first_event(ics: &str) -> &str {
        let start = ics.find("BEGIN:VEVENT").unwrap();
        let end = ics.find("END:VEVENT").unwrap();
        &ics[start..end]
    }

    fn schedule_event(start: Option<&str>, end: Option<&str>) -> ScheduleEvent {
        ScheduleEvent {
            title: "Algebra, grupo A - Aula: C12".into(),
            start: start.map(str::to_string),
            end: end.map(str::to_string),
            description: "Unit 1".into(),
            professor: "Dr. X".into(),
            observations: Flag::Bool(false),
            exam: Flag::Bool(true),
        }
    }

    #[test]
    fn absolute_times_are_written_in_utc() {
        let events = [schedule_event(
            Some("2025-10-01T10:00:00+02:00"),
            Some("2025-10-01T09:30:00Z"),
        )];
        let ics = unfold(Calendar::from_schedule("Horario", &events).to_ics().to_string());

        assert!(ics.contains("DTSTART:20251001T080000Z\r\n"));
        assert!(ics.contains("DTEND:20251001T093000Z\r\n"));
        assert!(!first_event(&ics).contains("TZID"));
    }

    #[test]
    fn local_times_carry_timezone() {
        let events = [schedule_event(Some("2025-10-01T08:00:00"), None)];
        let ics = unfold(Calendar::from_schedule("Horario", &events).to_ics().to_string());

        assert!(ics.contains("BEGIN:VTIMEZONE\r\n"));
        assert!(ics.contains("TZID:Europe/Madrid\r\n"));
        assert!(first_event(&ics).contains("DTSTART;TZID=Europe/Madrid:20251001T080000\r\n"));
        assert!(!first_event(&ics).contains("DTEND"));
    }

    #[test]
    fn text_values_are_escaped() {
        let events = [schedule_event(None, None)];
        let ics = unfold(Calendar::from_schedule("Horario", &events).to_ics().to_string());

        assert!(ics.contains("SUMMARY:Algebra\\, grupo A - Aula: C12\r\n"));
        assert!(ics.contains("LOCATION:C12\r\n"));
        assert!(ics.contains(
            "DESCRIPTION:Description: Unit 1\\nProfessor: Dr. X\\nObservations: false\\nExam: true\r\n"
        ));
        assert!(!first_event(&ics).contains("DTSTART"));
    }

    #[test]
    fn every_line_is_a_property_for_awkward_titles() {
        let mut event = schedule_event(Some("2025-10-01T08:00:00Z"), None);
        event.title = "Algebra\nGrupo; B, Aula: C12".into();
        let calendar = Calendar::from_schedule("Horario 2025/26 - Curso 1", &[event]);
        let ics = unfold(calendar.to_ics().to_string());

        for line in ics.split("\r\n").filter(|line| !line.is_empty()) {
            assert!(!line.contains('\n'), "bare newline in {line:?}");

            let name_end = line.find([':', ';']).unwrap();
            let name = &line[..name_end];
            assert!(
                !name.is_empty()
                    && name.chars().all(|c| c.is_ascii_uppercase() || c == '-'),
                "malformed property {line:?}"
            );
        }

        assert!(first_event(&ics).contains("UID:Horario-2025-26---Curso-1-0\r\n"));
        assert!(first_event(&ics).contains("SUMMARY:Algebra\\nGrupo\\; B\\, Aula: C12\r\n"));
    }

    #[test]
    fn empty_calendar_is_still_valid() {
        let ics = Calendar::from_schedule("Horario", &[]).to_ics().to_string();

        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(ics.trim_end().ends_with("END:VCALENDAR"));
        assert!(!ics.contains("BEGIN:VEVENT"));
    }
}
