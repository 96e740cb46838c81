use horario_parser::{parse_schedule, Calendar, EventTime, ExtractError};

const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Horario</title>
  <script type="text/javascript" src="/LoyolaHorario/fullcalendar.js"></script>
</head>
<body>
  <div id="calendar"></div>
  <script type="text/javascript">
    function renderHorarioJs() {
      var calendarEl = document.getElementById('calendar');
      var eventos_calendario = [{"title":"Algebra - Aula: C12","start":"2025-10-01T08:00:00Z","end":"2025-10-01T09:30:00Z","extendedProps":{"descripcion":"Unit 1","profesor":"Dr. X","obs":false,"examen":false}}];
      new FullCalendar.Calendar(calendarEl, { events: eventos_calendario }).render();
    }
  </script>
</body>
</html>
"#;

#[test]
fn page_becomes_single_event_calendar() {
    let events = parse_schedule(PAGE).unwrap();
    let calendar = Calendar::from_schedule("Horario 2025/26 - Curso 1", &events);

    assert_eq!(calendar.events.len(), 1);

    let event = &calendar.events[0];
    assert_eq!(event.name, "Algebra - Aula: C12");
    assert_eq!(event.location, "C12");
    assert_eq!(
        event.begin,
        Some(EventTime::Absolute(
            "2025-10-01T08:00:00+00:00".parse().unwrap()
        ))
    );
    assert_eq!(
        event.end,
        Some(EventTime::Absolute(
            "2025-10-01T09:30:00+00:00".parse().unwrap()
        ))
    );

    let ics = calendar.to_ics().to_string().replace("\r\n ", "");

    assert_eq!(ics.matches("BEGIN:VEVENT").count(), 1);
    assert!(ics.contains("SUMMARY:Algebra - Aula: C12\r\n"));
    assert!(ics.contains("LOCATION:C12\r\n"));
    assert!(ics.contains("DTSTART:20251001T080000Z\r\n"));
    assert!(ics.contains("DTEND:20251001T093000Z\r\n"));
    assert!(ics.contains("Description: Unit 1"));
    assert!(ics.contains("Professor: Dr. X"));
    assert!(ics.contains("Observations: false"));
    assert!(ics.contains("Exam: false"));
}

#[test]
fn page_without_schedule_script_is_rejected() {
    let html = PAGE.replace("function renderHorarioJs", "function renderOtherJs");

    assert!(matches!(parse_schedule(html), Err(ExtractError::NotFound)));
}
