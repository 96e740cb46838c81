use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use horario_parser::{parse_schedule, Calendar, ExtractError};
use log::{error, info};
use tokio::fs;

use crate::cli::Args;
use crate::fetch::Fetcher;
use crate::horario::AcademicYear;

/// Converts course levels `1..=args.courses` one after another.
///
/// Without `keep_going` the first failure aborts the run; calendars
/// written by earlier iterations stay on disk.
pub async fn run(args: &Args) -> Result<()> {
    let fetcher = Fetcher::new(args.timeout).context("failed to build HTTP client")?;
    let year = args.year.unwrap_or_else(AcademicYear::current);

    let mut failed = Vec::new();

    for course in 1..=args.courses {
        info!("Processing course {course}");

        match process_course(args, &fetcher, year, course).await {
            Ok(()) => {}
            Err(err) if args.keep_going => {
                error!("Skipping course {course}: {err:#}");
                failed.push(course);
            }
            Err(err) => return Err(err),
        }
    }

    if !failed.is_empty() {
        bail!(
            "{} of {} courses failed: {failed:?}",
            failed.len(),
            args.courses
        );
    }

    info!("All calendars generated successfully.");
    Ok(())
}

async fn process_course(
    args: &Args,
    fetcher: &Fetcher,
    year: AcademicYear,
    course: u32,
) -> Result<()> {
    let url = args.source.url(year, course);

    let html = fetcher
        .fetch_page(url)
        .await
        .with_context(|| format!("failed to fetch schedule for course {course}"))?;

    let calendar = convert_page(&html, year, course)
        .with_context(|| format!("failed to read schedule for course {course}"))?;

    write_calendar(&calendar, &args.output_dir, course, args.json).await?;
    Ok(())
}

pub fn convert_page(html: &str, year: AcademicYear, course: u32) -> Result<Calendar, ExtractError> {
    let events = parse_schedule(html)?;
    Ok(Calendar::from_schedule(
        format!("Horario {year} - Curso {course}"),
        &events,
    ))
}

/// `calendario.ics` for the first course, `calendario{n}.ics` for the rest.
pub fn output_file_name(course: u32, extension: &str) -> String {
    if course > 1 {
        format!("calendario{course}.{extension}")
    } else {
        format!("calendario.{extension}")
    }
}

pub async fn write_calendar(
    calendar: &Calendar,
    dir: &Path,
    course: u32,
    json: bool,
) -> Result<PathBuf> {
    let path = dir.join(output_file_name(course, "ics"));

    fs::write(&path, calendar.to_ics().to_string())
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;

    info!("ICS file successfully written to {}", path.display());

    if json {
        let json_path = dir.join(output_file_name(course, "json"));
        let contents = serde_json::to_string_pretty(calendar)?;

        fs::write(&json_path, contents)
            .await
            .with_context(|| format!("failed to write {}", json_path.display()))?;

        info!("JSON file successfully written to {}", json_path.display());
    }

    Ok(path)
}
