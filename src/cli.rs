use std::path::PathBuf;
use std::process;
use std::time::Duration;

use getopts::Options;
use reqwest::Url;

use crate::fetch::DEFAULT_TIMEOUT;
use crate::horario::{AcademicYear, Source, BASE_URL, MAX_START, MIN_START};

pub struct Args {
    pub source: Source,
    pub courses: u32,
    pub year: Option<AcademicYear>,
    pub output_dir: PathBuf,
    pub timeout: Duration,
    pub keep_going: bool,
    pub json: bool,
}

fn opts() -> Options {
    let mut opts = Options::new();
    opts.optflag(
        "h",
        "help",
        concat!("Print the help output of ", env!("CARGO_PKG_NAME")),
    );
    opts.optopt(
        "u",
        "base-url",
        "Schedule page to query [Default: https://portales.uloyola.es/LoyolaHorario/horario.xhtml]",
        "URL",
    );
    opts.optopt("", "titu", "Degree programme id [Default: 403]", "ID");
    opts.optopt("", "campus", "Campus id [Default: 2]", "ID");
    opts.optopt("", "tipo", "Section type [Default: G]", "TYPE");
    opts.optopt("", "grupo", "Class group [Default: A]", "GROUP");
    opts.optopt(
        "c",
        "courses",
        "Number of course levels to convert, starting at 1 [Default: 4]",
        "N",
    );
    opts.optopt(
        "y",
        "year",
        "First calendar year of the academic year [Default: current]",
        "YEAR",
    );
    opts.optopt(
        "o",
        "output-dir",
        "Directory the calendars are written to [Default: .]",
        "DIR",
    );
    opts.optopt(
        "t",
        "timeout",
        "Timeout for each schedule request [Default: 15]",
        "SECONDS",
    );
    opts.optflag(
        "k",
        "keep-going",
        "Continue with the remaining courses after a failure [Default: false]",
    );
    opts.optflag(
        "j",
        "json",
        "Also write each calendar as JSON [Default: false]",
    );
    opts
}

fn invalid(option: &str, err: impl std::fmt::Display) -> ! {
    eprintln!("Provided value for option '{option}' is invalid: {err}");
    process::exit(1);
}

pub fn parse(args: Vec<String>) -> Args {
    let opts = opts();

    let matches = match opts.parse(args) {
        Ok(matches) => matches,
        Err(fail) => {
            eprintln!("{fail}");
            process::exit(1);
        }
    };

    if matches.opt_present("help") {
        println!("{}", opts.usage(&opts.short_usage(env!("CARGO_PKG_NAME"))));
        process::exit(0);
    }

    let base_url = match matches
        .opt_str("base-url")
        .as_deref()
        .unwrap_or(BASE_URL)
        .parse::<Url>()
    {
        Ok(url) => url,
        Err(err) => invalid("base-url", err),
    };

    let mut source = Source::new(base_url);

    if let Some(tipo) = matches.opt_str("tipo") {
        source.tipo = tipo;
    }

    if let Some(grupo) = matches.opt_str("grupo") {
        source.grupo = grupo;
    }

    source.titu = match matches.opt_get_default("titu", source.titu) {
        Ok(titu) => titu,
        Err(err) => invalid("titu", err),
    };

    source.campus = match matches.opt_get_default("campus", source.campus) {
        Ok(campus) => campus,
        Err(err) => invalid("campus", err),
    };

    let courses = match matches.opt_get_default("courses", 4) {
        Ok(0) => invalid("courses", "must be at least 1"),
        Ok(courses) => courses,
        Err(err) => invalid("courses", err),
    };

    let year = match matches.opt_get::<i32>("year") {
        Ok(None) => None,
        Ok(Some(start)) => match AcademicYear::try_starting(start) {
            Some(year) => Some(year),
            None => invalid(
                "year",
                format!("must be between {MIN_START} and {MAX_START}"),
            ),
        },
        Err(err) => invalid("year", err),
    };

    let output_dir = matches
        .opt_str("output-dir")
        .map_or_else(|| PathBuf::from("."), PathBuf::from);

    let timeout = match matches.opt_get_default("timeout", DEFAULT_TIMEOUT.as_secs()) {
        Ok(secs) => Duration::from_secs(secs),
        Err(err) => invalid("timeout", err),
    };

    Args {
        source,
        courses,
        year,
        output_dir,
        timeout,
        keep_going: matches.opt_present("keep-going"),
        json: matches.opt_present("json"),
    }
}
