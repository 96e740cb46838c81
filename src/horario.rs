use std::fmt;

use chrono::{Datelike, Local, NaiveDate};
use reqwest::Url;

pub const BASE_URL: &str = "https://portales.uloyola.es/LoyolaHorario/horario.xhtml";

/// Fixed query parameters identifying the degree programme on the schedule portal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub base_url: Url,
    pub titu: u32,
    pub campus: u32,
    pub tipo: String,
    pub grupo: String,
}

impl Source {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            titu: 403,
            campus: 2,
            tipo: "G".into(),
            grupo: "A".into(),
        }
    }

    pub fn url(&self, year: AcademicYear, course: u32) -> Url {
        let mut url = self.base_url.clone();

        url.query_pairs_mut()
            .clear()
            .append_pair("curso", &year.to_string())
            .append_pair("tipo", &self.tipo)
            .append_pair("titu", &self.titu.to_string())
            .append_pair("campus", &self.campus.to_string())
            .append_pair("ncurso", &course.to_string())
            .append_pair("grupo", &self.grupo);

        url
    }
}

/// Academic years run from September to August.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcademicYear {
    start: i32,
}

impl AcademicYear {
    pub fn starting(start: i32) -> Self {
        Self { start }
    }

    pub fn containing(date: NaiveDate) -> Self {
        if date.month() >= 9 {
            Self::starting(date.year())
        } else {
            Self::starting(date.year() - 1)
        }
    }

    pub fn current() -> Self {
        Self::containing(Local::now().date_naive())
    }

    /// Years given on the command line; `None` outside four-digit years.
    pub fn try_starting(start: i32) -> Option<Self> {
        (MIN_START..=MAX_START)
            .contains(&start)
            .then(|| Self::starting(start))
    }

    pub fn start(self) -> i32 {
        self.start
    }
}

pub const MIN_START: i32 = 1000;
pub const MAX_START: i32 = 9998;

impl fmt::Display for AcademicYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let end = (self.start.rem_euclid(100) + 1) % 100;
        write!(f, "{}/{end:02}", self.start)
    }
}
