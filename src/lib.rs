pub mod cli;
pub mod fetch;
pub mod horario;
mod run;

pub use run::{convert_page, output_file_name, run, write_calendar};
