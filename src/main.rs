use std::{env, io::Write};

use anyhow::Result;
use env_logger::Env;

use horario_ics::{cli, run};

const LOG_ENV: &str = "HORARIO_LOG";

fn setup_logging() {
    env_logger::Builder::from_env(Env::new().filter_or(LOG_ENV, "info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} | {} | {}",
                buf.timestamp(),
                record.level(),
                record.args()
            )
        })
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = cli::parse(env::args().skip(1).collect());

    setup_logging();

    run(&args).await
}
