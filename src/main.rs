use anyhow::Result;
use log::LevelFilter;
use srcnotes::{Outcome, cli::parse_args, run_notes};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("\n[ERROR] {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<Outcome> {
    let config = parse_args()?;
    init_logging(config.verbosity);

    run_notes(&config).await
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
