use clap::Parser;
use spendsense::args::{Args, Command};
use spendsense::{commands, Config};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub fn main_inner(args: Args) -> anyhow::Result<()> {
    trace!("{args:?}");
    let home = args.common().home().path();
    let config = Config::load(home)?;
    debug!("Using data file {}", config.data_file().display());

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Add(add_args) => commands::add(&config, add_args)?.print(),
        Command::Latest(latest_args) => commands::latest(&config, latest_args)?.print(),
        Command::Totals => commands::totals(&config)?.print(),
        Command::Report(report_args) => commands::report(&config, report_args)?.print(),
        Command::Menu => commands::menu(&config)?,
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
