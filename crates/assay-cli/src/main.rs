//! Assay CLI entry point.

use std::{fs, process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use assay::AssayError;
use assay_cli::{Args, error_adapter::ErrorAdapter};

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting Assay");
    debug!(args:?; "Parsed arguments");

    if let Err(err) = assay_cli::run(&args) {
        // Document errors are shown against the input text
        let src = match &err {
            AssayError::Parse(_) => fs::read_to_string(&args.input).ok(),
            _ => None,
        };

        let mut adapter = ErrorAdapter::new(&err);
        if let Some(src) = src.as_deref() {
            adapter = adapter.with_source(src);
        }

        let mut writer = String::new();
        miette::GraphicalReportHandler::new()
            .render_report(&mut writer, &adapter)
            .expect("Writing to String buffer is infallible");
        error!("{writer}");

        process::exit(1);
    }

    info!("Completed successfully");
}
