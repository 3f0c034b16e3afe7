mod cli;
mod config;
mod pipeline;

use std::error::Error;
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;
use site_logging::{site_error, LogDestination};

use crate::cli::{Cli, Command};
use crate::pipeline::AppError;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    let result = match &cli.command {
        Command::Build(args) => pipeline::run_build(args).map(|report| {
            println!("{} articles", report.article_count);
            println!("{}", report.feed_path.display());
            if let Some(path) = report.page_data_path {
                println!("{}", path.display());
            }
        }),
        Command::List(args) => pipeline::run_list(args).map(|ids| {
            for id in ids {
                println!("{id}");
            }
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) {
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let destination = match &cli.log_file {
        Some(path) => LogDestination::Both(path.clone()),
        None => LogDestination::Terminal,
    };
    site_logging::initialize(destination, level);
}

/// Log the error and every cause below it; aggregates log each failure.
fn report(err: &AppError) {
    site_error!("{}", err);
    match err {
        AppError::Assemble(aggregate) => {
            for failure in &aggregate.failures {
                site_error!("  {}", failure);
                log_causes(failure, "    ");
            }
        }
        other => log_causes(other, "  "),
    }
}

fn log_causes(err: &dyn Error, indent: &str) {
    let mut source = err.source();
    while let Some(cause) = source {
        site_error!("{}caused by: {}", indent, cause);
        source = cause.source();
    }
}
