//! Boardcheck CLI: verify a ticket manifest against a project board
//!
//! ## Usage
//!
//! ```bash
//! boardcheck validate --manifest Data/tickets.json
//! boardcheck compare --snapshot board.json            # offline, exit 1 on differences
//! boardcheck extract --snapshot board.json            # tickets as JSON
//! boardcheck check --url https://boards.example/ --capture board.json
//! ```
//!
//! Exit codes: 0 when nothing differs, 1 on differences or runtime errors,
//! 2 on invalid input (manifest, snapshot, selectors, arguments).

use boardcheck_cli::{
    handlers, logging, Cli, CliConfig, CliResult, ColorChoice, Commands, StatusReporter,
    Verbosity,
};
use clap::Parser;
use std::process::ExitCode;

/// Exit status for manifest, snapshot, selector and argument errors
const INVALID_INPUT_EXIT: u8 = 2;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            if e.is_invalid_input() {
                ExitCode::from(INVALID_INPUT_EXIT)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let config = build_config(&cli);
    logging::init_tracing(&config);

    let reporter = StatusReporter::new(config.color.should_color(), config.verbosity.is_quiet());

    match cli.command {
        Commands::Compare(args) => {
            let result = handlers::run_compare(&reporter, &args)?;
            Ok(exit_code(result.has_failures()))
        }
        Commands::Extract(args) => {
            handlers::run_extract(&reporter, &args)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Validate(args) => {
            handlers::run_validate(&reporter, &args)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check(args) => {
            let result = handlers::run_check(&reporter, &args)?;
            Ok(exit_code(result.has_failures()))
        }
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let color: ColorChoice = cli.color.clone().into();
    CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
        .with_color(color)
}

fn exit_code(has_failures: bool) -> ExitCode {
    if has_failures {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
