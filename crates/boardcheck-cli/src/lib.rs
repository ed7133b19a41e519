//! Boardcheck CLI Library
//!
//! Command-line harness around the boardcheck library: manifest resolution,
//! environment-driven configuration, subcommands and exit codes.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Error types are self-documenting

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;
mod output;

pub use commands::{
    CheckArgs, Cli, ColorArg, Commands, CompareArgs, ExtractArgs, ReportFormat, ValidateArgs,
};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{render_result, summary_line, StatusReporter};
