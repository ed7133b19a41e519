//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Boardcheck: verify a ticket manifest against a project board
#[derive(Parser, Debug)]
#[command(name = "boardcheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare a manifest against a captured board snapshot
    Compare(CompareArgs),

    /// Print the tickets extracted from a captured board snapshot
    Extract(ExtractArgs),

    /// Load and validate a manifest
    Validate(ValidateArgs),

    /// Check a manifest against a live board
    ///
    /// Requires the `browser` feature and a local Chromium.
    Check(CheckArgs),
}

/// Arguments for the compare command
#[derive(Parser, Debug)]
pub struct CompareArgs {
    /// Captured board snapshot (JSON)
    #[arg(short, long)]
    pub snapshot: PathBuf,

    /// Manifest file (JSON or YAML)
    #[arg(short, long, env = "BOARDCHECK_MANIFEST")]
    pub manifest: Option<PathBuf>,

    /// Report format
    #[arg(short, long, default_value = "text")]
    pub format: ReportFormat,

    /// Extra card selectors, tried after the defaults
    #[arg(long = "selector", value_name = "CSS")]
    pub selectors: Vec<String>,
}

/// Arguments for the extract command
#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// Captured board snapshot (JSON)
    #[arg(short, long)]
    pub snapshot: PathBuf,

    /// Extra card selectors, tried after the defaults
    #[arg(long = "selector", value_name = "CSS")]
    pub selectors: Vec<String>,
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Manifest file (JSON or YAML)
    #[arg(short, long, env = "BOARDCHECK_MANIFEST")]
    pub manifest: Option<PathBuf>,
}

/// Arguments for the check command
#[derive(Parser, Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct CheckArgs {
    /// Board URL to open before selecting the project
    #[arg(short, long, env = "BOARDCHECK_URL")]
    pub url: String,

    /// Manifest file (JSON or YAML)
    #[arg(short, long, env = "BOARDCHECK_MANIFEST")]
    pub manifest: Option<PathBuf>,

    /// Look up each expected ticket by name instead of reading every card
    #[arg(long)]
    pub targeted: bool,

    /// Run the browser headless
    #[arg(long, env = "BOARDCHECK_HEADLESS")]
    pub headless: bool,

    /// Disable the Chromium sandbox (containers/CI)
    #[arg(long)]
    pub no_sandbox: bool,

    /// Chromium binary (auto-detected when absent)
    #[arg(long, env = "CHROMIUM_PATH")]
    pub chromium_path: Option<PathBuf>,

    /// Browser profile directory holding an existing login
    #[arg(long, env = "BOARDCHECK_USER_DATA_DIR")]
    pub user_data_dir: Option<PathBuf>,

    /// Save the bulk snapshot here for offline replay
    #[arg(long)]
    pub capture: Option<PathBuf>,

    /// How long to wait for the project board, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 15_000)]
    pub navigation_timeout: u64,

    /// Visible text marking the board as ready (empty waits for cards only)
    #[arg(long, default_value = "To Do")]
    pub ready_text: String,

    /// Directory for screenshots and page dumps on timeouts
    #[arg(long, default_value = "TestArtifacts")]
    pub artifacts_dir: PathBuf,

    /// Login page, used when credentials are given
    #[arg(long, env = "BOARDCHECK_LOGIN_URL")]
    pub login_url: Option<String>,

    /// Username for the login page
    #[arg(long, env = "BOARDCHECK_USERNAME")]
    pub username: Option<String>,

    /// Password for the login page
    #[arg(long, env = "BOARDCHECK_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Report format
    #[arg(short, long, default_value = "text")]
    pub format: ReportFormat,
}

/// Report output format
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Plain text report
    #[default]
    Text,
    /// JSON comparison result
    Json,
}

/// Color argument
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::ColorChoice;

    mod cli_parsing_tests {
        use super::*;

        #[test]
        fn test_compare_args() {
            let cli = Cli::try_parse_from([
                "boardcheck",
                "compare",
                "--snapshot",
                "board.json",
                "--manifest",
                "tickets.yaml",
                "--format",
                "json",
            ])
            .unwrap();
            match cli.command {
                Commands::Compare(args) => {
                    assert_eq!(args.snapshot, PathBuf::from("board.json"));
                    assert_eq!(args.manifest, Some(PathBuf::from("tickets.yaml")));
                    assert_eq!(args.format, ReportFormat::Json);
                    assert!(args.selectors.is_empty());
                }
                other => panic!("unexpected command: {other:?}"),
            }
        }

        #[test]
        fn test_repeated_selectors() {
            let cli = Cli::try_parse_from([
                "boardcheck",
                "extract",
                "-s",
                "b.json",
                "--selector",
                ".kanban-tile",
                "--selector",
                "li.card",
            ])
            .unwrap();
            match cli.command {
                Commands::Extract(args) => assert_eq!(args.selectors.len(), 2),
                other => panic!("unexpected command: {other:?}"),
            }
        }

        #[test]
        fn test_global_flags() {
            let cli =
                Cli::try_parse_from(["boardcheck", "-vv", "--color", "never", "validate"]).unwrap();
            assert_eq!(cli.verbose, 2);
            assert!(matches!(cli.color, ColorArg::Never));
        }

        #[test]
        fn test_check_requires_url() {
            // Guard against a BOARDCHECK_URL set in the environment.
            if std::env::var_os("BOARDCHECK_URL").is_some() {
                return;
            }
            assert!(Cli::try_parse_from(["boardcheck", "check"]).is_err());
        }

        #[test]
        fn test_check_flags() {
            let cli = Cli::try_parse_from([
                "boardcheck",
                "check",
                "--url",
                "https://boards.example/home",
                "--targeted",
                "--headless",
                "--capture",
                "out.json",
            ])
            .unwrap();
            match cli.command {
                Commands::Check(args) => {
                    assert!(args.targeted);
                    assert!(args.headless);
                    assert_eq!(args.capture, Some(PathBuf::from("out.json")));
                    assert_eq!(args.navigation_timeout, 15_000);
                    assert_eq!(args.ready_text, "To Do");
                    assert_eq!(args.artifacts_dir, PathBuf::from("TestArtifacts"));
                }
                other => panic!("unexpected command: {other:?}"),
            }
        }
    }

    mod check_login_tests {
        use super::*;

        fn clear_login_env() -> bool {
            ["BOARDCHECK_USERNAME", "BOARDCHECK_PASSWORD", "BOARDCHECK_LOGIN_URL"]
                .iter()
                .all(|k| std::env::var_os(k).is_none())
        }

        #[test]
        fn test_login_and_wait_flags() {
            let cli = Cli::try_parse_from([
                "boardcheck",
                "check",
                "--url",
                "https://boards.example/home",
                "--username",
                "me@example.com",
                "--password",
                "secret",
                "--login-url",
                "https://boards.example/login",
                "--navigation-timeout",
                "30000",
                "--ready-text",
                "Backlog",
                "--artifacts-dir",
                "out",
            ])
            .unwrap();
            match cli.command {
                Commands::Check(args) => {
                    assert_eq!(args.username.as_deref(), Some("me@example.com"));
                    assert_eq!(args.password.as_deref(), Some("secret"));
                    assert_eq!(args.login_url.as_deref(), Some("https://boards.example/login"));
                    assert_eq!(args.navigation_timeout, 30_000);
                    assert_eq!(args.ready_text, "Backlog");
                    assert_eq!(args.artifacts_dir, PathBuf::from("out"));
                }
                other => panic!("unexpected command: {other:?}"),
            }
        }

        #[test]
        fn test_credentials_default_to_none() {
            if !clear_login_env() {
                return;
            }
            let cli = Cli::try_parse_from(["boardcheck", "check", "--url", "https://b.example/"])
                .unwrap();
            match cli.command {
                Commands::Check(args) => {
                    assert!(args.username.is_none());
                    assert!(args.password.is_none());
                    assert!(args.login_url.is_none());
                }
                other => panic!("unexpected command: {other:?}"),
            }
        }
    }

    mod color_arg_tests {
        use super::*;

        #[test]
        fn test_into_color_choice() {
            assert_eq!(ColorChoice::from(ColorArg::Auto), ColorChoice::Auto);
            assert_eq!(ColorChoice::from(ColorArg::Always), ColorChoice::Always);
            assert_eq!(ColorChoice::from(ColorArg::Never), ColorChoice::Never);
        }
    }
}
