//! Output formatting and status reporting
//!
//! Reports and machine-readable output go to stdout. Status lines go to
//! stderr, so piping the report never captures them.

use crate::commands::ReportFormat;
use crate::error::CliResult;
use boardcheck::{format_report, ComparisonResult};
use console::{style, Term};

/// Render a comparison result in the requested format
pub fn render_result(result: &ComparisonResult, format: ReportFormat) -> CliResult<String> {
    match format {
        ReportFormat::Text => Ok(format_report(result)),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(result)?),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Success,
    Failure,
    Info,
}

/// Status line reporter on stderr
#[derive(Debug)]
pub struct StatusReporter {
    term: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for StatusReporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl StatusReporter {
    /// Create a new reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            use_color,
            quiet,
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        self.emit(Status::Success, message);
    }

    /// Print a failure message, even in quiet mode
    pub fn failure(&self, message: &str) {
        self.emit(Status::Failure, message);
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        self.emit(Status::Info, message);
    }

    fn emit(&self, status: Status, message: &str) {
        if let Some(line) = self.line(status, message) {
            let _ = self.term.write_line(&line);
        }
    }

    /// The line written for a status, or `None` when quiet mode hides it
    fn line(&self, status: Status, message: &str) -> Option<String> {
        if self.quiet && status != Status::Failure {
            return None;
        }
        let prefix = match (status, self.use_color) {
            (Status::Success, true) => style("✓").green().bold().to_string(),
            (Status::Failure, true) => style("✗").red().bold().to_string(),
            (Status::Info, true) => style("ℹ").blue().bold().to_string(),
            (Status::Success, false) => "PASS".to_string(),
            (Status::Failure, false) => "FAIL".to_string(),
            (Status::Info, false) => "INFO".to_string(),
        };
        Some(format!("{prefix} {message}"))
    }

    fn verdict_line(&self, result: &ComparisonResult, expected: usize) -> Option<String> {
        let status = if result.has_failures() {
            Status::Failure
        } else {
            Status::Success
        };
        self.line(status, &summary_line(result, expected))
    }

    /// One-line verdict for a comparison over `expected` tickets
    pub fn verdict(&self, result: &ComparisonResult, expected: usize) {
        if let Some(line) = self.verdict_line(result, expected) {
            let _ = self.term.write_line(&line);
        }
    }
}

/// Plain summary of a comparison
#[must_use]
pub fn summary_line(result: &ComparisonResult, expected: usize) -> String {
    if result.has_failures() {
        format!(
            "{} missing, {} mismatched of {expected} expected tickets",
            result.missing().len(),
            result.mismatches().len()
        )
    } else {
        format!("all {expected} expected tickets match")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use boardcheck::{compare_exact, ActualMapping, TicketRecord};

    fn failing() -> ComparisonResult {
        let expected = vec![
            TicketRecord::new("Task 1", ["bug"]).unwrap(),
            TicketRecord::new("Task 2", ["ui"]).unwrap(),
        ];
        let actual: ActualMapping = [("Task 2", vec!["ux"])].into_iter().collect();
        compare_exact(&expected, &actual)
    }

    mod render_tests {
        use super::*;

        #[test]
        fn test_text_is_the_report() {
            let result = failing();
            assert_eq!(
                render_result(&result, ReportFormat::Text).unwrap(),
                format_report(&result)
            );
        }

        #[test]
        fn test_json_lists_missing_and_mismatches() {
            let json = render_result(&failing(), ReportFormat::Json).unwrap();
            let value: serde_json::Value = serde_json::from_str(&json).unwrap();
            assert_eq!(value["missing"][0], "Task 1");
            assert_eq!(value["mismatches"][0]["name"], "Task 2");
            assert_eq!(value["mismatches"][0]["actual"][0], "ux");
        }
    }

    mod summary_tests {
        use super::*;

        #[test]
        fn test_failure_summary() {
            assert_eq!(
                summary_line(&failing(), 2),
                "1 missing, 1 mismatched of 2 expected tickets"
            );
        }

        #[test]
        fn test_clean_summary() {
            assert_eq!(
                summary_line(&ComparisonResult::default(), 3),
                "all 3 expected tickets match"
            );
        }
    }

    mod status_reporter_tests {
        use super::*;

        #[test]
        fn test_quiet_mode_keeps_only_failures() {
            let reporter = StatusReporter::new(false, true);
            assert_eq!(reporter.line(Status::Success, "hidden"), None);
            assert_eq!(reporter.line(Status::Info, "hidden"), None);
            assert_eq!(
                reporter.line(Status::Failure, "shown").as_deref(),
                Some("FAIL shown")
            );
        }

        #[test]
        fn test_plain_prefixes() {
            let reporter = StatusReporter::new(false, false);
            assert_eq!(reporter.line(Status::Success, "ok").as_deref(), Some("PASS ok"));
            assert_eq!(reporter.line(Status::Info, "note").as_deref(), Some("INFO note"));
        }

        #[test]
        fn test_colored_prefix_keeps_message() {
            let reporter = StatusReporter::new(true, false);
            let line = reporter.line(Status::Success, "ok").unwrap();
            assert!(line.contains('✓'));
            assert!(line.ends_with(" ok"));
        }

        #[test]
        fn test_verdict_picks_status() {
            let reporter = StatusReporter::new(false, false);
            assert_eq!(
                reporter.verdict_line(&failing(), 2).as_deref(),
                Some("FAIL 1 missing, 1 mismatched of 2 expected tickets")
            );
            assert_eq!(
                reporter.verdict_line(&ComparisonResult::default(), 0).as_deref(),
                Some("PASS all 0 expected tickets match")
            );
        }

        #[test]
        fn test_quiet_verdict_still_reports_failures() {
            let reporter = StatusReporter::new(false, true);
            assert!(reporter.verdict_line(&failing(), 2).is_some());
            assert!(reporter.verdict_line(&ComparisonResult::default(), 2).is_none());
        }
    }
}
