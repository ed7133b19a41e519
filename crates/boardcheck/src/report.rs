//! Report formatter: a comparison result as fixed-structure text.
//!
//! ```text
//! Missing tickets:
//! - Task 1
//! Tag mismatches:
//! - Task 2
//!   Expected: [bug]
//!   Actual:   [bug, urgent]
//! ```
//!
//! The text alone identifies every missing ticket and every tag delta.

use crate::compare::ComparisonResult;
use crate::ticket::TagSet;
use std::fmt;

/// Platform line separator
#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";

/// Platform line separator
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

/// Report for a result with no failures
pub const NO_DIFFERENCES: &str = "No differences found.";

/// Report lines, without separators
#[must_use]
pub fn report_lines(result: &ComparisonResult) -> Vec<String> {
    let mut lines = Vec::new();
    if !result.missing().is_empty() {
        lines.push("Missing tickets:".to_string());
        lines.extend(result.missing().iter().map(|name| format!("- {name}")));
    }
    if !result.mismatches().is_empty() {
        lines.push("Tag mismatches:".to_string());
        for m in result.mismatches() {
            lines.push(format!("- {}", m.name));
            lines.push(format!("  Expected: [{}]", join_tags(&m.expected)));
            lines.push(format!("  Actual:   [{}]", join_tags(&m.actual)));
        }
    }
    if lines.is_empty() {
        lines.push(NO_DIFFERENCES.to_string());
    }
    lines
}

/// Render the report with the platform line separator
#[must_use]
pub fn format_report(result: &ComparisonResult) -> String {
    format_report_with(result, LINE_SEPARATOR)
}

/// Render the report with an explicit line separator
#[must_use]
pub fn format_report_with(result: &ComparisonResult, separator: &str) -> String {
    report_lines(result).join(separator)
}

fn join_tags(tags: &TagSet) -> String {
    tags.iter().collect::<Vec<_>>().join(", ")
}

impl fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_report(self))
    }
}
