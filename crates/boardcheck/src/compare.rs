//! Comparison engine: expected manifest against the actual mapping.
//!
//! The diff is driven by the manifest. Every expected record is either
//! missing from the board, present with a different tag set, or fine. Names
//! that only exist on the board are never reported.

use crate::ticket::{ActualMapping, TagSet, TicketRecord};
use serde::Serialize;

/// A ticket present on both sides whose tags differ
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagMismatch {
    /// Name as declared in the manifest
    pub name: String,
    /// Normalized expected tags
    pub expected: TagSet,
    /// Normalized actual tags
    pub actual: TagSet,
}

/// Outcome of one comparison run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComparisonResult {
    missing: Vec<String>,
    mismatches: Vec<TagMismatch>,
}

impl ComparisonResult {
    /// Expected names absent from the board, in manifest order
    #[must_use]
    pub fn missing(&self) -> &[String] {
        &self.missing
    }

    /// Tag mismatches, in manifest order
    #[must_use]
    pub fn mismatches(&self) -> &[TagMismatch] {
        &self.mismatches
    }

    /// Whether anything is missing or mismatched
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.missing.is_empty() || !self.mismatches.is_empty()
    }
}

/// Exact, case-insensitive comparison of tag sets, record by record
#[must_use]
pub fn compare_exact(expected: &[TicketRecord], actual: &ActualMapping) -> ComparisonResult {
    let mut result = ComparisonResult::default();
    for record in expected {
        let expected_tags: TagSet = record.tags().iter().collect();
        let Some(actual_tags) = actual.get(record.name()) else {
            result.missing.push(record.name().to_string());
            continue;
        };
        let actual_tags: TagSet = actual_tags.iter().collect();
        if !expected_tags.same_tags(&actual_tags) {
            result.mismatches.push(TagMismatch {
                name: record.name().to_string(),
                expected: expected_tags,
                actual: actual_tags,
            });
        }
    }
    tracing::info!(
        expected = expected.len(),
        missing = result.missing.len(),
        mismatched = result.mismatches.len(),
        "comparison finished"
    );
    result
}
