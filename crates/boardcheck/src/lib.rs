//! Boardcheck: verify a ticket manifest against a rendered project board
//!
//! A manifest declares the tickets a board should show and the tags each one
//! should carry. Boardcheck reads what the board actually renders, folds it
//! into a name-to-tags mapping and reports every expected ticket that is
//! missing or tagged differently.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   BOARDCHECK Architecture                        │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Manifest   │    │ Board      │    │ Extraction │            │
//! │   │ (JSON/YAML)│    │ Session    │───►│ (bulk or   │            │
//! │   │            │    │ (CDP/file) │    │  targeted) │            │
//! │   └─────┬──────┘    └────────────┘    └─────┬──────┘            │
//! │         │ expected                  actual  │                   │
//! │         └──────────►┌────────────┐◄─────────┘                   │
//! │                     │ Comparison │───► Report                   │
//! │                     └────────────┘                              │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Extraction works on [`NodeSnapshot`]s, so a board captured once can be
//! checked again offline with exactly the same results.

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::large_stack_arrays, clippy::large_stack_frames))]

#[cfg(feature = "browser")]
mod browser;
mod compare;
pub mod extract;
mod login;
mod manifest;
mod report;
mod result;
mod retry;
mod selector;
mod session;
mod snapshot;
mod ticket;

#[cfg(feature = "browser")]
pub use browser::{
    BrowserConfig, ChromeBoardSession, DEFAULT_NAVIGATION_TIMEOUT_MS, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_READY_TEXT,
};
pub use compare::{compare_exact, ComparisonResult, TagMismatch};
pub use extract::{
    card_texts, extract_tags_for, BulkExtractor, CardStrategy, LongestTextStrategy,
    TargetedExtractor, MAX_TAG_LEN,
};
pub use login::{
    artifact_paths, Credentials, ElementTarget, LoginFlow, DEFAULT_ARTIFACTS_DIR,
    DEFAULT_LOGIN_TIMEOUT_MS, DEFAULT_LOGIN_URL, DEFAULT_PASSWORD_STEP_TIMEOUT_MS,
};
pub use manifest::{
    manifest_candidates, resolve_manifest_path, Manifest, ManifestFormat,
    DEFAULT_MANIFEST_PATHS, LEGACY_MANIFEST_ENV, MANIFEST_ENV,
};
pub use report::{format_report, format_report_with, report_lines, LINE_SEPARATOR, NO_DIFFERENCES};
pub use result::{BoardError, BoardResult};
pub use retry::{
    RetryPolicy, DEFAULT_DELAY_MS, DEFAULT_MAX_ATTEMPTS, DEFAULT_PROBE_TIMEOUT_MS,
    DEFAULT_SCROLL_FRACTION,
};
pub use selector::{
    AttrMatch, CardSelector, ANCHOR_TEXT_TAGS, CARD_TEXT_TAGS, DEFAULT_CARD_SELECTORS,
    FALLBACK_CONTAINER_TAG,
};
pub use session::{AnchoredNode, BoardSession, StaticBoard};
pub use snapshot::{DomNode, NodeId, NodeSnapshot, SnapshotBuilder};
pub use ticket::{fold_key, ActualMapping, TagSet, TicketRecord};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::{
        compare_exact, format_report, ActualMapping, BoardError, BoardResult, BoardSession,
        BulkExtractor, CardSelector, ComparisonResult, Manifest, NodeSnapshot, RetryPolicy,
        TagSet, TargetedExtractor, TicketRecord,
    };

    #[cfg(feature = "browser")]
    pub use super::{BrowserConfig, ChromeBoardSession};
}
