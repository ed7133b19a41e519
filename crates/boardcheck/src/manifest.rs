//! Expected manifest: the project to check and the tickets it should show.
//!
//! ```json
//! {
//!   "project": "Website Launch",
//!   "tickets": [
//!     { "name": "Task 1", "tags": ["bug", "ui"] }
//!   ]
//! }
//! ```
//!
//! YAML is accepted too, picked by file extension.

use crate::result::{BoardError, BoardResult};
use crate::ticket::{fold_key, TicketRecord};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Environment variable naming the manifest path
pub const MANIFEST_ENV: &str = "BOARDCHECK_MANIFEST";

/// Older environment variable, still honoured
pub const LEGACY_MANIFEST_ENV: &str = "TICKETS_JSON_PATH";

/// Manifest paths tried, relative to the working directory, after the env vars
pub const DEFAULT_MANIFEST_PATHS: &[&str] = &["Data/tickets.json", "data/tickets.json"];

#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(default, alias = "Project", alias = "PROJECT")]
    project: Option<String>,
    #[serde(default, alias = "Tickets", alias = "TICKETS")]
    tickets: Option<Vec<RawTicket>>,
}

#[derive(Debug, Deserialize)]
struct RawTicket {
    #[serde(default, alias = "Name", alias = "NAME")]
    name: Option<String>,
    #[serde(default, alias = "Tags", alias = "TAGS")]
    tags: Option<Vec<String>>,
}

/// Source format of a manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ManifestFormat {
    /// JSON document
    #[default]
    Json,
    /// YAML document
    Yaml,
}

impl ManifestFormat {
    /// Pick a format from a file extension, defaulting to JSON
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// A validated manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    project: String,
    tickets: Vec<TicketRecord>,
}

impl Manifest {
    /// Build a manifest, validating the project and ticket names
    pub fn new(project: impl Into<String>, tickets: Vec<TicketRecord>) -> BoardResult<Self> {
        let project = project.into().trim().to_string();
        if project.is_empty() {
            return Err(BoardError::invalid_manifest("project", "must not be empty"));
        }
        let mut seen: HashMap<String, usize> = HashMap::new();
        for (index, ticket) in tickets.iter().enumerate() {
            if let Some(first) = seen.insert(ticket.key(), index) {
                return Err(BoardError::invalid_ticket(
                    index,
                    format!(
                        "name `{}` duplicates the ticket at index {first}",
                        ticket.name()
                    ),
                ));
            }
        }
        Ok(Self { project, tickets })
    }

    /// Parse manifest text in the given format
    pub fn parse(text: &str, format: ManifestFormat) -> BoardResult<Self> {
        let raw: RawManifest = match format {
            ManifestFormat::Json => serde_json::from_str(text)?,
            ManifestFormat::Yaml => serde_yaml_ng::from_str(text)?,
        };
        Self::from_raw(raw)
    }

    /// Read and parse a manifest file
    pub fn load(path: &Path) -> BoardResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let manifest = Self::parse(&text, ManifestFormat::from_path(path))?;
        tracing::info!(
            path = %path.display(),
            project = %manifest.project,
            tickets = manifest.tickets.len(),
            "manifest loaded"
        );
        Ok(manifest)
    }

    fn from_raw(raw: RawManifest) -> BoardResult<Self> {
        let project = raw
            .project
            .ok_or_else(|| BoardError::invalid_manifest("project", "field is missing"))?;
        let raw_tickets = raw
            .tickets
            .ok_or_else(|| BoardError::invalid_manifest("tickets", "field is missing"))?;
        let tickets = raw_tickets
            .into_iter()
            .enumerate()
            .map(|(index, t)| {
                let name = t.name.unwrap_or_default();
                TicketRecord::at(index, &name, t.tags.unwrap_or_default())
            })
            .collect::<BoardResult<Vec<_>>>()?;
        Self::new(project, tickets)
    }

    /// Project identifier, opaque to extraction and comparison
    #[must_use]
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Expected tickets in manifest order
    #[must_use]
    pub fn tickets(&self) -> &[TicketRecord] {
        &self.tickets
    }
}

/// Candidate manifest locations, in the order they are tried
#[must_use]
pub fn manifest_candidates(explicit: Option<&Path>, cwd: &Path) -> Vec<PathBuf> {
    if let Some(path) = explicit {
        return vec![path.to_path_buf()];
    }
    let mut candidates: Vec<PathBuf> = [MANIFEST_ENV, LEGACY_MANIFEST_ENV]
        .iter()
        .filter_map(|var| std::env::var_os(var))
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .collect();
    candidates.extend(DEFAULT_MANIFEST_PATHS.iter().map(|p| cwd.join(p)));
    candidates
}

/// First existing candidate, or an error listing everything checked
pub fn resolve_manifest_path(explicit: Option<&Path>, cwd: &Path) -> BoardResult<PathBuf> {
    let candidates = manifest_candidates(explicit, cwd);
    candidates
        .iter()
        .find(|p| p.is_file())
        .cloned()
        .ok_or(BoardError::ManifestNotFound {
            checked: candidates,
        })
}
