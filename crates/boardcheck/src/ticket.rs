//! Ticket records, tag sets and the name-keyed actual mapping.
//!
//! Names and tags compare case-insensitively. A [`TagSet`] keeps the first
//! spelling it saw for each tag, in insertion order, so reports echo what the
//! manifest or the board actually said.

use crate::result::{BoardError, BoardResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Case-folded key used for name and tag lookups
#[must_use]
pub fn fold_key(value: &str) -> String {
    value.trim().to_lowercase()
}

/// A trimmed, non-empty, case-insensitively deduplicated set of tags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct TagSet {
    tags: Vec<String>,
}

impl TagSet {
    /// Create an empty tag set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tag. Returns false if it was blank or already present.
    pub fn insert(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.contains(tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    /// Case-insensitive membership
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        let key = fold_key(tag);
        self.tags.iter().any(|t| fold_key(t) == key)
    }

    /// Number of tags
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether the set is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Tags in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Tags as a slice, in insertion order
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }

    /// Set equality ignoring order and letter case
    #[must_use]
    pub fn same_tags(&self, other: &Self) -> bool {
        self.folded() == other.folded()
    }

    fn folded(&self) -> BTreeSet<String> {
        self.tags.iter().map(|t| fold_key(t)).collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for tag in iter {
            let _ = set.insert(tag.as_ref());
        }
        set
    }
}

impl From<Vec<String>> for TagSet {
    fn from(tags: Vec<String>) -> Self {
        tags.into_iter().collect()
    }
}

impl From<TagSet> for Vec<String> {
    fn from(set: TagSet) -> Self {
        set.tags
    }
}

/// A work item: display name plus tag set
///
/// The name is trimmed and never empty; constructing a record with a blank
/// name is an input error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketRecord {
    name: String,
    tags: TagSet,
}

impl TicketRecord {
    /// Create a record, rejecting a blank name
    pub fn new<I, S>(name: impl AsRef<str>, tags: I) -> BoardResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::at(0, name, tags)
    }

    /// Create a record at a known list position, for error reporting
    pub fn at<I, S>(index: usize, name: impl AsRef<str>, tags: I) -> BoardResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(BoardError::invalid_ticket(index, "name is empty"));
        }
        Ok(Self {
            name: name.to_string(),
            tags: tags.into_iter().collect(),
        })
    }

    /// Display name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tag set
    #[must_use]
    pub const fn tags(&self) -> &TagSet {
        &self.tags
    }

    /// Case-folded lookup key
    #[must_use]
    pub fn key(&self) -> String {
        fold_key(&self.name)
    }
}

/// Name to tag set mapping built from one live rendering
///
/// Keys are case-insensitive. Inserting a name that is already present
/// replaces the earlier entry, including its display spelling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActualMapping {
    entries: HashMap<String, (String, TagSet)>,
}

impl ActualMapping {
    /// Create an empty mapping
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold records into a mapping, last-seen name wins
    #[must_use]
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a TicketRecord>) -> Self {
        let mut mapping = Self::new();
        for record in records {
            mapping.insert(record.name(), record.tags().clone());
        }
        mapping
    }

    /// Insert or replace the tags for a name. Blank names are ignored.
    pub fn insert(&mut self, name: &str, tags: TagSet) {
        let key = fold_key(name);
        if key.is_empty() {
            return;
        }
        if let Some((previous, _)) = self
            .entries
            .insert(key, (name.trim().to_string(), tags))
        {
            tracing::debug!(name = %previous, "duplicate name on board, keeping last seen");
        }
    }

    /// Case-insensitive lookup
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TagSet> {
        self.entries.get(&fold_key(name)).map(|(_, tags)| tags)
    }

    /// Whether a name is present
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&fold_key(name))
    }

    /// Number of distinct names
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries as (display name, tags), in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TagSet)> {
        self.entries
            .values()
            .map(|(name, tags)| (name.as_str(), tags))
    }
}

impl<N: AsRef<str>, S: AsRef<str>> FromIterator<(N, Vec<S>)> for ActualMapping {
    fn from_iter<I: IntoIterator<Item = (N, Vec<S>)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (name, tags) in iter {
            mapping.insert(name.as_ref(), tags.into_iter().collect());
        }
        mapping
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod tag_set_tests {
        use super::*;

        #[test]
        fn test_trims_and_drops_blank() {
            let set: TagSet = ["  bug ", "", "   ", "ui"].into_iter().collect();
            assert_eq!(set.as_slice(), &["bug".to_string(), "ui".to_string()]);
        }

        #[test]
        fn test_dedup_keeps_first_spelling() {
            let set: TagSet = ["Bug", "bug", "BUG", "ui"].into_iter().collect();
            assert_eq!(set.len(), 2);
            assert_eq!(set.iter().next(), Some("Bug"));
        }

        #[test]
        fn test_same_tags_ignores_case_and_order() {
            let a: TagSet = ["bug", "ui"].into_iter().collect();
            let b: TagSet = ["UI", "Bug"].into_iter().collect();
            assert!(a.same_tags(&b));
        }

        #[test]
        fn test_same_tags_detects_extra() {
            let a: TagSet = ["bug"].into_iter().collect();
            let b: TagSet = ["bug", "urgent"].into_iter().collect();
            assert!(!a.same_tags(&b));
        }

        #[test]
        fn test_empty_sets_are_equal() {
            let blank: TagSet = ["  "].into_iter().collect();
            assert!(blank.same_tags(&TagSet::new()));
        }

        #[test]
        fn test_deserialize_normalizes() {
            let set: TagSet = serde_json::from_str(r#"["a", " A ", "b"]"#).unwrap();
            assert_eq!(set.as_slice(), &["a".to_string(), "b".to_string()]);
        }
    }

    mod ticket_record_tests {
        use super::*;

        #[test]
        fn test_trims_name() {
            let record = TicketRecord::new("  Task 1 ", ["bug"]).unwrap();
            assert_eq!(record.name(), "Task 1");
            assert_eq!(record.key(), "task 1");
        }

        #[test]
        fn test_rejects_blank_name() {
            let err = TicketRecord::at(4, "   ", ["bug"]).unwrap_err();
            assert!(matches!(err, BoardError::InvalidTicket { index: 4, .. }));
        }
    }

    mod actual_mapping_tests {
        use super::*;

        #[test]
        fn test_lookup_is_case_insensitive() {
            let mapping: ActualMapping = [("Task 1", vec!["UI"])].into_iter().collect();
            assert!(mapping.contains("task 1"));
            assert!(mapping.get("TASK 1").unwrap().contains("ui"));
        }

        #[test]
        fn test_last_record_wins() {
            let first = TicketRecord::new("Task", ["a"]).unwrap();
            let second = TicketRecord::new("TASK", ["b"]).unwrap();
            let mapping = ActualMapping::from_records([&first, &second]);
            assert_eq!(mapping.len(), 1);
            assert!(mapping.get("task").unwrap().contains("b"));
            assert_eq!(mapping.iter().next().unwrap().0, "TASK");
        }

        #[test]
        fn test_blank_name_ignored() {
            let mut mapping = ActualMapping::new();
            mapping.insert("  ", TagSet::new());
            assert!(mapping.is_empty());
        }
    }
}
