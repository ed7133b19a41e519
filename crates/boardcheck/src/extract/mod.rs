//! Extraction engine: rendered board to ticket records.
//!
//! There is no stable schema to rely on, so extraction is heuristic:
//!
//! ```text
//! snapshot ──► card containers ──► card texts ──► CardStrategy ──► TicketRecord
//!              (document order,    (text-bearing                (title + tags)
//!               each node once)     descendants, trimmed)
//! ```
//!
//! Cards that yield nothing usable are skipped; extraction itself never fails.

mod targeted;

pub use targeted::{extract_tags_for, TargetedExtractor};

use crate::selector::{CardSelector, CARD_TEXT_TAGS};
use crate::snapshot::{NodeId, NodeSnapshot};
use crate::ticket::{ActualMapping, TagSet, TicketRecord};
use std::fmt::Debug;

/// Longest text, in characters, that may count as a tag
pub const MAX_TAG_LEN: usize = 40;

/// Whether a text is short enough to be a tag
#[must_use]
pub fn is_tag_length(text: &str, max_len: usize) -> bool {
    text.chars().count() <= max_len
}

/// Trimmed, non-empty texts of the descendants of `root` whose tag is in `tags`
#[must_use]
pub fn descendant_texts(snapshot: &NodeSnapshot, root: NodeId, tags: &[&str]) -> Vec<String> {
    snapshot
        .descendants(root)
        .filter_map(|id| snapshot.get(id))
        .filter(|node| node.has_tag_in(tags))
        .map(|node| node.trimmed_text())
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .collect()
}

/// Texts of a card's text-bearing descendants
#[must_use]
pub fn card_texts(snapshot: &NodeSnapshot, card: NodeId) -> Vec<String> {
    descendant_texts(snapshot, card, CARD_TEXT_TAGS)
}

/// Turns the texts of one card into a record
///
/// Implementations must be pure: the same texts always give the same record.
pub trait CardStrategy: Debug + Send + Sync {
    /// Read one card. `None` means the card is not a real item.
    fn read_card(&self, texts: &[String]) -> Option<TicketRecord>;
}

/// The longest text is the title; every other short text is a tag.
///
/// Ties go to the first text of the winning length. A tag longer than the
/// real title will be taken as the title; that is a property of the
/// heuristic, not something to correct here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongestTextStrategy {
    max_tag_len: usize,
}

impl Default for LongestTextStrategy {
    fn default() -> Self {
        Self {
            max_tag_len: MAX_TAG_LEN,
        }
    }
}

impl LongestTextStrategy {
    /// Create the strategy with the standard 40 character tag limit
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the tag length limit
    #[must_use]
    pub const fn with_max_tag_len(mut self, max_tag_len: usize) -> Self {
        self.max_tag_len = max_tag_len;
        self
    }

    /// First text of maximal character length
    #[must_use]
    pub fn pick_title<'a>(&self, texts: &'a [String]) -> Option<&'a str> {
        let mut best: Option<(&str, usize)> = None;
        for text in texts {
            let len = text.chars().count();
            if best.map_or(true, |(_, best_len)| len > best_len) {
                best = Some((text.as_str(), len));
            }
        }
        best.map(|(text, _)| text.trim())
    }
}

impl CardStrategy for LongestTextStrategy {
    fn read_card(&self, texts: &[String]) -> Option<TicketRecord> {
        let title = self.pick_title(texts)?;
        let tags: TagSet = texts
            .iter()
            .map(String::as_str)
            .filter(|t| t.trim() != title && is_tag_length(t, self.max_tag_len))
            .collect();
        TicketRecord::new(title, tags.iter()).ok()
    }
}

/// Bulk extraction over a whole snapshot
#[derive(Debug, Clone)]
pub struct BulkExtractor<S = LongestTextStrategy> {
    selectors: Vec<CardSelector>,
    strategy: S,
}

impl Default for BulkExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl BulkExtractor {
    /// Create an extractor with the default selectors and strategy
    #[must_use]
    pub fn new() -> Self {
        Self {
            selectors: CardSelector::defaults(),
            strategy: LongestTextStrategy::default(),
        }
    }
}

impl<S: CardStrategy> BulkExtractor<S> {
    /// Replace the card selectors
    #[must_use]
    pub fn with_selectors(mut self, selectors: Vec<CardSelector>) -> Self {
        self.selectors = selectors;
        self
    }

    /// Swap the card strategy
    #[must_use]
    pub fn with_strategy<T: CardStrategy>(self, strategy: T) -> BulkExtractor<T> {
        BulkExtractor {
            selectors: self.selectors,
            strategy,
        }
    }

    /// Card selectors in use
    #[must_use]
    pub fn selectors(&self) -> &[CardSelector] {
        &self.selectors
    }

    /// Card containers in document order; a node matching several selectors counts once
    #[must_use]
    pub fn card_nodes(&self, snapshot: &NodeSnapshot) -> Vec<NodeId> {
        snapshot
            .nodes()
            .iter()
            .enumerate()
            .filter(|(_, node)| self.selectors.iter().any(|s| s.matches(node)))
            .map(|(id, _)| id)
            .collect()
    }

    /// Extract one record per readable card, in card order
    #[must_use]
    pub fn extract(&self, snapshot: &NodeSnapshot) -> Vec<TicketRecord> {
        let cards = self.card_nodes(snapshot);
        let mut records = Vec::with_capacity(cards.len());
        for &card in &cards {
            let texts = card_texts(snapshot, card);
            if texts.is_empty() {
                tracing::debug!(card, "skipping card with no text");
                continue;
            }
            match self.strategy.read_card(&texts) {
                Some(record) => records.push(record),
                None => tracing::debug!(card, "skipping card without a usable title"),
            }
        }
        tracing::info!(
            cards = cards.len(),
            records = records.len(),
            "bulk extraction finished"
        );
        records
    }

    /// Extract and fold into a mapping, last duplicate name wins
    #[must_use]
    pub fn extract_mapping(&self, snapshot: &NodeSnapshot) -> ActualMapping {
        ActualMapping::from_records(&self.extract(snapshot))
    }
}
