//! Targeted extraction: tags for one ticket whose name is already known.
//!
//! The name is located by exact text. Its card is the nearest ancestor that
//! matches a card selector, or failing that the nearest generic container.
//! Every short text inside that card is a tag candidate; the title is not
//! re-derived, so the name itself is kept when it is short enough.

use super::{descendant_texts, is_tag_length, MAX_TAG_LEN};
use crate::result::BoardResult;
use crate::retry::RetryPolicy;
use crate::selector::{CardSelector, ANCHOR_TEXT_TAGS, FALLBACK_CONTAINER_TAG};
use crate::session::{AnchoredNode, BoardSession};
use crate::ticket::{ActualMapping, TagSet, TicketRecord};

/// Looks up tags for known ticket names on a live board
#[derive(Debug, Clone)]
pub struct TargetedExtractor {
    selectors: Vec<CardSelector>,
    fallback: CardSelector,
    policy: RetryPolicy,
    max_tag_len: usize,
}

impl Default for TargetedExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TargetedExtractor {
    /// Default selectors, `div` fallback and default retry policy
    #[must_use]
    pub fn new() -> Self {
        Self {
            selectors: CardSelector::defaults(),
            fallback: CardSelector::tag(FALLBACK_CONTAINER_TAG),
            policy: RetryPolicy::default(),
            max_tag_len: MAX_TAG_LEN,
        }
    }

    /// Replace the card selectors
    #[must_use]
    pub fn with_selectors(mut self, selectors: Vec<CardSelector>) -> Self {
        self.selectors = selectors;
        self
    }

    /// Replace the retry policy
    #[must_use]
    pub const fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Retry policy in use
    #[must_use]
    pub const fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Tags inside the card around an already located anchor
    #[must_use]
    pub fn tags_around(&self, found: &AnchoredNode) -> TagSet {
        let snapshot = &found.snapshot;
        let card = snapshot
            .closest(found.anchor, &self.selectors)
            .or_else(|| snapshot.closest(found.anchor, std::slice::from_ref(&self.fallback)));
        let Some(card) = card else {
            return TagSet::new();
        };
        descendant_texts(snapshot, card, ANCHOR_TEXT_TAGS)
            .iter()
            .filter(|t| is_tag_length(t, self.max_tag_len))
            .collect()
    }

    /// Probe for the name, scrolling and waiting between misses
    ///
    /// Probe failures count as misses. Scroll failures are returned.
    pub async fn locate<B>(&self, board: &mut B, name: &str) -> BoardResult<Option<AnchoredNode>>
    where
        B: BoardSession + ?Sized,
    {
        let attempts = self.policy.attempts();
        for attempt in 1..=attempts {
            match board
                .probe_exact_text(name, &self.selectors, self.policy.probe_timeout)
                .await
            {
                Ok(Some(found)) => {
                    tracing::debug!(name, attempt, "ticket located");
                    return Ok(Some(found));
                }
                Ok(None) => tracing::debug!(name, attempt, "ticket not visible yet"),
                Err(e) => tracing::debug!(name, attempt, error = %e, "probe failed"),
            }
            if attempt < attempts {
                board.scroll_viewport(self.policy.scroll_fraction).await?;
                board.pause(self.policy.delay).await;
            }
        }
        tracing::info!(name, attempts, "ticket not found, reporting no tags");
        Ok(None)
    }

    /// Tags for one record; empty when the name never becomes visible
    pub async fn tags_for<B>(&self, board: &mut B, record: &TicketRecord) -> BoardResult<TagSet>
    where
        B: BoardSession + ?Sized,
    {
        Ok(self
            .locate(board, record.name())
            .await?
            .map(|found| self.tags_around(&found))
            .unwrap_or_default())
    }

    /// Tags for every record, folded into a mapping keyed by declared name
    pub async fn tags_for_all<B>(
        &self,
        board: &mut B,
        records: &[TicketRecord],
    ) -> BoardResult<ActualMapping>
    where
        B: BoardSession + ?Sized,
    {
        let worst_case_ms =
            u64::try_from(self.policy.worst_case().as_millis()).unwrap_or(u64::MAX);
        tracing::info!(
            tickets = records.len(),
            worst_case_ms,
            "targeted extraction started"
        );
        let mut mapping = ActualMapping::new();
        for record in records {
            let tags = self.tags_for(board, record).await?;
            mapping.insert(record.name(), tags);
        }
        Ok(mapping)
    }
}

/// Run targeted extraction for each record with the given policy
pub async fn extract_tags_for<B>(
    board: &mut B,
    records: &[TicketRecord],
    policy: RetryPolicy,
) -> BoardResult<ActualMapping>
where
    B: BoardSession + ?Sized,
{
    TargetedExtractor::new()
        .with_policy(policy)
        .tags_for_all(board, records)
        .await
}
