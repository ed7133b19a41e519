//! The browser boundary as seen by the extraction engine.
//!
//! A [`BoardSession`] hands out node snapshots and performs the few page
//! actions targeted extraction needs. How it talks to a browser is its own
//! business; [`StaticBoard`] replays a captured snapshot with no browser at all.

use crate::result::BoardResult;
use crate::selector::CardSelector;
use crate::snapshot::{NodeId, NodeSnapshot};
use async_trait::async_trait;
use std::time::Duration;

/// A node located by exact text, with enough of its surroundings to find its card
///
/// The snapshot must contain the anchor, its ancestors up to the outermost
/// card container (or nearest generic container), and that container's
/// descendants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchoredNode {
    /// Captured surroundings
    pub snapshot: NodeSnapshot,
    /// The matched node within `snapshot`
    pub anchor: NodeId,
}

/// Browser capabilities consumed by the extraction engine
#[async_trait]
pub trait BoardSession: Send {
    /// Capture card containers matching any selector, with their descendants
    async fn snapshot(&mut self, selectors: &[CardSelector]) -> BoardResult<NodeSnapshot>;

    /// Wait up to `timeout` for a visible node whose text is exactly `text`
    ///
    /// `Ok(None)` means nothing visible matched in time.
    async fn probe_exact_text(
        &mut self,
        text: &str,
        selectors: &[CardSelector],
        timeout: Duration,
    ) -> BoardResult<Option<AnchoredNode>>;

    /// Scroll the viewport down by a fraction of its height
    async fn scroll_viewport(&mut self, fraction: f64) -> BoardResult<()>;

    /// Wait for a fixed delay
    async fn pause(&mut self, delay: Duration);
}

/// A session over a fixed, previously captured snapshot
///
/// Every node counts as visible, scrolling does nothing, and pauses return
/// immediately.
#[derive(Debug, Clone, Default)]
pub struct StaticBoard {
    snapshot: NodeSnapshot,
    scrolls: u32,
}

impl StaticBoard {
    /// Wrap a snapshot
    #[must_use]
    pub fn new(snapshot: NodeSnapshot) -> Self {
        Self {
            snapshot,
            scrolls: 0,
        }
    }

    /// Number of scroll requests received
    #[must_use]
    pub const fn scrolls(&self) -> u32 {
        self.scrolls
    }
}

#[async_trait]
impl BoardSession for StaticBoard {
    async fn snapshot(&mut self, _selectors: &[CardSelector]) -> BoardResult<NodeSnapshot> {
        Ok(self.snapshot.clone())
    }

    async fn probe_exact_text(
        &mut self,
        text: &str,
        _selectors: &[CardSelector],
        _timeout: Duration,
    ) -> BoardResult<Option<AnchoredNode>> {
        Ok(self
            .snapshot
            .find_exact_text(text)
            .next()
            .map(|anchor| AnchoredNode {
                snapshot: self.snapshot.clone(),
                anchor,
            }))
    }

    async fn scroll_viewport(&mut self, _fraction: f64) -> BoardResult<()> {
        self.scrolls += 1;
        Ok(())
    }

    async fn pause(&mut self, _delay: Duration) {}
}
