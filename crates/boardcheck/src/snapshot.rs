//! Raw node snapshots captured from a rendered board.
//!
//! A snapshot is a flat list of elements in document order. Each node carries
//! its tag, classes, attributes and text content, plus the index of its parent
//! when the parent was captured too. Parents always precede their children,
//! which keeps ancestry walks finite.

use crate::result::{BoardError, BoardResult};
use crate::selector::CardSelector;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Index of a node within its snapshot
pub type NodeId = usize;

/// One captured element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomNode {
    /// Parent index, if the parent was captured
    #[serde(default)]
    pub parent: Option<NodeId>,
    /// Lowercase tag name
    pub tag: String,
    /// Class list
    #[serde(default)]
    pub classes: Vec<String>,
    /// Attributes by lowercase name
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// Text content, as rendered (untrimmed)
    #[serde(default)]
    pub text: String,
}

impl DomNode {
    /// Create a parentless node with no text
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            parent: None,
            tag: tag.into().to_ascii_lowercase(),
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            text: String::new(),
        }
    }

    /// Set the parent index
    #[must_use]
    pub const fn with_parent(mut self, parent: NodeId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Set the text content
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Add classes
    #[must_use]
    pub fn with_classes<'a>(mut self, classes: impl IntoIterator<Item = &'a str>) -> Self {
        self.classes.extend(classes.into_iter().map(str::to_string));
        self
    }

    /// Add attributes
    #[must_use]
    pub fn with_attributes<'a>(
        mut self,
        attrs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        for (name, value) in attrs {
            let _ = self
                .attributes
                .insert(name.to_ascii_lowercase(), value.to_string());
        }
        self
    }

    /// Whether the node's tag is one of `tags`
    #[must_use]
    pub fn has_tag_in(&self, tags: &[&str]) -> bool {
        tags.iter().any(|t| self.tag.eq_ignore_ascii_case(t))
    }

    /// Trimmed text content
    #[must_use]
    pub fn trimmed_text(&self) -> &str {
        self.text.trim()
    }
}

/// A validated, document-ordered list of nodes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<DomNode>", into = "Vec<DomNode>")]
pub struct NodeSnapshot {
    nodes: Vec<DomNode>,
}

impl NodeSnapshot {
    /// Build a snapshot, checking that every parent precedes its child
    pub fn new(nodes: Vec<DomNode>) -> BoardResult<Self> {
        for (id, node) in nodes.iter().enumerate() {
            if let Some(parent) = node.parent {
                if parent >= id {
                    return Err(BoardError::invalid_snapshot(format!(
                        "node {id} has parent {parent}, parents must precede children"
                    )));
                }
            }
        }
        Ok(Self { nodes })
    }

    /// Load a snapshot captured as JSON
    pub fn load(path: &Path) -> BoardResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Write the snapshot as JSON
    pub fn save(&self, path: &Path) -> BoardResult<()> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// All nodes in document order
    #[must_use]
    pub fn nodes(&self) -> &[DomNode] {
        &self.nodes
    }

    /// Node by index
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&DomNode> {
        self.nodes.get(id)
    }

    /// Number of nodes
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the snapshot is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The node itself followed by each captured ancestor, nearest first
    pub fn ancestors_inclusive(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.get(id).map(|_| id), move |&current| {
            self.nodes.get(current).and_then(|n| n.parent)
        })
    }

    /// Whether `node` sits strictly below `ancestor`
    #[must_use]
    pub fn is_descendant(&self, node: NodeId, ancestor: NodeId) -> bool {
        node != ancestor && self.ancestors_inclusive(node).any(|a| a == ancestor)
    }

    /// Strict descendants of `id` in document order
    pub fn descendants(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        // Descendants always follow their ancestor in document order.
        (id + 1..self.nodes.len()).filter(move |&n| self.is_descendant(n, id))
    }

    /// Nodes matching the selector, in document order
    pub fn matching<'a>(
        &'a self,
        selector: &'a CardSelector,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, n)| selector.matches(n))
            .map(|(id, _)| id)
    }

    /// Nearest node, starting at `id` itself, matching any of the selectors
    #[must_use]
    pub fn closest(&self, id: NodeId, selectors: &[CardSelector]) -> Option<NodeId> {
        self.ancestors_inclusive(id)
            .find(|&a| selectors.iter().any(|s| s.matches(&self.nodes[a])))
    }

    /// Nodes whose trimmed text equals `text` exactly, in document order
    pub fn find_exact_text<'a>(&'a self, text: &'a str) -> impl Iterator<Item = NodeId> + 'a {
        let wanted = text.trim();
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, n)| n.trimmed_text() == wanted)
            .map(|(id, _)| id)
    }
}

impl TryFrom<Vec<DomNode>> for NodeSnapshot {
    type Error = BoardError;

    fn try_from(nodes: Vec<DomNode>) -> Result<Self, Self::Error> {
        Self::new(nodes)
    }
}

impl From<NodeSnapshot> for Vec<DomNode> {
    fn from(snapshot: NodeSnapshot) -> Self {
        snapshot.nodes
    }
}

/// Incremental builder for hand-assembled snapshots
///
/// Used by tests and by fakes of the browser boundary.
#[derive(Debug, Clone, Default)]
pub struct SnapshotBuilder {
    nodes: Vec<DomNode>,
}

impl SnapshotBuilder {
    /// Create an empty builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a root-level node and return its index
    pub fn root(&mut self, node: DomNode) -> NodeId {
        self.push(None, node)
    }

    /// Append a child of `parent` and return its index
    pub fn child(&mut self, parent: NodeId, node: DomNode) -> NodeId {
        self.push(Some(parent), node)
    }

    fn push(&mut self, parent: Option<NodeId>, mut node: DomNode) -> NodeId {
        node.parent = parent;
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Validate and finish
    pub fn build(self) -> BoardResult<NodeSnapshot> {
        NodeSnapshot::new(self.nodes)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn sample() -> (NodeSnapshot, NodeId, NodeId, NodeId, NodeId) {
        let mut b = SnapshotBuilder::new();
        let board = b.root(DomNode::new("section"));
        let card = b.child(
            board,
            DomNode::new("div").with_attributes([("role", "listitem")]),
        );
        let title = b.child(card, DomNode::new("span").with_text("Fix login"));
        let other = b.root(DomNode::new("div").with_text("elsewhere"));
        (b.build().unwrap(), board, card, title, other)
    }

    #[test]
    fn test_rejects_forward_parent() {
        let nodes = vec![DomNode::new("div").with_parent(1), DomNode::new("div")];
        assert!(matches!(
            NodeSnapshot::new(nodes),
            Err(BoardError::InvalidSnapshot { .. })
        ));
    }

    #[test]
    fn test_rejects_self_parent() {
        let nodes = vec![DomNode::new("div").with_parent(0)];
        assert!(NodeSnapshot::new(nodes).is_err());
    }

    #[test]
    fn test_ancestors_nearest_first() {
        let (snap, board, card, title, _) = sample();
        let chain: Vec<_> = snap.ancestors_inclusive(title).collect();
        assert_eq!(chain, vec![title, card, board]);
    }

    #[test]
    fn test_descendants_exclude_self_and_strangers() {
        let (snap, board, card, title, other) = sample();
        let desc: Vec<_> = snap.descendants(board).collect();
        assert_eq!(desc, vec![card, title]);
        assert!(!snap.is_descendant(other, board));
        assert!(!snap.is_descendant(board, board));
    }

    #[test]
    fn test_closest_includes_self() {
        let (snap, _, card, title, _) = sample();
        let sel = CardSelector::parse(r#"[role="listitem"]"#).unwrap();
        assert_eq!(snap.closest(title, std::slice::from_ref(&sel)), Some(card));
        assert_eq!(snap.closest(card, std::slice::from_ref(&sel)), Some(card));
    }

    #[test]
    fn test_find_exact_text_is_not_substring() {
        let (snap, _, _, title, _) = sample();
        assert_eq!(snap.find_exact_text("Fix login").collect::<Vec<_>>(), vec![title]);
        assert_eq!(snap.find_exact_text("Fix").count(), 0);
    }

    #[test]
    fn test_json_round_trip_validates() {
        let json = r#"[{"tag":"div"},{"tag":"span","parent":0,"text":"x"}]"#;
        let snap: NodeSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snap.len(), 2);
        let bad = r#"[{"tag":"span","parent":3}]"#;
        assert!(serde_json::from_str::<NodeSnapshot>(bad).is_err());
    }

    #[test]
    fn test_save_and_load() {
        let (snap, ..) = sample();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.json");
        snap.save(&path).unwrap();
        assert_eq!(NodeSnapshot::load(&path).unwrap(), snap);
    }
}
