//! Card selectors: the structural classes that usually denote one work item.
//!
//! Only a small CSS subset is understood, enough to name a card container:
//! a tag, `.class` parts and `[attr="value"]` parts, in any combination
//! (`div.BoardCard[role="listitem"]`). Combinators and pseudo-classes are
//! rejected.

use crate::result::{BoardError, BoardResult};
use crate::snapshot::DomNode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default ordered list of card container selectors
pub const DEFAULT_CARD_SELECTORS: &[&str] = &[
    r#"[role="listitem"]"#,
    ".BoardCard",
    ".TaskCard",
    ".ThemeableCardPresentation",
    ".TaskRow",
    ".ItemRow",
];

/// Tags whose text counts as card content during bulk extraction
pub const CARD_TEXT_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "span", "div", "button", "a"];

/// Tags whose text counts as tag candidates during targeted extraction
pub const ANCHOR_TEXT_TAGS: &[&str] = &["span", "div", "button", "a"];

/// Tag of the generic container used when no card ancestor exists
pub const FALLBACK_CONTAINER_TAG: &str = "div";

/// One attribute constraint
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttrMatch {
    /// Attribute name
    pub name: String,
    /// Required value, or `None` for presence only
    pub value: Option<String>,
}

/// A compound selector matched against a single node
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CardSelector {
    source: String,
    tag: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatch>,
}

impl CardSelector {
    /// Parse a selector
    pub fn parse(source: &str) -> BoardResult<Self> {
        let source = source.trim();
        let err = |message: &str| BoardError::InvalidSelector {
            selector: source.to_string(),
            message: message.to_string(),
        };
        if source.is_empty() {
            return Err(err("selector is empty"));
        }

        let mut tag = None;
        let mut classes = Vec::new();
        let mut attrs = Vec::new();
        let mut rest = source;

        let tag_len = rest
            .find(|c: char| c == '.' || c == '[')
            .unwrap_or(rest.len());
        if tag_len > 0 {
            let name = &rest[..tag_len];
            if !is_ident(name) {
                return Err(err("unsupported tag or combinator"));
            }
            tag = Some(name.to_ascii_lowercase());
            rest = &rest[tag_len..];
        }

        while !rest.is_empty() {
            if let Some(after) = rest.strip_prefix('.') {
                let len = after
                    .find(|c: char| c == '.' || c == '[')
                    .unwrap_or(after.len());
                let class = &after[..len];
                if !is_ident(class) {
                    return Err(err("invalid class name"));
                }
                classes.push(class.to_string());
                rest = &after[len..];
            } else if let Some(after) = rest.strip_prefix('[') {
                let close = after.find(']').ok_or_else(|| err("unclosed attribute"))?;
                attrs.push(parse_attr(&after[..close]).ok_or_else(|| err("invalid attribute"))?);
                rest = &after[close + 1..];
            } else {
                return Err(err("unsupported syntax"));
            }
        }

        Ok(Self {
            source: source.to_string(),
            tag,
            classes,
            attrs,
        })
    }

    /// Selector for a bare tag name
    #[must_use]
    pub fn tag(name: &str) -> Self {
        Self {
            source: name.to_ascii_lowercase(),
            tag: Some(name.to_ascii_lowercase()),
            classes: Vec::new(),
            attrs: Vec::new(),
        }
    }

    /// The default card selector list
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        DEFAULT_CARD_SELECTORS
            .iter()
            .filter_map(|s| Self::parse(s).ok())
            .collect()
    }

    /// Parse a list of selectors, failing on the first bad one
    pub fn parse_all<S: AsRef<str>>(sources: &[S]) -> BoardResult<Vec<Self>> {
        sources.iter().map(|s| Self::parse(s.as_ref())).collect()
    }

    /// Whether the node satisfies every part of the selector
    #[must_use]
    pub fn matches(&self, node: &DomNode) -> bool {
        if let Some(ref tag) = self.tag {
            if !node.tag.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if !self
            .classes
            .iter()
            .all(|c| node.classes.iter().any(|nc| nc == c))
        {
            return false;
        }
        self.attrs.iter().all(|a| match node.attributes.get(&a.name) {
            Some(actual) => a.value.as_ref().map_or(true, |v| v == actual),
            None => false,
        })
    }

    /// Source text, valid for `document.querySelectorAll`
    #[must_use]
    pub fn as_css(&self) -> &str {
        &self.source
    }
}

fn is_ident(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn parse_attr(body: &str) -> Option<AttrMatch> {
    let body = body.trim();
    match body.split_once('=') {
        None => is_ident(body).then(|| AttrMatch {
            name: body.to_ascii_lowercase(),
            value: None,
        }),
        Some((name, value)) => {
            let name = name.trim();
            if !is_ident(name) {
                return None;
            }
            let value = value.trim();
            let unquoted = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(value);
            if unquoted.contains(['"', '\'']) {
                return None;
            }
            Some(AttrMatch {
                name: name.to_ascii_lowercase(),
                value: Some(unquoted.to_string()),
            })
        }
    }
}

impl FromStr for CardSelector {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CardSelector {
    type Error = BoardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CardSelector> for String {
    fn from(selector: CardSelector) -> Self {
        selector.source
    }
}

impl fmt::Display for CardSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn node(tag: &str, classes: &[&str], attrs: &[(&str, &str)]) -> DomNode {
        DomNode::new(tag)
            .with_classes(classes.iter().copied())
            .with_attributes(attrs.iter().copied())
    }

    mod parse_tests {
        use super::*;

        #[test]
        fn test_defaults_all_parse() {
            assert_eq!(CardSelector::defaults().len(), DEFAULT_CARD_SELECTORS.len());
        }

        #[test]
        fn test_compound() {
            let sel = CardSelector::parse(r#"div.BoardCard[role="listitem"]"#).unwrap();
            assert!(sel.matches(&node("div", &["BoardCard", "x"], &[("role", "listitem")])));
            assert!(!sel.matches(&node("span", &["BoardCard"], &[("role", "listitem")])));
            assert!(!sel.matches(&node("div", &["BoardCard"], &[])));
        }

        #[test]
        fn test_unquoted_and_presence_attrs() {
            let sel = CardSelector::parse("[role=listitem]").unwrap();
            assert!(sel.matches(&node("li", &[], &[("role", "listitem")])));
            let presence = CardSelector::parse("[data-task]").unwrap();
            assert!(presence.matches(&node("div", &[], &[("data-task", "")])));
        }

        #[test]
        fn test_rejects_combinators() {
            assert!(CardSelector::parse("div > span").is_err());
            assert!(CardSelector::parse("a:has(span)").is_err());
            assert!(CardSelector::parse("[role=\"x\"").is_err());
            assert!(CardSelector::parse("").is_err());
        }

        #[test]
        fn test_display_round_trips_source() {
            let sel: CardSelector = ".TaskRow".parse().unwrap();
            assert_eq!(sel.to_string(), ".TaskRow");
            assert_eq!(sel.as_css(), ".TaskRow");
        }
    }

    mod match_tests {
        use super::*;

        #[test]
        fn test_class_is_case_sensitive() {
            let sel = CardSelector::parse(".BoardCard").unwrap();
            assert!(!sel.matches(&node("div", &["boardcard"], &[])));
        }

        #[test]
        fn test_tag_is_case_insensitive() {
            let sel = CardSelector::tag("DIV");
            assert!(sel.matches(&node("div", &[], &[])));
        }
    }
}
