//! The section tree: which anchor texts bound each region of a
//! document, and how the region's rows are shaped.
//!
//! A [`Section`] is built once per run from a [`ConfigNode`] tree and
//! is immutable afterwards. Identifier values carry an optional
//! trailing inclusion flag (`"Table 8:|false"`) and, for `top` and
//! `bottom`, `|`-separated alternatives; both encodings are decoded
//! here into explicit [`Anchor`] values and booleans.

use crate::config::ConfigNode;
use crate::error::SchemaError;

/// A literal text fragment used to find one boundary of a region.
#[derive(Debug, Clone, PartialEq)]
pub struct Anchor {
    pub text: String,
}

impl Anchor {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Whether a text run matches this anchor: the run equals the
    /// anchor text, starts with it, or ends with it.
    pub fn matches(&self, candidate: &str) -> bool {
        candidate == self.text
            || candidate.starts_with(&self.text)
            || candidate.ends_with(&self.text)
    }
}

/// How the rows of a located region are shaped into a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableKind {
    /// First non-empty cell of each row is a field name, the rest is
    /// its value.
    Horizontal,
    /// First non-blank row is a header; every later row is a record
    /// keyed by that header.
    Vertical,
    /// No row shaping; the section only bounds and contains children.
    #[default]
    None,
}

/// A declared, possibly nested, rule for locating and shaping one
/// logical piece of document content.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// Label and result key (spaces become underscores in the key).
    pub name: String,
    /// Top boundary alternatives, matched in declared order.
    pub top: Vec<Anchor>,
    /// Bottom boundary alternatives, matched in declared order.
    pub bottom: Vec<Anchor>,
    pub left: Option<Anchor>,
    pub right: Option<Anchor>,
    /// Top and left identifiers are usually field labels and belong to
    /// the region; bottom and right identifiers are usually the next
    /// section's label and do not.
    pub top_included: bool,
    pub left_included: bool,
    pub bottom_included: bool,
    pub right_included: bool,
    /// Overrides the measured top margin of middle/last pages when larger.
    pub top_margin: f64,
    /// Trimmed off the bottom of first/middle pages of a multi-page region.
    pub bottom_margin: f64,
    pub table_kind: TableKind,
    /// Child sections, processed in declared order.
    pub children: Vec<Section>,
}

impl Section {
    /// A section with the default boundary flags and no identifiers.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            top: Vec::new(),
            bottom: Vec::new(),
            left: None,
            right: None,
            top_included: true,
            left_included: true,
            bottom_included: false,
            right_included: false,
            top_margin: 0.0,
            bottom_margin: 0.0,
            table_kind: TableKind::None,
            children: Vec::new(),
        }
    }

    /// The result-map key for this section.
    pub fn key(&self) -> String {
        self.name.replace(' ', "_")
    }

    /// Whether any boundary identifier is configured. Sections without
    /// boundaries are pure containers and are never located.
    pub fn has_boundaries(&self) -> bool {
        !self.top.is_empty() || !self.bottom.is_empty() || self.left.is_some() || self.right.is_some()
    }

    /// Build a section tree from a configuration node.
    ///
    /// Nested map values become child sections; the scalar keys `top`,
    /// `bottom`, `left`, `right`, `top_margin`, `bottom_margin` and
    /// `type` populate this section's own fields. Unknown scalar keys
    /// are ignored.
    pub fn from_config(name: &str, node: &ConfigNode) -> Result<Section, SchemaError> {
        if name.trim().is_empty() {
            return Err(SchemaError::Malformed("section with empty name".into()));
        }
        if !node.is_map() {
            return Err(SchemaError::Malformed(format!(
                "section '{name}' is not a mapping"
            )));
        }

        let mut section = Section::new(name);

        for (key, value) in node.entries() {
            if value.is_map() {
                section.children.push(Section::from_config(key, value)?);
            }
        }

        if let Some((text, included)) = decode_identifier(node.get("top")) {
            section.top = split_alternatives(&text);
            section.top_included = included.unwrap_or(true);
        }
        if let Some((text, included)) = decode_identifier(node.get("bottom")) {
            section.bottom = split_alternatives(&text);
            section.bottom_included = included.unwrap_or(false);
        }
        if let Some((text, included)) = decode_identifier(node.get("left")) {
            section.left = Some(Anchor::new(text));
            section.left_included = included.unwrap_or(true);
        }
        if let Some((text, included)) = decode_identifier(node.get("right")) {
            section.right = Some(Anchor::new(text));
            section.right_included = included.unwrap_or(false);
        }

        section.top_margin = parse_margin(node.get("top_margin"));
        section.bottom_margin = parse_margin(node.get("bottom_margin"));
        section.table_kind = parse_table_kind(node.get("type"));

        Ok(section)
    }
}

/// Decode an identifier value into its text and optional inclusion flag.
///
/// If, after splitting on `|`, the final token case-insensitively
/// equals `true` or `false`, it is stripped and consumed as the flag;
/// otherwise the whole trimmed value is identifier text. Pipes left in
/// the text are alternative separators for `top`/`bottom`.
fn decode_identifier(node: Option<&ConfigNode>) -> Option<(String, Option<bool>)> {
    let raw = node?.as_text()?;
    let text = raw.trim();
    let items: Vec<&str> = text.split('|').collect();
    if items.len() >= 2 {
        let last = items[items.len() - 1].trim();
        let flag = if last.eq_ignore_ascii_case("true") {
            Some(true)
        } else if last.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        };
        if flag.is_some() {
            let cut = text.rfind('|').unwrap();
            return Some((text[..cut].trim().to_string(), flag));
        }
    }
    Some((text.to_string(), None))
}

/// Split identifier text into trimmed, non-empty alternatives.
fn split_alternatives(text: &str) -> Vec<Anchor> {
    text.split('|')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(Anchor::new)
        .collect()
}

/// Margins are best-effort tuning knobs: a malformed value silently
/// parses to 0 instead of failing the build.
fn parse_margin(node: Option<&ConfigNode>) -> f64 {
    node.and_then(|n| n.as_text())
        .and_then(|t| t.trim().parse::<f64>().ok())
        .unwrap_or(0.0)
        .max(0.0)
}

fn parse_table_kind(node: Option<&ConfigNode>) -> TableKind {
    match node {
        Some(ConfigNode::Number(n)) if *n == 0.0 => TableKind::Horizontal,
        Some(ConfigNode::Number(n)) if *n == 1.0 => TableKind::Vertical,
        Some(ConfigNode::Text(t)) if t.eq_ignore_ascii_case("horizontal") => TableKind::Horizontal,
        Some(ConfigNode::Text(t)) if t.eq_ignore_ascii_case("vertical") => TableKind::Vertical,
        _ => TableKind::None,
    }
}
