//! The nested result produced by an extraction run.

use indexmap::IndexMap;

/// One node of the extraction result.
///
/// Horizontal sections and containers produce [`Map`](SectionValue::Map)
/// nodes; vertical sections produce [`Records`](SectionValue::Records);
/// individual field values are [`Text`](SectionValue::Text). Maps keep
/// insertion order so serialized output follows document order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum SectionValue {
    /// A single extracted field value.
    Text(String),
    /// Field/section name to value, in insertion order.
    Map(IndexMap<String, SectionValue>),
    /// Records of a vertical table, keyed by its header row.
    Records(Vec<IndexMap<String, String>>),
}

impl SectionValue {
    pub fn empty_map() -> Self {
        SectionValue::Map(IndexMap::new())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            SectionValue::Text(t) => t.is_empty(),
            SectionValue::Map(m) => m.is_empty(),
            SectionValue::Records(r) => r.is_empty(),
        }
    }

    /// Look up a key in a map node.
    pub fn get(&self, key: &str) -> Option<&SectionValue> {
        match self {
            SectionValue::Map(m) => m.get(key),
            _ => None,
        }
    }

    pub fn as_records(&self) -> Option<&[IndexMap<String, String>]> {
        match self {
            SectionValue::Records(r) => Some(r),
            _ => None,
        }
    }
}
