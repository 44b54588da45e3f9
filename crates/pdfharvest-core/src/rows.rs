//! Normalized rows and per-section correction hooks.
//!
//! A grid detector hands back raw cell text; [`normalize`] turns it
//! into [`NormalizedRow`]s and runs the section's correction hook, if
//! one is registered. Hooks are best-effort: a failing hook logs and
//! falls back to the uncorrected rows, it never aborts extraction.

use std::collections::HashMap;
use std::fmt;

use log::error;

/// Column width used by [`NormalizedRow::to_tabular_string`].
const STANDARDISED_LENGTH: usize = 30;

/// An ordered sequence of text cells. Sizes may vary row to row;
/// mismatches are a downstream concern.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow {
    pub texts: Vec<String>,
}

impl NormalizedRow {
    pub fn new(texts: Vec<String>) -> Self {
        Self { texts }
    }

    pub fn get(&self, column: usize) -> Option<&str> {
        self.texts.get(column).map(String::as_str)
    }

    pub fn size(&self) -> usize {
        self.texts.len()
    }

    /// All cells trimmed and joined with single spaces. This is the
    /// text the engine matches against boundary identifiers.
    pub fn to_simple_string(&self) -> String {
        self.texts
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Fixed-width presentation for visually aligning columns in logs:
    /// each cell padded symmetrically with spaces, or truncated, to a
    /// constant width.
    pub fn to_tabular_string(&self) -> String {
        self.texts
            .iter()
            .map(|t| pad_or_truncate(t, STANDARDISED_LENGTH))
            .collect::<Vec<_>>()
            .join("|")
    }
}

impl fmt::Display for NormalizedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.texts.join("  |  "))
    }
}

fn pad_or_truncate(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len > width {
        return text.chars().take(width).collect();
    }
    let left = (width - len) / 2;
    let right = width - len - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

/// Error raised by a correction hook. Never propagates past
/// [`normalize`].
#[derive(Debug, Clone, PartialEq)]
pub struct TransformError(pub String);

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for TransformError {}

/// A per-section row correction. May reshape, merge, split, or drop
/// rows.
pub trait RowTransformer {
    fn transform(&self, rows: &[NormalizedRow]) -> Result<Vec<Vec<String>>, TransformError>;
}

impl<F> RowTransformer for F
where
    F: Fn(&[NormalizedRow]) -> Result<Vec<Vec<String>>, TransformError>,
{
    fn transform(&self, rows: &[NormalizedRow]) -> Result<Vec<Vec<String>>, TransformError> {
        self(rows)
    }
}

/// Named registry of row transformers, keyed by section name. The
/// extraction engine looks hooks up here and never depends on a
/// concrete hook implementation.
#[derive(Default)]
pub struct TransformerRegistry {
    transformers: HashMap<String, Box<dyn RowTransformer>>,
}

impl TransformerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, section_name: impl Into<String>, transformer: Box<dyn RowTransformer>) {
        self.transformers.insert(section_name.into(), transformer);
    }

    pub fn get(&self, section_name: &str) -> Option<&dyn RowTransformer> {
        self.transformers.get(section_name).map(Box::as_ref)
    }
}

/// Turn raw grid rows into normalized rows, applying the correction
/// hook when one is given.
pub fn normalize(
    raw_rows: Vec<Vec<String>>,
    hook: Option<&dyn RowTransformer>,
    section_name: &str,
) -> Vec<NormalizedRow> {
    let rows: Vec<NormalizedRow> = raw_rows.into_iter().map(NormalizedRow::new).collect();
    let Some(hook) = hook else {
        return rows;
    };
    match hook.transform(&rows) {
        Ok(corrected) => corrected.into_iter().map(NormalizedRow::new).collect(),
        Err(err) => {
            error!("correction hook for section '{section_name}' failed: {err}; using uncorrected rows");
            rows
        }
    }
}
