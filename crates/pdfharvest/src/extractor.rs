//! The extraction engine: a depth-first walk over the section tree.
//!
//! For every section with boundary identifiers the engine locates the
//! region, detects its cell grid, normalizes and shapes the rows, and
//! recurses into children; results merge bottom-up into one nested
//! value. A page cursor travels through the walk inside an explicit
//! [`ExtractContext`]: each located region advances it to its last
//! page, and later siblings and children resume searching there,
//! exploiting the fact that sections are declared in document order.

use indexmap::IndexMap;
use log::{info, warn};
use pdfharvest_core::{
    Edge, NormalizedRow, RowTransformer, Section, SectionValue, Strategy, TableKind,
    TransformerRegistry, detect, normalize, runs_within,
};

use crate::document::Document;
use crate::error::ExtractError;
use crate::locator::{PageArea, SectionLocator};
use crate::schema_io;

/// Per-run state threaded through the recursive walk. Owned by one
/// extraction run; never shared across runs.
struct ExtractContext {
    /// 1-based page where the next section search begins.
    cursor: usize,
}

/// Schema-driven extractor over PDF documents.
///
/// Holds the section tree, the registered correction hooks, and the
/// grid strategy. One extractor can process any number of documents;
/// each [`extract`](Extractor::extract) call is independent.
pub struct Extractor {
    root: Section,
    registry: TransformerRegistry,
    strategy: Strategy,
}

impl Extractor {
    /// Build an extractor over an already-built section tree.
    pub fn new(root: Section) -> Self {
        Self {
            root,
            registry: TransformerRegistry::new(),
            strategy: Strategy::default(),
        }
    }

    /// Build an extractor from a YAML schema file.
    pub fn from_schema_file(path: impl AsRef<std::path::Path>) -> Result<Self, ExtractError> {
        Ok(Self::new(schema_io::load_schema_file(path)?))
    }

    /// Build an extractor from YAML schema text.
    pub fn from_schema_str(text: &str) -> Result<Self, ExtractError> {
        Ok(Self::new(schema_io::load_schema_str(text)?))
    }

    /// Use the given grid-detection strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Register a correction hook for the named section. The hook
    /// runs during row normalization; a failing hook falls back to
    /// the uncorrected rows.
    pub fn register_transformer(
        &mut self,
        section_name: impl Into<String>,
        transformer: Box<dyn RowTransformer>,
    ) {
        self.registry.register(section_name, transformer);
    }

    /// The section tree this extractor walks.
    pub fn root(&self) -> &Section {
        &self.root
    }

    /// End-to-end extraction from a PDF file on disk.
    pub fn extract_file(
        &self,
        path: impl AsRef<std::path::Path>,
    ) -> Result<SectionValue, ExtractError> {
        let document = Document::open_file(path)?;
        Ok(self.extract(&document))
    }

    /// End-to-end extraction from PDF bytes.
    pub fn extract_bytes(&self, bytes: &[u8]) -> Result<SectionValue, ExtractError> {
        let document = Document::open(bytes)?;
        Ok(self.extract(&document))
    }

    /// Extract the section tree from an opened document.
    ///
    /// Never fails: sections that cannot be located contribute empty
    /// nodes and extraction continues. Running twice over the same
    /// document yields identical results.
    pub fn extract(&self, document: &Document) -> SectionValue {
        let mut ctx = ExtractContext { cursor: 1 };
        self.extract_node(&self.root, document, &mut ctx)
    }

    fn extract_node(
        &self,
        section: &Section,
        document: &Document,
        ctx: &mut ExtractContext,
    ) -> SectionValue {
        let mut fields: IndexMap<String, SectionValue> = IndexMap::new();
        let mut records: Vec<IndexMap<String, String>> = Vec::new();

        if section.has_boundaries() {
            let areas = SectionLocator::new(section).locate(document, ctx.cursor);
            if areas.is_empty() {
                info!("section '{}' was not found", section.name);
            } else {
                match section.table_kind {
                    TableKind::Horizontal => {
                        let rows = self.region_rows(section, document, &areas);
                        shape_horizontal(section, &rows, &mut fields);
                    }
                    TableKind::Vertical => {
                        let rows = self.region_rows(section, document, &areas);
                        records = shape_vertical(section, &rows);
                    }
                    TableKind::None => {}
                }
                ctx.cursor = areas.last().expect("areas is non-empty").page_number;
            }
        }

        for child in &section.children {
            let value = self.extract_node(child, document, ctx);
            fields.insert(child.key(), value);
        }

        if !fields.is_empty() {
            SectionValue::Map(fields)
        } else {
            SectionValue::Records(records)
        }
    }

    /// Collect and normalize the rows of a located region: grid
    /// detection per rectangle, rows concatenated in region order,
    /// then the section's correction hook.
    fn region_rows(
        &self,
        section: &Section,
        document: &Document,
        areas: &[PageArea],
    ) -> Vec<NormalizedRow> {
        let mut raw_rows = Vec::new();
        for area in areas {
            let Some(page) = document.page(area.page_number) else {
                continue;
            };
            let runs = runs_within(&page.runs, &area.bbox);
            let edges: Vec<Edge> = page
                .rulings
                .iter()
                .filter(|e| e.intersects(&area.bbox))
                .map(|e| e.clipped_to(&area.bbox))
                .collect();
            for grid in detect(&runs, &edges, self.strategy) {
                raw_rows.extend(grid.rows);
            }
        }
        normalize(raw_rows, self.registry.get(&section.name), &section.name)
    }
}

/// Whether a row reproduces an excluded boundary identifier and must
/// not appear in the shaped output.
fn is_excluded_boundary_row(section: &Section, row: &NormalizedRow) -> bool {
    let text = row.to_simple_string();
    (!section.top_included && section.top.iter().any(|a| a.matches(&text)))
        || (!section.bottom_included && section.bottom.iter().any(|a| a.matches(&text)))
}

/// Horizontal shaping: first non-blank cell keys the row, the rest is
/// its value. Later rows with the same key overwrite earlier ones.
fn shape_horizontal(
    section: &Section,
    rows: &[NormalizedRow],
    fields: &mut IndexMap<String, SectionValue>,
) {
    for row in rows {
        if is_excluded_boundary_row(section, row) {
            continue;
        }
        let mut cells = row
            .texts
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty());
        let Some(key) = cells.next() else {
            continue;
        };
        let value = cells.collect::<Vec<_>>().join(" ");
        fields.insert(key.replace(' ', "_"), SectionValue::Text(value));
    }
}

/// Vertical shaping: the first non-blank row is the header, later
/// rows become records keyed by it. Rows whose cell count disagrees
/// with the header are dropped.
fn shape_vertical(section: &Section, rows: &[NormalizedRow]) -> Vec<IndexMap<String, String>> {
    let mut iter = rows.iter();
    let header: Vec<String> = loop {
        match iter.next() {
            Some(row) if row.texts.iter().any(|t| !t.trim().is_empty()) => {
                break row.texts.iter().map(|t| t.trim().replace(' ', "_")).collect();
            }
            Some(_) => {}
            None => return Vec::new(),
        }
    };

    let mut records = Vec::new();
    for row in iter {
        if row.texts.iter().all(|t| t.trim().is_empty()) {
            continue;
        }
        if is_excluded_boundary_row(section, row) {
            continue;
        }
        if row.size() != header.len() {
            warn!(
                "section '{}': row has {} cells but the header has {}; dropping row",
                section.name,
                row.size(),
                header.len()
            );
            continue;
        }
        let record: IndexMap<String, String> = header
            .iter()
            .cloned()
            .zip(row.texts.iter().map(|t| t.trim().to_string()))
            .collect();
        records.push(record);
    }
    records
}
