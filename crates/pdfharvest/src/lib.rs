//! pdfharvest: schema-driven extraction of semi-structured data from
//! PDF documents.
//!
//! A schema declares, as a nested tree, which anchor texts bound each
//! logical section of a document ("Table 7:", "Total Assets", …),
//! whether a section is a horizontal or vertical table, and which
//! sub-sections it contains. The extractor locates each section's
//! rectangles — possibly spanning several pages — detects the cell
//! grid inside them, and folds the whole tree into one nested value
//! of maps, record lists, and strings.
//!
//! # Example
//!
//! ```no_run
//! use pdfharvest::Extractor;
//!
//! let extractor = Extractor::from_schema_file("report.schema.yaml")?;
//! let result = extractor.extract_file("report.pdf")?;
//! println!("{}", serde_json::to_string_pretty(&result).unwrap());
//! # Ok::<(), pdfharvest::ExtractError>(())
//! ```
//!
//! Extraction is deliberately forgiving: only a broken schema or an
//! undecodable document fails the run. A section whose anchors never
//! match contributes an empty node, and per-section correction hooks
//! (see [`Extractor::register_transformer`]) may clean up rows without
//! ever being able to abort extraction.

mod document;
mod error;
mod extractor;
mod locator;
mod schema_io;

pub use document::Document;
pub use error::ExtractError;
pub use extractor::Extractor;
pub use locator::{PageArea, SectionLocator};
pub use schema_io::{load_schema_file, load_schema_str};

// Core data model, re-exported for callers.
pub use pdfharvest_core::{
    Anchor, BBox, ConfigNode, NormalizedRow, RowTransformer, SchemaError, Section, SectionValue,
    Strategy, TableKind, TextRun, TransformError, TransformerRegistry,
};

// Document source layer, re-exported for custom backends.
pub use pdfharvest_parse::{DocumentSource, LopdfSource, PageText, ParseError};
