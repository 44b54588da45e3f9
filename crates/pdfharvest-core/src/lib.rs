//! pdfharvest-core: Backend-independent data types and algorithms.
//!
//! This crate provides the section schema model, positioned text
//! runs, grid detection, row normalization, and the nested result
//! value used by pdfharvest-rs. It knows nothing about PDF bytes —
//! backends feed it positioned text and ruling geometry.

mod config;
mod error;
mod geometry;
mod grid;
mod rows;
mod runs;
mod schema;
mod value;

pub use config::ConfigNode;
pub use error::SchemaError;
pub use geometry::{BBox, Edge, Orientation};
pub use grid::{Grid, Strategy, detect, has_ruled_grid};
pub use rows::{
    NormalizedRow, RowTransformer, TransformError, TransformerRegistry, normalize,
};
pub use runs::{CONTAIN_TOLERANCE, LINE_Y_TOLERANCE, TextRun, cluster_into_lines, runs_within};
pub use schema::{Anchor, Section, TableKind};
pub use value::SectionValue;
