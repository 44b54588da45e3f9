//! The document-source contract.
//!
//! A [`DocumentSource`] exposes page count and, per page, the
//! positioned text runs and ruling geometry the locator and grid
//! detector work with. The lopdf-backed implementation lives in
//! [`crate::LopdfSource`]; tests substitute in-memory sources.

use pdfharvest_core::{BBox, Edge, TextRun};

use crate::error::ParseError;

/// Extracted text and geometry of one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageText {
    /// 1-based page number.
    pub page_number: usize,
    /// Page width in points.
    pub width: f64,
    /// Page height in points.
    pub height: f64,
    /// Word-level text runs in reading order (top-to-bottom,
    /// left-to-right), in top-left page coordinates.
    pub runs: Vec<TextRun>,
    /// Ruling edges derived from painted lines and rectangles.
    pub rulings: Vec<Edge>,
}

impl PageText {
    /// The page's own bounds.
    pub fn bbox(&self) -> BBox {
        BBox::new(0.0, 0.0, self.width, self.height)
    }
}

/// Abstracts document decoding: page count plus per-page text runs
/// and geometry.
pub trait DocumentSource {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Extract one page by 1-based number.
    fn page(&self, number: usize) -> Result<PageText, ParseError>;
}
