//! Top-level document type for opening and extracting content.

use pdfharvest_parse::{DocumentSource, LopdfSource, PageText, ParseError};

use crate::error::ExtractError;

/// A document opened for extraction.
///
/// Pages are materialized up front: the section locator scans runs
/// page by page, possibly several times per run, and anchor searches
/// must see a stable view of the document.
pub struct Document {
    pages: Vec<PageText>,
}

impl Document {
    /// Open a PDF document from bytes. Encrypted input is tried with
    /// the empty password automatically.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the bytes are not a decodable PDF.
    pub fn open(bytes: &[u8]) -> Result<Self, ParseError> {
        Self::from_source(&LopdfSource::open(bytes)?)
    }

    /// Open an encrypted PDF document from bytes with a password. The
    /// password is ignored for unencrypted input.
    pub fn open_with_password(bytes: &[u8], password: &[u8]) -> Result<Self, ParseError> {
        Self::from_source(&LopdfSource::open_with_password(bytes, password)?)
    }

    /// Open a PDF document from a file path.
    pub fn open_file(path: impl AsRef<std::path::Path>) -> Result<Self, ExtractError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| ExtractError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(Self::open(&bytes)?)
    }

    /// Materialize every page of a [`DocumentSource`].
    pub fn from_source(source: &dyn DocumentSource) -> Result<Self, ParseError> {
        let mut pages = Vec::with_capacity(source.page_count());
        for number in 1..=source.page_count() {
            pages.push(source.page(number)?);
        }
        Ok(Self { pages })
    }

    /// Build a document directly from pages. Pages are renumbered
    /// sequentially from 1 in the order given.
    pub fn from_pages(mut pages: Vec<PageText>) -> Self {
        for (index, page) in pages.iter_mut().enumerate() {
            page.page_number = index + 1;
        }
        Self { pages }
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Access a page by 1-based number.
    pub fn page(&self, number: usize) -> Option<&PageText> {
        number.checked_sub(1).and_then(|i| self.pages.get(i))
    }

    /// All pages in order.
    pub fn pages(&self) -> &[PageText] {
        &self.pages
    }
}
