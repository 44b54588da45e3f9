//! pdfharvest-parse: PDF document source for pdfharvest-rs.
//!
//! Decodes PDF bytes with lopdf and exposes each page as positioned
//! text runs plus ruling geometry, behind the [`DocumentSource`]
//! trait. Section location and extraction live in the `pdfharvest`
//! crate; this crate knows nothing about schemas or sections.

mod error;
mod lopdf_source;
mod source;
mod widths;

pub use error::ParseError;
pub use lopdf_source::LopdfSource;
pub use source::{DocumentSource, PageText};
