//! Top-level error type.
//!
//! Only two failures abort a run: a broken schema and an undecodable
//! document. Everything below the document level — a section that is
//! never found, a truncated multi-page region, a failing correction
//! hook, a malformed table row — is recovered locally and logged.

use pdfharvest_core::SchemaError;
use pdfharvest_parse::ParseError;
use thiserror::Error;

/// Fatal errors from the end-to-end extraction entry points.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The schema is missing or unparseable.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The document bytes cannot be decoded.
    #[error(transparent)]
    Document(#[from] ParseError),

    /// A resource file could not be read.
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
