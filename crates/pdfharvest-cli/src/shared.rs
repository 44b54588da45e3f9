//! Helpers shared by the subcommand runners.

use std::path::Path;

use pdfharvest::Document;

/// Open a PDF for extraction, reporting failures to stderr.
pub fn open_document(file: &Path, password: Option<&str>) -> Result<Document, i32> {
    let bytes = std::fs::read(file).map_err(|e| {
        eprintln!("Error reading {}: {e}", file.display());
        1
    })?;

    let result = match password {
        Some(pw) => Document::open_with_password(&bytes, pw.as_bytes()),
        None => Document::open(&bytes),
    };
    result.map_err(|e| {
        eprintln!("Error opening {}: {e}", file.display());
        1
    })
}
