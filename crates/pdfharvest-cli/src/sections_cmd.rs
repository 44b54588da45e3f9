use std::path::Path;

use pdfharvest::{Document, Section, SectionLocator, load_schema_file};

use crate::shared::open_document;

pub fn run(file: &Path, schema: &Path, password: Option<&str>) -> Result<(), i32> {
    let root = load_schema_file(schema).map_err(|e| {
        eprintln!("Error loading schema {}: {e}", schema.display());
        2
    })?;
    let document = open_document(file, password)?;

    // Mirror the engine's cursor behavior so the report shows where
    // each section would actually be searched for.
    let mut cursor = 1;
    for child in &root.children {
        report(child, &document, &mut cursor, 0);
    }
    Ok(())
}

fn report(section: &Section, document: &Document, cursor: &mut usize, depth: usize) {
    let indent = depth * 2;
    if section.has_boundaries() {
        let areas = SectionLocator::new(section).locate(document, *cursor);
        if areas.is_empty() {
            println!("{:indent$}{}: not found", "", section.name);
        } else {
            for area in &areas {
                println!(
                    "{:indent$}{}: page {} [{:.2}, {:.2}, {:.2}, {:.2}]",
                    "",
                    section.name,
                    area.page_number,
                    area.bbox.x0,
                    area.bbox.top,
                    area.bbox.x1,
                    area.bbox.bottom,
                );
            }
            if let Some(last) = areas.last() {
                *cursor = last.page_number;
            }
        }
    } else {
        println!("{:indent$}{} (container)", "", section.name);
    }

    for child in &section.children {
        report(child, document, cursor, depth + 1);
    }
}
