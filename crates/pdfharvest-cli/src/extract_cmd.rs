use std::path::Path;

use pdfharvest::Extractor;

use crate::cli::StrategyArg;
use crate::shared::open_document;

pub fn run(
    file: &Path,
    schema: &Path,
    strategy: &StrategyArg,
    pretty: bool,
    password: Option<&str>,
) -> Result<(), i32> {
    let extractor = Extractor::from_schema_file(schema)
        .map_err(|e| {
            eprintln!("Error loading schema {}: {e}", schema.display());
            2
        })?
        .with_strategy(strategy.to_strategy());

    let document = open_document(file, password)?;
    let result = extractor.extract(&document);

    let json = if pretty {
        serde_json::to_string_pretty(&result)
    } else {
        serde_json::to_string(&result)
    }
    .map_err(|e| {
        eprintln!("Error serializing result: {e}");
        1
    })?;
    println!("{json}");
    Ok(())
}
