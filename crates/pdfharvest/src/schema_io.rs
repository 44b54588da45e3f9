//! Schema loading: YAML file → generic config tree → section tree.
//!
//! Only the YAML-to-[`ConfigNode`] conversion lives here; the section
//! builder itself is format-agnostic and lives in `pdfharvest-core`.

use std::path::Path;

use pdfharvest_core::{ConfigNode, SchemaError, Section};
use serde_yaml::Value;

use crate::error::ExtractError;

/// Load a section tree from a YAML schema file.
///
/// # Errors
///
/// A missing file surfaces as [`SchemaError::NotFound`]; unreadable
/// or structurally invalid YAML as [`SchemaError::Malformed`]. Both
/// abort the run before any page is touched.
pub fn load_schema_file(path: impl AsRef<Path>) -> Result<Section, ExtractError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SchemaError::NotFound(path.display().to_string()).into());
    }
    let text = std::fs::read_to_string(path).map_err(|e| ExtractError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(load_schema_str(&text)?)
}

/// Load a section tree from YAML schema text. The root section is
/// named `root` and acts as a container for the declared sections.
pub fn load_schema_str(text: &str) -> Result<Section, SchemaError> {
    let value: Value =
        serde_yaml::from_str(text).map_err(|e| SchemaError::Malformed(e.to_string()))?;
    let node = yaml_to_config(&value)?;
    Section::from_config("root", &node)
}

fn yaml_to_config(value: &Value) -> Result<ConfigNode, SchemaError> {
    match value {
        Value::Mapping(mapping) => {
            let mut entries = Vec::with_capacity(mapping.len());
            for (key, value) in mapping {
                let Value::String(key) = key else {
                    return Err(SchemaError::Malformed(format!(
                        "non-string schema key: {key:?}"
                    )));
                };
                // Null values mean "field not set", same as absence.
                if value.is_null() {
                    continue;
                }
                entries.push((key.clone(), yaml_to_config(value)?));
            }
            Ok(ConfigNode::Map(entries))
        }
        Value::String(s) => Ok(ConfigNode::Text(s.clone())),
        Value::Number(n) => Ok(ConfigNode::Number(n.as_f64().unwrap_or(0.0))),
        Value::Bool(b) => Ok(ConfigNode::Text(b.to_string())),
        other => Err(SchemaError::Malformed(format!(
            "unsupported schema value: {other:?}"
        ))),
    }
}
