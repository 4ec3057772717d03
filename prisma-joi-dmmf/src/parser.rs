//! Loading of generator options and DMMF documents from JSON.

use std::path::Path;

use tracing::debug;

use crate::ast::{Document, GeneratorOptions};
use crate::error::{DmmfError, DmmfResult};

/// Parse a generator options document from a JSON string.
pub fn parse_options(content: &str) -> DmmfResult<GeneratorOptions> {
    let options: GeneratorOptions = serde_json::from_str(content)
        .map_err(|e| DmmfError::json("invalid generator options", e))?;

    debug!(
        models = options.dmmf.datamodel.models.len(),
        input_types = options.dmmf.schema.input_object_types.len(),
        enums = options.dmmf.schema.enum_types.len(),
        "parsed generator options"
    );

    Ok(options)
}

/// Parse a bare DMMF document from a JSON string.
pub fn parse_document(content: &str) -> DmmfResult<Document> {
    serde_json::from_str(content).map_err(|e| DmmfError::json("invalid DMMF document", e))
}

/// Load generator options from a file path.
pub fn load_options(path: impl AsRef<Path>) -> DmmfResult<GeneratorOptions> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| DmmfError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_options(&content)
}
