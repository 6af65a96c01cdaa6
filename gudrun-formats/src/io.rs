//! Whole-file load and save
//!
//! Files are decoded by [`DocumentLoader`], so legacy encodings are handled the same way
//! for every format. Structured extensions (`.yaml`, `.json`) pick their format directly;
//! anything else, `.txt` included, goes through [`detect_and_parse`], so a structured
//! document saved under a Gudrun file name still loads.

use crate::detect::detect_and_parse;
use crate::error::FormatError;
use crate::registry::FormatRegistry;
use gudrun_parser::gudrun::loader::apply_source_path;
use gudrun_parser::{Document, DocumentLoader};
use std::fs;
use std::path::Path;
use tracing::info;

/// Load a document from `path`. Returns the document and the name of its format.
pub fn load(
    registry: &FormatRegistry,
    path: impl AsRef<Path>,
) -> Result<(Document, String), FormatError> {
    let path = path.as_ref();
    let loader = DocumentLoader::from_path(path)?;
    let (mut document, format) = match registry.for_path(path) {
        Some(format) if format.name() != "txt" => {
            (format.parse(loader.source())?, format.name().to_string())
        }
        _ => detect_and_parse(registry, loader.source())?,
    };
    apply_source_path(&mut document, path);
    info!(path = %path.display(), format = %format, encoding = loader.encoding(), "loaded document");
    Ok((document, format))
}

/// Write `document` to `path` in `format`, or in the format registered for the path's
/// extension when `format` is `None`.
pub fn save(
    registry: &FormatRegistry,
    document: &Document,
    path: impl AsRef<Path>,
    format: Option<&str>,
) -> Result<(), FormatError> {
    let path = path.as_ref();
    let name = match format {
        Some(name) => name.to_string(),
        None => registry
            .for_path(path)
            .map(|f| f.name().to_string())
            .ok_or_else(|| {
                FormatError::FormatNotFound(format!("no format for {}", path.display()))
            })?,
    };
    let text = registry.serialize(document, &name)?;
    fs::write(path, text)?;
    info!(path = %path.display(), format = %name, "saved document");
    Ok(())
}
