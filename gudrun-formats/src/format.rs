//! Format trait definition
//!
//! The core trait every format implements: a uniform interface for parsing and
//! serializing documents.

use crate::error::FormatError;
use gudrun_parser::Document;

/// Trait for document formats
///
/// Implementors provide conversion between a string representation and [`Document`].
/// Formats can support parsing, serialization, or both.
///
/// # Examples
///
/// ```ignore
/// struct Toml;
///
/// impl Format for Toml {
///     fn name(&self) -> &str {
///         "toml"
///     }
///
///     fn extensions(&self) -> &[&str] {
///         &["toml"]
///     }
///
///     fn supports_serialization(&self) -> bool {
///         true
///     }
///
///     fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
///         toml::to_string(doc).map_err(|e| FormatError::structured("toml", e))
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "txt", "yaml")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions, without the dot, that select this format
    fn extensions(&self) -> &[&str] {
        &[]
    }

    /// Whether this format supports parsing (source → Document)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (Document → source)
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Parse source text into a Document
    ///
    /// Default implementation returns NotSupported error.
    fn parse(&self, _source: &str) -> Result<Document, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Serialize a Document into source text
    ///
    /// Default implementation returns NotSupported error.
    fn serialize(&self, _doc: &Document) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }
}
