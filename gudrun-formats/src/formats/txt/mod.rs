//! The Gudrun input format
//!
//! Delegates to gudrun-parser in both directions. The parse mode is fixed per instance:
//! the registry carries the full-document variant, instrument templates are read with
//! [`TxtFormat::template`].

use crate::error::FormatError;
use crate::format::Format;
use gudrun_parser::{parse_document, Document, ParseMode};

#[derive(Debug, Clone, Copy, Default)]
pub struct TxtFormat {
    mode: ParseMode,
}

impl TxtFormat {
    pub fn template() -> Self {
        Self {
            mode: ParseMode::Template,
        }
    }
}

impl Format for TxtFormat {
    fn name(&self) -> &str {
        "txt"
    }

    fn description(&self) -> &str {
        "Gudrun input file"
    }

    fn extensions(&self) -> &[&str] {
        &["txt"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        Ok(parse_document(source, self.mode)?)
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(doc.to_gudrun_string()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gudrun_parser::gudrun::testing;

    #[test]
    fn test_txt_format_name() {
        let format = TxtFormat::default();
        assert_eq!(format.name(), "txt");
        assert!(format.supports_parsing());
        assert!(format.supports_serialization());
    }

    #[test]
    fn test_txt_format_parse_fixture() {
        let doc = TxtFormat::default().parse(&testing::water_source()).unwrap();
        assert_eq!(doc.samples().count(), 2);
    }

    #[test]
    fn test_txt_format_round_trip() {
        let format = TxtFormat::default();
        let doc = format.parse(&testing::water_source()).unwrap();
        let text = format.serialize(&doc).unwrap();
        assert_eq!(format.parse(&text).unwrap(), doc);
    }

    #[test]
    fn test_txt_format_modes() {
        let source = testing::beam_only_source();
        assert!(matches!(
            TxtFormat::default().parse(&source),
            Err(FormatError::Parse(_))
        ));
        assert!(TxtFormat::template().parse(&source).is_ok());
    }

    #[test]
    fn test_txt_format_reports_serialize_errors() {
        let mut doc = testing::sample_document();
        doc.normalisation.data_files.files.push("two words".to_string());
        assert!(matches!(
            TxtFormat::default().serialize(&doc),
            Err(FormatError::Serialize(_))
        ));
    }
}
