//! YAML rendition of the document model
//!
//! Top-level keys follow the record names (`Instrument`, `Beam`, `Components`,
//! `Normalisation`, `SampleBackgrounds`); fields inside records are camelCase.

use crate::error::FormatError;
use crate::format::Format;
use gudrun_parser::Document;

pub struct YamlFormat;

impl Format for YamlFormat {
    fn name(&self) -> &str {
        "yaml"
    }

    fn description(&self) -> &str {
        "Structured YAML document"
    }

    fn extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        serde_yaml::from_str(source).map_err(|e| FormatError::structured("yaml", e))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serde_yaml::to_string(doc).map_err(|e| FormatError::structured("yaml", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gudrun_parser::gudrun::testing;

    #[test]
    fn test_yaml_top_level_keys() {
        let text = YamlFormat.serialize(&testing::sample_document()).unwrap();
        let keys: Vec<&str> = text
            .lines()
            .filter(|line| !line.starts_with([' ', '-']))
            .map(|line| line.trim_end_matches(':'))
            .collect();
        assert_eq!(
            keys,
            vec!["Instrument", "Beam", "Components", "Normalisation", "SampleBackgrounds"]
        );
        assert!(text.contains("  dataFileDir:"));
    }

    #[test]
    fn test_yaml_round_trip() {
        let doc = testing::sample_document();
        let text = YamlFormat.serialize(&doc).unwrap();
        assert_eq!(YamlFormat.parse(&text).unwrap(), doc);
    }

    #[test]
    fn test_yaml_rejects_positional_source() {
        let result = YamlFormat.parse(&testing::water_source());
        assert!(matches!(
            result,
            Err(FormatError::Structured { format: "yaml", .. })
        ));
    }
}
