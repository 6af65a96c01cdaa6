//! Trial-based format detection
//!
//! A source of unknown format is offered to each parsing format in turn: the structured
//! formats first, since they fail fast on positional text, and `txt` last. When nothing
//! accepts the source, the `txt` error is returned; a Gudrun input file is the common
//! case and its error names the broken record.

use crate::error::FormatError;
use crate::registry::FormatRegistry;
use gudrun_parser::Document;
use tracing::debug;

const TRIAL_ORDER: [&str; 3] = ["json", "yaml", "txt"];

/// Parse `source` with the first registered format that accepts it.
///
/// Returns the document and the name of the format that read it.
pub fn detect_and_parse(
    registry: &FormatRegistry,
    source: &str,
) -> Result<(Document, String), FormatError> {
    let mut last_error = None;
    for name in TRIAL_ORDER {
        let Ok(format) = registry.get(name) else {
            continue;
        };
        if !format.supports_parsing() {
            continue;
        }
        match format.parse(source) {
            Ok(document) => {
                debug!(format = name, "detected format");
                return Ok((document, name.to_string()));
            }
            Err(err) => {
                debug!(format = name, error = %err, "format rejected source");
                last_error = Some(err);
            }
        }
    }
    Err(last_error.unwrap_or_else(|| {
        FormatError::NotSupported("no registered format can parse documents".to_string())
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Format;
    use crate::formats::{JsonFormat, TxtFormat, YamlFormat};
    use gudrun_parser::gudrun::testing;
    use gudrun_parser::GudrunError;
    use rstest::rstest;

    #[rstest]
    #[case("txt")]
    #[case("yaml")]
    #[case("json")]
    fn detects_every_default_format(#[case] name: &str) {
        let registry = FormatRegistry::with_defaults();
        let document = registry.parse(&testing::water_source(), "txt").unwrap();
        let source = registry.serialize(&document, name).unwrap();

        let (parsed, detected) = detect_and_parse(&registry, &source).unwrap();
        assert_eq!(detected, name);
        assert_eq!(parsed, document);
    }

    #[test]
    fn broken_positional_source_reports_record_error() {
        let registry = FormatRegistry::with_defaults();
        let source = testing::water_source();
        let cut = source.find("0.8          Minimum radius for FT").unwrap();

        match detect_and_parse(&registry, &source[..cut]) {
            Err(FormatError::Parse(GudrunError::Record(_))) => {}
            other => panic!("expected a record error, got {other:?}"),
        }
    }

    #[test]
    fn only_registered_formats_are_tried() {
        let mut registry = FormatRegistry::new();
        registry.register(TxtFormat::default());
        let source = YamlFormat.serialize(&testing::sample_document()).unwrap();
        assert!(detect_and_parse(&registry, &source).is_err());

        registry.register(JsonFormat);
        registry.register(YamlFormat);
        assert!(detect_and_parse(&registry, &source).is_ok());
    }

    #[test]
    fn empty_registry_is_not_supported() {
        let result = detect_and_parse(&FormatRegistry::new(), "");
        assert!(matches!(result, Err(FormatError::NotSupported(_))));
    }
}
