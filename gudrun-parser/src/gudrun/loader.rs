//! Document loading
//!
//! `DocumentLoader` reads a source from a file or a string and parses it. Files are read
//! whole and decoded before any line is looked at; Gudrun files written on older systems
//! are often Latin-1 (the `Å` in unit comments), so the encoding is detected rather than
//! assumed:
//!
//! 1. a byte-order mark wins,
//! 2. otherwise valid UTF-8 is taken as UTF-8,
//! 3. otherwise the legacy encoding is guessed from the bytes.
//!
//! ```rust,ignore
//! use gudrun_parser::DocumentLoader;
//!
//! let document = DocumentLoader::from_path("water.txt")?.parse()?;
//! let template = DocumentLoader::from_path("nimrod.txt")?.parse_template()?;
//! ```

use crate::gudrun::error::GudrunError;
use crate::gudrun::model::Document;
use crate::gudrun::parsing::{parse_document, ParseMode};
use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Decode raw file bytes, returning the text and the encoding used.
pub fn decode(bytes: &[u8]) -> (String, &'static Encoding) {
    if let Some((encoding, bom_length)) = Encoding::for_bom(bytes) {
        let (text, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_length..]);
        if had_errors {
            warn!(encoding = encoding.name(), "replaced undecodable bytes");
        }
        return (text.into_owned(), encoding);
    }
    if let Ok(text) = std::str::from_utf8(bytes) {
        return (text.to_string(), UTF_8);
    }
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    let (text, used, had_errors) = encoding.decode(bytes);
    warn!(encoding = used.name(), "source is not UTF-8, decoded as legacy encoding");
    if had_errors {
        warn!(encoding = used.name(), "replaced undecodable bytes");
    }
    (text.into_owned(), used)
}

/// Record where a document came from. The Gudrun input-file directory is never trusted
/// from the file itself; it is the directory the file was loaded from.
pub fn apply_source_path(document: &mut Document, path: &Path) {
    let absolute = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    if let Some(dir) = absolute.parent() {
        document.instrument.gudrun_input_file_dir = dir.display().to_string();
    }
    document.path = Some(absolute);
}

/// Decoded source text, ready to parse.
#[derive(Debug, Clone)]
pub struct DocumentLoader {
    source: String,
    path: Option<PathBuf>,
    encoding: &'static Encoding,
}

impl DocumentLoader {
    /// Read and decode `path`. A path that does not exist is rejected before any I/O.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, GudrunError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(GudrunError::InvalidPath(path.to_path_buf()));
        }
        let bytes = fs::read(path)?;
        let (source, encoding) = decode(&bytes);
        info!(
            path = %path.display(),
            encoding = encoding.name(),
            lines = source.lines().count(),
            "loaded source"
        );
        Ok(Self {
            source,
            path: Some(path.to_path_buf()),
            encoding,
        })
    }

    pub fn from_string<S: Into<String>>(source: S) -> Self {
        Self {
            source: source.into(),
            path: None,
            encoding: UTF_8,
        }
    }

    /// Parse a complete input file.
    pub fn parse(&self) -> Result<Document, GudrunError> {
        self.parse_with(ParseMode::Full)
    }

    /// Parse a partial file, such as an instrument template.
    pub fn parse_template(&self) -> Result<Document, GudrunError> {
        self.parse_with(ParseMode::Template)
    }

    pub fn parse_with(&self, mode: ParseMode) -> Result<Document, GudrunError> {
        let mut document = parse_document(&self.source, mode)?;
        if let Some(path) = &self.path {
            apply_source_path(&mut document, path);
        }
        info!(
            mode = ?mode,
            samples = document.samples().count(),
            "parsed gudrun file"
        );
        Ok(document)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Name of the detected encoding, e.g. `UTF-8` or `windows-1252`.
    pub fn encoding(&self) -> &'static str {
        self.encoding.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gudrun::model::InstrumentName;
    use crate::gudrun::testing;

    #[test]
    fn missing_path_is_rejected() {
        let err = DocumentLoader::from_path("/no/such/gudrun/file.txt").unwrap_err();
        assert!(matches!(err, GudrunError::InvalidPath(_)));
    }

    #[test]
    fn latin1_source_is_detected() {
        let bytes = b"0.05  12.0  0.1          Wavelength range to use [\xc5] and step size\n\
                      -0.0721          Density atoms/\xc5^3?\n\
                      0.0          Shielding attenuation coefficient [per m per \xc5]\n";
        let (text, encoding) = decode(bytes);
        assert_ne!(encoding, UTF_8);
        assert!(text.contains("Shielding attenuation coefficient"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn utf8_bom_is_stripped() {
        let (text, encoding) = decode(b"\xef\xbb\xbfINSTRUMENT          {");
        assert_eq!(encoding, UTF_8);
        assert_eq!(text, "INSTRUMENT          {");
    }

    #[test]
    fn input_directory_comes_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("water.txt");
        fs::write(&path, testing::water_source()).unwrap();

        let loader = DocumentLoader::from_path(&path).unwrap();
        assert_eq!(loader.encoding(), "UTF-8");
        let document = loader.parse().unwrap();
        let expected = dir.path().canonicalize().unwrap();
        assert_eq!(
            document.instrument.gudrun_input_file_dir,
            expected.display().to_string()
        );
        assert_eq!(document.path, Some(expected.join("water.txt")));
    }

    #[test]
    fn instrument_template_reads_threshold() {
        let document = DocumentLoader::from_path(testing::fixture_path(
            "nimrod_instrument_template.txt",
        ))
        .unwrap()
        .parse_template()
        .unwrap();
        assert_eq!(document.instrument.name, InstrumentName::Nimrod);
        assert_eq!(document.instrument.good_detector_threshold, 25);
    }
}
