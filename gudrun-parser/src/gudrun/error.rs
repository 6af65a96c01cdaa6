//! Error taxonomy for reading and writing Gudrun input files.
//!
//! Field reads fail with a [`LineError`]. Every record parser wraps whatever went wrong
//! into a [`RecordParseError`] naming the record kind, so callers always learn which
//! block of the file was broken. Document-level failures are collected in
//! [`GudrunError`].

use std::fmt;
use std::path::PathBuf;

/// The record kinds that make up a Gudrun input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Instrument,
    Beam,
    Normalisation,
    SampleBackground,
    Sample,
    Container,
    Components,
}

impl RecordKind {
    /// Keyword that opens the record in the positional format.
    pub fn keyword(self) -> &'static str {
        match self {
            RecordKind::Instrument => "INSTRUMENT",
            RecordKind::Beam => "BEAM",
            RecordKind::Normalisation => "NORMALISATION",
            RecordKind::SampleBackground => "SAMPLE BACKGROUND",
            RecordKind::Sample => "SAMPLE",
            RecordKind::Container => "CONTAINER",
            RecordKind::Components => "COMPONENTS:",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::Instrument => "Instrument",
            RecordKind::Beam => "Beam",
            RecordKind::Normalisation => "Normalisation",
            RecordKind::SampleBackground => "Sample Background",
            RecordKind::Sample => "Sample",
            RecordKind::Container => "Container",
            RecordKind::Components => "Components",
        };
        f.write_str(name)
    }
}

/// A line lacked an expected token, or the token did not convert.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("field {field} of line {line:?} is not a valid {expected}")]
pub struct MalformedLineError {
    pub line: String,
    pub field: usize,
    pub expected: &'static str,
}

impl MalformedLineError {
    pub fn new(line: &str, field: usize, expected: &'static str) -> Self {
        Self {
            line: line.to_string(),
            field,
            expected,
        }
    }
}

/// Why a single field (one or more lines) could not be read.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LineError {
    #[error(transparent)]
    Malformed(#[from] MalformedLineError),
    #[error("unexpected end of input")]
    EndOfInput,
    #[error("unknown {expected} {token:?} in line {line:?}")]
    UnknownVariant {
        token: String,
        expected: &'static str,
        line: String,
    },
    #[error("record closed by {line:?} before the list terminator {sentinel:?}")]
    UnterminatedList {
        sentinel: &'static str,
        line: String,
    },
    #[error("container declared before any sample")]
    OrphanContainer,
}

/// Failure while parsing one bounded record.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("whilst parsing {kind}: {cause}")]
pub struct RecordParseError {
    pub kind: RecordKind,
    #[source]
    pub cause: LineError,
}

impl RecordParseError {
    pub fn new(kind: RecordKind, cause: impl Into<LineError>) -> Self {
        Self {
            kind,
            cause: cause.into(),
        }
    }
}

/// Invariant violations caught before any text is emitted.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SerializeError {
    #[error("{owner}: unknown atomic symbol {symbol:?}")]
    UnknownElement { owner: String, symbol: String },
    #[error("{owner}: negative abundance {abundance} for {symbol}")]
    NegativeAbundance {
        owner: String,
        symbol: String,
        abundance: f64,
    },
    #[error("{field} {value:?} would not read back from the written line")]
    InvalidToken { field: &'static str, value: String },
    #[error("{owner}: composition references unknown component {component:?}")]
    UnknownComponent { owner: String, component: String },
}

/// Crate-level error returned by document loading, parsing and writing.
#[derive(Debug, thiserror::Error)]
pub enum GudrunError {
    #[error(transparent)]
    Record(#[from] RecordParseError),
    #[error(
        "{} not parsed; the file supplied is most likely of an incorrect format",
        describe_missing(.missing)
    )]
    MissingMandatoryRecord { missing: Vec<RecordKind> },
    #[error("the path {} does not exist", .0.display())]
    InvalidPath(PathBuf),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Serialize(#[from] SerializeError),
}

fn describe_missing(missing: &[RecordKind]) -> String {
    missing
        .iter()
        .map(|kind| kind.keyword())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, GudrunError>;
