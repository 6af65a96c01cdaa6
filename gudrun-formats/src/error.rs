use gudrun_parser::gudrun::error::SerializeError;
use gudrun_parser::GudrunError;

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("format not found: {0}")]
    FormatNotFound(String),
    #[error("{0}")]
    NotSupported(String),
    #[error(transparent)]
    Parse(#[from] GudrunError),
    #[error(transparent)]
    Serialize(#[from] SerializeError),
    /// A YAML or JSON (de)serialization failure.
    #[error("{format}: {message}")]
    Structured {
        format: &'static str,
        message: String,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl FormatError {
    pub fn structured(format: &'static str, err: impl std::fmt::Display) -> Self {
        FormatError::Structured {
            format,
            message: err.to_string(),
        }
    }
}
