//! Multi-format interoperability for Gudrun documents
//!
//!     One [`Document`](gudrun_parser::Document) model, several renditions of it: the
//!     positional `txt` input format Gudrun itself reads, and structured YAML and JSON of
//!     the same shape for tools that would rather not deal with line positions.
//!
//! Architecture
//!
//!     - Format trait: uniform interface for all formats (parsing and/or serialization)
//!     - FormatRegistry: discovery and selection of formats by name or file extension
//!     - detect: trial-based format detection for sources of unknown format
//!     - io: whole-file load and save on top of the registry
//!
//!     This is a pure lib: it powers gudrun-cli but supposes no shell environment.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── detect.rs               # detect_and_parse
//!     ├── io.rs                   # load / save
//!     ├── formats
//!     │   ├── txt                 # the Gudrun input format, via gudrun-parser
//!     │   ├── yaml
//!     │   └── json
//!     └── lib.rs
//!
//! Fidelity
//!
//!     Every format round-trips the full model. The structured formats skip only the
//!     source path, which belongs to the file on disk rather than to the document.

pub mod detect;
pub mod error;
pub mod format;
pub mod formats;
pub mod io;
pub mod registry;

pub use detect::detect_and_parse;
pub use error::FormatError;
pub use format::Format;
pub use io::{load, save};
pub use registry::FormatRegistry;
