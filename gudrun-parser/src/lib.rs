//! # gudrun-parser
//!
//! Reads and writes the input files of Gudrun, the neutron-scattering data-correction
//! program.
//!
//! File Layout
//!
//! The Gudrun input format is positional: a field's meaning comes from the line it sits
//! on inside its record, and from enum values read earlier in the same record. The crate
//! is laid out leaf-first:
//!
//! src/gudrun
//!   ├── cursor       Index-based line cursor over the decoded source
//!   ├── scalars      Nth-token extractors tolerant of trailing comments
//!   ├── model        Format-neutral entity model (Instrument, Beam, ... Document)
//!   ├── schema       Field tables: one (name, reader, writer) entry per line group
//!   ├── records      One schema per record kind, plus the nested-block dispatch
//!   ├── parsing      Document driver (state machine over top-level keywords)
//!   ├── serializing  Document writer (header, records, footer, components)
//!   ├── loader       Path validation and encoding detection
//!   └── naming       Derived file names for processing and result files
//!
//! The structured (YAML/JSON) renditions of the same model live in `gudrun-formats`.

pub mod gudrun;

pub use gudrun::error::{GudrunError, LineError, MalformedLineError, RecordKind, RecordParseError};
pub use gudrun::loader::DocumentLoader;
pub use gudrun::model::Document;
pub use gudrun::parsing::{parse_document, ParseMode};
