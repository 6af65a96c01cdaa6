//! Document driver
//!
//! A Gudrun file is a preamble holding the three mandatory records, in any order, then
//! any number of Sample Background blocks, the `END` footer and an optional
//! `COMPONENTS:` section:
//!
//!     '  '  '          '  '/'
//!
//!     INSTRUMENT          { ... }
//!     BEAM          { ... }
//!     NORMALISATION          { ... }
//!     SAMPLE BACKGROUND          { ... }     followed by samples, containers and GO
//!     ...
//!     END
//!     ...
//!     COMPONENTS:
//!     ...
//!
//! [`DocumentParser`] walks this as a state machine. Lines it does not recognise at the
//! top level (the header, the footer lines) are skipped. Record failures propagate as
//! they are; no partial document is returned.

use crate::gudrun::cursor::LineCursor;
use crate::gudrun::error::{GudrunError, RecordKind};
use crate::gudrun::model::{Beam, Document, Instrument, Normalisation};
use crate::gudrun::records::{parse_components, parse_record, parse_sample_background_block};
use crate::gudrun::scalars;
use crate::gudrun::schema::Context;
use std::mem;
use tracing::debug;

/// Which records a parse insists on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParseMode {
    /// A complete input file: Instrument, Beam and Normalisation are mandatory.
    #[default]
    Full,
    /// A partial file such as an instrument or container template. No record is
    /// mandatory, so a file holding only a BEAM block is accepted; missing records keep
    /// their defaults, and the Instrument carries its good-detector threshold.
    Template,
}

impl ParseMode {
    pub fn mandatory(self) -> &'static [RecordKind] {
        match self {
            ParseMode::Full => &[
                RecordKind::Instrument,
                RecordKind::Beam,
                RecordKind::Normalisation,
            ],
            ParseMode::Template => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    AwaitingInstrument,
    AwaitingBeam,
    AwaitingNormalisation,
    ParsingSampleBackgrounds,
    AwaitingComponents,
    Done,
}

/// Single-pass parser over one decoded source.
pub struct DocumentParser<'a> {
    cursor: LineCursor<'a>,
    ctx: Context,
    state: DriverState,
    seen: Vec<RecordKind>,
    document: Document,
}

impl<'a> DocumentParser<'a> {
    pub fn new(source: &'a str, mode: ParseMode) -> Self {
        Self {
            cursor: LineCursor::new(source),
            ctx: Context::new(mode),
            state: DriverState::AwaitingInstrument,
            seen: Vec::with_capacity(3),
            document: Document::default(),
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn parse(&mut self) -> Result<Document, GudrunError> {
        self.parse_preamble()?;

        let missing: Vec<RecordKind> = self
            .ctx
            .mode
            .mandatory()
            .iter()
            .copied()
            .filter(|kind| !self.seen.contains(kind))
            .collect();
        if !missing.is_empty() {
            return Err(GudrunError::MissingMandatoryRecord { missing });
        }

        self.state = DriverState::ParsingSampleBackgrounds;
        self.parse_body()?;
        self.state = DriverState::Done;
        debug!(
            backgrounds = self.document.sample_backgrounds.len(),
            components = self.document.components.len(),
            "parsed document"
        );
        Ok(mem::take(&mut self.document))
    }

    fn parse_preamble(&mut self) -> Result<(), GudrunError> {
        while self.seen.len() < 3 {
            let Some(line) = self.cursor.peek() else {
                break;
            };
            let kind = match scalars::first_word(line).ok() {
                Some("INSTRUMENT") => RecordKind::Instrument,
                Some("BEAM") => RecordKind::Beam,
                Some("NORMALISATION") => RecordKind::Normalisation,
                _ => {
                    self.cursor.skip(1);
                    continue;
                }
            };
            if self.seen.contains(&kind) {
                self.cursor.skip(1);
                continue;
            }
            match kind {
                RecordKind::Instrument => {
                    self.document.instrument =
                        parse_record::<Instrument>(&mut self.cursor, &self.ctx)?;
                }
                RecordKind::Beam => {
                    let beam = parse_record::<Beam>(&mut self.cursor, &self.ctx)?;
                    self.ctx = self.ctx.with_beam_geometry(beam.sample_geometry);
                    self.document.beam = beam;
                }
                _ => {
                    self.document.normalisation =
                        parse_record::<Normalisation>(&mut self.cursor, &self.ctx)?;
                }
            }
            self.seen.push(kind);
            self.state = self.next_awaited();
        }
        Ok(())
    }

    fn next_awaited(&self) -> DriverState {
        if !self.seen.contains(&RecordKind::Instrument) {
            DriverState::AwaitingInstrument
        } else if !self.seen.contains(&RecordKind::Beam) {
            DriverState::AwaitingBeam
        } else if !self.seen.contains(&RecordKind::Normalisation) {
            DriverState::AwaitingNormalisation
        } else {
            DriverState::ParsingSampleBackgrounds
        }
    }

    fn parse_body(&mut self) -> Result<(), GudrunError> {
        while let Some(line) = self.cursor.peek() {
            if line.contains("SAMPLE BACKGROUND") && line.contains('{') {
                let background = parse_sample_background_block(&mut self.cursor, &self.ctx)?;
                self.document.sample_backgrounds.push(background);
            } else if line.contains("COMPONENTS:") {
                self.cursor.skip(1);
                self.document.components = parse_components(&mut self.cursor)?;
            } else {
                self.cursor.skip(1);
                if scalars::first_word(line).ok() == Some("END") {
                    self.state = DriverState::AwaitingComponents;
                }
            }
        }
        Ok(())
    }
}

/// Parse a whole decoded source.
pub fn parse_document(source: &str, mode: ParseMode) -> Result<Document, GudrunError> {
    DocumentParser::new(source, mode).parse()
}
