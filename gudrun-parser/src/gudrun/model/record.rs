//! Closed sum type over the record kinds, for consumers that walk a document as a tree.

use super::{Beam, Components, Container, Instrument, Normalisation, Sample, SampleBackground};
use crate::gudrun::error::RecordKind;

#[derive(Debug, Clone, Copy)]
pub enum Record<'a> {
    Instrument(&'a Instrument),
    Beam(&'a Beam),
    Normalisation(&'a Normalisation),
    SampleBackground(&'a SampleBackground),
    Sample(&'a Sample),
    Container(&'a Container),
    Components(&'a Components),
}

impl Record<'_> {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Instrument(_) => RecordKind::Instrument,
            Record::Beam(_) => RecordKind::Beam,
            Record::Normalisation(_) => RecordKind::Normalisation,
            Record::SampleBackground(_) => RecordKind::SampleBackground,
            Record::Sample(_) => RecordKind::Sample,
            Record::Container(_) => RecordKind::Container,
            Record::Components(_) => RecordKind::Components,
        }
    }

    /// Display label, as shown in a tree view.
    pub fn label(&self) -> String {
        match self {
            Record::Instrument(instrument) => format!("Instrument ({})", instrument.name),
            Record::Beam(beam) => format!("Beam ({})", beam.sample_geometry),
            Record::Normalisation(_) => "Normalisation".to_string(),
            Record::SampleBackground(background) => match background.data_files.first() {
                Some(file) => format!("Sample Background ({file})"),
                None => "Sample Background".to_string(),
            },
            Record::Sample(sample) => sample.name.clone(),
            Record::Container(container) => container.name.clone(),
            Record::Components(components) => format!("Components ({})", components.len()),
        }
    }

    /// Nesting level in the record tree: backgrounds at 0, samples at 1, containers at 2.
    pub fn depth(&self) -> usize {
        match self {
            Record::Sample(_) => 1,
            Record::Container(_) => 2,
            _ => 0,
        }
    }
}
