//! Format-neutral entity model
//!
//! Plain data records with value semantics. Every nested entity is owned by its parent;
//! the only reference across the tree is a weighted component naming an entry of the
//! document's [`Components`] registry. Nothing here knows about line layouts, so the
//! positional and structured formats build the same values.

pub mod beam;
pub mod composition;
pub mod container;
pub mod cross_section;
pub mod data_files;
pub mod density;
pub mod document;
pub mod element;
pub mod enums;
pub mod geometry;
pub mod instrument;
pub mod normalisation;
pub mod record;
pub mod sample;
pub mod sample_background;

pub use beam::{Beam, BeamEdges};
pub use composition::{Component, Components, Composition, WeightedComponent};
pub use container::Container;
pub use cross_section::CrossSectionSource;
pub use data_files::DataFiles;
pub use density::{Density, DensityUnits};
pub use document::Document;
pub use element::{is_known_symbol, Element, ATOMIC_SYMBOLS};
pub use enums::{
    Coded, FtMode, Geometry, InstrumentName, MergeWeights, NormalisationType, OutputUnits,
    Scales,
};
pub use geometry::{Cylindrical, FlatPlate, GeometryBearing, GeometryBlock};
pub use instrument::{GroupingParameter, Instrument};
pub use normalisation::Normalisation;
pub use record::Record;
pub use sample::{ExponentialTerm, ResonanceRange, Sample};
pub use sample_background::SampleBackground;
