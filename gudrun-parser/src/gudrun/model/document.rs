use super::record::Record;
use super::{Beam, Components, Instrument, Normalisation, Sample, SampleBackground};
use crate::gudrun::naming;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// In-memory model of one Gudrun input file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    /// Where the document was loaded from, if anywhere.
    #[serde(skip)]
    pub path: Option<PathBuf>,
    #[serde(rename = "Instrument")]
    pub instrument: Instrument,
    #[serde(rename = "Beam")]
    pub beam: Beam,
    #[serde(rename = "Components", default)]
    pub components: Components,
    #[serde(rename = "Normalisation")]
    pub normalisation: Normalisation,
    #[serde(rename = "SampleBackgrounds", default)]
    pub sample_backgrounds: Vec<SampleBackground>,
}

impl Document {
    /// Every record in document order: the three mandatory records, then each background
    /// followed by its samples (each followed by its containers), then the components.
    pub fn records(&self) -> Vec<Record<'_>> {
        let mut records = vec![
            Record::Instrument(&self.instrument),
            Record::Beam(&self.beam),
            Record::Normalisation(&self.normalisation),
        ];
        for background in &self.sample_backgrounds {
            records.push(Record::SampleBackground(background));
            for sample in &background.samples {
                records.push(Record::Sample(sample));
                records.extend(sample.containers.iter().map(Record::Container));
            }
        }
        if !self.components.is_empty() {
            records.push(Record::Components(&self.components));
        }
        records
    }

    pub fn samples(&self) -> impl Iterator<Item = &Sample> {
        self.sample_backgrounds
            .iter()
            .flat_map(|background| background.samples.iter())
    }

    /// Every data file the document refers to, in document order.
    pub fn data_files(&self) -> Vec<&str> {
        let mut files: Vec<&str> = self
            .normalisation
            .data_files
            .iter()
            .chain(self.normalisation.data_files_bg.iter())
            .collect();
        for background in &self.sample_backgrounds {
            files.extend(background.data_files.iter());
            for sample in &background.samples {
                files.extend(sample.data_files.iter());
                for container in &sample.containers {
                    files.extend(container.data_files.iter());
                }
            }
        }
        files
    }

    /// Referenced data files that do not exist under `data_dir`.
    pub fn missing_data_files(&self, data_dir: &Path) -> Vec<PathBuf> {
        let mut missing = Vec::new();
        for file in self.data_files() {
            let path = data_dir.join(file);
            if !path.exists() && !missing.contains(&path) {
                missing.push(path);
            }
        }
        missing
    }

    /// Result file Gudrun writes for `sample`: its first data file with the extension
    /// swapped for `extension`, inside the input-file directory.
    pub fn result_file_for(&self, sample: &Sample, extension: &str) -> Option<PathBuf> {
        let data_file = sample.data_files.first()?;
        let file_name = naming::derive_file_name(data_file, extension);
        Some(Path::new(&self.instrument.gudrun_input_file_dir).join(file_name))
    }
}
