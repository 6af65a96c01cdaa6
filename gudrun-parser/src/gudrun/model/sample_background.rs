use super::data_files::DataFiles;
use super::sample::Sample;
use serde::{Deserialize, Serialize};

/// An empty-instrument background run and the samples measured against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SampleBackground {
    pub period_number: u32,
    pub data_files: DataFiles,
    pub samples: Vec<Sample>,
}

impl Default for SampleBackground {
    fn default() -> Self {
        Self {
            period_number: 1,
            data_files: DataFiles::new("SAMPLE BACKGROUND"),
            samples: Vec::new(),
        }
    }
}
