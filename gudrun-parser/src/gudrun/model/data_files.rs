use serde::{Deserialize, Serialize};

/// Raw data files belonging to one record, tagged with the owner's name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataFiles {
    pub files: Vec<String>,
    pub owner: String,
}

impl DataFiles {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            files: Vec::new(),
            owner: owner.into(),
        }
    }

    pub fn with_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files = files.into_iter().map(Into::into).collect();
        self
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn first(&self) -> Option<&str> {
        self.files.first().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(String::as_str)
    }
}
