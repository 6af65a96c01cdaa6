//! Document writer
//!
//! Records are rendered by their schemas; this module adds what belongs to the file as a
//! whole: the header line, the blank-line separation between records, the `END` footer
//! with its timestamp and the trailing `COMPONENTS:` section. Everything is validated
//! before the first byte is written, so a failed write never leaves a truncated file.

use crate::gudrun::error::{GudrunError, SerializeError};
use crate::gudrun::model::{Beam, Document, Instrument, Normalisation, SampleBackground};
use crate::gudrun::parsing::ParseMode;
use crate::gudrun::records::{write_components, write_record, write_sample_background_block};
use crate::gudrun::schema::{Context, HEADER, SPC5};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Options for [`serialize_document`].
#[derive(Debug, Clone)]
pub struct SerializeOptions {
    /// Include samples not flagged to run.
    pub write_all_samples: bool,
    /// Footer timestamp; the current local time when unset.
    pub timestamp: Option<String>,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            write_all_samples: true,
            timestamp: None,
        }
    }
}

impl SerializeOptions {
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    pub fn running_samples_only(mut self) -> Self {
        self.write_all_samples = false;
        self
    }
}

fn now() -> String {
    chrono::Local::now().format("%Y%m%d %H:%M:%S").to_string()
}

/// Every weighted component must name a registered component.
fn check_components(document: &Document) -> Result<(), SerializeError> {
    let registry = &document.components;
    let mut compositions = vec![&document.normalisation.composition];
    for sample in document.samples() {
        compositions.push(&sample.composition);
        compositions.extend(sample.containers.iter().map(|c| &c.composition));
    }
    for composition in compositions {
        if let Some(dangling) = composition.dangling_components(registry).next() {
            return Err(SerializeError::UnknownComponent {
                owner: composition.name.clone(),
                component: dangling.component.clone(),
            });
        }
    }
    Ok(())
}

/// Render `document` in the positional format.
pub fn serialize_document(
    document: &Document,
    options: &SerializeOptions,
) -> Result<String, SerializeError> {
    check_components(document)?;
    let ctx = Context::new(ParseMode::Full).with_beam_geometry(document.beam.sample_geometry);

    let mut blocks = vec![
        write_record::<Instrument>(&document.instrument, &ctx)?,
        write_record::<Beam>(&document.beam, &ctx)?,
        write_record::<Normalisation>(&document.normalisation, &ctx)?,
    ];
    for background in &document.sample_backgrounds {
        blocks.extend(write_sample_background_block(
            background,
            &ctx,
            options.write_all_samples,
        )?);
    }

    let timestamp = options.timestamp.clone().unwrap_or_else(now);
    let mut text = format!("{HEADER}\n\n{}", blocks.join("\n\n"));
    text.push_str(&format!(
        "\n\n\nEND{SPC5}\n1\nDate and time last written:  {timestamp}{SPC5}\nN"
    ));
    if !document.components.is_empty() {
        text.push_str("\n\nCOMPONENTS:\n");
        text.push_str(&write_components(&document.components)?);
    }
    debug!(
        backgrounds = document.sample_backgrounds.len(),
        bytes = text.len(),
        "serialized document"
    );
    Ok(text)
}

impl Document {
    /// The whole document in the positional format, every sample included.
    pub fn to_gudrun_string(&self) -> Result<String, SerializeError> {
        serialize_document(self, &SerializeOptions::default())
    }

    /// Write the whole document to `path`.
    pub fn write_out(&self, path: impl AsRef<Path>) -> Result<(), GudrunError> {
        let path = path.as_ref();
        let text = self.to_gudrun_string()?;
        fs::write(path, text)?;
        info!(path = %path.display(), "wrote gudrun file");
        Ok(())
    }

    /// Write the copy Gudrun runs on: `dir/file_name` holding only the samples flagged
    /// to run, plus one parameter file per running sample, named by
    /// [`Sample::path_name`](crate::gudrun::model::Sample::path_name).
    ///
    /// Returns the paths written, processing copy first.
    pub fn write_for_processing(
        &self,
        dir: impl AsRef<Path>,
        file_name: &str,
    ) -> Result<Vec<PathBuf>, GudrunError> {
        let dir = dir.as_ref();
        let timestamp = now();
        let options = SerializeOptions::default()
            .with_timestamp(timestamp.clone())
            .running_samples_only();

        let mut outputs = vec![(dir.join(file_name), serialize_document(self, &options)?)];
        for background in &self.sample_backgrounds {
            for sample in background.samples.iter().filter(|s| s.run_this_sample) {
                let narrowed = Document {
                    sample_backgrounds: vec![SampleBackground {
                        samples: vec![sample.clone()],
                        ..background.clone()
                    }],
                    ..self.clone()
                };
                let text = serialize_document(
                    &narrowed,
                    &SerializeOptions::default().with_timestamp(timestamp.clone()),
                )?;
                outputs.push((dir.join(sample.path_name()), text));
            }
        }

        let mut written = Vec::with_capacity(outputs.len());
        for (path, text) in outputs {
            fs::write(&path, text)?;
            debug!(path = %path.display(), "wrote processing file");
            written.push(path);
        }
        info!(dir = %dir.display(), files = written.len(), "wrote files for processing");
        Ok(written)
    }
}
