//! The Sample Background block
//!
//! A background record is followed, outside its own braces, by the samples measured
//! against it and their containers:
//!
//!     SAMPLE BACKGROUND          {
//!     ...
//!     }
//!
//!     SAMPLE water          {
//!     ...
//!     }
//!
//!     CONTAINER N9 can          {
//!     ...
//!     }
//!
//!     GO
//!
//! The block ends at the next `SAMPLE BACKGROUND` header or the `END` marker, neither of
//! which is consumed.

use super::shared::{consume_keyword_header, read_data_files, write_data_files};
use super::{parse_record, write_record, Schema};
use crate::gudrun::cursor::{is_blank, LineCursor};
use crate::gudrun::error::{LineError, RecordKind, RecordParseError, SerializeError};
use crate::gudrun::model::{Container, Sample, SampleBackground};
use crate::gudrun::scalars;
use crate::gudrun::schema::{Context, Field, SPC5};
use once_cell::sync::Lazy;
use tracing::{debug, warn};

type F = Field<SampleBackground>;

static SCHEMA: Lazy<Vec<F>> = Lazy::new(|| {
    vec![
        F::new(
            "header",
            |c, _, _| {
                consume_keyword_header(c, "SAMPLE BACKGROUND");
                Ok(())
            },
            |_, _, w| {
                w.open("SAMPLE BACKGROUND");
                Ok(())
            },
        ),
        F::new(
            "data files",
            |c, b, _| {
                (b.period_number, b.data_files) = read_data_files(c, "SAMPLE BACKGROUND")?;
                Ok(())
            },
            |b, _, w| write_data_files(w, b.period_number, &b.data_files, "SAMPLE BACKGROUND"),
        ),
    ]
});

impl Schema for SampleBackground {
    const KIND: RecordKind = RecordKind::SampleBackground;

    fn fields() -> &'static [Field<Self>] {
        &SCHEMA
    }
}

/// Parse a background record and every sample and container that follows it.
pub fn parse_sample_background_block(
    cursor: &mut LineCursor<'_>,
    ctx: &Context,
) -> Result<SampleBackground, RecordParseError> {
    let mut background: SampleBackground = parse_record(cursor, ctx)?;
    loop {
        let Some(line) = cursor.peek() else {
            return Err(RecordParseError::new(
                RecordKind::SampleBackground,
                LineError::EndOfInput,
            ));
        };
        if line.contains("SAMPLE BACKGROUND") {
            break;
        }
        match scalars::first_word(line).ok() {
            Some("SAMPLE") => {
                let sample: Sample = parse_record(cursor, ctx)?;
                background.samples.push(sample);
            }
            Some("CONTAINER") => {
                let Some(sample) = background.samples.last_mut() else {
                    return Err(RecordParseError::new(
                        RecordKind::SampleBackground,
                        LineError::OrphanContainer,
                    ));
                };
                let container: Container = parse_record(cursor, ctx)?;
                sample.containers.push(container);
            }
            _ if line.contains("END") => break,
            _ if line.contains("GO") => cursor.skip(1),
            _ => {
                if !is_blank(line) {
                    warn!(line, position = cursor.position(), "skipping unrecognised line");
                }
                cursor.skip(1);
            }
        }
    }
    debug!(
        samples = background.samples.len(),
        "parsed sample background block"
    );
    Ok(background)
}

/// Render a background and its samples as separate blocks, in file order.
///
/// Samples not flagged to run are left out unless `write_all_samples` is set.
pub fn write_sample_background_block(
    background: &SampleBackground,
    ctx: &Context,
    write_all_samples: bool,
) -> Result<Vec<String>, SerializeError> {
    let mut blocks = vec![write_record(background, ctx)?];
    for sample in &background.samples {
        if !(write_all_samples || sample.run_this_sample) {
            continue;
        }
        blocks.push(write_record(sample, ctx)?);
        for container in &sample.containers {
            blocks.push(write_record(container, ctx)?);
        }
        blocks.push(format!("GO{SPC5}"));
    }
    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gudrun::model::DataFiles;

    fn background() -> SampleBackground {
        let mut first = Sample::new("water");
        first.containers.push(Container::new("N9 can"));
        let mut second = Sample::new("ice");
        second.run_this_sample = false;
        SampleBackground {
            data_files: DataFiles::new("SAMPLE BACKGROUND").with_files(["NIMROD00016698.raw"]),
            samples: vec![first, second],
            ..SampleBackground::default()
        }
    }

    fn block_text(background: &SampleBackground, trailer: &str) -> String {
        let blocks = write_sample_background_block(background, &Context::default(), true).unwrap();
        format!("{}\n\n{trailer}", blocks.join("\n\n"))
    }

    #[test]
    fn nested_records_attach_to_last_sample() {
        let text = block_text(&background(), "END          ");
        let mut cursor = LineCursor::new(&text);
        let parsed = parse_sample_background_block(&mut cursor, &Context::default()).unwrap();

        assert_eq!(parsed.samples.len(), 2);
        assert_eq!(parsed.samples[0].containers.len(), 1);
        assert!(parsed.samples[1].containers.is_empty());
        assert_eq!(parsed, background());
        assert_eq!(cursor.peek(), Some("END          "));
    }

    #[test]
    fn block_stops_at_next_background() {
        let text = block_text(&background(), "SAMPLE BACKGROUND          {");
        let mut cursor = LineCursor::new(&text);
        parse_sample_background_block(&mut cursor, &Context::default()).unwrap();
        assert_eq!(cursor.peek(), Some("SAMPLE BACKGROUND          {"));
    }

    #[test]
    fn running_samples_only() {
        let blocks =
            write_sample_background_block(&background(), &Context::default(), false).unwrap();
        let text = blocks.join("\n\n");
        assert!(text.contains("SAMPLE water"));
        assert!(!text.contains("SAMPLE ice"));
        assert_eq!(text.matches("GO          ").count(), 1);
    }

    #[test]
    fn container_before_any_sample_is_an_error() {
        let source = "SAMPLE BACKGROUND          {

0  1          Number of files and period number

}

CONTAINER          {
";
        let err = parse_sample_background_block(&mut LineCursor::new(source), &Context::default())
            .unwrap_err();
        assert_eq!(err.kind, RecordKind::SampleBackground);
        assert_eq!(err.cause, LineError::OrphanContainer);
    }

    #[test]
    fn unterminated_block_runs_out_of_input() {
        let source = "SAMPLE BACKGROUND          {

0  1          Number of files and period number

}
";
        let err = parse_sample_background_block(&mut LineCursor::new(source), &Context::default())
            .unwrap_err();
        assert_eq!(err.cause, LineError::EndOfInput);
    }
}
