//! Record schemas
//!
//! One module per record kind. Each declares its line layout as a [`Field`] table and
//! implements [`Schema`], after which [`parse_record`] and [`write_record`] handle it
//! uniformly:
//!
//!     INSTRUMENT          {           <- header field
//!
//!     NIMROD          Instrument name <- body fields, in table order
//!     ...
//!
//!     }                               <- closing brace, consumed by parse_record
//!
//! Whatever goes wrong inside a record surfaces as a [`RecordParseError`] naming the
//! record kind. The nested Sample Background block and the Components section are not
//! plain records and have their own entry points.

pub mod beam;
pub mod components;
pub mod container;
pub mod instrument;
pub mod normalisation;
pub mod sample;
pub mod sample_background;
pub mod shared;

use crate::gudrun::cursor::{is_closing_brace, LineCursor};
use crate::gudrun::error::{RecordKind, RecordParseError, SerializeError};
use crate::gudrun::schema::{read_fields, write_fields, Context, Field, LineWriter};
use tracing::debug;

pub use components::{parse_components, write_components};
pub use sample_background::{parse_sample_background_block, write_sample_background_block};

/// A record kind with a fixed line layout.
pub trait Schema: Default + 'static {
    const KIND: RecordKind;

    fn fields() -> &'static [Field<Self>];
}

/// Read one record, up to and including its closing brace.
pub fn parse_record<T: Schema>(
    cursor: &mut LineCursor<'_>,
    ctx: &Context,
) -> Result<T, RecordParseError> {
    let start = cursor.position();
    let mut record = T::default();
    read_fields(T::fields(), cursor, &mut record, ctx)
        .and_then(|()| cursor.skip_until(is_closing_brace))
        .map_err(|cause| RecordParseError::new(T::KIND, cause))?;
    debug!(kind = %T::KIND, start, end = cursor.position(), "parsed record");
    Ok(record)
}

/// Render one record, header to closing brace.
pub fn write_record<T: Schema>(record: &T, ctx: &Context) -> Result<String, SerializeError> {
    let mut writer = LineWriter::new();
    write_fields(T::fields(), record, ctx, &mut writer)?;
    writer.close();
    debug!(kind = %T::KIND, "wrote record");
    Ok(writer.finish())
}
