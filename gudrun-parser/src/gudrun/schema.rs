//! Field tables
//!
//! A record's layout is an ordered table of [`Field`]s. Each field owns one group of
//! lines and knows how to read it into the record and write it back. Fields whose
//! presence depends on an earlier value (the geometry groups, the NeXus definition file)
//! carry a condition evaluated against the partially-read record, so discriminators are
//! always stored before any branch is taken.
//!
//! The same table drives both directions, which keeps reader and writer in lock-step:
//!
//!     read_fields(&SCHEMA, cursor, &mut record, &ctx)?;
//!     write_fields(&SCHEMA, &record, &ctx, &mut writer)?;

use crate::gudrun::cursor::{is_closing_brace, LineCursor};
use crate::gudrun::error::{LineError, SerializeError};
use crate::gudrun::model::{Coded, Geometry};
use crate::gudrun::parsing::ParseMode;
use crate::gudrun::scalars;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

/// Separator between values on one line.
pub const SPC2: &str = "  ";
/// Separator between the values and the trailing comment.
pub const SPC5: &str = "          ";

/// First line of every file.
pub const HEADER: &str = "'  '  '          '  '/'";

pub const COMPOSITION_END: &str = "end of composition input";
pub const GROUPING_END: &str = "to end input of specified values";
pub const RESONANCE_END: &str = "to finish specifying wavelength range of resonance";
pub const EXPONENTIAL_END: &str = "to specify end of exponential parameter input";

static STARTUP_FILES: Lazy<Regex> = Lazy::new(|| Regex::new(r"StartupFiles\S*").unwrap());

/// Document-wide state a field may depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    /// Geometry declared by the Beam; what `SameAsBeam` resolves to.
    pub beam_geometry: Geometry,
    pub mode: ParseMode,
}

impl Context {
    pub fn new(mode: ParseMode) -> Self {
        Self {
            beam_geometry: Geometry::FlatPlate,
            mode,
        }
    }

    pub fn with_beam_geometry(mut self, beam_geometry: Geometry) -> Self {
        self.beam_geometry = beam_geometry;
        self
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new(ParseMode::Full)
    }
}

pub type Reader<T> = fn(&mut LineCursor<'_>, &mut T, &Context) -> Result<(), LineError>;
pub type Writer<T> = fn(&T, &Context, &mut LineWriter) -> Result<(), SerializeError>;
pub type Condition<T> = fn(&T, &Context) -> bool;

/// One entry of a record layout.
pub struct Field<T> {
    pub name: &'static str,
    when: Condition<T>,
    read: Reader<T>,
    write: Writer<T>,
}

impl<T> Field<T> {
    pub fn new(name: &'static str, read: Reader<T>, write: Writer<T>) -> Self {
        Self {
            name,
            when: always::<T>,
            read,
            write,
        }
    }

    /// Only read and write this field when `condition` holds.
    pub fn when(self, condition: Condition<T>) -> Self {
        Self {
            when: condition,
            ..self
        }
    }

    pub fn applies(&self, record: &T, ctx: &Context) -> bool {
        (self.when)(record, ctx)
    }
}

fn always<T>(_: &T, _: &Context) -> bool {
    true
}

pub fn read_fields<T>(
    fields: &[Field<T>],
    cursor: &mut LineCursor<'_>,
    record: &mut T,
    ctx: &Context,
) -> Result<(), LineError> {
    for field in fields {
        if field.applies(record, ctx) {
            trace!(field = field.name, line = cursor.position(), "reading field");
            (field.read)(cursor, record, ctx)?;
        }
    }
    Ok(())
}

pub fn write_fields<T>(
    fields: &[Field<T>],
    record: &T,
    ctx: &Context,
    writer: &mut LineWriter,
) -> Result<(), SerializeError> {
    for field in fields {
        if field.applies(record, ctx) {
            (field.write)(record, ctx, writer)?;
        }
    }
    Ok(())
}

/// Read entries until a line containing `sentinel`, which is consumed.
///
/// A closing brace before the sentinel means the list was never terminated; the record
/// is reported broken instead of reading on into the next one.
pub fn read_list<E>(
    cursor: &mut LineCursor<'_>,
    sentinel: &'static str,
    mut entry: impl FnMut(&str) -> Result<E, LineError>,
) -> Result<Vec<E>, LineError> {
    let mut entries = Vec::new();
    loop {
        let line = cursor.pop()?;
        if line.contains(sentinel) {
            return Ok(entries);
        }
        if is_closing_brace(line) {
            return Err(LineError::UnterminatedList {
                sentinel,
                line: line.to_string(),
            });
        }
        entries.push(entry(line)?);
    }
}

pub fn read_word(cursor: &mut LineCursor<'_>) -> Result<String, LineError> {
    Ok(scalars::first_word(cursor.pop()?)?.to_string())
}

pub fn read_float(cursor: &mut LineCursor<'_>) -> Result<f64, LineError> {
    Ok(scalars::nth_float(cursor.pop()?, 0)?)
}

pub fn read_unsigned(cursor: &mut LineCursor<'_>) -> Result<u32, LineError> {
    Ok(scalars::nth_unsigned(cursor.pop()?, 0)?)
}

pub fn read_bool(cursor: &mut LineCursor<'_>) -> Result<bool, LineError> {
    Ok(scalars::nth_bool(cursor.pop()?, 0)?)
}

/// The first `n` floats of the next line.
pub fn read_floats(cursor: &mut LineCursor<'_>, n: usize) -> Result<Vec<f64>, LineError> {
    Ok(scalars::first_n_floats(cursor.pop()?, n)?)
}

/// An integer-coded enum value.
pub fn read_coded<E: Coded>(cursor: &mut LineCursor<'_>) -> Result<E, LineError> {
    let line = cursor.pop()?;
    let code = scalars::nth_int(line, 0)?;
    E::from_code(code).ok_or_else(|| LineError::UnknownVariant {
        token: code.to_string(),
        expected: E::DESCRIPTION,
        line: line.to_string(),
    })
}

/// A file reference, reduced to its `StartupFiles/...` segment when it has one.
pub fn read_startup_file(cursor: &mut LineCursor<'_>) -> Result<String, LineError> {
    read_word(cursor).map(|word| resolve_startup_path(&word))
}

pub fn resolve_startup_path(path: &str) -> String {
    match STARTUP_FILES.find(path) {
        Some(found) => found.as_str().to_string(),
        None => path.to_string(),
    }
}

/// Values that can be rendered as one token.
pub trait FieldValue {
    fn render(&self) -> String;
}

impl FieldValue for f64 {
    /// Shortest representation that reads back to the same value.
    fn render(&self) -> String {
        format!("{self:?}")
    }
}

impl FieldValue for bool {
    fn render(&self) -> String {
        let flag = if *self { "1" } else { "0" };
        flag.to_string()
    }
}

impl FieldValue for str {
    fn render(&self) -> String {
        self.to_string()
    }
}

impl FieldValue for String {
    fn render(&self) -> String {
        self.clone()
    }
}

macro_rules! integer_field_value {
    ($($ty:ty),*) => {
        $(impl FieldValue for $ty {
            fn render(&self) -> String {
                self.to_string()
            }
        })*
    };
}

integer_field_value!(i32, i64, u32, usize);

pub fn render<V: FieldValue + ?Sized>(value: &V) -> String {
    value.render()
}

/// Check that `value` reads back as a single word.
pub fn word<'a>(field: &'static str, value: &'a str) -> Result<&'a str, SerializeError> {
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        Err(SerializeError::InvalidToken {
            field,
            value: value.to_string(),
        })
    } else {
        Ok(value)
    }
}

/// Accumulates the lines of one record.
#[derive(Debug, Default)]
pub struct LineWriter {
    lines: Vec<String>,
}

impl LineWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// `values` joined by [`SPC2`], then [`SPC5`] and the comment.
    pub fn line<I, S>(&mut self, values: I, comment: &str)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let values: Vec<S> = values.into_iter().collect();
        let values: Vec<&str> = values.iter().map(AsRef::as_ref).collect();
        self.lines
            .push(format!("{}{SPC5}{comment}", values.join(SPC2)));
    }

    /// A single-value line.
    pub fn value<V: FieldValue + ?Sized>(&mut self, value: &V, comment: &str) {
        self.line([value.render()], comment);
    }

    pub fn raw(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// `{header}          {` followed by a blank line.
    pub fn open(&mut self, header: &str) {
        self.raw(format!("{header}{SPC5}{{"));
        self.blank();
    }

    /// A blank line, then the closing brace.
    pub fn close(&mut self) {
        self.blank();
        self.raw("}");
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn finish(self) -> String {
        self.lines.join("\n")
    }
}
