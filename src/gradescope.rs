#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::io;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::ser::Formatter;
use typed_builder::TypedBuilder;

/// Zero-score result reported when a run fails before producing output.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TypedBuilder)]
#[builder(doc)]
pub struct GradescopeFailure {
    /// Overall score.
    #[builder(default)]
    pub score:  u32,
    /// Text shown to the student.
    #[builder(setter(into))]
    pub output: String,
}

impl GradescopeFailure {
    /// Wraps an error, including its whole cause chain, with a score of 0.
    pub fn from_error(err: &anyhow::Error) -> Self {
        Self::builder().output(format!("{err:#}")).build()
    }

    /// Serializes as `{"score": 0, "output": "..."}`.
    pub fn to_json(&self) -> Result<String> {
        to_spaced_json(self)
    }
}

/// Serializes `value` with `", "` and `": "` separators and every non-ASCII
/// character escaped, the layout graders downstream compare against.
pub fn to_spaced_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut ser = serde_json::Serializer::with_formatter(Vec::new(), SpacedAsciiFormatter);
    value
        .serialize(&mut ser)
        .context("Could not serialize result")?;
    String::from_utf8(ser.into_inner()).context("Serialized result is not UTF-8")
}

/// JSON formatter with spaces after separators and `\uXXXX` escapes for
/// anything outside printable ASCII.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpacedAsciiFormatter;

impl Formatter for SpacedAsciiFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut units = [0u16; 2];
        for c in fragment.chars() {
            if c.is_ascii() && c != '\x7f' {
                writer.write_all(&[c as u8])?;
            } else {
                for unit in c.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}
