//! Renders parse events back into compact JSON text.
use alloc::vec::Vec;
use core::fmt::{self, Write};

use crate::handler::Handler;

/// Open containers. Inside an object, `after_key` is set between a member
/// name and its value.
#[derive(Debug, Clone, Copy)]
enum Level {
    Array { first: bool },
    Object { first: bool, after_key: bool },
}

/// A [`Handler`] that writes the events it receives as compact JSON.
///
/// Events are rejected when the underlying writer fails, when a double is not
/// finite (JSON has no spelling for NaN or infinity), or when they do not fit
/// the document structure: a container end that does not match its start, a
/// value inside an object that is not preceded by a key, or a key that
/// follows another key.
///
/// ```
/// use keyfilter::{FilterKeyHandler, JsonWriter, ParserOptions, Reader, SliceStream};
/// use bstr::BStr;
///
/// let mut out = String::new();
/// let mut writer = JsonWriter::new(&mut out);
/// let mut filter = FilterKeyHandler::new(&mut writer, BStr::new("secret"));
/// Reader::new(ParserOptions::default())
///     .parse(&mut SliceStream::new(br#"{"user": "ann", "secret": [1, 2]}"#), &mut filter)
///     .unwrap();
/// assert_eq!(out, r#"{"user":"ann"}"#);
/// ```
#[derive(Debug)]
pub struct JsonWriter<W> {
    out: W,
    levels: Vec<Level>,
}

impl<W: Write> JsonWriter<W> {
    /// A writer that appends to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            levels: Vec::new(),
        }
    }

    /// Gives back the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Writes whatever separator has to precede the next value. Fails when an
    /// object member value arrives without its key.
    fn prefix(&mut self) -> fmt::Result {
        match self.levels.last_mut() {
            Some(Level::Array { first }) => {
                if !core::mem::replace(first, false) {
                    self.out.write_char(',')?;
                }
            }
            Some(Level::Object { after_key, .. }) => {
                if !core::mem::replace(after_key, false) {
                    return Err(fmt::Error);
                }
            }
            None => {}
        }
        Ok(())
    }

    fn write_value(&mut self, f: impl FnOnce(&mut W) -> fmt::Result) -> bool {
        self.prefix().and_then(|()| f(&mut self.out)).is_ok()
    }
}

impl<W: Write> Handler for JsonWriter<W> {
    fn null(&mut self) -> bool {
        self.write_value(|out| out.write_str("null"))
    }

    fn bool(&mut self, b: bool) -> bool {
        self.write_value(|out| out.write_str(if b { "true" } else { "false" }))
    }

    fn int(&mut self, i: i32) -> bool {
        self.write_value(|out| write!(out, "{i}"))
    }

    fn uint(&mut self, u: u32) -> bool {
        self.write_value(|out| write!(out, "{u}"))
    }

    fn int64(&mut self, i: i64) -> bool {
        self.write_value(|out| write!(out, "{i}"))
    }

    fn uint64(&mut self, u: u64) -> bool {
        self.write_value(|out| write!(out, "{u}"))
    }

    fn double(&mut self, d: f64) -> bool {
        if !d.is_finite() {
            return false;
        }
        // `Debug` keeps a `.0` or an exponent, so the text reads back as a
        // double rather than an integer.
        self.write_value(|out| write!(out, "{d:?}"))
    }

    fn raw_number(&mut self, text: &str) -> bool {
        self.write_value(|out| out.write_str(text))
    }

    fn string(&mut self, text: &str) -> bool {
        self.write_value(|out| write_quoted(text, out))
    }

    fn start_object(&mut self) -> bool {
        if !self.write_value(|out| out.write_char('{')) {
            return false;
        }
        self.levels.push(Level::Object {
            first: true,
            after_key: false,
        });
        true
    }

    fn key(&mut self, text: &str) -> bool {
        let Some(Level::Object { first, after_key }) = self.levels.last_mut() else {
            return false;
        };
        if core::mem::replace(after_key, true) {
            return false;
        }
        let needs_comma = !core::mem::replace(first, false);
        write_key(&mut self.out, text, needs_comma).is_ok()
    }

    fn end_object(&mut self, _member_count: usize) -> bool {
        matches!(
            self.levels.pop(),
            Some(Level::Object {
                after_key: false,
                ..
            })
        ) && self.out.write_char('}').is_ok()
    }

    fn start_array(&mut self) -> bool {
        if !self.write_value(|out| out.write_char('[')) {
            return false;
        }
        self.levels.push(Level::Array { first: true });
        true
    }

    fn end_array(&mut self, _element_count: usize) -> bool {
        matches!(self.levels.pop(), Some(Level::Array { .. })) && self.out.write_char(']').is_ok()
    }
}

fn write_key<W: Write + ?Sized>(out: &mut W, text: &str, needs_comma: bool) -> fmt::Result {
    if needs_comma {
        out.write_char(',')?;
    }
    write_quoted(text, out)?;
    out.write_char(':')
}

fn write_quoted<W: Write + ?Sized>(src: &str, f: &mut W) -> fmt::Result {
    f.write_char('"')?;
    write_escaped_string(src, f)?;
    f.write_char('"')
}

/// Escapes quotes, backslashes, control characters and the Unicode line
/// separators for use inside a JSON string literal.
fn write_escaped_string<W: Write + ?Sized>(src: &str, f: &mut W) -> fmt::Result {
    for c in src.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            // Pre-2019 JSON parsers choke on raw line separators.
            '\u{2028}' | '\u{2029}' => write!(f, "\\u{:04X}", c as u32)?,
            c if c.is_control() && c as u32 <= 0xFFFF => write!(f, "\\u{:04X}", c as u32)?,
            _ => f.write_char(c)?,
        }
    }
    Ok(())
}
