//! A push-style JSON reader.
//!
//! [`Reader`] pulls bytes from an [`InputStream`] and calls one [`Handler`]
//! method per token, in document order. It does not build anything itself:
//! the handler decides what to keep. Nesting is tracked with an explicit frame
//! stack instead of recursion, so the only limit on depth is
//! [`ParserOptions::max_depth`].
//!
//! # Examples
//!
//! ```rust
//! use keyfilter::{Event, EventLog, ParserOptions, Reader, SliceStream};
//!
//! let mut log = EventLog::new();
//! Reader::new(ParserOptions::default())
//!     .parse(&mut SliceStream::new(r#"{"k": [null, -3]}"#), &mut log)
//!     .unwrap();
//! assert_eq!(
//!     log.events(),
//!     &[
//!         Event::StartObject,
//!         Event::Key("k".into()),
//!         Event::StartArray,
//!         Event::Null,
//!         Event::Int(-3),
//!         Event::EndArray(2),
//!         Event::EndObject(1),
//!     ]
//! );
//! ```
#![allow(clippy::enum_glob_use)]

use alloc::vec::Vec;

use crate::{
    error::{ParseError, ParseErrorCode, ParseResult},
    escape_buffer::{Escape, UnicodeEscapeBuffer},
    handler::Handler,
    literal_buffer::{ExpectedLiteralBuffer, Literal, Step},
    options::ParserOptions,
    stream::InputStream,
};

use ParseErrorCode::*;

/// One open container and the number of members/elements seen so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Object { members: usize },
    Array { elements: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// A value is expected: the root, an array element, or a member value.
    Value,
    /// Inside an object, after `{` or `,`.
    BeforePropertyName,
    /// A value just finished; expect `,` or the end of the enclosing container.
    AfterValue,
}

/// Parses one JSON document per call to [`parse`](Reader::parse).
///
/// The reader owns only scratch space: a frame stack and a buffer for the
/// decoded text of the current string, key or number. Both are reused across
/// passes.
#[derive(Debug)]
pub struct Reader {
    options: ParserOptions,
    frames: Vec<Frame>,
    buffer: Vec<u8>,
    escape: UnicodeEscapeBuffer,
}

impl Default for Reader {
    fn default() -> Self {
        Self::new(ParserOptions::default())
    }
}

impl Reader {
    /// A reader configured by `options`. It can be reused for any number of
    /// passes.
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Self {
            options,
            frames: Vec::with_capacity(16),
            buffer: Vec::new(),
            escape: UnicodeEscapeBuffer::new(),
        }
    }

    /// The options every pass runs with.
    #[must_use]
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Reads one document from `stream`, calling `handler` for every token.
    ///
    /// # Errors
    ///
    /// Returns the first syntax error with the byte offset at which it was
    /// detected, or [`ParseErrorCode::Termination`] when a handler method
    /// returned `false`. Events delivered before the error are not retracted.
    pub fn parse<S, H>(&mut self, stream: &mut S, handler: &mut H) -> ParseResult
    where
        S: InputStream + ?Sized,
        H: Handler + ?Sized,
    {
        self.frames.clear();
        self.escape.reset();
        match self.parse_document(stream, handler) {
            Ok(()) => Ok(()),
            Err(code) => {
                let err = ParseError::new(code, stream.tell());
                #[cfg(any(test, feature = "fuzzing"))]
                if self.options.panic_on_error && code != Termination {
                    panic!("{err}");
                }
                tracing::debug!(code = %err.code, offset = err.offset, "parse failed");
                Err(err)
            }
        }
    }

    fn parse_document<S, H>(&mut self, s: &mut S, h: &mut H) -> Result<(), ParseErrorCode>
    where
        S: InputStream + ?Sized,
        H: Handler + ?Sized,
    {
        skip_whitespace(s);
        if s.peek().is_none() {
            return Err(DocumentEmpty);
        }

        let mut state = ParseState::Value;
        loop {
            state = match state {
                ParseState::Value => self.parse_value(s, h)?,
                ParseState::BeforePropertyName => self.parse_property_name(s, h)?,
                ParseState::AfterValue => match self.after_value(s, h)? {
                    Some(next) => next,
                    None => break,
                },
            };
        }

        if !self.options.stop_when_done {
            skip_whitespace(s);
            if s.peek().is_some() {
                return Err(DocumentRootNotSingular);
            }
        }
        Ok(())
    }

    fn parse_value<S, H>(&mut self, s: &mut S, h: &mut H) -> Result<ParseState, ParseErrorCode>
    where
        S: InputStream + ?Sized,
        H: Handler + ?Sized,
    {
        skip_whitespace(s);
        match s.peek() {
            Some(b'{') => {
                self.open(Frame::Object { members: 0 })?;
                s.take();
                accept(h.start_object())?;
                skip_whitespace(s);
                if s.peek() == Some(b'}') {
                    s.take();
                    self.frames.pop();
                    accept(h.end_object(0))?;
                    Ok(self.complete_value())
                } else {
                    Ok(ParseState::BeforePropertyName)
                }
            }
            Some(b'[') => {
                self.open(Frame::Array { elements: 0 })?;
                s.take();
                accept(h.start_array())?;
                skip_whitespace(s);
                if s.peek() == Some(b']') {
                    s.take();
                    self.frames.pop();
                    accept(h.end_array(0))?;
                    Ok(self.complete_value())
                } else {
                    Ok(ParseState::Value)
                }
            }
            Some(b'"') => {
                s.take();
                self.parse_string(s)?;
                accept(h.string(self.text()?))?;
                Ok(self.complete_value())
            }
            Some(b'n' | b't' | b'f') => {
                self.parse_literal(s, h)?;
                Ok(self.complete_value())
            }
            Some(b'-' | b'0'..=b'9') => {
                self.parse_number(s, h)?;
                Ok(self.complete_value())
            }
            _ => Err(ValueInvalid),
        }
    }

    fn parse_property_name<S, H>(
        &mut self,
        s: &mut S,
        h: &mut H,
    ) -> Result<ParseState, ParseErrorCode>
    where
        S: InputStream + ?Sized,
        H: Handler + ?Sized,
    {
        skip_whitespace(s);
        if s.peek() != Some(b'"') {
            return Err(ObjectMissName);
        }
        s.take();
        self.parse_string(s)?;
        accept(h.key(self.text()?))?;
        if let Some(Frame::Object { members }) = self.frames.last_mut() {
            *members += 1;
        }

        skip_whitespace(s);
        if s.peek() != Some(b':') {
            return Err(ObjectMissColon);
        }
        s.take();
        Ok(ParseState::Value)
    }

    /// Returns `None` once the root value is complete.
    fn after_value<S, H>(
        &mut self,
        s: &mut S,
        h: &mut H,
    ) -> Result<Option<ParseState>, ParseErrorCode>
    where
        S: InputStream + ?Sized,
        H: Handler + ?Sized,
    {
        let Some(frame) = self.frames.last().copied() else {
            return Ok(None);
        };
        skip_whitespace(s);
        match (frame, s.peek()) {
            (Frame::Object { .. }, Some(b',')) => {
                s.take();
                Ok(Some(ParseState::BeforePropertyName))
            }
            (Frame::Object { members }, Some(b'}')) => {
                s.take();
                self.frames.pop();
                accept(h.end_object(members))?;
                Ok(Some(self.complete_value()))
            }
            (Frame::Object { .. }, _) => Err(ObjectMissCommaOrCurlyBracket),
            (Frame::Array { .. }, Some(b',')) => {
                s.take();
                Ok(Some(ParseState::Value))
            }
            (Frame::Array { elements }, Some(b']')) => {
                s.take();
                self.frames.pop();
                accept(h.end_array(elements))?;
                Ok(Some(self.complete_value()))
            }
            (Frame::Array { .. }, _) => Err(ArrayMissCommaOrSquareBracket),
        }
    }

    fn open(&mut self, frame: Frame) -> Result<(), ParseErrorCode> {
        if self.frames.len() >= self.options.max_depth {
            return Err(DepthLimitExceeded);
        }
        self.frames.push(frame);
        Ok(())
    }

    /// Bookkeeping after a whole value (scalar or container) was delivered.
    fn complete_value(&mut self) -> ParseState {
        if let Some(Frame::Array { elements }) = self.frames.last_mut() {
            *elements += 1;
        }
        ParseState::AfterValue
    }

    /// The decoded string or number text sitting in the scratch buffer.
    fn text(&self) -> Result<&str, ParseErrorCode> {
        core::str::from_utf8(&self.buffer).map_err(|_| StringInvalidEncoding)
    }

    // ---------------------------------------------------------------------
    // Strings
    // ---------------------------------------------------------------------

    /// Decodes a string body into `buffer`; the opening quote is already
    /// consumed.
    fn parse_string<S: InputStream + ?Sized>(&mut self, s: &mut S) -> Result<(), ParseErrorCode> {
        self.buffer.clear();
        loop {
            match s.peek() {
                None | Some(b'\0') => return Err(StringMissQuotationMark),
                Some(b'"') => {
                    s.take();
                    return Ok(());
                }
                Some(b'\\') => {
                    s.take();
                    self.parse_escape(s)?;
                }
                Some(0x01..=0x1F) => return Err(StringInvalidEncoding),
                Some(b) => {
                    s.take();
                    self.buffer.push(b);
                }
            }
        }
    }

    fn parse_escape<S: InputStream + ?Sized>(&mut self, s: &mut S) -> Result<(), ParseErrorCode> {
        let decoded = match s.peek() {
            Some(b @ (b'"' | b'\\' | b'/')) => b,
            Some(b'b') => 0x08,
            Some(b'f') => 0x0C,
            Some(b'n') => b'\n',
            Some(b'r') => b'\r',
            Some(b't') => b'\t',
            Some(b'u') => {
                s.take();
                return self.parse_unicode_escape(s);
            }
            _ => return Err(StringEscapeInvalid),
        };
        s.take();
        self.buffer.push(decoded);
        Ok(())
    }

    /// Hex digits of a `\u` escape, plus the second escape of a surrogate
    /// pair.
    fn parse_unicode_escape<S: InputStream + ?Sized>(
        &mut self,
        s: &mut S,
    ) -> Result<(), ParseErrorCode> {
        self.escape.reset();
        loop {
            let b = s.peek().ok_or(StringUnicodeEscapeInvalidHex)?;
            let step = self.escape.feed(b)?;
            s.take();
            match step {
                Escape::NeedMore => {}
                Escape::HighSurrogate => {
                    if s.peek() != Some(b'\\') {
                        return Err(StringUnicodeSurrogateInvalid);
                    }
                    s.take();
                    if s.peek() != Some(b'u') {
                        return Err(StringUnicodeSurrogateInvalid);
                    }
                    s.take();
                }
                Escape::Char(c) => {
                    let mut utf8 = [0u8; 4];
                    self.buffer
                        .extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
                    return Ok(());
                }
            }
        }
    }

    // ---------------------------------------------------------------------
    // Literals and numbers
    // ---------------------------------------------------------------------

    fn parse_literal<S, H>(&mut self, s: &mut S, h: &mut H) -> Result<(), ParseErrorCode>
    where
        S: InputStream + ?Sized,
        H: Handler + ?Sized,
    {
        let first = s.take().ok_or(ValueInvalid)?;
        let mut expected = ExpectedLiteralBuffer::new(first);
        loop {
            let b = s.peek().ok_or(ValueInvalid)?;
            match expected.step(b) {
                Step::NeedMore => {
                    s.take();
                }
                Step::Done(literal) => {
                    s.take();
                    return accept(match literal {
                        Literal::Null => h.null(),
                        Literal::True => h.bool(true),
                        Literal::False => h.bool(false),
                    });
                }
                Step::Reject => return Err(ValueInvalid),
            }
        }
    }

    fn parse_number<S, H>(&mut self, s: &mut S, h: &mut H) -> Result<(), ParseErrorCode>
    where
        S: InputStream + ?Sized,
        H: Handler + ?Sized,
    {
        self.buffer.clear();
        if s.peek() == Some(b'-') {
            self.push_taken(s);
        }
        match s.peek() {
            Some(b'0') => self.push_taken(s),
            Some(b'1'..=b'9') => self.push_digits(s),
            _ => return Err(ValueInvalid),
        }

        let mut integral = true;
        if s.peek() == Some(b'.') {
            integral = false;
            self.push_taken(s);
            if !matches!(s.peek(), Some(b'0'..=b'9')) {
                return Err(NumberMissFraction);
            }
            self.push_digits(s);
        }
        if matches!(s.peek(), Some(b'e' | b'E')) {
            integral = false;
            self.push_taken(s);
            if matches!(s.peek(), Some(b'+' | b'-')) {
                self.push_taken(s);
            }
            if !matches!(s.peek(), Some(b'0'..=b'9')) {
                return Err(NumberMissExponent);
            }
            self.push_digits(s);
        }

        let text = self.text()?;
        let accepted = if self.options.numbers_as_strings {
            h.raw_number(text)
        } else if integral {
            emit_integer(text, h)?
        } else {
            emit_double(text, h)?
        };
        accept(accepted)
    }

    #[inline]
    fn push_taken<S: InputStream + ?Sized>(&mut self, s: &mut S) {
        if let Some(b) = s.take() {
            self.buffer.push(b);
        }
    }

    #[inline]
    fn push_digits<S: InputStream + ?Sized>(&mut self, s: &mut S) {
        while let Some(b @ b'0'..=b'9') = s.peek() {
            s.take();
            self.buffer.push(b);
        }
    }
}

#[inline]
fn accept(handler_result: bool) -> Result<(), ParseErrorCode> {
    if handler_result {
        Ok(())
    } else {
        Err(Termination)
    }
}

#[inline]
fn skip_whitespace<S: InputStream + ?Sized>(s: &mut S) {
    while matches!(s.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
        s.take();
    }
}

/// Picks the narrowest integer callback for `text`; integers outside the
/// 64-bit range fall back to a double.
fn emit_integer<H: Handler + ?Sized>(text: &str, h: &mut H) -> Result<bool, ParseErrorCode> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, text),
    };
    let Ok(magnitude) = digits.parse::<u64>() else {
        return emit_double(text, h);
    };
    if !negative {
        return Ok(match u32::try_from(magnitude) {
            Ok(u) => h.uint(u),
            Err(_) => h.uint64(magnitude),
        });
    }
    match 0i64.checked_sub_unsigned(magnitude) {
        Some(i) => Ok(match i32::try_from(i) {
            Ok(i) => h.int(i),
            Err(_) => h.int64(i),
        }),
        None => emit_double(text, h),
    }
}

fn emit_double<H: Handler + ?Sized>(text: &str, h: &mut H) -> Result<bool, ParseErrorCode> {
    let d: f64 = text.parse().map_err(|_| ValueInvalid)?;
    if d.is_infinite() {
        return Err(NumberTooBig);
    }
    Ok(h.double(d))
}
