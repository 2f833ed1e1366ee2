//! Decoding of `\uXXXX` escapes, including UTF-16 surrogate pairs.
//!
//! [`UnicodeEscapeBuffer`] takes the hex digits of one escape at a time. A high
//! surrogate is held until the digits of the following escape arrive, and the
//! pair is decoded into a single `char`. Lone or out-of-order surrogates are
//! rejected.
use crate::error::ParseErrorCode;

/// What the decoder needs after one more hex digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Escape {
    /// Fewer than four digits of the current escape so far.
    NeedMore,
    /// A high surrogate was decoded; the next thing in the string must be a
    /// `\u` escape holding the low half.
    HighSurrogate,
    Char(char),
}

#[derive(Debug, Default)]
pub(crate) struct UnicodeEscapeBuffer {
    acc: u32,
    len: u8,
    high: Option<u32>,
}

impl UnicodeEscapeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears any accumulated digits and a pending high surrogate.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[inline]
    fn hex_val(b: u8) -> Option<u32> {
        match b {
            b'0'..=b'9' => Some(u32::from(b - b'0')),
            b'a'..=b'f' => Some(u32::from(b - b'a') + 10),
            b'A'..=b'F' => Some(u32::from(b - b'A') + 10),
            _ => None,
        }
    }

    /// Takes one hex digit of a `\u` escape.
    pub fn feed(&mut self, b: u8) -> Result<Escape, ParseErrorCode> {
        let d = Self::hex_val(b).ok_or(ParseErrorCode::StringUnicodeEscapeInvalidHex)?;
        self.acc = (self.acc << 4) | d;
        self.len += 1;
        if self.len < 4 {
            return Ok(Escape::NeedMore);
        }

        let code = self.acc;
        self.acc = 0;
        self.len = 0;

        match (self.high.take(), code) {
            (Some(high), 0xDC00..=0xDFFF) => {
                let combined = 0x10000 + ((high - 0xD800) << 10) + (code - 0xDC00);
                char::from_u32(combined)
                    .map(Escape::Char)
                    .ok_or(ParseErrorCode::StringUnicodeSurrogateInvalid)
            }
            (Some(_), _) | (None, 0xDC00..=0xDFFF) => {
                Err(ParseErrorCode::StringUnicodeSurrogateInvalid)
            }
            (None, 0xD800..=0xDBFF) => {
                self.high = Some(code);
                Ok(Escape::HighSurrogate)
            }
            (None, _) => char::from_u32(code)
                .map(Escape::Char)
                .ok_or(ParseErrorCode::StringUnicodeSurrogateInvalid),
        }
    }
}
