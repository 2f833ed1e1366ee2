use thiserror::Error;

/// Outcome of one pass of the [`Reader`](crate::Reader).
pub type ParseResult = Result<(), ParseError>;

/// A failed pass: what went wrong and the byte offset where it was noticed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{code} at offset {offset}")]
pub struct ParseError {
    /// What the reader found wrong.
    pub code: ParseErrorCode,
    /// Byte offset into the input at which the problem was detected.
    pub offset: usize,
}

impl ParseError {
    pub(crate) fn new(code: ParseErrorCode, offset: usize) -> Self {
        Self { code, offset }
    }
}

/// The ways a pass of the [`Reader`](crate::Reader) can fail.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorCode {
    /// The input held nothing but whitespace.
    #[error("the document is empty")]
    DocumentEmpty,
    /// Non-whitespace follows the root value.
    #[error("the document root is followed by other values")]
    DocumentRootNotSingular,
    /// A value was expected but none starts here.
    #[error("invalid value")]
    ValueInvalid,
    /// A member name was expected after `{` or `,`.
    #[error("missing a name for an object member")]
    ObjectMissName,
    /// A member name is not followed by `:`.
    #[error("missing a colon after an object member name")]
    ObjectMissColon,
    /// A member value is not followed by `,` or `}`.
    #[error("missing a comma or '}}' after an object member")]
    ObjectMissCommaOrCurlyBracket,
    /// An element is not followed by `,` or `]`.
    #[error("missing a comma or ']' after an array element")]
    ArrayMissCommaOrSquareBracket,
    /// A `\u` escape is not followed by four hex digits.
    #[error("incorrect hex digit after \\u escape in string")]
    StringUnicodeEscapeInvalidHex,
    /// A `\u` escape encodes a lone or mismatched surrogate.
    #[error("invalid surrogate pair in string")]
    StringUnicodeSurrogateInvalid,
    /// A backslash is followed by a character that is not an escape.
    #[error("invalid escape character in string")]
    StringEscapeInvalid,
    /// The input ends, or holds a NUL byte, before the closing quote.
    #[error("missing a closing quotation mark in string")]
    StringMissQuotationMark,
    /// A string holds a raw control character or invalid UTF-8.
    #[error("invalid encoding in string")]
    StringInvalidEncoding,
    /// A number overflows `f64`.
    #[error("number too big to be stored in a double")]
    NumberTooBig,
    /// A `.` is not followed by a digit.
    #[error("missing fraction part in number")]
    NumberMissFraction,
    /// An `e` or `E` is not followed by a digit.
    #[error("missing exponent in number")]
    NumberMissExponent,
    /// Containers nest deeper than [`ParserOptions::max_depth`](crate::ParserOptions::max_depth).
    #[error("nesting depth exceeds the configured limit")]
    DepthLimitExceeded,
    /// The handler returned `false`.
    #[error("parsing terminated by the handler")]
    Termination,
}
