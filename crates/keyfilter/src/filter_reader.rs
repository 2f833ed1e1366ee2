use bstr::{BStr, BString, ByteSlice};

use crate::{
    error::ParseResult,
    filter::FilterKeyHandler,
    handler::{Generator, Handler},
    options::ParserOptions,
    reader::Reader,
    stream::InputStream,
};

/// A [`Generator`] that reads JSON from a stream and delivers it with one
/// key filtered out.
///
/// Every call to [`generate`](Generator::generate) wraps the given handler in
/// a [`FilterKeyHandler`] and runs a [`Reader`] over the stream into it. The
/// outcome of the pass is kept and available from
/// [`parse_result`](Self::parse_result). A second call continues reading
/// wherever the stream was left.
///
/// # Examples
///
/// ```
/// use keyfilter::{FilterKeyReader, ParseErrorCode, ParserOptions, SliceStream, Value};
///
/// let mut reader = FilterKeyReader::new(SliceStream::new(b"[1,"), "k", ParserOptions::default());
/// assert_eq!(Value::populate(&mut reader), None);
/// let err = reader.parse_result().unwrap().as_ref().unwrap_err();
/// assert_eq!(err.code, ParseErrorCode::ValueInvalid);
/// assert_eq!(err.offset, 3);
/// ```
#[derive(Debug)]
pub struct FilterKeyReader<S> {
    stream: S,
    key: BString,
    options: ParserOptions,
    result: Option<ParseResult>,
}

impl<S: InputStream> FilterKeyReader<S> {
    /// Reads from `stream` with `options`, dropping every member named `key`.
    pub fn new(stream: S, key: impl AsRef<[u8]>, options: ParserOptions) -> Self {
        Self {
            stream,
            key: BString::from(key.as_ref()),
            options,
            result: None,
        }
    }

    /// The member name being dropped.
    #[must_use]
    pub fn key(&self) -> &BStr {
        self.key.as_bstr()
    }

    /// Outcome of the most recent pass, `None` before the first one.
    #[must_use]
    pub fn parse_result(&self) -> Option<&ParseResult> {
        self.result.as_ref()
    }

    /// Gives back the stream, positioned wherever the last pass stopped.
    pub fn into_stream(self) -> S {
        self.stream
    }
}

impl<S: InputStream> Generator for FilterKeyReader<S> {
    fn generate<H: Handler>(&mut self, handler: &mut H) -> bool {
        let mut filter = FilterKeyHandler::new(handler, self.key.as_bstr());
        let result = Reader::new(self.options).parse(&mut self.stream, &mut filter);
        let ok = result.is_ok();
        match &result {
            Ok(()) => tracing::debug!(key = %self.key, bytes = self.stream.tell(), "filter pass complete"),
            Err(err) => tracing::debug!(key = %self.key, error = %err, "filter pass failed"),
        }
        self.result = Some(result);
        ok
    }
}
