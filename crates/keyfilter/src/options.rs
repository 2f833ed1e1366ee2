/// Configuration for the [`Reader`](crate::Reader).
///
/// # Examples
///
/// ```rust
/// use keyfilter::{ParserOptions, Reader};
///
/// let reader = Reader::new(ParserOptions {
///     numbers_as_strings: true,
///     ..Default::default()
/// });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Maximum nesting depth of objects and arrays.
    ///
    /// Opening a container beyond this depth fails the pass with
    /// [`ParseErrorCode::DepthLimitExceeded`](crate::ParseErrorCode).
    ///
    /// # Default
    ///
    /// `1024`
    pub max_depth: usize,

    /// Whether to hand numbers to the handler as their source text.
    ///
    /// When `true`, every number produces exactly one
    /// [`Handler::raw_number`](crate::Handler::raw_number) call instead of one
    /// of the typed integer or double callbacks, and no precision is lost.
    ///
    /// # Default
    ///
    /// `false`
    pub numbers_as_strings: bool,

    /// Whether to stop as soon as the root value is complete.
    ///
    /// By default anything but whitespace after the root value is an error.
    /// With this set the reader returns right after the root value and leaves
    /// the rest of the stream unread, which lets a caller read several
    /// concatenated documents with successive passes.
    ///
    /// # Default
    ///
    /// `false`
    pub stop_when_done: bool,

    #[cfg(any(test, feature = "fuzzing"))]
    /// Panic on syntax errors instead of returning them.
    ///
    /// Only available in test and fuzzing builds, to get a backtrace at the
    /// point of failure.
    pub panic_on_error: bool,
}

impl ParserOptions {
    /// Default for [`max_depth`](Self::max_depth).
    pub const DEFAULT_MAX_DEPTH: usize = 1024;
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            numbers_as_strings: false,
            stop_when_done: false,
            #[cfg(any(test, feature = "fuzzing"))]
            panic_on_error: false,
        }
    }
}
