//! Byte sources for the [`Reader`](crate::Reader).
//!
//! The reader only ever looks one byte ahead, so an input stream needs three
//! operations: look at the next byte, consume it, and report how many bytes
//! have been consumed so far (used for error offsets).
#[cfg(feature = "std")]
use alloc::{boxed::Box, vec};

/// A forward-only byte source with one byte of lookahead.
pub trait InputStream {
    /// The next byte without consuming it, `None` at end of input.
    fn peek(&mut self) -> Option<u8>;
    /// Consumes and returns the next byte, `None` at end of input.
    fn take(&mut self) -> Option<u8>;
    /// Number of bytes consumed so far.
    fn tell(&self) -> usize;
}

impl<S: InputStream + ?Sized> InputStream for &mut S {
    #[inline]
    fn peek(&mut self) -> Option<u8> {
        (**self).peek()
    }

    #[inline]
    fn take(&mut self) -> Option<u8> {
        (**self).take()
    }

    #[inline]
    fn tell(&self) -> usize {
        (**self).tell()
    }
}

/// Reads from a byte slice already in memory.
#[derive(Debug, Clone)]
pub struct SliceStream<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> SliceStream<'a> {
    /// Reads `bytes` from the start.
    pub fn new(bytes: &'a (impl AsRef<[u8]> + ?Sized)) -> Self {
        Self {
            bytes: bytes.as_ref(),
            pos: 0,
        }
    }

    /// The part of the input not consumed yet.
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }
}

impl InputStream for SliceStream<'_> {
    #[inline]
    fn peek(&mut self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    #[inline]
    fn take(&mut self) -> Option<u8> {
        let b = self.bytes.get(self.pos).copied()?;
        self.pos += 1;
        Some(b)
    }

    #[inline]
    fn tell(&self) -> usize {
        self.pos
    }
}

/// Reads from any [`std::io::Read`] through a fixed-size buffer.
///
/// A read error ends the stream as if the input were exhausted; the error is
/// kept and handed out by [`take_error`](ReadStream::take_error), so callers
/// can tell a truncated document from a failing device.
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct ReadStream<R> {
    inner: R,
    buf: Box<[u8]>,
    start: usize,
    end: usize,
    consumed: usize,
    eof: bool,
    error: Option<std::io::Error>,
}

#[cfg(feature = "std")]
impl<R: std::io::Read> ReadStream<R> {
    /// Buffer size used by [`new`](Self::new).
    pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

    /// Reads from `inner` through a buffer of
    /// [`DEFAULT_BUFFER_SIZE`](Self::DEFAULT_BUFFER_SIZE) bytes.
    pub fn new(inner: R) -> Self {
        Self::with_capacity(Self::DEFAULT_BUFFER_SIZE, inner)
    }

    /// Reads from `inner` through a buffer of `capacity` bytes, at least one.
    pub fn with_capacity(capacity: usize, inner: R) -> Self {
        Self {
            inner,
            buf: vec![0; capacity.max(1)].into_boxed_slice(),
            start: 0,
            end: 0,
            consumed: 0,
            eof: false,
            error: None,
        }
    }

    /// The first I/O error hit while reading, if any.
    pub fn take_error(&mut self) -> Option<std::io::Error> {
        self.error.take()
    }

    /// Gives back the reader. Bytes already buffered are lost.
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn fill(&mut self) -> bool {
        if self.start < self.end {
            return true;
        }
        if self.eof {
            return false;
        }
        loop {
            match self.inner.read(&mut self.buf) {
                Ok(0) => {
                    self.eof = true;
                    return false;
                }
                Ok(n) => {
                    self.start = 0;
                    self.end = n;
                    return true;
                }
                Err(err) if err.kind() == std::io::ErrorKind::Interrupted => {}
                Err(err) => {
                    tracing::debug!(error = %err, offset = self.consumed, "read failed");
                    self.error = Some(err);
                    self.eof = true;
                    return false;
                }
            }
        }
    }
}

#[cfg(feature = "std")]
impl<R: std::io::Read> InputStream for ReadStream<R> {
    #[inline]
    fn peek(&mut self) -> Option<u8> {
        if self.fill() {
            Some(self.buf[self.start])
        } else {
            None
        }
    }

    #[inline]
    fn take(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.start += 1;
        self.consumed += 1;
        Some(b)
    }

    #[inline]
    fn tell(&self) -> usize {
        self.consumed
    }
}
