//! Drops object members by key while forwarding everything else.
//!
//! [`FilterKeyHandler`] wraps a downstream [`Handler`]. Whenever it sees an
//! object key equal to the filter key it swallows the key and the whole value
//! that follows, however deeply nested, and resumes forwarding right after it.
//! Because members disappear, the member count the producer reports for an
//! object is replaced by the number of keys actually forwarded.
//!
//! ```
//! use keyfilter::{FilterKeyHandler, Generator, Value, ValueBuilder};
//! use bstr::BStr;
//!
//! let source: Value = Value::Object(
//!     [("coordinates".into(), Value::from(1u64)), ("z".into(), Value::from(2u64))].into(),
//! );
//! let mut builder = ValueBuilder::new();
//! let mut filter = FilterKeyHandler::new(&mut builder, BStr::new("coordinates"));
//! assert!((&source).generate(&mut filter));
//! assert_eq!(builder.finish().unwrap().to_string(), r#"{"z":2}"#);
//! ```
use alloc::vec::Vec;

use bstr::BStr;

use crate::handler::Handler;

/// Forwards events to `out`, suppressing the value of every member named `key`.
///
/// The only state is the suppression depth and one forwarded-member counter
/// per open object. An instance is good for one pass over one document.
#[derive(Debug)]
pub struct FilterKeyHandler<'a, H: ?Sized> {
    out: &'a mut H,
    key: &'a BStr,
    /// 0 while forwarding. Otherwise the number of containers opened since the
    /// match, plus one for the matched value itself.
    suppress_depth: usize,
    /// Forwarded keys of each open, forwarded object.
    member_counts: Vec<usize>,
}

impl<'a, H: Handler + ?Sized> FilterKeyHandler<'a, H> {
    /// Filters the events sent to `out`, dropping members named `key`.
    ///
    /// Keys are compared byte for byte after unescaping.
    pub fn new(out: &'a mut H, key: &'a BStr) -> Self {
        Self {
            out,
            key,
            suppress_depth: 0,
            member_counts: Vec::new(),
        }
    }

    /// The member name being dropped.
    #[must_use]
    pub fn filter_key(&self) -> &BStr {
        self.key
    }

    /// 0 while forwarding, >0 while inside a suppressed value.
    #[must_use]
    pub fn suppression_depth(&self) -> usize {
        self.suppress_depth
    }

    /// Number of objects that are open and being forwarded.
    #[must_use]
    pub fn open_objects(&self) -> usize {
        self.member_counts.len()
    }

    #[inline]
    fn suppressing(&self) -> bool {
        self.suppress_depth > 0
    }

    /// Called after every event that completes a value. Leaves suppression
    /// once the value directly under the matched key is done.
    #[inline]
    fn end_value(&mut self) -> bool {
        if self.suppress_depth == 1 {
            self.suppress_depth = 0;
            tracing::trace!(key = %self.key, "suppressed member value consumed");
        }
        true
    }

    #[inline]
    fn open_suppressed(&mut self) -> bool {
        self.suppress_depth += 1;
        true
    }

    #[inline]
    fn close_suppressed(&mut self) -> bool {
        self.suppress_depth -= 1;
        self.end_value()
    }
}

impl<H: Handler + ?Sized> Handler for FilterKeyHandler<'_, H> {
    fn null(&mut self) -> bool {
        if self.suppressing() {
            self.end_value()
        } else {
            self.out.null() && self.end_value()
        }
    }

    fn bool(&mut self, b: bool) -> bool {
        if self.suppressing() {
            self.end_value()
        } else {
            self.out.bool(b) && self.end_value()
        }
    }

    fn int(&mut self, i: i32) -> bool {
        if self.suppressing() {
            self.end_value()
        } else {
            self.out.int(i) && self.end_value()
        }
    }

    fn uint(&mut self, u: u32) -> bool {
        if self.suppressing() {
            self.end_value()
        } else {
            self.out.uint(u) && self.end_value()
        }
    }

    fn int64(&mut self, i: i64) -> bool {
        if self.suppressing() {
            self.end_value()
        } else {
            self.out.int64(i) && self.end_value()
        }
    }

    fn uint64(&mut self, u: u64) -> bool {
        if self.suppressing() {
            self.end_value()
        } else {
            self.out.uint64(u) && self.end_value()
        }
    }

    fn double(&mut self, d: f64) -> bool {
        if self.suppressing() {
            self.end_value()
        } else {
            self.out.double(d) && self.end_value()
        }
    }

    fn raw_number(&mut self, text: &str) -> bool {
        if self.suppressing() {
            self.end_value()
        } else {
            self.out.raw_number(text) && self.end_value()
        }
    }

    fn string(&mut self, text: &str) -> bool {
        if self.suppressing() {
            self.end_value()
        } else {
            self.out.string(text) && self.end_value()
        }
    }

    fn start_object(&mut self) -> bool {
        if self.suppressing() {
            return self.open_suppressed();
        }
        self.member_counts.push(0);
        self.out.start_object()
    }

    fn key(&mut self, text: &str) -> bool {
        // Keys inside a suppressed value are never matched again.
        if self.suppressing() {
            return true;
        }
        if text.as_bytes() == &**self.key {
            tracing::trace!(key = %self.key, "suppressing member");
            self.suppress_depth = 1;
            return true;
        }
        if let Some(count) = self.member_counts.last_mut() {
            *count += 1;
        }
        self.out.key(text)
    }

    fn end_object(&mut self, _member_count: usize) -> bool {
        if self.suppressing() {
            return self.close_suppressed();
        }
        let forwarded = self.member_counts.pop().unwrap_or_default();
        self.out.end_object(forwarded) && self.end_value()
    }

    fn start_array(&mut self) -> bool {
        if self.suppressing() {
            return self.open_suppressed();
        }
        self.out.start_array()
    }

    fn end_array(&mut self, element_count: usize) -> bool {
        if self.suppressing() {
            return self.close_suppressed();
        }
        self.out.end_array(element_count) && self.end_value()
    }
}
