//! The event-receiver contract shared by producers and consumers.
//!
//! A producer (the [`Reader`](crate::Reader), a recorded event slice, a
//! [`Value`](crate::Value)) calls one method per structural token. Every method
//! returns `true` to keep going and `false` to make the producer stop at once.
//! Text arguments are only valid for the duration of the call; a handler that
//! keeps them around has to copy.

/// Receives a document as a sequence of parse events.
///
/// Integers are delivered through the narrowest method that holds them:
/// [`uint`](Self::uint), then [`uint64`](Self::uint64) for non-negative
/// values, [`int`](Self::int), then [`int64`](Self::int64) for negative ones.
/// Everything else, including any number with a fraction or exponent, goes
/// to [`double`](Self::double).
pub trait Handler {
    /// A `null` literal.
    fn null(&mut self) -> bool;
    /// A `true` or `false` literal.
    fn bool(&mut self, b: bool) -> bool;
    /// A negative integer that fits `i32`.
    fn int(&mut self, i: i32) -> bool;
    /// A non-negative integer that fits `u32`.
    fn uint(&mut self, u: u32) -> bool;
    /// A negative integer below `i32::MIN`.
    fn int64(&mut self, i: i64) -> bool;
    /// A non-negative integer above `u32::MAX`.
    fn uint64(&mut self, u: u64) -> bool;
    /// Any number not delivered as an integer.
    fn double(&mut self, d: f64) -> bool;
    /// A number passed through as its source text, when the producer was
    /// asked not to interpret numbers.
    fn raw_number(&mut self, text: &str) -> bool;
    /// A string value, unescaped.
    fn string(&mut self, text: &str) -> bool;

    /// Opens an object. Members follow as a [`key`](Self::key) and a value each.
    fn start_object(&mut self) -> bool;
    /// The name of the next object member, unescaped.
    fn key(&mut self, text: &str) -> bool;
    /// Closes the innermost object, which held `member_count` key/value pairs.
    fn end_object(&mut self, member_count: usize) -> bool;

    /// Opens an array.
    fn start_array(&mut self) -> bool;
    /// Closes the innermost array, which held `element_count` values.
    fn end_array(&mut self, element_count: usize) -> bool;
}

impl<H: Handler + ?Sized> Handler for &mut H {
    #[inline]
    fn null(&mut self) -> bool {
        (**self).null()
    }

    #[inline]
    fn bool(&mut self, b: bool) -> bool {
        (**self).bool(b)
    }

    #[inline]
    fn int(&mut self, i: i32) -> bool {
        (**self).int(i)
    }

    #[inline]
    fn uint(&mut self, u: u32) -> bool {
        (**self).uint(u)
    }

    #[inline]
    fn int64(&mut self, i: i64) -> bool {
        (**self).int64(i)
    }

    #[inline]
    fn uint64(&mut self, u: u64) -> bool {
        (**self).uint64(u)
    }

    #[inline]
    fn double(&mut self, d: f64) -> bool {
        (**self).double(d)
    }

    #[inline]
    fn raw_number(&mut self, text: &str) -> bool {
        (**self).raw_number(text)
    }

    #[inline]
    fn string(&mut self, text: &str) -> bool {
        (**self).string(text)
    }

    #[inline]
    fn start_object(&mut self) -> bool {
        (**self).start_object()
    }

    #[inline]
    fn key(&mut self, text: &str) -> bool {
        (**self).key(text)
    }

    #[inline]
    fn end_object(&mut self, member_count: usize) -> bool {
        (**self).end_object(member_count)
    }

    #[inline]
    fn start_array(&mut self) -> bool {
        (**self).start_array()
    }

    #[inline]
    fn end_array(&mut self, element_count: usize) -> bool {
        (**self).end_array(element_count)
    }
}

/// Something that can drive a [`Handler`] through one complete document.
///
/// Returns `false` when the pass did not complete, either because the source
/// was malformed or because the handler asked to stop.
pub trait Generator {
    /// Runs one pass into `handler`.
    fn generate<H: Handler>(&mut self, handler: &mut H) -> bool;
}
