//! Builds a [`Value`] from parse events.
//!
//! The builder keeps one flat stack of pending keys and values. Container
//! starts push nothing. A container end trusts the count it is given and
//! pops exactly that many members or elements. That check makes the builder
//! a strict consumer: an upstream that reports a stale count (for instance
//! after dropping members without renumbering) is rejected instead of
//! producing a corrupted tree.
use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use crate::{
    handler::Handler,
    value::{Map, Number, Value},
};

#[derive(Debug)]
enum Slot {
    Key(String),
    Value(Value),
}

/// A [`Handler`] that assembles the events of one document into a [`Value`].
///
/// # Examples
///
/// ```
/// use keyfilter::{Handler, ValueBuilder};
///
/// let mut builder = ValueBuilder::new();
/// assert!(builder.start_array());
/// assert!(builder.uint(1));
/// assert!(builder.string("two"));
/// assert!(builder.end_array(2));
/// assert_eq!(builder.finish().unwrap().to_string(), r#"[1,"two"]"#);
/// ```
#[derive(Debug, Default)]
pub struct ValueBuilder {
    stack: Vec<Slot>,
}

impl ValueBuilder {
    /// A builder with nothing received yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The finished document.
    ///
    /// `None` unless the events received so far describe exactly one complete
    /// value.
    #[must_use]
    pub fn finish(mut self) -> Option<Value> {
        match (self.stack.pop(), self.stack.is_empty()) {
            (Some(Slot::Value(value)), true) => Some(value),
            _ => None,
        }
    }

    #[inline]
    fn push(&mut self, value: Value) -> bool {
        self.stack.push(Slot::Value(value));
        true
    }

    #[inline]
    fn push_number(&mut self, number: Number) -> bool {
        self.push(Value::Number(number))
    }

    /// Removes the top `len` slots, or nothing when there are fewer.
    fn split_top(&mut self, len: usize) -> Option<Vec<Slot>> {
        let at = self.stack.len().checked_sub(len)?;
        Some(self.stack.split_off(at))
    }
}

impl Handler for ValueBuilder {
    fn null(&mut self) -> bool {
        self.push(Value::Null)
    }

    fn bool(&mut self, b: bool) -> bool {
        self.push(Value::Boolean(b))
    }

    fn int(&mut self, i: i32) -> bool {
        self.push_number(Number::from_i64(i64::from(i)))
    }

    fn uint(&mut self, u: u32) -> bool {
        self.push_number(Number::PosInt(u64::from(u)))
    }

    fn int64(&mut self, i: i64) -> bool {
        self.push_number(Number::from_i64(i))
    }

    fn uint64(&mut self, u: u64) -> bool {
        self.push_number(Number::PosInt(u))
    }

    fn double(&mut self, d: f64) -> bool {
        self.push_number(Number::Float(d))
    }

    fn raw_number(&mut self, text: &str) -> bool {
        self.push(Value::String(text.to_string()))
    }

    fn string(&mut self, text: &str) -> bool {
        self.push(Value::String(text.to_string()))
    }

    fn start_object(&mut self) -> bool {
        true
    }

    fn key(&mut self, text: &str) -> bool {
        self.stack.push(Slot::Key(text.to_string()));
        true
    }

    fn end_object(&mut self, member_count: usize) -> bool {
        let Some(slots) = member_count
            .checked_mul(2)
            .and_then(|len| self.split_top(len))
        else {
            return false;
        };

        let mut map = Map::new();
        let mut slots = slots.into_iter();
        while let Some(slot) = slots.next() {
            match (slot, slots.next()) {
                (Slot::Key(key), Some(Slot::Value(value))) => {
                    map.insert(key, value);
                }
                _ => return false,
            }
        }
        self.push(Value::Object(map))
    }

    fn start_array(&mut self) -> bool {
        true
    }

    fn end_array(&mut self, element_count: usize) -> bool {
        let Some(slots) = self.split_top(element_count) else {
            return false;
        };

        let mut items = Vec::with_capacity(slots.len());
        for slot in slots {
            match slot {
                Slot::Value(value) => items.push(value),
                Slot::Key(_) => return false,
            }
        }
        self.push(Value::Array(items))
    }
}
