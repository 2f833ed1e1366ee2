//! JSON value types.
//!
//! [`Value`] is the in-memory document the [`ValueBuilder`](crate::ValueBuilder)
//! produces. Integers keep their full 64-bit range through [`Number`], so a
//! document survives a parse / filter / print cycle unchanged.
use alloc::{collections::BTreeMap, string::String, vec::Vec};
use core::fmt;

use crate::{
    handler::{Generator, Handler},
    writer::JsonWriter,
};

/// Object members, ordered by name.
pub type Map = BTreeMap<String, Value>;
/// Array elements, in document order.
pub type Array = Vec<Value>;

/// A JSON number as the reader classified it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    /// Any integer `>= 0`.
    PosInt(u64),
    /// Any integer `< 0`.
    NegInt(i64),
    /// Anything with a fraction or exponent, or outside the integer ranges.
    Float(f64),
}

impl Number {
    /// Picks `PosInt` or `NegInt` by sign.
    #[must_use]
    pub fn from_i64(i: i64) -> Self {
        match u64::try_from(i) {
            Ok(u) => Self::PosInt(u),
            Err(_) => Self::NegInt(i),
        }
    }

    /// The value if it is a non-negative integer.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Self::PosInt(u) => Some(u),
            _ => None,
        }
    }

    /// The value if it is an integer in `i64` range.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::PosInt(u) => i64::try_from(u).ok(),
            Self::NegInt(i) => Some(i),
            Self::Float(_) => None,
        }
    }

    /// The value as a double, rounding large integers.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> f64 {
        match *self {
            Self::PosInt(u) => u as f64,
            Self::NegInt(i) => i as f64,
            Self::Float(f) => f,
        }
    }

    fn accept<H: Handler + ?Sized>(&self, handler: &mut H) -> bool {
        match *self {
            Self::PosInt(u) => match u32::try_from(u) {
                Ok(u) => handler.uint(u),
                Err(_) => handler.uint64(u),
            },
            Self::NegInt(i) => match i32::try_from(i) {
                Ok(i) => handler.int(i),
                Err(_) => handler.int64(i),
            },
            Self::Float(f) => handler.double(f),
        }
    }
}

/// A JSON value as defined by [RFC 8259].
///
/// Objects are keyed maps: the last of several members with the same name
/// wins.
///
/// # Examples
///
/// ```
/// use keyfilter::{Map, Value};
///
/// let mut map = Map::new();
/// map.insert("key".to_string(), Value::String("value".into()));
/// let v = Value::Object(map);
/// assert_eq!(v.to_string(), r#"{"key":"value"}"#);
/// ```
///
/// [RFC 8259]: https://datatracker.ietf.org/doc/html/rfc8259
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// `null`.
    #[default]
    Null,
    /// `true` or `false`.
    Boolean(bool),
    /// Any number the reader interpreted.
    Number(Number),
    /// A string, or a number read with
    /// [`numbers_as_strings`](crate::ParserOptions::numbers_as_strings).
    String(String),
    /// An array.
    Array(Array),
    /// An object.
    Object(Map),
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::Number(Number::PosInt(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Number(Number::from_i64(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(Number::Float(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Array> for Value {
    fn from(v: Array) -> Self {
        Self::Array(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Self::Object(v)
    }
}

impl Value {
    /// Runs `generator` into a fresh [`ValueBuilder`](crate::ValueBuilder)
    /// and returns the document it described.
    ///
    /// Returns `None` when the generator did not complete or produced an event
    /// sequence that does not describe exactly one value. Generators that
    /// record an error, such as [`FilterKeyReader`](crate::FilterKeyReader),
    /// say why.
    pub fn populate<G: Generator>(generator: &mut G) -> Option<Value> {
        let mut builder = crate::builder::ValueBuilder::new();
        if !generator.generate(&mut builder) {
            return None;
        }
        builder.finish()
    }

    /// Replays this value as parse events, depth first.
    ///
    /// Object members come out in key order and every container end carries
    /// its exact size.
    pub fn accept<H: Handler + ?Sized>(&self, handler: &mut H) -> bool {
        match self {
            Value::Null => handler.null(),
            Value::Boolean(b) => handler.bool(*b),
            Value::Number(n) => n.accept(handler),
            Value::String(s) => handler.string(s),
            Value::Array(items) => {
                handler.start_array()
                    && items.iter().all(|item| item.accept(&mut *handler))
                    && handler.end_array(items.len())
            }
            Value::Object(map) => {
                handler.start_object()
                    && map
                        .iter()
                        .all(|(key, value)| handler.key(key) && value.accept(&mut *handler))
                    && handler.end_object(map.len())
            }
        }
    }

    /// Looks up a member of an object. `None` for missing members and for
    /// anything that is not an object.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// The text of a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The number, if this is one.
    #[must_use]
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    /// The elements of an array value.
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// The members of an object value.
    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Returns `true` if the value is [`Null`].
    ///
    /// [`Null`]: Value::Null
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for `true` and `false`.
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Boolean(..))
    }

    /// Returns `true` if the value is a [`Number`](Value::Number).
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(..))
    }

    /// Returns `true` if the value is a [`String`](Value::String).
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(..))
    }

    /// Returns `true` if the value is an [`Array`](Value::Array).
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    /// Returns `true` if the value is [`Object`].
    ///
    /// [`Object`]: Value::Object
    ///
    /// # Examples
    ///
    /// ```
    /// use keyfilter::{Map, Value};
    ///
    /// assert!(Value::Object(Map::new()).is_object());
    /// assert!(!Value::Null.is_object());
    /// ```
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(..))
    }
}

impl Generator for &Value {
    fn generate<H: Handler>(&mut self, handler: &mut H) -> bool {
        self.accept(handler)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut writer = JsonWriter::new(f);
        if self.accept(&mut writer) {
            Ok(())
        } else {
            Err(fmt::Error)
        }
    }
}

// Serialize only: numbers keep their integer/float distinction and objects
// serialize as maps.
#[cfg(feature = "serde")]
mod serde_impls {
    use serde::{Serialize, Serializer};

    use super::{Number, Value};

    impl Serialize for Number {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match *self {
                Number::PosInt(u) => serializer.serialize_u64(u),
                Number::NegInt(i) => serializer.serialize_i64(i),
                Number::Float(f) => serializer.serialize_f64(f),
            }
        }
    }

    impl Serialize for Value {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                Value::Null => serializer.serialize_unit(),
                Value::Boolean(b) => serializer.serialize_bool(*b),
                Value::Number(n) => n.serialize(serializer),
                Value::String(s) => serializer.serialize_str(s),
                Value::Array(items) => serializer.collect_seq(items),
                Value::Object(map) => serializer.collect_map(map),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec};

    use super::*;

    #[test]
    fn numbers_keep_their_sign_class() {
        assert_eq!(Number::from_i64(5), Number::PosInt(5));
        assert_eq!(Number::from_i64(-5), Number::NegInt(-5));
        assert_eq!(Number::PosInt(u64::MAX).as_i64(), None);
        assert_eq!(Number::NegInt(-1).as_u64(), None);
        assert!((Number::NegInt(-2).as_f64() + 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn display_renders_compact_json() {
        let mut map = Map::new();
        map.insert("b".to_string(), Value::from(vec![Value::Null, Value::from(true)]));
        map.insert("a".to_string(), Value::from(-1.5));
        map.insert("c".to_string(), Value::from(u64::MAX));
        assert_eq!(
            Value::Object(map).to_string(),
            r#"{"a":-1.5,"b":[null,true],"c":18446744073709551615}"#
        );
    }

    #[test]
    fn accessors() {
        let mut map = Map::new();
        map.insert("s".to_string(), Value::from("text"));
        let value = Value::Object(map);
        assert_eq!(value.get("s").and_then(Value::as_str), Some("text"));
        assert_eq!(value.get("missing"), None);
        assert_eq!(Value::from("x").get("s"), None);
        assert_eq!(Value::from(7u64).as_number(), Some(&Number::PosInt(7)));
        assert_eq!(Value::from("7").as_number(), None);
        assert!(Value::from(false).is_bool() && !Value::Null.is_bool());
        assert!(Value::from(0.5).is_number() && !Value::from("0.5").is_number());
        assert!(Value::from("s").is_string() && !Value::from(1u64).is_string());
        assert!(value.is_object() && !value.is_array() && !value.is_null());
        assert!(Value::default().is_null());
    }

    #[test]
    fn non_finite_float_cannot_be_displayed() {
        let value = Value::from(vec![Value::from(f64::NAN)]);
        let mut out = alloc::string::String::new();
        assert!(core::fmt::write(&mut out, format_args!("{value}")).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_like_serde_json() {
        let mut map = Map::new();
        map.insert("n".to_string(), Value::from(-3i64));
        map.insert("f".to_string(), Value::from(0.5));
        map.insert("v".to_string(), Value::from(vec![Value::Null, Value::from("s")]));
        let value = Value::Object(map);
        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            r#"{"f":0.5,"n":-3,"v":[null,"s"]}"#
        );
    }
}
