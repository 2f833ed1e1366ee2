//! Parse events as values.
//!
//! [`Event`] mirrors the [`Handler`] methods one to one. It is what an
//! [`EventLog`] records and what a recorded stream replays, which makes event
//! traces easy to compare in tests and to print when debugging a pipeline.
//!
//! ```
//! use keyfilter::{Event, EventLog, Generator};
//!
//! let events = [Event::StartArray, Event::Uint(1), Event::EndArray(1)];
//! let mut log = EventLog::new();
//! assert!((&events[..]).generate(&mut log));
//! assert_eq!(log.events(), &events[..]);
//! ```
use alloc::{borrow::Cow, vec::Vec};
use core::fmt;

use crate::handler::{Generator, Handler};

/// One structural token of a JSON document.
#[derive(Debug, Clone, PartialEq)]
pub enum Event<'a> {
    /// `null`.
    Null,
    /// `true` or `false`.
    Bool(bool),
    /// A negative integer that fits `i32`.
    Int(i32),
    /// A non-negative integer that fits `u32`.
    Uint(u32),
    /// A negative integer that fits `i64` but not `i32`.
    Int64(i64),
    /// A non-negative integer that fits `u64` but not `u32`.
    Uint64(u64),
    /// Any other number.
    Double(f64),
    /// A number as its source text.
    RawNumber(Cow<'a, str>),
    /// A decoded string value.
    String(Cow<'a, str>),
    /// `{`.
    StartObject,
    /// A decoded member name.
    Key(Cow<'a, str>),
    /// `}` with the number of members.
    EndObject(usize),
    /// `[`.
    StartArray,
    /// `]` with the number of elements.
    EndArray(usize),
}

impl Event<'_> {
    /// Delivers this event to the matching method of `handler`.
    pub fn send<H: Handler + ?Sized>(&self, handler: &mut H) -> bool {
        match self {
            Event::Null => handler.null(),
            Event::Bool(b) => handler.bool(*b),
            Event::Int(i) => handler.int(*i),
            Event::Uint(u) => handler.uint(*u),
            Event::Int64(i) => handler.int64(*i),
            Event::Uint64(u) => handler.uint64(*u),
            Event::Double(d) => handler.double(*d),
            Event::RawNumber(text) => handler.raw_number(text),
            Event::String(text) => handler.string(text),
            Event::StartObject => handler.start_object(),
            Event::Key(text) => handler.key(text),
            Event::EndObject(count) => handler.end_object(*count),
            Event::StartArray => handler.start_array(),
            Event::EndArray(count) => handler.end_array(*count),
        }
    }

    /// Copies any borrowed text so the event can outlive its source.
    #[must_use]
    pub fn into_owned(self) -> Event<'static> {
        match self {
            Event::Null => Event::Null,
            Event::Bool(b) => Event::Bool(b),
            Event::Int(i) => Event::Int(i),
            Event::Uint(u) => Event::Uint(u),
            Event::Int64(i) => Event::Int64(i),
            Event::Uint64(u) => Event::Uint64(u),
            Event::Double(d) => Event::Double(d),
            Event::RawNumber(text) => Event::RawNumber(Cow::Owned(text.into_owned())),
            Event::String(text) => Event::String(Cow::Owned(text.into_owned())),
            Event::StartObject => Event::StartObject,
            Event::Key(text) => Event::Key(Cow::Owned(text.into_owned())),
            Event::EndObject(count) => Event::EndObject(count),
            Event::StartArray => Event::StartArray,
            Event::EndArray(count) => Event::EndArray(count),
        }
    }
}

impl fmt::Display for Event<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Null => f.write_str("Null"),
            Event::Bool(b) => write!(f, "Bool({b})"),
            Event::Int(i) => write!(f, "Int({i})"),
            Event::Uint(u) => write!(f, "Uint({u})"),
            Event::Int64(i) => write!(f, "Int64({i})"),
            Event::Uint64(u) => write!(f, "Uint64({u})"),
            Event::Double(d) => write!(f, "Double({d:?})"),
            Event::RawNumber(text) => write!(f, "RawNumber({text})"),
            Event::String(text) => write!(f, "String({text:?})"),
            Event::StartObject => f.write_str("StartObject"),
            Event::Key(text) => write!(f, "Key({text:?})"),
            Event::EndObject(count) => write!(f, "EndObject({count})"),
            Event::StartArray => f.write_str("StartArray"),
            Event::EndArray(count) => write!(f, "EndArray({count})"),
        }
    }
}

/// A [`Handler`] that records every event it receives.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: Vec<Event<'static>>,
}

impl EventLog {
    /// An empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded so far, in order.
    #[must_use]
    pub fn events(&self) -> &[Event<'static>] {
        &self.events
    }

    /// Takes the recorded events out of the log.
    #[must_use]
    pub fn into_events(self) -> Vec<Event<'static>> {
        self.events
    }

    fn record(&mut self, event: Event<'_>) -> bool {
        self.events.push(event.into_owned());
        true
    }
}

impl Handler for EventLog {
    fn null(&mut self) -> bool {
        self.record(Event::Null)
    }

    fn bool(&mut self, b: bool) -> bool {
        self.record(Event::Bool(b))
    }

    fn int(&mut self, i: i32) -> bool {
        self.record(Event::Int(i))
    }

    fn uint(&mut self, u: u32) -> bool {
        self.record(Event::Uint(u))
    }

    fn int64(&mut self, i: i64) -> bool {
        self.record(Event::Int64(i))
    }

    fn uint64(&mut self, u: u64) -> bool {
        self.record(Event::Uint64(u))
    }

    fn double(&mut self, d: f64) -> bool {
        self.record(Event::Double(d))
    }

    fn raw_number(&mut self, text: &str) -> bool {
        self.record(Event::RawNumber(Cow::Borrowed(text)))
    }

    fn string(&mut self, text: &str) -> bool {
        self.record(Event::String(Cow::Borrowed(text)))
    }

    fn start_object(&mut self) -> bool {
        self.record(Event::StartObject)
    }

    fn key(&mut self, text: &str) -> bool {
        self.record(Event::Key(Cow::Borrowed(text)))
    }

    fn end_object(&mut self, member_count: usize) -> bool {
        self.record(Event::EndObject(member_count))
    }

    fn start_array(&mut self) -> bool {
        self.record(Event::StartArray)
    }

    fn end_array(&mut self, element_count: usize) -> bool {
        self.record(Event::EndArray(element_count))
    }
}

// Replays a recorded stream, stopping at the first rejected event.
impl Generator for &[Event<'_>] {
    fn generate<H: Handler>(&mut self, handler: &mut H) -> bool {
        self.iter().all(|event| event.send(&mut *handler))
    }
}
