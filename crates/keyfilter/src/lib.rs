//! Streaming removal of object members by key.
//!
//! A [`Reader`] pushes JSON parse events into a [`Handler`]. The
//! [`FilterKeyHandler`] sits between the reader and any other handler and
//! swallows the whole value of every object member named by the filter key,
//! fixing up the member count of the enclosing object on the way out. Nothing
//! but a suppression depth and one counter per open object is kept, so
//! documents of any size and depth pass through in a single sweep.
//!
//! ```rust
//! use keyfilter::{FilterKeyReader, ParserOptions, SliceStream, Value};
//!
//! let input = br#"{"type":"Point","coordinates":[1.5,2.5],"id":7}"#;
//! let mut reader = FilterKeyReader::new(SliceStream::new(input), "coordinates", ParserOptions::default());
//! let value = Value::populate(&mut reader).unwrap();
//!
//! assert!(matches!(reader.parse_result(), Some(Ok(()))));
//! assert_eq!(value.to_string(), r#"{"id":7,"type":"Point"}"#);
//! ```

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod builder;
mod error;
mod escape_buffer;
mod event;
mod filter;
mod filter_reader;
mod handler;
mod literal_buffer;
mod options;
mod reader;
mod stream;
mod value;
mod writer;

#[cfg(test)]
mod tests;

pub use builder::ValueBuilder;
pub use error::{ParseError, ParseErrorCode, ParseResult};
pub use event::{Event, EventLog};
pub use filter::FilterKeyHandler;
pub use filter_reader::FilterKeyReader;
pub use handler::{Generator, Handler};
pub use options::ParserOptions;
pub use reader::Reader;
#[cfg(feature = "std")]
pub use stream::ReadStream;
pub use stream::{InputStream, SliceStream};
pub use value::{Array, Map, Number, Value};
pub use writer::JsonWriter;
