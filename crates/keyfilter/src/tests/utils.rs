use alloc::{string::String, vec::Vec};

use bstr::BStr;

use crate::{
    Event, EventLog, FilterKeyHandler, JsonWriter, ParseError, ParserOptions, Reader,
    SliceStream, Value,
};

/// Everything the reader emits for `input`.
pub fn read_events(input: &str) -> Result<Vec<Event<'static>>, ParseError> {
    read_events_with(input, ParserOptions::default())
}

pub fn read_events_with(
    input: &str,
    options: ParserOptions,
) -> Result<Vec<Event<'static>>, ParseError> {
    let mut log = EventLog::new();
    Reader::new(options).parse(&mut SliceStream::new(input), &mut log)?;
    Ok(log.into_events())
}

/// What reaches the consumer when `input` is read through a key filter.
pub fn filter_events(input: &str, key: &str) -> Result<Vec<Event<'static>>, ParseError> {
    let mut log = EventLog::new();
    let mut filter = FilterKeyHandler::new(&mut log, BStr::new(key));
    Reader::new(ParserOptions::default()).parse(&mut SliceStream::new(input), &mut filter)?;
    drop(filter);
    Ok(log.into_events())
}

/// `input` with every `key` member removed, rendered as compact JSON.
pub fn filter_text(input: &str, key: &str) -> Result<String, ParseError> {
    let mut out = String::new();
    let mut writer = JsonWriter::new(&mut out);
    let mut filter = FilterKeyHandler::new(&mut writer, BStr::new(key));
    Reader::new(ParserOptions::default()).parse(&mut SliceStream::new(input), &mut filter)?;
    drop(filter);
    drop(writer);
    Ok(out)
}

/// Tree-level model of the filter: drops `key` from every object at any
/// depth, without looking inside the dropped values.
pub fn strip_key(value: &Value, key: &str) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(|v| strip_key(v, key)).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| (k.clone(), strip_key(v, key)))
                .collect(),
        ),
        other => other.clone(),
    }
}
