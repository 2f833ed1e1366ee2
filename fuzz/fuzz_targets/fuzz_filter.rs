#![no_main]

use arbitrary::Arbitrary;
use bstr::BStr;
use keyfilter::{
    EventLog, FilterKeyHandler, FilterKeyReader, JsonWriter, ParserOptions, Reader, SliceStream,
    Value,
};
use libfuzzer_sys::fuzz_target;

/// serde_json refuses to nest deeper than this.
const REFERENCE_DEPTH: usize = 100;

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    flags: u8,
    key: &'a str,
    data: &'a [u8],
}

impl Input<'_> {
    fn options(&self) -> ParserOptions {
        ParserOptions {
            max_depth: 1 + usize::from(self.flags >> 2) * 16,
            numbers_as_strings: self.flags & 1 != 0,
            stop_when_done: self.flags & 2 != 0,
            panic_on_error: false,
        }
    }
}

fn filter_to_text(data: &[u8], key: &str, options: ParserOptions) -> Option<String> {
    let mut text = String::new();
    let mut writer = JsonWriter::new(&mut text);
    let mut filter = FilterKeyHandler::new(&mut writer, BStr::new(key));
    let ok = Reader::new(options)
        .parse(&mut SliceStream::new(data), &mut filter)
        .is_ok();
    if ok {
        assert_eq!(filter.suppression_depth(), 0);
        assert_eq!(filter.open_objects(), 0);
    }
    drop(filter);
    drop(writer);
    ok.then_some(text)
}

fn run(input: &Input<'_>) {
    let options = input.options();

    // The text writer and the tree builder accept exactly the same inputs.
    let text = filter_to_text(input.data, input.key, options);
    let mut reader = FilterKeyReader::new(SliceStream::new(input.data), input.key, options);
    let built = Value::populate(&mut reader);
    assert_eq!(text.is_some(), built.is_some(), "{:?}", reader.parse_result());

    // Filtering is idempotent. Raw numbers are re-read as typed numbers, so
    // their spelling may change.
    if let Some(text) = text.filter(|_| !options.numbers_as_strings) {
        let again = filter_to_text(text.as_bytes(), input.key, ParserOptions::default());
        assert_eq!(again.as_deref(), Some(text.as_str()));
    }

    // Acceptance agrees with serde_json for plain single documents.
    let nesting = input.data.iter().filter(|b| matches!(b, b'[' | b'{')).count();
    if input.flags & 3 == 0 && nesting < REFERENCE_DEPTH {
        let mut log = EventLog::new();
        let ours = Reader::new(ParserOptions::default())
            .parse(&mut SliceStream::new(input.data), &mut log)
            .is_ok();
        let theirs = serde_json::from_slice::<serde_json::Value>(input.data).is_ok();
        assert_eq!(ours, theirs, "{:?}", String::from_utf8_lossy(input.data));
    }
}

fuzz_target!(|input: Input<'_>| run(&input));
