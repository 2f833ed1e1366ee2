use rstest::rstest;

use super::utils::{read_events, read_events_with};
use crate::{Event, EventLog, ParseErrorCode, ParseErrorCode::*, ParserOptions, Reader, SliceStream};

#[rstest]
#[case("", DocumentEmpty, 0)]
#[case(" \n\t", DocumentEmpty, 3)]
#[case("1 2", DocumentRootNotSingular, 2)]
#[case("{}x", DocumentRootNotSingular, 2)]
#[case("01", DocumentRootNotSingular, 1)]
#[case("nul", ValueInvalid, 3)]
#[case("nulx", ValueInvalid, 3)]
#[case("True", ValueInvalid, 0)]
#[case("[1,]", ValueInvalid, 3)]
#[case("-", ValueInvalid, 1)]
#[case(".5", ValueInvalid, 0)]
#[case("{,}", ObjectMissName, 1)]
#[case(r#"{"a":1,}"#, ObjectMissName, 7)]
#[case(r#"{"a" 1}"#, ObjectMissColon, 5)]
#[case(r#"{"a":1 "b":2}"#, ObjectMissCommaOrCurlyBracket, 7)]
#[case(r#"{"a":1]"#, ObjectMissCommaOrCurlyBracket, 6)]
#[case("[1 2]", ArrayMissCommaOrSquareBracket, 3)]
#[case("[1}", ArrayMissCommaOrSquareBracket, 2)]
#[case("[1", ArrayMissCommaOrSquareBracket, 2)]
#[case(r#""abc"#, StringMissQuotationMark, 4)]
#[case("\"a\0\"", StringMissQuotationMark, 2)]
#[case(r#""a\x""#, StringEscapeInvalid, 3)]
#[case(r#""\u12G4""#, StringUnicodeEscapeInvalidHex, 5)]
#[case(r#""\u12"#, StringUnicodeEscapeInvalidHex, 5)]
#[case(r#""\ud800""#, StringUnicodeSurrogateInvalid, 7)]
#[case(r#""\ud800\u0041""#, StringUnicodeSurrogateInvalid, 12)]
#[case(r#""\udc00""#, StringUnicodeSurrogateInvalid, 6)]
#[case("\"a\nb\"", StringInvalidEncoding, 2)]
#[case("1.", NumberMissFraction, 2)]
#[case("1.e5", NumberMissFraction, 2)]
#[case("1e", NumberMissExponent, 2)]
#[case("1e+", NumberMissExponent, 3)]
#[case("1e400", NumberTooBig, 5)]
#[case("[-1e400]", NumberTooBig, 7)]
fn rejects(#[case] input: &str, #[case] code: ParseErrorCode, #[case] offset: usize) {
    let err = read_events(input).unwrap_err();
    assert_eq!((err.code, err.offset), (code, offset), "{input:?}");
}

#[test]
fn invalid_utf8_in_a_string() {
    let mut log = EventLog::new();
    let err = Reader::default()
        .parse(&mut SliceStream::new(b"[\"\xff\"]"), &mut log)
        .unwrap_err();
    assert_eq!((err.code, err.offset), (StringInvalidEncoding, 4));
    assert_eq!(log.events(), &[Event::StartArray]);
}

#[rstest]
#[case("[[1]]", 1, 1)]
#[case(r#"{"a":{"b":[]}}"#, 2, 10)]
fn depth_limit(#[case] input: &str, #[case] max_depth: usize, #[case] offset: usize) {
    let options = ParserOptions {
        max_depth,
        ..Default::default()
    };
    let err = read_events_with(input, options).unwrap_err();
    assert_eq!((err.code, err.offset), (DepthLimitExceeded, offset));
}

#[test]
fn events_before_the_error_are_kept() {
    let mut log = EventLog::new();
    let err = Reader::default()
        .parse(&mut SliceStream::new(r#"{"a":[true,"#), &mut log)
        .unwrap_err();
    assert_eq!(err.code, ValueInvalid);
    assert_eq!(
        log.events(),
        &[
            Event::StartObject,
            Event::Key("a".into()),
            Event::StartArray,
            Event::Bool(true),
        ]
    );
}

#[test]
fn error_messages_name_the_offset() {
    let err = read_events("[1 2]").unwrap_err();
    assert_eq!(
        alloc::format!("{err}"),
        "missing a comma or ']' after an array element at offset 3"
    );
}

#[test]
#[should_panic(expected = "invalid value at offset 1")]
fn panic_on_error_panics_at_the_failure() {
    let options = ParserOptions {
        panic_on_error: true,
        ..Default::default()
    };
    let _ = read_events_with("[x]", options);
}
