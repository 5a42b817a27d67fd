use alloc::{vec, vec::Vec};

use crate::{
    DecodeErrorKind, DecoderOptions, Encoder, OutOfBounds, Utf8Mode, decode, decode_sections,
    decode_with_options,
};

#[test]
fn truncated_value_fails_the_whole_decode() {
    let mut enc = Encoder::new();
    enc.key("good").unwrap().bool(true).end();
    enc.key("bad").unwrap().raw(&[0x03, 0x40, 0x09]);
    let err = decode(enc.as_bytes()).unwrap_err();
    assert_eq!(
        *err.kind(),
        DecodeErrorKind::OutOfBounds(OutOfBounds {
            needed: 8,
            remaining: 2,
            offset: enc.as_bytes().len() - 2,
        })
    );
    assert_eq!(err.path(), "bad");
}

#[test]
fn stray_key_tag_with_bogus_length_inside_a_section_fails() {
    let mut enc = Encoder::new();
    enc.key("id").unwrap().bool(true);
    enc.raw(&[0x04, 0xff, 0xff, 0x00, 0x00]);
    enc.key("more").unwrap().bool(false).end();
    let err = decode_sections(enc.as_bytes()).unwrap_err();
    assert!(matches!(err.kind(), DecodeErrorKind::OutOfBounds(_)));
    assert_eq!(err.path(), "");
}

#[test]
fn no_plausible_key_is_not_an_error() {
    let bytes: Vec<u8> = (0..=255u8).filter(|b| *b != 0x04).collect();
    assert!(decode(&bytes).unwrap().is_empty());

    // Candidates that fail one check each.
    let bytes = vec![
        0x04, 0x00, 0x00, 0x00, 0x00, b'a', b'b', // zero length
        0x04, 0x01, 0x00, 0x00, 0x00, b'a', b'b', // one byte
        0x04, 0x02, 0x00, 0x00, 0x00, 0x01, b'b', // control byte
        0x04, 0x00, 0x04, 0x00, 0x00, b'a', b'b', // length 1024
    ];
    assert!(decode(&bytes).unwrap().is_empty());
}

#[test]
fn nesting_too_deep_reports_limit_and_path() {
    let mut enc = Encoder::new();
    enc.key("aa").unwrap().begin_object();
    enc.key("bb").unwrap().begin_object();
    enc.key("cc").unwrap().begin_object().end().end().end();
    let options = DecoderOptions {
        max_depth: 2,
        ..Default::default()
    };
    let err = decode_with_options(enc.as_bytes(), options).unwrap_err();
    assert_eq!(*err.kind(), DecodeErrorKind::NestingTooDeep { limit: 2 });
    assert_eq!(err.path(), "aa.bb.cc");
}

#[test]
fn strict_utf8_rejects_bad_keys() {
    let bytes = [
        0x04, 0x02, 0x00, 0x00, 0x00, b'i', b'd', 0x01, 0x01, // id: true
        0x04, 0x02, 0x00, 0x00, 0x00, 0xC0, 0x80, 0x01, 0x01, 0xFF,
    ];
    assert!(decode(&bytes).is_ok());

    let options = DecoderOptions {
        utf8: Utf8Mode::Strict,
        ..Default::default()
    };
    let err = decode_with_options(&bytes, options).unwrap_err();
    assert_eq!(*err.kind(), DecodeErrorKind::InvalidUtf8 { offset: 14 });
    assert_eq!(err.path(), "");
}
