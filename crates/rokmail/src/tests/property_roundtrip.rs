use alloc::{string::ToString, vec::Vec};

use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

use super::arbitrary::{Section, sections};
use crate::{Map, Value, decode, decode_sections, encode_sections, tag};

fn render(sections: &[Map]) -> Vec<alloc::string::String> {
    sections
        .iter()
        .map(|s| Value::Object(s.clone()).to_string())
        .collect()
}

/// Property: encoding sections and decoding them reproduces the same keys in
/// the same order with the same (normalized) values.
#[quickcheck]
fn encode_then_decode_reproduces_sections(input: Vec<Section>) -> bool {
    let expected = sections(&input);
    let bytes = encode_sections(&expected).unwrap();
    let decoded = decode_sections(&bytes).unwrap();
    render(&decoded) == render(&expected)
}

/// Property: any byte string decodes or fails, it never hangs or panics, and
/// no empty section is ever returned.
#[quickcheck]
fn arbitrary_bytes_decode_to_non_empty_sections(bytes: Vec<u8>) -> bool {
    match decode(&bytes) {
        Ok(mail) => mail.iter().all(|section| !section.is_empty()),
        Err(_) => true,
    }
}

/// Property: noise without key tags in front of a section is skipped.
#[quickcheck]
fn garbage_prefix_is_skipped(garbage: Vec<u8>, section: Section) -> bool {
    let mut bytes: Vec<u8> = garbage
        .into_iter()
        .map(|b| if b == tag::STRING { 0x00 } else { b })
        .collect();
    bytes.extend(encode_sections(core::slice::from_ref(&section.0)).unwrap());
    let decoded = decode_sections(&bytes).unwrap();
    render(&decoded) == render(core::slice::from_ref(&section.0))
}

/// Property: `0x00` decodes to `false`, anything else to `true`.
#[quickcheck]
fn boolean_byte_law(byte: u8) -> bool {
    let bytes = [0x04, 0x02, 0x00, 0x00, 0x00, b'o', b'k', tag::BOOLEAN, byte, 0xFF];
    let sections = decode_sections(&bytes).unwrap();
    sections[0]["ok"] == Value::Boolean(byte != 0)
}

/// Property: every prefix of a valid payload decodes or fails cleanly, and
/// whatever it yields never has more sections than the full payload.
#[quickcheck]
fn prefixes_of_valid_payloads(input: Vec<Section>, cut: usize) -> TestResult {
    let expected = sections(&input);
    let bytes = encode_sections(&expected).unwrap();
    if bytes.is_empty() {
        return TestResult::discard();
    }
    let cut = cut % bytes.len();
    match decode_sections(&bytes[..cut]) {
        Ok(decoded) => TestResult::from_bool(decoded.len() <= expected.len()),
        Err(_) => TestResult::passed(),
    }
}
