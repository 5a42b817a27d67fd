#![allow(missing_docs, dead_code)]

use rokmail::Encoder;

pub const SENT_AT: f64 = 1_700_000_000.0;

/// Header section: type, time and id.
pub fn header(enc: &mut Encoder) {
    enc.key("type").unwrap().string("Battle").unwrap();
    enc.key("time").unwrap().f64(SENT_AT);
    enc.key("id").unwrap().string("m-42").unwrap();
    enc.end();
}

/// Opens the body section and writes its first three fields, leaving the
/// nested object open.
pub fn body_start(enc: &mut Encoder) {
    enc.key("body").unwrap().begin_object();
    enc.key("kills").unwrap().f64(12.0);
    enc.key("power").unwrap().f32(1.5);
    enc.key("won").unwrap().bool(true);
}

/// A complete two-section report with noise between the sections.
pub fn battle_report() -> Vec<u8> {
    let mut enc = Encoder::new();
    header(&mut enc);
    enc.raw(&[0x00, 0x13, 0x37]);
    body_start(&mut enc);
    enc.key("note").unwrap().null();
    enc.end().end();
    enc.into_bytes()
}
