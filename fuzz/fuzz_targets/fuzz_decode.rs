#![no_main]
use libfuzzer_sys::fuzz_target;
use rokmail::{DecoderOptions, SectionScanner, Utf8Mode};

fn decode(data: &[u8]) {
    let Some((&flags, data)) = data.split_first() else {
        return;
    };

    let options = DecoderOptions {
        max_depth: usize::from(flags >> 1),
        utf8: if flags & 1 != 0 {
            Utf8Mode::Strict
        } else {
            Utf8Mode::Lossy
        },
    };

    let mut failed = false;
    for section in SectionScanner::new(data, options) {
        // Nothing follows an error.
        assert!(!failed, "section yielded after an error");
        match section {
            Ok(map) => assert!(!map.is_empty(), "empty section yielded"),
            Err(err) => {
                assert!(err.offset() <= data.len());
                failed = true;
            }
        }
    }
}

fuzz_target!(|data: &[u8]| decode(data));
