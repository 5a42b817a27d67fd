use alloc::{string::String, vec::Vec};

use quickcheck::{Arbitrary, Gen};

use crate::{MAX_KEY_LEN, MIN_KEY_LEN, Map, Value};

/// A key the section scanner accepts: printable ASCII, short.
pub(crate) fn plausible_key(g: &mut Gen) -> String {
    let len = MIN_KEY_LEN + usize::arbitrary(g) % 11;
    debug_assert!(len < MAX_KEY_LEN);
    (0..len)
        .map(|_| char::from(0x20 + u8::arbitrary(g) % 95))
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn number(g: &mut Gen) -> Value {
    match usize::arbitrary(g) % 3 {
        0 => Value::from(f64::from(i32::arbitrary(g))),
        1 => Value::from(i64::arbitrary(g) as f64),
        _ => Value::from(f64::arbitrary(g)),
    }
}

impl Arbitrary for Value {
    fn arbitrary(g: &mut Gen) -> Self {
        fn gen_val(g: &mut Gen, depth: usize) -> Value {
            let kinds = if depth == 0 { 4 } else { 5 };
            match usize::arbitrary(g) % kinds {
                0 => Value::Null,
                1 => Value::Boolean(bool::arbitrary(g)),
                2 => number(g),
                3 => Value::String(String::arbitrary(g)),
                _ => {
                    let len = usize::arbitrary(g) % 3;
                    let mut map = Map::default();
                    for _ in 0..len {
                        map.insert(String::arbitrary(g), gen_val(g, depth - 1));
                    }
                    Value::Object(map)
                }
            }
        }

        let depth = usize::arbitrary(g) % 3;
        gen_val(g, depth)
    }
}

/// A non-empty section whose first key the scanner will find.
#[derive(Clone, Debug)]
pub(crate) struct Section(pub(crate) Map);

impl Arbitrary for Section {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut map = Map::default();
        map.insert(plausible_key(g), Value::arbitrary(g));
        for _ in 0..usize::arbitrary(g) % 4 {
            map.insert(String::arbitrary(g), Value::arbitrary(g));
        }
        Self(map)
    }
}

pub(crate) fn sections(sections: &[Section]) -> Vec<Map> {
    sections.iter().map(|s| s.0.clone()).collect()
}
