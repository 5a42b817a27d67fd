#![no_main]
use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;
use rokmail::{MAX_KEY_LEN, MIN_KEY_LEN, Map, Value, decode_sections, encode_sections};

/// Depth cap for generated objects.
const MAX_DEPTH: usize = 8;

fn arbitrary_value(u: &mut Unstructured<'_>, depth: usize) -> arbitrary::Result<Value> {
    let kinds = if depth < MAX_DEPTH { 16 } else { 12 };
    let value = match u.choose_index(kinds)? {
        0 => Value::Null,
        1 => Value::Boolean(u.arbitrary()?),
        2..=5 => {
            let n: f64 = u.arbitrary()?;
            if !n.is_finite() {
                return Err(arbitrary::Error::IncorrectFormat);
            }
            Value::from(n)
        }
        6..=11 => Value::String(u.arbitrary()?),
        _ => Value::Object(arbitrary_entries(u, depth + 1)?),
    };
    Ok(value)
}

fn arbitrary_entries(u: &mut Unstructured<'_>, depth: usize) -> arbitrary::Result<Map> {
    let mut map = Map::default();
    for _ in 0..u.int_in_range(0..=4)? {
        let key: String = u.arbitrary()?;
        map.insert(key, arbitrary_value(u, depth)?);
    }
    Ok(map)
}

/// A section whose first key the scanner will find.
#[derive(Debug)]
struct ArbitrarySection(Map);

impl<'a> Arbitrary<'a> for ArbitrarySection {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let len = u.int_in_range(MIN_KEY_LEN..=MAX_KEY_LEN - 1)?;
        let key = (0..len)
            .map(|_| u.int_in_range(0x20u8..=0x7E).map(char::from))
            .collect::<arbitrary::Result<String>>()?;
        let mut map = Map::default();
        map.insert(key, arbitrary_value(u, 0)?);
        map.extend(arbitrary_entries(u, 0)?);
        Ok(ArbitrarySection(map))
    }
}

fn roundtrip(sections: Vec<ArbitrarySection>) {
    let sections: Vec<Map> = sections.into_iter().map(|s| s.0).collect();
    let bytes = encode_sections(&sections).unwrap();
    let decoded = decode_sections(&bytes).unwrap();

    assert_eq!(decoded.len(), sections.len());
    for (got, want) in decoded.iter().zip(&sections) {
        assert_eq!(
            Value::Object(got.clone()).to_string(),
            Value::Object(want.clone()).to_string()
        );
    }
}

fuzz_target!(|sections: Vec<ArbitrarySection>| roundtrip(sections));
