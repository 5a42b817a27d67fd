//! `serde` support. Values serialize as their JSON shape, not as tagged enums.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::{
    mail::Mail,
    value::{Map, Number, Value},
};

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Number::Int(n) => serializer.serialize_i32(n),
            Number::Long(n) => serializer.serialize_i64(n),
            Number::Float(n) => serializer.serialize_f64(n),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Number(n) => n.serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::Object(map) => serializer.collect_map(map),
        }
    }
}

struct Sections<'a>(&'a [Map]);

impl Serialize for Sections<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(Section))
    }
}

struct Section<'a>(&'a Map);

impl Serialize for Section<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0)
    }
}

impl Serialize for Mail {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Mail", 1)?;
        state.serialize_field("sections", &Sections(&self.sections))?;
        state.end()
    }
}
