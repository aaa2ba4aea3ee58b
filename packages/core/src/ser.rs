//! `Serialize` for values and mapping results, so any serde format can
//! encode them.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::mapped::Mapped;
use crate::value::Value;

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Unsigned(u) => serializer.serialize_u64(*u),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Optional(optional) => match optional.get() {
                Some(value) => serializer.serialize_some(value),
                None => serializer.serialize_none(),
            },
            // Field names are not 'static, so records go out as maps.
            Value::Record(record) => {
                let mut map = serializer.serialize_map(Some(record.len()))?;
                for (field, value) in record.fields() {
                    map.serialize_entry(field.name(), value)?;
                }
                map.end()
            }
            Value::Map(m) => {
                let mut map = serializer.serialize_map(Some(m.len()))?;
                for (key, value) in m.entries() {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Value::Sequence(sequence) => serializer.collect_seq(sequence.items()),
        }
    }
}

impl Serialize for Mapped {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Mapped::Mapping(mapping) => serializer.collect_map(mapping),
            Mapped::Sequence(items) => serializer.collect_seq(items),
            Mapped::Value(value) => value.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use collection_literals::btree;

    use super::*;
    use crate::shape::Shape;
    use crate::value::{Optional, Record, Sequence};

    #[test]
    fn record_serializes_in_field_order() {
        let record: Value = Record::builder("R")
            .field("b", Shape::string(), Value::from("1"))
            .field("a", Shape::string(), Value::from("2"))
            .build()
            .into();
        assert_eq!(serde_json::to_string(&record).unwrap(), r#"{"b":"1","a":"2"}"#);
    }

    #[test]
    fn optionals_serialize_as_options() {
        let none: Value = Optional::none(Shape::string()).into();
        let some: Value = Optional::some(Shape::string(), Value::from("x")).into();
        assert_eq!(serde_json::to_string(&none).unwrap(), "null");
        assert_eq!(serde_json::to_string(&some).unwrap(), r#""x""#);
    }

    #[test]
    fn mapped_serializes_as_tree() {
        let mapped = Mapped::Sequence(vec![
            Mapped::Mapping(btree! {
                "Field".to_string() => Mapped::from("A0"),
            }),
            Mapped::Value(Sequence::new(Shape::string(), vec![Value::from("raw")]).into()),
        ]);
        assert_eq!(
            serde_json::to_value(&mapped).unwrap(),
            serde_json::json!([{"Field": "A0"}, ["raw"]])
        );
    }
}
