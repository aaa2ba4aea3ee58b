//! Reflection of Rust values into `Value` trees.
//!
//! Scalars, strings, `Option`, smart pointers, sequences and maps from the
//! standard library implement [`Reflect`] out of the box. Structs opt in with
//! [`reflect_record!`](crate::reflect_record).

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::rc::Rc;
use std::sync::Arc;

use crate::shape::{PrimitiveType, Shape};
use crate::value::{Map, Optional, Sequence, Value};

/// A type whose values can be turned into a `Value`.
pub trait Reflect {
    /// The static shape of this type.
    fn shape() -> Shape;

    /// The runtime image of this value.
    fn to_value(&self) -> Value;
}

/// Shape of the field a projection points at.
///
/// Used by `reflect_record!` to recover field types from field names:
/// `field_shape(|p: &Point| &p.x)` is the shape of `Point::x`.
pub fn field_shape<R, T, F>(_projection: F) -> Shape
where
    T: Reflect + ?Sized,
    F: Fn(&R) -> &T,
{
    T::shape()
}

/// Implement [`Reflect`] for a struct, listing the fields to expose.
///
/// Fields are exposed in the order they are listed. A field may carry a
/// tag, available to hooks through [`FieldDescriptor::tag`]. Fields left out
/// are not reflected at all.
///
/// ```rust
/// use structmap_core::{reflect_record, Mapper, Mapped, Reflect, Shape};
///
/// struct Point {
///     x: i64,
///     y: i64,
///     cache: Vec<u8>,
/// }
///
/// reflect_record!(Point { x, y = "axis:vertical" });
///
/// assert_eq!(Point::shape(), Shape::record("Point"));
///
/// let point = Point { x: 1, y: 2, cache: Vec::new() };
/// let mapped = Mapper::new().map(&point).unwrap();
/// let mapping = mapped.as_mapping().unwrap();
/// assert_eq!(mapping.len(), 2);
/// assert_eq!(mapping.get("y"), Some(&Mapped::from(2i64)));
/// ```
///
/// [`FieldDescriptor::tag`]: crate::FieldDescriptor::tag
#[macro_export]
macro_rules! reflect_record {
    ($name:ident { $($field:ident $(= $tag:literal)?),* $(,)? }) => {
        impl $crate::Reflect for $name {
            fn shape() -> $crate::Shape {
                $crate::Shape::record(stringify!($name))
            }

            fn to_value(&self) -> $crate::Value {
                let builder = $crate::Record::builder(stringify!($name));
                $(
                    let descriptor = $crate::FieldDescriptor::new(
                        stringify!($field),
                        $crate::reflect::field_shape(|record: &$name| &record.$field),
                    );
                    $(let descriptor = descriptor.with_tag($tag);)?
                    let builder = builder.with_field(
                        descriptor,
                        $crate::Reflect::to_value(&self.$field),
                    );
                )*
                $crate::Value::Record(builder.build())
            }
        }
    };
}

impl Reflect for Value {
    fn shape() -> Shape {
        Shape::Any
    }

    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl Reflect for bool {
    fn shape() -> Shape {
        Shape::Primitive(PrimitiveType::Bool)
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

macro_rules! reflect_integer {
    ($variant:ident, $primitive:ident, $wide:ty: $($ty:ty),*) => {
        $(
            impl Reflect for $ty {
                fn shape() -> Shape {
                    Shape::Primitive(PrimitiveType::$primitive)
                }

                fn to_value(&self) -> Value {
                    Value::$variant(*self as $wide)
                }
            }
        )*
    };
}

reflect_integer!(Integer, Integer, i64: i8, i16, i32, i64, isize);
reflect_integer!(Unsigned, Unsigned, u64: u8, u16, u32, u64, usize);

impl Reflect for f32 {
    fn shape() -> Shape {
        Shape::Primitive(PrimitiveType::Float)
    }

    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }
}

impl Reflect for f64 {
    fn shape() -> Shape {
        Shape::Primitive(PrimitiveType::Float)
    }

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl Reflect for str {
    fn shape() -> Shape {
        Shape::string()
    }

    fn to_value(&self) -> Value {
        Value::String(self.to_owned())
    }
}

impl Reflect for String {
    fn shape() -> Shape {
        Shape::string()
    }

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl<T: Reflect> Reflect for Option<T> {
    fn shape() -> Shape {
        Shape::optional(T::shape())
    }

    fn to_value(&self) -> Value {
        let optional = match self {
            Some(value) => Optional::some(T::shape(), value.to_value()),
            None => Optional::none(T::shape()),
        };
        Value::Optional(optional)
    }
}

// Owning and borrowing pointers cannot be null, so they reflect as their
// pointee.
macro_rules! reflect_pointer {
    ($($pointer:ident),*) => {
        $(
            impl<T: Reflect + ?Sized> Reflect for $pointer<T> {
                fn shape() -> Shape {
                    T::shape()
                }

                fn to_value(&self) -> Value {
                    T::to_value(self)
                }
            }
        )*
    };
}

reflect_pointer!(Box, Rc, Arc);

impl<T: Reflect + ?Sized> Reflect for &T {
    fn shape() -> Shape {
        T::shape()
    }

    fn to_value(&self) -> Value {
        T::to_value(self)
    }
}

impl<T: Reflect> Reflect for [T] {
    fn shape() -> Shape {
        Shape::sequence(T::shape())
    }

    fn to_value(&self) -> Value {
        Value::Sequence(Sequence::new(
            T::shape(),
            self.iter().map(Reflect::to_value).collect(),
        ))
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn shape() -> Shape {
        <[T]>::shape()
    }

    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn shape() -> Shape {
        <[T]>::shape()
    }

    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<K: Reflect, V: Reflect, S: BuildHasher> Reflect for HashMap<K, V, S> {
    fn shape() -> Shape {
        Shape::map(K::shape(), V::shape())
    }

    fn to_value(&self) -> Value {
        let entries = self.iter().map(|(k, v)| (k.to_value(), v.to_value())).collect();
        Value::Map(Map::new(K::shape(), V::shape(), entries))
    }
}

impl<K: Reflect, V: Reflect> Reflect for BTreeMap<K, V> {
    fn shape() -> Shape {
        Shape::map(K::shape(), V::shape())
    }

    fn to_value(&self) -> Value {
        let entries = self.iter().map(|(k, v)| (k.to_value(), v.to_value())).collect();
        Value::Map(Map::new(K::shape(), V::shape(), entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueKind;

    struct Empty {}
    reflect_record!(Empty {});

    #[allow(dead_code)]
    struct Account {
        id: u32,
        owner: String,
        secret: String,
        nickname: Option<String>,
        tags: Vec<String>,
    }
    reflect_record!(Account {
        id = "key",
        owner,
        nickname,
        tags,
    });

    struct Node {
        label: String,
        children: Vec<Node>,
    }
    reflect_record!(Node { label, children });

    fn account() -> Account {
        Account {
            id: 7,
            owner: "ada".to_string(),
            secret: "hunter2".to_string(),
            nickname: None,
            tags: vec!["a".to_string()],
        }
    }

    #[test]
    fn primitives() {
        assert_eq!(5i8.to_value(), Value::Integer(5));
        assert_eq!(5usize.to_value(), Value::Unsigned(5));
        assert_eq!(1.5f32.to_value(), Value::Float(1.5));
        assert_eq!(true.to_value(), Value::Bool(true));
        assert_eq!("s".to_value(), Value::from("s"));
        assert_eq!(i64::shape(), Shape::Primitive(PrimitiveType::Integer));
        assert_eq!(<str>::shape(), Shape::string());
    }

    #[test]
    fn record_lists_only_named_fields() {
        let value = account().to_value();
        let record = value.as_record().unwrap();
        let names: Vec<&str> = record.fields().map(|(d, _)| d.name()).collect();
        assert_eq!(names, vec!["id", "owner", "nickname", "tags"]);
        assert_eq!(record.type_name(), "Account");
        assert!(record.get("secret").is_none());
    }

    #[test]
    fn record_descriptors_carry_types_and_tags() {
        let value = account().to_value();
        let record = value.as_record().unwrap();
        let descriptors: Vec<_> = record.fields().map(|(d, _)| d.clone()).collect();

        assert_eq!(descriptors[0].tag(), Some("key"));
        assert_eq!(descriptors[0].shape(), &Shape::Primitive(PrimitiveType::Unsigned));
        assert_eq!(descriptors[1].tag(), None);
        assert_eq!(descriptors[2].shape(), &Shape::optional(Shape::string()));
        assert_eq!(descriptors[3].shape(), &Shape::sequence(Shape::string()));
        assert_eq!(descriptors[3].index(), 3);
    }

    #[test]
    fn empty_record() {
        let value = Empty {}.to_value();
        assert_eq!(value.kind(), ValueKind::Record);
        assert!(value.as_record().unwrap().is_empty());
    }

    #[test]
    fn self_referential_record() {
        let tree = Node {
            label: "root".to_string(),
            children: vec![Node {
                label: "leaf".to_string(),
                children: Vec::new(),
            }],
        };
        assert_eq!(
            Node::shape(),
            Shape::record("Node"),
        );
        let value = tree.to_value();
        let children = value.as_record().unwrap().get("children").unwrap();
        assert_eq!(
            children.as_sequence().unwrap().element_shape(),
            &Shape::record("Node")
        );
    }

    #[test]
    fn empty_sequence_keeps_element_shape() {
        let empty: Vec<Account> = Vec::new();
        let value = empty.to_value();
        assert_eq!(
            value.as_sequence().unwrap().element_shape(),
            &Shape::record("Account")
        );
    }

    #[test]
    fn option_keeps_pointee_shape() {
        let none: Option<Node> = None;
        let value = none.to_value();
        assert_eq!(value.as_optional().unwrap().pointee(), &Shape::record("Node"));
        assert!(value.is_null());
    }

    #[test]
    fn pointers_are_transparent() {
        assert_eq!(Box::new(3i32).to_value(), Value::Integer(3));
        assert_eq!(Arc::<str>::from("x").to_value(), Value::from("x"));
        assert_eq!(<Rc<Vec<bool>>>::shape(), Shape::sequence(Shape::Primitive(PrimitiveType::Bool)));
    }

    #[test]
    fn maps_keep_key_shape() {
        let mut by_name = HashMap::new();
        by_name.insert("k".to_string(), 1u8);
        assert_eq!(by_name.to_value().kind(), ValueKind::StringKeyedMap);

        let mut by_id = BTreeMap::new();
        by_id.insert(1i32, "one".to_string());
        assert_eq!(by_id.to_value().kind(), ValueKind::KeyedMap);
    }

    #[test]
    fn arrays_are_sequences() {
        let value = [1u16, 2, 3].to_value();
        let sequence = value.as_sequence().unwrap();
        assert_eq!(sequence.len(), 3);
        assert_eq!(sequence.get(2), Some(&Value::Unsigned(3)));
    }
}
