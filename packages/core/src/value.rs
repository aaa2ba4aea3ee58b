//! The Value type - a typed tree the mapper walks.
//!
//! A `Value` is the runtime image of some Rust value: scalars, optionals,
//! records with ordered fields, associative containers and sequences. Each
//! composite keeps the `Shape` of its children, so classification never
//! depends on content.
//!
//! Payloads behind an indirection (optional pointees, sequence items, map
//! entries, record fields) are shared through `Arc`. Cloning a `Value` never
//! deep-copies them, and a value passed through the mapper unchanged still
//! points at the same allocation as the input.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::shape::{PrimitiveType, Shape};

/// A typed value that can be handed to a `Mapper`.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// Untyped absence of a value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed integer of any width.
    Integer(i64),
    /// Unsigned integer of any width.
    Unsigned(u64),
    /// Floating point number.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Nullable indirection.
    Optional(Optional),
    /// Struct-like value with named fields.
    Record(Record),
    /// Associative container.
    Map(Map),
    /// Ordered sequence.
    Sequence(Sequence),
}

/// Classification of a `Value` for dispatch.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Primitive,
    Optional,
    Record,
    StringKeyedMap,
    /// A map whose keys are not strings.
    KeyedMap,
    Sequence,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Primitive => "primitive",
            ValueKind::Optional => "optional",
            ValueKind::Record => "record",
            ValueKind::StringKeyedMap => "string-keyed map",
            ValueKind::KeyedMap => "keyed map",
            ValueKind::Sequence => "sequence",
        };
        f.write_str(name)
    }
}

impl Value {
    /// Create a null value.
    pub fn null() -> Self {
        Value::Null
    }

    /// Classify this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_)
            | Value::Integer(_)
            | Value::Unsigned(_)
            | Value::Float(_)
            | Value::String(_) => ValueKind::Primitive,
            Value::Optional(_) => ValueKind::Optional,
            Value::Record(_) => ValueKind::Record,
            Value::Map(map) if map.is_string_keyed() => ValueKind::StringKeyedMap,
            Value::Map(_) => ValueKind::KeyedMap,
            Value::Sequence(_) => ValueKind::Sequence,
        }
    }

    /// The shape this value was built from.
    ///
    /// `Null` has no static type and reports `Shape::Any`.
    pub fn shape(&self) -> Shape {
        match self {
            Value::Null => Shape::Any,
            Value::Bool(_) => Shape::Primitive(PrimitiveType::Bool),
            Value::Integer(_) => Shape::Primitive(PrimitiveType::Integer),
            Value::Unsigned(_) => Shape::Primitive(PrimitiveType::Unsigned),
            Value::Float(_) => Shape::Primitive(PrimitiveType::Float),
            Value::String(_) => Shape::string(),
            Value::Optional(optional) => Shape::optional(optional.pointee().clone()),
            Value::Record(record) => Shape::record(record.type_name().to_owned()),
            Value::Map(map) => Shape::map(map.key_shape().clone(), map.value_shape().clone()),
            Value::Sequence(sequence) => Shape::sequence(sequence.element_shape().clone()),
        }
    }

    /// The record type name, if this is a record.
    pub fn type_name(&self) -> Option<&str> {
        self.as_record().map(Record::type_name)
    }

    /// Check if this value is null, or an optional holding nothing.
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Optional(optional) => optional.is_none(),
            _ => false,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::Unsigned(u) => i64::try_from(*u).ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_optional(&self) -> Option<&Optional> {
        match self {
            Value::Optional(optional) => Some(optional),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Value::Sequence(sequence) => Some(sequence),
            _ => None,
        }
    }

    /// Render this value as a mapping key.
    ///
    /// Strings are used verbatim; any other value uses its `Display` form.
    pub fn to_key(&self) -> Cow<'_, str> {
        match self {
            Value::String(s) => Cow::Borrowed(s),
            other => Cow::Owned(other.to_string()),
        }
    }
}

/// A nullable indirection, the image of `Option<T>`.
#[derive(Clone, Debug, PartialEq)]
pub struct Optional {
    pointee: Shape,
    value: Option<Arc<Value>>,
}

impl Optional {
    /// An optional of the given pointee shape holding nothing.
    pub fn none(pointee: Shape) -> Self {
        Self {
            pointee,
            value: None,
        }
    }

    pub fn some(pointee: Shape, value: impl Into<Arc<Value>>) -> Self {
        Self {
            pointee,
            value: Some(value.into()),
        }
    }

    pub fn pointee(&self) -> &Shape {
        &self.pointee
    }

    pub fn is_none(&self) -> bool {
        self.value.is_none()
    }

    pub fn get(&self) -> Option<&Value> {
        self.value.as_deref()
    }

    /// The shared pointee, for identity checks.
    pub fn as_arc(&self) -> Option<&Arc<Value>> {
        self.value.as_ref()
    }
}

/// Static metadata of one record field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: Cow<'static, str>,
    index: usize,
    tag: Option<Cow<'static, str>>,
    shape: Shape,
}

impl FieldDescriptor {
    /// Describe a field. The index is assigned when it is added to a record.
    pub fn new(name: impl Into<Cow<'static, str>>, shape: Shape) -> Self {
        Self {
            name: name.into(),
            index: 0,
            tag: None,
            shape,
        }
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<Cow<'static, str>>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position of the field in declaration order.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Declared type of the field.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }
}

/// A struct-like value: a type name plus fields in declaration order.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    type_name: Cow<'static, str>,
    fields: Arc<[(FieldDescriptor, Value)]>,
}

impl Record {
    pub fn builder(type_name: impl Into<Cow<'static, str>>) -> RecordBuilder {
        RecordBuilder {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Iterate fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&FieldDescriptor, &Value)> {
        self.fields.iter().map(|(descriptor, value)| (descriptor, value))
    }

    /// Look up a field value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(descriptor, _)| descriptor.name() == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Builder for `Record` values.
#[derive(Debug)]
pub struct RecordBuilder {
    type_name: Cow<'static, str>,
    fields: Vec<(FieldDescriptor, Value)>,
}

impl RecordBuilder {
    /// Append a field with the given declared shape.
    #[must_use]
    pub fn field(self, name: impl Into<Cow<'static, str>>, shape: Shape, value: Value) -> Self {
        self.with_field(FieldDescriptor::new(name, shape), value)
    }

    /// Append a fully described field. Its index is set to its position.
    #[must_use]
    pub fn with_field(mut self, mut descriptor: FieldDescriptor, value: Value) -> Self {
        descriptor.index = self.fields.len();
        self.fields.push((descriptor, value));
        self
    }

    pub fn build(self) -> Record {
        Record {
            type_name: self.type_name,
            fields: self.fields.into(),
        }
    }
}

/// An associative container, the image of `HashMap` and `BTreeMap`.
#[derive(Clone, Debug, PartialEq)]
pub struct Map {
    key: Shape,
    value: Shape,
    entries: Arc<[(Value, Value)]>,
}

impl Map {
    pub fn new(key: Shape, value: Shape, entries: Vec<(Value, Value)>) -> Self {
        Self {
            key,
            value,
            entries: entries.into(),
        }
    }

    /// A map with string keys.
    pub fn with_string_keys<K>(value: Shape, entries: impl IntoIterator<Item = (K, Value)>) -> Self
    where
        K: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(key, value)| (Value::String(key.into()), value))
            .collect();
        Self::new(Shape::string(), value, entries)
    }

    pub fn key_shape(&self) -> &Shape {
        &self.key
    }

    pub fn value_shape(&self) -> &Shape {
        &self.value
    }

    pub fn is_string_keyed(&self) -> bool {
        self.key.is_string()
    }

    pub fn entries(&self) -> &[(Value, Value)] {
        &self.entries
    }

    /// Look up an entry by its key rendering.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k.to_key() == key)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// An ordered sequence, the image of `Vec<T>`, `[T]` and `[T; N]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Sequence {
    element: Shape,
    items: Arc<[Value]>,
}

impl Sequence {
    pub fn new(element: Shape, items: Vec<Value>) -> Self {
        Self {
            element,
            items: items.into(),
        }
    }

    pub fn element_shape(&self) -> &Shape {
        &self.element
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Check whether two sequences share the same item storage.
    pub fn ptr_eq(&self, other: &Sequence) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Unsigned(u) => write!(f, "{}", u),
            Value::Float(x) => write!(f, "{}", x),
            Value::String(s) => write!(f, "{}", s),
            Value::Optional(optional) => match optional.get() {
                Some(value) => write!(f, "{}", value),
                None => write!(f, "null"),
            },
            Value::Record(record) => {
                write!(f, "{}{{", record.type_name())?;
                for (i, (descriptor, value)) in record.fields().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", descriptor.name(), value)?;
                }
                write!(f, "}}")
            }
            Value::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.entries().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
            Value::Sequence(sequence) => {
                write!(f, "[")?;
                for (i, item) in sequence.items().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

// Conversion from common types

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Unsigned(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Optional> for Value {
    fn from(v: Optional) -> Self {
        Value::Optional(v)
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Value::Record(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Value::Map(v)
    }
}

impl From<Sequence> for Value {
    fn from(v: Sequence) -> Self {
        Value::Sequence(v)
    }
}
