//! Static type information carried alongside values.
//!
//! The walker classifies values by their type, never by their content. An
//! empty `Vec<Point>` is still a sequence of records, and a `None` of type
//! `Option<Point>` still points at a record. `Shape` is how that static type
//! survives into the dynamically-typed `Value` tree.

use std::borrow::Cow;
use std::fmt;

/// Scalar types a `Value` carries directly.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum PrimitiveType {
    Bool,
    Integer,
    Unsigned,
    Float,
    String,
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PrimitiveType::Bool => "bool",
            PrimitiveType::Integer => "integer",
            PrimitiveType::Unsigned => "unsigned",
            PrimitiveType::Float => "float",
            PrimitiveType::String => "string",
        };
        f.write_str(name)
    }
}

/// The static type of a reflected value.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum Shape {
    /// A dynamically-typed slot. Anything may be stored here.
    Any,
    /// A scalar.
    Primitive(PrimitiveType),
    /// A nullable indirection to a value of the inner shape.
    Optional(Box<Shape>),
    /// A record type, identified by its type name.
    ///
    /// Only the name is kept so that self-referential records
    /// (`struct Node { children: Vec<Node> }`) have a finite shape.
    Record(Cow<'static, str>),
    /// An associative container.
    Map { key: Box<Shape>, value: Box<Shape> },
    /// An ordered sequence with a single element type.
    Sequence(Box<Shape>),
}

impl Shape {
    pub fn string() -> Self {
        Shape::Primitive(PrimitiveType::String)
    }

    pub fn record(type_name: impl Into<Cow<'static, str>>) -> Self {
        Shape::Record(type_name.into())
    }

    pub fn optional(pointee: Shape) -> Self {
        Shape::Optional(Box::new(pointee))
    }

    pub fn map(key: Shape, value: Shape) -> Self {
        Shape::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn sequence(element: Shape) -> Self {
        Shape::Sequence(Box::new(element))
    }

    /// Check if this is the string primitive.
    pub fn is_string(&self) -> bool {
        matches!(self, Shape::Primitive(PrimitiveType::String))
    }

    /// Check if this is a record type.
    pub fn is_record(&self) -> bool {
        matches!(self, Shape::Record(_))
    }

    /// Check if this is a map whose keys are strings.
    pub fn is_string_keyed_map(&self) -> bool {
        matches!(self, Shape::Map { key, .. } if key.is_string())
    }

    /// Whether values of this shape become generic mappings or sequences.
    ///
    /// Records and string-keyed maps convert. A sequence converts when its
    /// element shape does, at any nesting depth. Everything else, including
    /// optionals and `Any`, is passed through as-is when found inside a
    /// sequence.
    pub fn is_convertible(&self) -> bool {
        match self {
            Shape::Record(_) => true,
            Shape::Map { key, .. } => key.is_string(),
            Shape::Sequence(element) => element.is_convertible(),
            _ => false,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Any => write!(f, "any"),
            Shape::Primitive(primitive) => write!(f, "{}", primitive),
            Shape::Optional(pointee) => write!(f, "optional<{}>", pointee),
            Shape::Record(name) => write!(f, "{}", name),
            Shape::Map { key, value } => write!(f, "map<{}, {}>", key, value),
            Shape::Sequence(element) => write!(f, "[{}]", element),
        }
    }
}
