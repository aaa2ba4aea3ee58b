//! Named children handed to the element hooks.

use std::borrow::Cow;

use crate::value::{FieldDescriptor, Value, ValueKind};

/// A record field or a map entry being visited.
///
/// Sequence members are never turned into elements: they have no name, and
/// the hook pipeline does not run on them.
#[derive(Clone, Debug)]
pub struct Element<'a> {
    name: Cow<'a, str>,
    value: &'a Value,
    field: Option<&'a FieldDescriptor>,
}

impl<'a> Element<'a> {
    pub(crate) fn for_field(field: &'a FieldDescriptor, value: &'a Value) -> Self {
        Self {
            name: Cow::Borrowed(field.name()),
            value,
            field: Some(field),
        }
    }

    pub(crate) fn for_entry(key: &'a Value, value: &'a Value) -> Self {
        Self {
            name: key.to_key(),
            value,
            field: None,
        }
    }

    /// Field name of a record, or the key of a map entry.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value as found in the input, before any hook ran.
    pub fn value(&self) -> &'a Value {
        self.value
    }

    pub fn kind(&self) -> ValueKind {
        self.value.kind()
    }

    /// Static metadata of the field. `None` for map entries.
    pub fn field_descriptor(&self) -> Option<&'a FieldDescriptor> {
        self.field
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Shape;

    #[test]
    fn field_elements_carry_descriptors() {
        let descriptor = FieldDescriptor::new("Field", Shape::string());
        let value = Value::from("v");
        let element = Element::for_field(&descriptor, &value);

        assert_eq!(element.name(), "Field");
        assert_eq!(element.value(), &value);
        assert_eq!(element.kind(), ValueKind::Primitive);
        assert_eq!(element.field_descriptor().map(|f| f.name()), Some("Field"));
    }

    #[test]
    fn entry_elements_have_no_descriptor() {
        let key = Value::from("key");
        let value = Value::from(1i64);
        let element = Element::for_entry(&key, &value);

        assert_eq!(element.name(), "key");
        assert!(element.field_descriptor().is_none());
    }

    #[test]
    fn non_string_keys_are_rendered() {
        let key = Value::from(42i64);
        let value = Value::Null;
        assert_eq!(Element::for_entry(&key, &value).name(), "42");
    }
}
