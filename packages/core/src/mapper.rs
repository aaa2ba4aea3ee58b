//! The `Mapper` and its hooks.

use std::fmt;
use std::sync::Arc;

use crate::element::Element;
use crate::error::{Error, HookError};
use crate::mapped::Mapped;
use crate::path::Path;
use crate::reflect::Reflect;
use crate::value::Value;

/// Decides whether a record, string-keyed map or sequence is converted at
/// all. Returning `false` hands the composite back unchanged.
pub type ShouldConvertFn = dyn Fn(&Path, &Value) -> Result<bool, HookError> + Send + Sync;

/// Decides whether an element is kept. A dropped element's subtree is never
/// visited.
pub type FilterFn = dyn Fn(&Path, &Element<'_>) -> Result<bool, HookError> + Send + Sync;

/// Chooses the output key of an element.
pub type RenameFn = dyn Fn(&Path, &Element<'_>) -> Result<String, HookError> + Send + Sync;

/// Replaces the value of an element before it is walked.
pub type MapValueFn = dyn Fn(&Path, &Element<'_>) -> Result<Value, HookError> + Send + Sync;

/// Converts typed values into generic mappings and sequences.
///
/// A `Mapper` is immutable once built. Every hook has an identity default,
/// so `Mapper::default()` converts every record and string-keyed map it
/// finds and keeps every element under its own name.
///
/// # Example
///
/// ```rust
/// use structmap_core::{Mapper, Mapped, Map, Shape, Value};
///
/// let mapper = Mapper::builder()
///     .filter(|path, _| Ok(path == ".key"))
///     .rename(|_, element| Ok(element.name().to_uppercase()))
///     .build();
///
/// let value = Value::from(Map::with_string_keys(
///     Shape::Any,
///     [("key", Value::from("value")), ("another", Value::from("another value"))],
/// ));
///
/// let result = mapper.map_any(&value).unwrap();
/// let mapping = result.as_mapping().unwrap();
/// assert_eq!(mapping.len(), 1);
/// assert_eq!(mapping.get("KEY"), Some(&Mapped::from("value")));
/// ```
#[derive(Clone)]
pub struct Mapper {
    pub(crate) should_convert: Arc<ShouldConvertFn>,
    pub(crate) filter: Arc<FilterFn>,
    pub(crate) rename: Arc<RenameFn>,
    pub(crate) map_value: Arc<MapValueFn>,
}

impl Mapper {
    /// A mapper with every hook defaulted.
    pub fn new() -> Self {
        MapperBuilder::new().build()
    }

    pub fn builder() -> MapperBuilder {
        MapperBuilder::new()
    }

    /// Map any value, starting from the root path.
    ///
    /// Any hook error aborts the whole conversion; no partial result is
    /// returned.
    pub fn map_any(&self, value: &Value) -> Result<Mapped, Error> {
        self.walk(&Path::root(), value)
    }

    /// Reflect a typed value and map it.
    pub fn map<T: Reflect + ?Sized>(&self, value: &T) -> Result<Mapped, Error> {
        self.map_any(&value.to_value())
    }
}

impl Default for Mapper {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Mapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mapper").finish_non_exhaustive()
    }
}

/// Builds a `Mapper`. Hooks left unset get their identity default.
///
/// The builder can be reused: `build` does not consume it, and setting a
/// hook on a clone leaves the original untouched.
#[derive(Clone, Default)]
pub struct MapperBuilder {
    should_convert: Option<Arc<ShouldConvertFn>>,
    filter: Option<Arc<FilterFn>>,
    rename: Option<Arc<RenameFn>>,
    map_value: Option<Arc<MapValueFn>>,
}

impl MapperBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn should_convert<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Path, &Value) -> Result<bool, HookError> + Send + Sync + 'static,
    {
        self.should_convert = Some(Arc::new(hook));
        self
    }

    #[must_use]
    pub fn filter<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Path, &Element<'_>) -> Result<bool, HookError> + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(hook));
        self
    }

    #[must_use]
    pub fn rename<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Path, &Element<'_>) -> Result<String, HookError> + Send + Sync + 'static,
    {
        self.rename = Some(Arc::new(hook));
        self
    }

    #[must_use]
    pub fn map_value<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Path, &Element<'_>) -> Result<Value, HookError> + Send + Sync + 'static,
    {
        self.map_value = Some(Arc::new(hook));
        self
    }

    pub fn build(&self) -> Mapper {
        Mapper {
            should_convert: self
                .should_convert
                .clone()
                .unwrap_or_else(|| Arc::new(convert_everything)),
            filter: self.filter.clone().unwrap_or_else(|| Arc::new(accept_all)),
            rename: self.rename.clone().unwrap_or_else(|| Arc::new(keep_name)),
            map_value: self.map_value.clone().unwrap_or_else(|| Arc::new(keep_value)),
        }
    }
}

impl fmt::Debug for MapperBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapperBuilder")
            .field("should_convert", &self.should_convert.is_some())
            .field("filter", &self.filter.is_some())
            .field("rename", &self.rename.is_some())
            .field("map_value", &self.map_value.is_some())
            .finish()
    }
}

fn convert_everything(_: &Path, _: &Value) -> Result<bool, HookError> {
    Ok(true)
}

fn accept_all(_: &Path, _: &Element<'_>) -> Result<bool, HookError> {
    Ok(true)
}

fn keep_name(_: &Path, element: &Element<'_>) -> Result<String, HookError> {
    Ok(element.name().to_owned())
}

fn keep_value(_: &Path, element: &Element<'_>) -> Result<Value, HookError> {
    Ok(element.value().clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapper_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Mapper>();
        assert_send_sync::<MapperBuilder>();
    }

    #[test]
    fn building_does_not_consume_the_builder() {
        let builder = Mapper::builder().filter(|_, _| Ok(false));
        let first = builder.build();
        let second = builder.build();
        assert!(Arc::ptr_eq(&first.filter, &second.filter));
    }

    #[test]
    fn cloned_builder_is_independent() {
        let base = Mapper::builder();
        let custom = base.clone().rename(|_, _| Ok("renamed".to_string()));
        assert!(format!("{:?}", base).contains("rename: false"));
        assert!(format!("{:?}", custom).contains("rename: true"));
    }

    #[test]
    fn debug_hides_hooks() {
        assert_eq!(format!("{:?}", Mapper::new()), "Mapper { .. }");
    }
}
