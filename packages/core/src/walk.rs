//! The recursive walk: type dispatch and the per-element hook pipeline.

use crate::element::Element;
use crate::error::{Error, HookError, HookStage};
use crate::mapped::{Mapped, Mapping};
use crate::mapper::Mapper;
use crate::path::Path;
use crate::value::{Map, Record, Sequence, Value};

impl Mapper {
    /// Map `value`, found at `path`.
    ///
    /// Dispatch, first match wins:
    ///
    /// 1. An optional pointing at a record is transparent: the pointee is
    ///    walked at the same path. A null one is returned as-is.
    /// 2. A record becomes a mapping of its fields.
    /// 3. A string-keyed map becomes a mapping of its entries.
    /// 4. A sequence whose element shape is convertible (records, string-keyed
    ///    maps, or sequences of those at any depth) becomes a sequence of its
    ///    walked members.
    /// 5. Anything else is returned unchanged without consulting any hook.
    ///
    /// Cases 2 to 4 first ask `ShouldConvert`.
    pub(crate) fn walk(&self, path: &Path, value: &Value) -> Result<Mapped, Error> {
        match value {
            Value::Optional(optional) if optional.pointee().is_record() => match optional.get() {
                Some(pointee) => self.walk(path, pointee),
                None => Ok(Mapped::passthrough(value)),
            },
            Value::Record(record) => {
                if !self.should_convert(path, value)? {
                    return Ok(Mapped::passthrough(value));
                }
                self.walk_record(path, record)
            }
            Value::Map(map) if map.is_string_keyed() => {
                if !self.should_convert(path, value)? {
                    return Ok(Mapped::passthrough(value));
                }
                self.walk_entries(path, map)
            }
            Value::Sequence(sequence) if sequence.element_shape().is_convertible() => {
                if !self.should_convert(path, value)? {
                    return Ok(Mapped::passthrough(value));
                }
                self.walk_members(path, sequence)
            }
            Value::Null
            | Value::Bool(_)
            | Value::Integer(_)
            | Value::Unsigned(_)
            | Value::Float(_)
            | Value::String(_) => Ok(Mapped::passthrough(value)),
            other => {
                log::trace!("passing through {} at '{}'", other.kind(), path);
                Ok(Mapped::passthrough(value))
            }
        }
    }

    fn should_convert(&self, path: &Path, value: &Value) -> Result<bool, Error> {
        let convert = (self.should_convert)(path, value)
            .map_err(|source| abort(HookStage::ShouldConvert, path, source))?;
        if !convert {
            log::trace!("ShouldConvert declined {} at '{}'", value.kind(), path);
        }
        Ok(convert)
    }

    fn walk_record(&self, path: &Path, record: &Record) -> Result<Mapped, Error> {
        let mut mapping = Mapping::new();
        for (field, value) in record.fields() {
            let element = Element::for_field(field, value);
            self.apply(&path.field(field.name()), &element, &mut mapping)?;
        }
        Ok(Mapped::Mapping(mapping))
    }

    fn walk_entries(&self, path: &Path, map: &Map) -> Result<Mapped, Error> {
        let mut mapping = Mapping::new();
        for (key, value) in map.entries() {
            let element = Element::for_entry(key, value);
            self.apply(&path.field(element.name()), &element, &mut mapping)?;
        }
        Ok(Mapped::Mapping(mapping))
    }

    fn walk_members(&self, path: &Path, sequence: &Sequence) -> Result<Mapped, Error> {
        sequence
            .items()
            .iter()
            .enumerate()
            .map(|(index, member)| self.walk(&path.index(index), member))
            .collect::<Result<Vec<_>, _>>()
            .map(Mapped::Sequence)
    }

    /// Run one element through Filter, Rename and MapValue, then walk the
    /// resulting value and store it under the new name.
    ///
    /// Descendants are walked under `path`, which is built from the original
    /// name; renaming only changes the output key.
    fn apply(&self, path: &Path, element: &Element<'_>, mapping: &mut Mapping) -> Result<(), Error> {
        let accepted =
            (self.filter)(path, element).map_err(|source| abort(HookStage::Filter, path, source))?;
        if !accepted {
            return Ok(());
        }

        let name =
            (self.rename)(path, element).map_err(|source| abort(HookStage::Rename, path, source))?;
        let value = (self.map_value)(path, element)
            .map_err(|source| abort(HookStage::MapValue, path, source))?;

        let mapped = self.walk(path, &value)?;
        mapping.insert(name, mapped);
        Ok(())
    }
}

fn abort(stage: HookStage, path: &Path, source: HookError) -> Error {
    log::debug!("{} failed at '{}', aborting: {}", stage, path, source);
    Error::hook_failed(stage, path.clone(), source)
}
