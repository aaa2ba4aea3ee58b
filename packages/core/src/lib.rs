//! structmap core: typed values in, generic trees out.
//!
//! This crate turns records, string-keyed maps and sequences of either into
//! a generic tree of mappings, sequences and untouched values:
//! - `Value`: the typed tree handed to the mapper, with `Shape` information
//! - `Reflect`: how Rust values become `Value`s (`reflect_record!` for structs)
//! - `Mapper`: the walker and its four hooks (`ShouldConvert`, `Filter`,
//!   `Rename`, `MapValue`)
//! - `Path`: where in the tree a hook is being asked about
//! - `Mapped`: the result
//!
//! # Example
//!
//! ```rust
//! use structmap_core::{reflect_record, Mapper, Mapped};
//!
//! struct Item {
//!     name: String,
//!     price: u32,
//! }
//!
//! reflect_record!(Item { name, price });
//!
//! let items = vec![
//!     Item { name: "tea".to_string(), price: 3 },
//!     Item { name: "cake".to_string(), price: 5 },
//! ];
//!
//! // Hide prices, but only for the first item.
//! let mapper = Mapper::builder()
//!     .filter(|path, _| Ok(path != "[0].price"))
//!     .build();
//!
//! let result = mapper.map(&items).unwrap();
//! let items = result.as_sequence().unwrap();
//! assert_eq!(items[0].as_mapping().unwrap().len(), 1);
//! assert_eq!(items[1].as_mapping().unwrap().get("price"), Some(&Mapped::from(5u64)));
//! ```

mod element;
mod error;
mod mapped;
mod mapper;
mod path;
pub mod reflect;
mod ser;
mod shape;
mod value;
mod walk;

pub use element::Element;
pub use error::{Error, HookError, HookStage};
pub use mapped::{Mapped, Mapping};
pub use mapper::{FilterFn, MapValueFn, Mapper, MapperBuilder, RenameFn, ShouldConvertFn};
pub use path::{Path, PathError, Segment};
pub use reflect::Reflect;
pub use shape::{PrimitiveType, Shape};
pub use value::{FieldDescriptor, Map, Optional, Record, RecordBuilder, Sequence, Value, ValueKind};
