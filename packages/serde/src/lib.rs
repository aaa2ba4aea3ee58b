//! JSON output for structmap.
//!
//! The mapper produces `Mapped` trees meant for text encoders. This crate
//! turns them into `serde_json` values and text:
//! - `to_json` / `value_to_json`: infallible conversion to `serde_json::Value`
//! - `to_json_string` / `to_json_string_pretty`: encoding through `Serialize`
//! - `map_to_json`: map a typed value and convert the result in one call
//! - `json_to_value`: feed parsed JSON back into a mapper
//!
//! # Example
//!
//! ```rust
//! use structmap_core::Mapper;
//! use structmap_serde::{json_to_value, to_json};
//!
//! let input = json_to_value(serde_json::json!({"id": 1, "secret": "x"}));
//! let mapper = Mapper::builder()
//!     .filter(|_, element| Ok(element.name() != "secret"))
//!     .build();
//!
//! let mapped = mapper.map_any(&input).unwrap();
//! assert_eq!(to_json(&mapped), serde_json::json!({"id": 1}));
//! ```

mod convert;
mod error;

pub use convert::{
    json_to_value, map_to_json, to_json, to_json_string, to_json_string_pretty, value_to_json,
};
pub use error::Error;

// Re-export core types for convenience
pub use structmap_core::{Mapped, Mapper, Value};
