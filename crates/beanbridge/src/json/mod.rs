// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Compact JSON bean format.
//!
//! A minimal serialization engine that discovers records through the
//! [`FrameworkAdapter`](crate::FrameworkAdapter) only: it never names a
//! concrete record type except at the call site.
//!
//! # Format
//!
//! | Value              | JSON                                        |
//! |--------------------|---------------------------------------------|
//! | record             | object keyed by wire name (alias if any)    |
//! | sequence / set     | array                                       |
//! | map, string keys   | object                                      |
//! | map, other keys    | array of `[key, value]` pairs               |
//! | `None`             | `null`                                      |
//! | `char`             | one-character string                        |
//!
//! The root object may carry `"@bean": "<type path>"` when
//! [`BridgeConfig::emit_type_tag`](crate::BridgeConfig::emit_type_tag) is set.
//! Readers accept both map forms regardless of key type.
//!
//! # Example
//!
//! ```rust
//! use beanbridge::json::{JsonReader, JsonWriter};
//! use beanbridge::{FrameworkAdapter, Record};
//!
//! #[derive(Debug, Clone, PartialEq, Record)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! let adapter = FrameworkAdapter::new();
//! let text = JsonWriter::new(&adapter).write(&Point { x: 1, y: 2 }).unwrap();
//! let back: Point = JsonReader::new(&adapter).read(&text).unwrap();
//! assert_eq!(back, Point { x: 1, y: 2 });
//! ```

mod reader;
mod writer;

pub use reader::JsonReader;
pub use writer::JsonWriter;

/// Key of the optional root type tag.
pub const TYPE_TAG: &str = "@bean";

fn json_error(err: serde_json::Error) -> crate::BeanError {
    crate::BeanError::Json(err.to_string())
}
