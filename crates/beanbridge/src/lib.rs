// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # beanbridge - property metadata and builders for immutable records
//!
//! Lets plain immutable structs take part in a bean-style reflection and
//! serialization engine: a property catalogue (name -> typed accessor), a
//! builder that reconstructs an instance from name -> value pairs, and an
//! adapter through which an engine discovers both without per-type code.
//!
//! ## Quick Start
//!
//! ```rust
//! use beanbridge::{FrameworkAdapter, Record};
//!
//! #[derive(Debug, Clone, PartialEq, Record)]
//! struct Reading {
//!     sensor: String,
//!     #[record(alias = "val")]
//!     value: f64,
//!     #[record(default)]
//!     retries: u32,
//! }
//!
//! let adapter = FrameworkAdapter::new();
//! let metadata = adapter.metadata_for::<Reading>();
//! assert!(metadata.has_property("value"));
//! assert!(!metadata.has_property("val"));
//! assert_eq!(metadata.property("val").unwrap().name(), "value");
//!
//! let mut builder = adapter.new_builder(&metadata);
//! builder.set("sensor", "t1").set("val", 21.5);
//! let reading: Reading = builder.build_as().unwrap();
//! assert_eq!(reading.retries, 0);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------------+
//! |            Serialization engine (e.g. json::JsonWriter)             |
//! +---------------------------------------------------------------------+
//! |   FrameworkAdapter: admission policy, builder discovery             |
//! +---------------------------------------------------------------------+
//! |   MetadataCache -> RecordMetadata -> PropertyDescriptor             |
//! |                    InstanceBuilder -> Arguments -> constructor      |
//! +---------------------------------------------------------------------+
//! |   RecordShape (static, emitted by #[derive(Record)])                |
//! +---------------------------------------------------------------------+
//! ```
//!
//! ## Features
//!
//! - `json` (default): compact JSON bean reader/writer in [`json`]
//! - `serde`: `Serialize`/`Deserialize` for [`config::BridgeConfig`]

// Lets `#[derive(Record)]` paths (`::beanbridge::...`) resolve inside this crate.
extern crate self as beanbridge;

pub mod adapter;
pub mod config;
pub mod convert;
pub mod error;
#[cfg(feature = "json")]
pub mod json;
pub mod meta;
pub mod types;
pub mod value;

pub use adapter::FrameworkAdapter;
pub use config::{AdmissionPolicy, BridgeConfig, UnknownPropertyPolicy};
pub use convert::{StandardConverter, StringConverter};
pub use error::{BeanError, Result};
pub use meta::{
    Arguments, FieldShape, Instance, InstanceBuilder, MetadataCache, PropertyDescriptor, Record,
    RecordMetadata, RecordShape,
};
pub use types::{Describe, PrimitiveKind, RawType, TypeDesc};
pub use value::{FromValue, RecordValue, ToValue, Value};

pub use beanbridge_codegen::Record; // Derive macro (for #[derive(beanbridge::Record)])
