// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Record introspection and construction.
//!
//! # Features
//!
//! - **RecordShape**: compile-time field list emitted by `#[derive(Record)]`
//! - **RecordMetadata**: property catalogue with alias resolution
//! - **PropertyDescriptor**: read-only typed accessor for one field
//! - **InstanceBuilder**: name -> value accumulator invoking the constructor
//! - **MetadataCache**: memoized metadata keyed by `TypeId`
//!
//! # Example
//!
//! ```rust
//! use beanbridge::{MetadataCache, Record};
//!
//! #[derive(Debug, Clone, PartialEq, Record)]
//! struct Foo {
//!     bar: i32,
//!     baz: String,
//! }
//!
//! let cache = MetadataCache::new();
//! let metadata = cache.get::<Foo>();
//!
//! let mut builder = metadata.new_builder();
//! builder.set("bar", 42).set("baz", "abc");
//! let foo: Foo = builder.build_as().unwrap();
//! assert_eq!(foo, Foo { bar: 42, baz: "abc".into() });
//!
//! let bar = metadata.property("bar").unwrap().read(&foo).unwrap();
//! assert_eq!(bar, beanbridge::Value::I32(42));
//! ```

mod builder;
mod cache;
mod metadata;
mod property;
mod shape;

pub use builder::{Arguments, InstanceBuilder};
pub use cache::MetadataCache;
pub use metadata::RecordMetadata;
pub use property::PropertyDescriptor;
pub use shape::{FieldShape, Instance, Record, RecordShape};
