// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Static record shapes.
//!
//! A shape is the compile-time description of a record type that
//! `#[derive(Record)]` emits: field names in declaration order, aliases,
//! declared types, required/defaulted flags, one reader per field and the
//! canonical constructor. Everything else in the bridge is computed from it.

use crate::error::Result;
use crate::meta::Arguments;
use crate::types::TypeDesc;
use crate::value::Value;
use std::any::{Any, TypeId};
use std::fmt;

/// A record instance with its concrete type erased.
pub type Instance = Box<dyn Any + Send + Sync>;

/// Capability implemented by every record type taking part in the bridge.
///
/// Use `#[derive(Record)]`; implementing it by hand means keeping the shape's
/// field order identical to the constructor's.
pub trait Record: Any + Send + Sync + Clone {
    /// Static shape of this record type.
    fn shape() -> &'static RecordShape;
}

/// Compile-time description of one field.
pub struct FieldShape {
    /// Canonical field name.
    pub name: &'static str,
    /// Alternate wire name.
    pub alias: Option<&'static str>,
    /// Declared type (computed on demand for generic containers).
    pub type_desc: fn() -> TypeDesc,
    /// No default: construction fails when absent.
    pub required: bool,
    /// Reads the field; `None` if the instance is not of the owning type.
    pub read: fn(&dyn Any) -> Option<Value>,
}

impl fmt::Debug for FieldShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldShape")
            .field("name", &self.name)
            .field("alias", &self.alias)
            .field("required", &self.required)
            .finish_non_exhaustive()
    }
}

/// Compile-time description of a record type.
pub struct RecordShape {
    /// Full type path (`module::Name`).
    pub type_name: &'static str,
    /// Identity of the record type.
    pub type_id: fn() -> TypeId,
    /// Fields in declaration order, which is also constructor order.
    pub fields: &'static [FieldShape],
    /// Canonical constructor.
    pub construct: fn(&mut Arguments) -> Result<Instance>,
}

impl RecordShape {
    /// Identity of the described type.
    pub fn record_type_id(&self) -> TypeId {
        (self.type_id)()
    }

    /// Last path segment of the type name.
    pub fn simple_name(&self) -> &'static str {
        self.type_name
            .rsplit("::")
            .next()
            .unwrap_or(self.type_name)
    }

    /// Get field by canonical name.
    pub fn field(&self, name: &str) -> Option<&'static FieldShape> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl PartialEq for RecordShape {
    fn eq(&self, other: &Self) -> bool {
        self.record_type_id() == other.record_type_id()
    }
}

impl fmt::Debug for RecordShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordShape")
            .field("type_name", &self.type_name)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}
