// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Property descriptors: read-only accessors for one record field.

use crate::convert::StringConverter;
use crate::error::{BeanError, Result};
use crate::meta::FieldShape;
use crate::types::{RawType, TypeDesc};
use crate::value::Value;
use std::any::Any;

/// Read-only accessor and metadata for one field of a record type.
#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
    record: &'static str,
    field: &'static FieldShape,
    declared: TypeDesc,
}

impl PropertyDescriptor {
    pub(crate) fn new(record: &'static str, field: &'static FieldShape) -> Self {
        Self {
            record,
            field,
            declared: (field.type_desc)(),
        }
    }

    /// Canonical property name.
    pub fn name(&self) -> &'static str {
        self.field.name
    }

    /// Alternate wire name, if declared.
    pub fn alias(&self) -> Option<&'static str> {
        self.field.alias
    }

    /// Name an encoder emits: the alias if present, else the name.
    pub fn wire_name(&self) -> &'static str {
        self.field.alias.unwrap_or(self.field.name)
    }

    /// Type path of the owning record.
    pub fn declaring_type(&self) -> &'static str {
        self.record
    }

    /// Full declared type, generic arguments included.
    pub fn declared_type(&self) -> &TypeDesc {
        &self.declared
    }

    /// Declared type collapsed to its outer carrier.
    pub fn raw_type(&self) -> RawType {
        self.declared.raw()
    }

    /// Whether the constructor has no default for this property.
    pub fn is_required(&self) -> bool {
        self.field.required
    }

    /// Read the property from an instance of the owning type.
    pub fn read(&self, instance: &dyn Any) -> Result<Value> {
        (self.field.read)(instance).ok_or_else(|| {
            BeanError::Reflection(format!(
                "cannot read '{}': instance is not a {}",
                self.field.name, self.record
            ))
        })
    }

    /// Read the property and render it with the given converter.
    pub fn read_string(&self, instance: &dyn Any, converter: &dyn StringConverter) -> Result<String> {
        let value = self.read(instance)?;
        converter.to_string(&value)
    }

    // Unsupported mutators -------------------------------------------------

    /// Always fails: records are immutable.
    pub fn write(&self, _instance: &dyn Any, _value: Value) -> Result<()> {
        Err(BeanError::unsupported("write", self.field.name))
    }

    /// Always fails: records are immutable.
    pub fn write_from_string(
        &self,
        _instance: &dyn Any,
        _text: &str,
        _converter: &dyn StringConverter,
    ) -> Result<()> {
        Err(BeanError::unsupported("write_from_string", self.field.name))
    }

    /// Always fails: records are immutable.
    pub fn put(&self, _instance: &dyn Any, _value: Value) -> Result<Value> {
        Err(BeanError::unsupported("put", self.field.name))
    }
}
