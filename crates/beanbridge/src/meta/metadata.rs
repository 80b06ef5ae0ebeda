// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Record metadata: the property catalogue of one record type.

use crate::config::UnknownPropertyPolicy;
use crate::error::{BeanError, Result};
use crate::meta::{InstanceBuilder, PropertyDescriptor, RecordShape};
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

/// Property catalogue for a record type, with alias resolution.
///
/// Immutable once built; shared behind an `Arc` by every caller.
#[derive(Debug)]
pub struct RecordMetadata {
    shape: &'static RecordShape,
    properties: Vec<PropertyDescriptor>,
    by_name: HashMap<&'static str, usize>,
    aliases: HashMap<&'static str, &'static str>,
}

impl RecordMetadata {
    /// Compute metadata from a shape. Properties keep declaration order.
    pub fn from_shape(shape: &'static RecordShape) -> Self {
        let properties: Vec<_> = shape
            .fields
            .iter()
            .map(|field| PropertyDescriptor::new(shape.type_name, field))
            .collect();

        let by_name = properties
            .iter()
            .enumerate()
            .map(|(idx, p)| (p.name(), idx))
            .collect();

        let aliases = properties
            .iter()
            .filter_map(|p| p.alias().map(|alias| (alias, p.name())))
            .collect();

        Self {
            shape,
            properties,
            by_name,
            aliases,
        }
    }

    /// Static shape this metadata was computed from.
    pub fn shape(&self) -> &'static RecordShape {
        self.shape
    }

    /// Full type path of the record.
    pub fn type_name(&self) -> &'static str {
        self.shape.type_name
    }

    /// Bean name reported to engines; same as [`type_name`](Self::type_name).
    pub fn bean_name(&self) -> &'static str {
        self.shape.type_name
    }

    /// Identity of the record type.
    pub fn record_type_id(&self) -> TypeId {
        self.shape.record_type_id()
    }

    /// Records are always buildable through [`InstanceBuilder`].
    pub fn is_buildable(&self) -> bool {
        true
    }

    /// Number of properties.
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    /// Check a canonical property name. Aliases do not count.
    pub fn has_property(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Canonical name for a property name or alias.
    pub fn resolve_name(&self, name: &str) -> Option<&'static str> {
        if let Some(&idx) = self.by_name.get(name) {
            return Some(self.properties[idx].name());
        }
        self.aliases.get(name).copied()
    }

    /// Look up a property by name, falling back to aliases.
    pub fn property(&self, name: &str) -> Result<&PropertyDescriptor> {
        self.resolve_name(name)
            .and_then(|canonical| self.by_name.get(canonical))
            .map(|&idx| &self.properties[idx])
            .ok_or_else(|| BeanError::no_such_property(self.shape.type_name, name))
    }

    /// All properties in declaration order.
    pub fn properties(&self) -> impl ExactSizeIterator<Item = &PropertyDescriptor> {
        self.properties.iter()
    }

    /// Canonical property names in declaration order.
    pub fn property_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.properties.iter().map(PropertyDescriptor::name)
    }

    /// Properties without a constructor default.
    pub fn required_properties(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.properties.iter().filter(|p| p.is_required())
    }

    /// Create a builder bound to this metadata.
    pub fn new_builder(self: &Arc<Self>) -> InstanceBuilder {
        InstanceBuilder::new(Arc::clone(self), UnknownPropertyPolicy::default())
    }
}

impl PartialEq for RecordMetadata {
    fn eq(&self, other: &Self) -> bool {
        self.record_type_id() == other.record_type_id()
    }
}
