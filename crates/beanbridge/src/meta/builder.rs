// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Instance builder: accumulates property values and invokes the canonical
//! constructor.

use crate::config::UnknownPropertyPolicy;
use crate::convert::StringConverter;
use crate::error::{BeanError, Result};
use crate::meta::{Instance, Record, RecordMetadata};
use crate::value::{FromValue, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Single-use accumulator that reconstructs a record from property values.
///
/// `build` consumes the builder. Names are resolved through aliases when
/// set; names matching no property are kept and handled at build time
/// according to the [`UnknownPropertyPolicy`].
#[derive(Debug)]
pub struct InstanceBuilder {
    metadata: Arc<RecordMetadata>,
    values: HashMap<String, Value>,
    unknown: UnknownPropertyPolicy,
}

impl InstanceBuilder {
    /// Create a builder for the given metadata.
    pub fn new(metadata: Arc<RecordMetadata>, unknown: UnknownPropertyPolicy) -> Self {
        Self {
            metadata,
            values: HashMap::new(),
            unknown,
        }
    }

    /// Metadata this builder is bound to.
    pub fn metadata(&self) -> &Arc<RecordMetadata> {
        &self.metadata
    }

    /// Set a property value, resolving aliases to canonical names.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> &mut Self {
        let key = self.metadata.resolve_name(name).unwrap_or(name);
        self.values.insert(key.to_string(), value.into());
        self
    }

    /// Convert `text` into the declared type of the property, then set it.
    pub fn set_string(
        &mut self,
        name: &str,
        text: &str,
        converter: &dyn StringConverter,
    ) -> Result<&mut Self> {
        let property = self.metadata.property(name)?;
        let value = converter.from_string(property.declared_type(), text)?;
        let key = property.name();
        self.values.insert(key.to_string(), value);
        Ok(self)
    }

    /// Set every pair from an iterator.
    pub fn set_all<I, K, V>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        for (name, value) in values {
            self.set(name.as_ref(), value);
        }
        self
    }

    /// Pending value for a name or alias.
    pub fn get(&self, name: &str) -> Option<&Value> {
        let key = self.metadata.resolve_name(name).unwrap_or(name);
        self.values.get(key)
    }

    /// Whether a value is pending for a name or alias.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Construct the instance.
    ///
    /// Every required property must have a value; all missing ones are
    /// reported together. Defaulted properties absent from the builder take
    /// their declared default.
    pub fn build(self) -> Result<Instance> {
        let record = self.metadata.type_name();

        let missing: Vec<String> = self
            .metadata
            .required_properties()
            .filter(|p| !self.values.contains_key(p.name()))
            .map(|p| p.name().to_string())
            .collect();
        if !missing.is_empty() {
            return Err(BeanError::MissingRequiredProperty {
                record: record.to_string(),
                names: missing,
            });
        }

        let mut unknown: Vec<&str> = self
            .values
            .keys()
            .map(String::as_str)
            .filter(|name| !self.metadata.has_property(name))
            .collect();
        if !unknown.is_empty() {
            unknown.sort_unstable();
            match self.unknown {
                UnknownPropertyPolicy::Ignore => {
                    log::debug!("[InstanceBuilder] {}: ignoring unknown {:?}", record, unknown);
                }
                UnknownPropertyPolicy::Reject => {
                    return Err(BeanError::no_such_property(record, unknown[0]));
                }
            }
        }

        let mut args = Arguments::new(record, self.values);
        (self.metadata.shape().construct)(&mut args)
    }

    /// Construct and downcast to the concrete record type.
    pub fn build_as<T: Record>(self) -> Result<T> {
        let record = self.metadata.type_name();
        let instance = self.build()?;
        instance
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| {
                BeanError::Reflection(format!(
                    "builder for {} cannot produce {}",
                    record,
                    T::shape().type_name
                ))
            })
    }
}

/// Constructor arguments handed to a record's canonical constructor.
///
/// Each parameter is taken by canonical name; values left over after
/// construction are dropped.
#[derive(Debug)]
pub struct Arguments {
    record: &'static str,
    values: HashMap<String, Value>,
}

impl Arguments {
    pub(crate) fn new(record: &'static str, values: HashMap<String, Value>) -> Self {
        Self { record, values }
    }

    /// Take a required parameter.
    pub fn take<T: FromValue>(&mut self, name: &str) -> Result<T> {
        match self.values.remove(name) {
            Some(value) => self.convert(name, value),
            None => Err(BeanError::MissingRequiredProperty {
                record: self.record.to_string(),
                names: vec![name.to_string()],
            }),
        }
    }

    /// Take a parameter, falling back to `default` when absent.
    pub fn take_or_else<T: FromValue, F: FnOnce() -> T>(
        &mut self,
        name: &str,
        default: F,
    ) -> Result<T> {
        match self.values.remove(name) {
            Some(value) => self.convert(name, value),
            None => Ok(default()),
        }
    }

    /// Names not consumed by the constructor so far.
    pub fn remaining(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    fn convert<T: FromValue>(&self, name: &str, value: Value) -> Result<T> {
        T::from_value(value).map_err(|err| match err {
            BeanError::Reflection(msg) => {
                BeanError::Reflection(format!("{}.{}: {}", self.record, name, msg))
            }
            other => other,
        })
    }
}
