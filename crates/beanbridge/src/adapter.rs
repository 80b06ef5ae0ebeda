// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Framework adapter: the entry point a serialization engine uses to
//! discover record metadata and builders.
//!
//! The adapter answers "is this a record I serve?" from the declared type
//! alone. A `TypeDesc::Record` can only be produced for types implementing
//! `Record`, so holding one is the capability check; the configured
//! [`AdmissionPolicy`] may narrow it further. Declining returns `None` so the
//! engine can fall back to its own handling.

use crate::config::BridgeConfig;
use crate::error::Result;
use crate::meta::{
    Instance, InstanceBuilder, MetadataCache, PropertyDescriptor, Record, RecordMetadata,
    RecordShape,
};
use crate::types::TypeDesc;
use crate::value::Value;
use std::sync::Arc;

/// Metadata and builder discovery for serialization engines.
///
/// Lookups only; caching is delegated to the owned [`MetadataCache`]. Safe to
/// share between threads.
#[derive(Debug, Default)]
pub struct FrameworkAdapter {
    cache: MetadataCache,
    config: BridgeConfig,
}

impl FrameworkAdapter {
    /// Create an adapter with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an adapter with the given configuration.
    pub fn with_config(config: BridgeConfig) -> Self {
        Self {
            cache: MetadataCache::new(),
            config,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Underlying metadata cache.
    pub fn cache(&self) -> &MetadataCache {
        &self.cache
    }

    /// Metadata for a declared type, or `None` if the bridge declines it.
    pub fn find_metadata(&self, candidate: &TypeDesc) -> Option<Arc<RecordMetadata>> {
        let shape = candidate.record_shape()?;
        self.find_metadata_for_shape(shape)
    }

    /// Metadata for a record shape, or `None` if the policy rejects it.
    pub fn find_metadata_for_shape(
        &self,
        shape: &'static RecordShape,
    ) -> Option<Arc<RecordMetadata>> {
        if !self.config.admission.admits(shape) {
            log::trace!("[FrameworkAdapter] declined {}", shape.type_name);
            return None;
        }
        Some(self.cache.get_or_compute(shape))
    }

    /// Metadata for a record type, bypassing the admission policy.
    pub fn metadata_for<T: Record>(&self) -> Arc<RecordMetadata> {
        self.cache.get::<T>()
    }

    /// New builder bound to `metadata`, using the configured unknown
    /// property policy.
    pub fn new_builder(&self, metadata: &Arc<RecordMetadata>) -> InstanceBuilder {
        log::debug!("[FrameworkAdapter] new builder for {}", metadata.type_name());
        InstanceBuilder::new(Arc::clone(metadata), self.config.unknown_properties)
    }

    /// Look up a property by wire name (aliases included).
    pub fn find_property<'m>(
        &self,
        metadata: &'m RecordMetadata,
        name: &str,
    ) -> Result<&'m PropertyDescriptor> {
        metadata.property(name)
    }

    /// Store a decoded value under a property.
    pub fn set_value(
        &self,
        builder: &mut InstanceBuilder,
        property: &PropertyDescriptor,
        value: Value,
    ) {
        builder.set(property.name(), value);
    }

    /// Finish a builder.
    pub fn build(&self, builder: InstanceBuilder) -> Result<Instance> {
        builder.build()
    }
}
