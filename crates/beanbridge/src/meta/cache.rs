// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type metadata cache.
//!
//! Maps a record's `TypeId` to its computed [`RecordMetadata`]. Lookups are
//! lock-free reads on a `DashMap`; a miss computes metadata outside any lock
//! and inserts it only if no other thread got there first. Two threads racing
//! on the same type may both compute, and one result is dropped. Metadata is
//! a pure function of the static shape, so either copy is correct.

use crate::meta::{Record, RecordMetadata, RecordShape};
use dashmap::DashMap;
use std::any::TypeId;
use std::sync::Arc;

/// Memoized record metadata, owned by the host (usually through a
/// `FrameworkAdapter`).
#[derive(Debug, Default)]
pub struct MetadataCache {
    entries: DashMap<TypeId, Arc<RecordMetadata>>,
}

impl MetadataCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Metadata for a record type.
    pub fn get<T: Record>(&self) -> Arc<RecordMetadata> {
        self.get_or_compute(T::shape())
    }

    /// Metadata for a shape, computing and caching it on first use.
    pub fn get_or_compute(&self, shape: &'static RecordShape) -> Arc<RecordMetadata> {
        let key = shape.record_type_id();
        if let Some(entry) = self.entries.get(&key) {
            log::trace!("[MetadataCache] hit {}", shape.type_name);
            return Arc::clone(entry.value());
        }

        // Computed without holding a shard lock.
        let computed = Arc::new(RecordMetadata::from_shape(shape));
        log::debug!(
            "[MetadataCache] computed metadata for {} ({} properties)",
            shape.type_name,
            computed.property_count()
        );

        let entry = self.entries.entry(key).or_insert(computed);
        Arc::clone(entry.value())
    }

    /// Check whether metadata for a type is cached.
    pub fn contains(&self, type_id: &TypeId) -> bool {
        self.entries.contains_key(type_id)
    }

    /// Number of cached record types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every cached entry. Outstanding `Arc`s stay valid.
    pub fn clear(&self) {
        self.entries.clear();
    }
}
