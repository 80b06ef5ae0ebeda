// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Bridge configuration.
//!
//! # Example
//!
//! ```rust
//! use beanbridge::config::{AdmissionPolicy, BridgeConfig, UnknownPropertyPolicy};
//!
//! let config = BridgeConfig::new()
//!     .admission(AdmissionPolicy::module_prefixes(["app::model"]))
//!     .unknown_properties(UnknownPropertyPolicy::Reject)
//!     .emit_type_tag(true);
//! assert!(config.emit_type_tag);
//! ```

use crate::meta::RecordShape;

/// Decides which record types the adapter serves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AdmissionPolicy {
    /// Every type implementing `Record`.
    #[default]
    Capability,
    /// Only records whose type path starts with one of the prefixes.
    ModulePrefixes(Vec<String>),
}

impl AdmissionPolicy {
    /// Build a prefix policy.
    pub fn module_prefixes<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::ModulePrefixes(prefixes.into_iter().map(Into::into).collect())
    }

    /// Whether a record type is served by the bridge.
    pub fn admits(&self, shape: &RecordShape) -> bool {
        match self {
            Self::Capability => true,
            Self::ModulePrefixes(prefixes) => prefixes
                .iter()
                .any(|prefix| shape.type_name.starts_with(prefix.as_str())),
        }
    }
}

/// What `build` does with values set under names matching no property.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UnknownPropertyPolicy {
    /// Drop them silently.
    #[default]
    Ignore,
    /// Fail with `NoSuchProperty`.
    Reject,
}

/// Bridge configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BridgeConfig {
    /// Which record types the adapter serves.
    pub admission: AdmissionPolicy,

    /// Handling of unknown property names at build time.
    pub unknown_properties: UnknownPropertyPolicy,

    /// JSON writer emits `"@bean": "<type path>"` on the root object.
    pub emit_type_tag: bool,
}

impl BridgeConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set admission policy.
    pub fn admission(mut self, policy: AdmissionPolicy) -> Self {
        self.admission = policy;
        self
    }

    /// Set unknown property policy.
    pub fn unknown_properties(mut self, policy: UnknownPropertyPolicy) -> Self {
        self.unknown_properties = policy;
        self
    }

    /// Enable or disable the root type tag.
    pub fn emit_type_tag(mut self, enabled: bool) -> Self {
        self.emit_type_tag = enabled;
        self
    }

    /// Parse a config from JSON. Missing keys take their defaults.
    #[cfg(feature = "json")]
    pub fn from_json(text: &str) -> crate::Result<Self> {
        serde_json::from_str(text).map_err(|e| crate::BeanError::Json(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BridgeConfig::new();
        assert_eq!(config.admission, AdmissionPolicy::Capability);
        assert_eq!(config.unknown_properties, UnknownPropertyPolicy::Ignore);
        assert!(!config.emit_type_tag);
    }

    #[test]
    #[cfg(feature = "json")]
    fn test_from_json() {
        let config = BridgeConfig::from_json(
            r#"{"admission": {"module_prefixes": ["app::"]}, "unknown_properties": "reject"}"#,
        )
        .expect("parse config");
        assert_eq!(
            config.admission,
            AdmissionPolicy::ModulePrefixes(vec!["app::".into()])
        );
        assert_eq!(config.unknown_properties, UnknownPropertyPolicy::Reject);
        assert!(!config.emit_type_tag);

        assert!(BridgeConfig::from_json(r#"{"admission": "nope"}"#).is_err());
    }
}
