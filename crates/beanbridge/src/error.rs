// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error taxonomy for the bean bridge.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BeanError>;

/// Errors raised by metadata lookup, property access and instance building.
///
/// Every error is returned to the immediate caller. Nothing is retried and
/// nothing is logged on the way out.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BeanError {
    /// Lookup by a name that is neither a property nor an alias.
    #[error("no property named '{name}' on {record}")]
    NoSuchProperty { record: String, name: String },

    /// Mutation attempted on a property of an immutable record.
    #[error("{operation} is not supported on property '{property}' of an immutable record")]
    UnsupportedOperation {
        operation: &'static str,
        property: String,
    },

    /// Required constructor parameters without a value at build time.
    #[error("cannot build {record}: missing required properties [{}]", .names.join(", "))]
    MissingRequiredProperty { record: String, names: Vec<String> },

    /// Instance of the wrong type, or a value that does not fit the field.
    #[error("reflection error: {0}")]
    Reflection(String),

    /// String could not be converted into the declared property type.
    #[error("cannot convert '{text}' to {target}: {reason}")]
    Conversion {
        target: String,
        text: String,
        reason: String,
    },

    /// Malformed or unexpected JSON in the compact bean format.
    #[cfg(feature = "json")]
    #[error("json error: {0}")]
    Json(String),
}

impl BeanError {
    pub(crate) fn no_such_property(record: &str, name: &str) -> Self {
        Self::NoSuchProperty {
            record: record.to_string(),
            name: name.to_string(),
        }
    }

    pub(crate) fn unsupported(operation: &'static str, property: &str) -> Self {
        Self::UnsupportedOperation {
            operation,
            property: property.to_string(),
        }
    }

    pub(crate) fn conversion(
        target: impl Into<String>,
        text: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Conversion {
            target: target.into(),
            text: text.into(),
            reason: reason.into(),
        }
    }
}
