// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! JSON encoding of records through the adapter.

use super::{json_error, TYPE_TAG};
use crate::adapter::FrameworkAdapter;
use crate::error::{BeanError, Result};
use crate::meta::{Record, RecordMetadata, RecordShape};
use crate::value::Value;
use serde_json::{Map, Number, Value as Json};
use std::any::Any;
use std::sync::Arc;

/// Encodes records as compact JSON.
#[derive(Debug, Clone, Copy)]
pub struct JsonWriter<'a> {
    adapter: &'a FrameworkAdapter,
}

impl<'a> JsonWriter<'a> {
    /// Create a writer that discovers records through `adapter`.
    pub fn new(adapter: &'a FrameworkAdapter) -> Self {
        Self { adapter }
    }

    /// Encode a record to a JSON string.
    pub fn write<T: Record>(&self, record: &T) -> Result<String> {
        let json = self.write_tree(record)?;
        serde_json::to_string(&json).map_err(json_error)
    }

    /// Encode a record to a pretty-printed JSON string.
    pub fn write_pretty<T: Record>(&self, record: &T) -> Result<String> {
        let json = self.write_tree(record)?;
        serde_json::to_string_pretty(&json).map_err(json_error)
    }

    /// Encode a record to a `serde_json::Value` tree.
    pub fn write_tree<T: Record>(&self, record: &T) -> Result<Json> {
        let metadata = self.metadata(T::shape())?;
        let mut object = self.encode_record(&metadata, record)?;
        if self.adapter.config().emit_type_tag {
            object.insert(
                TYPE_TAG.to_string(),
                Json::String(metadata.bean_name().to_string()),
            );
        }
        Ok(Json::Object(object))
    }

    /// Encode a single dynamic value.
    pub fn encode_value(&self, value: &Value) -> Result<Json> {
        Ok(match value {
            Value::Bool(v) => Json::Bool(*v),
            Value::I8(v) => Json::from(*v),
            Value::I16(v) => Json::from(*v),
            Value::I32(v) => Json::from(*v),
            Value::I64(v) => Json::from(*v),
            Value::U8(v) => Json::from(*v),
            Value::U16(v) => Json::from(*v),
            Value::U32(v) => Json::from(*v),
            Value::U64(v) => Json::from(*v),
            Value::F32(v) => float(f64::from(*v))?,
            Value::F64(v) => float(*v)?,
            Value::Char(v) => Json::String(v.to_string()),
            Value::String(v) => Json::String(v.clone()),
            Value::Sequence(items) | Value::Set(items) => Json::Array(
                items
                    .iter()
                    .map(|item| self.encode_value(item))
                    .collect::<Result<_>>()?,
            ),
            Value::Map(entries) => self.encode_map(entries)?,
            Value::Record(record) => {
                let metadata = self.metadata(record.shape())?;
                Json::Object(self.encode_record(&metadata, record.instance())?)
            }
            Value::Null => Json::Null,
        })
    }

    fn metadata(&self, shape: &'static RecordShape) -> Result<Arc<RecordMetadata>> {
        self.adapter.find_metadata_for_shape(shape).ok_or_else(|| {
            BeanError::Json(format!("{} is not served by the bridge", shape.type_name))
        })
    }

    fn encode_record(
        &self,
        metadata: &RecordMetadata,
        instance: &dyn Any,
    ) -> Result<Map<String, Json>> {
        let mut object = Map::new();
        for property in metadata.properties() {
            let value = property.read(instance)?;
            object.insert(property.wire_name().to_string(), self.encode_value(&value)?);
        }
        Ok(object)
    }

    fn encode_map(&self, entries: &[(Value, Value)]) -> Result<Json> {
        if entries.iter().all(|(key, _)| matches!(key, Value::String(_))) {
            let mut object = Map::new();
            for (key, value) in entries {
                if let Value::String(key) = key {
                    object.insert(key.clone(), self.encode_value(value)?);
                }
            }
            return Ok(Json::Object(object));
        }

        entries
            .iter()
            .map(|(key, value)| {
                Ok(Json::Array(vec![
                    self.encode_value(key)?,
                    self.encode_value(value)?,
                ]))
            })
            .collect::<Result<Vec<_>>>()
            .map(Json::Array)
    }
}

fn float(v: f64) -> Result<Json> {
    Number::from_f64(v)
        .map(Json::Number)
        .ok_or_else(|| BeanError::Json(format!("cannot encode non-finite float {}", v)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AdmissionPolicy, BridgeConfig};
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, crate::Record)]
    struct Sample {
        #[record(alias = "n")]
        count: u32,
        ratio: f64,
        initial: char,
        note: Option<String>,
    }

    fn sample() -> Sample {
        Sample {
            count: 3,
            ratio: 0.5,
            initial: 'q',
            note: None,
        }
    }

    #[test]
    fn test_write_uses_wire_names() {
        let adapter = FrameworkAdapter::new();
        let tree = JsonWriter::new(&adapter).write_tree(&sample()).expect("encode");
        assert_eq!(
            tree,
            json!({"n": 3, "ratio": 0.5, "initial": "q", "note": null})
        );
    }

    #[test]
    fn test_type_tag() {
        let adapter = FrameworkAdapter::with_config(BridgeConfig::new().emit_type_tag(true));
        let tree = JsonWriter::new(&adapter).write_tree(&sample()).expect("encode");
        assert_eq!(tree[TYPE_TAG], json!(<Sample as Record>::shape().type_name));
    }

    #[test]
    fn test_non_finite_float_rejected() {
        let adapter = FrameworkAdapter::new();
        let mut value = sample();
        value.ratio = f64::NAN;
        let err = JsonWriter::new(&adapter).write(&value).expect_err("nan");
        assert!(matches!(err, BeanError::Json(_)));
    }

    #[test]
    fn test_map_forms() {
        let adapter = FrameworkAdapter::new();
        let writer = JsonWriter::new(&adapter);

        let by_string = Value::Map(vec![(Value::from("a"), Value::I32(1))]);
        assert_eq!(writer.encode_value(&by_string).expect("encode"), json!({"a": 1}));

        let by_int = Value::Map(vec![(Value::I32(7), Value::from("seven"))]);
        assert_eq!(
            writer.encode_value(&by_int).expect("encode"),
            json!([[7, "seven"]])
        );
    }

    #[test]
    fn test_declined_record() {
        let config =
            BridgeConfig::new().admission(AdmissionPolicy::module_prefixes(["elsewhere::"]));
        let adapter = FrameworkAdapter::with_config(config);
        let err = JsonWriter::new(&adapter).write(&sample()).expect_err("declined");
        assert!(matches!(err, BeanError::Json(_)));
    }
}
