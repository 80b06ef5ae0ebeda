// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! JSON decoding of records through the adapter.
//!
//! Decoding is driven by the declared type of each property, so integer
//! widths, sets and nested records come back exactly as declared.

use super::{json_error, TYPE_TAG};
use crate::adapter::FrameworkAdapter;
use crate::convert::{StandardConverter, StringConverter};
use crate::error::{BeanError, Result};
use crate::meta::{Instance, Record, RecordShape};
use crate::types::{PrimitiveKind, TypeDesc};
use crate::value::{narrow_f32, RecordValue, Value};
use serde_json::{Map, Value as Json};

/// Decodes records from compact JSON.
#[derive(Debug, Clone, Copy)]
pub struct JsonReader<'a> {
    adapter: &'a FrameworkAdapter,
}

impl<'a> JsonReader<'a> {
    /// Create a reader that discovers records through `adapter`.
    pub fn new(adapter: &'a FrameworkAdapter) -> Self {
        Self { adapter }
    }

    /// Decode a record from a JSON string.
    pub fn read<T: Record>(&self, text: &str) -> Result<T> {
        let json: Json = serde_json::from_str(text).map_err(json_error)?;
        self.read_tree(json)
    }

    /// Decode a record from a `serde_json::Value` tree.
    pub fn read_tree<T: Record>(&self, json: Json) -> Result<T> {
        let shape = T::shape();
        let instance = self.decode_record(shape, json, true)?;
        instance.downcast::<T>().map(|boxed| *boxed).map_err(|_| {
            BeanError::Reflection(format!("decoded value is not a {}", shape.type_name))
        })
    }

    /// Decode a JSON value against a declared type.
    pub fn decode_value(&self, declared: &TypeDesc, json: Json) -> Result<Value> {
        match (declared, json) {
            (TypeDesc::Optional(_), Json::Null) => Ok(Value::Null),
            (TypeDesc::Optional(inner), json) => self.decode_value(inner, json),
            (TypeDesc::Primitive(kind), json) => decode_primitive(*kind, json),
            (TypeDesc::Sequence(element), Json::Array(items)) => {
                Ok(Value::Sequence(self.decode_elements(element, items)?))
            }
            (TypeDesc::Set { element, .. }, Json::Array(items)) => {
                Ok(Value::Set(self.decode_elements(element, items)?))
            }
            (TypeDesc::Map { key, value, .. }, Json::Object(object)) => {
                self.decode_object_map(key, value, object)
            }
            (TypeDesc::Map { key, value, .. }, Json::Array(pairs)) => {
                self.decode_pair_map(key, value, pairs)
            }
            (TypeDesc::Record(shape), json) => {
                let shape: &'static RecordShape = *shape;
                let instance = self.decode_record(shape, json, false)?;
                Ok(Value::Record(RecordValue::from_instance(shape, instance)?))
            }
            (declared, json) => Err(unexpected(declared, &json)),
        }
    }

    /// Decode one record object. Only the root object may carry the type tag.
    fn decode_record(
        &self,
        shape: &'static RecordShape,
        json: Json,
        root: bool,
    ) -> Result<Instance> {
        let metadata = self.adapter.find_metadata_for_shape(shape).ok_or_else(|| {
            BeanError::Json(format!("{} is not served by the bridge", shape.type_name))
        })?;
        let object = match json {
            Json::Object(object) => object,
            other => return Err(unexpected(&TypeDesc::Record(shape), &other)),
        };

        let mut builder = self.adapter.new_builder(&metadata);
        for (key, json) in object {
            if root && key == TYPE_TAG {
                check_type_tag(shape, &json)?;
                continue;
            }
            match self.adapter.find_property(&metadata, &key) {
                Ok(property) => {
                    let value = self.decode_value(property.declared_type(), json)?;
                    self.adapter.set_value(&mut builder, property, value);
                }
                // The builder's unknown property policy decides.
                Err(BeanError::NoSuchProperty { .. }) => {
                    builder.set(&key, untyped(json));
                }
                Err(other) => return Err(other),
            }
        }
        self.adapter.build(builder)
    }

    fn decode_elements(&self, element: &TypeDesc, items: Vec<Json>) -> Result<Vec<Value>> {
        items
            .into_iter()
            .map(|item| self.decode_value(element, item))
            .collect()
    }

    fn decode_object_map(
        &self,
        key: &TypeDesc,
        value: &TypeDesc,
        object: Map<String, Json>,
    ) -> Result<Value> {
        let mut entries = Vec::with_capacity(object.len());
        for (name, json) in object {
            let key = match key {
                TypeDesc::Primitive(PrimitiveKind::String) => Value::String(name),
                other => StandardConverter
                    .from_string(other, &name)
                    .map_err(|e| BeanError::Json(format!("map key: {}", e)))?,
            };
            entries.push((key, self.decode_value(value, json)?));
        }
        Ok(Value::Map(entries))
    }

    fn decode_pair_map(
        &self,
        key: &TypeDesc,
        value: &TypeDesc,
        pairs: Vec<Json>,
    ) -> Result<Value> {
        let mut entries = Vec::with_capacity(pairs.len());
        for pair in pairs {
            let (k, v) = match pair {
                Json::Array(mut items) if items.len() == 2 => {
                    let v = items.pop().unwrap_or(Json::Null);
                    let k = items.pop().unwrap_or(Json::Null);
                    (k, v)
                }
                other => {
                    return Err(BeanError::Json(format!(
                        "expected [key, value] pair, found {}",
                        other
                    )))
                }
            };
            entries.push((self.decode_value(key, k)?, self.decode_value(value, v)?));
        }
        Ok(Value::Map(entries))
    }
}

fn check_type_tag(shape: &RecordShape, json: &Json) -> Result<()> {
    match json.as_str() {
        Some(tag) if tag == shape.type_name => Ok(()),
        _ => Err(BeanError::Json(format!(
            "type tag {} does not match {}",
            json, shape.type_name
        ))),
    }
}

fn decode_primitive(kind: PrimitiveKind, json: Json) -> Result<Value> {
    let declared = TypeDesc::Primitive(kind);
    let value = match (kind, &json) {
        (PrimitiveKind::Bool, Json::Bool(v)) => Some(Value::Bool(*v)),
        (PrimitiveKind::String, Json::String(v)) => Some(Value::String(v.clone())),
        (PrimitiveKind::Char, Json::String(v)) => {
            let mut chars = v.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(Value::Char(c)),
                _ => None,
            }
        }
        (PrimitiveKind::F32, Json::Number(n)) => n.as_f64().and_then(narrow_f32).map(Value::F32),
        (PrimitiveKind::F64, Json::Number(n)) => n.as_f64().map(Value::F64),
        (kind, Json::Number(n)) if kind.is_integer() => {
            let wide = n
                .as_i64()
                .map(i128::from)
                .or_else(|| n.as_u64().map(i128::from));
            wide.and_then(|wide| integer(kind, wide))
        }
        _ => None,
    };
    value.ok_or_else(|| unexpected(&declared, &json))
}

fn integer(kind: PrimitiveKind, wide: i128) -> Option<Value> {
    match kind {
        PrimitiveKind::I8 => i8::try_from(wide).ok().map(Value::I8),
        PrimitiveKind::I16 => i16::try_from(wide).ok().map(Value::I16),
        PrimitiveKind::I32 => i32::try_from(wide).ok().map(Value::I32),
        PrimitiveKind::I64 => i64::try_from(wide).ok().map(Value::I64),
        PrimitiveKind::U8 => u8::try_from(wide).ok().map(Value::U8),
        PrimitiveKind::U16 => u16::try_from(wide).ok().map(Value::U16),
        PrimitiveKind::U32 => u32::try_from(wide).ok().map(Value::U32),
        PrimitiveKind::U64 => u64::try_from(wide).ok().map(Value::U64),
        _ => None,
    }
}

/// Best-effort value for a key matching no property.
fn untyped(json: Json) -> Value {
    match json {
        Json::Null => Value::Null,
        Json::Bool(v) => Value::Bool(v),
        Json::Number(n) => n
            .as_i64()
            .map(Value::I64)
            .or_else(|| n.as_u64().map(Value::U64))
            .or_else(|| n.as_f64().map(Value::F64))
            .unwrap_or(Value::Null),
        Json::String(v) => Value::String(v),
        Json::Array(items) => Value::Sequence(items.into_iter().map(untyped).collect()),
        Json::Object(object) => Value::Map(
            object
                .into_iter()
                .map(|(k, v)| (Value::String(k), untyped(v)))
                .collect(),
        ),
    }
}

fn unexpected(declared: &TypeDesc, json: &Json) -> BeanError {
    let found = match json {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    };
    BeanError::Json(format!("expected {}, found {}", declared, found))
}
