// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! String conversion strategy for string-based property population.

use crate::error::{BeanError, Result};
use crate::types::{PrimitiveKind, TypeDesc};
use crate::value::Value;
use std::str::FromStr;

/// Converts between strings and typed property values.
pub trait StringConverter: Send + Sync {
    /// Parse `text` into a value of the declared type.
    fn from_string(&self, target: &TypeDesc, text: &str) -> Result<Value>;

    /// Render a value as a string.
    fn to_string(&self, value: &Value) -> Result<String>;
}

/// Converter for scalar types using their `FromStr`/`Display` forms.
///
/// `Option<T>` parses the empty string as absent. Collections and records
/// have no string form.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardConverter;

fn parse<T>(kind: PrimitiveKind, text: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    text.parse::<T>()
        .map_err(|e| BeanError::conversion(kind.name(), text, e.to_string()))
}

impl StringConverter for StandardConverter {
    fn from_string(&self, target: &TypeDesc, text: &str) -> Result<Value> {
        match target {
            TypeDesc::Primitive(kind) => {
                let kind = *kind;
                Ok(match kind {
                    PrimitiveKind::Bool => Value::Bool(parse(kind, text)?),
                    PrimitiveKind::I8 => Value::I8(parse(kind, text)?),
                    PrimitiveKind::I16 => Value::I16(parse(kind, text)?),
                    PrimitiveKind::I32 => Value::I32(parse(kind, text)?),
                    PrimitiveKind::I64 => Value::I64(parse(kind, text)?),
                    PrimitiveKind::U8 => Value::U8(parse(kind, text)?),
                    PrimitiveKind::U16 => Value::U16(parse(kind, text)?),
                    PrimitiveKind::U32 => Value::U32(parse(kind, text)?),
                    PrimitiveKind::U64 => Value::U64(parse(kind, text)?),
                    PrimitiveKind::F32 => Value::F32(parse(kind, text)?),
                    PrimitiveKind::F64 => Value::F64(parse(kind, text)?),
                    PrimitiveKind::Char => Value::Char(parse(kind, text)?),
                    PrimitiveKind::String => Value::String(text.to_string()),
                })
            }
            TypeDesc::Optional(_) if text.is_empty() => Ok(Value::Null),
            TypeDesc::Optional(inner) => self.from_string(inner, text),
            other => Err(BeanError::conversion(
                other.to_string(),
                text,
                "no string form for this type",
            )),
        }
    }

    fn to_string(&self, value: &Value) -> Result<String> {
        Ok(match value {
            Value::Bool(v) => v.to_string(),
            Value::I8(v) => v.to_string(),
            Value::I16(v) => v.to_string(),
            Value::I32(v) => v.to_string(),
            Value::I64(v) => v.to_string(),
            Value::U8(v) => v.to_string(),
            Value::U16(v) => v.to_string(),
            Value::U32(v) => v.to_string(),
            Value::U64(v) => v.to_string(),
            Value::F32(v) => v.to_string(),
            Value::F64(v) => v.to_string(),
            Value::Char(v) => v.to_string(),
            Value::String(v) => v.clone(),
            other => {
                return Err(BeanError::conversion(
                    "string",
                    other.kind_name(),
                    "no string form for this value",
                ))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Describe;

    #[test]
    fn test_parse_scalars() {
        let conv = StandardConverter;
        assert_eq!(
            conv.from_string(&i32::type_desc(), "42").expect("i32"),
            Value::I32(42)
        );
        assert_eq!(
            conv.from_string(&f64::type_desc(), "2.5").expect("f64"),
            Value::F64(2.5)
        );
        assert_eq!(
            conv.from_string(&bool::type_desc(), "true").expect("bool"),
            Value::Bool(true)
        );
        assert_eq!(
            conv.from_string(&String::type_desc(), "abc").expect("string"),
            Value::String("abc".into())
        );
    }

    #[test]
    fn test_parse_failure_is_conversion_error() {
        let conv = StandardConverter;
        let err = conv
            .from_string(&u8::type_desc(), "256")
            .expect_err("out of range");
        assert!(matches!(err, BeanError::Conversion { .. }));
    }

    #[test]
    fn test_optional_empty_is_null() {
        let conv = StandardConverter;
        let desc = Option::<i64>::type_desc();
        assert_eq!(conv.from_string(&desc, "").expect("empty"), Value::Null);
        assert_eq!(conv.from_string(&desc, "7").expect("seven"), Value::I64(7));
    }

    #[test]
    fn test_collections_have_no_string_form() {
        let conv = StandardConverter;
        assert!(conv.from_string(&Vec::<i32>::type_desc(), "1,2").is_err());
        assert!(conv.to_string(&Value::Sequence(vec![])).is_err());
        assert_eq!(conv.to_string(&Value::U16(9)).expect("u16"), "9");
    }
}
