// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Dynamic property values.

use crate::error::{BeanError, Result};
use crate::meta::{Instance, Record, RecordShape};
use std::any::Any;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;

/// A value read from, or destined for, a record property.
#[derive(Debug, Clone)]
pub enum Value {
    // Primitives
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Char(char),
    String(String),

    // Composites
    Sequence(Vec<Value>),
    Set(Vec<Value>),
    Map(Vec<(Value, Value)>),
    Record(RecordValue),

    // Special
    Null,
}

impl Value {
    /// Check if value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short kind name for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::I8(_) => "i8",
            Self::I16(_) => "i16",
            Self::I32(_) => "i32",
            Self::I64(_) => "i64",
            Self::U8(_) => "u8",
            Self::U16(_) => "u16",
            Self::U32(_) => "u32",
            Self::U64(_) => "u64",
            Self::F32(_) => "f32",
            Self::F64(_) => "f64",
            Self::Char(_) => "char",
            Self::String(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Set(_) => "set",
            Self::Map(_) => "map",
            Self::Record(_) => "record",
            Self::Null => "null",
        }
    }

    /// Any integer variant widened to `i128`.
    pub fn as_integer(&self) -> Option<i128> {
        match self {
            Self::I8(v) => Some(i128::from(*v)),
            Self::I16(v) => Some(i128::from(*v)),
            Self::I32(v) => Some(i128::from(*v)),
            Self::I64(v) => Some(i128::from(*v)),
            Self::U8(v) => Some(i128::from(*v)),
            Self::U16(v) => Some(i128::from(*v)),
            Self::U32(v) => Some(i128::from(*v)),
            Self::U64(v) => Some(i128::from(*v)),
            _ => None,
        }
    }

    /// Try to get as string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get elements of a sequence or set.
    pub fn as_elements(&self) -> Option<&[Value]> {
        match self {
            Self::Sequence(v) | Self::Set(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get as record.
    pub fn as_record(&self) -> Option<&RecordValue> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }
}

/// Sets and maps compare without regard to element order.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::I8(a), Self::I8(b)) => a == b,
            (Self::I16(a), Self::I16(b)) => a == b,
            (Self::I32(a), Self::I32(b)) => a == b,
            (Self::I64(a), Self::I64(b)) => a == b,
            (Self::U8(a), Self::U8(b)) => a == b,
            (Self::U16(a), Self::U16(b)) => a == b,
            (Self::U32(a), Self::U32(b)) => a == b,
            (Self::U64(a), Self::U64(b)) => a == b,
            (Self::F32(a), Self::F32(b)) => a == b,
            (Self::F64(a), Self::F64(b)) => a == b,
            (Self::Char(a), Self::Char(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Sequence(a), Self::Sequence(b)) => a == b,
            (Self::Set(a), Self::Set(b)) => same_elements(a, b),
            (Self::Map(a), Self::Map(b)) => same_elements(a, b),
            (Self::Record(a), Self::Record(b)) => a == b,
            (Self::Null, Self::Null) => true,
            _ => false,
        }
    }
}

/// Multiset comparison: every element of `a` is matched by a distinct equal
/// element of `b`. Values have no order or hash, so this stays quadratic.
fn same_elements<T: PartialEq>(a: &[T], b: &[T]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut matched = vec![false; b.len()];
    a.iter().all(|item| {
        let slot = b
            .iter()
            .enumerate()
            .position(|(idx, other)| !matched[idx] && other == item);
        match slot {
            Some(idx) => {
                matched[idx] = true;
                true
            }
            None => false,
        }
    })
}

/// A type-erased record instance carried inside a [`Value`].
///
/// Nested records stay as real instances; encoders walk them through the
/// metadata of their own type.
#[derive(Clone)]
pub struct RecordValue {
    shape: &'static RecordShape,
    instance: Arc<dyn Any + Send + Sync>,
}

impl RecordValue {
    /// Wrap a concrete record.
    pub fn new<T: Record>(record: T) -> Self {
        Self {
            shape: T::shape(),
            instance: Arc::new(record),
        }
    }

    /// Wrap an instance produced by a builder.
    pub fn from_instance(shape: &'static RecordShape, instance: Instance) -> Result<Self> {
        if (*instance).type_id() != shape.record_type_id() {
            return Err(BeanError::Reflection(format!(
                "instance is not a {}",
                shape.type_name
            )));
        }
        Ok(Self {
            shape,
            instance: Arc::from(instance),
        })
    }

    /// Static shape of the wrapped record.
    pub fn shape(&self) -> &'static RecordShape {
        self.shape
    }

    /// Type path of the wrapped record.
    pub fn type_name(&self) -> &'static str {
        self.shape.type_name
    }

    /// Borrow the wrapped instance.
    pub fn instance(&self) -> &(dyn Any + Send + Sync) {
        &*self.instance
    }

    /// Downcast to the concrete record type.
    pub fn downcast_ref<T: Record>(&self) -> Option<&T> {
        self.instance.downcast_ref::<T>()
    }

    /// Read a single field by canonical name or alias.
    pub fn field(&self, name: &str) -> Option<Value> {
        let fields = self.shape.fields;
        let field = fields
            .iter()
            .find(|f| f.name == name)
            .or_else(|| fields.iter().find(|f| f.alias == Some(name)))?;
        (field.read)(self.instance())
    }

    /// Iterate over fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, Value)> + '_ {
        self.shape
            .fields
            .iter()
            .filter_map(move |f| (f.read)(self.instance()).map(|v| (f.name, v)))
    }

    /// Extract a concrete record from a value.
    pub fn extract<T: Record>(value: Value) -> Result<T> {
        match value {
            Value::Record(record) => record.downcast_ref::<T>().cloned().ok_or_else(|| {
                BeanError::Reflection(format!(
                    "expected {}, got {}",
                    T::shape().type_name,
                    record.type_name()
                ))
            }),
            other => Err(mismatch(T::shape().type_name, &other)),
        }
    }
}

impl PartialEq for RecordValue {
    fn eq(&self, other: &Self) -> bool {
        if self.shape.record_type_id() != other.shape.record_type_id() {
            return false;
        }
        self.shape
            .fields
            .iter()
            .all(|f| (f.read)(self.instance()) == (f.read)(other.instance()))
    }
}

impl fmt::Debug for RecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct(self.shape.type_name);
        for (name, value) in self.fields() {
            out.field(name, &value);
        }
        out.finish()
    }
}

fn mismatch(expected: &str, got: &Value) -> BeanError {
    BeanError::Reflection(format!(
        "type mismatch: expected {}, got {}",
        expected,
        got.kind_name()
    ))
}

/// Trait for reading a field into a [`Value`].
pub trait ToValue {
    fn to_value(&self) -> Value;
}

/// Trait for converting a [`Value`] back into a field.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self>;
}

macro_rules! impl_scalar {
    ($ty:ty, $variant:ident) => {
        impl ToValue for $ty {
            #[allow(clippy::clone_on_copy)]
            fn to_value(&self) -> Value {
                Value::$variant(self.clone())
            }
        }

        impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Self::$variant(v)
            }
        }
    };
}

impl_scalar!(bool, Bool);
impl_scalar!(i8, I8);
impl_scalar!(i16, I16);
impl_scalar!(i32, I32);
impl_scalar!(i64, I64);
impl_scalar!(u8, U8);
impl_scalar!(u16, U16);
impl_scalar!(u32, U32);
impl_scalar!(u64, U64);
impl_scalar!(f32, F32);
impl_scalar!(f64, F64);
impl_scalar!(char, Char);
impl_scalar!(String, String);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::Sequence(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

// Integers accept any integer variant whose value fits.
macro_rules! impl_from_integer {
    ($ty:ty, $name:expr) => {
        impl FromValue for $ty {
            fn from_value(value: Value) -> Result<Self> {
                let n = value.as_integer().ok_or_else(|| mismatch($name, &value))?;
                <$ty>::try_from(n).map_err(|_| {
                    BeanError::Reflection(format!("{} does not fit in {}", n, $name))
                })
            }
        }
    };
}

impl_from_integer!(i8, "i8");
impl_from_integer!(i16, "i16");
impl_from_integer!(i32, "i32");
impl_from_integer!(i64, "i64");
impl_from_integer!(u8, "u8");
impl_from_integer!(u16, "u16");
impl_from_integer!(u32, "u32");
impl_from_integer!(u64, "u64");

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Bool(v) => Ok(v),
            other => Err(mismatch("bool", &other)),
        }
    }
}

/// Narrow an `f64` to `f32`. Finite values outside the `f32` range are
/// rejected instead of becoming infinities; precision loss is accepted.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn narrow_f32(v: f64) -> Option<f32> {
    if v.is_finite() && v.abs() > f64::from(f32::MAX) {
        return None;
    }
    Some(v as f32)
}

impl FromValue for f32 {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::F32(v) => Ok(v),
            Value::F64(v) => narrow_f32(v)
                .ok_or_else(|| BeanError::Reflection(format!("{} does not fit in f32", v))),
            other => Err(mismatch("f32", &other)),
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::F64(v) => Ok(v),
            Value::F32(v) => Ok(f64::from(v)),
            other => Err(mismatch("f64", &other)),
        }
    }
}

impl FromValue for char {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Char(v) => Ok(v),
            other => Err(mismatch("char", &other)),
        }
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::String(v) => Ok(v),
            other => Err(mismatch("string", &other)),
        }
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, ToValue::to_value)
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        Value::Sequence(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Sequence(items) | Value::Set(items) => {
                items.into_iter().map(T::from_value).collect()
            }
            other => Err(mismatch("sequence", &other)),
        }
    }
}

impl<T: ToValue> ToValue for BTreeSet<T> {
    fn to_value(&self) -> Value {
        Value::Set(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: FromValue + Ord> FromValue for BTreeSet<T> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Set(items) | Value::Sequence(items) => {
                items.into_iter().map(T::from_value).collect()
            }
            other => Err(mismatch("set", &other)),
        }
    }
}

impl<T: ToValue, S> ToValue for HashSet<T, S> {
    fn to_value(&self) -> Value {
        Value::Set(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: FromValue + Eq + Hash, S: BuildHasher + Default> FromValue for HashSet<T, S> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Set(items) | Value::Sequence(items) => {
                items.into_iter().map(T::from_value).collect()
            }
            other => Err(mismatch("set", &other)),
        }
    }
}

impl<K: ToValue, V: ToValue> ToValue for BTreeMap<K, V> {
    fn to_value(&self) -> Value {
        Value::Map(
            self.iter()
                .map(|(k, v)| (k.to_value(), v.to_value()))
                .collect(),
        )
    }
}

impl<K: FromValue + Ord, V: FromValue> FromValue for BTreeMap<K, V> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Map(entries) => entries
                .into_iter()
                .map(|(k, v)| Ok::<_, BeanError>((K::from_value(k)?, V::from_value(v)?)))
                .collect(),
            other => Err(mismatch("map", &other)),
        }
    }
}

impl<K: ToValue, V: ToValue, S> ToValue for HashMap<K, V, S> {
    fn to_value(&self) -> Value {
        Value::Map(
            self.iter()
                .map(|(k, v)| (k.to_value(), v.to_value()))
                .collect(),
        )
    }
}

impl<K, V, S> FromValue for HashMap<K, V, S>
where
    K: FromValue + Eq + Hash,
    V: FromValue,
    S: BuildHasher + Default,
{
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Map(entries) => entries
                .into_iter()
                .map(|(k, v)| Ok::<_, BeanError>((K::from_value(k)?, V::from_value(v)?)))
                .collect(),
            other => Err(mismatch("map", &other)),
        }
    }
}
