// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Declared-type descriptors for record properties.

use crate::meta::RecordShape;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;

/// Scalar kinds a property can be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Char,
    String,
}

impl PrimitiveKind {
    /// Lower-case name used in messages and raw types.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Char => "char",
            Self::String => "string",
        }
    }

    /// Check if this is an integer kind.
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Self::I8 | Self::I16 | Self::I32 | Self::I64 | Self::U8 | Self::U16 | Self::U32 | Self::U64
        )
    }
}

/// Full declared type of a property, generic arguments included.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDesc {
    /// Scalar value.
    Primitive(PrimitiveKind),
    /// Ordered, possibly repeating elements (`Vec<T>`).
    Sequence(Box<TypeDesc>),
    /// Unique elements; `sorted` for `BTreeSet<T>`.
    Set { element: Box<TypeDesc>, sorted: bool },
    /// Key/value pairs; `sorted` for `BTreeMap<K, V>`.
    Map {
        key: Box<TypeDesc>,
        value: Box<TypeDesc>,
        sorted: bool,
    },
    /// `Option<T>`.
    Optional(Box<TypeDesc>),
    /// Another record type, resolved through its shape.
    Record(&'static RecordShape),
}

impl TypeDesc {
    /// Collapse to the outer carrier type, dropping generic arguments.
    ///
    /// `Vec<Foo>` becomes [`RawType::Sequence`], `BTreeMap<String, Foo>`
    /// becomes [`RawType::Map`].
    pub fn raw(&self) -> RawType {
        match self {
            Self::Primitive(kind) => RawType::Primitive(*kind),
            Self::Sequence(_) => RawType::Sequence,
            Self::Set { .. } => RawType::Set,
            Self::Map { .. } => RawType::Map,
            Self::Optional(_) => RawType::Optional,
            Self::Record(shape) => RawType::Record(shape.type_name),
        }
    }

    /// Check if this is a record type.
    pub fn is_record(&self) -> bool {
        matches!(self, Self::Record(_))
    }

    /// Get the record shape if this is a record type.
    pub fn record_shape(&self) -> Option<&'static RecordShape> {
        match self {
            Self::Record(shape) => Some(shape),
            _ => None,
        }
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(kind) => f.write_str(kind.name()),
            Self::Sequence(element) => write!(f, "sequence<{}>", element),
            Self::Set { element, .. } => write!(f, "set<{}>", element),
            Self::Map { key, value, .. } => write!(f, "map<{}, {}>", key, value),
            Self::Optional(inner) => write!(f, "optional<{}>", inner),
            Self::Record(shape) => f.write_str(shape.type_name),
        }
    }
}

/// Declared type with generic arguments erased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawType {
    Primitive(PrimitiveKind),
    Sequence,
    Set,
    Map,
    Optional,
    /// Record carrier, identified by its type path.
    Record(&'static str),
}

impl fmt::Display for RawType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(kind) => f.write_str(kind.name()),
            Self::Sequence => f.write_str("sequence"),
            Self::Set => f.write_str("set"),
            Self::Map => f.write_str("map"),
            Self::Optional => f.write_str("optional"),
            Self::Record(name) => f.write_str(name),
        }
    }
}

/// Types that can report their declared [`TypeDesc`].
///
/// Implemented here for scalars and std containers, and by
/// `#[derive(Record)]` for records.
pub trait Describe {
    fn type_desc() -> TypeDesc;
}

macro_rules! impl_describe_primitive {
    ($ty:ty, $kind:ident) => {
        impl Describe for $ty {
            fn type_desc() -> TypeDesc {
                TypeDesc::Primitive(PrimitiveKind::$kind)
            }
        }
    };
}

impl_describe_primitive!(bool, Bool);
impl_describe_primitive!(i8, I8);
impl_describe_primitive!(i16, I16);
impl_describe_primitive!(i32, I32);
impl_describe_primitive!(i64, I64);
impl_describe_primitive!(u8, U8);
impl_describe_primitive!(u16, U16);
impl_describe_primitive!(u32, U32);
impl_describe_primitive!(u64, U64);
impl_describe_primitive!(f32, F32);
impl_describe_primitive!(f64, F64);
impl_describe_primitive!(char, Char);
impl_describe_primitive!(String, String);

impl<T: Describe> Describe for Vec<T> {
    fn type_desc() -> TypeDesc {
        TypeDesc::Sequence(Box::new(T::type_desc()))
    }
}

impl<T: Describe> Describe for Option<T> {
    fn type_desc() -> TypeDesc {
        TypeDesc::Optional(Box::new(T::type_desc()))
    }
}

impl<T: Describe> Describe for BTreeSet<T> {
    fn type_desc() -> TypeDesc {
        TypeDesc::Set {
            element: Box::new(T::type_desc()),
            sorted: true,
        }
    }
}

impl<T: Describe, S> Describe for HashSet<T, S> {
    fn type_desc() -> TypeDesc {
        TypeDesc::Set {
            element: Box::new(T::type_desc()),
            sorted: false,
        }
    }
}

impl<K: Describe, V: Describe> Describe for BTreeMap<K, V> {
    fn type_desc() -> TypeDesc {
        TypeDesc::Map {
            key: Box::new(K::type_desc()),
            value: Box::new(V::type_desc()),
            sorted: true,
        }
    }
}

impl<K: Describe, V: Describe, S> Describe for HashMap<K, V, S> {
    fn type_desc() -> TypeDesc {
        TypeDesc::Map {
            key: Box::new(K::type_desc()),
            value: Box::new(V::type_desc()),
            sorted: false,
        }
    }
}
