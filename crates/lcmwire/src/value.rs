// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Dynamic field values.

use crate::config::STRING_LENGTH_SIZE;
use crate::error::SchemaError;
use crate::fingerprint::Visiting;
use crate::message::MessageInstance;
use crate::schema::{ArrayLen, FieldKind, PrimitiveKind};

/// Value of one field of a [`MessageInstance`].
///
/// `Clone` is a deep copy (see [`crate::copy`]). Floats compare by bit
/// pattern, so equality agrees with the encoded bytes: `NaN == NaN` with the
/// same payload, `0.0 != -0.0`.
#[derive(Debug)]
pub enum Value {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Bool(bool),
    Byte(u8),
    String(String),
    Array(Vec<Value>),
    Message(MessageInstance),
}

impl Value {
    /// Zero value for `kind`: numbers 0, `false`, empty string, fixed arrays
    /// of N defaults, empty variable arrays, default nested messages.
    ///
    /// Fails with [`SchemaError::RecursiveDefault`] when a nested schema
    /// embeds itself by value (not through a variable array).
    pub fn default_for(kind: &FieldKind) -> Result<Self, SchemaError> {
        Self::default_in(kind, None)
    }

    /// `parents` holds the schemas whose defaults are being built.
    pub(crate) fn default_in(
        kind: &FieldKind,
        parents: Option<&Visiting<'_>>,
    ) -> Result<Self, SchemaError> {
        Ok(match kind {
            FieldKind::Primitive(p) => Self::zero(*p),
            FieldKind::Message(nested) => {
                let schema = nested.get();
                if parents.is_some_and(|p| p.contains(schema)) {
                    return Err(SchemaError::RecursiveDefault {
                        schema: schema.name().to_string(),
                    });
                }
                let frame = Visiting {
                    schema,
                    parent: parents,
                };
                let values = schema
                    .fields()
                    .iter()
                    .map(|f| Self::default_in(f.kind(), Some(&frame)))
                    .collect::<Result<Vec<_>, _>>()?;
                Self::Message(MessageInstance::from_parts(nested.clone(), values))
            }
            FieldKind::Array {
                element,
                len: ArrayLen::Fixed(n),
            } => Self::Array(
                (0..*n)
                    .map(|_| Self::default_in(element, parents))
                    .collect::<Result<_, _>>()?,
            ),
            FieldKind::Array {
                len: ArrayLen::Field(_),
                ..
            } => Self::Array(Vec::new()),
        })
    }

    fn zero(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::I8 => Self::I8(0),
            PrimitiveKind::I16 => Self::I16(0),
            PrimitiveKind::I32 => Self::I32(0),
            PrimitiveKind::I64 => Self::I64(0),
            PrimitiveKind::F32 => Self::F32(0.0),
            PrimitiveKind::F64 => Self::F64(0.0),
            PrimitiveKind::Bool => Self::Bool(false),
            PrimitiveKind::Byte => Self::Byte(0),
            PrimitiveKind::String => Self::String(String::new()),
        }
    }

    /// Primitive kind of a scalar value.
    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        Some(match self {
            Self::I8(_) => PrimitiveKind::I8,
            Self::I16(_) => PrimitiveKind::I16,
            Self::I32(_) => PrimitiveKind::I32,
            Self::I64(_) => PrimitiveKind::I64,
            Self::F32(_) => PrimitiveKind::F32,
            Self::F64(_) => PrimitiveKind::F64,
            Self::Bool(_) => PrimitiveKind::Bool,
            Self::Byte(_) => PrimitiveKind::Byte,
            Self::String(_) => PrimitiveKind::String,
            Self::Array(_) | Self::Message(_) => return None,
        })
    }

    /// Whether this value has the shape `kind` describes.
    ///
    /// Fixed dimensions must hold exactly N elements. Variable dimensions are
    /// not compared with their count field, which may still change.
    pub fn matches(&self, kind: &FieldKind) -> bool {
        match (kind, self) {
            (FieldKind::Primitive(p), v) => v.primitive_kind() == Some(*p),
            (FieldKind::Message(schema), Self::Message(m)) => m.schema().is_same(schema),
            (FieldKind::Array { element, len }, Self::Array(items)) => {
                if let ArrayLen::Fixed(n) = len {
                    if items.len() != *n {
                        return false;
                    }
                }
                items.iter().all(|item| item.matches(element))
            }
            _ => false,
        }
    }

    /// Size of this value on the wire. Nested messages carry no fingerprint.
    pub fn encoded_size(&self) -> usize {
        match self {
            // length prefix, content, terminator
            Self::String(s) => STRING_LENGTH_SIZE + s.len() + 1,
            Self::Array(items) => items.iter().map(Self::encoded_size).sum(),
            Self::Message(m) => m.values().iter().map(Self::encoded_size).sum(),
            scalar => scalar
                .primitive_kind()
                .and_then(|p| p.size())
                .unwrap_or_default(),
        }
    }

    /// Any integer value (including `Byte`), widened.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I8(v) => Some(i64::from(*v)),
            Self::I16(v) => Some(i64::from(*v)),
            Self::I32(v) => Some(i64::from(*v)),
            Self::I64(v) => Some(*v),
            Self::Byte(v) => Some(i64::from(*v)),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::F32(v) => Some(f64::from(*v)),
            Self::F64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_message(&self) -> Option<&MessageInstance> {
        match self {
            Self::Message(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_message_mut(&mut self) -> Option<&mut MessageInstance> {
        match self {
            Self::Message(m) => Some(m),
            _ => None,
        }
    }

    /// Integer value of kind `kind` holding `n`, for count fields.
    pub(crate) fn integer(kind: PrimitiveKind, n: i64) -> Option<Self> {
        match kind {
            PrimitiveKind::I8 => i8::try_from(n).ok().map(Self::I8),
            PrimitiveKind::I16 => i16::try_from(n).ok().map(Self::I16),
            PrimitiveKind::I32 => i32::try_from(n).ok().map(Self::I32),
            PrimitiveKind::I64 => Some(Self::I64(n)),
            PrimitiveKind::Byte => u8::try_from(n).ok().map(Self::Byte),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::I8(a), Self::I8(b)) => a == b,
            (Self::I16(a), Self::I16(b)) => a == b,
            (Self::I32(a), Self::I32(b)) => a == b,
            (Self::I64(a), Self::I64(b)) => a == b,
            (Self::F32(a), Self::F32(b)) => a.to_bits() == b.to_bits(),
            (Self::F64(a), Self::F64(b)) => a.to_bits() == b.to_bits(),
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Byte(a), Self::Byte(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Message(a), Self::Message(b)) => a == b,
            _ => false,
        }
    }
}

macro_rules! impl_from_primitive {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Self::$variant(v)
            }
        }

        impl FromValue for $ty {
            const KIND: &'static str = stringify!($ty);

            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::$variant(v) => Some(*v),
                    _ => None,
                }
            }
        }
    };
}

impl_from_primitive!(i8, I8);
impl_from_primitive!(i16, I16);
impl_from_primitive!(i32, I32);
impl_from_primitive!(i64, I64);
impl_from_primitive!(f32, F32);
impl_from_primitive!(f64, F64);
impl_from_primitive!(bool, Bool);
impl_from_primitive!(u8, Byte);

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<MessageInstance> for Value {
    fn from(v: MessageInstance) -> Self {
        Self::Message(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}

/// Extraction of a Rust value from a [`Value`].
pub trait FromValue: Sized {
    /// Name used in type-mismatch errors.
    const KIND: &'static str;

    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for String {
    const KIND: &'static str = "string";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    const KIND: &'static str = "array";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_array()?.iter().map(T::from_value).collect()
    }
}
