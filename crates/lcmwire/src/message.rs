// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Message instances and the typed message seam.

use crate::codec::{self, Decoder, Encoder};
use crate::config::{CodecConfig, FINGERPRINT_SIZE};
use crate::error::{Result, SchemaError, WireError};
use crate::fingerprint::{Fingerprint, Visiting};
use crate::schema::{ArrayLen, FieldKind, MessageSchema, SchemaRef};
use crate::value::{FromValue, Value};
use std::fmt;
use std::io::{Read, Write};

/// Field values bound to a schema, in declaration order.
///
/// An instance exclusively owns its strings, arrays and nested instances.
/// It refers to its schema only to identify it.
pub struct MessageInstance {
    schema: SchemaRef,
    values: Vec<Value>,
}

impl MessageInstance {
    /// Default instance: every field holds its zero value.
    ///
    /// # Panics
    ///
    /// If the schema embeds itself by value; see [`try_new`](Self::try_new).
    pub fn new(schema: impl Into<SchemaRef>) -> Self {
        Self::try_new(schema).unwrap_or_else(|err| panic!("{}", err))
    }

    /// Default instance, or [`SchemaError::RecursiveDefault`] when the schema
    /// contains itself outside a variable array and so has no finite default.
    pub fn try_new(schema: impl Into<SchemaRef>) -> std::result::Result<Self, SchemaError> {
        let schema = schema.into();
        let frame = Visiting {
            schema: schema.get(),
            parent: None,
        };
        let values = schema
            .fields()
            .iter()
            .map(|f| Value::default_in(f.kind(), Some(&frame)))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { schema, values })
    }

    pub(crate) fn from_parts(schema: SchemaRef, values: Vec<Value>) -> Self {
        Self { schema, values }
    }

    pub fn schema(&self) -> &MessageSchema {
        self.schema.get()
    }

    pub fn schema_ref(&self) -> &SchemaRef {
        &self.schema
    }

    pub fn fingerprint(&self) -> Fingerprint {
        self.schema.fingerprint()
    }

    /// Values in field-declaration order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        let index = self.schema.field_index(name)?;
        self.values.get(index)
    }

    /// Mutable access to a field. Shape changes made through it are only
    /// checked when the instance is encoded.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        let index = self.schema.field_index(name)?;
        self.values.get_mut(index)
    }

    /// Typed read of a field.
    pub fn get_as<T: FromValue>(&self, name: &str) -> Result<T> {
        let value = self
            .get(name)
            .ok_or_else(|| WireError::UnknownField(name.to_string()))?;
        T::from_value(value).ok_or_else(|| WireError::TypeMismatch {
            field: name.to_string(),
            expected: T::KIND.to_string(),
        })
    }

    /// Replace a field after checking the value against the field kind.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        let index = self
            .schema
            .field_index(name)
            .ok_or_else(|| WireError::UnknownField(name.to_string()))?;
        let value = value.into();
        let kind = self.schema.fields()[index].kind();
        if !value.matches(kind) {
            return Err(WireError::TypeMismatch {
                field: name.to_string(),
                expected: kind.to_string(),
            });
        }
        self.values[index] = value;
        Ok(())
    }

    /// Replace an array field and, for a variable outer dimension, store the
    /// element count in its count field.
    pub fn set_sequence(&mut self, name: &str, items: Vec<Value>) -> Result<()> {
        let index = self
            .schema
            .field_index(name)
            .ok_or_else(|| WireError::UnknownField(name.to_string()))?;
        let schema = self.schema.clone();
        let kind = schema.fields()[index].kind();

        let count_field = match kind {
            FieldKind::Array {
                len: ArrayLen::Field(count_field),
                ..
            } => count_field,
            FieldKind::Array {
                len: ArrayLen::Fixed(n),
                ..
            } if items.len() != *n => {
                return Err(WireError::LengthMismatch {
                    field: name.to_string(),
                    expected: *n as i64,
                    actual: items.len(),
                });
            }
            FieldKind::Array { .. } => return self.set(name, items),
            _ => {
                return Err(WireError::TypeMismatch {
                    field: name.to_string(),
                    expected: kind.to_string(),
                })
            }
        };

        let count_index = schema
            .field_index(count_field)
            .ok_or_else(|| WireError::UnknownField(count_field.clone()))?;
        let count_kind = match schema.fields()[count_index].kind() {
            FieldKind::Primitive(p) => *p,
            other => {
                return Err(WireError::TypeMismatch {
                    field: count_field.clone(),
                    expected: other.to_string(),
                })
            }
        };
        let count = Value::integer(count_kind, items.len() as i64).ok_or(
            WireError::InvalidLength {
                what: "array",
                length: items.len() as i64,
                offset: 0,
            },
        )?;

        self.set(name, items)?;
        self.values[count_index] = count;
        Ok(())
    }

    /// Exact encoded size, fingerprint included.
    pub fn encoded_size(&self) -> usize {
        FINGERPRINT_SIZE + self.values.iter().map(Value::encoded_size).sum::<usize>()
    }

    /// Write fingerprint and fields to `writer`. On error the writer may hold
    /// a partial message.
    pub fn encode<W: Write>(&self, writer: W) -> Result<()> {
        let mut enc = Encoder::new(writer);
        enc.write_fingerprint(self.fingerprint())?;
        codec::encode_fields(&mut enc, self)?;
        enc.flush()
    }

    pub fn encode_to_vec(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.encoded_size());
        self.encode(&mut buf)?;
        Ok(buf)
    }

    /// Decode one `schema` message with the default [`CodecConfig`].
    pub fn decode<R: Read>(schema: impl Into<SchemaRef>, reader: R) -> Result<Self> {
        Self::decode_with(schema, reader, CodecConfig::default())
    }

    /// Decode one `schema` message; trailing input is left unread.
    pub fn decode_with<R: Read>(
        schema: impl Into<SchemaRef>,
        reader: R,
        config: CodecConfig,
    ) -> Result<Self> {
        let schema = schema.into();
        let mut dec = Decoder::with_config(reader, config);
        dec.expect_fingerprint(&schema)?;
        dec.enter()?;
        let result = codec::decode_fields(&mut dec, &schema);
        dec.leave();
        result
    }

    pub fn decode_from_slice(schema: impl Into<SchemaRef>, bytes: &[u8]) -> Result<Self> {
        Self::decode(schema, bytes)
    }

    /// Deep copy; shares nothing mutable with `self`.
    pub fn copy(&self) -> Self {
        crate::copy::copy_message(self)
    }
}

impl PartialEq for MessageInstance {
    fn eq(&self, other: &Self) -> bool {
        self.schema().is_same(other.schema()) && self.values == other.values
    }
}

impl fmt::Debug for MessageInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(self.schema.name());
        for (field, value) in self.schema.fields().iter().zip(&self.values) {
            s.field(field.name(), value);
        }
        s.finish()
    }
}

/// A Rust type with a static schema and hand-written field codecs.
///
/// Nested typed messages go through [`Encoder::write_message`] and
/// [`Decoder::read_message`]. The field order of `encode_fields` and
/// `decode_fields` must match `schema()`.
pub trait Message: Clone + Default + Sized {
    fn schema() -> &'static MessageSchema;

    fn encode_fields<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()>;

    fn decode_fields<R: Read>(dec: &mut Decoder<R>) -> Result<Self>;

    fn fingerprint() -> Fingerprint {
        Self::schema().fingerprint()
    }

    fn encode<W: Write>(&self, writer: W) -> Result<()> {
        let mut enc = Encoder::new(writer);
        enc.write_fingerprint(Self::fingerprint())?;
        self.encode_fields(&mut enc)?;
        enc.flush()
    }

    fn encode_to_vec(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.encode(&mut buf)?;
        Ok(buf)
    }

    fn decode<R: Read>(reader: R) -> Result<Self> {
        Self::decode_with(reader, CodecConfig::default())
    }

    fn decode_with<R: Read>(reader: R, config: CodecConfig) -> Result<Self> {
        let mut dec = Decoder::with_config(reader, config);
        dec.expect_fingerprint(Self::schema())?;
        dec.enter()?;
        let result = Self::decode_fields(&mut dec);
        dec.leave();
        result
    }

    fn decode_from_slice(bytes: &[u8]) -> Result<Self> {
        Self::decode(bytes)
    }
}
