// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema-directed wire codec.
//!
//! ```text
//! message  = fingerprint(8, BE) field*
//! field    = int8 | int16 | int32 | int64 | float | double   (BE, fixed width)
//!          | boolean | byte                                    (1 byte)
//!          | string   = len:i32 (content + 1) content NUL
//!          | array    = element*                               (count from schema or sibling field)
//!          | nested   = field*                                 (no fingerprint)
//! ```

pub mod decoder;
pub mod encoder;

pub use decoder::Decoder;
pub use encoder::Encoder;

use crate::config::PREALLOC_LIMIT;
use crate::error::{Result, WireError};
use crate::message::MessageInstance;
use crate::schema::{ArrayLen, FieldKind, MessageSchema, PrimitiveKind, SchemaRef};
use crate::value::Value;
use std::io::{Read, Write};

/// Encode the fields of `instance` in declaration order.
pub(crate) fn encode_fields<W: Write>(
    enc: &mut Encoder<W>,
    instance: &MessageInstance,
) -> Result<()> {
    let schema = instance.schema();
    for (field, value) in schema.fields().iter().zip(instance.values()) {
        encode_value(enc, schema, instance.values(), field.name(), field.kind(), value)?;
    }
    Ok(())
}

fn encode_value<W: Write>(
    enc: &mut Encoder<W>,
    schema: &MessageSchema,
    siblings: &[Value],
    name: &str,
    kind: &FieldKind,
    value: &Value,
) -> Result<()> {
    match (kind, value) {
        (FieldKind::Primitive(p), v) => encode_primitive(enc, name, *p, v),
        (FieldKind::Message(expected), Value::Message(nested)) => {
            if !nested.schema().is_same(expected) {
                return Err(type_mismatch(name, kind));
            }
            encode_fields(enc, nested)
        }
        (FieldKind::Array { element, len }, Value::Array(items)) => {
            let expected = array_len(schema, siblings, name, len, enc.position())?;
            if items.len() != expected {
                return Err(WireError::LengthMismatch {
                    field: name.to_string(),
                    expected: expected as i64,
                    actual: items.len(),
                });
            }
            for item in items {
                encode_value(enc, schema, siblings, name, element, item)?;
            }
            Ok(())
        }
        _ => Err(type_mismatch(name, kind)),
    }
}

fn encode_primitive<W: Write>(
    enc: &mut Encoder<W>,
    name: &str,
    kind: PrimitiveKind,
    value: &Value,
) -> Result<()> {
    match (kind, value) {
        (PrimitiveKind::I8, Value::I8(v)) => enc.write_i8(*v),
        (PrimitiveKind::I16, Value::I16(v)) => enc.write_i16(*v),
        (PrimitiveKind::I32, Value::I32(v)) => enc.write_i32(*v),
        (PrimitiveKind::I64, Value::I64(v)) => enc.write_i64(*v),
        (PrimitiveKind::F32, Value::F32(v)) => enc.write_f32(*v),
        (PrimitiveKind::F64, Value::F64(v)) => enc.write_f64(*v),
        (PrimitiveKind::Bool, Value::Bool(v)) => enc.write_bool(*v),
        (PrimitiveKind::Byte, Value::Byte(v)) => enc.write_byte(*v),
        (PrimitiveKind::String, Value::String(s)) => enc.write_string(s),
        _ => Err(type_mismatch(name, &FieldKind::Primitive(kind))),
    }
}

/// Element count of one dimension: the schema constant, or the value of the
/// count field (already encoded or decoded, since it is declared earlier).
fn array_len(
    schema: &MessageSchema,
    siblings: &[Value],
    name: &str,
    len: &ArrayLen,
    offset: u64,
) -> Result<usize> {
    let count_field = match len {
        ArrayLen::Fixed(n) => return Ok(*n),
        ArrayLen::Field(count_field) => count_field,
    };
    let count = schema
        .field_index(count_field)
        .and_then(|index| siblings.get(index))
        .ok_or_else(|| WireError::UnknownField(count_field.clone()))?
        .as_i64()
        .ok_or_else(|| WireError::TypeMismatch {
            field: count_field.clone(),
            expected: format!("integer count for `{}`", name),
        })?;
    usize::try_from(count).map_err(|_| WireError::InvalidLength {
        what: "array",
        length: count,
        offset,
    })
}

fn type_mismatch(name: &str, kind: &FieldKind) -> WireError {
    WireError::TypeMismatch {
        field: name.to_string(),
        expected: kind.to_string(),
    }
}

/// Decode the fields of one `schema` message (no fingerprint).
pub(crate) fn decode_fields<R: Read>(
    dec: &mut Decoder<R>,
    schema: &SchemaRef,
) -> Result<MessageInstance> {
    let s = schema.get();
    let mut values = Vec::with_capacity(s.fields().len());
    let mut offsets = Vec::with_capacity(s.fields().len());
    for field in s.fields() {
        offsets.push(dec.position());
        let value = decode_value(dec, s, Decoded::new(&values, &offsets), field.kind())?;
        values.push(value);
    }
    Ok(MessageInstance::from_parts(schema.clone(), values))
}

/// Fields of the current message decoded so far, with their start offsets.
#[derive(Clone, Copy)]
struct Decoded<'a> {
    values: &'a [Value],
    offsets: &'a [u64],
}

impl<'a> Decoded<'a> {
    fn new(values: &'a [Value], offsets: &'a [u64]) -> Self {
        Self { values, offsets }
    }
}

fn decode_value<R: Read>(
    dec: &mut Decoder<R>,
    schema: &MessageSchema,
    decoded: Decoded<'_>,
    kind: &FieldKind,
) -> Result<Value> {
    match kind {
        FieldKind::Primitive(p) => decode_primitive(dec, *p),
        FieldKind::Message(nested) => {
            dec.enter()?;
            log::trace!(
                "[lcmwire] decoding nested {} at offset {}",
                nested.name(),
                dec.position()
            );
            let result = decode_fields(dec, nested);
            dec.leave();
            Ok(Value::Message(result?))
        }
        FieldKind::Array { element, len } => {
            let n = match len {
                ArrayLen::Fixed(n) => *n,
                ArrayLen::Field(count_field) => {
                    let (count, offset) = array_count(schema, decoded, count_field)?;
                    dec.check_count_at(count, offset)?
                }
            };
            let mut items = Vec::with_capacity(n.min(PREALLOC_LIMIT));
            for _ in 0..n {
                items.push(decode_value(dec, schema, decoded, element)?);
            }
            Ok(Value::Array(items))
        }
    }
}

/// Raw (unchecked) value of a variable dimension's count field, and the
/// offset it was read at.
fn array_count(
    schema: &MessageSchema,
    decoded: Decoded<'_>,
    count_field: &str,
) -> Result<(i64, u64)> {
    schema
        .field_index(count_field)
        .and_then(|index| {
            let count = decoded.values.get(index)?.as_i64()?;
            Some((count, *decoded.offsets.get(index)?))
        })
        .ok_or_else(|| WireError::UnknownField(count_field.to_string()))
}

fn decode_primitive<R: Read>(dec: &mut Decoder<R>, kind: PrimitiveKind) -> Result<Value> {
    Ok(match kind {
        PrimitiveKind::I8 => Value::I8(dec.read_i8()?),
        PrimitiveKind::I16 => Value::I16(dec.read_i16()?),
        PrimitiveKind::I32 => Value::I32(dec.read_i32()?),
        PrimitiveKind::I64 => Value::I64(dec.read_i64()?),
        PrimitiveKind::F32 => Value::F32(dec.read_f32()?),
        PrimitiveKind::F64 => Value::F64(dec.read_f64()?),
        PrimitiveKind::Bool => Value::Bool(dec.read_bool()?),
        PrimitiveKind::Byte => Value::Byte(dec.read_byte()?),
        PrimitiveKind::String => Value::String(dec.read_string()?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaBuilder;

    fn blob() -> SchemaRef {
        SchemaBuilder::new("t.Blob")
            .field("n", PrimitiveKind::I16)
            .string_field("label")
            .var_array("data", PrimitiveKind::Byte, "n")
            .build()
            .expect("schema")
            .into_ref()
    }

    fn encode(instance: &MessageInstance) -> Result<Vec<u8>> {
        let mut enc = Encoder::new(Vec::new());
        encode_fields(&mut enc, instance)?;
        Ok(enc.into_inner())
    }

    #[test]
    fn test_separated_count_field() {
        let mut m = MessageInstance::new(blob());
        m.set("n", 2i16).expect("set");
        m.set("label", "ab").expect("set");
        m.set("data", vec![7u8, 9]).expect("set");
        let bytes = encode(&m).expect("encode");
        assert_eq!(bytes, [0, 2, 0, 0, 0, 3, b'a', b'b', 0, 7, 9]);

        let schema = blob();
        let decoded = decode_fields(&mut Decoder::new(&bytes[..]), &schema).expect("decode");
        assert_eq!(decoded.values(), m.values());
    }

    #[test]
    fn test_count_disagreement() {
        let mut m = MessageInstance::new(blob());
        m.set("n", 3i16).expect("set");
        m.set("data", vec![1u8]).expect("set");
        match encode(&m) {
            Err(WireError::LengthMismatch {
                field,
                expected,
                actual,
            }) => {
                assert_eq!(field, "data");
                assert_eq!(expected, 3);
                assert_eq!(actual, 1);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_negative_count() {
        let mut m = MessageInstance::new(blob());
        m.set("n", -1i16).expect("set");
        assert!(matches!(
            encode(&m),
            Err(WireError::InvalidLength { what: "array", length: -1, .. })
        ));

        let schema = blob();
        let bytes = [0xff, 0xff, 0, 0, 0, 1, 0];
        assert!(matches!(
            decode_fields(&mut Decoder::new(&bytes[..]), &schema),
            Err(WireError::InvalidLength { what: "array", length: -1, offset: 0 })
        ));
    }

    #[test]
    fn test_multi_dimensional_array() {
        let grid = FieldKind::array(
            FieldKind::array(PrimitiveKind::I8, ArrayLen::Fixed(2)),
            ArrayLen::field("rows"),
        );
        let schema = SchemaBuilder::new("t.Grid")
            .field("rows", PrimitiveKind::Byte)
            .array_field("cells", grid)
            .build()
            .expect("schema")
            .into_ref();

        let mut m = MessageInstance::new(schema.clone());
        m.set_sequence(
            "cells",
            vec![Value::from(vec![1i8, 2]), Value::from(vec![3i8, 4])],
        )
        .expect("set");
        let bytes = encode(&m).expect("encode");
        assert_eq!(bytes, [2, 1, 2, 3, 4]);

        let decoded = decode_fields(&mut Decoder::new(&bytes[..]), &schema).expect("decode");
        assert_eq!(decoded.values(), m.values());
    }
}
