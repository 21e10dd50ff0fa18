// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builder API for MessageSchema.

use super::field::{ArrayLen, FieldDescriptor, FieldKind, PrimitiveKind};
use super::{hash, ConstValue, Constant, MessageSchema, SchemaRef};
use crate::error::SchemaError;
use std::collections::HashSet;

/// Builder for [`MessageSchema`] instances.
///
/// Nested [`SchemaRef`]s are stored as given and never resolved here, so a
/// schema may be built inside the initializer of the static it refers to.
#[derive(Debug)]
pub struct SchemaBuilder {
    name: String,
    fields: Vec<FieldDescriptor>,
    constants: Vec<(String, PrimitiveKind, ConstValue)>,
    base_seed: Option<u64>,
}

impl SchemaBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            constants: Vec::new(),
            base_seed: None,
        }
    }

    /// Add a primitive field.
    pub fn field(self, name: impl Into<String>, kind: PrimitiveKind) -> Self {
        self.array_field(name, FieldKind::Primitive(kind))
    }

    pub fn string_field(self, name: impl Into<String>) -> Self {
        self.field(name, PrimitiveKind::String)
    }

    /// Add a nested-message field.
    pub fn message_field(self, name: impl Into<String>, schema: impl Into<SchemaRef>) -> Self {
        self.array_field(name, FieldKind::Message(schema.into()))
    }

    /// Add a one-dimensional array with a schema-time length.
    pub fn fixed_array(
        self,
        name: impl Into<String>,
        element: impl Into<FieldKind>,
        len: usize,
    ) -> Self {
        self.array_field(name, FieldKind::array(element, ArrayLen::Fixed(len)))
    }

    /// Add a one-dimensional array whose length is held by `length_field`.
    pub fn var_array(
        self,
        name: impl Into<String>,
        element: impl Into<FieldKind>,
        length_field: impl Into<String>,
    ) -> Self {
        self.array_field(name, FieldKind::array(element, ArrayLen::field(length_field)))
    }

    /// Add a field of any kind, including multi-dimensional arrays.
    pub fn array_field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(FieldDescriptor::new(name, kind));
        self
    }

    /// Attach a named constant (metadata only).
    pub fn constant(
        mut self,
        name: impl Into<String>,
        kind: PrimitiveKind,
        value: impl Into<ConstValue>,
    ) -> Self {
        self.constants.push((name.into(), kind, value.into()));
        self
    }

    /// Use a precomputed base seed instead of hashing the field list.
    pub fn base_seed(mut self, seed: u64) -> Self {
        self.base_seed = Some(seed);
        self
    }

    /// Validate and build the schema.
    pub fn build(self) -> Result<MessageSchema, SchemaError> {
        if self.name.is_empty() {
            return Err(SchemaError::EmptyName {
                schema: self.name,
            });
        }

        let mut seen = HashSet::new();
        for (index, field) in self.fields.iter().enumerate() {
            if field.name().is_empty() {
                return Err(SchemaError::EmptyName {
                    schema: self.name.clone(),
                });
            }
            if !seen.insert(field.name()) {
                return Err(SchemaError::DuplicateField {
                    schema: self.name.clone(),
                    field: field.name().to_string(),
                });
            }
            for dim in field.kind().dimensions() {
                if let ArrayLen::Field(length_field) = dim {
                    self.check_length_field(index, field.name(), length_field)?;
                }
            }
        }

        let mut constants = Vec::with_capacity(self.constants.len());
        let mut names = HashSet::new();
        for (name, kind, value) in &self.constants {
            if name.is_empty() {
                return Err(SchemaError::EmptyName {
                    schema: self.name.clone(),
                });
            }
            if !names.insert(name.as_str()) {
                return Err(SchemaError::DuplicateConstant {
                    schema: self.name.clone(),
                    name: name.clone(),
                });
            }
            let value = check_constant(*kind, *value).map_err(|reason| {
                SchemaError::InvalidConstant {
                    schema: self.name.clone(),
                    name: name.clone(),
                    reason,
                }
            })?;
            constants.push(Constant::new(name.clone(), *kind, value));
        }

        let base_seed = self
            .base_seed
            .unwrap_or_else(|| hash::base_seed(&self.fields));

        Ok(MessageSchema::new(
            self.name,
            self.fields,
            base_seed,
            constants,
        ))
    }

    /// A count field must be an integer scalar declared before `array_index`.
    fn check_length_field(
        &self,
        array_index: usize,
        array_name: &str,
        length_field: &str,
    ) -> Result<(), SchemaError> {
        let invalid = |reason| SchemaError::InvalidLengthField {
            schema: self.name.clone(),
            field: array_name.to_string(),
            length_field: length_field.to_string(),
            reason,
        };

        let position = self
            .fields
            .iter()
            .position(|f| f.name() == length_field)
            .ok_or_else(|| invalid("no such field"))?;
        if position >= array_index {
            return Err(invalid("length field must be declared before the array"));
        }
        match self.fields[position].kind() {
            FieldKind::Primitive(p) if p.is_integer() => Ok(()),
            FieldKind::Array { .. } => Err(invalid("length field is an array")),
            _ => Err(invalid("length field is not an integer")),
        }
    }
}

/// Range-check a constant against its declared kind.
fn check_constant(kind: PrimitiveKind, value: ConstValue) -> Result<ConstValue, &'static str> {
    let (min, max) = match kind {
        PrimitiveKind::I8 => (i64::from(i8::MIN), i64::from(i8::MAX)),
        PrimitiveKind::I16 => (i64::from(i16::MIN), i64::from(i16::MAX)),
        PrimitiveKind::I32 => (i64::from(i32::MIN), i64::from(i32::MAX)),
        PrimitiveKind::I64 => (i64::MIN, i64::MAX),
        PrimitiveKind::Byte => (0, i64::from(u8::MAX)),
        PrimitiveKind::F32 | PrimitiveKind::F64 => {
            return match value {
                ConstValue::Int(v) => Ok(ConstValue::Float(v as f64)),
                ConstValue::Float(v) => Ok(ConstValue::Float(v)),
            };
        }
        PrimitiveKind::Bool | PrimitiveKind::String => {
            return Err("constants must be integer or floating-point");
        }
    };
    match value {
        ConstValue::Int(v) if (min..=max).contains(&v) => Ok(value),
        ConstValue::Int(_) => Err("value out of range for its kind"),
        ConstValue::Float(_) => Err("floating-point value for an integer kind"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn length_error(result: Result<MessageSchema, SchemaError>) -> &'static str {
        match result {
            Err(SchemaError::InvalidLengthField { reason, .. }) => reason,
            other => panic!("expected InvalidLengthField, got {:?}", other),
        }
    }

    #[test]
    fn test_builder_keeps_declaration_order() {
        let schema = SchemaBuilder::new("t.Ordered")
            .field("b", PrimitiveKind::I32)
            .string_field("a")
            .fixed_array("c", PrimitiveKind::F64, 3)
            .build()
            .expect("schema");
        let names: Vec<_> = schema.fields().iter().map(|f| f.name()).collect();
        assert_eq!(names, ["b", "a", "c"]);
        assert_eq!(schema.field_index("c"), Some(2));
        assert!(schema.field("missing").is_none());
    }

    #[test]
    fn test_explicit_seed_overrides_hash() {
        let schema = SchemaBuilder::new("t.Seeded")
            .field("x", PrimitiveKind::I8)
            .base_seed(42)
            .build()
            .expect("schema");
        assert_eq!(schema.base_seed(), 42);
    }

    #[test]
    fn test_rejects_empty_names() {
        assert!(matches!(
            SchemaBuilder::new("").build(),
            Err(SchemaError::EmptyName { .. })
        ));
        assert!(matches!(
            SchemaBuilder::new("t.X").field("", PrimitiveKind::I8).build(),
            Err(SchemaError::EmptyName { .. })
        ));
    }

    #[test]
    fn test_rejects_duplicate_field() {
        let err = SchemaBuilder::new("t.Dup")
            .field("x", PrimitiveKind::I8)
            .field("x", PrimitiveKind::I16)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::DuplicateField {
                schema: "t.Dup".into(),
                field: "x".into(),
            }
        );
    }

    #[test]
    fn test_length_field_validation() {
        let unknown = SchemaBuilder::new("t.A")
            .var_array("data", PrimitiveKind::I8, "n")
            .build();
        assert_eq!(length_error(unknown), "no such field");

        let after = SchemaBuilder::new("t.A")
            .var_array("data", PrimitiveKind::I8, "n")
            .field("n", PrimitiveKind::I32)
            .build();
        assert_eq!(
            length_error(after),
            "length field must be declared before the array"
        );

        let float = SchemaBuilder::new("t.A")
            .field("n", PrimitiveKind::F64)
            .var_array("data", PrimitiveKind::I8, "n")
            .build();
        assert_eq!(length_error(float), "length field is not an integer");

        let array = SchemaBuilder::new("t.A")
            .fixed_array("n", PrimitiveKind::I32, 2)
            .var_array("data", PrimitiveKind::I8, "n")
            .build();
        assert_eq!(length_error(array), "length field is an array");

        let own = SchemaBuilder::new("t.A")
            .var_array("data", PrimitiveKind::I8, "data")
            .build();
        assert_eq!(
            length_error(own),
            "length field must be declared before the array"
        );
    }

    #[test]
    fn test_length_field_may_be_separated() {
        let schema = SchemaBuilder::new("t.Gap")
            .field("count", PrimitiveKind::I16)
            .string_field("label")
            .var_array("items", PrimitiveKind::F32, "count")
            .build();
        assert!(schema.is_ok());
    }

    #[test]
    fn test_inner_variable_dimension_is_checked() {
        let kind = FieldKind::array(
            FieldKind::array(PrimitiveKind::I8, ArrayLen::field("cols")),
            ArrayLen::Fixed(2),
        );
        let result = SchemaBuilder::new("t.Grid").array_field("grid", kind).build();
        assert_eq!(length_error(result), "no such field");
    }

    #[test]
    fn test_constants() {
        let schema = SchemaBuilder::new("sensor_msgs.Range")
            .field("radiation_type", PrimitiveKind::Byte)
            .constant("ULTRASOUND", PrimitiveKind::Byte, 0)
            .constant("INFRARED", PrimitiveKind::Byte, 1)
            .constant("SCALE", PrimitiveKind::F64, 2)
            .build()
            .expect("schema");
        assert_eq!(schema.constants().len(), 3);
        assert_eq!(schema.constant("INFRARED").and_then(|c| c.as_i64()), Some(1));
        assert_eq!(
            schema.constant("SCALE").map(|c| c.value()),
            Some(ConstValue::Float(2.0))
        );
    }

    #[test]
    fn test_rejects_bad_constants() {
        let out_of_range = SchemaBuilder::new("t.C")
            .constant("BIG", PrimitiveKind::I8, 128)
            .build();
        assert!(matches!(
            out_of_range,
            Err(SchemaError::InvalidConstant { .. })
        ));

        let negative_byte = SchemaBuilder::new("t.C")
            .constant("NEG", PrimitiveKind::Byte, -1)
            .build();
        assert!(matches!(
            negative_byte,
            Err(SchemaError::InvalidConstant { .. })
        ));

        let string = SchemaBuilder::new("t.C")
            .constant("S", PrimitiveKind::String, 0)
            .build();
        assert!(matches!(string, Err(SchemaError::InvalidConstant { .. })));

        let dup = SchemaBuilder::new("t.C")
            .constant("A", PrimitiveKind::I32, 1)
            .constant("A", PrimitiveKind::I32, 2)
            .build();
        assert!(matches!(dup, Err(SchemaError::DuplicateConstant { .. })));
    }
}
