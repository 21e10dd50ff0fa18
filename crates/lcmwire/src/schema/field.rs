// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field descriptors: the per-field half of a schema.

use super::SchemaRef;
use std::fmt;

/// Primitive wire kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Bool,
    Byte,
    String,
}

impl PrimitiveKind {
    /// Encoded size in bytes (`None` for strings).
    pub const fn size(&self) -> Option<usize> {
        match self {
            Self::I8 | Self::Bool | Self::Byte => Some(1),
            Self::I16 => Some(2),
            Self::I32 | Self::F32 => Some(4),
            Self::I64 | Self::F64 => Some(8),
            Self::String => None,
        }
    }

    /// Type name used by the schema generator, also fed to the member hash.
    pub const fn lcm_name(&self) -> &'static str {
        match self {
            Self::I8 => "int8_t",
            Self::I16 => "int16_t",
            Self::I32 => "int32_t",
            Self::I64 => "int64_t",
            Self::F32 => "float",
            Self::F64 => "double",
            Self::Bool => "boolean",
            Self::Byte => "byte",
            Self::String => "string",
        }
    }

    /// Kinds allowed to carry a variable array's length.
    pub const fn is_integer(&self) -> bool {
        matches!(
            self,
            Self::I8 | Self::I16 | Self::I32 | Self::I64 | Self::Byte
        )
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.lcm_name())
    }
}

/// Length of one array dimension.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArrayLen {
    /// Schema-time constant, absent from the wire.
    Fixed(usize),
    /// Runtime length held by an earlier integer field of the same message.
    Field(String),
}

impl ArrayLen {
    pub fn field(name: impl Into<String>) -> Self {
        Self::Field(name.into())
    }
}

impl fmt::Display for ArrayLen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(n) => write!(f, "{}", n),
            Self::Field(name) => f.write_str(name),
        }
    }
}

/// Kind of a field. Arrays nest for multi-dimensional fields, outermost
/// dimension first.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Primitive(PrimitiveKind),
    Message(SchemaRef),
    Array {
        element: Box<FieldKind>,
        len: ArrayLen,
    },
}

impl FieldKind {
    pub fn array(element: impl Into<FieldKind>, len: ArrayLen) -> Self {
        Self::Array {
            element: Box::new(element.into()),
            len,
        }
    }

    /// Innermost element kind (the kind itself for scalars).
    pub fn leaf(&self) -> &FieldKind {
        let mut kind = self;
        while let Self::Array { element, .. } = kind {
            kind = element;
        }
        kind
    }

    /// Dimensions from outermost to innermost; empty for scalars.
    pub fn dimensions(&self) -> Vec<&ArrayLen> {
        let mut dims = Vec::new();
        let mut kind = self;
        while let Self::Array { element, len } = kind {
            dims.push(len);
            kind = element;
        }
        dims
    }

    /// Schema of a nested-message field or of an array of nested messages.
    pub fn nested_schema(&self) -> Option<&SchemaRef> {
        match self.leaf() {
            Self::Message(schema) => Some(schema),
            _ => None,
        }
    }
}

impl From<PrimitiveKind> for FieldKind {
    fn from(kind: PrimitiveKind) -> Self {
        Self::Primitive(kind)
    }
}

impl From<SchemaRef> for FieldKind {
    fn from(schema: SchemaRef) -> Self {
        Self::Message(schema)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.leaf() {
            Self::Primitive(p) => write!(f, "{}", p)?,
            Self::Message(schema) => f.write_str(schema.name())?,
            Self::Array { .. } => {}
        }
        for dim in self.dimensions() {
            write!(f, "[{}]", dim)?;
        }
        Ok(())
    }
}

/// One named, ordered field of a schema.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    name: String,
    kind: FieldKind,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, kind: impl Into<FieldKind>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }
}
