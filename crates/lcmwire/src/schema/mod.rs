// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Static message schemas.
//!
//! A [`MessageSchema`] is the ordered field list of one message type plus its
//! base seed and descriptor-level constants. Field order is part of the wire
//! contract. Schemas are immutable once built; the only derived state is the
//! memoized fingerprint.
//!
//! Nested fields point at other schemas through [`SchemaRef`]. Generated
//! code uses the resolver form, which is also the only way to declare
//! self- or mutually-referential schemas:
//!
//! ```
//! use lcmwire::{MessageSchema, PrimitiveKind, SchemaBuilder, SchemaRef};
//! use std::sync::LazyLock;
//!
//! static TREE: LazyLock<MessageSchema> = LazyLock::new(|| {
//!     SchemaBuilder::new("demo.Tree")
//!         .field("value", PrimitiveKind::I32)
//!         .field("children_length", PrimitiveKind::I32)
//!         .var_array("children", SchemaRef::lazy(|| &*TREE), "children_length")
//!         .build()
//!         .expect("valid schema")
//! });
//!
//! assert_eq!(TREE.fingerprint(), TREE.fingerprint());
//! ```

pub mod builder;
pub mod field;
pub mod hash;

pub use builder::SchemaBuilder;
pub use field::{ArrayLen, FieldDescriptor, FieldKind, PrimitiveKind};

use crate::fingerprint::{self, Fingerprint};
use std::fmt;
use std::ops::Deref;
use std::sync::{Arc, OnceLock};

/// Ordered description of one message type.
pub struct MessageSchema {
    name: String,
    fields: Vec<FieldDescriptor>,
    base_seed: u64,
    constants: Vec<Constant>,
    fingerprint: OnceLock<Fingerprint>,
}

impl MessageSchema {
    pub(crate) fn new(
        name: String,
        fields: Vec<FieldDescriptor>,
        base_seed: u64,
        constants: Vec<Constant>,
    ) -> Self {
        Self {
            name,
            fields,
            base_seed,
            constants,
            fingerprint: OnceLock::new(),
        }
    }

    /// Fully-qualified name, e.g. `geometry_msgs.Pose`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name() == name)
    }

    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    /// Named constants. Metadata only: never part of an instance, never encoded.
    pub fn constants(&self) -> &[Constant] {
        &self.constants
    }

    pub fn constant(&self, name: &str) -> Option<&Constant> {
        self.constants.iter().find(|c| c.name() == name)
    }

    /// Structural fingerprint, computed on first access and memoized for the
    /// lifetime of the schema. Concurrent first calls compute it once.
    pub fn fingerprint(&self) -> Fingerprint {
        *self.fingerprint.get_or_init(|| {
            let value = fingerprint::compute(self);
            log::debug!("[lcmwire] fingerprint of {} = {}", self.name, value);
            value
        })
    }

    /// Same schema object, or an equally named schema with the same shape.
    pub fn is_same(&self, other: &MessageSchema) -> bool {
        std::ptr::eq(self, other)
            || (self.name == other.name && self.fingerprint() == other.fingerprint())
    }

    /// Wrap in a shared [`SchemaRef`].
    pub fn into_ref(self) -> SchemaRef {
        SchemaRef::Shared(Arc::new(self))
    }
}

impl fmt::Debug for MessageSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageSchema")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("base_seed", &format_args!("{:#018x}", self.base_seed))
            .field("constants", &self.constants)
            .finish()
    }
}

/// Handle to a nested schema.
#[derive(Clone)]
pub enum SchemaRef {
    /// Resolver returning a process-wide schema. Resolved on every use, so it
    /// may point back at the schema that contains it.
    Lazy(fn() -> &'static MessageSchema),
    Static(&'static MessageSchema),
    /// Schema assembled at runtime.
    Shared(Arc<MessageSchema>),
}

impl SchemaRef {
    pub fn lazy(resolve: fn() -> &'static MessageSchema) -> Self {
        Self::Lazy(resolve)
    }

    pub fn get(&self) -> &MessageSchema {
        match self {
            Self::Lazy(resolve) => resolve(),
            Self::Static(schema) => schema,
            Self::Shared(schema) => schema,
        }
    }
}

impl Deref for SchemaRef {
    type Target = MessageSchema;

    fn deref(&self) -> &MessageSchema {
        self.get()
    }
}

impl From<Arc<MessageSchema>> for SchemaRef {
    fn from(schema: Arc<MessageSchema>) -> Self {
        Self::Shared(schema)
    }
}

impl From<MessageSchema> for SchemaRef {
    fn from(schema: MessageSchema) -> Self {
        schema.into_ref()
    }
}

impl From<&'static MessageSchema> for SchemaRef {
    fn from(schema: &'static MessageSchema) -> Self {
        Self::Static(schema)
    }
}

impl PartialEq for SchemaRef {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.get(), other.get())
    }
}

impl fmt::Debug for SchemaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SchemaRef").field(&self.get().name()).finish()
    }
}

/// Value of a named constant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstValue {
    Int(i64),
    Float(f64),
}

impl From<i64> for ConstValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for ConstValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for ConstValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

/// Named enumerant attached to a schema (e.g. `sensor_msgs.Range.INFRARED`).
#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    name: String,
    kind: PrimitiveKind,
    value: ConstValue,
}

impl Constant {
    pub(crate) fn new(name: String, kind: PrimitiveKind, value: ConstValue) -> Self {
        Self { name, kind, value }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PrimitiveKind {
        self.kind
    }

    pub fn value(&self) -> ConstValue {
        self.value
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self.value {
            ConstValue::Int(v) => Some(v),
            ConstValue::Float(_) => None,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self.value {
            ConstValue::Int(v) => v as f64,
            ConstValue::Float(v) => v,
        }
    }
}
