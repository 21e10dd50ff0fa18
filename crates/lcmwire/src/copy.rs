// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Deep copy.
//!
//! Every string, array and nested instance is reallocated. Only the
//! immutable schema handle is shared.

use crate::message::MessageInstance;
use crate::value::Value;

/// Copy `message` and everything it owns.
pub fn copy_message(message: &MessageInstance) -> MessageInstance {
    let values = message.values().iter().map(copy_value).collect();
    MessageInstance::from_parts(message.schema_ref().clone(), values)
}

/// Copy one value; arrays element-wise, nested messages recursively.
pub fn copy_value(value: &Value) -> Value {
    match value {
        Value::I8(v) => Value::I8(*v),
        Value::I16(v) => Value::I16(*v),
        Value::I32(v) => Value::I32(*v),
        Value::I64(v) => Value::I64(*v),
        Value::F32(v) => Value::F32(*v),
        Value::F64(v) => Value::F64(*v),
        Value::Bool(v) => Value::Bool(*v),
        Value::Byte(v) => Value::Byte(*v),
        Value::String(s) => Value::String(s.clone()),
        Value::Array(items) => Value::Array(items.iter().map(copy_value).collect()),
        Value::Message(m) => Value::Message(copy_message(m)),
    }
}

impl Clone for MessageInstance {
    fn clone(&self) -> Self {
        copy_message(self)
    }
}

impl Clone for Value {
    fn clone(&self) -> Self {
        copy_value(self)
    }
}
