// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! lcmwire: fingerprinted binary message codec
//!
//! Encode and decode structured messages in the LCM wire format:
//! - Structural 64-bit fingerprints over a schema's field graph, cycles included
//! - Big-endian primitives, length-prefixed strings, fixed/variable/multi-dimensional arrays
//! - Dynamic instances driven by a [`MessageSchema`], or typed structs through [`Message`]
//! - Deep copy with no shared mutable state
//!
//! # Quick Start
//!
//! ```
//! use lcmwire::{MessageInstance, PrimitiveKind, SchemaBuilder};
//!
//! let schema = SchemaBuilder::new("geometry_msgs.Vector3")
//!     .field("x", PrimitiveKind::F64)
//!     .field("y", PrimitiveKind::F64)
//!     .field("z", PrimitiveKind::F64)
//!     .build()?
//!     .into_ref();
//!
//! let mut v = MessageInstance::new(schema.clone());
//! v.set("x", 1.0f64)?;
//!
//! let bytes = v.encode_to_vec()?;
//! assert_eq!(bytes.len(), 8 + 3 * 8);
//!
//! let back = MessageInstance::decode_from_slice(schema, &bytes)?;
//! assert_eq!(back, v);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Wire Layout
//!
//! | Part | Encoding |
//! |------|----------|
//! | fingerprint | 8 bytes, big-endian, top-level only |
//! | integers / floats | fixed width, big-endian |
//! | boolean / byte | 1 byte |
//! | string | `i32` (bytes + 1), bytes, NUL |
//! | array | elements only; count from schema or an earlier field |
//! | nested message | fields only |

pub mod codec;
pub mod config;
pub mod copy;
pub mod error;
pub mod fingerprint;
pub mod message;
pub mod schema;
pub mod value;

pub use codec::{Decoder, Encoder};
pub use config::{CodecConfig, FINGERPRINT_SIZE, STRING_TERMINATOR};
pub use error::{ConfigError, Result, SchemaError, WireError};
pub use fingerprint::Fingerprint;
pub use message::{Message, MessageInstance};
pub use schema::{
    ArrayLen, ConstValue, Constant, FieldDescriptor, FieldKind, MessageSchema, PrimitiveKind,
    SchemaBuilder, SchemaRef,
};
pub use value::{FromValue, Value};
