// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for schema construction, encoding and decoding.

use crate::fingerprint::Fingerprint;
use std::io;
use thiserror::Error;

/// Errors raised while encoding or decoding a message, or while editing a
/// [`MessageInstance`](crate::MessageInstance).
///
/// Any error aborts the current decode. The partially decoded instance is
/// dropped and never handed back to the caller.
#[derive(Debug, Error)]
pub enum WireError {
    /// Leading 8 bytes do not match the schema's fingerprint: wrong type or a
    /// corrupted stream.
    #[error("fingerprint mismatch for {schema}: expected {expected}, found {found}")]
    FingerprintMismatch {
        schema: String,
        expected: Fingerprint,
        found: Fingerprint,
    },

    /// Source ran out before a field's bytes were available.
    #[error("truncated input at offset {offset}: {needed} more bytes needed")]
    TruncatedInput { offset: u64, needed: usize },

    /// Decoded (or declared) length is negative or over the configured limit.
    #[error("invalid {what} length {length} at offset {offset}")]
    InvalidLength {
        what: &'static str,
        length: i64,
        offset: u64,
    },

    /// Array element count does not agree with its fixed size or count field.
    #[error("field `{field}` holds {actual} elements, expected {expected}")]
    LengthMismatch {
        field: String,
        expected: i64,
        actual: usize,
    },

    #[error("value for field `{field}` does not match kind {expected}")]
    TypeMismatch { field: String, expected: String },

    #[error("unknown field `{0}`")]
    UnknownField(String),

    /// Strings are NUL-terminated on the wire, so NUL cannot appear inside one.
    #[error("string at offset {offset} contains an embedded NUL byte")]
    EmbeddedNul { offset: u64 },

    #[error("string at offset {offset} is not valid UTF-8")]
    InvalidUtf8 { offset: u64 },

    #[error("message nesting exceeds {limit} levels")]
    NestingTooDeep { limit: usize },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result alias for wire operations.
pub type Result<T> = std::result::Result<T, WireError>;

/// Schema validation errors reported by [`SchemaBuilder::build`](crate::SchemaBuilder::build).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("schema and field names must not be empty (schema `{schema}`)")]
    EmptyName { schema: String },

    #[error("duplicate field `{field}` in schema `{schema}`")]
    DuplicateField { schema: String, field: String },

    #[error("duplicate constant `{name}` in schema `{schema}`")]
    DuplicateConstant { schema: String, name: String },

    /// A variable dimension must name an integer scalar declared before the array.
    #[error("array `{field}` in schema `{schema}` cannot take its length from `{length_field}`: {reason}")]
    InvalidLengthField {
        schema: String,
        field: String,
        length_field: String,
        reason: &'static str,
    },

    /// Default construction reached a schema already being built.
    #[error("schema `{schema}` embeds itself by value and has no finite default")]
    RecursiveDefault { schema: String },

    #[error("constant `{name}` in schema `{schema}`: {reason}")]
    InvalidConstant {
        schema: String,
        name: String,
        reason: &'static str,
    },
}

/// Errors loading a [`CodecConfig`](crate::CodecConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid codec config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("codec config field `{field}` must be greater than zero")]
    ZeroLimit { field: &'static str },
}
