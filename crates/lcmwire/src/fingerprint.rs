// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Structural fingerprints.
//!
//! ```text
//! fp(S, parents) = 0                                   if S in parents
//!                = rotl1(base_seed(S) + sum fp(N, parents + S))
//!                  for every nested-message field N of S, in declaration order
//! ```
//!
//! Arithmetic wraps at 64 bits. A field pointing at the same schema twice
//! contributes twice. The visiting set is an immutable chain of stack frames,
//! so sibling fields never observe each other's traversal.

use crate::schema::MessageSchema;
use std::fmt;

/// 64-bit structural hash identifying a message schema on the wire.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Fingerprint(u64);

impl Fingerprint {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Wire form (big-endian).
    pub const fn to_bytes(&self) -> [u8; 8] {
        self.0.to_be_bytes()
    }

    pub const fn from_bytes(bytes: [u8; 8]) -> Self {
        Self(u64::from_be_bytes(bytes))
    }
}

impl From<u64> for Fingerprint {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({:#018x})", self.0)
    }
}

impl fmt::LowerHex for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

/// Schemas on the current recursion path, innermost first.
#[derive(Clone, Copy)]
pub(crate) struct Visiting<'a> {
    pub(crate) schema: &'a MessageSchema,
    pub(crate) parent: Option<&'a Visiting<'a>>,
}

impl Visiting<'_> {
    pub(crate) fn contains(&self, schema: &MessageSchema) -> bool {
        let mut frame = Some(self);
        while let Some(f) = frame {
            if std::ptr::eq(f.schema, schema) {
                return true;
            }
            frame = f.parent;
        }
        false
    }
}

/// Compute the fingerprint of `schema` without touching its memo.
///
/// Pure over static data: the same schema graph always yields the same value.
/// Prefer [`MessageSchema::fingerprint`], which memoizes.
pub fn compute(schema: &MessageSchema) -> Fingerprint {
    Fingerprint(hash_recursive(schema, None))
}

fn hash_recursive(schema: &MessageSchema, parents: Option<&Visiting<'_>>) -> u64 {
    if parents.is_some_and(|p| p.contains(schema)) {
        return 0;
    }
    let frame = Visiting {
        schema,
        parent: parents,
    };

    let sum = schema
        .fields()
        .iter()
        .filter_map(|field| field.kind().nested_schema())
        .fold(schema.base_seed(), |acc, nested| {
            acc.wrapping_add(hash_recursive(nested.get(), Some(&frame)))
        });

    sum.rotate_left(1)
}
