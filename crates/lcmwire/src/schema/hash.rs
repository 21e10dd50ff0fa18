// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Base seed derivation from a field list.
//!
//! Reproduces the schema generator's member hash so runtime-built schemas
//! carry the same seed a generated type would. The schema name is not part
//! of the hash; nested-message types contribute only through the recursive
//! fingerprint.

use super::field::{ArrayLen, FieldDescriptor, FieldKind};
use crate::config::MEMBER_HASH_SEED;

/// One hash step over a signed byte, in signed 64-bit arithmetic.
fn update(v: i64, c: i8) -> i64 {
    (v.wrapping_shl(8) ^ (v >> 55)).wrapping_add(i64::from(c))
}

/// Length (truncated to a signed byte) followed by every byte.
fn update_str(mut v: i64, s: &str) -> i64 {
    v = update(v, s.len() as i8);
    for b in s.bytes() {
        v = update(v, b as i8);
    }
    v
}

/// Base seed for `fields`, in declaration order.
pub fn base_seed(fields: &[FieldDescriptor]) -> u64 {
    let mut v = MEMBER_HASH_SEED;
    for field in fields {
        v = update_str(v, field.name());
        if let FieldKind::Primitive(p) = field.kind().leaf() {
            v = update_str(v, p.lcm_name());
        }

        let dims = field.kind().dimensions();
        v = update(v, dims.len() as i8);
        for dim in dims {
            match dim {
                ArrayLen::Fixed(n) => {
                    v = update(v, 0);
                    v = update_str(v, &n.to_string());
                }
                ArrayLen::Field(name) => {
                    v = update(v, 1);
                    v = update_str(v, name);
                }
            }
        }
    }
    v as u64
}
