// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Wire constants and runtime codec configuration.
//!
//! - **Static**: constants fixed by the wire format (fingerprint width,
//!   string terminator, member hash seed). Never hardcode these elsewhere.
//! - **Dynamic**: [`CodecConfig`] bounds what a decoder accepts from an
//!   untrusted source.
//!
//! # Example
//!
//! ```
//! use lcmwire::CodecConfig;
//!
//! let config = CodecConfig::from_json(r#"{ "max_string_len": 4096 }"#).unwrap();
//! assert_eq!(config.max_string_len, 4096);
//! assert_eq!(config.max_depth, CodecConfig::default().max_depth);
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Width of the fingerprint that prefixes every top-level message.
pub const FINGERPRINT_SIZE: usize = 8;

/// Width of the signed length prefix of strings.
pub const STRING_LENGTH_SIZE: usize = 4;

/// Byte written after the content of every string.
pub const STRING_TERMINATOR: u8 = 0;

/// Starting value of the member hash that produces a schema's base seed.
pub const MEMBER_HASH_SEED: i64 = 0x1234_5678;

/// Default bound on decoded string content, in bytes (64 MiB).
pub const DEFAULT_MAX_STRING_LEN: usize = 64 * 1024 * 1024;

/// Default bound on decoded array element counts (16 Mi elements).
pub const DEFAULT_MAX_ARRAY_LEN: usize = 16 * 1024 * 1024;

/// Default bound on nested-message depth.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Elements or bytes reserved up-front before a length has been backed by
/// actual input. Larger payloads grow as data arrives.
pub const PREALLOC_LIMIT: usize = 4096;

/// Decoder limits.
///
/// Lengths beyond `max_string_len` / `max_array_len` are reported as
/// [`WireError::InvalidLength`](crate::WireError::InvalidLength), nesting
/// beyond `max_depth` as [`WireError::NestingTooDeep`](crate::WireError::NestingTooDeep).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    pub max_string_len: usize,
    pub max_array_len: usize,
    pub max_depth: usize,
}

impl CodecConfig {
    /// Config without any limit except the input itself.
    pub const fn unlimited() -> Self {
        Self {
            max_string_len: usize::MAX,
            max_array_len: usize::MAX,
            max_depth: usize::MAX,
        }
    }

    /// Parse a JSON document; missing keys keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject limits that would make every message undecodable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroLimit { field: "max_depth" });
        }
        Ok(())
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_string_len: DEFAULT_MAX_STRING_LEN,
            max_array_len: DEFAULT_MAX_ARRAY_LEN,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
