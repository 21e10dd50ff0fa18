// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Big-endian primitive reader.

use crate::config::{CodecConfig, PREALLOC_LIMIT, STRING_TERMINATOR};
use crate::error::{Result, WireError};
use crate::fingerprint::Fingerprint;
use crate::message::Message;
use crate::schema::MessageSchema;
use byteorder::{BigEndian, ReadBytesExt};
use std::io::{self, Read};

/// Reads wire primitives from a byte source, tracking the byte offset and
/// enforcing [`CodecConfig`] limits.
#[derive(Debug)]
pub struct Decoder<R> {
    reader: R,
    offset: u64,
    config: CodecConfig,
    depth: usize,
}

impl<R: Read> Decoder<R> {
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, CodecConfig::default())
    }

    pub fn with_config(reader: R, config: CodecConfig) -> Self {
        Self {
            reader,
            offset: 0,
            config,
            depth: 0,
        }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.offset
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    fn map_io(&self, err: io::Error, needed: usize) -> WireError {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            WireError::TruncatedInput {
                offset: self.offset,
                needed,
            }
        } else {
            WireError::Io(err)
        }
    }

    fn advance(&mut self, n: usize) {
        self.offset += n as u64;
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        let v = self.reader.read_i8().map_err(|e| self.map_io(e, 1))?;
        self.advance(1);
        Ok(v)
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        let v = self
            .reader
            .read_i16::<BigEndian>()
            .map_err(|e| self.map_io(e, 2))?;
        self.advance(2);
        Ok(v)
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        let v = self
            .reader
            .read_i32::<BigEndian>()
            .map_err(|e| self.map_io(e, 4))?;
        self.advance(4);
        Ok(v)
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        let v = self
            .reader
            .read_i64::<BigEndian>()
            .map_err(|e| self.map_io(e, 8))?;
        self.advance(8);
        Ok(v)
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        let v = self
            .reader
            .read_f32::<BigEndian>()
            .map_err(|e| self.map_io(e, 4))?;
        self.advance(4);
        Ok(v)
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        let v = self
            .reader
            .read_f64::<BigEndian>()
            .map_err(|e| self.map_io(e, 8))?;
        self.advance(8);
        Ok(v)
    }

    /// Any non-zero byte is `true`.
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_byte()? != 0)
    }

    pub fn read_byte(&mut self) -> Result<u8> {
        let v = self.reader.read_u8().map_err(|e| self.map_io(e, 1))?;
        self.advance(1);
        Ok(v)
    }

    /// Read `len` bytes without trusting `len` for the up-front allocation.
    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(len.min(PREALLOC_LIMIT));
        let read = (&mut self.reader).take(len as u64).read_to_end(&mut buf);
        let got = read.map_err(|e| self.map_io(e, len))?;
        self.advance(got);
        if got < len {
            return Err(WireError::TruncatedInput {
                offset: self.offset,
                needed: len - got,
            });
        }
        Ok(buf)
    }

    /// `i32` length L >= 1, L - 1 UTF-8 bytes without NUL, one terminator
    /// (value ignored).
    pub fn read_string(&mut self) -> Result<String> {
        let start = self.offset;
        let len = self.read_i32()?;
        let content = usize::try_from(len)
            .ok()
            .and_then(|l| l.checked_sub(1))
            .filter(|&l| l <= self.config.max_string_len)
            .ok_or(WireError::InvalidLength {
                what: "string",
                length: i64::from(len),
                offset: start,
            })?;

        let content_offset = self.offset;
        let bytes = self.read_bytes(content)?;
        self.read_byte()?;
        if let Some(pos) = bytes.iter().position(|&b| b == STRING_TERMINATOR) {
            return Err(WireError::EmbeddedNul {
                offset: content_offset + pos as u64,
            });
        }
        String::from_utf8(bytes).map_err(|_| WireError::InvalidUtf8 {
            offset: content_offset,
        })
    }

    pub fn read_fingerprint(&mut self) -> Result<Fingerprint> {
        let mut bytes = [0u8; 8];
        self.reader
            .read_exact(&mut bytes)
            .map_err(|e| self.map_io(e, 8))?;
        self.advance(8);
        Ok(Fingerprint::from_bytes(bytes))
    }

    /// Read the leading fingerprint and check it against `schema`.
    pub fn expect_fingerprint(&mut self, schema: &MessageSchema) -> Result<()> {
        let expected = schema.fingerprint();
        let found = self.read_fingerprint()?;
        if found != expected {
            log::debug!(
                "[lcmwire] fingerprint mismatch for {}: expected {}, found {}",
                schema.name(),
                expected,
                found
            );
            return Err(WireError::FingerprintMismatch {
                schema: schema.name().to_string(),
                expected,
                found,
            });
        }
        Ok(())
    }

    /// Validate an array count just read against the configured limit.
    /// Errors point at the current offset.
    pub fn check_count(&self, count: i64) -> Result<usize> {
        self.check_count_at(count, self.offset)
    }

    /// Like [`check_count`](Self::check_count), for a count read at `offset`.
    pub fn check_count_at(&self, count: i64, offset: u64) -> Result<usize> {
        usize::try_from(count)
            .ok()
            .filter(|&n| n <= self.config.max_array_len)
            .ok_or(WireError::InvalidLength {
                what: "array",
                length: count,
                offset,
            })
    }

    /// Enter one message level.
    pub fn enter(&mut self) -> Result<()> {
        if self.depth >= self.config.max_depth {
            return Err(WireError::NestingTooDeep {
                limit: self.config.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Nested typed message: fields only, no fingerprint.
    pub fn read_message<M: Message>(&mut self) -> Result<M> {
        self.enter()?;
        log::trace!(
            "[lcmwire] decoding nested {} at offset {}",
            M::schema().name(),
            self.offset
        );
        let result = M::decode_fields(self);
        self.leave();
        result
    }
}
