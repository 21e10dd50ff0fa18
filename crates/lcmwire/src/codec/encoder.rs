// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Big-endian primitive writer.

use crate::config::STRING_TERMINATOR;
use crate::error::{Result, WireError};
use crate::fingerprint::Fingerprint;
use crate::message::Message;
use byteorder::{BigEndian, WriteBytesExt};
use std::io::Write;

/// Writes wire primitives to a byte sink, tracking the byte offset.
///
/// Output is streamed: on error the sink may already hold a prefix of the
/// message, which the caller must discard.
#[derive(Debug)]
pub struct Encoder<W> {
    writer: W,
    offset: u64,
}

impl<W: Write> Encoder<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, offset: 0 }
    }

    /// Bytes written so far.
    pub fn position(&self) -> u64 {
        self.offset
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn advance(&mut self, n: usize) {
        self.offset += n as u64;
    }

    pub fn write_i8(&mut self, v: i8) -> Result<()> {
        self.writer.write_i8(v)?;
        self.advance(1);
        Ok(())
    }

    pub fn write_i16(&mut self, v: i16) -> Result<()> {
        self.writer.write_i16::<BigEndian>(v)?;
        self.advance(2);
        Ok(())
    }

    pub fn write_i32(&mut self, v: i32) -> Result<()> {
        self.writer.write_i32::<BigEndian>(v)?;
        self.advance(4);
        Ok(())
    }

    pub fn write_i64(&mut self, v: i64) -> Result<()> {
        self.writer.write_i64::<BigEndian>(v)?;
        self.advance(8);
        Ok(())
    }

    pub fn write_f32(&mut self, v: f32) -> Result<()> {
        self.writer.write_f32::<BigEndian>(v)?;
        self.advance(4);
        Ok(())
    }

    pub fn write_f64(&mut self, v: f64) -> Result<()> {
        self.writer.write_f64::<BigEndian>(v)?;
        self.advance(8);
        Ok(())
    }

    /// Always 0 or 1.
    pub fn write_bool(&mut self, v: bool) -> Result<()> {
        self.write_byte(u8::from(v))
    }

    pub fn write_byte(&mut self, v: u8) -> Result<()> {
        self.writer.write_u8(v)?;
        self.advance(1);
        Ok(())
    }

    /// `i32` length (content + terminator), content, terminator.
    pub fn write_string(&mut self, s: &str) -> Result<()> {
        let bytes = s.as_bytes();
        if let Some(pos) = bytes.iter().position(|&b| b == STRING_TERMINATOR) {
            return Err(WireError::EmbeddedNul {
                offset: self.offset + 4 + pos as u64,
            });
        }
        let len = i32::try_from(bytes.len() + 1).map_err(|_| WireError::InvalidLength {
            what: "string",
            length: bytes.len() as i64,
            offset: self.offset,
        })?;

        self.write_i32(len)?;
        self.writer.write_all(bytes)?;
        self.advance(bytes.len());
        self.write_byte(STRING_TERMINATOR)
    }

    pub fn write_fingerprint(&mut self, fp: Fingerprint) -> Result<()> {
        self.writer.write_all(&fp.to_bytes())?;
        self.advance(8);
        Ok(())
    }

    /// Nested typed message: fields only, no fingerprint.
    pub fn write_message<M: Message>(&mut self, message: &M) -> Result<()> {
        message.encode_fields(self)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
