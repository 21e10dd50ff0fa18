// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Hand-written typed messages sharing the wire engine with dynamic
// instances: both paths must produce identical bytes.

mod common;

use common::*;
use lcmwire::{
    CodecConfig, Decoder, Encoder, Message, MessageInstance, MessageSchema, Value, WireError,
};
use std::io::{Read, Write};

#[derive(Debug, Clone, Default, PartialEq)]
struct Time {
    sec: i32,
    nsec: i32,
}

impl Message for Time {
    fn schema() -> &'static MessageSchema {
        &TIME
    }

    fn encode_fields<W: Write>(&self, enc: &mut Encoder<W>) -> lcmwire::Result<()> {
        enc.write_i32(self.sec)?;
        enc.write_i32(self.nsec)
    }

    fn decode_fields<R: Read>(dec: &mut Decoder<R>) -> lcmwire::Result<Self> {
        Ok(Self {
            sec: dec.read_i32()?,
            nsec: dec.read_i32()?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Header {
    seq: i32,
    stamp: Time,
    frame_id: String,
}

impl Message for Header {
    fn schema() -> &'static MessageSchema {
        &HEADER
    }

    fn encode_fields<W: Write>(&self, enc: &mut Encoder<W>) -> lcmwire::Result<()> {
        enc.write_i32(self.seq)?;
        enc.write_message(&self.stamp)?;
        enc.write_string(&self.frame_id)
    }

    fn decode_fields<R: Read>(dec: &mut Decoder<R>) -> lcmwire::Result<Self> {
        Ok(Self {
            seq: dec.read_i32()?,
            stamp: dec.read_message()?,
            frame_id: dec.read_string()?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Tree {
    value: i32,
    children: Vec<Tree>,
}

impl Message for Tree {
    fn schema() -> &'static MessageSchema {
        &TREE
    }

    fn encode_fields<W: Write>(&self, enc: &mut Encoder<W>) -> lcmwire::Result<()> {
        let count = i32::try_from(self.children.len()).map_err(|_| WireError::InvalidLength {
            what: "array",
            length: self.children.len() as i64,
            offset: enc.position(),
        })?;
        enc.write_i32(self.value)?;
        enc.write_i32(count)?;
        for child in &self.children {
            enc.write_message(child)?;
        }
        Ok(())
    }

    fn decode_fields<R: Read>(dec: &mut Decoder<R>) -> lcmwire::Result<Self> {
        let value = dec.read_i32()?;
        let count = dec.read_i32()?;
        let count = dec.check_count(i64::from(count))?;
        let children = (0..count)
            .map(|_| dec.read_message())
            .collect::<lcmwire::Result<_>>()?;
        Ok(Self { value, children })
    }
}

fn sample_tree() -> Tree {
    Tree {
        value: 1,
        children: vec![
            Tree {
                value: 2,
                children: Vec::new(),
            },
            Tree {
                value: 3,
                children: vec![Tree {
                    value: 4,
                    children: Vec::new(),
                }],
            },
        ],
    }
}

fn dynamic_tree(tree: &Tree) -> MessageInstance {
    let mut m = MessageInstance::new(schema_ref(&TREE));
    m.set("value", tree.value).unwrap();
    m.set_sequence(
        "children",
        tree.children
            .iter()
            .map(|c| Value::from(dynamic_tree(c)))
            .collect(),
    )
    .unwrap();
    m
}

#[test]
fn test_typed_fingerprint_is_schema_fingerprint() {
    assert_eq!(Time::fingerprint(), TIME.fingerprint());
    assert_eq!(Header::fingerprint(), HEADER.fingerprint());
}

#[test]
fn test_typed_and_dynamic_bytes_agree() {
    init_logging();
    let typed = Header {
        seq: 7,
        stamp: Time { sec: 1, nsec: 2 },
        frame_id: "map".into(),
    };
    let bytes = typed.encode_to_vec().unwrap();

    let dynamic = MessageInstance::decode_from_slice(schema_ref(&HEADER), &bytes).unwrap();
    assert_eq!(dynamic.get_as::<i32>("seq").unwrap(), 7);
    assert_eq!(dynamic.get_as::<String>("frame_id").unwrap(), "map");
    assert_eq!(dynamic.encode_to_vec().unwrap(), bytes);

    assert_eq!(Header::decode_from_slice(&bytes).unwrap(), typed);
}

#[test]
fn test_typed_default_matches_dynamic_default() {
    let typed = Header::default().encode_to_vec().unwrap();
    let dynamic = MessageInstance::new(schema_ref(&HEADER))
        .encode_to_vec()
        .unwrap();
    assert_eq!(typed, dynamic);
}

#[test]
fn test_recursive_typed_message() {
    let tree = sample_tree();
    let bytes = tree.encode_to_vec().unwrap();
    assert_eq!(bytes, dynamic_tree(&tree).encode_to_vec().unwrap());
    assert_eq!(Tree::decode_from_slice(&bytes).unwrap(), tree);
}

#[test]
fn test_recursion_depth_limit() {
    let mut tree = Tree::default();
    for value in 0..10 {
        tree = Tree {
            value,
            children: vec![tree],
        };
    }
    let bytes = tree.encode_to_vec().unwrap();
    let config = CodecConfig {
        max_depth: 4,
        ..CodecConfig::default()
    };
    assert!(matches!(
        Tree::decode_with(&bytes[..], config),
        Err(WireError::NestingTooDeep { limit: 4 })
    ));
    assert!(matches!(
        MessageInstance::decode_with(schema_ref(&TREE), &bytes[..], config),
        Err(WireError::NestingTooDeep { limit: 4 })
    ));
    assert_eq!(Tree::decode_from_slice(&bytes).unwrap(), tree);
}

#[test]
fn test_typed_cross_type_rejection() {
    let bytes = Time { sec: 5, nsec: 6 }.encode_to_vec().unwrap();
    assert!(matches!(
        Header::decode_from_slice(&bytes),
        Err(WireError::FingerprintMismatch { .. })
    ));
}

#[test]
fn test_typed_clone_is_independent() {
    let original = sample_tree();
    let mut copy = original.clone();
    copy.children[1].children[0].value = 40;
    assert_eq!(original.children[1].children[0].value, 4);
}
