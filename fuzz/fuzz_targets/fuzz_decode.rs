// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use lcmwire::{CodecConfig, MessageInstance, MessageSchema, PrimitiveKind, SchemaBuilder, SchemaRef};
use libfuzzer_sys::fuzz_target;
use std::sync::LazyLock;

static NODE: LazyLock<MessageSchema> = LazyLock::new(|| {
    SchemaBuilder::new("fuzz.Node")
        .field("flags", PrimitiveKind::Byte)
        .string_field("name")
        .fixed_array("weights", PrimitiveKind::F32, 3)
        .field("enabled", PrimitiveKind::Bool)
        .field("data_length", PrimitiveKind::I16)
        .var_array("data", PrimitiveKind::I64, "data_length")
        .field("children_length", PrimitiveKind::I8)
        .var_array("children", SchemaRef::lazy(|| &*NODE), "children_length")
        .build()
        .expect("fuzz schema")
});

const CONFIG: CodecConfig = CodecConfig {
    max_string_len: 1 << 16,
    max_array_len: 1 << 12,
    max_depth: 16,
};

fuzz_target!(|data: &[u8]| {
    // Raw input (almost always a fingerprint mismatch)
    let _ = MessageInstance::decode_with(&*NODE, data, CONFIG);

    // Same input behind a valid fingerprint, to reach the field decoder
    let mut framed = NODE.fingerprint().to_bytes().to_vec();
    framed.extend_from_slice(data);
    let Ok(message) = MessageInstance::decode_with(&*NODE, &framed[..], CONFIG) else {
        return;
    };
    let bytes = message.encode_to_vec().expect("decoded message re-encodes");
    assert_eq!(bytes.len(), message.encoded_size());
    let again = MessageInstance::decode_with(&*NODE, &bytes[..], CONFIG).expect("re-decodes");
    assert_eq!(again, message);
});
