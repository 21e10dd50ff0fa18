// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Shared schemas for integration tests, declared the way generated code
// declares them: process-wide statics linked through resolver refs.

#![allow(dead_code)]

use lcmwire::{MessageSchema, PrimitiveKind, SchemaBuilder, SchemaRef};
use std::sync::LazyLock;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

macro_rules! schema {
    ($name:ident, $build:expr) => {
        pub static $name: LazyLock<MessageSchema> =
            LazyLock::new(|| $build.build().expect(stringify!($name)));
    };
}

schema!(
    TIME,
    SchemaBuilder::new("std_msgs.Time")
        .field("sec", PrimitiveKind::I32)
        .field("nsec", PrimitiveKind::I32)
);

schema!(
    HEADER,
    SchemaBuilder::new("std_msgs.Header")
        .field("seq", PrimitiveKind::I32)
        .message_field("stamp", SchemaRef::lazy(|| &*TIME))
        .string_field("frame_id")
);

schema!(
    VECTOR3,
    SchemaBuilder::new("geometry_msgs.Vector3")
        .field("x", PrimitiveKind::F64)
        .field("y", PrimitiveKind::F64)
        .field("z", PrimitiveKind::F64)
);

schema!(
    POINT,
    SchemaBuilder::new("geometry_msgs.Point")
        .field("x", PrimitiveKind::F64)
        .field("y", PrimitiveKind::F64)
        .field("z", PrimitiveKind::F64)
);

schema!(
    QUATERNION,
    SchemaBuilder::new("geometry_msgs.Quaternion")
        .field("x", PrimitiveKind::F64)
        .field("y", PrimitiveKind::F64)
        .field("z", PrimitiveKind::F64)
        .field("w", PrimitiveKind::F64)
);

schema!(
    POSE,
    SchemaBuilder::new("geometry_msgs.Pose")
        .message_field("position", SchemaRef::lazy(|| &*POINT))
        .message_field("orientation", SchemaRef::lazy(|| &*QUATERNION))
);

schema!(
    POSE_WITH_COVARIANCE,
    SchemaBuilder::new("geometry_msgs.PoseWithCovariance")
        .message_field("pose", SchemaRef::lazy(|| &*POSE))
        .fixed_array("covariance", PrimitiveKind::F64, 36)
);

schema!(
    RANGE,
    SchemaBuilder::new("sensor_msgs.Range")
        .message_field("header", SchemaRef::lazy(|| &*HEADER))
        .field("radiation_type", PrimitiveKind::Byte)
        .field("field_of_view", PrimitiveKind::F32)
        .field("min_range", PrimitiveKind::F32)
        .field("max_range", PrimitiveKind::F32)
        .field("range", PrimitiveKind::F32)
        .constant("ULTRASOUND", PrimitiveKind::Byte, 0)
        .constant("INFRARED", PrimitiveKind::Byte, 1)
);

schema!(
    MULTI_ARRAY_DIMENSION,
    SchemaBuilder::new("std_msgs.MultiArrayDimension")
        .string_field("label")
        .field("size", PrimitiveKind::I32)
        .field("stride", PrimitiveKind::I32)
);

schema!(
    MULTI_ARRAY_LAYOUT,
    SchemaBuilder::new("std_msgs.MultiArrayLayout")
        .field("dim_length", PrimitiveKind::I32)
        .var_array("dim", SchemaRef::lazy(|| &*MULTI_ARRAY_DIMENSION), "dim_length")
        .field("data_offset", PrimitiveKind::I32)
);

schema!(
    BYTE_MULTI_ARRAY,
    SchemaBuilder::new("std_msgs.ByteMultiArray")
        .field("data_length", PrimitiveKind::I32)
        .message_field("layout", SchemaRef::lazy(|| &*MULTI_ARRAY_LAYOUT))
        .var_array("data", PrimitiveKind::I8, "data_length")
);

schema!(
    TREE,
    SchemaBuilder::new("test.Tree")
        .field("value", PrimitiveKind::I32)
        .field("children_length", PrimitiveKind::I32)
        .var_array("children", SchemaRef::lazy(|| &*TREE), "children_length")
);

schema!(
    PING,
    SchemaBuilder::new("test.Ping")
        .field("pongs_length", PrimitiveKind::I32)
        .var_array("pongs", SchemaRef::lazy(|| &*PONG), "pongs_length")
);

schema!(
    PONG,
    SchemaBuilder::new("test.Pong")
        .string_field("label")
        .field("pings_length", PrimitiveKind::I32)
        .var_array("pings", SchemaRef::lazy(|| &*PING), "pings_length")
);

schema!(
    FLAGS,
    SchemaBuilder::new("test.Flags")
        .field("enabled", PrimitiveKind::Bool)
        .field("mask", PrimitiveKind::Byte)
        .array_field(
            "levels",
            lcmwire::FieldKind::array(
                lcmwire::FieldKind::array(PrimitiveKind::I16, lcmwire::ArrayLen::Fixed(3)),
                lcmwire::ArrayLen::Fixed(2),
            ),
        )
);

/// Static handle to a fixture.
pub fn schema_ref(schema: &'static LazyLock<MessageSchema>) -> SchemaRef {
    SchemaRef::from(&**schema)
}
