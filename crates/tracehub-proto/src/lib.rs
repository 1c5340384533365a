// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Wire-format models for every protocol the tracehub receivers terminate.
//!
//! Protobuf messages are committed as prost/tonic generated-style sources so
//! no protoc toolchain is needed at build time. Thrift models carry explicit
//! `read_from_in_protocol`/`write_to_out_protocol` implementations over the
//! `thrift` crate. JSON-facing models derive `serde` directly.

pub mod jaeger;
pub mod skywalking;
pub mod zipkin;
