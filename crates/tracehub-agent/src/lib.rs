// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Multi-protocol trace ingestion: receivers for the Jaeger, Zipkin and
//! SkyWalking client protocols, a shared span normalizer, deterministic
//! sampling and a batching sink that forwards normalized spans downstream.

pub mod config;
pub mod error;
pub mod http_utils;
pub mod metrics;
pub mod model;
pub mod normalize;
pub mod receiver;
pub mod registry;
pub mod sampler;
pub mod sink;
