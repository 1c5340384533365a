// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! The canonical span model every receiver normalizes into.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpanType {
    /// Crossed a process boundary inbound.
    Entry,
    /// Stayed inside the process.
    #[default]
    Local,
    /// Crossed a process boundary outbound.
    Exit,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpanStatus {
    #[default]
    Ok,
    Err,
}

/// A normalized span. `start` and `duration` are on the microsecond contract:
/// the per-protocol multiplier from [`crate::normalize`] has been applied to
/// the source value exactly once, with no clamping of negative or
/// out-of-order inputs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSpan {
    pub trace_id: String,
    pub span_id: String,
    /// Empty for root spans.
    pub parent_id: String,
    pub service: String,
    pub operation: String,
    /// Peer address, where the protocol carries one.
    pub endpoint: String,
    pub start: i64,
    pub duration: i64,
    pub span_type: SpanType,
    pub status: SpanStatus,
    /// Full JSON serialization of the decoded source span, retained verbatim
    /// for audit and debugging.
    pub content: String,
    /// Static per-receiver tags from operator configuration.
    pub tags: BTreeMap<String, String>,
}

/// All spans decoded from one protocol message, in source order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpanBatch {
    /// Protocol label, e.g. `"jaeger"`.
    pub source: String,
    pub spans: Vec<NormalizedSpan>,
}

impl SpanBatch {
    pub fn new(source: &str, spans: Vec<NormalizedSpan>) -> SpanBatch {
        SpanBatch {
            source: source.to_string(),
            spans,
        }
    }
}
