// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! SkyWalking v2/v3 normalization.
//!
//! Span ids are the segment id concatenated with the numeric span id (string
//! concatenation, not arithmetic). An Entry span consumes its first
//! cross-process reference as the parent; everything else falls back to the
//! same-segment parent, and a parent span id of `-1` marks the segment root.
//! v2 additionally resolves interned service/operation/peer ids through the
//! injected registration store; a lookup miss fails the whole batch.

use std::collections::BTreeMap;

use prost::Message;
use tracehub_proto::skywalking::{v2, v3};

use crate::error::IngestError;
use crate::model::{NormalizedSpan, SpanStatus, SpanType};
use crate::normalize::SKYWALKING;
use crate::registry::{RegistrationStore, RegistryTable};

pub fn normalize_v3_segment(
    segment: &v3::SegmentObject,
    tags: &BTreeMap<String, String>,
) -> Result<Vec<NormalizedSpan>, IngestError> {
    if segment.trace_id.is_empty() || segment.trace_segment_id.is_empty() {
        return Err(IngestError::Resolution {
            protocol: SKYWALKING.source,
            reason: "segment without trace id or segment id".to_string(),
        });
    }
    Ok(segment
        .spans
        .iter()
        .map(|span| {
            let parent_id = v3_parent_id(segment, span);
            NormalizedSpan {
                trace_id: segment.trace_id.clone(),
                span_id: concat_id(&segment.trace_segment_id, span.span_id),
                parent_id,
                service: segment.service.clone(),
                operation: span.operation_name.clone(),
                endpoint: span.peer.clone(),
                start: SKYWALKING.scale(span.start_time),
                duration: SKYWALKING.scale(span.end_time - span.start_time),
                span_type: span_type(span.span_type()),
                status: error_status(span.is_error),
                content: serde_json::to_string(span).unwrap_or_default(),
                tags: tags.clone(),
            }
        })
        .collect())
}

fn v3_parent_id(segment: &v3::SegmentObject, span: &v3::SpanObject) -> String {
    if span.span_type() == v3::SpanType::Entry {
        if let Some(reference) = span.refs.first() {
            return concat_id(&reference.parent_trace_segment_id, reference.parent_span_id);
        }
    }
    if span.parent_span_id == -1 {
        return String::new();
    }
    concat_id(&segment.trace_segment_id, span.parent_span_id)
}

/// Decodes the nested segment of a v2 upstream message and normalizes it,
/// resolving interned ids through the registration store.
pub fn normalize_v2_segment(
    upstream: &v2::UpstreamSegment,
    registry: &dyn RegistrationStore,
    tags: &BTreeMap<String, String>,
) -> Result<Vec<NormalizedSpan>, IngestError> {
    let segment = v2::SegmentObject::decode(upstream.segment.as_slice()).map_err(|err| {
        IngestError::Decode {
            protocol: SKYWALKING.source,
            reason: format!("nested segment: {err}"),
        }
    })?;

    let trace_id = upstream
        .global_trace_ids
        .first()
        .map(unique_id_string)
        .ok_or_else(|| IngestError::Resolution {
            protocol: SKYWALKING.source,
            reason: "upstream segment without global trace id".to_string(),
        })?;
    let segment_id = segment
        .trace_segment_id
        .as_ref()
        .map(unique_id_string)
        .ok_or_else(|| IngestError::Resolution {
            protocol: SKYWALKING.source,
            reason: "upstream segment without segment id".to_string(),
        })?;

    let service = registry
        .lookup_name(RegistryTable::Service, segment.service_id)
        .ok_or_else(|| IngestError::Resolution {
            protocol: SKYWALKING.source,
            reason: format!("unregistered service id {}", segment.service_id),
        })?;

    let mut spans = Vec::with_capacity(segment.spans.len());
    for span in &segment.spans {
        let operation = v2_operation_name(registry, span)?;
        let peer = v2_peer(registry, span)?;
        spans.push(NormalizedSpan {
            trace_id: trace_id.clone(),
            span_id: concat_id(&segment_id, span.span_id),
            parent_id: v2_parent_id(&segment_id, span),
            service: service.clone(),
            operation,
            endpoint: peer,
            start: SKYWALKING.scale(span.start_time),
            duration: SKYWALKING.scale(span.end_time - span.start_time),
            span_type: span_type_v2(span.span_type()),
            status: error_status(span.is_error),
            content: serde_json::to_string(span).unwrap_or_default(),
            tags: tags.clone(),
        });
    }
    Ok(spans)
}

fn v2_parent_id(segment_id: &str, span: &v2::SpanObjectV2) -> String {
    if span.span_type() == v2::SpanType::Entry {
        if let Some(reference) = span.refs.first() {
            if let Some(parent_segment) = reference.parent_trace_segment_id.as_ref() {
                return concat_id(&unique_id_string(parent_segment), reference.parent_span_id);
            }
        }
    }
    if span.parent_span_id == -1 {
        return String::new();
    }
    concat_id(segment_id, span.parent_span_id)
}

fn v2_operation_name(
    registry: &dyn RegistrationStore,
    span: &v2::SpanObjectV2,
) -> Result<String, IngestError> {
    if !span.operation_name.is_empty() {
        return Ok(span.operation_name.clone());
    }
    registry
        .lookup_name(RegistryTable::Endpoint, span.operation_name_id)
        .ok_or_else(|| IngestError::Resolution {
            protocol: SKYWALKING.source,
            reason: format!("unregistered endpoint id {}", span.operation_name_id),
        })
}

fn v2_peer(registry: &dyn RegistrationStore, span: &v2::SpanObjectV2) -> Result<String, IngestError> {
    if !span.peer.is_empty() {
        return Ok(span.peer.clone());
    }
    if span.peer_id == 0 {
        return Ok(String::new());
    }
    registry
        .lookup_name(RegistryTable::NetAddress, span.peer_id)
        .ok_or_else(|| IngestError::Resolution {
            protocol: SKYWALKING.source,
            reason: format!("unregistered network address id {}", span.peer_id),
        })
}

/// `"segment" + 3 → "segment3"`: the protocol's span ids are only unique
/// within a segment, so the rendered id carries the segment id prefix.
fn concat_id(segment_id: &str, span_id: i32) -> String {
    format!("{segment_id}{span_id}")
}

/// v2 segment/trace ids are triples of numbers, rendered dot-joined.
pub fn unique_id_string(id: &v2::UniqueId) -> String {
    id.id_parts
        .iter()
        .map(|part| part.to_string())
        .collect::<Vec<String>>()
        .join(".")
}

fn span_type(value: v3::SpanType) -> SpanType {
    match value {
        v3::SpanType::Entry => SpanType::Entry,
        v3::SpanType::Exit => SpanType::Exit,
        v3::SpanType::Local => SpanType::Local,
    }
}

fn span_type_v2(value: v2::SpanType) -> SpanType {
    match value {
        v2::SpanType::Entry => SpanType::Entry,
        v2::SpanType::Exit => SpanType::Exit,
        v2::SpanType::Local => SpanType::Local,
    }
}

fn error_status(is_error: bool) -> SpanStatus {
    if is_error {
        SpanStatus::Err
    } else {
        SpanStatus::Ok
    }
}
