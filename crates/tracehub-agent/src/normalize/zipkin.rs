// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Zipkin v1/v2 normalization. The thrift and protobuf variants are first
//! lifted into the JSON models so the actual field mapping exists once per
//! protocol version.

use std::collections::BTreeMap;
use std::net::{Ipv4Addr, Ipv6Addr};

use tracehub_proto::zipkin::{
    annotation_value, proto, thrift, Annotation, AnnotationV1, BinaryAnnotationV1, Endpoint,
    SpanV1, SpanV2,
};
use tracing::warn;

use crate::error::IngestError;
use crate::model::{NormalizedSpan, SpanStatus, SpanType};
use crate::normalize::{ZIPKIN_V1, ZIPKIN_V2};

/// Normalizes a decoded v1 span list (JSON or thrift, after
/// [`thrift_span_to_v1`]). A span without usable trace/span ids fails its
/// own inclusion and is skipped with a warning; the rest of the batch
/// survives.
pub fn normalize_v1_spans(
    spans: &[SpanV1],
    tags: &BTreeMap<String, String>,
) -> Vec<NormalizedSpan> {
    spans
        .iter()
        .filter_map(|span| {
            if span.trace_id.is_empty() || span.id.is_empty() {
                warn!("Skipping zipkin v1 span without trace/span id");
                return None;
            }
            Some(normalize_v1_span(span, tags))
        })
        .collect()
}

fn normalize_v1_span(span: &SpanV1, tags: &BTreeMap<String, String>) -> NormalizedSpan {
    let span_type = v1_span_type(span);
    let status = if span
        .binary_annotations
        .iter()
        .any(|annotation| annotation.key == "error")
    {
        SpanStatus::Err
    } else {
        SpanStatus::Ok
    };

    NormalizedSpan {
        trace_id: span.trace_id.clone(),
        span_id: span.id.clone(),
        parent_id: span.parent_id.clone().unwrap_or_default(),
        service: v1_service_name(span).unwrap_or_default(),
        operation: span.name.clone().unwrap_or_default(),
        endpoint: v1_peer(span).unwrap_or_default(),
        start: ZIPKIN_V1.scale(span.timestamp.unwrap_or_default()),
        duration: ZIPKIN_V1.scale(span.duration.unwrap_or_default()),
        span_type,
        status,
        content: serde_json::to_string(span).unwrap_or_default(),
        tags: tags.clone(),
    }
}

/// v1 spans carry their kind in core annotations: server-side annotations
/// mean the span entered this process, client-side ones mean it left.
fn v1_span_type(span: &SpanV1) -> SpanType {
    let mut span_type = SpanType::Local;
    for annotation in &span.annotations {
        match annotation.value.as_str() {
            annotation_value::SERVER_RECV | annotation_value::SERVER_SEND => {
                return SpanType::Entry;
            }
            annotation_value::CLIENT_SEND | annotation_value::CLIENT_RECV => {
                span_type = SpanType::Exit;
            }
            _ => {}
        }
    }
    span_type
}

fn v1_service_name(span: &SpanV1) -> Option<String> {
    span.annotations
        .iter()
        .filter_map(|annotation| annotation.endpoint.as_ref())
        .chain(
            span.binary_annotations
                .iter()
                .filter_map(|annotation| annotation.endpoint.as_ref()),
        )
        .find_map(|endpoint| endpoint.service_name.clone())
}

/// The "sa" (server address) binary annotation names the remote peer.
fn v1_peer(span: &SpanV1) -> Option<String> {
    span.binary_annotations
        .iter()
        .find(|annotation| annotation.key == "sa")
        .and_then(|annotation| annotation.endpoint.as_ref())
        .and_then(|endpoint| endpoint.ipv4.clone().or_else(|| endpoint.ipv6.clone()))
}

/// Lifts a decoded `zipkincore` thrift span into the v1 JSON model.
pub fn thrift_span_to_v1(span: &thrift::Span) -> SpanV1 {
    SpanV1 {
        trace_id: v1_id_string(span.trace_id_high, span.trace_id),
        id: format!("{:x}", span.id as u64),
        parent_id: span.parent_id.map(|id| format!("{:x}", id as u64)),
        name: if span.name.is_empty() {
            None
        } else {
            Some(span.name.clone())
        },
        timestamp: span.timestamp,
        duration: span.duration,
        debug: span.debug,
        annotations: span
            .annotations
            .iter()
            .map(|annotation| AnnotationV1 {
                timestamp: annotation.timestamp,
                value: annotation.value.clone(),
                endpoint: annotation.host.as_ref().map(thrift_endpoint),
            })
            .collect(),
        binary_annotations: span
            .binary_annotations
            .iter()
            .map(|annotation| BinaryAnnotationV1 {
                key: annotation.key.clone(),
                value: thrift_annotation_value(annotation),
                endpoint: annotation.host.as_ref().map(thrift_endpoint),
            })
            .collect(),
    }
}

fn v1_id_string(high: Option<i64>, low: i64) -> String {
    match high {
        Some(high) if high != 0 => format!("{:x}{:x}", high as u64, low as u64),
        _ => format!("{:x}", low as u64),
    }
}

fn thrift_endpoint(endpoint: &thrift::Endpoint) -> Endpoint {
    Endpoint {
        service_name: if endpoint.service_name.is_empty() {
            None
        } else {
            Some(endpoint.service_name.clone())
        },
        ipv4: Some(Ipv4Addr::from(endpoint.ipv4 as u32).to_string()),
        ipv6: None,
        port: Some(endpoint.port as u16),
    }
}

fn thrift_annotation_value(annotation: &thrift::BinaryAnnotation) -> Option<serde_json::Value> {
    match annotation.annotation_type {
        thrift::annotation_type::STRING => Some(serde_json::Value::String(
            String::from_utf8_lossy(&annotation.value).into_owned(),
        )),
        thrift::annotation_type::BOOL => Some(serde_json::Value::Bool(
            annotation.value.first().copied().unwrap_or_default() != 0,
        )),
        _ => None,
    }
}

/// Normalizes a decoded v2 span list (JSON or protobuf, after
/// [`proto_span_to_v2`]).
pub fn normalize_v2_spans(
    spans: &[SpanV2],
    tags: &BTreeMap<String, String>,
) -> Vec<NormalizedSpan> {
    spans
        .iter()
        .filter_map(|span| {
            if span.trace_id.is_empty() || span.id.is_empty() {
                warn!("Skipping zipkin v2 span without trace/span id");
                return None;
            }
            Some(normalize_v2_span(span, tags))
        })
        .collect()
}

fn normalize_v2_span(span: &SpanV2, tags: &BTreeMap<String, String>) -> NormalizedSpan {
    let status = if span.tags.contains_key("error") {
        SpanStatus::Err
    } else {
        SpanStatus::Ok
    };

    NormalizedSpan {
        trace_id: span.trace_id.clone(),
        span_id: span.id.clone(),
        parent_id: span.parent_id.clone().unwrap_or_default(),
        service: span
            .local_endpoint
            .as_ref()
            .and_then(|endpoint| endpoint.service_name.clone())
            .unwrap_or_default(),
        operation: span.name.clone().unwrap_or_default(),
        endpoint: span
            .remote_endpoint
            .as_ref()
            .and_then(|endpoint| endpoint.ipv4.clone().or_else(|| endpoint.ipv6.clone()))
            .unwrap_or_default(),
        start: ZIPKIN_V2.scale(span.timestamp.unwrap_or_default()),
        duration: ZIPKIN_V2.scale(span.duration.unwrap_or_default()),
        span_type: v2_span_type(span),
        status,
        content: serde_json::to_string(span).unwrap_or_default(),
        tags: tags.clone(),
    }
}

/// A span that demonstrably crossed a process boundary (a known kind or a
/// remote peer) is an Entry; everything else stays Local.
fn v2_span_type(span: &SpanV2) -> SpanType {
    let kind_known = span
        .kind
        .as_deref()
        .map(|kind| !kind.is_empty())
        .unwrap_or(false);
    if kind_known || span.remote_endpoint.is_some() {
        SpanType::Entry
    } else {
        SpanType::Local
    }
}

/// Lifts a protobuf v2 span into the JSON model, validating raw id lengths:
/// a span/parent id must be exactly 8 bytes and a trace id 8 or 16, anything
/// else fails the whole batch rather than being truncated or padded.
pub fn proto_span_to_v2(span: &proto::Span) -> Result<SpanV2, IngestError> {
    let trace_id = match span.trace_id.len() {
        8 | 16 => hex_string(&span.trace_id),
        len => {
            return Err(IngestError::Resolution {
                protocol: ZIPKIN_V2.source,
                reason: format!("trace id must be 8 or 16 bytes, got {len}"),
            });
        }
    };
    let id = require_id_bytes(&span.id, "span id")?;
    let parent_id = if span.parent_id.is_empty() {
        None
    } else {
        Some(require_id_bytes(&span.parent_id, "parent id")?)
    };

    let kind = proto::span::Kind::try_from(span.kind)
        .ok()
        .filter(|kind| *kind != proto::span::Kind::SpanKindUnspecified)
        .map(|kind| kind.as_str_name().to_string());

    Ok(SpanV2 {
        trace_id,
        parent_id,
        id,
        kind,
        name: if span.name.is_empty() {
            None
        } else {
            Some(span.name.clone())
        },
        timestamp: Some(span.timestamp as i64),
        duration: Some(span.duration as i64),
        debug: Some(span.debug),
        shared: Some(span.shared),
        local_endpoint: span.local_endpoint.as_ref().map(proto_endpoint),
        remote_endpoint: span.remote_endpoint.as_ref().map(proto_endpoint),
        annotations: span
            .annotations
            .iter()
            .map(|annotation| Annotation {
                timestamp: annotation.timestamp as i64,
                value: annotation.value.clone(),
            })
            .collect(),
        tags: span
            .tags
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect(),
    })
}

fn require_id_bytes(bytes: &[u8], what: &str) -> Result<String, IngestError> {
    if bytes.len() != 8 {
        return Err(IngestError::Resolution {
            protocol: ZIPKIN_V2.source,
            reason: format!("{what} must be exactly 8 bytes, got {}", bytes.len()),
        });
    }
    Ok(hex_string(bytes))
}

fn hex_string(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

fn proto_endpoint(endpoint: &proto::Endpoint) -> Endpoint {
    let ipv4: Option<[u8; 4]> = endpoint.ipv4.as_slice().try_into().ok();
    let ipv6: Option<[u8; 16]> = endpoint.ipv6.as_slice().try_into().ok();
    Endpoint {
        service_name: if endpoint.service_name.is_empty() {
            None
        } else {
            Some(endpoint.service_name.clone())
        },
        ipv4: ipv4.map(|octets| Ipv4Addr::from(octets).to_string()),
        ipv6: ipv6.map(|octets| Ipv6Addr::from(octets).to_string()),
        port: Some(endpoint.port as u16),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn v2_local_endpoint_only_is_local() {
        let span = SpanV2 {
            trace_id: "2a".to_string(),
            id: "7".to_string(),
            local_endpoint: Some(Endpoint {
                service_name: Some("front".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let spans = normalize_v2_spans(&[span], &BTreeMap::new());
        assert_eq!(spans[0].span_type, SpanType::Local);
        assert_eq!(spans[0].service, "front");
    }

    #[test]
    fn v2_remote_endpoint_is_entry() {
        let span = SpanV2 {
            trace_id: "2a".to_string(),
            id: "7".to_string(),
            remote_endpoint: Some(Endpoint {
                ipv4: Some("10.0.0.5".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let spans = normalize_v2_spans(&[span], &BTreeMap::new());
        assert_eq!(spans[0].span_type, SpanType::Entry);
        assert_eq!(spans[0].endpoint, "10.0.0.5");
    }

    #[test]
    fn v2_known_kind_is_entry() {
        let span = SpanV2 {
            trace_id: "2a".to_string(),
            id: "7".to_string(),
            kind: Some("SERVER".to_string()),
            ..Default::default()
        };
        let spans = normalize_v2_spans(&[span], &BTreeMap::new());
        assert_eq!(spans[0].span_type, SpanType::Entry);
    }

    #[test]
    fn v2_timestamps_already_microseconds() {
        let span = SpanV2 {
            trace_id: "2a".to_string(),
            id: "7".to_string(),
            timestamp: Some(1_000_000),
            duration: Some(1_500),
            ..Default::default()
        };
        let spans = normalize_v2_spans(&[span], &BTreeMap::new());
        assert_eq!(spans[0].start, 1_000_000);
        assert_eq!(spans[0].duration, 1_500);
    }

    #[test]
    fn v2_error_tag_sets_status() {
        let span = SpanV2 {
            trace_id: "2a".to_string(),
            id: "7".to_string(),
            tags: BTreeMap::from([("error".to_string(), "true".to_string())]),
            ..Default::default()
        };
        let spans = normalize_v2_spans(&[span], &BTreeMap::new());
        assert_eq!(spans[0].status, SpanStatus::Err);
    }

    #[test]
    fn v2_span_without_id_is_skipped() {
        let span = SpanV2 {
            trace_id: "2a".to_string(),
            ..Default::default()
        };
        assert!(normalize_v2_spans(&[span], &BTreeMap::new()).is_empty());
    }

    #[test]
    fn proto_ids_render_as_hex() {
        let span = proto::Span {
            trace_id: vec![0, 0, 0, 0, 0, 0, 0, 0x2a],
            id: vec![0, 0, 0, 0, 0, 0, 0, 7],
            parent_id: vec![],
            kind: proto::span::Kind::Server as i32,
            name: "get".to_string(),
            ..Default::default()
        };
        let converted = proto_span_to_v2(&span).unwrap();
        assert_eq!(converted.trace_id, "000000000000002a");
        assert_eq!(converted.id, "0000000000000007");
        assert_eq!(converted.parent_id, None);
        assert_eq!(converted.kind.as_deref(), Some("SERVER"));
    }

    #[test]
    fn proto_bad_id_length_is_an_error() {
        let span = proto::Span {
            trace_id: vec![0, 0, 0, 0, 0, 0, 0, 0x2a],
            id: vec![1, 2, 3],
            ..Default::default()
        };
        let err = proto_span_to_v2(&span).unwrap_err();
        assert!(matches!(err, IngestError::Resolution { .. }));
    }

    #[test]
    fn proto_bad_trace_id_length_is_an_error() {
        let span = proto::Span {
            trace_id: vec![1, 2, 3, 4],
            id: vec![0, 0, 0, 0, 0, 0, 0, 7],
            ..Default::default()
        };
        assert!(proto_span_to_v2(&span).is_err());
    }

    #[test]
    fn v1_server_annotations_make_entry() {
        let span = SpanV1 {
            trace_id: "2a".to_string(),
            id: "7".to_string(),
            annotations: vec![AnnotationV1 {
                timestamp: 1,
                value: "sr".to_string(),
                endpoint: Some(Endpoint {
                    service_name: Some("front".to_string()),
                    ..Default::default()
                }),
            }],
            ..Default::default()
        };
        let spans = normalize_v1_spans(&[span], &BTreeMap::new());
        assert_eq!(spans[0].span_type, SpanType::Entry);
        assert_eq!(spans[0].service, "front");
    }

    #[test]
    fn v1_client_annotations_make_exit() {
        let span = SpanV1 {
            trace_id: "2a".to_string(),
            id: "7".to_string(),
            annotations: vec![AnnotationV1 {
                timestamp: 1,
                value: "cs".to_string(),
                endpoint: None,
            }],
            ..Default::default()
        };
        let spans = normalize_v1_spans(&[span], &BTreeMap::new());
        assert_eq!(spans[0].span_type, SpanType::Exit);
    }

    #[test]
    fn v1_timestamps_scaled_to_microseconds() {
        let span = SpanV1 {
            trace_id: "2a".to_string(),
            id: "7".to_string(),
            timestamp: Some(1_000),
            duration: Some(25),
            ..Default::default()
        };
        let spans = normalize_v1_spans(&[span], &BTreeMap::new());
        assert_eq!(spans[0].start, 1_000_000);
        assert_eq!(spans[0].duration, 25_000);
    }

    #[test]
    fn thrift_span_lifts_into_v1_model() {
        let span = thrift::Span {
            trace_id: 0x2a,
            name: "get".to_string(),
            id: 7,
            parent_id: Some(3),
            annotations: vec![thrift::Annotation {
                timestamp: 5,
                value: "sr".to_string(),
                host: Some(thrift::Endpoint {
                    ipv4: 0x7f000001,
                    port: 80,
                    service_name: "front".to_string(),
                    ipv6: None,
                }),
            }],
            binary_annotations: vec![thrift::BinaryAnnotation {
                key: "error".to_string(),
                value: b"true".to_vec(),
                annotation_type: thrift::annotation_type::STRING,
                host: None,
            }],
            ..Default::default()
        };
        let lifted = thrift_span_to_v1(&span);
        assert_eq!(lifted.trace_id, "2a");
        assert_eq!(lifted.id, "7");
        assert_eq!(lifted.parent_id.as_deref(), Some("3"));
        assert_eq!(
            lifted.annotations[0]
                .endpoint
                .as_ref()
                .unwrap()
                .ipv4
                .as_deref(),
            Some("127.0.0.1")
        );
        let spans = normalize_v1_spans(&[lifted], &BTreeMap::new());
        assert_eq!(spans[0].status, SpanStatus::Err);
        assert_eq!(spans[0].span_type, SpanType::Entry);
    }
}
