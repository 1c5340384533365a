// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use tracehub_proto::jaeger::{Batch, Span};

use crate::model::{NormalizedSpan, SpanStatus, SpanType};
use crate::normalize::JAEGER;

/// Converts a decoded Jaeger batch (HTTP collector or UDP agent, the model
/// is shared) into normalized spans. The whole batch carries one process, so
/// every span inherits its service name; trace ids are rendered in hex, span
/// ids in decimal, and a zero parent id marks the root.
pub fn normalize_batch(batch: &Batch, tags: &BTreeMap<String, String>) -> Vec<NormalizedSpan> {
    batch
        .spans
        .iter()
        .map(|span| normalize_span(span, &batch.process.service_name, tags))
        .collect()
}

fn normalize_span(span: &Span, service: &str, tags: &BTreeMap<String, String>) -> NormalizedSpan {
    let parent_id = if span.parent_span_id == 0 {
        String::new()
    } else {
        span.parent_span_id.to_string()
    };
    let span_type = if parent_id.is_empty() {
        SpanType::Entry
    } else {
        SpanType::Local
    };
    let status = if has_error_tag(span) {
        SpanStatus::Err
    } else {
        SpanStatus::Ok
    };

    NormalizedSpan {
        trace_id: trace_id_string(span.trace_id_high, span.trace_id_low),
        span_id: span.span_id.to_string(),
        parent_id,
        service: service.to_string(),
        operation: span.operation_name.clone(),
        endpoint: String::new(),
        start: JAEGER.scale(span.start_time),
        duration: JAEGER.scale(span.duration),
        span_type,
        status,
        content: serde_json::to_string(span).unwrap_or_default(),
        tags: tags.clone(),
    }
}

fn trace_id_string(high: i64, low: i64) -> String {
    if high == 0 {
        format!("{:x}", low as u64)
    } else {
        format!("{:x}{:x}", high as u64, low as u64)
    }
}

fn has_error_tag(span: &Span) -> bool {
    span.tags
        .as_deref()
        .unwrap_or_default()
        .iter()
        .any(|tag| tag.key == "error")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracehub_proto::jaeger::{Process, Tag};

    fn batch_with_span(span: Span) -> Batch {
        Batch {
            process: Process {
                service_name: "billing".to_string(),
                tags: None,
            },
            spans: vec![span],
        }
    }

    #[test]
    fn root_span_scaling_and_ids() {
        let batch = batch_with_span(Span {
            trace_id_low: 42,
            trace_id_high: 0,
            span_id: 7,
            parent_span_id: 0,
            operation_name: "GET /invoice".to_string(),
            start_time: 1_000_000,
            duration: 1_500,
            ..Default::default()
        });
        let spans = normalize_batch(&batch, &BTreeMap::new());
        assert_eq!(spans.len(), 1);
        let span = &spans[0];
        assert_eq!(span.trace_id, "2a");
        assert_eq!(span.span_id, "7");
        assert_eq!(span.parent_id, "");
        assert_eq!(span.start, 1_000_000_000);
        assert_eq!(span.duration, 1_500_000);
        assert_eq!(span.span_type, SpanType::Entry);
        assert_eq!(span.status, SpanStatus::Ok);
        assert_eq!(span.service, "billing");
        assert!(span.content.contains("GET /invoice"));
    }

    #[test]
    fn high_bits_are_concatenated() {
        let batch = batch_with_span(Span {
            trace_id_low: 0xff,
            trace_id_high: 0x1,
            span_id: 2,
            parent_span_id: 1,
            operation_name: "child".to_string(),
            ..Default::default()
        });
        let spans = normalize_batch(&batch, &BTreeMap::new());
        assert_eq!(spans[0].trace_id, "1ff");
        assert_eq!(spans[0].parent_id, "1");
        assert_eq!(spans[0].span_type, SpanType::Local);
    }

    #[test]
    fn error_tag_presence_marks_status() {
        let batch = batch_with_span(Span {
            trace_id_low: 1,
            span_id: 1,
            operation_name: "op".to_string(),
            tags: Some(vec![Tag::boolean("error", true)]),
            ..Default::default()
        });
        let spans = normalize_batch(&batch, &BTreeMap::new());
        assert_eq!(spans[0].status, SpanStatus::Err);
    }

    #[test]
    fn normalization_is_idempotent() {
        let batch = batch_with_span(Span {
            trace_id_low: 42,
            span_id: 7,
            operation_name: "op".to_string(),
            ..Default::default()
        });
        let first = normalize_batch(&batch, &BTreeMap::new());
        let second = normalize_batch(&batch, &BTreeMap::new());
        assert_eq!(first, second);
    }

    #[test]
    fn static_tags_are_merged() {
        let tags = BTreeMap::from([("env".to_string(), "prod".to_string())]);
        let batch = batch_with_span(Span {
            trace_id_low: 1,
            span_id: 1,
            operation_name: "op".to_string(),
            ..Default::default()
        });
        let spans = normalize_batch(&batch, &tags);
        assert_eq!(spans[0].tags.get("env").map(String::as_str), Some("prod"));
    }
}
