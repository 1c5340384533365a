// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Protocol receivers. Each runs as an independent listener task wired to a
//! process-wide cancellation token; all of them funnel normalized spans
//! through [`forward_spans`] so sampling, drop accounting and sink
//! submission behave identically across protocols.

pub mod jaeger;
pub mod skywalking_grpc;
pub mod skywalking_http;
pub mod zipkin;

mod http;

pub(crate) use http::serve_http;

use tracing::{debug, error};

use crate::config::Config;
use crate::metrics::IngestMetrics;
use crate::model::{NormalizedSpan, SpanBatch};
use crate::sink::Sink;

/// Samples and submits one normalized batch. An empty batch is dropped
/// silently; a sink failure is logged and counted but never propagated back
/// to the wire client.
pub(crate) async fn forward_spans(
    source: &'static str,
    spans: Vec<NormalizedSpan>,
    config: &Config,
    sink: &dyn Sink,
    metrics: &IngestMetrics,
) {
    metrics.add_spans(spans.len());
    if spans.is_empty() {
        debug!("{source}: empty normalized batch, dropping");
        return;
    }
    if !config.sample_config.sample(&spans) {
        IngestMetrics::incr(&metrics.sampled_out);
        debug!("{source}: batch sampled out");
        return;
    }
    match sink.submit(SpanBatch::new(source, spans)).await {
        Ok(()) => IngestMetrics::incr(&metrics.batches_submitted),
        Err(err) => {
            IngestMetrics::incr(&metrics.sink_errors);
            error!("{source}: dropping batch after sink failure: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IngestError;
    use crate::model::SpanStatus;
    use crate::sampler::{SampleConfig, SampleRule};
    use async_trait::async_trait;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct CapturingSink {
        batches: Arc<Mutex<Vec<SpanBatch>>>,
    }

    #[async_trait]
    impl Sink for CapturingSink {
        async fn submit(&self, batch: SpanBatch) -> Result<(), IngestError> {
            self.batches.lock().await.push(batch);
            Ok(())
        }
    }

    fn test_config(sample_config: SampleConfig) -> Config {
        Config {
            host: "127.0.0.1".to_string(),
            enable_jaeger: true,
            enable_zipkin: true,
            enable_skywalking_v2: true,
            enable_skywalking_v3: true,
            jaeger_http_port: 0,
            jaeger_http_path: "/apis/traces".to_string(),
            jaeger_udp_port: 0,
            zipkin_port: 0,
            skywalking_grpc_v2_port: 0,
            skywalking_grpc_v3_port: 0,
            skywalking_http_port: 0,
            max_request_content_length: 10 * 1024 * 1024,
            flush_interval_secs: 3,
            intake_url: None,
            tags: crate::config::Tags::new(),
            sample_config,
        }
    }

    fn span(trace_id: &str) -> NormalizedSpan {
        NormalizedSpan {
            trace_id: trace_id.to_string(),
            span_id: "1".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn empty_batches_are_dropped_silently() {
        let sink = CapturingSink::default();
        let metrics = IngestMetrics::default();
        let config = test_config(SampleConfig::default());
        forward_spans("jaeger", vec![], &config, &sink, &metrics).await;
        assert!(sink.batches.lock().await.is_empty());
    }

    #[tokio::test]
    async fn sampled_out_batches_are_counted() {
        let sink = CapturingSink::default();
        let metrics = IngestMetrics::default();
        let config = test_config(SampleConfig::new(vec![SampleRule {
            rate: 0,
            scope: 100,
            ..Default::default()
        }]));
        forward_spans("jaeger", vec![span("15")], &config, &sink, &metrics).await;
        assert!(sink.batches.lock().await.is_empty());
        assert_eq!(
            metrics
                .sampled_out
                .load(std::sync::atomic::Ordering::Relaxed),
            1
        );
    }

    #[tokio::test]
    async fn error_batches_bypass_sampling() {
        let sink = CapturingSink::default();
        let metrics = IngestMetrics::default();
        let config = test_config(SampleConfig::new(vec![SampleRule {
            rate: 0,
            scope: 100,
            ..Default::default()
        }]));
        let mut erroring = span("15");
        erroring.status = SpanStatus::Err;
        forward_spans("jaeger", vec![erroring], &config, &sink, &metrics).await;
        assert_eq!(sink.batches.lock().await.len(), 1);
    }
}
