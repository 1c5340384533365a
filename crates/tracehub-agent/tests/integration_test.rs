// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use prost::Message;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use tracehub_agent::config::{Config, Tags};
use tracehub_agent::error::IngestError;
use tracehub_agent::metrics::IngestMetrics;
use tracehub_agent::model::{SpanBatch, SpanStatus, SpanType};
use tracehub_agent::receiver::jaeger::{JaegerHttpReceiver, JaegerUdpReceiver};
use tracehub_agent::receiver::skywalking_http::SkyWalkingHttpReceiver;
use tracehub_agent::receiver::zipkin::ZipkinReceiver;
use tracehub_agent::sampler::SampleConfig;
use tracehub_agent::sink::Sink;
use tracehub_proto::jaeger;
use tracehub_proto::zipkin;

/// Sink that captures every submitted batch for inspection.
#[derive(Clone, Default)]
struct MockSink {
    batches: Arc<Mutex<Vec<SpanBatch>>>,
}

#[async_trait]
impl Sink for MockSink {
    async fn submit(&self, batch: SpanBatch) -> Result<(), IngestError> {
        self.batches.lock().await.push(batch);
        Ok(())
    }
}

impl MockSink {
    async fn wait_for_batches(&self, count: usize) -> Vec<SpanBatch> {
        for _ in 0..40 {
            {
                let guard = self.batches.lock().await;
                if guard.len() >= count {
                    return guard.clone();
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        self.batches.lock().await.clone()
    }
}

fn create_test_config(port_base: u16) -> Arc<Config> {
    Arc::new(Config {
        host: "127.0.0.1".to_string(),
        enable_jaeger: true,
        enable_zipkin: true,
        enable_skywalking_v2: true,
        enable_skywalking_v3: true,
        jaeger_http_port: port_base,
        jaeger_http_path: "/apis/traces".to_string(),
        jaeger_udp_port: port_base + 1,
        zipkin_port: port_base + 2,
        skywalking_grpc_v2_port: port_base + 3,
        skywalking_grpc_v3_port: port_base + 4,
        skywalking_http_port: port_base + 5,
        max_request_content_length: 10 * 1024 * 1024,
        flush_interval_secs: 3,
        intake_url: None,
        tags: Tags::from_env_string("env:test"),
        sample_config: SampleConfig::default(),
    })
}

#[tokio::test]
async fn test_jaeger_http_end_to_end() {
    let config = create_test_config(28120);
    let sink = MockSink::default();
    let cancel = CancellationToken::new();
    let receiver = JaegerHttpReceiver::new(
        Arc::clone(&config),
        Arc::new(sink.clone()),
        Arc::new(IngestMetrics::default()),
    );
    let _handle = receiver.start(cancel.clone()).await.unwrap();

    let batch = jaeger::Batch {
        process: jaeger::Process {
            service_name: "billing".to_string(),
            tags: None,
        },
        spans: vec![jaeger::Span {
            trace_id_low: 42,
            trace_id_high: 0,
            span_id: 7,
            parent_span_id: 0,
            operation_name: "GET /invoice".to_string(),
            start_time: 1_000_000,
            duration: 1_500,
            ..Default::default()
        }],
    };
    let body = jaeger::encode_binary_batch(&batch).unwrap();

    let response = reqwest::Client::new()
        .post("http://127.0.0.1:28120/apis/traces")
        .header("content-type", "application/x-thrift")
        .body(body)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let batches = sink.wait_for_batches(1).await;
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].source, "jaeger");
    assert_eq!(batches[0].spans.len(), 1);
    let span = &batches[0].spans[0];
    assert_eq!(span.trace_id, "2a");
    assert_eq!(span.span_id, "7");
    assert_eq!(span.parent_id, "");
    assert_eq!(span.start, 1_000_000_000);
    assert_eq!(span.duration, 1_500_000);
    assert_eq!(span.service, "billing");
    assert_eq!(span.tags.get("env").map(String::as_str), Some("test"));

    cancel.cancel();
}

#[tokio::test]
async fn test_jaeger_http_acks_undecodable_body() {
    let config = create_test_config(28130);
    let sink = MockSink::default();
    let metrics = Arc::new(IngestMetrics::default());
    let cancel = CancellationToken::new();
    let receiver =
        JaegerHttpReceiver::new(Arc::clone(&config), Arc::new(sink.clone()), Arc::clone(&metrics));
    let _handle = receiver.start(cancel.clone()).await.unwrap();

    let response = reqwest::Client::new()
        .post("http://127.0.0.1:28130/apis/traces")
        .header("content-type", "application/x-thrift")
        .body(vec![0xff, 0x00, 0x13, 0x37])
        .send()
        .await
        .unwrap();
    // Decode failures are server-side only: the client still gets its ack.
    assert_eq!(response.status(), 200);

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(sink.batches.lock().await.is_empty());
    assert_eq!(
        metrics
            .decode_errors
            .load(std::sync::atomic::Ordering::Relaxed),
        1
    );
    cancel.cancel();
}

#[tokio::test]
async fn test_jaeger_udp_end_to_end_and_shutdown() {
    let config = create_test_config(28140);
    let sink = MockSink::default();
    let cancel = CancellationToken::new();
    let receiver = JaegerUdpReceiver::new(
        Arc::clone(&config),
        Arc::new(sink.clone()),
        Arc::new(IngestMetrics::default()),
    );
    let handle = receiver.start(cancel.clone()).await.unwrap();

    let batch = jaeger::Batch {
        process: jaeger::Process {
            service_name: "checkout".to_string(),
            tags: None,
        },
        spans: vec![jaeger::Span {
            trace_id_low: 9,
            span_id: 4,
            parent_span_id: 2,
            operation_name: "charge".to_string(),
            start_time: 10,
            duration: 5,
            ..Default::default()
        }],
    };
    let datagram = jaeger::encode_compact_emit_batch(&batch).unwrap();

    let socket = tokio::net::UdpSocket::bind("127.0.0.1:0").await.unwrap();
    socket
        .send_to(&datagram, "127.0.0.1:28141")
        .await
        .unwrap();

    let batches = sink.wait_for_batches(1).await;
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].spans[0].trace_id, "9");
    assert_eq!(batches[0].spans[0].parent_id, "2");
    assert_eq!(batches[0].spans[0].span_type, SpanType::Local);

    // The read loop must exit promptly once cancelled.
    cancel.cancel();
    tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("udp receiver did not stop after cancellation")
        .unwrap();
}

#[tokio::test]
async fn test_zipkin_v2_json_end_to_end() {
    let config = create_test_config(28150);
    let sink = MockSink::default();
    let cancel = CancellationToken::new();
    let receiver = ZipkinReceiver::new(
        Arc::clone(&config),
        Arc::new(sink.clone()),
        Arc::new(IngestMetrics::default()),
    );
    let _handle = receiver.start(cancel.clone()).await.unwrap();

    let body = serde_json::json!([{
        "traceId": "2a",
        "id": "7",
        "name": "get /status",
        "timestamp": 1_000_000,
        "duration": 1_500,
        "localEndpoint": {"serviceName": "front"},
        "tags": {"error": "true"}
    }])
    .to_string();

    let response = reqwest::Client::new()
        .post("http://127.0.0.1:28152/api/v2/spans")
        .header("content-type", "application/json")
        .body(body)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let batches = sink.wait_for_batches(1).await;
    assert_eq!(batches.len(), 1);
    let span = &batches[0].spans[0];
    assert_eq!(batches[0].source, "zipkin");
    assert_eq!(span.trace_id, "2a");
    assert_eq!(span.service, "front");
    assert_eq!(span.status, SpanStatus::Err);
    // v2 timestamps are already microseconds.
    assert_eq!(span.start, 1_000_000);
    assert_eq!(span.duration, 1_500);
    cancel.cancel();
}

#[tokio::test]
async fn test_zipkin_v1_thrift_end_to_end() {
    let config = create_test_config(28160);
    let sink = MockSink::default();
    let cancel = CancellationToken::new();
    let receiver = ZipkinReceiver::new(
        Arc::clone(&config),
        Arc::new(sink.clone()),
        Arc::new(IngestMetrics::default()),
    );
    let _handle = receiver.start(cancel.clone()).await.unwrap();

    let spans = vec![zipkin::thrift::Span {
        trace_id: 0x2a,
        name: "get /status".to_string(),
        id: 7,
        parent_id: None,
        annotations: vec![zipkin::thrift::Annotation {
            timestamp: 1_000,
            value: "sr".to_string(),
            host: Some(zipkin::thrift::Endpoint {
                ipv4: 0x7f000001,
                port: 8080,
                service_name: "front".to_string(),
                ipv6: None,
            }),
        }],
        binary_annotations: vec![],
        debug: None,
        timestamp: Some(1_000),
        duration: Some(25),
        trace_id_high: None,
    }];
    let body = zipkin::thrift::encode_binary_span_list(&spans).unwrap();

    let response = reqwest::Client::new()
        .post("http://127.0.0.1:28162/api/v1/spans")
        .header("content-type", "application/x-thrift")
        .body(body)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let batches = sink.wait_for_batches(1).await;
    let span = &batches[0].spans[0];
    assert_eq!(span.trace_id, "2a");
    assert_eq!(span.span_id, "7");
    assert_eq!(span.span_type, SpanType::Entry);
    assert_eq!(span.service, "front");
    // v1 timestamps scale by 1000.
    assert_eq!(span.start, 1_000_000);
    assert_eq!(span.duration, 25_000);
    cancel.cancel();
}

#[tokio::test]
async fn test_zipkin_v2_protobuf_bad_id_drops_batch() {
    let config = create_test_config(28170);
    let sink = MockSink::default();
    let metrics = Arc::new(IngestMetrics::default());
    let cancel = CancellationToken::new();
    let receiver =
        ZipkinReceiver::new(Arc::clone(&config), Arc::new(sink.clone()), Arc::clone(&metrics));
    let _handle = receiver.start(cancel.clone()).await.unwrap();

    let list = zipkin::proto::ListOfSpans {
        spans: vec![zipkin::proto::Span {
            trace_id: vec![0, 0, 0, 0, 0, 0, 0, 0x2a],
            id: vec![1, 2, 3],
            ..Default::default()
        }],
    };
    let response = reqwest::Client::new()
        .post("http://127.0.0.1:28172/api/v2/spans")
        .header("content-type", "application/x-protobuf")
        .body(list.encode_to_vec())
        .send()
        .await
        .unwrap();
    // Resolution failures drop the batch server-side but still ack.
    assert_eq!(response.status(), 200);

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(sink.batches.lock().await.is_empty());
    assert_eq!(
        metrics
            .resolution_errors
            .load(std::sync::atomic::Ordering::Relaxed),
        1
    );
    cancel.cancel();
}

#[tokio::test]
async fn test_zipkin_rejects_malformed_json() {
    let config = create_test_config(28180);
    let sink = MockSink::default();
    let cancel = CancellationToken::new();
    let receiver = ZipkinReceiver::new(
        Arc::clone(&config),
        Arc::new(sink.clone()),
        Arc::new(IngestMetrics::default()),
    );
    let _handle = receiver.start(cancel.clone()).await.unwrap();

    let response = reqwest::Client::new()
        .post("http://127.0.0.1:28182/api/v2/spans")
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    cancel.cancel();
}

#[tokio::test]
async fn test_skywalking_http_v3_segment_end_to_end() {
    let config = create_test_config(28190);
    let sink = MockSink::default();
    let cancel = CancellationToken::new();
    let receiver = SkyWalkingHttpReceiver::new(
        Arc::clone(&config),
        Arc::new(sink.clone()),
        Arc::new(IngestMetrics::default()),
    );
    let _handle = receiver.start(cancel.clone()).await.unwrap();

    let body = serde_json::json!({
        "traceId": "t1",
        "traceSegmentId": "S2",
        "service": "gateway",
        "serviceInstance": "gateway-0",
        "spans": [{
            "spanId": 6,
            "parentSpanId": 5,
            "startTime": 1_700_000_000_000u64,
            "endTime": 1_700_000_000_120u64,
            "operationName": "/rpc",
            "spanType": "Exit",
            "peer": "10.0.0.8:9000"
        }]
    })
    .to_string();

    let response = reqwest::Client::new()
        .post("http://127.0.0.1:28195/v3/segment")
        .header("content-type", "application/json")
        .body(body)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let batches = sink.wait_for_batches(1).await;
    let span = &batches[0].spans[0];
    assert_eq!(batches[0].source, "skywalking");
    assert_eq!(span.trace_id, "t1");
    assert_eq!(span.span_id, "S26");
    assert_eq!(span.parent_id, "S25");
    assert_eq!(span.span_type, SpanType::Exit);
    assert_eq!(span.endpoint, "10.0.0.8:9000");
    assert_eq!(span.duration, 120_000);
    cancel.cancel();
}

#[tokio::test]
async fn test_skywalking_http_management_endpoints_reply_empty_object() {
    let config = create_test_config(28200);
    let sink = MockSink::default();
    let cancel = CancellationToken::new();
    let receiver = SkyWalkingHttpReceiver::new(
        Arc::clone(&config),
        Arc::new(sink.clone()),
        Arc::new(IngestMetrics::default()),
    );
    let _handle = receiver.start(cancel.clone()).await.unwrap();

    for path in ["/v3/management/reportProperties", "/v3/management/keepAlive"] {
        let response = reqwest::Client::new()
            .post(format!("http://127.0.0.1:28205{path}"))
            .header("content-type", "application/json")
            .body("{}")
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(response.text().await.unwrap(), "{}");
    }
    cancel.cancel();
}
