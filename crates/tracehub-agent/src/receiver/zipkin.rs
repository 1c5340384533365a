// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Zipkin receiver: `/api/v1/spans` (JSON or thrift) and `/api/v2/spans`
//! (JSON or protobuf) on one listener, dispatched by content type.

use std::sync::Arc;

use http_body_util::BodyExt;
use hyper::body::{Bytes, Incoming};
use hyper::service::service_fn;
use hyper::{header, http, Method, Request, Response, StatusCode};
use prost::Message;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::config::Config;
use crate::http_utils::{log_and_create_http_response, verify_request_content_length, HttpResponse};
use crate::metrics::IngestMetrics;
use crate::normalize::{self, ZIPKIN_V1};
use crate::receiver::{forward_spans, serve_http};
use crate::sink::Sink;

const V1_ENDPOINT_PATH: &str = "/api/v1/spans";
const V2_ENDPOINT_PATH: &str = "/api/v2/spans";

pub struct ZipkinReceiver {
    pub config: Arc<Config>,
    pub sink: Arc<dyn Sink>,
    pub metrics: Arc<IngestMetrics>,
}

impl ZipkinReceiver {
    pub fn new(
        config: Arc<Config>,
        sink: Arc<dyn Sink>,
        metrics: Arc<IngestMetrics>,
    ) -> ZipkinReceiver {
        ZipkinReceiver {
            config,
            sink,
            metrics,
        }
    }

    pub async fn start(&self, cancel: CancellationToken) -> anyhow::Result<JoinHandle<()>> {
        let listener =
            TcpListener::bind((self.config.host.as_str(), self.config.zipkin_port)).await?;
        debug!("Zipkin receiver listening on {}", listener.local_addr()?);

        let config = Arc::clone(&self.config);
        let sink = Arc::clone(&self.sink);
        let metrics = Arc::clone(&self.metrics);
        let service = service_fn(move |req| {
            let config = Arc::clone(&config);
            let sink = Arc::clone(&sink);
            let metrics = Arc::clone(&metrics);
            async move { Self::handle(config, sink, metrics, req).await }
        });

        Ok(tokio::spawn(async move {
            if let Err(e) = serve_http(listener, service, cancel).await {
                error!("Zipkin receiver failed: {e}");
            }
        }))
    }

    async fn handle(
        config: Arc<Config>,
        sink: Arc<dyn Sink>,
        metrics: Arc<IngestMetrics>,
        req: Request<Incoming>,
    ) -> http::Result<HttpResponse> {
        let path = req.uri().path().to_string();
        if req.method() != Method::POST
            || (path != V1_ENDPOINT_PATH && path != V2_ENDPOINT_PATH)
        {
            let mut not_found = Response::default();
            *not_found.status_mut() = StatusCode::NOT_FOUND;
            return Ok(not_found);
        }

        let (parts, body) = req.into_parts();
        if let Some(response) = verify_request_content_length(
            &parts.headers,
            config.max_request_content_length,
            "Error processing zipkin spans",
        ) {
            return response;
        }
        let content_type = parts
            .headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("application/json")
            .to_string();

        let body_bytes = match body.collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(e) => {
                return log_and_create_http_response(
                    &format!("Error reading zipkin request body: {e}"),
                    StatusCode::BAD_REQUEST,
                );
            }
        };

        let spans = if path == V1_ENDPOINT_PATH {
            Self::decode_v1(&config, &content_type, &body_bytes)
        } else {
            Self::decode_v2(&config, &content_type, &body_bytes)
        };

        match spans {
            Ok(spans) => {
                forward_spans(ZIPKIN_V1.source, spans, &config, sink.as_ref(), &metrics).await;
                log_and_create_http_response("Successfully buffered zipkin spans", StatusCode::OK)
            }
            Err(DecodeFailure::Decode(message)) => {
                IngestMetrics::incr(&metrics.decode_errors);
                log_and_create_http_response(&message, StatusCode::BAD_REQUEST)
            }
            Err(DecodeFailure::Resolution(message)) => {
                // An all-or-nothing id failure: the batch is dropped but the
                // client still gets its ack.
                IngestMetrics::incr(&metrics.resolution_errors);
                error!("{message}");
                log_and_create_http_response("Accepted", StatusCode::OK)
            }
        }
    }

    fn decode_v1(
        config: &Config,
        content_type: &str,
        body: &Bytes,
    ) -> Result<Vec<crate::model::NormalizedSpan>, DecodeFailure> {
        if content_type.contains("thrift") {
            let spans = tracehub_proto::zipkin::thrift::decode_binary_span_list(body)
                .map_err(|e| DecodeFailure::Decode(format!("Error decoding zipkin v1 thrift: {e}")))?;
            let lifted = spans
                .iter()
                .map(normalize::zipkin::thrift_span_to_v1)
                .collect::<Vec<_>>();
            Ok(normalize::zipkin::normalize_v1_spans(
                &lifted,
                config.tags.as_map(),
            ))
        } else {
            let spans: Vec<tracehub_proto::zipkin::SpanV1> = serde_json::from_slice(body)
                .map_err(|e| DecodeFailure::Decode(format!("Error decoding zipkin v1 json: {e}")))?;
            Ok(normalize::zipkin::normalize_v1_spans(
                &spans,
                config.tags.as_map(),
            ))
        }
    }

    fn decode_v2(
        config: &Config,
        content_type: &str,
        body: &Bytes,
    ) -> Result<Vec<crate::model::NormalizedSpan>, DecodeFailure> {
        if content_type.contains("protobuf") {
            let list = tracehub_proto::zipkin::proto::ListOfSpans::decode(body.as_ref())
                .map_err(|e| {
                    DecodeFailure::Decode(format!("Error decoding zipkin v2 protobuf: {e}"))
                })?;
            let mut lifted = Vec::with_capacity(list.spans.len());
            for span in &list.spans {
                let converted = normalize::zipkin::proto_span_to_v2(span)
                    .map_err(|e| DecodeFailure::Resolution(e.to_string()))?;
                lifted.push(converted);
            }
            Ok(normalize::zipkin::normalize_v2_spans(
                &lifted,
                config.tags.as_map(),
            ))
        } else {
            let spans: Vec<tracehub_proto::zipkin::SpanV2> = serde_json::from_slice(body)
                .map_err(|e| DecodeFailure::Decode(format!("Error decoding zipkin v2 json: {e}")))?;
            Ok(normalize::zipkin::normalize_v2_spans(
                &spans,
                config.tags.as_map(),
            ))
        }
    }
}

enum DecodeFailure {
    Decode(String),
    Resolution(String),
}
