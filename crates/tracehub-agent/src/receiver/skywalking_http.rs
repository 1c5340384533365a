// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! SkyWalking v3 HTTP receiver: `/v3/segment` (one JSON segment),
//! `/v3/segments` (an array) and the two management endpoints, which always
//! reply `200 {}`.

use std::sync::Arc;

use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::service::service_fn;
use hyper::{http, Method, Request, Response, StatusCode};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::config::Config;
use crate::http_utils::{log_and_create_http_response, verify_request_content_length, HttpResponse};
use crate::metrics::IngestMetrics;
use crate::normalize::{self, SKYWALKING};
use crate::receiver::{forward_spans, serve_http};
use crate::sink::Sink;
use tracehub_proto::skywalking::v3;

const SEGMENT_ENDPOINT_PATH: &str = "/v3/segment";
const SEGMENTS_ENDPOINT_PATH: &str = "/v3/segments";
const PROPERTIES_ENDPOINT_PATH: &str = "/v3/management/reportProperties";
const KEEP_ALIVE_ENDPOINT_PATH: &str = "/v3/management/keepAlive";

pub struct SkyWalkingHttpReceiver {
    pub config: Arc<Config>,
    pub sink: Arc<dyn Sink>,
    pub metrics: Arc<IngestMetrics>,
}

impl SkyWalkingHttpReceiver {
    pub fn new(
        config: Arc<Config>,
        sink: Arc<dyn Sink>,
        metrics: Arc<IngestMetrics>,
    ) -> SkyWalkingHttpReceiver {
        SkyWalkingHttpReceiver {
            config,
            sink,
            metrics,
        }
    }

    pub async fn start(&self, cancel: CancellationToken) -> anyhow::Result<JoinHandle<()>> {
        let listener = TcpListener::bind((
            self.config.host.as_str(),
            self.config.skywalking_http_port,
        ))
        .await?;
        debug!(
            "SkyWalking HTTP receiver listening on {}",
            listener.local_addr()?
        );

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
                error!("SkyWalking HTTP receiver failed: {e}");
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
        if req.method() != Method::POST {
            let mut not_found = Response::default();
            *not_found.status_mut() = StatusCode::NOT_FOUND;
            return Ok(not_found);
        }
        match path.as_str() {
            PROPERTIES_ENDPOINT_PATH | KEEP_ALIVE_ENDPOINT_PATH => {
                // Management traffic carries nothing this pipeline needs.
                Response::builder()
                    .status(StatusCode::OK)
                    .body(Full::from("{}"))
            }
            SEGMENT_ENDPOINT_PATH | SEGMENTS_ENDPOINT_PATH => {
                let (parts, body) = req.into_parts();
                if let Some(response) = verify_request_content_length(
                    &parts.headers,
                    config.max_request_content_length,
                    "Error processing skywalking segment",
                ) {
                    return response;
                }
                let body_bytes = match body.collect().await {
                    Ok(collected) => collected.to_bytes(),
                    Err(e) => {
                        return log_and_create_http_response(
                            &format!("Error reading skywalking request body: {e}"),
                            StatusCode::BAD_REQUEST,
                        );
                    }
                };

                let segments: Vec<v3::SegmentObject> = if path == SEGMENT_ENDPOINT_PATH {
                    match serde_json::from_slice::<v3::SegmentObject>(&body_bytes) {
                        Ok(segment) => vec![segment],
                        Err(e) => {
                            IngestMetrics::incr(&metrics.decode_errors);
                            return log_and_create_http_response(
                                &format!("Error decoding skywalking segment: {e}"),
                                StatusCode::BAD_REQUEST,
                            );
                        }
                    }
                } else {
                    match serde_json::from_slice::<Vec<v3::SegmentObject>>(&body_bytes) {
                        Ok(segments) => segments,
                        Err(e) => {
                            IngestMetrics::incr(&metrics.decode_errors);
                            return log_and_create_http_response(
                                &format!("Error decoding skywalking segments: {e}"),
                                StatusCode::BAD_REQUEST,
                            );
                        }
                    }
                };

                // One batch per segment: a segment is one trace's worth of
                // spans and samples independently.
                for segment in &segments {
                    match normalize::skywalking::normalize_v3_segment(segment, config.tags.as_map())
                    {
                        Ok(spans) => {
                            forward_spans(
                                SKYWALKING.source,
                                spans,
                                &config,
                                sink.as_ref(),
                                &metrics,
                            )
                            .await;
                        }
                        Err(e) => {
                            IngestMetrics::incr(&metrics.resolution_errors);
                            error!("Dropping skywalking segment: {e}");
                        }
                    }
                }
                Response::builder()
                    .status(StatusCode::OK)
                    .body(Full::from("{}"))
            }
            _ => {
                let mut not_found = Response::default();
                *not_found.status_mut() = StatusCode::NOT_FOUND;
                Ok(not_found)
            }
        }
    }
}
