// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Jaeger receivers: the thrift-binary HTTP collector endpoint and the
//! thrift-compact UDP agent socket.
//!
//! The HTTP collector acks `200 OK` on any outcome; decode failures are a
//! server-side concern only, so misbehaving clients never retry-storm the
//! receiver. The UDP socket has no response channel at all.

use std::sync::Arc;

use http_body_util::BodyExt;
use hyper::body::Incoming;
use hyper::service::service_fn;
use hyper::{http, Method, Request, Response, StatusCode};
use tokio::net::{TcpListener, UdpSocket};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::config::Config;
use crate::http_utils::{log_and_create_http_response, verify_request_content_length, HttpResponse};
use crate::metrics::IngestMetrics;
use crate::normalize::{self, JAEGER};
use crate::receiver::{forward_spans, serve_http};
use crate::sink::Sink;

/// Max size of a thrift-compact `emitBatch` datagram.
const UDP_BUFFER_SIZE: usize = 65535;

pub struct JaegerHttpReceiver {
    pub config: Arc<Config>,
    pub sink: Arc<dyn Sink>,
    pub metrics: Arc<IngestMetrics>,
}

impl JaegerHttpReceiver {
    pub fn new(
        config: Arc<Config>,
        sink: Arc<dyn Sink>,
        metrics: Arc<IngestMetrics>,
    ) -> JaegerHttpReceiver {
        JaegerHttpReceiver {
            config,
            sink,
            metrics,
        }
    }

    /// Binds the collector port and spawns the accept loop.
    pub async fn start(&self, cancel: CancellationToken) -> anyhow::Result<JoinHandle<()>> {
        let listener = TcpListener::bind((
            self.config.host.as_str(),
            self.config.jaeger_http_port,
        ))
        .await?;
        debug!(
            "Jaeger HTTP receiver listening on {}",
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
                error!("Jaeger HTTP receiver failed: {e}");
            }
        }))
    }

    async fn handle(
        config: Arc<Config>,
        sink: Arc<dyn Sink>,
        metrics: Arc<IngestMetrics>,
        req: Request<Incoming>,
    ) -> http::Result<HttpResponse> {
        if req.method() != Method::POST || req.uri().path() != config.jaeger_http_path {
            let mut not_found = Response::default();
            *not_found.status_mut() = StatusCode::NOT_FOUND;
            return Ok(not_found);
        }

        let (parts, body) = req.into_parts();
        if let Some(response) = verify_request_content_length(
            &parts.headers,
            config.max_request_content_length,
            "Error processing jaeger traces",
        ) {
            return response;
        }

        let body_bytes = match body.collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(e) => {
                IngestMetrics::incr(&metrics.decode_errors);
                return log_and_create_http_response(
                    &format!("Error reading jaeger request body: {e}"),
                    StatusCode::BAD_REQUEST,
                );
            }
        };

        // The collector contract is 200 on any outcome past the transport
        // checks; a bad batch is logged and counted, never bounced.
        match tracehub_proto::jaeger::decode_binary_batch(&body_bytes) {
            Ok(batch) => {
                let spans = normalize::jaeger::normalize_batch(&batch, config.tags.as_map());
                forward_spans(JAEGER.source, spans, &config, sink.as_ref(), &metrics).await;
                log_and_create_http_response("Successfully buffered jaeger batch", StatusCode::OK)
            }
            Err(e) => {
                IngestMetrics::incr(&metrics.decode_errors);
                error!("Error decoding jaeger thrift batch: {e}");
                log_and_create_http_response("Accepted", StatusCode::OK)
            }
        }
    }
}

pub struct JaegerUdpReceiver {
    pub config: Arc<Config>,
    pub sink: Arc<dyn Sink>,
    pub metrics: Arc<IngestMetrics>,
}

impl JaegerUdpReceiver {
    pub fn new(
        config: Arc<Config>,
        sink: Arc<dyn Sink>,
        metrics: Arc<IngestMetrics>,
    ) -> JaegerUdpReceiver {
        JaegerUdpReceiver {
            config,
            sink,
            metrics,
        }
    }

    /// Binds the agent socket and spawns the datagram loop. Malformed
    /// datagrams are dropped silently; the loop exits on cancellation.
    pub async fn start(&self, cancel: CancellationToken) -> anyhow::Result<JoinHandle<()>> {
        let socket = UdpSocket::bind((
            self.config.host.as_str(),
            self.config.jaeger_udp_port,
        ))
        .await?;
        debug!("Jaeger UDP receiver listening on {}", socket.local_addr()?);

        let config = Arc::clone(&self.config);
        let sink = Arc::clone(&self.sink);
        let metrics = Arc::clone(&self.metrics);
        Ok(tokio::spawn(async move {
            let mut buf = vec![0u8; UDP_BUFFER_SIZE];
            loop {
                tokio::select! {
                    res = socket.recv_from(&mut buf) => {
                        let (amt, src) = match res {
                            Ok(received) => received,
                            Err(e) => {
                                error!("Jaeger UDP read error: {e}");
                                continue;
                            }
                        };
                        debug!("Received {amt} byte jaeger datagram from {src}");
                        match tracehub_proto::jaeger::decode_compact_emit_batch(&buf[..amt]) {
                            Ok(batch) => {
                                let spans = normalize::jaeger::normalize_batch(
                                    &batch,
                                    config.tags.as_map(),
                                );
                                forward_spans(
                                    JAEGER.source,
                                    spans,
                                    &config,
                                    sink.as_ref(),
                                    &metrics,
                                )
                                .await;
                            }
                            Err(e) => {
                                IngestMetrics::incr(&metrics.decode_errors);
                                debug!("Dropping undecodable jaeger datagram: {e}");
                            }
                        }
                    }
                    _ = cancel.cancelled() => {
                        debug!("Jaeger UDP receiver stopped");
                        return;
                    }
                }
            }
        }))
    }
}
