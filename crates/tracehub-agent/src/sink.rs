// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! The ingestion sink: the single interface the receivers depend on, plus
//! the production implementation that buffers batches and flushes them to
//! the downstream intake on an interval.

use std::sync::Arc;
use std::time;

use async_trait::async_trait;
use tokio::sync::mpsc::{Receiver, Sender};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::config::Config;
use crate::error::IngestError;
use crate::model::SpanBatch;

/// Where receivers hand their normalized batches. Fire-and-forget from the
/// receiver's perspective: a submit failure is logged and counted, never
/// surfaced to the wire client.
#[async_trait]
pub trait Sink: Send + Sync {
    async fn submit(&self, batch: SpanBatch) -> Result<(), IngestError>;
}

/// Forwards batches over an mpsc channel to the flusher task.
#[derive(Clone)]
pub struct ChannelSink {
    tx: Sender<SpanBatch>,
}

impl ChannelSink {
    pub fn new(tx: Sender<SpanBatch>) -> ChannelSink {
        ChannelSink { tx }
    }
}

#[async_trait]
impl Sink for ChannelSink {
    async fn submit(&self, batch: SpanBatch) -> Result<(), IngestError> {
        self.tx
            .send(batch)
            .await
            .map_err(|_| IngestError::Sink("span batch channel closed".to_string()))
    }
}

/// Takes in individual span batches and queues them to be flushed downstream.
pub struct SpanAggregator {
    queue: Vec<SpanBatch>,
}

impl Default for SpanAggregator {
    fn default() -> Self {
        SpanAggregator {
            queue: Vec::with_capacity(128), // arbitrary capacity for batch queue
        }
    }
}

impl SpanAggregator {
    pub fn add(&mut self, batch: SpanBatch) {
        self.queue.push(batch);
    }

    pub fn get_batch(&mut self) -> Vec<SpanBatch> {
        std::mem::take(&mut self.queue)
    }
}

#[async_trait]
pub trait SpanFlusher {
    fn new(aggregator: Arc<Mutex<SpanAggregator>>, config: Arc<Config>) -> Self
    where
        Self: Sized;
    /// Listens for batches on the mpsc Receiver and flushes the aggregator
    /// on an interval until the cancellation token fires. A final flush runs
    /// on shutdown.
    async fn start_span_flusher(&self, cancel: CancellationToken, rx: Receiver<SpanBatch>);
    /// Sends batches downstream, returning them back if the send failed so
    /// they can be retried on the next tick.
    async fn send(&self, batches: Vec<SpanBatch>) -> Option<Vec<SpanBatch>>;
    /// Flushes everything currently queued. If `failed_batches` is provided,
    /// those are attempted first.
    async fn flush(&self, failed_batches: Option<Vec<SpanBatch>>) -> Option<Vec<SpanBatch>>;
}

#[derive(Clone)]
pub struct IntakeSpanFlusher {
    pub aggregator: Arc<Mutex<SpanAggregator>>,
    pub config: Arc<Config>,
}

#[async_trait]
impl SpanFlusher for IntakeSpanFlusher {
    fn new(aggregator: Arc<Mutex<SpanAggregator>>, config: Arc<Config>) -> Self {
        IntakeSpanFlusher { aggregator, config }
    }

    async fn start_span_flusher(&self, cancel: CancellationToken, mut rx: Receiver<SpanBatch>) {
        let aggregator = Arc::clone(&self.aggregator);
        tokio::spawn(async move {
            while let Some(batch) = rx.recv().await {
                let mut guard = aggregator.lock().await;
                guard.add(batch);
            }
        });

        let mut failed: Option<Vec<SpanBatch>> = None;
        loop {
            tokio::select! {
                _ = tokio::time::sleep(time::Duration::from_secs(
                    self.config.flush_interval_secs,
                )) => {
                    failed = self.flush(failed.take()).await;
                }
                _ = cancel.cancelled() => {
                    self.flush(failed.take()).await;
                    debug!("Span flusher stopped");
                    return;
                }
            }
        }
    }

    async fn flush(&self, failed_batches: Option<Vec<SpanBatch>>) -> Option<Vec<SpanBatch>> {
        let mut failed_batch: Option<Vec<SpanBatch>> = None;

        if let Some(batches) = failed_batches {
            if !batches.is_empty() {
                debug!(
                    "Retrying to send {} previously failed span batches",
                    batches.len()
                );
                let retry_result = self.send(batches).await;
                if retry_result.is_some() {
                    // Still failed, return to retry later
                    return retry_result;
                }
            }
        }

        let mut guard = self.aggregator.lock().await;
        let mut batches = guard.get_batch();

        while !batches.is_empty() {
            if let Some(failed) = self.send(batches).await {
                // Keep track of the failed batches and stop draining
                failed_batch = Some(failed);
                break;
            }
            batches = guard.get_batch();
        }

        failed_batch
    }

    async fn send(&self, batches: Vec<SpanBatch>) -> Option<Vec<SpanBatch>> {
        if batches.is_empty() {
            return None;
        }
        let Some(intake_url) = self.config.intake_url.as_deref() else {
            debug!(
                "No intake endpoint configured, dropping {} flushed span batches",
                batches.len()
            );
            return None;
        };
        debug!("Flushing {} span batches", batches.len());

        let client = match reqwest::Client::builder().build() {
            Ok(client) => client,
            Err(e) => {
                error!("Failed to create HTTP client: {e:?}");
                return None;
            }
        };

        match client.post(intake_url).json(&batches).send().await {
            Ok(response) if response.status().is_success() => {
                debug!("Successfully flushed span batches");
                None
            }
            Ok(response) => {
                error!("Intake refused span batches: {}", response.status());
                Some(batches)
            }
            Err(e) => {
                error!("Error sending span batches: {e:?}");
                Some(batches)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NormalizedSpan;
    use tokio::sync::mpsc;

    fn test_config(intake_url: Option<String>) -> Arc<Config> {
        Arc::new(Config {
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
            flush_interval_secs: 1,
            intake_url,
            tags: crate::config::Tags::new(),
            sample_config: crate::sampler::SampleConfig::default(),
        })
    }

    fn test_batch() -> SpanBatch {
        SpanBatch::new(
            "jaeger",
            vec![NormalizedSpan {
                trace_id: "2a".to_string(),
                span_id: "7".to_string(),
                service: "billing".to_string(),
                ..Default::default()
            }],
        )
    }

    #[tokio::test]
    async fn channel_sink_forwards_batches() {
        let (tx, mut rx) = mpsc::channel(1);
        let sink = ChannelSink::new(tx);
        sink.submit(test_batch()).await.unwrap();
        let received = rx.recv().await.unwrap();
        assert_eq!(received.source, "jaeger");
        assert_eq!(received.spans.len(), 1);
    }

    #[tokio::test]
    async fn channel_sink_errors_when_closed() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let sink = ChannelSink::new(tx);
        assert!(sink.submit(test_batch()).await.is_err());
    }

    #[tokio::test]
    async fn send_posts_batches_to_intake() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/intake")
            .match_header("content-type", "application/json")
            .with_status(200)
            .create_async()
            .await;

        let flusher = IntakeSpanFlusher::new(
            Arc::new(Mutex::new(SpanAggregator::default())),
            test_config(Some(format!("{}/intake", server.url()))),
        );
        let result = flusher.send(vec![test_batch()]).await;
        assert!(result.is_none());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn send_returns_batches_on_intake_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/intake")
            .with_status(503)
            .create_async()
            .await;

        let flusher = IntakeSpanFlusher::new(
            Arc::new(Mutex::new(SpanAggregator::default())),
            test_config(Some(format!("{}/intake", server.url()))),
        );
        let result = flusher.send(vec![test_batch()]).await;
        assert_eq!(result.map(|batches| batches.len()), Some(1));
    }

    #[tokio::test]
    async fn send_without_intake_drops_silently() {
        let flusher = IntakeSpanFlusher::new(
            Arc::new(Mutex::new(SpanAggregator::default())),
            test_config(None),
        );
        assert!(flusher.send(vec![test_batch()]).await.is_none());
    }
}
