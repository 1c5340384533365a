// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

use std::{env, sync::Arc};

use tokio::sync::mpsc;
use tokio::sync::Mutex as TokioMutex;
use tokio::time::{interval, Duration};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use tracehub_agent::{
    config::Config,
    metrics::IngestMetrics,
    receiver::{
        jaeger::{JaegerHttpReceiver, JaegerUdpReceiver},
        skywalking_grpc::{SkyWalkingGrpcV2Receiver, SkyWalkingGrpcV3Receiver},
        skywalking_http::SkyWalkingHttpReceiver,
        zipkin::ZipkinReceiver,
    },
    registry::{InMemoryRegistry, RegistrationStore},
    sink::{ChannelSink, IntakeSpanFlusher, Sink, SpanAggregator, SpanFlusher},
};

const SPAN_BATCH_CHANNEL_BUFFER_SIZE: usize = 10;
const METRICS_SUMMARY_INTERVAL_SECS: u64 = 60;

#[tokio::main]
pub async fn main() {
    let log_level = env::var("TRACEHUB_LOG_LEVEL")
        .map(|val| val.to_lowercase())
        .unwrap_or("info".to_string());

    let env_filter = format!("h2=off,hyper=off,rustls=off,{}", log_level);

    #[allow(clippy::expect_used)]
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_new(env_filter).expect("could not parse log level in configuration"),
        )
        .with_level(true)
        .with_thread_names(false)
        .with_thread_ids(false)
        .with_line_number(false)
        .with_file(false)
        .with_target(true)
        .without_time()
        .finish();

    #[allow(clippy::expect_used)]
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    debug!("Logging subsystem enabled");

    let config = match Config::from_env() {
        Ok(c) => Arc::new(c),
        Err(e) => {
            error!("Error creating config on tracehub startup: {e}");
            return;
        }
    };

    let cancel = CancellationToken::new();
    let metrics = Arc::new(IngestMetrics::default());
    let registry: Arc<dyn RegistrationStore> = Arc::new(InMemoryRegistry::default());

    // Channel from the receivers to the flusher; the sink side is what every
    // receiver holds.
    let (batch_tx, batch_rx) = mpsc::channel(SPAN_BATCH_CHANNEL_BUFFER_SIZE);
    let sink: Arc<dyn Sink> = Arc::new(ChannelSink::new(batch_tx));

    let aggregator = Arc::new(TokioMutex::new(SpanAggregator::default()));
    let flusher = IntakeSpanFlusher::new(Arc::clone(&aggregator), Arc::clone(&config));
    let flusher_cancel = cancel.clone();
    let flusher_handle = tokio::spawn(async move {
        flusher.start_span_flusher(flusher_cancel, batch_rx).await;
    });

    let mut receiver_handles = Vec::new();

    if config.enable_jaeger {
        let http = JaegerHttpReceiver::new(
            Arc::clone(&config),
            Arc::clone(&sink),
            Arc::clone(&metrics),
        );
        match http.start(cancel.clone()).await {
            Ok(handle) => receiver_handles.push(handle),
            Err(e) => error!("Failed to start jaeger HTTP receiver: {e}"),
        }
        let udp = JaegerUdpReceiver::new(
            Arc::clone(&config),
            Arc::clone(&sink),
            Arc::clone(&metrics),
        );
        match udp.start(cancel.clone()).await {
            Ok(handle) => receiver_handles.push(handle),
            Err(e) => error!("Failed to start jaeger UDP receiver: {e}"),
        }
    }

    if config.enable_zipkin {
        let zipkin = ZipkinReceiver::new(
            Arc::clone(&config),
            Arc::clone(&sink),
            Arc::clone(&metrics),
        );
        match zipkin.start(cancel.clone()).await {
            Ok(handle) => receiver_handles.push(handle),
            Err(e) => error!("Failed to start zipkin receiver: {e}"),
        }
    }

    if config.enable_skywalking_v3 {
        let grpc = SkyWalkingGrpcV3Receiver::new(
            Arc::clone(&config),
            Arc::clone(&sink),
            Arc::clone(&metrics),
        );
        match grpc.start(cancel.clone()) {
            Ok(handle) => receiver_handles.push(handle),
            Err(e) => error!("Failed to start skywalking gRPC v3 receiver: {e}"),
        }
        let http = SkyWalkingHttpReceiver::new(
            Arc::clone(&config),
            Arc::clone(&sink),
            Arc::clone(&metrics),
        );
        match http.start(cancel.clone()).await {
            Ok(handle) => receiver_handles.push(handle),
            Err(e) => error!("Failed to start skywalking HTTP receiver: {e}"),
        }
    }

    if config.enable_skywalking_v2 {
        let grpc = SkyWalkingGrpcV2Receiver::new(
            Arc::clone(&config),
            Arc::clone(&sink),
            Arc::clone(&metrics),
            Arc::clone(&registry),
        );
        match grpc.start(cancel.clone()) {
            Ok(handle) => receiver_handles.push(handle),
            Err(e) => error!("Failed to start skywalking gRPC v2 receiver: {e}"),
        }
    }

    info!(
        "tracehub started with {} receivers on {}",
        receiver_handles.len(),
        config.host
    );

    let summary_metrics = Arc::clone(&metrics);
    let summary_cancel = cancel.clone();
    tokio::spawn(async move {
        let mut ticker = interval(Duration::from_secs(METRICS_SUMMARY_INTERVAL_SECS));
        loop {
            tokio::select! {
                _ = ticker.tick() => info!("ingest status: {}", summary_metrics.summary()),
                _ = summary_cancel.cancelled() => return,
            }
        }
    });

    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received, stopping receivers"),
        Err(e) => error!("Failed to listen for shutdown signal: {e}"),
    }
    cancel.cancel();

    for handle in receiver_handles {
        if let Err(e) = handle.await {
            error!("Receiver task failed during shutdown: {e}");
        }
    }
    if let Err(e) = flusher_handle.await {
        error!("Flusher task failed during shutdown: {e}");
    }
    info!("final ingest status: {}", metrics.summary());
}
