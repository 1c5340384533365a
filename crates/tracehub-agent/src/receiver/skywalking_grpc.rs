// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! SkyWalking gRPC receivers.
//!
//! v3 serves the client-streaming `collect` RPC. v2 serves the same stream
//! shape for `UpstreamSegment` messages plus the `Register` interning RPCs
//! and the instance ping; all three v2 services share one injected
//! [`RegistrationStore`].
//!
//! Stream semantics: a transport/decode error aborts only that stream (the
//! client reconnects), a resolution failure drops that one batch and keeps
//! the stream, and EOF is acked with empty `Commands`.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tonic::{Request, Response, Status, Streaming};
use tracing::{debug, error};

use crate::config::Config;
use crate::error::IngestError;
use crate::metrics::IngestMetrics;
use crate::normalize::{self, SKYWALKING};
use crate::receiver::forward_spans;
use crate::registry::{RegistrationStore, RegistryTable};
use crate::sink::Sink;
use tracehub_proto::skywalking::{v2, v3};

/// Command name sent to a pinging instance the registry does not know,
/// telling the agent to re-run its registrations.
const RESET_COMMAND: &str = "ServiceMetadataReset";

pub struct SkyWalkingGrpcV3Receiver {
    pub config: Arc<Config>,
    pub sink: Arc<dyn Sink>,
    pub metrics: Arc<IngestMetrics>,
}

impl SkyWalkingGrpcV3Receiver {
    pub fn new(
        config: Arc<Config>,
        sink: Arc<dyn Sink>,
        metrics: Arc<IngestMetrics>,
    ) -> SkyWalkingGrpcV3Receiver {
        SkyWalkingGrpcV3Receiver {
            config,
            sink,
            metrics,
        }
    }

    pub fn start(&self, cancel: CancellationToken) -> anyhow::Result<JoinHandle<()>> {
        let addr: SocketAddr = format!(
            "{}:{}",
            self.config.host, self.config.skywalking_grpc_v3_port
        )
        .parse()?;
        let service =
            v3::trace_segment_report_service_server::TraceSegmentReportServiceServer::new(
                SegmentReportV3 {
                    config: Arc::clone(&self.config),
                    sink: Arc::clone(&self.sink),
                    metrics: Arc::clone(&self.metrics),
                },
            );
        debug!("SkyWalking gRPC v3 receiver listening on {addr}");
        Ok(tokio::spawn(async move {
            let shutdown = async move { cancel.cancelled().await };
            if let Err(e) = tonic::transport::Server::builder()
                .add_service(service)
                .serve_with_shutdown(addr, shutdown)
                .await
            {
                error!("SkyWalking gRPC v3 receiver failed: {e}");
            }
        }))
    }
}

struct SegmentReportV3 {
    config: Arc<Config>,
    sink: Arc<dyn Sink>,
    metrics: Arc<IngestMetrics>,
}

#[tonic::async_trait]
impl v3::trace_segment_report_service_server::TraceSegmentReportService for SegmentReportV3 {
    async fn collect(
        &self,
        request: Request<Streaming<v3::SegmentObject>>,
    ) -> Result<Response<v3::Commands>, Status> {
        let mut stream = request.into_inner();
        loop {
            match stream.message().await {
                Ok(Some(segment)) => {
                    match normalize::skywalking::normalize_v3_segment(
                        &segment,
                        self.config.tags.as_map(),
                    ) {
                        Ok(spans) => {
                            forward_spans(
                                SKYWALKING.source,
                                spans,
                                &self.config,
                                self.sink.as_ref(),
                                &self.metrics,
                            )
                            .await;
                        }
                        Err(e) => {
                            IngestMetrics::incr(&self.metrics.resolution_errors);
                            error!("Dropping skywalking v3 segment: {e}");
                        }
                    }
                }
                Ok(None) => break,
                Err(status) => {
                    IngestMetrics::incr(&self.metrics.decode_errors);
                    error!("SkyWalking v3 stream aborted: {status}");
                    return Err(status);
                }
            }
        }
        Ok(Response::new(v3::Commands::default()))
    }
}

pub struct SkyWalkingGrpcV2Receiver {
    pub config: Arc<Config>,
    pub sink: Arc<dyn Sink>,
    pub metrics: Arc<IngestMetrics>,
    pub registry: Arc<dyn RegistrationStore>,
}

impl SkyWalkingGrpcV2Receiver {
    pub fn new(
        config: Arc<Config>,
        sink: Arc<dyn Sink>,
        metrics: Arc<IngestMetrics>,
        registry: Arc<dyn RegistrationStore>,
    ) -> SkyWalkingGrpcV2Receiver {
        SkyWalkingGrpcV2Receiver {
            config,
            sink,
            metrics,
            registry,
        }
    }

    pub fn start(&self, cancel: CancellationToken) -> anyhow::Result<JoinHandle<()>> {
        let addr: SocketAddr = format!(
            "{}:{}",
            self.config.host, self.config.skywalking_grpc_v2_port
        )
        .parse()?;
        let report =
            v2::trace_segment_report_service_server::TraceSegmentReportServiceServer::new(
                SegmentReportV2 {
                    config: Arc::clone(&self.config),
                    sink: Arc::clone(&self.sink),
                    metrics: Arc::clone(&self.metrics),
                    registry: Arc::clone(&self.registry),
                },
            );
        let register = v2::register_server::RegisterServer::new(RegisterV2 {
            registry: Arc::clone(&self.registry),
        });
        let ping = v2::service_instance_ping_server::ServiceInstancePingServer::new(PingV2 {
            registry: Arc::clone(&self.registry),
        });
        debug!("SkyWalking gRPC v2 receiver listening on {addr}");
        Ok(tokio::spawn(async move {
            let shutdown = async move { cancel.cancelled().await };
            if let Err(e) = tonic::transport::Server::builder()
                .add_service(report)
                .add_service(register)
                .add_service(ping)
                .serve_with_shutdown(addr, shutdown)
                .await
            {
                error!("SkyWalking gRPC v2 receiver failed: {e}");
            }
        }))
    }
}

struct SegmentReportV2 {
    config: Arc<Config>,
    sink: Arc<dyn Sink>,
    metrics: Arc<IngestMetrics>,
    registry: Arc<dyn RegistrationStore>,
}

#[tonic::async_trait]
impl v2::trace_segment_report_service_server::TraceSegmentReportService for SegmentReportV2 {
    async fn collect(
        &self,
        request: Request<Streaming<v2::UpstreamSegment>>,
    ) -> Result<Response<v2::Commands>, Status> {
        let mut stream = request.into_inner();
        loop {
            match stream.message().await {
                Ok(Some(upstream)) => {
                    match normalize::skywalking::normalize_v2_segment(
                        &upstream,
                        self.registry.as_ref(),
                        self.config.tags.as_map(),
                    ) {
                        Ok(spans) => {
                            forward_spans(
                                SKYWALKING.source,
                                spans,
                                &self.config,
                                self.sink.as_ref(),
                                &self.metrics,
                            )
                            .await;
                        }
                        Err(e @ IngestError::Decode { .. }) => {
                            // A nested segment that does not decode means the
                            // stream itself is unhealthy.
                            IngestMetrics::incr(&self.metrics.decode_errors);
                            error!("SkyWalking v2 stream aborted: {e}");
                            return Err(Status::invalid_argument(e.to_string()));
                        }
                        Err(e) => {
                            IngestMetrics::incr(&self.metrics.resolution_errors);
                            error!("Dropping skywalking v2 segment: {e}");
                        }
                    }
                }
                Ok(None) => break,
                Err(status) => {
                    IngestMetrics::incr(&self.metrics.decode_errors);
                    error!("SkyWalking v2 stream aborted: {status}");
                    return Err(status);
                }
            }
        }
        Ok(Response::new(v2::Commands::default()))
    }
}

struct RegisterV2 {
    registry: Arc<dyn RegistrationStore>,
}

#[tonic::async_trait]
impl v2::register_server::Register for RegisterV2 {
    async fn do_service_register(
        &self,
        request: Request<v2::Services>,
    ) -> Result<Response<v2::ServiceRegisterMapping>, Status> {
        let services = request
            .into_inner()
            .services
            .into_iter()
            .map(|service| {
                let id = self
                    .registry
                    .get_or_register(RegistryTable::Service, &service.service_name);
                v2::KeyIntValuePair {
                    key: service.service_name,
                    value: id,
                }
            })
            .collect();
        Ok(Response::new(v2::ServiceRegisterMapping { services }))
    }

    async fn do_service_instance_register(
        &self,
        request: Request<v2::ServiceInstances>,
    ) -> Result<Response<v2::ServiceInstanceRegisterMapping>, Status> {
        let service_instances = request
            .into_inner()
            .instances
            .into_iter()
            .map(|instance| {
                let id = self
                    .registry
                    .get_or_register(RegistryTable::ServiceInstance, &instance.instance_uuid);
                v2::KeyIntValuePair {
                    key: instance.instance_uuid,
                    value: id,
                }
            })
            .collect();
        Ok(Response::new(v2::ServiceInstanceRegisterMapping {
            service_instances,
        }))
    }

    async fn do_endpoint_register(
        &self,
        request: Request<v2::Endpoints>,
    ) -> Result<Response<v2::EndpointMapping>, Status> {
        let elements = request
            .into_inner()
            .endpoints
            .into_iter()
            .map(|endpoint| {
                let id = self
                    .registry
                    .get_or_register(RegistryTable::Endpoint, &endpoint.endpoint_name);
                v2::EndpointMappingElement {
                    service_id: endpoint.service_id,
                    endpoint_name: endpoint.endpoint_name,
                    endpoint_id: id,
                    from: endpoint.from,
                }
            })
            .collect();
        Ok(Response::new(v2::EndpointMapping { elements }))
    }

    async fn do_network_address_register(
        &self,
        request: Request<v2::NetAddresses>,
    ) -> Result<Response<v2::NetAddressMapping>, Status> {
        let address_ids = request
            .into_inner()
            .addresses
            .into_iter()
            .map(|address| {
                let id = self
                    .registry
                    .get_or_register(RegistryTable::NetAddress, &address);
                v2::KeyIntValuePair {
                    key: address,
                    value: id,
                }
            })
            .collect();
        Ok(Response::new(v2::NetAddressMapping { address_ids }))
    }
}

struct PingV2 {
    registry: Arc<dyn RegistrationStore>,
}

#[tonic::async_trait]
impl v2::service_instance_ping_server::ServiceInstancePing for PingV2 {
    async fn do_ping(
        &self,
        request: Request<v2::ServiceInstancePingPkg>,
    ) -> Result<Response<v2::Commands>, Status> {
        let pkg = request.into_inner();
        let known = self
            .registry
            .lookup_name(RegistryTable::ServiceInstance, pkg.service_instance_id)
            .is_some();
        if known {
            return Ok(Response::new(v2::Commands::default()));
        }
        debug!(
            "Ping from unregistered instance {} ({}), requesting metadata reset",
            pkg.service_instance_id, pkg.service_instance_uuid
        );
        Ok(Response::new(v2::Commands {
            commands: vec![v2::Command {
                command: RESET_COMMAND.to_string(),
                args: vec![],
            }],
        }))
    }
}
