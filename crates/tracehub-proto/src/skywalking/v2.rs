// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Prost messages and tonic server scaffolding for the SkyWalking v2
//! protocol generation, committed in generated form.
//!
//! The v2 services are package-less, so their gRPC paths are `/Register/...`,
//! `/TraceSegmentReportService/collect` and `/ServiceInstancePing/doPing`.
//! Trace data arrives as an [`UpstreamSegment`] whose `segment` bytes hold a
//! nested protobuf-encoded [`SegmentObject`]; span, service and peer names
//! are interned through the register RPCs and referenced by numeric id.

#[derive(Clone, PartialEq, ::prost::Message, ::serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UniqueId {
    #[prost(int64, repeated, tag = "1")]
    pub id_parts: ::prost::alloc::vec::Vec<i64>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpstreamSegment {
    #[prost(message, repeated, tag = "1")]
    pub global_trace_ids: ::prost::alloc::vec::Vec<UniqueId>,
    /// Protobuf-encoded `SegmentObject`.
    #[prost(bytes = "vec", tag = "2")]
    pub segment: ::prost::alloc::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message, ::serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentObject {
    #[prost(message, optional, tag = "1")]
    pub trace_segment_id: ::core::option::Option<UniqueId>,
    #[prost(message, repeated, tag = "2")]
    pub spans: ::prost::alloc::vec::Vec<SpanObjectV2>,
    #[prost(int32, tag = "3")]
    pub service_id: i32,
    #[prost(int32, tag = "4")]
    pub service_instance_id: i32,
    #[prost(bool, tag = "5")]
    pub is_size_limited: bool,
}

#[derive(Clone, PartialEq, ::prost::Message, ::serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentReference {
    #[prost(enumeration = "RefType", tag = "1")]
    pub ref_type: i32,
    #[prost(message, optional, tag = "2")]
    pub parent_trace_segment_id: ::core::option::Option<UniqueId>,
    #[prost(int32, tag = "3")]
    pub parent_span_id: i32,
    #[prost(int32, tag = "4")]
    pub parent_service_instance_id: i32,
    #[prost(string, tag = "5")]
    pub network_address: ::prost::alloc::string::String,
    #[prost(int32, tag = "6")]
    pub network_address_id: i32,
    #[prost(int32, tag = "7")]
    pub entry_service_instance_id: i32,
    #[prost(string, tag = "8")]
    pub entry_endpoint: ::prost::alloc::string::String,
    #[prost(int32, tag = "9")]
    pub entry_endpoint_id: i32,
    #[prost(string, tag = "10")]
    pub parent_endpoint: ::prost::alloc::string::String,
    #[prost(int32, tag = "11")]
    pub parent_endpoint_id: i32,
}

#[derive(Clone, PartialEq, ::prost::Message, ::serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpanObjectV2 {
    #[prost(int32, tag = "1")]
    pub span_id: i32,
    /// `-1` means "root of the segment, no in-segment parent".
    #[prost(int32, tag = "2")]
    pub parent_span_id: i32,
    /// Milliseconds since epoch.
    #[prost(int64, tag = "3")]
    pub start_time: i64,
    #[prost(int64, tag = "4")]
    pub end_time: i64,
    #[prost(message, repeated, tag = "5")]
    pub refs: ::prost::alloc::vec::Vec<SegmentReference>,
    /// Interned id into the endpoint register when `operation_name` is empty.
    #[prost(int32, tag = "6")]
    pub operation_name_id: i32,
    #[prost(string, tag = "7")]
    pub operation_name: ::prost::alloc::string::String,
    /// Interned id into the network-address register when `peer` is empty.
    #[prost(int32, tag = "8")]
    pub peer_id: i32,
    #[prost(string, tag = "9")]
    pub peer: ::prost::alloc::string::String,
    #[prost(enumeration = "SpanType", tag = "10")]
    pub span_type: i32,
    #[prost(enumeration = "SpanLayer", tag = "11")]
    pub span_layer: i32,
    #[prost(int32, tag = "12")]
    pub component_id: i32,
    #[prost(string, tag = "13")]
    pub component: ::prost::alloc::string::String,
    #[prost(bool, tag = "14")]
    pub is_error: bool,
    #[prost(message, repeated, tag = "15")]
    pub tags: ::prost::alloc::vec::Vec<KeyStringValuePair>,
    #[prost(message, repeated, tag = "16")]
    pub logs: ::prost::alloc::vec::Vec<Log>,
}

#[derive(Clone, PartialEq, ::prost::Message, ::serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyStringValuePair {
    #[prost(string, tag = "1")]
    pub key: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub value: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message, ::serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    #[prost(int64, tag = "1")]
    pub time: i64,
    #[prost(message, repeated, tag = "2")]
    pub data: ::prost::alloc::vec::Vec<KeyStringValuePair>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Command {
    #[prost(string, tag = "1")]
    pub command: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "2")]
    pub args: ::prost::alloc::vec::Vec<KeyStringValuePair>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Commands {
    #[prost(message, repeated, tag = "1")]
    pub commands: ::prost::alloc::vec::Vec<Command>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Services {
    #[prost(message, repeated, tag = "1")]
    pub services: ::prost::alloc::vec::Vec<Service>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Service {
    #[prost(string, tag = "1")]
    pub service_name: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ServiceRegisterMapping {
    #[prost(message, repeated, tag = "1")]
    pub services: ::prost::alloc::vec::Vec<KeyIntValuePair>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct KeyIntValuePair {
    #[prost(string, tag = "1")]
    pub key: ::prost::alloc::string::String,
    #[prost(int32, tag = "2")]
    pub value: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ServiceInstances {
    #[prost(message, repeated, tag = "1")]
    pub instances: ::prost::alloc::vec::Vec<ServiceInstance>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ServiceInstance {
    #[prost(int32, tag = "1")]
    pub service_id: i32,
    #[prost(string, tag = "2")]
    pub instance_uuid: ::prost::alloc::string::String,
    #[prost(int64, tag = "3")]
    pub time: i64,
    #[prost(message, repeated, tag = "4")]
    pub properties: ::prost::alloc::vec::Vec<KeyStringValuePair>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ServiceInstanceRegisterMapping {
    #[prost(message, repeated, tag = "1")]
    pub service_instances: ::prost::alloc::vec::Vec<KeyIntValuePair>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Endpoints {
    #[prost(message, repeated, tag = "1")]
    pub endpoints: ::prost::alloc::vec::Vec<Endpoint>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Endpoint {
    #[prost(int32, tag = "1")]
    pub service_id: i32,
    #[prost(string, tag = "2")]
    pub endpoint_name: ::prost::alloc::string::String,
    #[prost(enumeration = "DetectPoint", tag = "3")]
    pub from: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EndpointMapping {
    #[prost(message, repeated, tag = "1")]
    pub elements: ::prost::alloc::vec::Vec<EndpointMappingElement>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EndpointMappingElement {
    #[prost(int32, tag = "1")]
    pub service_id: i32,
    #[prost(string, tag = "2")]
    pub endpoint_name: ::prost::alloc::string::String,
    #[prost(int32, tag = "3")]
    pub endpoint_id: i32,
    #[prost(enumeration = "DetectPoint", tag = "4")]
    pub from: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NetAddresses {
    #[prost(string, repeated, tag = "1")]
    pub addresses: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NetAddressMapping {
    #[prost(message, repeated, tag = "1")]
    pub address_ids: ::prost::alloc::vec::Vec<KeyIntValuePair>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ServiceInstancePingPkg {
    #[prost(int32, tag = "1")]
    pub service_instance_id: i32,
    #[prost(int64, tag = "2")]
    pub time: i64,
    #[prost(string, tag = "3")]
    pub service_instance_uuid: ::prost::alloc::string::String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum SpanType {
    Entry = 0,
    Exit = 1,
    Local = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum SpanLayer {
    Unknown = 0,
    Database = 1,
    RpcFramework = 2,
    Http = 3,
    Mq = 4,
    Cache = 5,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum RefType {
    CrossProcess = 0,
    CrossThread = 1,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum DetectPoint {
    Client = 0,
    Server = 1,
    Proxy = 2,
}

/// Generated server implementations.
pub mod trace_segment_report_service_server {
    #![allow(
        unused_variables,
        dead_code,
        missing_docs,
        clippy::wildcard_imports,
        clippy::let_unit_value
    )]
    use tonic::codegen::*;
    /// Generated trait containing gRPC methods that should be implemented for
    /// use with TraceSegmentReportServiceServer.
    #[async_trait]
    pub trait TraceSegmentReportService: std::marker::Send + std::marker::Sync + 'static {
        async fn collect(
            &self,
            request: tonic::Request<tonic::Streaming<super::UpstreamSegment>>,
        ) -> std::result::Result<tonic::Response<super::Commands>, tonic::Status>;
    }
    #[derive(Debug)]
    pub struct TraceSegmentReportServiceServer<T> {
        inner: Arc<T>,
        accept_compression_encodings: EnabledCompressionEncodings,
        send_compression_encodings: EnabledCompressionEncodings,
        max_decoding_message_size: Option<usize>,
        max_encoding_message_size: Option<usize>,
    }
    impl<T> TraceSegmentReportServiceServer<T> {
        pub fn new(inner: T) -> Self {
            Self::from_arc(Arc::new(inner))
        }
        pub fn from_arc(inner: Arc<T>) -> Self {
            Self {
                inner,
                accept_compression_encodings: Default::default(),
                send_compression_encodings: Default::default(),
                max_decoding_message_size: None,
                max_encoding_message_size: None,
            }
        }
        pub fn with_interceptor<F>(inner: T, interceptor: F) -> InterceptedService<Self, F>
        where
            F: tonic::service::Interceptor,
        {
            InterceptedService::new(Self::new(inner), interceptor)
        }
        /// Enable decompressing requests with the given encoding.
        #[must_use]
        pub fn accept_compressed(mut self, encoding: CompressionEncoding) -> Self {
            self.accept_compression_encodings.enable(encoding);
            self
        }
        /// Compress responses with the given encoding, if the client supports it.
        #[must_use]
        pub fn send_compressed(mut self, encoding: CompressionEncoding) -> Self {
            self.send_compression_encodings.enable(encoding);
            self
        }
        /// Limits the maximum size of a decoded message.
        #[must_use]
        pub fn max_decoding_message_size(mut self, limit: usize) -> Self {
            self.max_decoding_message_size = Some(limit);
            self
        }
        /// Limits the maximum size of an encoded message.
        #[must_use]
        pub fn max_encoding_message_size(mut self, limit: usize) -> Self {
            self.max_encoding_message_size = Some(limit);
            self
        }
    }
    impl<T, B> tonic::codegen::Service<http::Request<B>> for TraceSegmentReportServiceServer<T>
    where
        T: TraceSegmentReportService,
        B: Body + std::marker::Send + 'static,
        B::Error: Into<StdError> + std::marker::Send + 'static,
    {
        type Response = http::Response<tonic::body::BoxBody>;
        type Error = std::convert::Infallible;
        type Future = BoxFuture<Self::Response, Self::Error>;
        fn poll_ready(
            &mut self,
            _cx: &mut Context<'_>,
        ) -> Poll<std::result::Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }
        fn call(&mut self, req: http::Request<B>) -> Self::Future {
            match req.uri().path() {
                "/TraceSegmentReportService/collect" => {
                    #[allow(non_camel_case_types)]
                    struct collectSvc<T: TraceSegmentReportService>(pub Arc<T>);
                    impl<T: TraceSegmentReportService>
                        tonic::server::ClientStreamingService<super::UpstreamSegment>
                        for collectSvc<T>
                    {
                        type Response = super::Commands;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<tonic::Streaming<super::UpstreamSegment>>,
                        ) -> Self::Future {
                            let inner = Arc::clone(&self.0);
                            let fut = async move {
                                <T as TraceSegmentReportService>::collect(&inner, request).await
                            };
                            Box::pin(fut)
                        }
                    }
                    let accept_compression_encodings = self.accept_compression_encodings;
                    let send_compression_encodings = self.send_compression_encodings;
                    let max_decoding_message_size = self.max_decoding_message_size;
                    let max_encoding_message_size = self.max_encoding_message_size;
                    let inner = self.inner.clone();
                    let fut = async move {
                        let method = collectSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec)
                            .apply_compression_config(
                                accept_compression_encodings,
                                send_compression_encodings,
                            )
                            .apply_max_message_size_config(
                                max_decoding_message_size,
                                max_encoding_message_size,
                            );
                        let res = grpc.client_streaming(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                _ => Box::pin(async move {
                    let mut response = http::Response::new(empty_body());
                    let headers = response.headers_mut();
                    headers.insert(
                        tonic::Status::GRPC_STATUS,
                        (tonic::Code::Unimplemented as i32).into(),
                    );
                    headers.insert(
                        http::header::CONTENT_TYPE,
                        tonic::metadata::GRPC_CONTENT_TYPE,
                    );
                    Ok(response)
                }),
            }
        }
    }
    impl<T> Clone for TraceSegmentReportServiceServer<T> {
        fn clone(&self) -> Self {
            let inner = self.inner.clone();
            Self {
                inner,
                accept_compression_encodings: self.accept_compression_encodings,
                send_compression_encodings: self.send_compression_encodings,
                max_decoding_message_size: self.max_decoding_message_size,
                max_encoding_message_size: self.max_encoding_message_size,
            }
        }
    }
    /// Generated gRPC service name
    pub const SERVICE_NAME: &str = "TraceSegmentReportService";
    impl<T> tonic::server::NamedService for TraceSegmentReportServiceServer<T> {
        const NAME: &'static str = SERVICE_NAME;
    }
}

/// Generated server implementations.
pub mod register_server {
    #![allow(
        unused_variables,
        dead_code,
        missing_docs,
        clippy::wildcard_imports,
        clippy::let_unit_value
    )]
    use tonic::codegen::*;
    /// Generated trait containing gRPC methods that should be implemented for
    /// use with RegisterServer.
    #[async_trait]
    pub trait Register: std::marker::Send + std::marker::Sync + 'static {
        async fn do_service_register(
            &self,
            request: tonic::Request<super::Services>,
        ) -> std::result::Result<tonic::Response<super::ServiceRegisterMapping>, tonic::Status>;
        async fn do_service_instance_register(
            &self,
            request: tonic::Request<super::ServiceInstances>,
        ) -> std::result::Result<
            tonic::Response<super::ServiceInstanceRegisterMapping>,
            tonic::Status,
        >;
        async fn do_endpoint_register(
            &self,
            request: tonic::Request<super::Endpoints>,
        ) -> std::result::Result<tonic::Response<super::EndpointMapping>, tonic::Status>;
        async fn do_network_address_register(
            &self,
            request: tonic::Request<super::NetAddresses>,
        ) -> std::result::Result<tonic::Response<super::NetAddressMapping>, tonic::Status>;
    }
    #[derive(Debug)]
    pub struct RegisterServer<T> {
        inner: Arc<T>,
        accept_compression_encodings: EnabledCompressionEncodings,
        send_compression_encodings: EnabledCompressionEncodings,
        max_decoding_message_size: Option<usize>,
        max_encoding_message_size: Option<usize>,
    }
    impl<T> RegisterServer<T> {
        pub fn new(inner: T) -> Self {
            Self::from_arc(Arc::new(inner))
        }
        pub fn from_arc(inner: Arc<T>) -> Self {
            Self {
                inner,
                accept_compression_encodings: Default::default(),
                send_compression_encodings: Default::default(),
                max_decoding_message_size: None,
                max_encoding_message_size: None,
            }
        }
        pub fn with_interceptor<F>(inner: T, interceptor: F) -> InterceptedService<Self, F>
        where
            F: tonic::service::Interceptor,
        {
            InterceptedService::new(Self::new(inner), interceptor)
        }
        /// Enable decompressing requests with the given encoding.
        #[must_use]
        pub fn accept_compressed(mut self, encoding: CompressionEncoding) -> Self {
            self.accept_compression_encodings.enable(encoding);
            self
        }
        /// Compress responses with the given encoding, if the client supports it.
        #[must_use]
        pub fn send_compressed(mut self, encoding: CompressionEncoding) -> Self {
            self.send_compression_encodings.enable(encoding);
            self
        }
        /// Limits the maximum size of a decoded message.
        #[must_use]
        pub fn max_decoding_message_size(mut self, limit: usize) -> Self {
            self.max_decoding_message_size = Some(limit);
            self
        }
        /// Limits the maximum size of an encoded message.
        #[must_use]
        pub fn max_encoding_message_size(mut self, limit: usize) -> Self {
            self.max_encoding_message_size = Some(limit);
            self
        }
    }
    impl<T, B> tonic::codegen::Service<http::Request<B>> for RegisterServer<T>
    where
        T: Register,
        B: Body + std::marker::Send + 'static,
        B::Error: Into<StdError> + std::marker::Send + 'static,
    {
        type Response = http::Response<tonic::body::BoxBody>;
        type Error = std::convert::Infallible;
        type Future = BoxFuture<Self::Response, Self::Error>;
        fn poll_ready(
            &mut self,
            _cx: &mut Context<'_>,
        ) -> Poll<std::result::Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }
        fn call(&mut self, req: http::Request<B>) -> Self::Future {
            match req.uri().path() {
                "/Register/doServiceRegister" => {
                    #[allow(non_camel_case_types)]
                    struct doServiceRegisterSvc<T: Register>(pub Arc<T>);
                    impl<T: Register> tonic::server::UnaryService<super::Services>
                        for doServiceRegisterSvc<T>
                    {
                        type Response = super::ServiceRegisterMapping;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::Services>,
                        ) -> Self::Future {
                            let inner = Arc::clone(&self.0);
                            let fut = async move {
                                <T as Register>::do_service_register(&inner, request).await
                            };
                            Box::pin(fut)
                        }
                    }
                    let accept_compression_encodings = self.accept_compression_encodings;
                    let send_compression_encodings = self.send_compression_encodings;
                    let max_decoding_message_size = self.max_decoding_message_size;
                    let max_encoding_message_size = self.max_encoding_message_size;
                    let inner = self.inner.clone();
                    let fut = async move {
                        let method = doServiceRegisterSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec)
                            .apply_compression_config(
                                accept_compression_encodings,
                                send_compression_encodings,
                            )
                            .apply_max_message_size_config(
                                max_decoding_message_size,
                                max_encoding_message_size,
                            );
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/Register/doServiceInstanceRegister" => {
                    #[allow(non_camel_case_types)]
                    struct doServiceInstanceRegisterSvc<T: Register>(pub Arc<T>);
                    impl<T: Register> tonic::server::UnaryService<super::ServiceInstances>
                        for doServiceInstanceRegisterSvc<T>
                    {
                        type Response = super::ServiceInstanceRegisterMapping;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ServiceInstances>,
                        ) -> Self::Future {
                            let inner = Arc::clone(&self.0);
                            let fut = async move {
                                <T as Register>::do_service_instance_register(&inner, request)
                                    .await
                            };
                            Box::pin(fut)
                        }
                    }
                    let accept_compression_encodings = self.accept_compression_encodings;
                    let send_compression_encodings = self.send_compression_encodings;
                    let max_decoding_message_size = self.max_decoding_message_size;
                    let max_encoding_message_size = self.max_encoding_message_size;
                    let inner = self.inner.clone();
                    let fut = async move {
                        let method = doServiceInstanceRegisterSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec)
                            .apply_compression_config(
                                accept_compression_encodings,
                                send_compression_encodings,
                            )
                            .apply_max_message_size_config(
                                max_decoding_message_size,
                                max_encoding_message_size,
                            );
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/Register/doEndpointRegister" => {
                    #[allow(non_camel_case_types)]
                    struct doEndpointRegisterSvc<T: Register>(pub Arc<T>);
                    impl<T: Register> tonic::server::UnaryService<super::Endpoints>
                        for doEndpointRegisterSvc<T>
                    {
                        type Response = super::EndpointMapping;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::Endpoints>,
                        ) -> Self::Future {
                            let inner = Arc::clone(&self.0);
                            let fut = async move {
                                <T as Register>::do_endpoint_register(&inner, request).await
                            };
                            Box::pin(fut)
                        }
                    }
                    let accept_compression_encodings = self.accept_compression_encodings;
                    let send_compression_encodings = self.send_compression_encodings;
                    let max_decoding_message_size = self.max_decoding_message_size;
                    let max_encoding_message_size = self.max_encoding_message_size;
                    let inner = self.inner.clone();
                    let fut = async move {
                        let method = doEndpointRegisterSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec)
                            .apply_compression_config(
                                accept_compression_encodings,
                                send_compression_encodings,
                            )
                            .apply_max_message_size_config(
                                max_decoding_message_size,
                                max_encoding_message_size,
                            );
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/Register/doNetworkAddressRegister" => {
                    #[allow(non_camel_case_types)]
                    struct doNetworkAddressRegisterSvc<T: Register>(pub Arc<T>);
                    impl<T: Register> tonic::server::UnaryService<super::NetAddresses>
                        for doNetworkAddressRegisterSvc<T>
                    {
                        type Response = super::NetAddressMapping;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::NetAddresses>,
                        ) -> Self::Future {
                            let inner = Arc::clone(&self.0);
                            let fut = async move {
                                <T as Register>::do_network_address_register(&inner, request)
                                    .await
                            };
                            Box::pin(fut)
                        }
                    }
                    let accept_compression_encodings = self.accept_compression_encodings;
                    let send_compression_encodings = self.send_compression_encodings;
                    let max_decoding_message_size = self.max_decoding_message_size;
                    let max_encoding_message_size = self.max_encoding_message_size;
                    let inner = self.inner.clone();
                    let fut = async move {
                        let method = doNetworkAddressRegisterSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec)
                            .apply_compression_config(
                                accept_compression_encodings,
                                send_compression_encodings,
                            )
                            .apply_max_message_size_config(
                                max_decoding_message_size,
                                max_encoding_message_size,
                            );
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                _ => Box::pin(async move {
                    let mut response = http::Response::new(empty_body());
                    let headers = response.headers_mut();
                    headers.insert(
                        tonic::Status::GRPC_STATUS,
                        (tonic::Code::Unimplemented as i32).into(),
                    );
                    headers.insert(
                        http::header::CONTENT_TYPE,
                        tonic::metadata::GRPC_CONTENT_TYPE,
                    );
                    Ok(response)
                }),
            }
        }
    }
    impl<T> Clone for RegisterServer<T> {
        fn clone(&self) -> Self {
            let inner = self.inner.clone();
            Self {
                inner,
                accept_compression_encodings: self.accept_compression_encodings,
                send_compression_encodings: self.send_compression_encodings,
                max_decoding_message_size: self.max_decoding_message_size,
                max_encoding_message_size: self.max_encoding_message_size,
            }
        }
    }
    /// Generated gRPC service name
    pub const SERVICE_NAME: &str = "Register";
    impl<T> tonic::server::NamedService for RegisterServer<T> {
        const NAME: &'static str = SERVICE_NAME;
    }
}

/// Generated server implementations.
pub mod service_instance_ping_server {
    #![allow(
        unused_variables,
        dead_code,
        missing_docs,
        clippy::wildcard_imports,
        clippy::let_unit_value
    )]
    use tonic::codegen::*;
    /// Generated trait containing gRPC methods that should be implemented for
    /// use with ServiceInstancePingServer.
    #[async_trait]
    pub trait ServiceInstancePing: std::marker::Send + std::marker::Sync + 'static {
        async fn do_ping(
            &self,
            request: tonic::Request<super::ServiceInstancePingPkg>,
        ) -> std::result::Result<tonic::Response<super::Commands>, tonic::Status>;
    }
    #[derive(Debug)]
    pub struct ServiceInstancePingServer<T> {
        inner: Arc<T>,
        accept_compression_encodings: EnabledCompressionEncodings,
        send_compression_encodings: EnabledCompressionEncodings,
        max_decoding_message_size: Option<usize>,
        max_encoding_message_size: Option<usize>,
    }
    impl<T> ServiceInstancePingServer<T> {
        pub fn new(inner: T) -> Self {
            Self::from_arc(Arc::new(inner))
        }
        pub fn from_arc(inner: Arc<T>) -> Self {
            Self {
                inner,
                accept_compression_encodings: Default::default(),
                send_compression_encodings: Default::default(),
                max_decoding_message_size: None,
                max_encoding_message_size: None,
            }
        }
        pub fn with_interceptor<F>(inner: T, interceptor: F) -> InterceptedService<Self, F>
        where
            F: tonic::service::Interceptor,
        {
            InterceptedService::new(Self::new(inner), interceptor)
        }
        /// Enable decompressing requests with the given encoding.
        #[must_use]
        pub fn accept_compressed(mut self, encoding: CompressionEncoding) -> Self {
            self.accept_compression_encodings.enable(encoding);
            self
        }
        /// Compress responses with the given encoding, if the client supports it.
        #[must_use]
        pub fn send_compressed(mut self, encoding: CompressionEncoding) -> Self {
            self.send_compression_encodings.enable(encoding);
            self
        }
        /// Limits the maximum size of a decoded message.
        #[must_use]
        pub fn max_decoding_message_size(mut self, limit: usize) -> Self {
            self.max_decoding_message_size = Some(limit);
            self
        }
        /// Limits the maximum size of an encoded message.
        #[must_use]
        pub fn max_encoding_message_size(mut self, limit: usize) -> Self {
            self.max_encoding_message_size = Some(limit);
            self
        }
    }
    impl<T, B> tonic::codegen::Service<http::Request<B>> for ServiceInstancePingServer<T>
    where
        T: ServiceInstancePing,
        B: Body + std::marker::Send + 'static,
        B::Error: Into<StdError> + std::marker::Send + 'static,
    {
        type Response = http::Response<tonic::body::BoxBody>;
        type Error = std::convert::Infallible;
        type Future = BoxFuture<Self::Response, Self::Error>;
        fn poll_ready(
            &mut self,
            _cx: &mut Context<'_>,
        ) -> Poll<std::result::Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }
        fn call(&mut self, req: http::Request<B>) -> Self::Future {
            match req.uri().path() {
                "/ServiceInstancePing/doPing" => {
                    #[allow(non_camel_case_types)]
                    struct doPingSvc<T: ServiceInstancePing>(pub Arc<T>);
                    impl<T: ServiceInstancePing>
                        tonic::server::UnaryService<super::ServiceInstancePingPkg>
                        for doPingSvc<T>
                    {
                        type Response = super::Commands;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ServiceInstancePingPkg>,
                        ) -> Self::Future {
                            let inner = Arc::clone(&self.0);
                            let fut = async move {
                                <T as ServiceInstancePing>::do_ping(&inner, request).await
                            };
                            Box::pin(fut)
                        }
                    }
                    let accept_compression_encodings = self.accept_compression_encodings;
                    let send_compression_encodings = self.send_compression_encodings;
                    let max_decoding_message_size = self.max_decoding_message_size;
                    let max_encoding_message_size = self.max_encoding_message_size;
                    let inner = self.inner.clone();
                    let fut = async move {
                        let method = doPingSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec)
                            .apply_compression_config(
                                accept_compression_encodings,
                                send_compression_encodings,
                            )
                            .apply_max_message_size_config(
                                max_decoding_message_size,
                                max_encoding_message_size,
                            );
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                _ => Box::pin(async move {
                    let mut response = http::Response::new(empty_body());
                    let headers = response.headers_mut();
                    headers.insert(
                        tonic::Status::GRPC_STATUS,
                        (tonic::Code::Unimplemented as i32).into(),
                    );
                    headers.insert(
                        http::header::CONTENT_TYPE,
                        tonic::metadata::GRPC_CONTENT_TYPE,
                    );
                    Ok(response)
                }),
            }
        }
    }
    impl<T> Clone for ServiceInstancePingServer<T> {
        fn clone(&self) -> Self {
            let inner = self.inner.clone();
            Self {
                inner,
                accept_compression_encodings: self.accept_compression_encodings,
                send_compression_encodings: self.send_compression_encodings,
                max_decoding_message_size: self.max_decoding_message_size,
                max_encoding_message_size: self.max_encoding_message_size,
            }
        }
    }
    /// Generated gRPC service name
    pub const SERVICE_NAME: &str = "ServiceInstancePing";
    impl<T> tonic::server::NamedService for ServiceInstancePingServer<T> {
        const NAME: &'static str = SERVICE_NAME;
    }
}
