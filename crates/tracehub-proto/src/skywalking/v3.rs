// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Prost messages and tonic server scaffolding for the SkyWalking v3
//! tracing protocol (`skywalking.v3` package), committed in generated form.

#[derive(Clone, PartialEq, ::prost::Message, ::serde::Serialize, ::serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeyStringValuePair {
    #[prost(string, tag = "1")]
    pub key: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub value: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message, ::serde::Serialize, ::serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Log {
    #[prost(int64, tag = "1")]
    pub time: i64,
    #[prost(message, repeated, tag = "2")]
    pub data: ::prost::alloc::vec::Vec<KeyStringValuePair>,
}

#[derive(Clone, PartialEq, ::prost::Message, ::serde::Serialize, ::serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SegmentReference {
    #[prost(enumeration = "RefType", tag = "1")]
    #[serde(with = "ref_type_serde")]
    pub ref_type: i32,
    #[prost(string, tag = "2")]
    pub trace_id: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub parent_trace_segment_id: ::prost::alloc::string::String,
    #[prost(int32, tag = "4")]
    pub parent_span_id: i32,
    #[prost(string, tag = "5")]
    pub parent_service: ::prost::alloc::string::String,
    #[prost(string, tag = "6")]
    pub parent_service_instance: ::prost::alloc::string::String,
    #[prost(string, tag = "7")]
    pub parent_endpoint: ::prost::alloc::string::String,
    #[prost(string, tag = "8")]
    pub network_address_used_at_peer: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message, ::serde::Serialize, ::serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpanObject {
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
    #[prost(string, tag = "6")]
    pub operation_name: ::prost::alloc::string::String,
    #[prost(string, tag = "7")]
    pub peer: ::prost::alloc::string::String,
    #[prost(enumeration = "SpanType", tag = "8")]
    #[serde(with = "span_type_serde")]
    pub span_type: i32,
    #[prost(enumeration = "SpanLayer", tag = "9")]
    #[serde(with = "span_layer_serde")]
    pub span_layer: i32,
    #[prost(int32, tag = "10")]
    pub component_id: i32,
    #[prost(bool, tag = "11")]
    pub is_error: bool,
    #[prost(message, repeated, tag = "12")]
    pub tags: ::prost::alloc::vec::Vec<KeyStringValuePair>,
    #[prost(message, repeated, tag = "13")]
    pub logs: ::prost::alloc::vec::Vec<Log>,
    #[prost(bool, tag = "14")]
    pub skip_analysis: bool,
}

#[derive(Clone, PartialEq, ::prost::Message, ::serde::Serialize, ::serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SegmentObject {
    #[prost(string, tag = "1")]
    pub trace_id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub trace_segment_id: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "3")]
    pub spans: ::prost::alloc::vec::Vec<SpanObject>,
    #[prost(string, tag = "4")]
    pub service: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub service_instance: ::prost::alloc::string::String,
    #[prost(bool, tag = "6")]
    pub is_size_limited: bool,
}

#[derive(Clone, PartialEq, ::prost::Message, ::serde::Serialize, ::serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Command {
    #[prost(string, tag = "1")]
    pub command: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "2")]
    pub args: ::prost::alloc::vec::Vec<KeyStringValuePair>,
}

#[derive(Clone, PartialEq, ::prost::Message, ::serde::Serialize, ::serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Commands {
    #[prost(message, repeated, tag = "1")]
    pub commands: ::prost::alloc::vec::Vec<Command>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum SpanType {
    Entry = 0,
    Exit = 1,
    Local = 2,
}
impl SpanType {
    /// String value of the enum field names used in the ProtoBuf definition.
    pub fn as_str_name(&self) -> &'static str {
        match self {
            SpanType::Entry => "Entry",
            SpanType::Exit => "Exit",
            SpanType::Local => "Local",
        }
    }
    /// Creates an enum from field names used in the ProtoBuf definition.
    pub fn from_str_name(value: &str) -> ::core::option::Option<Self> {
        match value {
            "Entry" => Some(Self::Entry),
            "Exit" => Some(Self::Exit),
            "Local" => Some(Self::Local),
            _ => None,
        }
    }
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
impl SpanLayer {
    /// String value of the enum field names used in the ProtoBuf definition.
    pub fn as_str_name(&self) -> &'static str {
        match self {
            SpanLayer::Unknown => "Unknown",
            SpanLayer::Database => "Database",
            SpanLayer::RpcFramework => "RPCFramework",
            SpanLayer::Http => "Http",
            SpanLayer::Mq => "MQ",
            SpanLayer::Cache => "Cache",
        }
    }
    /// Creates an enum from field names used in the ProtoBuf definition.
    pub fn from_str_name(value: &str) -> ::core::option::Option<Self> {
        match value {
            "Unknown" => Some(Self::Unknown),
            "Database" => Some(Self::Database),
            "RPCFramework" => Some(Self::RpcFramework),
            "Http" => Some(Self::Http),
            "MQ" => Some(Self::Mq),
            "Cache" => Some(Self::Cache),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum RefType {
    CrossProcess = 0,
    CrossThread = 1,
}
impl RefType {
    /// String value of the enum field names used in the ProtoBuf definition.
    pub fn as_str_name(&self) -> &'static str {
        match self {
            RefType::CrossProcess => "CrossProcess",
            RefType::CrossThread => "CrossThread",
        }
    }
    /// Creates an enum from field names used in the ProtoBuf definition.
    pub fn from_str_name(value: &str) -> ::core::option::Option<Self> {
        match value {
            "CrossProcess" => Some(Self::CrossProcess),
            "CrossThread" => Some(Self::CrossThread),
            _ => None,
        }
    }
}

pub mod span_type_serde {
    use super::SpanType;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &i32, serializer: S) -> Result<S::Ok, S::Error> {
        match SpanType::try_from(*value) {
            Ok(v) => serializer.serialize_str(v.as_str_name()),
            Err(_) => serializer.serialize_i32(*value),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
        crate::skywalking::enum_serde::deserialize(deserializer, |name| {
            SpanType::from_str_name(name).map(|v| v as i32)
        })
    }
}

pub mod span_layer_serde {
    use super::SpanLayer;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &i32, serializer: S) -> Result<S::Ok, S::Error> {
        match SpanLayer::try_from(*value) {
            Ok(v) => serializer.serialize_str(v.as_str_name()),
            Err(_) => serializer.serialize_i32(*value),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
        crate::skywalking::enum_serde::deserialize(deserializer, |name| {
            SpanLayer::from_str_name(name).map(|v| v as i32)
        })
    }
}

pub mod ref_type_serde {
    use super::RefType;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &i32, serializer: S) -> Result<S::Ok, S::Error> {
        match RefType::try_from(*value) {
            Ok(v) => serializer.serialize_str(v.as_str_name()),
            Err(_) => serializer.serialize_i32(*value),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
        crate::skywalking::enum_serde::deserialize(deserializer, |name| {
            RefType::from_str_name(name).map(|v| v as i32)
        })
    }
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
            request: tonic::Request<tonic::Streaming<super::SegmentObject>>,
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
                "/skywalking.v3.TraceSegmentReportService/collect" => {
                    #[allow(non_camel_case_types)]
                    struct collectSvc<T: TraceSegmentReportService>(pub Arc<T>);
                    impl<T: TraceSegmentReportService>
                        tonic::server::ClientStreamingService<super::SegmentObject>
                        for collectSvc<T>
                    {
                        type Response = super::Commands;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<tonic::Streaming<super::SegmentObject>>,
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
    pub const SERVICE_NAME: &str = "skywalking.v3.TraceSegmentReportService";
    impl<T> tonic::server::NamedService for TraceSegmentReportServiceServer<T> {
        const NAME: &'static str = SERVICE_NAME;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_json_accepts_symbolic_enum_names() {
        let body = r#"{
            "traceId": "t1",
            "traceSegmentId": "s1",
            "service": "gateway",
            "serviceInstance": "gateway-0",
            "spans": [{
                "spanId": 0,
                "parentSpanId": -1,
                "startTime": 1700000000000,
                "endTime": 1700000000120,
                "operationName": "/rpc",
                "spanType": "Exit",
                "spanLayer": "Http",
                "isError": false,
                "refs": [{"refType": "CrossProcess", "parentTraceSegmentId": "s0", "parentSpanId": 3}]
            }]
        }"#;
        let segment: SegmentObject = serde_json::from_str(body).unwrap();
        assert_eq!(segment.spans.len(), 1);
        assert_eq!(segment.spans[0].span_type(), SpanType::Exit);
        assert_eq!(segment.spans[0].refs[0].ref_type(), RefType::CrossProcess);
    }

    #[test]
    fn segment_json_accepts_numeric_enum_values() {
        let body = r#"{"traceId":"t","traceSegmentId":"s","spans":[{"spanId":1,"spanType":2}]}"#;
        let segment: SegmentObject = serde_json::from_str(body).unwrap();
        assert_eq!(segment.spans[0].span_type(), SpanType::Local);
    }
}
