// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Prost messages for `zipkin.proto3`, committed in generated form.

/// A list of spans, the body of a `POST /api/v2/spans` with
/// `Content-Type: application/x-protobuf`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListOfSpans {
    #[prost(message, repeated, tag = "1")]
    pub spans: ::prost::alloc::vec::Vec<Span>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Span {
    /// 8 or 16 raw bytes.
    #[prost(bytes = "vec", tag = "1")]
    pub trace_id: ::prost::alloc::vec::Vec<u8>,
    /// Absent for root spans, exactly 8 raw bytes otherwise.
    #[prost(bytes = "vec", tag = "2")]
    pub parent_id: ::prost::alloc::vec::Vec<u8>,
    /// Exactly 8 raw bytes.
    #[prost(bytes = "vec", tag = "3")]
    pub id: ::prost::alloc::vec::Vec<u8>,
    #[prost(enumeration = "span::Kind", tag = "4")]
    pub kind: i32,
    #[prost(string, tag = "5")]
    pub name: ::prost::alloc::string::String,
    #[prost(fixed64, tag = "6")]
    pub timestamp: u64,
    #[prost(uint64, tag = "7")]
    pub duration: u64,
    #[prost(message, optional, tag = "8")]
    pub local_endpoint: ::core::option::Option<Endpoint>,
    #[prost(message, optional, tag = "9")]
    pub remote_endpoint: ::core::option::Option<Endpoint>,
    #[prost(message, repeated, tag = "10")]
    pub annotations: ::prost::alloc::vec::Vec<Annotation>,
    #[prost(map = "string, string", tag = "11")]
    pub tags: ::std::collections::HashMap<
        ::prost::alloc::string::String,
        ::prost::alloc::string::String,
    >,
    #[prost(bool, tag = "12")]
    pub debug: bool,
    #[prost(bool, tag = "13")]
    pub shared: bool,
}

/// Nested message and enum types in `Span`.
pub mod span {
    #[derive(
        Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration
    )]
    #[repr(i32)]
    pub enum Kind {
        SpanKindUnspecified = 0,
        Client = 1,
        Server = 2,
        Producer = 3,
        Consumer = 4,
    }
    impl Kind {
        /// String value of the enum field names used in the ProtoBuf definition.
        pub fn as_str_name(&self) -> &'static str {
            match self {
                Kind::SpanKindUnspecified => "SPAN_KIND_UNSPECIFIED",
                Kind::Client => "CLIENT",
                Kind::Server => "SERVER",
                Kind::Producer => "PRODUCER",
                Kind::Consumer => "CONSUMER",
            }
        }
        /// Creates an enum from field names used in the ProtoBuf definition.
        pub fn from_str_name(value: &str) -> ::core::option::Option<Self> {
            match value {
                "SPAN_KIND_UNSPECIFIED" => Some(Self::SpanKindUnspecified),
                "CLIENT" => Some(Self::Client),
                "SERVER" => Some(Self::Server),
                "PRODUCER" => Some(Self::Producer),
                "CONSUMER" => Some(Self::Consumer),
                _ => None,
            }
        }
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Endpoint {
    #[prost(string, tag = "1")]
    pub service_name: ::prost::alloc::string::String,
    #[prost(bytes = "vec", tag = "2")]
    pub ipv4: ::prost::alloc::vec::Vec<u8>,
    #[prost(bytes = "vec", tag = "3")]
    pub ipv6: ::prost::alloc::vec::Vec<u8>,
    #[prost(int32, tag = "4")]
    pub port: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Annotation {
    #[prost(fixed64, tag = "1")]
    pub timestamp: u64,
    #[prost(string, tag = "2")]
    pub value: ::prost::alloc::string::String,
}
