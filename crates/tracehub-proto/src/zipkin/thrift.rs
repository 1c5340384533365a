// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Thrift model for the Zipkin v1 protocol (`zipkinCore.thrift`).
//!
//! A `POST /api/v1/spans` with `Content-Type: application/x-thrift` carries a
//! binary-protocol encoded `list<Span>` as the request body.

use serde::Serialize;
use thrift::protocol::{
    field_id, TBinaryInputProtocol, TBinaryOutputProtocol, TFieldIdentifier, TInputProtocol,
    TListIdentifier, TOutputProtocol, TStructIdentifier, TType,
};

/// Binary-annotation value discriminants from `AnnotationType`.
pub mod annotation_type {
    pub const BOOL: i32 = 0;
    pub const BYTES: i32 = 1;
    pub const I16: i32 = 2;
    pub const I32: i32 = 3;
    pub const I64: i32 = 4;
    pub const DOUBLE: i32 = 5;
    pub const STRING: i32 = 6;
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Endpoint {
    pub ipv4: i32,
    pub port: i16,
    pub service_name: String,
    pub ipv6: Option<Vec<u8>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Annotation {
    pub timestamp: i64,
    pub value: String,
    pub host: Option<Endpoint>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BinaryAnnotation {
    pub key: String,
    pub value: Vec<u8>,
    pub annotation_type: i32,
    pub host: Option<Endpoint>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Span {
    pub trace_id: i64,
    pub name: String,
    pub id: i64,
    pub parent_id: Option<i64>,
    pub annotations: Vec<Annotation>,
    pub binary_annotations: Vec<BinaryAnnotation>,
    pub debug: Option<bool>,
    pub timestamp: Option<i64>,
    pub duration: Option<i64>,
    pub trace_id_high: Option<i64>,
}

impl Endpoint {
    pub fn read_from_in_protocol(i_prot: &mut dyn TInputProtocol) -> thrift::Result<Endpoint> {
        i_prot.read_struct_begin()?;
        let mut endpoint = Endpoint::default();
        loop {
            let field_ident = i_prot.read_field_begin()?;
            if field_ident.field_type == TType::Stop {
                break;
            }
            match field_id(&field_ident)? {
                1 => endpoint.ipv4 = i_prot.read_i32()?,
                2 => endpoint.port = i_prot.read_i16()?,
                3 => endpoint.service_name = i_prot.read_string()?,
                4 => endpoint.ipv6 = Some(i_prot.read_bytes()?),
                _ => i_prot.skip(field_ident.field_type)?,
            }
            i_prot.read_field_end()?;
        }
        i_prot.read_struct_end()?;
        Ok(endpoint)
    }

    pub fn write_to_out_protocol(&self, o_prot: &mut dyn TOutputProtocol) -> thrift::Result<()> {
        o_prot.write_struct_begin(&TStructIdentifier::new("Endpoint"))?;
        o_prot.write_field_begin(&TFieldIdentifier::new("ipv4", TType::I32, 1))?;
        o_prot.write_i32(self.ipv4)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("port", TType::I16, 2))?;
        o_prot.write_i16(self.port)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("serviceName", TType::String, 3))?;
        o_prot.write_string(&self.service_name)?;
        o_prot.write_field_end()?;
        if let Some(ref v) = self.ipv6 {
            o_prot.write_field_begin(&TFieldIdentifier::new("ipv6", TType::String, 4))?;
            o_prot.write_bytes(v)?;
            o_prot.write_field_end()?;
        }
        o_prot.write_field_stop()?;
        o_prot.write_struct_end()
    }
}

impl Annotation {
    pub fn read_from_in_protocol(i_prot: &mut dyn TInputProtocol) -> thrift::Result<Annotation> {
        i_prot.read_struct_begin()?;
        let mut annotation = Annotation::default();
        loop {
            let field_ident = i_prot.read_field_begin()?;
            if field_ident.field_type == TType::Stop {
                break;
            }
            match field_id(&field_ident)? {
                1 => annotation.timestamp = i_prot.read_i64()?,
                2 => annotation.value = i_prot.read_string()?,
                3 => annotation.host = Some(Endpoint::read_from_in_protocol(i_prot)?),
                _ => i_prot.skip(field_ident.field_type)?,
            }
            i_prot.read_field_end()?;
        }
        i_prot.read_struct_end()?;
        Ok(annotation)
    }

    pub fn write_to_out_protocol(&self, o_prot: &mut dyn TOutputProtocol) -> thrift::Result<()> {
        o_prot.write_struct_begin(&TStructIdentifier::new("Annotation"))?;
        o_prot.write_field_begin(&TFieldIdentifier::new("timestamp", TType::I64, 1))?;
        o_prot.write_i64(self.timestamp)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("value", TType::String, 2))?;
        o_prot.write_string(&self.value)?;
        o_prot.write_field_end()?;
        if let Some(ref host) = self.host {
            o_prot.write_field_begin(&TFieldIdentifier::new("host", TType::Struct, 3))?;
            host.write_to_out_protocol(o_prot)?;
            o_prot.write_field_end()?;
        }
        o_prot.write_field_stop()?;
        o_prot.write_struct_end()
    }
}

impl BinaryAnnotation {
    pub fn read_from_in_protocol(
        i_prot: &mut dyn TInputProtocol,
    ) -> thrift::Result<BinaryAnnotation> {
        i_prot.read_struct_begin()?;
        let mut annotation = BinaryAnnotation::default();
        loop {
            let field_ident = i_prot.read_field_begin()?;
            if field_ident.field_type == TType::Stop {
                break;
            }
            match field_id(&field_ident)? {
                1 => annotation.key = i_prot.read_string()?,
                2 => annotation.value = i_prot.read_bytes()?,
                3 => annotation.annotation_type = i_prot.read_i32()?,
                4 => annotation.host = Some(Endpoint::read_from_in_protocol(i_prot)?),
                _ => i_prot.skip(field_ident.field_type)?,
            }
            i_prot.read_field_end()?;
        }
        i_prot.read_struct_end()?;
        Ok(annotation)
    }

    pub fn write_to_out_protocol(&self, o_prot: &mut dyn TOutputProtocol) -> thrift::Result<()> {
        o_prot.write_struct_begin(&TStructIdentifier::new("BinaryAnnotation"))?;
        o_prot.write_field_begin(&TFieldIdentifier::new("key", TType::String, 1))?;
        o_prot.write_string(&self.key)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("value", TType::String, 2))?;
        o_prot.write_bytes(&self.value)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("annotationType", TType::I32, 3))?;
        o_prot.write_i32(self.annotation_type)?;
        o_prot.write_field_end()?;
        if let Some(ref host) = self.host {
            o_prot.write_field_begin(&TFieldIdentifier::new("host", TType::Struct, 4))?;
            host.write_to_out_protocol(o_prot)?;
            o_prot.write_field_end()?;
        }
        o_prot.write_field_stop()?;
        o_prot.write_struct_end()
    }
}

impl Span {
    pub fn read_from_in_protocol(i_prot: &mut dyn TInputProtocol) -> thrift::Result<Span> {
        i_prot.read_struct_begin()?;
        let mut span = Span::default();
        loop {
            let field_ident = i_prot.read_field_begin()?;
            if field_ident.field_type == TType::Stop {
                break;
            }
            match field_id(&field_ident)? {
                1 => span.trace_id = i_prot.read_i64()?,
                3 => span.name = i_prot.read_string()?,
                4 => span.id = i_prot.read_i64()?,
                5 => span.parent_id = Some(i_prot.read_i64()?),
                6 => {
                    let list_ident = i_prot.read_list_begin()?;
                    let mut val = Vec::with_capacity(list_ident.size as usize);
                    for _ in 0..list_ident.size {
                        val.push(Annotation::read_from_in_protocol(i_prot)?);
                    }
                    i_prot.read_list_end()?;
                    span.annotations = val;
                }
                8 => {
                    let list_ident = i_prot.read_list_begin()?;
                    let mut val = Vec::with_capacity(list_ident.size as usize);
                    for _ in 0..list_ident.size {
                        val.push(BinaryAnnotation::read_from_in_protocol(i_prot)?);
                    }
                    i_prot.read_list_end()?;
                    span.binary_annotations = val;
                }
                9 => span.debug = Some(i_prot.read_bool()?),
                10 => span.timestamp = Some(i_prot.read_i64()?),
                11 => span.duration = Some(i_prot.read_i64()?),
                12 => span.trace_id_high = Some(i_prot.read_i64()?),
                _ => i_prot.skip(field_ident.field_type)?,
            }
            i_prot.read_field_end()?;
        }
        i_prot.read_struct_end()?;
        Ok(span)
    }

    pub fn write_to_out_protocol(&self, o_prot: &mut dyn TOutputProtocol) -> thrift::Result<()> {
        o_prot.write_struct_begin(&TStructIdentifier::new("Span"))?;
        o_prot.write_field_begin(&TFieldIdentifier::new("trace_id", TType::I64, 1))?;
        o_prot.write_i64(self.trace_id)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("name", TType::String, 3))?;
        o_prot.write_string(&self.name)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("id", TType::I64, 4))?;
        o_prot.write_i64(self.id)?;
        o_prot.write_field_end()?;
        if let Some(parent_id) = self.parent_id {
            o_prot.write_field_begin(&TFieldIdentifier::new("parent_id", TType::I64, 5))?;
            o_prot.write_i64(parent_id)?;
            o_prot.write_field_end()?;
        }
        o_prot.write_field_begin(&TFieldIdentifier::new("annotations", TType::List, 6))?;
        o_prot.write_list_begin(&TListIdentifier::new(
            TType::Struct,
            self.annotations.len() as i32,
        ))?;
        for annotation in &self.annotations {
            annotation.write_to_out_protocol(o_prot)?;
        }
        o_prot.write_list_end()?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("binary_annotations", TType::List, 8))?;
        o_prot.write_list_begin(&TListIdentifier::new(
            TType::Struct,
            self.binary_annotations.len() as i32,
        ))?;
        for annotation in &self.binary_annotations {
            annotation.write_to_out_protocol(o_prot)?;
        }
        o_prot.write_list_end()?;
        o_prot.write_field_end()?;
        if let Some(debug) = self.debug {
            o_prot.write_field_begin(&TFieldIdentifier::new("debug", TType::Bool, 9))?;
            o_prot.write_bool(debug)?;
            o_prot.write_field_end()?;
        }
        if let Some(timestamp) = self.timestamp {
            o_prot.write_field_begin(&TFieldIdentifier::new("timestamp", TType::I64, 10))?;
            o_prot.write_i64(timestamp)?;
            o_prot.write_field_end()?;
        }
        if let Some(duration) = self.duration {
            o_prot.write_field_begin(&TFieldIdentifier::new("duration", TType::I64, 11))?;
            o_prot.write_i64(duration)?;
            o_prot.write_field_end()?;
        }
        if let Some(trace_id_high) = self.trace_id_high {
            o_prot.write_field_begin(&TFieldIdentifier::new("trace_id_high", TType::I64, 12))?;
            o_prot.write_i64(trace_id_high)?;
            o_prot.write_field_end()?;
        }
        o_prot.write_field_stop()?;
        o_prot.write_struct_end()
    }
}

/// Decodes the binary-protocol `list<Span>` body of a v1 thrift submission.
pub fn decode_binary_span_list(bytes: &[u8]) -> thrift::Result<Vec<Span>> {
    let mut i_prot = TBinaryInputProtocol::new(bytes, true);
    let list_ident = i_prot.read_list_begin()?;
    let mut spans = Vec::with_capacity(list_ident.size as usize);
    for _ in 0..list_ident.size {
        spans.push(Span::read_from_in_protocol(&mut i_prot)?);
    }
    i_prot.read_list_end()?;
    Ok(spans)
}

/// Encodes a `list<Span>` the way a v1 thrift client would.
pub fn encode_binary_span_list(spans: &[Span]) -> thrift::Result<Vec<u8>> {
    let mut buf = Vec::new();
    {
        let mut o_prot = TBinaryOutputProtocol::new(&mut buf, true);
        o_prot.write_list_begin(&TListIdentifier::new(TType::Struct, spans.len() as i32))?;
        for span in spans {
            span.write_to_out_protocol(&mut o_prot)?;
        }
        o_prot.write_list_end()?;
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_list_round_trip() {
        let spans = vec![Span {
            trace_id: 0x2a,
            name: "get /status".to_string(),
            id: 7,
            parent_id: None,
            annotations: vec![Annotation {
                timestamp: 1_000_000,
                value: "sr".to_string(),
                host: Some(Endpoint {
                    ipv4: 0x7f000001,
                    port: 8080,
                    service_name: "front".to_string(),
                    ipv6: None,
                }),
            }],
            binary_annotations: vec![],
            debug: None,
            timestamp: Some(1_000_000),
            duration: Some(1_500),
            trace_id_high: None,
        }];
        let bytes = encode_binary_span_list(&spans).unwrap();
        let decoded = decode_binary_span_list(&bytes).unwrap();
        assert_eq!(decoded, spans);
    }
}
