// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Thrift model for the Jaeger client protocol (`jaeger.thrift` /
//! `agent.thrift`).
//!
//! The HTTP collector receives a binary-protocol encoded [`Batch`] struct as
//! the request body; the UDP agent receives a compact-protocol `emitBatch`
//! one-way message wrapping the same batch. Both entry points live here so
//! the receivers only ever see decoded structs.

use serde::Serialize;
use thrift::protocol::{
    field_id, verify_expected_service_call, verify_required_field_exists, TBinaryInputProtocol,
    TBinaryOutputProtocol, TCompactInputProtocol, TCompactOutputProtocol, TFieldIdentifier,
    TInputProtocol, TListIdentifier, TMessageIdentifier, TMessageType, TOutputProtocol,
    TStructIdentifier, TType,
};

/// Tag value discriminants from `jaeger.thrift`'s `TagType` enum.
pub mod tag_type {
    pub const STRING: i32 = 0;
    pub const DOUBLE: i32 = 1;
    pub const BOOL: i32 = 2;
    pub const LONG: i32 = 3;
    pub const BINARY: i32 = 4;
}

/// Span reference discriminants from `SpanRefType`.
pub mod span_ref_type {
    pub const CHILD_OF: i32 = 0;
    pub const FOLLOWS_FROM: i32 = 1;
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Tag {
    pub key: String,
    pub v_type: i32,
    pub v_str: Option<String>,
    pub v_double: Option<f64>,
    pub v_bool: Option<bool>,
    pub v_long: Option<i64>,
    pub v_binary: Option<Vec<u8>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Log {
    pub timestamp: i64,
    pub fields: Vec<Tag>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SpanRef {
    pub ref_type: i32,
    pub trace_id_low: i64,
    pub trace_id_high: i64,
    pub span_id: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Span {
    pub trace_id_low: i64,
    pub trace_id_high: i64,
    pub span_id: i64,
    pub parent_span_id: i64,
    pub operation_name: String,
    pub references: Option<Vec<SpanRef>>,
    pub flags: i32,
    /// Source start timestamp, in the unit the emitting client used.
    pub start_time: i64,
    pub duration: i64,
    pub tags: Option<Vec<Tag>>,
    pub logs: Option<Vec<Log>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Process {
    pub service_name: String,
    pub tags: Option<Vec<Tag>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Batch {
    pub process: Process,
    pub spans: Vec<Span>,
}

impl Tag {
    pub fn string(key: &str, value: &str) -> Tag {
        Tag {
            key: key.to_string(),
            v_type: tag_type::STRING,
            v_str: Some(value.to_string()),
            ..Default::default()
        }
    }

    pub fn boolean(key: &str, value: bool) -> Tag {
        Tag {
            key: key.to_string(),
            v_type: tag_type::BOOL,
            v_bool: Some(value),
            ..Default::default()
        }
    }

    pub fn read_from_in_protocol(i_prot: &mut dyn TInputProtocol) -> thrift::Result<Tag> {
        i_prot.read_struct_begin()?;
        let mut tag = Tag::default();
        let mut key: Option<String> = None;
        loop {
            let field_ident = i_prot.read_field_begin()?;
            if field_ident.field_type == TType::Stop {
                break;
            }
            match field_id(&field_ident)? {
                1 => key = Some(i_prot.read_string()?),
                2 => tag.v_type = i_prot.read_i32()?,
                3 => tag.v_str = Some(i_prot.read_string()?),
                4 => tag.v_double = Some(i_prot.read_double()?),
                5 => tag.v_bool = Some(i_prot.read_bool()?),
                6 => tag.v_long = Some(i_prot.read_i64()?),
                7 => tag.v_binary = Some(i_prot.read_bytes()?),
                _ => i_prot.skip(field_ident.field_type)?,
            }
            i_prot.read_field_end()?;
        }
        i_prot.read_struct_end()?;
        verify_required_field_exists("Tag.key", &key)?;
        tag.key = key.unwrap_or_default();
        Ok(tag)
    }

    pub fn write_to_out_protocol(&self, o_prot: &mut dyn TOutputProtocol) -> thrift::Result<()> {
        o_prot.write_struct_begin(&TStructIdentifier::new("Tag"))?;
        o_prot.write_field_begin(&TFieldIdentifier::new("key", TType::String, 1))?;
        o_prot.write_string(&self.key)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("vType", TType::I32, 2))?;
        o_prot.write_i32(self.v_type)?;
        o_prot.write_field_end()?;
        if let Some(ref v) = self.v_str {
            o_prot.write_field_begin(&TFieldIdentifier::new("vStr", TType::String, 3))?;
            o_prot.write_string(v)?;
            o_prot.write_field_end()?;
        }
        if let Some(v) = self.v_double {
            o_prot.write_field_begin(&TFieldIdentifier::new("vDouble", TType::Double, 4))?;
            o_prot.write_double(v)?;
            o_prot.write_field_end()?;
        }
        if let Some(v) = self.v_bool {
            o_prot.write_field_begin(&TFieldIdentifier::new("vBool", TType::Bool, 5))?;
            o_prot.write_bool(v)?;
            o_prot.write_field_end()?;
        }
        if let Some(v) = self.v_long {
            o_prot.write_field_begin(&TFieldIdentifier::new("vLong", TType::I64, 6))?;
            o_prot.write_i64(v)?;
            o_prot.write_field_end()?;
        }
        if let Some(ref v) = self.v_binary {
            o_prot.write_field_begin(&TFieldIdentifier::new("vBinary", TType::String, 7))?;
            o_prot.write_bytes(v)?;
            o_prot.write_field_end()?;
        }
        o_prot.write_field_stop()?;
        o_prot.write_struct_end()
    }
}

impl Log {
    pub fn read_from_in_protocol(i_prot: &mut dyn TInputProtocol) -> thrift::Result<Log> {
        i_prot.read_struct_begin()?;
        let mut log = Log::default();
        loop {
            let field_ident = i_prot.read_field_begin()?;
            if field_ident.field_type == TType::Stop {
                break;
            }
            match field_id(&field_ident)? {
                1 => log.timestamp = i_prot.read_i64()?,
                2 => log.fields = read_tag_list(i_prot)?,
                _ => i_prot.skip(field_ident.field_type)?,
            }
            i_prot.read_field_end()?;
        }
        i_prot.read_struct_end()?;
        Ok(log)
    }

    pub fn write_to_out_protocol(&self, o_prot: &mut dyn TOutputProtocol) -> thrift::Result<()> {
        o_prot.write_struct_begin(&TStructIdentifier::new("Log"))?;
        o_prot.write_field_begin(&TFieldIdentifier::new("timestamp", TType::I64, 1))?;
        o_prot.write_i64(self.timestamp)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("fields", TType::List, 2))?;
        write_tag_list(&self.fields, o_prot)?;
        o_prot.write_field_end()?;
        o_prot.write_field_stop()?;
        o_prot.write_struct_end()
    }
}

impl SpanRef {
    pub fn read_from_in_protocol(i_prot: &mut dyn TInputProtocol) -> thrift::Result<SpanRef> {
        i_prot.read_struct_begin()?;
        let mut span_ref = SpanRef::default();
        loop {
            let field_ident = i_prot.read_field_begin()?;
            if field_ident.field_type == TType::Stop {
                break;
            }
            match field_id(&field_ident)? {
                1 => span_ref.ref_type = i_prot.read_i32()?,
                2 => span_ref.trace_id_low = i_prot.read_i64()?,
                3 => span_ref.trace_id_high = i_prot.read_i64()?,
                4 => span_ref.span_id = i_prot.read_i64()?,
                _ => i_prot.skip(field_ident.field_type)?,
            }
            i_prot.read_field_end()?;
        }
        i_prot.read_struct_end()?;
        Ok(span_ref)
    }

    pub fn write_to_out_protocol(&self, o_prot: &mut dyn TOutputProtocol) -> thrift::Result<()> {
        o_prot.write_struct_begin(&TStructIdentifier::new("SpanRef"))?;
        o_prot.write_field_begin(&TFieldIdentifier::new("refType", TType::I32, 1))?;
        o_prot.write_i32(self.ref_type)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("traceIdLow", TType::I64, 2))?;
        o_prot.write_i64(self.trace_id_low)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("traceIdHigh", TType::I64, 3))?;
        o_prot.write_i64(self.trace_id_high)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("spanId", TType::I64, 4))?;
        o_prot.write_i64(self.span_id)?;
        o_prot.write_field_end()?;
        o_prot.write_field_stop()?;
        o_prot.write_struct_end()
    }
}

impl Span {
    pub fn read_from_in_protocol(i_prot: &mut dyn TInputProtocol) -> thrift::Result<Span> {
        i_prot.read_struct_begin()?;
        let mut span = Span::default();
        let mut span_id: Option<i64> = None;
        let mut operation_name: Option<String> = None;
        loop {
            let field_ident = i_prot.read_field_begin()?;
            if field_ident.field_type == TType::Stop {
                break;
            }
            match field_id(&field_ident)? {
                1 => span.trace_id_low = i_prot.read_i64()?,
                2 => span.trace_id_high = i_prot.read_i64()?,
                3 => span_id = Some(i_prot.read_i64()?),
                4 => span.parent_span_id = i_prot.read_i64()?,
                5 => operation_name = Some(i_prot.read_string()?),
                6 => {
                    let list_ident = i_prot.read_list_begin()?;
                    let mut refs = Vec::with_capacity(list_ident.size as usize);
                    for _ in 0..list_ident.size {
                        refs.push(SpanRef::read_from_in_protocol(i_prot)?);
                    }
                    i_prot.read_list_end()?;
                    span.references = Some(refs);
                }
                7 => span.flags = i_prot.read_i32()?,
                8 => span.start_time = i_prot.read_i64()?,
                9 => span.duration = i_prot.read_i64()?,
                10 => span.tags = Some(read_tag_list(i_prot)?),
                11 => {
                    let list_ident = i_prot.read_list_begin()?;
                    let mut logs = Vec::with_capacity(list_ident.size as usize);
                    for _ in 0..list_ident.size {
                        logs.push(Log::read_from_in_protocol(i_prot)?);
                    }
                    i_prot.read_list_end()?;
                    span.logs = Some(logs);
                }
                _ => i_prot.skip(field_ident.field_type)?,
            }
            i_prot.read_field_end()?;
        }
        i_prot.read_struct_end()?;
        verify_required_field_exists("Span.span_id", &span_id)?;
        verify_required_field_exists("Span.operation_name", &operation_name)?;
        span.span_id = span_id.unwrap_or_default();
        span.operation_name = operation_name.unwrap_or_default();
        Ok(span)
    }

    pub fn write_to_out_protocol(&self, o_prot: &mut dyn TOutputProtocol) -> thrift::Result<()> {
        o_prot.write_struct_begin(&TStructIdentifier::new("Span"))?;
        o_prot.write_field_begin(&TFieldIdentifier::new("traceIdLow", TType::I64, 1))?;
        o_prot.write_i64(self.trace_id_low)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("traceIdHigh", TType::I64, 2))?;
        o_prot.write_i64(self.trace_id_high)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("spanId", TType::I64, 3))?;
        o_prot.write_i64(self.span_id)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("parentSpanId", TType::I64, 4))?;
        o_prot.write_i64(self.parent_span_id)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("operationName", TType::String, 5))?;
        o_prot.write_string(&self.operation_name)?;
        o_prot.write_field_end()?;
        if let Some(ref refs) = self.references {
            o_prot.write_field_begin(&TFieldIdentifier::new("references", TType::List, 6))?;
            o_prot.write_list_begin(&TListIdentifier::new(TType::Struct, refs.len() as i32))?;
            for r in refs {
                r.write_to_out_protocol(o_prot)?;
            }
            o_prot.write_list_end()?;
            o_prot.write_field_end()?;
        }
        o_prot.write_field_begin(&TFieldIdentifier::new("flags", TType::I32, 7))?;
        o_prot.write_i32(self.flags)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("startTime", TType::I64, 8))?;
        o_prot.write_i64(self.start_time)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("duration", TType::I64, 9))?;
        o_prot.write_i64(self.duration)?;
        o_prot.write_field_end()?;
        if let Some(ref tags) = self.tags {
            o_prot.write_field_begin(&TFieldIdentifier::new("tags", TType::List, 10))?;
            write_tag_list(tags, o_prot)?;
            o_prot.write_field_end()?;
        }
        if let Some(ref logs) = self.logs {
            o_prot.write_field_begin(&TFieldIdentifier::new("logs", TType::List, 11))?;
            o_prot.write_list_begin(&TListIdentifier::new(TType::Struct, logs.len() as i32))?;
            for log in logs {
                log.write_to_out_protocol(o_prot)?;
            }
            o_prot.write_list_end()?;
            o_prot.write_field_end()?;
        }
        o_prot.write_field_stop()?;
        o_prot.write_struct_end()
    }
}

impl Process {
    pub fn read_from_in_protocol(i_prot: &mut dyn TInputProtocol) -> thrift::Result<Process> {
        i_prot.read_struct_begin()?;
        let mut process = Process::default();
        let mut service_name: Option<String> = None;
        loop {
            let field_ident = i_prot.read_field_begin()?;
            if field_ident.field_type == TType::Stop {
                break;
            }
            match field_id(&field_ident)? {
                1 => service_name = Some(i_prot.read_string()?),
                2 => process.tags = Some(read_tag_list(i_prot)?),
                _ => i_prot.skip(field_ident.field_type)?,
            }
            i_prot.read_field_end()?;
        }
        i_prot.read_struct_end()?;
        verify_required_field_exists("Process.service_name", &service_name)?;
        process.service_name = service_name.unwrap_or_default();
        Ok(process)
    }

    pub fn write_to_out_protocol(&self, o_prot: &mut dyn TOutputProtocol) -> thrift::Result<()> {
        o_prot.write_struct_begin(&TStructIdentifier::new("Process"))?;
        o_prot.write_field_begin(&TFieldIdentifier::new("serviceName", TType::String, 1))?;
        o_prot.write_string(&self.service_name)?;
        o_prot.write_field_end()?;
        if let Some(ref tags) = self.tags {
            o_prot.write_field_begin(&TFieldIdentifier::new("tags", TType::List, 2))?;
            write_tag_list(tags, o_prot)?;
            o_prot.write_field_end()?;
        }
        o_prot.write_field_stop()?;
        o_prot.write_struct_end()
    }
}

impl Batch {
    pub fn read_from_in_protocol(i_prot: &mut dyn TInputProtocol) -> thrift::Result<Batch> {
        i_prot.read_struct_begin()?;
        let mut process: Option<Process> = None;
        let mut spans: Option<Vec<Span>> = None;
        loop {
            let field_ident = i_prot.read_field_begin()?;
            if field_ident.field_type == TType::Stop {
                break;
            }
            match field_id(&field_ident)? {
                1 => process = Some(Process::read_from_in_protocol(i_prot)?),
                2 => {
                    let list_ident = i_prot.read_list_begin()?;
                    let mut val = Vec::with_capacity(list_ident.size as usize);
                    for _ in 0..list_ident.size {
                        val.push(Span::read_from_in_protocol(i_prot)?);
                    }
                    i_prot.read_list_end()?;
                    spans = Some(val);
                }
                _ => i_prot.skip(field_ident.field_type)?,
            }
            i_prot.read_field_end()?;
        }
        i_prot.read_struct_end()?;
        verify_required_field_exists("Batch.process", &process)?;
        verify_required_field_exists("Batch.spans", &spans)?;
        Ok(Batch {
            process: process.unwrap_or_default(),
            spans: spans.unwrap_or_default(),
        })
    }

    pub fn write_to_out_protocol(&self, o_prot: &mut dyn TOutputProtocol) -> thrift::Result<()> {
        o_prot.write_struct_begin(&TStructIdentifier::new("Batch"))?;
        o_prot.write_field_begin(&TFieldIdentifier::new("process", TType::Struct, 1))?;
        self.process.write_to_out_protocol(o_prot)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("spans", TType::List, 2))?;
        o_prot.write_list_begin(&TListIdentifier::new(TType::Struct, self.spans.len() as i32))?;
        for span in &self.spans {
            span.write_to_out_protocol(o_prot)?;
        }
        o_prot.write_list_end()?;
        o_prot.write_field_end()?;
        o_prot.write_field_stop()?;
        o_prot.write_struct_end()
    }
}

fn read_tag_list(i_prot: &mut dyn TInputProtocol) -> thrift::Result<Vec<Tag>> {
    let list_ident = i_prot.read_list_begin()?;
    let mut tags = Vec::with_capacity(list_ident.size as usize);
    for _ in 0..list_ident.size {
        tags.push(Tag::read_from_in_protocol(i_prot)?);
    }
    i_prot.read_list_end()?;
    Ok(tags)
}

fn write_tag_list(tags: &[Tag], o_prot: &mut dyn TOutputProtocol) -> thrift::Result<()> {
    o_prot.write_list_begin(&TListIdentifier::new(TType::Struct, tags.len() as i32))?;
    for tag in tags {
        tag.write_to_out_protocol(o_prot)?;
    }
    o_prot.write_list_end()
}

/// Decodes a binary-protocol `Batch` struct, the body of a collector
/// `POST` with `Content-Type: application/x-thrift`.
pub fn decode_binary_batch(bytes: &[u8]) -> thrift::Result<Batch> {
    let mut i_prot = TBinaryInputProtocol::new(bytes, true);
    Batch::read_from_in_protocol(&mut i_prot)
}

/// Encodes a `Batch` the way a Jaeger HTTP client would.
pub fn encode_binary_batch(batch: &Batch) -> thrift::Result<Vec<u8>> {
    let mut buf = Vec::new();
    {
        let mut o_prot = TBinaryOutputProtocol::new(&mut buf, true);
        batch.write_to_out_protocol(&mut o_prot)?;
    }
    Ok(buf)
}

/// Decodes a compact-protocol `emitBatch` agent datagram and returns the
/// wrapped batch.
pub fn decode_compact_emit_batch(bytes: &[u8]) -> thrift::Result<Batch> {
    let mut i_prot = TCompactInputProtocol::new(bytes);
    let message_ident = i_prot.read_message_begin()?;
    verify_expected_service_call("emitBatch", &message_ident.name)?;
    let mut batch: Option<Batch> = None;
    i_prot.read_struct_begin()?;
    loop {
        let field_ident = i_prot.read_field_begin()?;
        if field_ident.field_type == TType::Stop {
            break;
        }
        match field_id(&field_ident)? {
            1 => batch = Some(Batch::read_from_in_protocol(&mut i_prot)?),
            _ => i_prot.skip(field_ident.field_type)?,
        }
        i_prot.read_field_end()?;
    }
    i_prot.read_struct_end()?;
    i_prot.read_message_end()?;
    verify_required_field_exists("emitBatch.batch", &batch)?;
    Ok(batch.unwrap_or_default())
}

/// Encodes an `emitBatch` datagram the way a Jaeger UDP client would.
pub fn encode_compact_emit_batch(batch: &Batch) -> thrift::Result<Vec<u8>> {
    let mut buf = Vec::new();
    {
        let mut o_prot = TCompactOutputProtocol::new(&mut buf);
        o_prot.write_message_begin(&TMessageIdentifier::new("emitBatch", TMessageType::OneWay, 0))?;
        o_prot.write_struct_begin(&TStructIdentifier::new("emitBatch_args"))?;
        o_prot.write_field_begin(&TFieldIdentifier::new("batch", TType::Struct, 1))?;
        batch.write_to_out_protocol(&mut o_prot)?;
        o_prot.write_field_end()?;
        o_prot.write_field_stop()?;
        o_prot.write_struct_end()?;
        o_prot.write_message_end()?;
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_batch() -> Batch {
        Batch {
            process: Process {
                service_name: "billing".to_string(),
                tags: Some(vec![Tag::string("hostname", "ip-10-0-0-1")]),
            },
            spans: vec![Span {
                trace_id_low: 42,
                trace_id_high: 0,
                span_id: 7,
                parent_span_id: 0,
                operation_name: "GET /invoice".to_string(),
                references: None,
                flags: 1,
                start_time: 1_000_000,
                duration: 1_500,
                tags: Some(vec![Tag::boolean("error", false)]),
                logs: None,
            }],
        }
    }

    #[test]
    fn binary_batch_round_trip() {
        let batch = sample_batch();
        let bytes = encode_binary_batch(&batch).unwrap();
        let decoded = decode_binary_batch(&bytes).unwrap();
        assert_eq!(decoded, batch);
    }

    #[test]
    fn compact_emit_batch_round_trip() {
        let batch = sample_batch();
        let bytes = encode_compact_emit_batch(&batch).unwrap();
        let decoded = decode_compact_emit_batch(&bytes).unwrap();
        assert_eq!(decoded.process.service_name, "billing");
        assert_eq!(decoded.spans.len(), 1);
        assert_eq!(decoded.spans[0].span_id, 7);
    }

    #[test]
    fn binary_decode_rejects_garbage() {
        assert!(decode_binary_batch(&[0xff, 0x00, 0x13, 0x37]).is_err());
    }
}
