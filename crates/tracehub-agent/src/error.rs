// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

/// Failure taxonomy for the ingestion pipeline.
///
/// Wire clients never see these: every receiver acks per its protocol and
/// records the failure in [`crate::metrics::IngestMetrics`] instead.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Malformed wire payload. The offending request/message is rejected,
    /// the listener keeps serving.
    #[error("{protocol}: decode error: {reason}")]
    Decode {
        protocol: &'static str,
        reason: String,
    },

    /// An id could not be rendered into the canonical model (missing
    /// registration, malformed id bytes). Fails the whole containing batch.
    #[error("{protocol}: resolution error: {reason}")]
    Resolution {
        protocol: &'static str,
        reason: String,
    },

    /// Downstream submission failure. Logged and dropped, never retried by
    /// the receiver and never surfaced to the wire client.
    #[error("sink error: {0}")]
    Sink(String),

    /// Invalid operator configuration detected at load time.
    #[error("config error: {0}")]
    Config(String),
}
