// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Ingestion drop accounting.
//!
//! Receivers always ack their wire clients, so these counters are the only
//! place a dropped payload becomes visible.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct IngestMetrics {
    pub spans_received: AtomicU64,
    pub batches_submitted: AtomicU64,
    pub decode_errors: AtomicU64,
    pub resolution_errors: AtomicU64,
    pub sampled_out: AtomicU64,
    pub sink_errors: AtomicU64,
}

impl IngestMetrics {
    pub fn incr(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_spans(&self, count: usize) {
        self.spans_received
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// One-line summary for the periodic status log.
    pub fn summary(&self) -> String {
        format!(
            "spans_received={} batches_submitted={} decode_errors={} resolution_errors={} sampled_out={} sink_errors={}",
            self.spans_received.load(Ordering::Relaxed),
            self.batches_submitted.load(Ordering::Relaxed),
            self.decode_errors.load(Ordering::Relaxed),
            self.resolution_errors.load(Ordering::Relaxed),
            self.sampled_out.load(Ordering::Relaxed),
            self.sink_errors.load(Ordering::Relaxed),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_reflects_counters() {
        let metrics = IngestMetrics::default();
        metrics.add_spans(3);
        IngestMetrics::incr(&metrics.decode_errors);
        let summary = metrics.summary();
        assert!(summary.contains("spans_received=3"));
        assert!(summary.contains("decode_errors=1"));
    }
}
