// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Deterministic, rate/scope based batch sampling.
//!
//! Sampling is a pure function of the trace id, so distributed spans of one
//! trace arriving through different receivers or processes always get the
//! same decision. Anomalous batches (any error span, any ignore-tag) bypass
//! sampling entirely and are always kept.

use std::collections::BTreeMap;

use fnv::FnvHasher;
use serde::{Deserialize, Serialize};
use std::hash::Hasher;
use tracing::warn;

use crate::model::{NormalizedSpan, SpanStatus};

const DEFAULT_RATE: u64 = 100;
const DEFAULT_SCOPE: u64 = 100;

/// One sampling rule. Rules are evaluated in order; the first rule whose
/// `target` tag-set is a subset of the root span's tags wins. An empty
/// `target` always matches, so a catch-all rule goes last by convention.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SampleRule {
    pub target: BTreeMap<String, String>,
    pub rate: u64,
    pub scope: u64,
    /// Tag keys that exempt a batch from sampling when present on any span.
    pub ignore_tags: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SampleConfig {
    rules: Vec<SampleRule>,
}

impl SampleConfig {
    /// Builds a config, correcting invalid rules instead of failing: a rule
    /// with `rate > scope` (or a zero scope) can never decide anything
    /// meaningful, so it is reset to the keep-everything default with a
    /// warning.
    pub fn new(mut rules: Vec<SampleRule>) -> SampleConfig {
        for rule in &mut rules {
            if rule.scope == 0 || rule.rate > rule.scope {
                warn!(
                    "Invalid sample rule (rate={} scope={}), resetting to rate={} scope={}",
                    rule.rate, rule.scope, DEFAULT_RATE, DEFAULT_SCOPE
                );
                rule.rate = DEFAULT_RATE;
                rule.scope = DEFAULT_SCOPE;
            }
        }
        SampleConfig { rules }
    }

    pub fn rules(&self) -> &[SampleRule] {
        &self.rules
    }

    /// Decides whether to keep a batch. Fail-open: no rules, no root span or
    /// no matching rule all keep the batch.
    pub fn sample(&self, spans: &[NormalizedSpan]) -> bool {
        if self.rules.is_empty() || spans.is_empty() {
            return true;
        }
        let Some(root) = find_root(spans) else {
            return true;
        };
        let Some(rule) = self
            .rules
            .iter()
            .find(|rule| is_subset(&rule.target, &root.tags))
        else {
            return true;
        };

        // Never drop anomalies: an explicit error anywhere in the batch, or
        // any span carrying an ignore-tag key, exempts the whole batch.
        if spans.iter().any(|span| span.status == SpanStatus::Err) {
            return true;
        }
        if spans
            .iter()
            .any(|span| rule.ignore_tags.iter().any(|key| span.tags.contains_key(key)))
        {
            return true;
        }

        trace_key(&root.trace_id) % rule.scope < rule.rate
    }
}

/// The root span is the first span with no parent in the batch: an empty
/// parent id, or a parent id no span in the batch owns.
pub fn find_root(spans: &[NormalizedSpan]) -> Option<&NormalizedSpan> {
    if let Some(span) = spans.iter().find(|span| span.parent_id.is_empty()) {
        return Some(span);
    }
    spans
        .iter()
        .find(|span| !spans.iter().any(|other| other.span_id == span.parent_id))
}

/// Derives the numeric sampling key from a trace id: decimal first, then
/// hex (low 64 bits for long ids), then an FNV-1a hash of the raw string.
pub fn trace_key(trace_id: &str) -> u64 {
    if let Ok(value) = trace_id.parse::<u64>() {
        return value;
    }
    let hex = if trace_id.len() > 16 {
        &trace_id[trace_id.len() - 16..]
    } else {
        trace_id
    };
    if let Ok(value) = u64::from_str_radix(hex, 16) {
        return value;
    }
    let mut hasher = FnvHasher::default();
    hasher.write(trace_id.as_bytes());
    hasher.finish()
}

fn is_subset(target: &BTreeMap<String, String>, tags: &BTreeMap<String, String>) -> bool {
    target
        .iter()
        .all(|(key, value)| tags.get(key) == Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SpanType;

    fn span(trace_id: &str, span_id: &str, parent_id: &str) -> NormalizedSpan {
        NormalizedSpan {
            trace_id: trace_id.to_string(),
            span_id: span_id.to_string(),
            parent_id: parent_id.to_string(),
            service: "svc".to_string(),
            operation: "op".to_string(),
            span_type: SpanType::Entry,
            ..Default::default()
        }
    }

    fn catch_all(rate: u64, scope: u64) -> SampleConfig {
        SampleConfig::new(vec![SampleRule {
            rate,
            scope,
            ..Default::default()
        }])
    }

    #[test]
    fn rate_boundary() {
        let config = catch_all(10, 100);
        assert!(config.sample(&[span("5", "1", "")]));
        assert!(!config.sample(&[span("15", "1", "")]));
        assert!(!config.sample(&[span("55", "1", "")]));
    }

    #[test]
    fn deterministic() {
        let config = catch_all(37, 100);
        for trace_id in ["1", "99", "af01", "not-a-number"] {
            let batch = [span(trace_id, "1", "")];
            let first = config.sample(&batch);
            for _ in 0..10 {
                assert_eq!(config.sample(&batch), first);
            }
        }
    }

    #[test]
    fn root_detected_by_missing_parent_link() {
        let config = catch_all(10, 100);
        // B's parent is A; A's parent is not in the batch, so A is root and
        // its trace id (15) decides: dropped.
        let batch = [span("15", "a", "x"), span("15", "b", "a")];
        assert!(!config.sample(&batch));
    }

    #[test]
    fn no_root_fails_open() {
        let config = catch_all(0, 100);
        // Two spans pointing at each other: no root, batch kept.
        let batch = [span("15", "a", "b"), span("15", "b", "a")];
        assert!(config.sample(&batch));
    }

    #[test]
    fn error_span_bypasses_sampling() {
        let config = catch_all(0, 100);
        let mut erroring = span("15", "b", "a");
        erroring.status = SpanStatus::Err;
        let batch = [span("15", "a", ""), erroring];
        assert!(config.sample(&batch));
    }

    #[test]
    fn ignore_tag_bypasses_sampling() {
        let config = SampleConfig::new(vec![SampleRule {
            rate: 0,
            scope: 100,
            ignore_tags: vec!["canary".to_string()],
            ..Default::default()
        }]);
        let mut tagged = span("15", "b", "a");
        tagged
            .tags
            .insert("canary".to_string(), "true".to_string());
        assert!(config.sample(&[span("15", "a", ""), tagged]));
    }

    #[test]
    fn first_matching_rule_wins() {
        let config = SampleConfig::new(vec![
            SampleRule {
                target: BTreeMap::from([("env".to_string(), "prod".to_string())]),
                rate: 100,
                scope: 100,
                ..Default::default()
            },
            SampleRule {
                rate: 0,
                scope: 100,
                ..Default::default()
            },
        ]);
        let mut prod = span("15", "a", "");
        prod.tags.insert("env".to_string(), "prod".to_string());
        assert!(config.sample(&[prod]));
        // Non-prod batches fall through to the catch-all drop rule.
        assert!(!config.sample(&[span("15", "a", "")]));
    }

    #[test]
    fn invalid_rule_reset_to_default() {
        let config = catch_all(500, 100);
        assert_eq!(config.rules()[0].rate, 100);
        assert_eq!(config.rules()[0].scope, 100);
        // rate == scope keeps everything.
        assert!(config.sample(&[span("999999", "1", "")]));
    }

    #[test]
    fn hex_and_hashed_trace_keys() {
        assert_eq!(trace_key("2a"), 0x2a);
        assert_eq!(trace_key("55"), 55);
        let hashed = trace_key("segment-1.2.3");
        assert_eq!(hashed, trace_key("segment-1.2.3"));
    }
}
