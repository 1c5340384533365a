// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Conversion of protocol-native spans into [`crate::model::NormalizedSpan`].
//!
//! One conversion function per protocol-version pair, all funneled through
//! the per-protocol [`ProtocolDescriptor`] below so the timestamp scale
//! factors live in one table instead of being repeated per decoder.

pub mod jaeger;
pub mod skywalking;
pub mod zipkin;

/// Declarative per-protocol facts: the source label reported to the sink and
/// the multiplier that takes the protocol's wire timestamp unit to the
/// microsecond contract. The multiplier is applied exactly once, with no
/// clamping of negative inputs.
#[derive(Clone, Copy, Debug)]
pub struct ProtocolDescriptor {
    pub source: &'static str,
    pub time_scale: i64,
}

impl ProtocolDescriptor {
    pub fn scale(&self, value: i64) -> i64 {
        value * self.time_scale
    }
}

pub const JAEGER: ProtocolDescriptor = ProtocolDescriptor {
    source: "jaeger",
    time_scale: 1000,
};

pub const ZIPKIN_V1: ProtocolDescriptor = ProtocolDescriptor {
    source: "zipkin",
    time_scale: 1000,
};

/// Zipkin v2 timestamps are already microseconds on the wire.
pub const ZIPKIN_V2: ProtocolDescriptor = ProtocolDescriptor {
    source: "zipkin",
    time_scale: 1,
};

/// SkyWalking start/end times are epoch milliseconds.
pub const SKYWALKING: ProtocolDescriptor = ProtocolDescriptor {
    source: "skywalking",
    time_scale: 1000,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_is_exact_per_protocol() {
        assert_eq!(JAEGER.scale(1_000_000), 1_000_000_000);
        assert_eq!(JAEGER.scale(1_500), 1_500_000);
        assert_eq!(ZIPKIN_V1.scale(250), 250_000);
        assert_eq!(ZIPKIN_V2.scale(250), 250);
        assert_eq!(SKYWALKING.scale(120), 120_000);
    }

    #[test]
    fn negative_values_pass_through_unclamped() {
        assert_eq!(JAEGER.scale(-5), -5_000);
        assert_eq!(ZIPKIN_V2.scale(-5), -5);
    }
}
