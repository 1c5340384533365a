// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! SkyWalking wire models for the v2 and v3 protocol generations.
//!
//! Both generations are committed as prost/tonic generated-style sources.
//! The v3 messages additionally derive `serde` with camelCase field names so
//! the same structs back the `/v3/segment` HTTP JSON endpoints; enum-typed
//! fields accept either the symbolic name (`"Entry"`) or the numeric value.

pub mod v2;
pub mod v3;

pub(crate) mod enum_serde {
    use serde::de::{self, Visitor};
    use serde::Deserializer;
    use std::fmt;

    struct EnumVisitor {
        parse: fn(&str) -> Option<i32>,
    }

    impl<'de> Visitor<'de> for EnumVisitor {
        type Value = i32;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "an enum name or number")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<i32, E> {
            (self.parse)(v).ok_or_else(|| E::custom(format!("unknown enum name {v:?}")))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i32, E> {
            Ok(v as i32)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i32, E> {
            Ok(v as i32)
        }
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
        parse: fn(&str) -> Option<i32>,
    ) -> Result<i32, D::Error> {
        deserializer.deserialize_any(EnumVisitor { parse })
    }
}
