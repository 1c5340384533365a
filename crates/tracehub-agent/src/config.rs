// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::env;

use tracing::warn;

use crate::sampler::{SampleConfig, SampleRule};

const DEFAULT_JAEGER_HTTP_PORT: u16 = 14268;
const DEFAULT_JAEGER_UDP_PORT: u16 = 6831;
const DEFAULT_ZIPKIN_PORT: u16 = 9411;
const DEFAULT_SKYWALKING_GRPC_V3_PORT: u16 = 11800;
const DEFAULT_SKYWALKING_GRPC_V2_PORT: u16 = 11802;
const DEFAULT_SKYWALKING_HTTP_PORT: u16 = 12800;
const DEFAULT_JAEGER_HTTP_PATH: &str = "/apis/traces";

#[derive(Clone, Debug, Default)]
pub struct Tags {
    tags: BTreeMap<String, String>,
}

impl Tags {
    pub fn from_env_string(env_tags: &str) -> Self {
        let mut tags = BTreeMap::new();

        // Space-separated key:value tags are the standard for tagging. For
        // compatibility reasons we also support comma-separated key:value
        // tags as well.
        let normalized = env_tags.replace(',', " ");

        for kv in normalized.split_whitespace() {
            let parts = kv.split(':').collect::<Vec<&str>>();
            if parts.len() == 2 {
                tags.insert(parts[0].to_string(), parts[1].to_string());
            }
        }
        Self { tags }
    }

    pub fn new() -> Self {
        Self {
            tags: BTreeMap::new(),
        }
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.tags
    }
}

#[derive(Debug)]
pub struct Config {
    /// Host every receiver binds to.
    pub host: String,
    pub enable_jaeger: bool,
    pub enable_zipkin: bool,
    pub enable_skywalking_v2: bool,
    pub enable_skywalking_v3: bool,
    pub jaeger_http_port: u16,
    pub jaeger_http_path: String,
    pub jaeger_udp_port: u16,
    pub zipkin_port: u16,
    pub skywalking_grpc_v2_port: u16,
    pub skywalking_grpc_v3_port: u16,
    pub skywalking_http_port: u16,
    pub max_request_content_length: usize,
    /// How often the sink flushes buffered batches downstream, in seconds.
    pub flush_interval_secs: u64,
    /// Downstream intake endpoint. When unset, flushed batches are dropped
    /// with a debug log (useful for dry runs and tests).
    pub intake_url: Option<String>,
    /// Static tags merged into every normalized span.
    pub tags: Tags,
    pub sample_config: SampleConfig,
}

impl Config {
    pub fn from_env() -> Result<Config, anyhow::Error> {
        let tags = if let Ok(env_tags) = env::var("TRACEHUB_TAGS") {
            Tags::from_env_string(&env_tags)
        } else {
            Tags::new()
        };

        // A bad rule document never aborts startup: the rules are dropped
        // with a warning and the sampler keeps everything.
        let sample_config = match env::var("TRACEHUB_SAMPLE_RULES") {
            Ok(raw) => match serde_json::from_str::<Vec<SampleRule>>(&raw) {
                Ok(rules) => SampleConfig::new(rules),
                Err(err) => {
                    warn!("Ignoring unparseable TRACEHUB_SAMPLE_RULES: {err}");
                    SampleConfig::default()
                }
            },
            Err(_) => SampleConfig::default(),
        };

        Ok(Config {
            host: env::var("TRACEHUB_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            enable_jaeger: env_flag("TRACEHUB_ENABLE_JAEGER"),
            enable_zipkin: env_flag("TRACEHUB_ENABLE_ZIPKIN"),
            enable_skywalking_v2: env_flag("TRACEHUB_ENABLE_SKYWALKING_V2"),
            enable_skywalking_v3: env_flag("TRACEHUB_ENABLE_SKYWALKING_V3"),
            jaeger_http_port: env_port("TRACEHUB_JAEGER_HTTP_PORT", DEFAULT_JAEGER_HTTP_PORT),
            jaeger_http_path: env::var("TRACEHUB_JAEGER_HTTP_PATH")
                .unwrap_or_else(|_| DEFAULT_JAEGER_HTTP_PATH.to_string()),
            jaeger_udp_port: env_port("TRACEHUB_JAEGER_UDP_PORT", DEFAULT_JAEGER_UDP_PORT),
            zipkin_port: env_port("TRACEHUB_ZIPKIN_PORT", DEFAULT_ZIPKIN_PORT),
            skywalking_grpc_v2_port: env_port(
                "TRACEHUB_SKYWALKING_GRPC_V2_PORT",
                DEFAULT_SKYWALKING_GRPC_V2_PORT,
            ),
            skywalking_grpc_v3_port: env_port(
                "TRACEHUB_SKYWALKING_GRPC_V3_PORT",
                DEFAULT_SKYWALKING_GRPC_V3_PORT,
            ),
            skywalking_http_port: env_port(
                "TRACEHUB_SKYWALKING_HTTP_PORT",
                DEFAULT_SKYWALKING_HTTP_PORT,
            ),
            max_request_content_length: 10 * 1024 * 1024, // 10MB in Bytes
            flush_interval_secs: 3,
            intake_url: env::var("TRACEHUB_INTAKE_URL").ok(),
            tags,
            sample_config,
        })
    }
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|val| val.to_lowercase() != "false")
        .unwrap_or(true)
}

fn env_port(name: &str, default: u16) -> u16 {
    env::var(name)
        .ok()
        .and_then(|port| port.parse::<u16>().ok())
        .unwrap_or(default)
}
