// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::error::TraceError;
use crate::feature_flags::FeatureFlags;
use serde::{Deserialize, Deserializer};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://receiver.perfbase.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub mod parse_env {
    use std::{env, time::Duration};

    pub fn duration(name: &str) -> Option<Duration> {
        Duration::try_from_secs_f64(env::var(name).ok()?.parse::<f64>().ok()?).ok()
    }

    pub fn bool(name: &str) -> Option<bool> {
        match env::var(name).ok()?.as_str() {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
            _ => Some(false),
        }
    }

    pub fn str_not_empty(name: &str) -> Option<String> {
        env::var(name).ok().filter(|s| !s.is_empty())
    }

    /// Comma separated list, blank entries dropped.
    pub fn list(name: &str) -> Option<Vec<String>> {
        let raw = str_not_empty(name)?;
        Some(
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect(),
        )
    }
}

/// SDK settings. Deserializing a partial map fills the rest with defaults.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_url: String,
    /// Seconds in serialized form.
    #[serde(deserialize_with = "deserialize_secs")]
    pub timeout: Duration,
    /// Functions the profiler should not record.
    pub ignored_functions: Vec<String>,
    /// Copied into the attributes of every new trace.
    pub environment: Option<String>,
    pub app_version: Option<String>,

    /// Faster, lower resolution clock. Short operations may report 0.
    pub use_coarse_clock: bool,
    pub track_exceptions: bool,
    pub track_file_compilation: bool,
    pub track_memory_allocation: bool,
    pub track_cpu_time: bool,
    pub track_file_definitions: bool,
    pub track_pdo: bool,
    pub track_http: bool,
    pub track_caches: bool,
    pub track_mongodb: bool,
    pub track_elasticsearch: bool,
    pub track_queues: bool,
    pub track_aws_sdk: bool,
    pub track_file_operations: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            ignored_functions: Vec::new(),
            environment: None,
            app_version: None,
            use_coarse_clock: false,
            track_exceptions: false,
            track_file_compilation: true,
            track_memory_allocation: false,
            track_cpu_time: true,
            track_file_definitions: false,
            track_pdo: true,
            track_http: true,
            track_caches: true,
            track_mongodb: true,
            track_elasticsearch: true,
            track_queues: true,
            track_aws_sdk: true,
            track_file_operations: true,
        }
    }
}

fn deserialize_secs<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    let secs = f64::deserialize(deserializer)?;
    Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
}

impl Config {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// Defaults overlaid with whatever `PERFBASE_*` variables are set.
    /// Unparseable values are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(api_key) = parse_env::str_not_empty("PERFBASE_API_KEY") {
            config.api_key = Some(api_key);
        }
        if let Some(api_url) = parse_env::str_not_empty("PERFBASE_API_URL") {
            config.api_url = api_url;
        }
        if let Some(timeout) = parse_env::duration("PERFBASE_TIMEOUT") {
            config.timeout = timeout;
        }
        if let Some(environment) = parse_env::str_not_empty("PERFBASE_ENVIRONMENT") {
            config.environment = Some(environment);
        }
        if let Some(app_version) = parse_env::str_not_empty("PERFBASE_APP_VERSION") {
            config.app_version = Some(app_version);
        }
        if let Some(ignored) = parse_env::list("PERFBASE_IGNORED_FUNCTIONS") {
            config.ignored_functions = ignored;
        }

        let toggles: [(&str, &mut bool); 14] = [
            ("PERFBASE_USE_COARSE_CLOCK", &mut config.use_coarse_clock),
            ("PERFBASE_TRACK_EXCEPTIONS", &mut config.track_exceptions),
            (
                "PERFBASE_TRACK_FILE_COMPILATION",
                &mut config.track_file_compilation,
            ),
            (
                "PERFBASE_TRACK_MEMORY_ALLOCATION",
                &mut config.track_memory_allocation,
            ),
            ("PERFBASE_TRACK_CPU_TIME", &mut config.track_cpu_time),
            (
                "PERFBASE_TRACK_FILE_DEFINITIONS",
                &mut config.track_file_definitions,
            ),
            ("PERFBASE_TRACK_PDO", &mut config.track_pdo),
            ("PERFBASE_TRACK_HTTP", &mut config.track_http),
            ("PERFBASE_TRACK_CACHES", &mut config.track_caches),
            ("PERFBASE_TRACK_MONGODB", &mut config.track_mongodb),
            (
                "PERFBASE_TRACK_ELASTICSEARCH",
                &mut config.track_elasticsearch,
            ),
            ("PERFBASE_TRACK_QUEUES", &mut config.track_queues),
            ("PERFBASE_TRACK_AWS_SDK", &mut config.track_aws_sdk),
            (
                "PERFBASE_TRACK_FILE_OPERATIONS",
                &mut config.track_file_operations,
            ),
        ];
        for (name, toggle) in toggles {
            if let Some(value) = parse_env::bool(name) {
                *toggle = value;
            }
        }

        config
    }

    /// The profiler bitmask for the enabled toggles.
    pub fn flags(&self) -> FeatureFlags {
        let mut flags = FeatureFlags::NONE;
        flags.set(FeatureFlags::USE_COARSE_CLOCK, self.use_coarse_clock);
        flags.set(FeatureFlags::TRACK_EXCEPTIONS, self.track_exceptions);
        flags.set(
            FeatureFlags::TRACK_FILE_COMPILATION,
            self.track_file_compilation,
        );
        flags.set(
            FeatureFlags::TRACK_MEMORY_ALLOCATION,
            self.track_memory_allocation,
        );
        flags.set(FeatureFlags::TRACK_CPU_TIME, self.track_cpu_time);
        flags.set(
            FeatureFlags::TRACK_FILE_DEFINITIONS,
            self.track_file_definitions,
        );
        flags.set(FeatureFlags::TRACK_PDO, self.track_pdo);
        flags.set(FeatureFlags::TRACK_HTTP, self.track_http);
        flags.set(FeatureFlags::TRACK_CACHES, self.track_caches);
        flags.set(FeatureFlags::TRACK_MONGODB, self.track_mongodb);
        flags.set(FeatureFlags::TRACK_ELASTICSEARCH, self.track_elasticsearch);
        flags.set(FeatureFlags::TRACK_QUEUES, self.track_queues);
        flags.set(FeatureFlags::TRACK_AWS_SDK, self.track_aws_sdk);
        flags.set(
            FeatureFlags::TRACK_FILE_OPERATIONS,
            self.track_file_operations,
        );
        flags
    }

    /// Checks the settings needed to reach the collector.
    pub fn validate(&self) -> Result<(), TraceError> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(TraceError::InvalidConfig(format!(
                "api_url must start with http:// or https://, got {:?}",
                self.api_url
            )));
        }
        if self.timeout.is_zero() {
            return Err(TraceError::InvalidConfig(
                "timeout must be greater than zero".to_owned(),
            ));
        }
        Ok(())
    }
}
