// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Collector endpoint settings for an [`HttpClient`].

use crate::header::{HeaderMap, HeaderName, HeaderValue};
use crate::{HttpClient, HttpClientError};
use std::time::Duration;

/// Where and how an [`HttpClient`] submits payloads.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    base_url: String,
    timeout: Duration,
    default_headers: HeaderMap,
}

impl HttpClientConfig {
    /// The collector base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Timeout applied to every request.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Headers sent with every request.
    pub fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }

    /// Joins `endpoint` onto the base URL. Absolute URLs pass through as-is.
    pub fn url_for(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            return endpoint.to_owned();
        }
        if endpoint.starts_with('/') {
            format!("{}{endpoint}", self.base_url)
        } else {
            format!("{}/{endpoint}", self.base_url)
        }
    }
}

/// Builder for [`HttpClient`], obtained via [`HttpClient::builder`].
#[derive(Debug, Default)]
pub struct HttpClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    default_headers: HeaderMap,
}

impl HttpClientBuilder {
    /// Set the collector base URL. Must be `http` or `https`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Add a header sent with every request. A later value for the same
    /// name replaces the earlier one.
    pub fn default_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.default_headers.insert(name, value);
        self
    }

    /// Build the [`HttpClient`].
    ///
    /// Fails with [`HttpClientError::InvalidConfig`] when the base URL or the
    /// timeout is missing, or when the base URL is not `http`/`https`.
    pub fn build(self) -> Result<HttpClient, HttpClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| HttpClientError::InvalidConfig("base_url is required".to_owned()))?;
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(HttpClientError::InvalidConfig(format!(
                "unsupported base_url scheme: {base_url}"
            )));
        }
        let timeout = self
            .timeout
            .ok_or_else(|| HttpClientError::InvalidConfig("timeout is required".to_owned()))?;

        HttpClient::from_config(HttpClientConfig {
            base_url: base_url.trim_end_matches('/').to_owned(),
            timeout,
            default_headers: self.default_headers,
        })
    }
}
