// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::config::{HttpClientBuilder, HttpClientConfig};
use crate::{HttpClientError, HttpResponse};
use bytes::Bytes;
use std::time::Duration;
use tracing::debug;

/// An async client bound to one collector.
///
/// Constructed once and reused across many [`HttpClient::post`] calls. Holds
/// a connection pool internally.
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Construct a client for the given base URL and timeout, without
    /// default headers.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, HttpClientError> {
        Self::builder().base_url(base_url).timeout(timeout).build()
    }

    /// Returns a builder for a client with default headers.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    pub(crate) fn from_config(config: HttpClientConfig) -> Result<Self, HttpClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .default_headers(config.default_headers().clone())
            .build()
            .map_err(|e| HttpClientError::InvalidConfig(e.to_string()))?;
        Ok(Self { client, config })
    }

    /// The client's configuration.
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// POSTs `body` to `endpoint`, resolved against the base URL.
    ///
    /// Exactly one attempt is made. A non-2xx answer is returned as
    /// [`HttpClientError::RequestFailed`] carrying the response body.
    pub async fn post(
        &self,
        endpoint: &str,
        body: impl Into<Bytes>,
    ) -> Result<HttpResponse, HttpClientError> {
        let url = self.config.url_for(endpoint);
        let body = body.into();
        debug!(url = %url, body_len = body.len(), "posting payload");

        let response = self
            .client
            .post(&url)
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            return Err(HttpClientError::RequestFailed {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }
        Ok(HttpResponse {
            status_code: status.as_u16(),
            body,
        })
    }
}

fn map_reqwest_error(e: reqwest::Error) -> HttpClientError {
    if e.is_timeout() {
        HttpClientError::TimedOut
    } else if e.is_connect() {
        HttpClientError::ConnectionFailed(e.to_string())
    } else {
        HttpClientError::IoError(e.to_string())
    }
}
