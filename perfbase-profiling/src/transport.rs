// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Delivery of submission payloads to the collector.

use crate::config::Config;
use crate::encoder::EncodingError;
use crate::error::TraceError;
use crate::trace::SubmissionPayload;
use perfbase_http_client::header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use perfbase_http_client::{HttpClient, HttpClientError, HttpResponse};
use std::io;
use tokio::runtime::{Handle, Runtime};
use tracing::debug;

/// Collector endpoint for finished traces.
pub const SUBMIT_ENDPOINT: &str = "/v1/submit";

const SDK_USER_AGENT: &str = concat!("Perfbase-Rust-SDK/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error(transparent)]
    Client(#[from] HttpClientError),
    #[error("transport runtime failure: {0}")]
    Runtime(#[from] io::Error),
    #[error("invalid value for header {0}")]
    InvalidHeader(&'static str),
    #[error("request thread panicked")]
    WorkerPanicked,
}

/// Sends a request body to a collector endpoint. The call is synchronous for
/// the caller; implementations may block internally.
pub trait Transport: Send + Sync {
    fn post(&self, endpoint: &str, body: &str) -> Result<(), TransportError>;
}

/// [Transport] talking to the Perfbase collector over HTTP.
///
/// Requests are driven by a private current-thread runtime. When `post` is
/// called from a thread that already runs a tokio runtime, the request is
/// driven from a scoped helper thread instead, so the caller blocks without
/// nesting runtimes.
#[derive(Debug)]
pub struct ApiClient {
    client: HttpClient,
    // Only `None` once dropped.
    runtime: Option<Runtime>,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, TraceError> {
        let api_key = config.api_key.as_deref().ok_or(TraceError::ApiKeyMissing)?;
        let authorization = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|_| TransportError::InvalidHeader("Authorization"))?;
        config.validate()?;

        let client = HttpClient::builder()
            .base_url(config.api_url.as_str())
            .timeout(config.timeout)
            .default_header(AUTHORIZATION, authorization)
            .default_header(ACCEPT, HeaderValue::from_static("application/json"))
            .default_header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .default_header(USER_AGENT, HeaderValue::from_static(SDK_USER_AGENT))
            .build()
            .map_err(TransportError::from)?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(TransportError::from)?;

        Ok(Self {
            client,
            runtime: Some(runtime),
        })
    }

    /// Serializes `payload` and posts it to [SUBMIT_ENDPOINT].
    pub fn submit_trace(&self, payload: &SubmissionPayload) -> Result<(), TraceError> {
        let body = serde_json::to_string(payload).map_err(EncodingError::from)?;
        Ok(self.post(SUBMIT_ENDPOINT, &body)?)
    }

    fn blocking_post(&self, endpoint: &str, body: &str) -> Result<HttpResponse, TransportError> {
        let runtime = self
            .runtime
            .as_ref()
            .ok_or_else(|| io::Error::other("transport runtime is shut down"))?;
        let request = || runtime.block_on(self.client.post(endpoint, body.to_owned()));

        if Handle::try_current().is_err() {
            return Ok(request()?);
        }
        // `block_on` panics on a thread that is already driving a runtime.
        let response = std::thread::scope(|scope| scope.spawn(request).join())
            .map_err(|_| TransportError::WorkerPanicked)??;
        Ok(response)
    }
}

impl Transport for ApiClient {
    fn post(&self, endpoint: &str, body: &str) -> Result<(), TransportError> {
        let response = self.blocking_post(endpoint, body)?;
        debug!(
            endpoint,
            status = response.status_code,
            "collector accepted payload"
        );
        Ok(())
    }
}

impl Drop for ApiClient {
    fn drop(&mut self) {
        // A plain drop blocks, which panics inside an async context.
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}
