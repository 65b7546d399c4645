// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Error types for `perfbase-http-client`.

use thiserror::Error;

/// Errors that can occur while delivering a request to the collector.
#[derive(Debug, Error)]
pub enum HttpClientError {
    /// The TCP connection to the collector could not be established.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The request exceeded the configured timeout duration.
    #[error("request timed out")]
    TimedOut,

    /// The collector answered with a status outside 2xx.
    #[error("request failed with status {status}: {body}")]
    RequestFailed {
        /// The HTTP status code (e.g. 401, 503).
        status: u16,
        /// The response body, lossy-decoded as UTF-8.
        body: String,
    },

    /// The client configuration was invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An I/O error occurred during the request.
    #[error("I/O error: {0}")]
    IoError(String),
}

impl HttpClientError {
    /// The HTTP status the collector answered with, if the failure carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}
