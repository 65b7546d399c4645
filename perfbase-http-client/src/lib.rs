// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

#![deny(missing_docs)]
#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

//! `perfbase-http-client` delivers payloads to the Perfbase collector.
//!
//! An [`HttpClient`] is bound to one collector base URL and carries the
//! headers every submission needs. [`HttpClient::post`] makes exactly one
//! attempt and reports any non-2xx answer as
//! [`HttpClientError::RequestFailed`]. Retrying is left to the caller.
//!
//! # Quick start
//!
//! ```rust,no_run
//! # async fn example() -> Result<(), perfbase_http_client::HttpClientError> {
//! use perfbase_http_client::header::{HeaderValue, CONTENT_TYPE};
//! use perfbase_http_client::HttpClient;
//! use std::time::Duration;
//!
//! let client = HttpClient::builder()
//!     .base_url("https://receiver.perfbase.com")
//!     .timeout(Duration::from_secs(10))
//!     .default_header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
//!     .build()?;
//! let response = client.post("/v1/submit", "{}").await?;
//! println!("Status: {}", response.status_code);
//! # Ok(())
//! # }
//! ```

pub mod config;

mod client;
mod error;
mod response;

pub use client::HttpClient;
pub use config::{HttpClientBuilder, HttpClientConfig};
pub use error::HttpClientError;
pub use response::HttpResponse;

/// Header names and values accepted by [`HttpClientBuilder::default_header`].
pub mod header {
    pub use reqwest::header::{
        HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT,
    };
}
