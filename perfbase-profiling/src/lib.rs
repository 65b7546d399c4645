// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

//! Perfbase SDK core.
//!
//! A [TraceInstance] drives a native [Profiler] through one trace. When the
//! trace stops, the profiler's call-path records are compacted into a
//! token glossary plus a prefix trie ([compaction]), encoded as
//! base64(gzip(json)) ([encoder]) and handed to a [Transport], by default
//! the HTTP [ApiClient].
//!
//! ```no_run
//! # fn run(profiler: Box<dyn perfbase_profiling::Profiler>) -> Result<(), perfbase_profiling::TraceError> {
//! use perfbase_profiling::{Config, Perfbase};
//!
//! let mut perfbase = Perfbase::new(Config::from_env())?;
//! let trace = perfbase.create_instance(profiler)?;
//! trace.attributes_mut().action = Some("GET /users".to_owned());
//! trace.start()?;
//! // ... the traced work ...
//! trace.stop(true)?;
//! # Ok(())
//! # }
//! ```

pub mod compaction;
pub mod config;
pub mod encoder;
pub mod log;
pub mod records;
pub mod trace;
pub mod transport;

mod error;
mod feature_flags;
mod perfbase;
mod profiler;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::Config;
pub use error::TraceError;
pub use feature_flags::FeatureFlags;
pub use perfbase::Perfbase;
pub use profiler::Profiler;
pub use records::{Metadata, RawRecords, Scalar, ValueSeq};
pub use trace::{Attributes, StateError, SubmissionPayload, TraceInstance, TraceState};
pub use transport::{ApiClient, Transport, TransportError};
