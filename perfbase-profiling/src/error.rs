// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::encoder::EncodingError;
use crate::trace::StateError;
use crate::transport::TransportError;

/// Errors surfaced by the trace lifecycle and the [crate::Perfbase] facade.
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("the profiler is not available in this process")]
    ProfilerUnavailable,
    #[error("an API key is required to submit traces")]
    ApiKeyMissing,
    #[error("a trace instance is already active")]
    InstanceAlreadyActive,
    #[error("no trace instance is active")]
    NoActiveInstance,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
