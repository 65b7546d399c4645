// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! The lifecycle of a single trace and the payload it produces.

mod attributes;
mod instance;
mod payload;
mod state;

pub use attributes::Attributes;
pub use instance::TraceInstance;
pub use payload::SubmissionPayload;
pub use state::{StateError, TraceState};
