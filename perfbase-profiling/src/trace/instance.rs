// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use super::attributes::Attributes;
use super::payload::SubmissionPayload;
use super::state::TraceState;
use crate::config::Config;
use crate::encoder::EncodingError;
use crate::error::TraceError;
use crate::feature_flags::FeatureFlags;
use crate::profiler::Profiler;
use crate::records::{Metadata, RawRecords, Scalar};
use crate::transport::{Transport, SUBMIT_ENDPOINT};
use std::sync::Arc;
use tracing::{debug, warn};

/// One trace: drives the profiler through `start`/`stop`, then compacts,
/// encodes and submits what it recorded.
///
/// Dropping an active trace disables and clears the profiler without sending
/// anything.
pub struct TraceInstance {
    state: TraceState,
    profiler: Box<dyn Profiler>,
    profiler_available: bool,
    transport: Arc<dyn Transport>,
    flags: FeatureFlags,
    ignored_functions: Vec<String>,
    attributes: Attributes,
    metadata: Metadata,
    records: RawRecords,
}

impl TraceInstance {
    pub fn new(config: &Config, profiler: Box<dyn Profiler>, transport: Arc<dyn Transport>) -> Self {
        let profiler_available = profiler.is_available();
        if !profiler_available {
            warn!("profiler is not available, traces will not be recorded");
        }

        let mut attributes = Attributes::collect();
        attributes.environment.clone_from(&config.environment);
        attributes.app_version.clone_from(&config.app_version);

        Self {
            state: TraceState::New,
            profiler,
            profiler_available,
            transport,
            flags: config.flags(),
            ignored_functions: config.ignored_functions.clone(),
            attributes,
            metadata: Metadata::new(),
            records: RawRecords::new(),
        }
    }

    pub fn state(&self) -> TraceState {
        self.state
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    pub fn set_metadata(&mut self, key: impl Into<String>, value: impl Into<Scalar>) {
        self.metadata.insert(key.into(), value.into());
    }

    /// Records collected by [TraceInstance::stop]; empty before that.
    pub fn records(&self) -> &RawRecords {
        &self.records
    }

    pub fn start(&mut self) -> Result<(), TraceError> {
        self.state.require(TraceState::New, TraceState::Active)?;
        if !self.profiler_available {
            return Err(TraceError::ProfilerUnavailable);
        }

        self.profiler.enable(self.flags, &self.ignored_functions);
        self.state.activate()?;
        debug!(flags = self.flags.bits(), "trace started");
        Ok(())
    }

    /// Stops recording and collects the profiler's data. With `also_send`,
    /// the trace is submitted right away.
    pub fn stop(&mut self, also_send: bool) -> Result<(), TraceError> {
        self.state.require(TraceState::Active, TraceState::Complete)?;

        self.profiler.disable();
        self.records = self.profiler.raw_data();
        self.profiler.clear();
        self.state.complete()?;
        debug!(records = self.records.len(), "trace stopped");

        if also_send {
            self.send()?;
        }
        Ok(())
    }

    /// Compacts and encodes the collected records without sending them.
    pub fn build_payload(&self) -> Result<SubmissionPayload, TraceError> {
        Ok(SubmissionPayload::build(
            &self.attributes,
            &self.records,
            &self.metadata,
        )?)
    }

    /// Submits the trace. Allowed any number of times once the trace is
    /// complete, so a failed submission can be retried as a whole.
    pub fn send(&self) -> Result<(), TraceError> {
        self.state.require(TraceState::Complete, TraceState::Complete)?;

        let payload = self.build_payload()?;
        let body = serde_json::to_string(&payload).map_err(EncodingError::from)?;
        debug!(
            bytes = body.len(),
            perf_data_bytes = payload.perf_data.len(),
            "submitting trace"
        );
        self.transport.post(SUBMIT_ENDPOINT, &body)?;
        Ok(())
    }
}

impl Drop for TraceInstance {
    fn drop(&mut self) {
        if self.state.is_active() {
            warn!("trace dropped while active, discarding its data");
            self.profiler.disable();
            self.profiler.clear();
        }
    }
}

impl std::fmt::Debug for TraceInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TraceInstance")
            .field("state", &self.state)
            .field("profiler_available", &self.profiler_available)
            .field("flags", &self.flags)
            .field("attributes", &self.attributes)
            .field("metadata", &self.metadata)
            .field("records", &self.records.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{RecordingProfiler, RecordingTransport};

    fn instance_with(profiler: RecordingProfiler) -> (TraceInstance, Arc<RecordingTransport>) {
        let transport = Arc::new(RecordingTransport::default());
        let instance = TraceInstance::new(&Config::default(), Box::new(profiler), transport.clone());
        (instance, transport)
    }

    #[test]
    fn start_enables_with_configured_flags() {
        let profiler = RecordingProfiler::new();
        let handle = profiler.clone();
        let config = Config {
            ignored_functions: vec!["usleep".to_owned()],
            ..Config::default()
        };
        let mut instance = TraceInstance::new(
            &config,
            Box::new(profiler),
            Arc::new(RecordingTransport::default()),
        );

        instance.start().unwrap();
        assert!(instance.state().is_active());
        assert_eq!(
            handle.enabled_with(),
            Some((config.flags(), vec!["usleep".to_owned()]))
        );
    }

    #[test]
    fn second_start_fails() {
        let (mut instance, _) = instance_with(RecordingProfiler::new());
        instance.start().unwrap();

        match instance.start() {
            Err(TraceError::State(err)) => {
                assert_eq!(err.from, TraceState::Active);
                assert_eq!(err.allowed, vec![TraceState::New]);
            }
            other => panic!("expected a state error, got {other:?}"),
        }
    }

    #[test]
    fn stop_before_start_fails() {
        let (mut instance, transport) = instance_with(RecordingProfiler::new());
        assert!(matches!(instance.stop(true), Err(TraceError::State(_))));
        assert!(instance.state().is_new());
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn send_requires_completion() {
        let (mut instance, transport) = instance_with(RecordingProfiler::new());
        assert!(matches!(instance.send(), Err(TraceError::State(_))));
        instance.start().unwrap();
        assert!(matches!(instance.send(), Err(TraceError::State(_))));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn unavailable_profiler_blocks_start() {
        let profiler = RecordingProfiler::unavailable();
        let handle = profiler.clone();
        let (mut instance, _) = instance_with(profiler);

        assert!(matches!(instance.start(), Err(TraceError::ProfilerUnavailable)));
        assert!(instance.state().is_new());
        assert_eq!(handle.enabled_with(), None);
    }

    #[test]
    fn stop_collects_and_clears() {
        let profiler = RecordingProfiler::with_records([("main~App::run", vec![Scalar::Int(5)])]);
        let handle = profiler.clone();
        let (mut instance, transport) = instance_with(profiler);

        instance.start().unwrap();
        instance.stop(false).unwrap();

        assert!(instance.state().is_complete());
        assert_eq!(instance.records().len(), 1);
        assert!(handle.is_cleared());
        assert!(!handle.is_enabled());
        assert!(transport.requests().is_empty());
        assert!(matches!(instance.start(), Err(TraceError::State(_))));
    }

    #[test]
    fn stop_and_send() {
        let profiler = RecordingProfiler::with_records([("main", vec![Scalar::Int(1)])]);
        let (mut instance, transport) = instance_with(profiler);
        instance.set_metadata("queue", "emails");

        instance.start().unwrap();
        instance.stop(true).unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, SUBMIT_ENDPOINT);
        let body: serde_json::Value = serde_json::from_str(&requests[0].1).unwrap();
        assert!(body["meta_data"].is_string());

        // Resubmission is allowed once complete.
        instance.send().unwrap();
        assert_eq!(transport.requests().len(), 2);
    }

    #[test]
    fn config_defaults_reach_attributes() {
        let config = Config {
            environment: Some("staging".to_owned()),
            app_version: Some("1.4.2".to_owned()),
            ..Config::default()
        };
        let instance = TraceInstance::new(
            &config,
            Box::new(RecordingProfiler::new()),
            Arc::new(RecordingTransport::default()),
        );
        assert_eq!(instance.attributes().environment.as_deref(), Some("staging"));
        assert_eq!(instance.attributes().app_version.as_deref(), Some("1.4.2"));
    }

    #[test]
    fn drop_while_active_disables_without_sending() {
        let profiler = RecordingProfiler::with_records([("main", vec![Scalar::Int(1)])]);
        let handle = profiler.clone();
        let (mut instance, transport) = instance_with(profiler);

        instance.start().unwrap();
        drop(instance);

        assert!(!handle.is_enabled());
        assert!(handle.is_cleared());
        assert!(transport.requests().is_empty());
    }
}
