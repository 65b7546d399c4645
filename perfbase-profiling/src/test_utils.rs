// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! In-memory collaborators for tests.

#![allow(clippy::unwrap_used)]

use crate::feature_flags::FeatureFlags;
use crate::profiler::Profiler;
use crate::records::{RawRecords, ValueSeq};
use crate::transport::{Transport, TransportError};
use perfbase_http_client::HttpClientError;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct ProfilerState {
    available: bool,
    enabled: Option<(FeatureFlags, Vec<String>)>,
    records: RawRecords,
    enable_calls: usize,
    clear_calls: usize,
}

/// A [Profiler] that hands back canned records. Clones share state, so a
/// test can keep a handle after boxing one for a trace.
#[derive(Clone, Debug)]
pub struct RecordingProfiler {
    state: Arc<Mutex<ProfilerState>>,
}

impl Default for RecordingProfiler {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingProfiler {
    pub fn new() -> Self {
        Self::with_records(std::iter::empty::<(&str, ValueSeq)>())
    }

    pub fn unavailable() -> Self {
        let profiler = Self::new();
        profiler.lock().available = false;
        profiler
    }

    /// Records returned by the next [Profiler::raw_data] call.
    pub fn with_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, ValueSeq)>,
    {
        let state = ProfilerState {
            available: true,
            records: records
                .into_iter()
                .map(|(key, value)| (key.to_owned(), value))
                .collect(),
            ..ProfilerState::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ProfilerState> {
        self.state.lock().unwrap()
    }

    /// Arguments of the current enable, `None` while disabled.
    pub fn enabled_with(&self) -> Option<(FeatureFlags, Vec<String>)> {
        self.lock().enabled.clone()
    }

    pub fn is_enabled(&self) -> bool {
        self.lock().enabled.is_some()
    }

    pub fn enable_calls(&self) -> usize {
        self.lock().enable_calls
    }

    pub fn is_cleared(&self) -> bool {
        self.lock().clear_calls > 0
    }
}

impl Profiler for RecordingProfiler {
    fn is_available(&self) -> bool {
        self.lock().available
    }

    fn enable(&mut self, flags: FeatureFlags, ignored_functions: &[String]) {
        let mut state = self.lock();
        state.enabled = Some((flags, ignored_functions.to_vec()));
        state.enable_calls += 1;
    }

    fn disable(&mut self) {
        self.lock().enabled = None;
    }

    fn raw_data(&mut self) -> RawRecords {
        self.lock().records.clone()
    }

    fn clear(&mut self) {
        let mut state = self.lock();
        state.records.clear();
        state.clear_calls += 1;
    }
}

/// A [Transport] that keeps every request in memory. It can be told to fail
/// instead.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<(String, String)>>,
    fail_with_status: Mutex<Option<u16>>,
}

impl RecordingTransport {
    /// A transport answering every post with `status`.
    pub fn failing(status: u16) -> Self {
        let transport = Self::default();
        transport.set_failure(Some(status));
        transport
    }

    pub fn set_failure(&self, status: Option<u16>) {
        let mut failure = self.fail_with_status.lock().unwrap();
        *failure = status;
    }

    /// `(endpoint, body)` of every successful post, oldest first.
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for RecordingTransport {
    fn post(&self, endpoint: &str, body: &str) -> Result<(), TransportError> {
        if let Some(status) = *self.fail_with_status.lock().unwrap() {
            return Err(HttpClientError::RequestFailed {
                status,
                body: String::new(),
            }
            .into());
        }
        self.requests
            .lock()
            .unwrap()
            .push((endpoint.to_owned(), body.to_owned()));
        Ok(())
    }
}
