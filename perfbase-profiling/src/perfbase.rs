// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::config::Config;
use crate::error::TraceError;
use crate::profiler::Profiler;
use crate::trace::TraceInstance;
use crate::transport::{ApiClient, Transport};
use std::sync::Arc;

/// Entry point of the SDK. Holds the configuration, the transport shared by
/// every trace and at most one current [TraceInstance].
pub struct Perfbase {
    config: Config,
    transport: Arc<dyn Transport>,
    instance: Option<TraceInstance>,
}

impl Perfbase {
    /// Uses an [ApiClient] built from `config`, which must carry an API key.
    pub fn new(config: Config) -> Result<Self, TraceError> {
        let transport = Arc::new(ApiClient::new(&config)?);
        Ok(Self::with_transport(config, transport))
    }

    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            transport,
            instance: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Creates the current trace. Fails if one already exists; call
    /// [Perfbase::reset_instance] first to replace it.
    pub fn create_instance(
        &mut self,
        profiler: Box<dyn Profiler>,
    ) -> Result<&mut TraceInstance, TraceError> {
        if self.instance.is_some() {
            return Err(TraceError::InstanceAlreadyActive);
        }
        let instance = TraceInstance::new(&self.config, profiler, self.transport.clone());
        Ok(self.instance.insert(instance))
    }

    pub fn has_instance(&self) -> bool {
        self.instance.is_some()
    }

    pub fn instance(&self) -> Result<&TraceInstance, TraceError> {
        self.instance.as_ref().ok_or(TraceError::NoActiveInstance)
    }

    pub fn instance_mut(&mut self) -> Result<&mut TraceInstance, TraceError> {
        self.instance.as_mut().ok_or(TraceError::NoActiveInstance)
    }

    /// Drops the current trace, if any.
    pub fn reset_instance(&mut self) {
        self.instance = None;
    }
}

impl std::fmt::Debug for Perfbase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Perfbase")
            .field("config", &self.config)
            .field("instance", &self.instance)
            .finish_non_exhaustive()
    }
}
