// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

/// Lifecycle of one trace: `New -> Active -> Complete`. There is no way back
/// to `New` and nothing leaves `Complete`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum TraceState {
    #[default]
    New,
    Active,
    Complete,
}

impl fmt::Display for TraceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TraceState::New => "new",
            TraceState::Active => "active",
            TraceState::Complete => "complete",
        })
    }
}

/// An operation was attempted from a state that does not allow it.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("cannot transition trace from {from} to {to}, required state: {}", join_states(.allowed))]
pub struct StateError {
    pub from: TraceState,
    pub to: TraceState,
    pub allowed: Vec<TraceState>,
}

fn join_states(states: &[TraceState]) -> String {
    states
        .iter()
        .map(TraceState::to_string)
        .collect::<Vec<_>>()
        .join(" or ")
}

impl TraceState {
    pub fn is_new(self) -> bool {
        self == TraceState::New
    }

    pub fn is_active(self) -> bool {
        self == TraceState::Active
    }

    pub fn is_complete(self) -> bool {
        self == TraceState::Complete
    }

    /// `New -> Active`.
    pub fn activate(&mut self) -> Result<(), StateError> {
        self.transition(TraceState::New, TraceState::Active)
    }

    /// `Active -> Complete`.
    pub fn complete(&mut self) -> Result<(), StateError> {
        self.transition(TraceState::Active, TraceState::Complete)
    }

    /// Checks that the current state is `required` without changing it. `to`
    /// names the state the caller is working towards, for the error message.
    pub fn require(self, required: TraceState, to: TraceState) -> Result<(), StateError> {
        if self == required {
            Ok(())
        } else {
            Err(StateError {
                from: self,
                to,
                allowed: vec![required],
            })
        }
    }

    fn transition(&mut self, from: TraceState, to: TraceState) -> Result<(), StateError> {
        self.require(from, to)?;
        *self = to;
        Ok(())
    }
}
