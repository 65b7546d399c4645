// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::feature_flags::FeatureFlags;
use crate::records::RawRecords;

/// The native profiler a trace drives. Implementations wrap whatever
/// extension or agent does the actual sampling.
pub trait Profiler: Send {
    /// Whether the profiler can be used in this process. Asked once per
    /// trace, when the trace is created.
    fn is_available(&self) -> bool;

    /// Begins recording with the given categories, skipping
    /// `ignored_functions`.
    fn enable(&mut self, flags: FeatureFlags, ignored_functions: &[String]);

    fn disable(&mut self);

    /// The records collected since the last [Profiler::clear].
    fn raw_data(&mut self) -> RawRecords;

    /// Resets the profiler so it can be enabled again.
    fn clear(&mut self);
}
