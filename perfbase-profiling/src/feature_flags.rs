// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Bitmask of the categories the native profiler should track. The profiler
/// receives it as an opaque integer.
#[repr(transparent)]
#[derive(Clone, Copy, Default, Eq, PartialEq, Hash)]
pub struct FeatureFlags(u32);

impl FeatureFlags {
    pub const NONE: Self = Self(0);
    pub const USE_COARSE_CLOCK: Self = Self(1 << 0);
    pub const TRACK_EXCEPTIONS: Self = Self(1 << 1);
    pub const TRACK_FILE_COMPILATION: Self = Self(1 << 2);
    pub const TRACK_MEMORY_ALLOCATION: Self = Self(1 << 3);
    pub const TRACK_CPU_TIME: Self = Self(1 << 4);
    pub const TRACK_FILE_DEFINITIONS: Self = Self(1 << 5);
    pub const TRACK_PDO: Self = Self(1 << 6);
    pub const TRACK_HTTP: Self = Self(1 << 7);
    pub const TRACK_CACHES: Self = Self(1 << 8);
    pub const TRACK_MONGODB: Self = Self(1 << 9);
    pub const TRACK_ELASTICSEARCH: Self = Self(1 << 10);
    pub const TRACK_QUEUES: Self = Self(1 << 11);
    pub const TRACK_AWS_SDK: Self = Self(1 << 12);
    pub const TRACK_FILE_OPERATIONS: Self = Self(1 << 13);

    /// Low overhead set used when nothing else is configured.
    pub const DEFAULT: Self = Self(
        Self::USE_COARSE_CLOCK.0
            | Self::TRACK_CPU_TIME.0
            | Self::TRACK_PDO.0
            | Self::TRACK_HTTP.0
            | Self::TRACK_CACHES.0
            | Self::TRACK_MONGODB.0
            | Self::TRACK_ELASTICSEARCH.0
            | Self::TRACK_QUEUES.0
            | Self::TRACK_AWS_SDK.0,
    );

    pub const ALL: Self = Self((1 << 14) - 1);

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn set(&mut self, other: Self, enabled: bool) {
        if enabled {
            self.0 |= other.0;
        } else {
            self.0 &= !other.0;
        }
    }
}

impl BitOr for FeatureFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for FeatureFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for FeatureFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeatureFlags({:#06x})", self.0)
    }
}
