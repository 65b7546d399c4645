// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use super::attributes::Attributes;
use crate::compaction::compact;
use crate::encoder::{encode, EncodingError};
use crate::records::{Metadata, RawRecords};
use serde::Serialize;

/// The JSON body posted to the collector. Unset attributes are sent as
/// `null`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubmissionPayload {
    #[serde(flatten)]
    pub attributes: Attributes,
    /// base64(gzip(json(compacted trace)))
    pub perf_data: String,
    /// base64(gzip(json(metadata))), `null` when there is no metadata.
    pub meta_data: Option<String>,
}

impl SubmissionPayload {
    /// Compacts and encodes `records` and `metadata`.
    pub fn build(
        attributes: &Attributes,
        records: &RawRecords,
        metadata: &Metadata,
    ) -> Result<Self, EncodingError> {
        let perf_data = encode(&compact(records))?;
        let meta_data = if metadata.is_empty() {
            None
        } else {
            Some(encode(metadata)?)
        };
        Ok(Self {
            attributes: attributes.clone(),
            perf_data,
            meta_data,
        })
    }
}
