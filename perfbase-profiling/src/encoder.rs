// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Payload blob encoding: JSON, then gzip, then base64.

use base64::Engine;
use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

const COMPRESSION_LEVEL: u32 = 6;

#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    /// The value could not be represented as JSON, for instance a non-finite
    /// float.
    #[error("failed to serialize payload: {0}")]
    Encode(#[from] serde_json::Error),
    /// The decompressed JSON does not match the target type.
    #[error("failed to deserialize payload: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("failed to compress payload: {0}")]
    Compress(#[source] std::io::Error),
    #[error("payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Serializes `value` to JSON, gzips it and returns the standard base64 of
/// the compressed bytes.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String, EncodingError> {
    let json = serde_json::to_vec(value)?;

    let mut encoder = GzEncoder::new(Vec::new(), Compression::new(COMPRESSION_LEVEL));
    encoder.write_all(&json).map_err(EncodingError::Compress)?;
    let compressed = encoder.finish().map_err(EncodingError::Compress)?;

    Ok(base64::engine::general_purpose::STANDARD.encode(compressed))
}

/// Reverses [encode]. Nesting depth is not limited, so a trie built from
/// arbitrarily deep call paths decodes like a shallow one.
pub fn decode<T: DeserializeOwned>(blob: &str) -> Result<T, EncodingError> {
    let compressed = base64::engine::general_purpose::STANDARD.decode(blob)?;

    let mut json = Vec::new();
    GzDecoder::new(compressed.as_slice())
        .read_to_end(&mut json)
        .map_err(EncodingError::Compress)?;

    let mut deserializer = serde_json::Deserializer::from_slice(&json);
    deserializer.disable_recursion_limit();
    let value = T::deserialize(serde_stacker::Deserializer::new(&mut deserializer))
        .map_err(EncodingError::Decode)?;
    deserializer.end().map_err(EncodingError::Decode)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Metadata, Scalar};

    #[test]
    fn encode_produces_gzipped_json() {
        let mut metadata = Metadata::new();
        metadata.insert("release".to_owned(), Scalar::from("2024.1"));
        metadata.insert("workers".to_owned(), Scalar::Int(4));

        let blob = encode(&metadata).unwrap();

        let compressed = base64::engine::general_purpose::STANDARD
            .decode(&blob)
            .unwrap();
        // gzip magic
        assert_eq!(&compressed[..2], &[0x1f, 0x8b]);

        let mut json = String::new();
        GzDecoder::new(compressed.as_slice())
            .read_to_string(&mut json)
            .unwrap();
        assert_eq!(json, r#"{"release":"2024.1","workers":4}"#);

        let back: Metadata = decode(&blob).unwrap();
        assert_eq!(back, metadata);
    }

    #[test]
    fn non_finite_float_is_an_encode_error() {
        let values = vec![Scalar::Float(f64::NAN)];
        assert!(matches!(encode(&values), Err(EncodingError::Encode(_))));
    }

    #[test]
    fn decode_reports_each_failure_kind() {
        assert!(matches!(
            decode::<Metadata>("not base64!"),
            Err(EncodingError::Base64(_))
        ));

        let not_gzip = base64::engine::general_purpose::STANDARD.encode(b"{}");
        assert!(matches!(
            decode::<Metadata>(&not_gzip),
            Err(EncodingError::Compress(_))
        ));

        let wrong_shape = encode(&[1, 2, 3]).unwrap();
        let err = decode::<Metadata>(&wrong_shape).unwrap_err();
        assert!(matches!(err, EncodingError::Decode(_)));
        assert!(err.to_string().starts_with("failed to deserialize payload"));
    }

    #[test]
    fn deep_call_path_decodes() {
        use crate::compaction::{compact, CompactedTrace};
        use crate::records::RawRecords;

        let key = (0..500)
            .map(|depth| format!("App\\Frame{depth}::handle"))
            .collect::<Vec<_>>()
            .join("~");
        let mut raw = RawRecords::new();
        raw.insert(key, vec![Scalar::Int(1)]);

        let blob = encode(&compact(&raw)).unwrap();
        let trace: CompactedTrace = decode(&blob).unwrap();
        assert_eq!(trace.expand().unwrap(), raw);
    }
}
