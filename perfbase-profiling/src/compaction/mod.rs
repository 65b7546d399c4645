// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Call-path compaction.
//!
//! Profiler keys such as `App\Http\Kernel::handle~App\Http\Controller::index`
//! repeat the same callers over and over. [compact] splits every key into
//! frames (on `~`) and every frame into tokens (on `::`), interns the tokens
//! and stores the key paths in a prefix trie, so that each shared prefix and
//! each token is written once before the payload is gzipped.

mod interner;
mod trie;

pub use interner::{Interner, TokenId};
pub use trie::{SegmentKey, Trie, TrieNode};

use crate::records::{RawRecords, FRAME_SEPARATOR, SUBPART_SEPARATOR};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};

/// Name the collector uses to pick the decompressor for `perf_data`.
pub const COMPRESSOR_NAME: &str = "trie";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CompactionError {
    #[error("token id {0} is not in the glossary")]
    UnknownToken(u32),
    #[error("unsupported compressor {0:?}, expected \"trie\"")]
    UnknownCompressor(String),
}

/// The output of [compact]: the glossary (`glossary[id]` is the token) and
/// the root of the trie.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "WireTrace")]
pub struct CompactedTrace {
    pub glossary: Vec<String>,
    pub root: TrieNode,
}

/// Compacts `raw` into a glossary and a trie. Keys are processed in the
/// map's iteration order, which fixes both the token ids and the order of
/// children in the trie.
pub fn compact(raw: &RawRecords) -> CompactedTrace {
    let mut interner = Interner::new();
    let mut trie = Trie::new();

    for (key, value) in raw {
        let path: Vec<SegmentKey> = key
            .split(FRAME_SEPARATOR)
            .map(|frame| {
                frame
                    .split(SUBPART_SEPARATOR)
                    .map(|token| interner.intern(token))
                    .collect()
            })
            .collect();
        trie.insert(path, value.clone());
    }

    CompactedTrace {
        glossary: interner.into_glossary(),
        root: trie.into_tree(),
    }
}

impl CompactedTrace {
    /// Rebuilds the raw records by walking every leaf and joining its path
    /// back together. The order of the returned map follows a depth-first
    /// walk of the trie, not the insertion order of the input.
    pub fn expand(&self) -> Result<RawRecords, CompactionError> {
        let mut records = RawRecords::new();
        // (node, frames leading to it)
        let mut stack: Vec<(&TrieNode, Vec<String>)> = vec![(&self.root, Vec::new())];

        while let Some((node, mut frames)) = stack.pop() {
            if let Some(segment_key) = node.segment_key() {
                frames.push(self.frame(segment_key)?);
            }
            if let Some(value) = node.value() {
                records.insert(frames.join(FRAME_SEPARATOR), value.clone());
            }
            for child in node.children().iter().rev() {
                stack.push((child, frames.clone()));
            }
        }

        Ok(records)
    }

    fn frame(&self, segment_key: &[TokenId]) -> Result<String, CompactionError> {
        let tokens = segment_key
            .iter()
            .map(|id| {
                self.glossary
                    .get(id.to_offset())
                    .map(String::as_str)
                    .ok_or(CompactionError::UnknownToken(id.to_raw_id()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tokens.join(SUBPART_SEPARATOR))
    }
}

#[derive(Serialize, Deserialize)]
struct TraceData<G, M> {
    glossary: G,
    map: M,
}

impl Serialize for CompactedTrace {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("CompactedTrace", 2)?;
        s.serialize_field("compressor", COMPRESSOR_NAME)?;
        s.serialize_field(
            "data",
            &TraceData {
                glossary: &self.glossary,
                map: &self.root,
            },
        )?;
        s.end()
    }
}

#[derive(Deserialize)]
struct WireTrace {
    compressor: String,
    data: TraceData<Vec<String>, TrieNode>,
}

impl TryFrom<WireTrace> for CompactedTrace {
    type Error = CompactionError;

    fn try_from(wire: WireTrace) -> Result<Self, Self::Error> {
        if wire.compressor != COMPRESSOR_NAME {
            return Err(CompactionError::UnknownCompressor(wire.compressor));
        }
        Ok(CompactedTrace {
            glossary: wire.data.glossary,
            root: wire.data.map,
        })
    }
}
