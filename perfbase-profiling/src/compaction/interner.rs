// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::hash::BuildHasherDefault;

type FxIndexSet<K> = indexmap::IndexSet<K, BuildHasherDefault<rustc_hash::FxHasher>>;

/// Identifier of an interned token. Ids are dense and assigned in first-seen
/// order starting at 0, so an id doubles as an index into the glossary.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(u32);

impl TokenId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn to_raw_id(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn to_offset(self) -> usize {
        self.0 as usize
    }

    fn from_offset(offset: usize) -> Self {
        // A trace with more than u32::MAX distinct tokens would not fit in a
        // single submission anyway.
        #[allow(clippy::cast_possible_truncation)]
        Self(offset as u32)
    }
}

/// Deduplicates tokens into [TokenId]s. One interner serves exactly one
/// compaction pass; it has no removal operation.
#[derive(Debug, Default)]
pub struct Interner {
    tokens: FxIndexSet<String>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id of `token`, assigning the next sequential id if it has
    /// not been seen before.
    pub fn intern(&mut self, token: &str) -> TokenId {
        match self.tokens.get_index_of(token) {
            Some(offset) => TokenId::from_offset(offset),
            None => {
                let (offset, _) = self.tokens.insert_full(token.to_owned());
                TokenId::from_offset(offset)
            }
        }
    }

    pub fn get(&self, id: TokenId) -> Option<&str> {
        self.tokens.get_index(id.to_offset()).map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Consumes the interner, returning the tokens indexed by id.
    pub fn into_glossary(self) -> Vec<String> {
        self.tokens.into_iter().collect()
    }
}
