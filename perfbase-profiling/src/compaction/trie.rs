// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use super::interner::TokenId;
use crate::records::ValueSeq;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// The token ids of one frame, in subpart order.
pub type SegmentKey = Vec<TokenId>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct NodeId(usize);

impl NodeId {
    const ROOT: NodeId = NodeId(0);
}

#[derive(Debug, Default)]
struct Node {
    /// Absent only on the root.
    segment: Option<SegmentKey>,
    children: Vec<NodeId>,
    value: Option<ValueSeq>,
}

/// A prefix tree over key paths, stored as an arena. Children are referenced
/// by index and are always allocated after their parent, so every child index
/// is strictly greater than its parent's.
#[derive(Debug)]
pub struct Trie {
    nodes: Vec<Node>,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
        }
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Inserts `value` at the end of `path`, creating the missing nodes on the
    /// way down. A node is reused only when its segment key is equal to the
    /// current frame. Inserting the same path twice keeps the last value.
    pub fn insert<I>(&mut self, path: I, value: ValueSeq)
    where
        I: IntoIterator<Item = SegmentKey>,
    {
        let mut current = NodeId::ROOT;
        for segment in path {
            current = match self.find_child(current, &segment) {
                Some(child) => child,
                None => self.push_child(current, segment),
            };
        }
        self.nodes[current.0].value = Some(value);
    }

    fn find_child(&self, parent: NodeId, segment: &[TokenId]) -> Option<NodeId> {
        self.nodes[parent.0]
            .children
            .iter()
            .copied()
            .find(|child| self.nodes[child.0].segment.as_deref() == Some(segment))
    }

    fn push_child(&mut self, parent: NodeId, segment: SegmentKey) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            segment: Some(segment),
            ..Node::default()
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Converts the arena into an owned tree. Nodes are visited from the
    /// highest index down, so each node's children are finished before it.
    pub fn into_tree(self) -> TrieNode {
        let mut built: Vec<Option<TrieNode>> = Vec::with_capacity(self.nodes.len());
        built.resize_with(self.nodes.len(), || None);

        for (index, node) in self.nodes.into_iter().enumerate().rev() {
            let children = node
                .children
                .iter()
                .filter_map(|child| built[child.0].take())
                .collect();
            built[index] = Some(match (node.segment, node.value) {
                (None, _) => TrieNode::Root { children },
                (Some(segment_key), None) => TrieNode::Branch {
                    segment_key,
                    children,
                },
                (Some(segment_key), Some(value)) => TrieNode::Leaf {
                    segment_key,
                    children,
                    value,
                },
            });
        }

        built
            .first_mut()
            .and_then(Option::take)
            .unwrap_or(TrieNode::Root {
                children: Vec::new(),
            })
    }
}

/// Owned view of a compacted trie.
///
/// On the wire a node is an object with `c` (children, always present), `k`
/// (segment key, absent on the root) and `v` (value, leaves only).
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "WireNode")]
pub enum TrieNode {
    Root {
        children: Vec<TrieNode>,
    },
    Branch {
        segment_key: SegmentKey,
        children: Vec<TrieNode>,
    },
    /// A key path ends here. A leaf can still have children when another key
    /// extends this one by more frames.
    Leaf {
        segment_key: SegmentKey,
        children: Vec<TrieNode>,
        value: ValueSeq,
    },
}

impl TrieNode {
    pub fn children(&self) -> &[TrieNode] {
        match self {
            TrieNode::Root { children }
            | TrieNode::Branch { children, .. }
            | TrieNode::Leaf { children, .. } => children,
        }
    }

    pub fn segment_key(&self) -> Option<&[TokenId]> {
        match self {
            TrieNode::Root { .. } => None,
            TrieNode::Branch { segment_key, .. } | TrieNode::Leaf { segment_key, .. } => {
                Some(segment_key)
            }
        }
    }

    pub fn value(&self) -> Option<&ValueSeq> {
        match self {
            TrieNode::Leaf { value, .. } => Some(value),
            _ => None,
        }
    }
}

impl Serialize for TrieNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = match self {
            TrieNode::Root { .. } => 1,
            TrieNode::Branch { .. } => 2,
            TrieNode::Leaf { .. } => 3,
        };
        let mut map = serializer.serialize_map(Some(len))?;
        if let Some(segment_key) = self.segment_key() {
            map.serialize_entry("k", segment_key)?;
        }
        map.serialize_entry("c", self.children())?;
        if let Some(value) = self.value() {
            map.serialize_entry("v", value)?;
        }
        map.end()
    }
}

#[derive(Deserialize)]
struct WireNode {
    k: Option<SegmentKey>,
    #[serde(default)]
    c: Vec<TrieNode>,
    v: Option<ValueSeq>,
}

impl From<WireNode> for TrieNode {
    fn from(node: WireNode) -> Self {
        match (node.k, node.v) {
            (None, _) => TrieNode::Root { children: node.c },
            (Some(segment_key), None) => TrieNode::Branch {
                segment_key,
                children: node.c,
            },
            (Some(segment_key), Some(value)) => TrieNode::Leaf {
                segment_key,
                children: node.c,
                value,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Scalar;

    fn key(ids: &[u32]) -> SegmentKey {
        ids.iter().copied().map(TokenId::new).collect()
    }

    #[test]
    fn empty_trie_is_a_bare_root() {
        let trie = Trie::new();
        assert!(trie.is_empty());
        assert_eq!(
            trie.into_tree(),
            TrieNode::Root {
                children: Vec::new()
            }
        );
    }

    #[test]
    fn shared_prefix_reuses_nodes() {
        let mut trie = Trie::new();
        trie.insert([key(&[0, 1]), key(&[0, 2])], vec![Scalar::Int(1)]);
        trie.insert([key(&[0, 1]), key(&[0, 3])], vec![Scalar::Int(2)]);
        // root, [0,1], [0,2], [0,3]
        assert_eq!(trie.len(), 4);

        let root = trie.into_tree();
        assert_eq!(root.children().len(), 1);
        let shared = &root.children()[0];
        assert_eq!(shared.segment_key(), Some(key(&[0, 1]).as_slice()));
        assert!(shared.value().is_none());
        assert_eq!(shared.children().len(), 2);
        assert_eq!(shared.children()[0].value(), Some(&vec![Scalar::Int(1)]));
        assert_eq!(shared.children()[1].value(), Some(&vec![Scalar::Int(2)]));
    }

    #[test]
    fn segment_keys_must_match_exactly() {
        let mut trie = Trie::new();
        trie.insert([key(&[0, 1])], vec![]);
        trie.insert([key(&[0])], vec![]);
        trie.insert([key(&[1, 0])], vec![]);
        assert_eq!(trie.into_tree().children().len(), 3);
    }

    #[test]
    fn last_write_wins() {
        let mut trie = Trie::new();
        trie.insert([key(&[0])], vec![Scalar::Int(1)]);
        trie.insert([key(&[0])], vec![Scalar::Int(2)]);
        assert_eq!(trie.len(), 2);

        let root = trie.into_tree();
        assert_eq!(root.children()[0].value(), Some(&vec![Scalar::Int(2)]));
    }

    #[test]
    fn leaf_may_have_children() {
        let mut trie = Trie::new();
        trie.insert([key(&[0])], vec![Scalar::Int(1)]);
        trie.insert([key(&[0]), key(&[1])], vec![Scalar::Int(2)]);

        let root = trie.into_tree();
        let outer = &root.children()[0];
        assert!(matches!(outer, TrieNode::Leaf { .. }));
        assert_eq!(outer.children().len(), 1);
    }

    #[test]
    fn wire_shape() {
        let mut trie = Trie::new();
        trie.insert([key(&[0, 1]), key(&[0, 2])], vec![Scalar::Int(1), Scalar::Int(2)]);
        let root = trie.into_tree();

        let json = serde_json::to_string(&root).unwrap();
        assert_eq!(
            json,
            r#"{"c":[{"k":[0,1],"c":[{"k":[0,2],"c":[],"v":[1,2]}]}]}"#
        );

        let back: TrieNode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, root);
    }

    #[test]
    fn deep_paths_do_not_recurse_while_building() {
        let mut trie = Trie::new();
        let depth = 1_000;
        trie.insert((0..depth).map(|i| key(&[i])), vec![Scalar::Null]);
        assert_eq!(trie.len(), depth as usize + 1);

        let mut node = &trie.into_tree();
        let mut seen = 0;
        while let Some(child) = node.children().first() {
            node = child;
            seen += 1;
        }
        assert_eq!(seen, depth);
        assert_eq!(node.value(), Some(&vec![Scalar::Null]));
    }
}
