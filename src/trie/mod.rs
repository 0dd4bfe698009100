// Copyright (c) 2026-present, dialplan-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Arena-backed digit trie
//!
//! All nodes live in one index-keyed vector; parent, child and forwarding
//! references are arena indices, so the cyclic reference graph (parent
//! pointers, forwarding targets, back-edges) carries no lifetime coupling.
//! Nodes are only ever appended, never removed, which keeps every held
//! `NodeId` valid for the lifetime of the trie.

mod node;

pub(crate) use node::{BackEdge, Node};

use crate::clock::Timestamp;
use crate::digit::Digit;

/// Index of a node in the trie arena
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct NodeId(u32);

/// Digit trie storing one node per materialised prefix
pub(crate) struct Trie {
    nodes: Vec<Node>,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    /// Creates a trie holding just the root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(None, None, 0)],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        self.nodes.get(id.0 as usize).expect("node should exist")
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes
            .get_mut(id.0 as usize)
            .expect("node should exist")
    }

    /// Returns the number of nodes, the root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn push_node(&mut self, node: Node) -> NodeId {
        let id = u32::try_from(self.nodes.len()).expect("trie arena should not overflow u32");
        self.nodes.push(node);
        NodeId(id)
    }

    /// Walks `digits` from the root, materialising missing nodes along the
    /// way, and returns the terminal node.
    pub fn find_or_insert(&mut self, digits: &[Digit]) -> NodeId {
        let mut current = self.root();

        for &digit in digits {
            current = match self.node(current).child(digit) {
                Some(next) => next,
                None => {
                    let depth = self.node(current).depth + 1;
                    let id = self.push_node(Node::new(Some(current), Some(digit), depth));
                    self.node_mut(current).set_child(digit, id);
                    id
                }
            };
        }

        current
    }

    /// Assembles the prefix a node represents by walking parents bottom-up.
    pub fn prefix_of(&self, id: NodeId) -> String {
        let mut digits = Vec::with_capacity(self.node(id).depth);

        let mut current = Some(id);
        while let Some(node) = current.map(|id| self.node(id)) {
            if let Some(digit) = node.digit {
                digits.push(digit.as_char());
            }
            current = node.parent;
        }

        digits.iter().rev().collect()
    }

    /// Returns the maximum `delete_time` over the path from `id` up to the
    /// root, both ends inclusive.
    pub fn max_delete_time_to_root(&self, id: NodeId) -> Timestamp {
        let mut max = 0;

        let mut current = Some(id);
        while let Some(node) = current.map(|id| self.node(id)) {
            max = max.max(node.delete_time);
            current = node.parent;
        }

        max
    }
}
