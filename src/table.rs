// Copyright (c) 2026-present, dialplan-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::clock::{LogicalClock, Timestamp};
use crate::digit::Digit;
use crate::number;
use crate::numbers::PhoneNumbers;
use crate::trie::{BackEdge, NodeId, Trie};
use crate::{Error, Result};
use std::collections::VecDeque;

/// Mutable database of phone-number forwardings
///
/// A forwarding is a directed mapping from one dialed prefix to another.
/// [`ForwardingTable::forward`] applies the most recent still-active
/// forwarding whose source is a prefix of the queried number,
/// [`ForwardingTable::reverse`] enumerates all numbers the query could be a
/// rewrite of.
///
/// Bulk invalidation by prefix ([`ForwardingTable::remove`]) is realised
/// lazily: it stamps a logical timestamp on a single trie node instead of
/// walking the subtree. Lookups compare that stamp against the installation
/// time of each candidate forwarding, so invalidation is O(|prefix|) while
/// queries stay linear in the query length.
///
/// # Examples
///
/// ```
/// use dialplan::ForwardingTable;
///
/// let mut table = ForwardingTable::new();
/// table.add("12", "34")?;
/// table.add("123", "5")?;
///
/// // the longest matching prefix with an active forwarding wins
/// assert_eq!(Some("54"), table.forward("1234").get(0));
///
/// table.remove("1");
/// assert_eq!(Some("1234"), table.forward("1234").get(0));
/// #
/// # Ok::<(), dialplan::Error>(())
/// ```
pub struct ForwardingTable {
    trie: Trie,
    clock: LogicalClock,
}

impl Default for ForwardingTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ForwardingTable {
    /// Creates an empty forwarding table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            trie: Trie::new(),
            clock: LogicalClock::default(),
        }
    }

    /// Installs the forwarding `src` → `dst`, overwriting any forwarding
    /// previously installed on `src`.
    ///
    /// The overwritten forwarding's back-edge is not removed eagerly; it goes
    /// stale and is dropped by the next reverse lookup that walks over the
    /// old target.
    ///
    /// # Errors
    ///
    /// Will return `Err` if either argument is not a valid phone number,
    /// or if both are the same number.
    pub fn add(&mut self, src: &str, dst: &str) -> Result<()> {
        let src_digits = number::parse(src).ok_or(Error::InvalidNumber)?;
        let dst_digits = number::parse(dst).ok_or(Error::InvalidNumber)?;

        if src == dst {
            return Err(Error::SameNumber);
        }

        let src_node = self.trie.find_or_insert(&src_digits);
        let dst_node = self.trie.find_or_insert(&dst_digits);

        let time = self.clock.next();
        log::trace!("add: installing {src} -> {dst} at t={time}");

        let node = self.trie.node_mut(src_node);
        node.fwd_target = Some(dst_node);
        node.fwd_time = time;

        self.trie
            .node_mut(dst_node)
            .back_edges
            .push_back(BackEdge {
                source: src_node,
                time,
            });

        Ok(())
    }

    /// Invalidates every forwarding whose source starts with `prefix`.
    ///
    /// Only forwardings installed before this call cease to apply; later
    /// adds below `prefix` take effect normally. Nothing is deleted
    /// physically, the subtree is shadowed by a timestamp on its root.
    ///
    /// Invalid input is a silent no-op.
    pub fn remove(&mut self, prefix: &str) {
        let Some(digits) = number::parse(prefix) else {
            return;
        };

        let node = self.trie.find_or_insert(&digits);

        let time = self.clock.next();
        log::trace!("remove: shadowing subtree of {prefix} at t={time}");

        self.trie.node_mut(node).delete_time = time;
    }

    /// Applies the deepest active forwarding whose source is a prefix of
    /// `num`.
    ///
    /// Returns a sequence of exactly one number: the rewritten number, or
    /// `num` itself if no forwarding applies. An invalid `num` yields an
    /// empty sequence.
    #[must_use]
    pub fn forward(&self, num: &str) -> PhoneNumbers {
        let mut result = PhoneNumbers::new();

        let Some(digits) = number::parse(num) else {
            return result;
        };

        if let Some(id) = self.deepest_active_forwarding(&digits) {
            let node = self.trie.node(id);
            let target = node
                .fwd_target
                .expect("candidate should carry a forwarding");

            let mut rewritten = self.trie.prefix_of(target);
            rewritten.push_str(num.get(node.depth..).unwrap_or_default());

            result.push_unchecked(rewritten);
        } else {
            result.push_unchecked(num.to_owned());
        }

        result
    }

    /// Enumerates every number whose [`ForwardingTable::forward`] result
    /// could be `num`, plus `num` itself.
    ///
    /// The result is sorted under the extended order and deduplicated. An
    /// invalid `num` yields an empty sequence.
    ///
    /// Needs `&mut self` because stale back-edges found along the way are
    /// dropped.
    pub fn reverse(&mut self, num: &str) -> PhoneNumbers {
        let mut result = PhoneNumbers::new();

        let Some(digits) = number::parse(num) else {
            return result;
        };

        result.push_unchecked(num.to_owned());

        let mut current = self.trie.root();
        for (pos, &digit) in digits.iter().enumerate() {
            let Some(next) = self.trie.node(current).child(digit) else {
                break;
            };
            current = next;

            // `current` now represents num[..=pos]
            self.collect_sources(current, num, pos + 1, &mut result);
        }

        result.sort();
        result.dedup();

        result
    }

    /// Returns the current logical time.
    ///
    /// Advances by one on every add and every remove.
    #[must_use]
    pub fn logical_time(&self) -> Timestamp {
        self.clock.get()
    }

    /// Returns the number of materialised trie nodes, the root included.
    ///
    /// Prefix paths are materialised by adds *and* removes and never freed
    /// before the table is dropped, so this count only ever grows.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.trie.node_count()
    }

    /// Finds the deepest node on the path of `digits` holding a forwarding
    /// that outlives every bulk invalidation on its own root path.
    fn deepest_active_forwarding(&self, digits: &[Digit]) -> Option<NodeId> {
        let mut best = None;
        let mut max_delete_time = 0;

        let mut current = self.trie.root();
        let mut pos = 0;

        loop {
            let node = self.trie.node(current);
            max_delete_time = max_delete_time.max(node.delete_time);

            if node.fwd_target.is_some() && node.fwd_time > max_delete_time {
                best = Some(current);
            }

            let Some(&digit) = digits.get(pos) else {
                break;
            };
            let Some(next) = node.child(digit) else {
                break;
            };

            current = next;
            pos += 1;
        }

        best
    }

    /// Drains the back-edges of `target`, appending one candidate pre-image
    /// per live edge to `result` and dropping dead edges for good.
    ///
    /// `matched` is the length of the prefix of `num` that `target`
    /// represents.
    fn collect_sources(
        &mut self,
        target: NodeId,
        num: &str,
        matched: usize,
        result: &mut PhoneNumbers,
    ) {
        let edges = std::mem::take(&mut self.trie.node_mut(target).back_edges);
        let mut retained = VecDeque::with_capacity(edges.len());

        for edge in edges {
            if !self.is_live(edge) {
                log::trace!("reverse: dropping stale back-edge at t={}", edge.time);
                continue;
            }

            let mut candidate = self.trie.prefix_of(edge.source);
            candidate.push_str(num.get(matched..).unwrap_or_default());
            result.push_unchecked(candidate);

            retained.push_back(edge);
        }

        self.trie.node_mut(target).back_edges = retained;
    }

    /// A back-edge is live while its forwarding has not been overwritten and
    /// no bulk invalidation covering the source happened after installation.
    fn is_live(&self, edge: BackEdge) -> bool {
        if self.trie.node(edge.source).fwd_time != edge.time {
            return false;
        }

        self.trie.max_delete_time_to_root(edge.source) <= edge.time
    }
}
