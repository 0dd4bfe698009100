// Copyright (c) 2026-present, dialplan-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! A mutable database of phone-number forwardings.
//!
//! ##### About
//!
//! This crate exports a [`ForwardingTable`] that maps dialed prefixes to
//! other prefixes and answers two queries over them:
//!
//! - **forward**: rewrite a number by its deepest active forwarding, taking
//!   the longest matching source prefix
//! - **reverse**: enumerate every number the forward query could rewrite
//!   into the given one
//!
//! Numbers are strings over a 12-symbol alphabet: the decimal digits plus
//! `'*'` and `'#'`, which sort *after* `'9'` wherever results are ordered.
//!
//! Internally the table is a digit trie with one logical timestamp per
//! mutation. Removing a whole prefix subtree stamps a single node instead of
//! walking the subtree, so bulk invalidation costs O(|prefix|); forward and
//! reverse lookups check candidate forwardings against the stamps of their
//! ancestors. Reverse lookups are served by per-node back-edge queues which
//! are garbage-collected lazily as queries walk over them.
//!
//! The table is single-threaded; callers needing shared access must
//! serialise externally. Distinct tables are fully independent.
//!
//! # Example usage
//!
//! ```
//! use dialplan::ForwardingTable;
//!
//! let mut table = ForwardingTable::new();
//!
//! // Forward every number starting with 12 to 34...
//! table.add("12", "34")?;
//! assert_eq!(Some("3434"), table.forward("1234").get(0));
//!
//! // ...then retire everything under prefix 1
//! table.remove("1");
//! assert_eq!(Some("1234"), table.forward("1234").get(0));
//!
//! // Later forwardings apply again
//! table.add("12", "56")?;
//! assert_eq!(Some("5634"), table.forward("1234").get(0));
//!
//! // Which numbers could rewrite to 5634?
//! let sources = table.reverse("5634");
//! assert_eq!(vec!["1234", "5634"], sources.iter().collect::<Vec<_>>());
//! #
//! # Ok::<(), dialplan::Error>(())
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::all, missing_docs, clippy::cargo)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::indexing_slicing)]
#![warn(clippy::pedantic, clippy::nursery)]
#![warn(clippy::expect_used)]
#![allow(clippy::missing_const_for_fn)]
#![warn(clippy::multiple_crate_versions)]

mod clock;
mod digit;
mod error;
pub mod number;
mod numbers;
mod table;
mod trie;

pub use {
    clock::Timestamp,
    digit::{Digit, ALPHABET_LEN},
    error::{Error, Result},
    numbers::PhoneNumbers,
    table::ForwardingTable,
};
