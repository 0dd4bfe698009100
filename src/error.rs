// Copyright (c) 2026-present, dialplan-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

/// Represents errors that can occur in the forwarding table
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// Input string is not a phone number over the dial alphabet
    ///
    /// A phone number is a non-empty string of `'0'..='9'`, `'*'` and `'#'`.
    InvalidNumber,

    /// Source and destination of a forwarding are the same number
    SameNumber,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DialplanError: {self:?}")
    }
}

impl std::error::Error for Error {}

/// Table result
pub type Result<T> = std::result::Result<T, Error>;
