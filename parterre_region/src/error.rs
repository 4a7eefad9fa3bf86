// Copyright 2025 the Parterre Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types surfaced at the engine boundary.
//!
//! The display strings are stable contracts: host-environment adapters show
//! them directly, so changing them is a breaking change.

use core::error::Error;
use core::fmt;

/// Failure reported by fallible region operations.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RegionError {
    /// The region is in the failed state. Entering that state is permanent:
    /// every further fallible operation reports this error without
    /// attempting any work.
    Invalid,
    /// Allocation failed while building rectangle storage. When this comes
    /// out of a mutating combinator, the destination region has moved to the
    /// failed state.
    OutOfMemory,
}

impl fmt::Display for RegionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid => f.write_str("region is in an error state"),
            Self::OutOfMemory => f.write_str("out of memory"),
        }
    }
}

impl Error for RegionError {}

/// Out-of-range index passed to [`Region::rectangle`](crate::Region::rectangle).
///
/// The two cases carry distinct messages so callers can tell a negative
/// index from one past the end.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IndexError {
    /// The index was negative.
    Negative,
    /// The index was at or past the number of rectangles.
    TooBig,
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negative => f.write_str("index must be a positive number"),
            Self::TooBig => f.write_str("index is too big for the region"),
        }
    }
}

impl Error for IndexError {}
