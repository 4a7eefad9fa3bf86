// Copyright 2025 the Parterre Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public result and operand types for the region engine.

use parterre_geom::RectInt;

use crate::region::Region;

/// Three-valued result of testing a rectangle against a region.
///
/// This is deliberately its own type rather than a boolean: callers depend
/// on [`Overlap::Part`] being distinct from both full containment and full
/// disjointness, and collapsing it loses information they need.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Overlap {
    /// The rectangle lies entirely inside the region.
    In,
    /// The rectangle lies entirely outside the region.
    Out,
    /// The rectangle overlaps the region only partially.
    Part,
}

/// Second operand of the boolean combinators.
///
/// [`Region::intersect`], [`Region::subtract`], [`Region::union`], and
/// [`Region::xor`] each accept a whole region or a single rectangle through
/// the same entry point. The conversions below let call sites pass
/// `&Region`, [`RectInt`], or `&RectInt` directly; a degenerate rectangle
/// behaves as the empty region.
#[derive(Copy, Clone, Debug)]
pub enum Operand<'a> {
    /// Combine with another region.
    Region(&'a Region),
    /// Combine with a single rectangle.
    Rect(RectInt),
}

impl<'a> From<&'a Region> for Operand<'a> {
    fn from(region: &'a Region) -> Self {
        Self::Region(region)
    }
}

impl From<RectInt> for Operand<'_> {
    fn from(rect: RectInt) -> Self {
        Self::Rect(rect)
    }
}

impl From<&RectInt> for Operand<'_> {
    fn from(rect: &RectInt) -> Self {
        Self::Rect(*rect)
    }
}
