// Copyright 2025 the Parterre Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=parterre_region --heading-base-level=0

//! Parterre Region: a canonical banded region engine over integer rectangles.
//!
//! A [`Region`] is a set of points on the integer plane — an arbitrary
//! rectilinear area — stored as the canonical minimal list of non-overlapping
//! axis-aligned rectangles. It is the data structure behind damage tracking,
//! clip management, and window-shape bookkeeping in 2D graphics stacks.
//!
//! - Construct a region empty, from one [`RectInt`], or from a list of
//!   rectangles that may overlap arbitrarily.
//! - Combine regions in place with [`Region::union`], [`Region::intersect`],
//!   [`Region::subtract`], and [`Region::xor`]; each accepts another region
//!   or a single rectangle through the same entry point (see [`Operand`]).
//! - Query point and rectangle containment ([`Region::contains_point`],
//!   [`Region::contains_rectangle`] with its three-valued [`Overlap`]
//!   result), enumerate the canonical rectangles, and take extents.
//! - Translate in place with [`Region::translate`].
//!
//! Every operation leaves the rectangle list canonical: no two rectangles
//! overlap, rows of identical horizontal coverage are merged vertically, and
//! touching rectangles within a row are merged horizontally. Equality of
//! regions is equality of canonical lists, so two regions describing the
//! same area compare equal no matter how they were built.
//!
//! Internal failure (allocation failure while rebuilding the list) moves a
//! region into a permanent failed state: every further fallible operation
//! reports [`RegionError`] instead of attempting work. See [`Region`] for
//! the exact semantics.
//!
//! # Example
//!
//! ```rust
//! use parterre_region::{Overlap, RectInt, Region};
//!
//! // Accumulate damage, then knock out a clip.
//! let mut damage = Region::from_rect(RectInt::new(0, 0, 10, 10));
//! damage.union(RectInt::new(5, 5, 10, 10))?;
//! damage.subtract(RectInt::new(0, 0, 3, 3))?;
//!
//! assert_eq!(damage.extents(), RectInt::new(0, 0, 15, 15));
//! assert_eq!(
//!     damage.contains_rectangle(RectInt::new(6, 6, 2, 2)),
//!     Overlap::In
//! );
//! assert_eq!(
//!     damage.contains_rectangle(RectInt::new(1, 1, 4, 4)),
//!     Overlap::Part
//! );
//!
//! // The canonical decomposition is observable rectangle by rectangle.
//! for i in 0..damage.num_rectangles() {
//!     let tile = damage.rectangle(i as isize)?;
//!     assert!(!tile.is_empty());
//! }
//! # Ok::<(), Box<dyn core::error::Error>>(())
//! ```
//!
//! The engine is single-threaded by design: operations are bounded,
//! synchronous computations over the one region being mutated and a
//! read-only operand, with no interior mutability. A `Region` can move
//! between threads; concurrent mutation of one region is ruled out by the
//! ownership rules.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod boxes;
mod error;
mod ops;
mod region;
mod types;

pub use error::{IndexError, RegionError};
pub use parterre_geom::RectInt;
pub use region::Region;
pub use types::{Operand, Overlap};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_combine_and_query() {
        let mut region = Region::from_rects(&[
            RectInt::new(0, 0, 10, 10),
            RectInt::new(5, 5, 10, 10),
        ])
        .unwrap();
        assert_eq!(region.extents(), RectInt::new(0, 0, 15, 15));

        region.subtract(RectInt::new(0, 0, 15, 2)).unwrap();
        assert!(!region.contains_point(1, 1));
        assert!(region.contains_point(1, 3));
        assert_eq!(
            region.contains_rectangle(RectInt::new(6, 6, 3, 3)),
            Overlap::In
        );
    }

    #[test]
    fn operand_conversions() {
        let other = Region::from_rect(RectInt::new(0, 0, 4, 4));
        let from_region: Operand<'_> = (&other).into();
        assert!(matches!(from_region, Operand::Region(_)));

        let r = RectInt::new(1, 2, 3, 4);
        assert!(matches!(Operand::from(r), Operand::Rect(got) if got == r));
        assert!(matches!(Operand::from(&r), Operand::Rect(got) if got == r));
    }
}
