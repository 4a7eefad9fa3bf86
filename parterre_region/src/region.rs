// Copyright 2025 the Parterre Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The region type: construction, queries, and mutating combinators.

use parterre_geom::RectInt;

use crate::boxes::{self, BoxInt, BoxStore};
use crate::error::{IndexError, RegionError};
use crate::ops::{self, OpKind};
use crate::types::{Operand, Overlap};

/// Validity state of a region. `Invalid` is permanent.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Status {
    Valid,
    Invalid,
}

/// A set of points on the integer plane, stored as the canonical minimal
/// list of non-overlapping rectangles.
///
/// The rectangle list is kept in band form: rows of identical vertical
/// extent, disjoint and non-touching within a row, with vertically adjacent
/// rows of identical horizontal coverage merged. Every mutating operation
/// re-establishes that form, so [`Region::num_rectangles`] and
/// [`Region::rectangle`] always observe the minimal decomposition.
///
/// A region owns its storage exclusively; queries hand out [`RectInt`]
/// values by copy and nothing exposes a mutable alias into the list.
///
/// ## The failed state
///
/// An internal failure (allocation failure while rebuilding the rectangle
/// list) moves the region into a permanent failed state: the combinators and
/// [`Region::copy`] report [`RegionError`] without attempting work, the
/// read-only queries see the empty region, and equality — including with
/// itself — is always false. Because an invalid region is unequal to itself,
/// `Region` implements [`PartialEq`] but deliberately not [`Eq`].
///
/// # Example
///
/// ```rust
/// use parterre_region::{Overlap, RectInt, Region};
///
/// let mut damage = Region::from_rect(RectInt::new(0, 0, 10, 10));
/// damage.union(RectInt::new(5, 5, 10, 10))?;
///
/// assert_eq!(damage.extents(), RectInt::new(0, 0, 15, 15));
/// assert!(damage.contains_point(12, 7));
/// assert_eq!(
///     damage.contains_rectangle(RectInt::new(0, 0, 4, 4)),
///     Overlap::In
/// );
/// # Ok::<(), parterre_region::RegionError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Region {
    status: Status,
    extents: BoxInt,
    boxes: BoxStore,
}

impl Region {
    /// Create an empty region.
    #[must_use]
    pub fn new() -> Self {
        Self {
            status: Status::Valid,
            extents: BoxInt::ZERO,
            boxes: BoxStore::new(),
        }
    }

    /// Create a region covering a single rectangle.
    ///
    /// A degenerate rectangle yields the empty region. Single-rectangle
    /// storage is inline, so this never allocates.
    #[must_use]
    pub fn from_rect(rect: RectInt) -> Self {
        let mut region = Self::new();
        if let Some(bx) = BoxInt::from_rect(rect) {
            region.boxes.push(bx);
            region.extents = bx;
        }
        region
    }

    /// Build a region from rectangles that may overlap arbitrarily.
    ///
    /// The input is reconciled into canonical form; order and overlap of the
    /// input rectangles do not affect the result. Degenerate rectangles are
    /// ignored. Fails with [`RegionError::OutOfMemory`] if the intermediate
    /// buffer cannot be allocated, in which case no region is produced.
    pub fn from_rects(rects: &[RectInt]) -> Result<Self, RegionError> {
        ops::canonicalize(rects).map(Self::from_boxes)
    }

    fn from_boxes(boxes: BoxStore) -> Self {
        let extents = boxes::compute_extents(&boxes);
        let region = Self {
            status: Status::Valid,
            extents,
            boxes,
        };
        debug_assert!(
            boxes::is_canonical(&region.boxes),
            "region constructed from non-canonical band list"
        );
        region
    }

    /// Deep, independent copy.
    ///
    /// Unlike [`Clone::clone`] this is fallible: it reports
    /// [`RegionError::Invalid`] for a source in the failed state and
    /// [`RegionError::OutOfMemory`] if storage for the copy cannot be
    /// allocated.
    pub fn copy(&self) -> Result<Self, RegionError> {
        if self.status == Status::Invalid {
            return Err(RegionError::Invalid);
        }
        let mut boxes = BoxStore::new();
        boxes
            .try_reserve(self.boxes.len())
            .map_err(|_| RegionError::OutOfMemory)?;
        boxes.extend_from_slice(&self.boxes);
        Ok(Self {
            status: Status::Valid,
            extents: self.extents,
            boxes,
        })
    }

    /// Smallest rectangle enclosing the region; the zero rectangle when
    /// empty.
    #[must_use]
    pub fn extents(&self) -> RectInt {
        self.extents.to_rect()
    }

    /// Number of rectangles in the canonical decomposition.
    #[must_use]
    pub fn num_rectangles(&self) -> usize {
        self.boxes.len()
    }

    /// The rectangle at `index` in the canonical decomposition.
    ///
    /// Index order is stable as long as the region is not mutated, but which
    /// rectangle lives at which index is otherwise an implementation detail.
    /// A negative index and one at or past [`Region::num_rectangles`] fail
    /// with the two distinct [`IndexError`] cases; no other validation is
    /// performed.
    pub fn rectangle(&self, index: isize) -> Result<RectInt, IndexError> {
        let index = usize::try_from(index).map_err(|_| IndexError::Negative)?;
        self.boxes
            .get(index)
            .map(|b| b.to_rect())
            .ok_or(IndexError::TooBig)
    }

    /// Iterate over the canonical rectangles in index order.
    pub fn rectangles(&self) -> impl Iterator<Item = RectInt> + '_ {
        self.boxes.iter().map(|b| b.to_rect())
    }

    /// Whether the region contains no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Whether the point lies inside the region.
    #[must_use]
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        if !self.extents.contains_point(x, y) {
            return false;
        }
        // Skip bands above the point, then scan the one band that can hold it.
        let start = self.boxes.partition_point(|b| b.y2 <= y);
        for b in &self.boxes[start..] {
            if b.y1 > y || x < b.x1 {
                return false;
            }
            if x < b.x2 {
                return true;
            }
        }
        false
    }

    /// Classify a rectangle against the region.
    ///
    /// A degenerate rectangle is entirely outside. The result is
    /// three-valued on purpose; see [`Overlap`].
    #[must_use]
    pub fn contains_rectangle(&self, rect: RectInt) -> Overlap {
        let Some(target) = BoxInt::from_rect(rect) else {
            return Overlap::Out;
        };
        if self.boxes.is_empty() || !self.extents.overlaps(target) {
            return Overlap::Out;
        }

        let mut part_in = false;
        let mut part_out = false;
        // Top of the rows not yet proven covered.
        let mut y = target.y1;
        let mut i = self.boxes.partition_point(|b| b.y2 <= target.y1);
        while i < self.boxes.len() && self.boxes[i].y1 < target.y2 {
            let end = boxes::band_end(&self.boxes, i);
            let band = &self.boxes[i..end];
            if band[0].y1 > y {
                // Rows between bands are uncovered.
                part_out = true;
            }
            let mut x = target.x1;
            for b in band {
                if b.x2 <= x {
                    continue;
                }
                if b.x1 >= target.x2 {
                    break;
                }
                if b.x1 > x {
                    // Gap inside the row.
                    part_out = true;
                }
                part_in = true;
                x = b.x2.min(target.x2);
            }
            if x < target.x2 {
                part_out = true;
            }
            if part_in && part_out {
                return Overlap::Part;
            }
            y = band[0].y2;
            i = end;
        }
        if y < target.y2 {
            part_out = true;
        }

        match (part_in, part_out) {
            (false, _) => Overlap::Out,
            (true, true) => Overlap::Part,
            (true, false) => Overlap::In,
        }
    }

    /// Shift the whole region by `(dx, dy)` in place.
    ///
    /// Never fails; a no-op on a region in the failed state. Coordinates
    /// saturate at the i32 boundary; rectangles squeezed empty by saturation
    /// are dropped and the remaining rows re-merged, so the canonical form
    /// survives any input.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        if self.status == Status::Invalid {
            return;
        }
        for b in &mut self.boxes {
            b.x1 = b.x1.saturating_add(dx);
            b.y1 = b.y1.saturating_add(dy);
            b.x2 = b.x2.saturating_add(dx);
            b.y2 = b.y2.saturating_add(dy);
        }
        boxes::squash(&mut self.boxes);
        self.extents = boxes::compute_extents(&self.boxes);
        debug_assert!(
            boxes::is_canonical(&self.boxes),
            "translate broke canonical form"
        );
    }

    /// Replace this region with its intersection with `other`.
    pub fn intersect<'a>(&mut self, other: impl Into<Operand<'a>>) -> Result<(), RegionError> {
        self.with_operand(other, |dst, ob, oext| {
            if dst.boxes.is_empty() {
                return Ok(());
            }
            if ob.is_empty() || !dst.extents.overlaps(oext) {
                dst.clear_to_empty();
                return Ok(());
            }
            if let ([a], [b]) = (dst.boxes.as_slice(), ob) {
                // Overlapping extents make the single-box intersection
                // non-empty, so it can be written directly.
                let bx = BoxInt::new(
                    a.x1.max(b.x1),
                    a.y1.max(b.y1),
                    a.x2.min(b.x2),
                    a.y2.min(b.y2),
                );
                dst.boxes.clear();
                dst.boxes.push(bx);
                dst.extents = bx;
                return Ok(());
            }
            dst.apply(ob, OpKind::Intersect)
        })
    }

    /// Remove the area of `other` from this region.
    pub fn subtract<'a>(&mut self, other: impl Into<Operand<'a>>) -> Result<(), RegionError> {
        self.with_operand(other, |dst, ob, oext| {
            if dst.boxes.is_empty() || ob.is_empty() || !dst.extents.overlaps(oext) {
                return Ok(());
            }
            dst.apply(ob, OpKind::Subtract)
        })
    }

    /// Replace this region with its union with `other`.
    pub fn union<'a>(&mut self, other: impl Into<Operand<'a>>) -> Result<(), RegionError> {
        self.with_operand(other, |dst, ob, oext| {
            if ob.is_empty() {
                return Ok(());
            }
            if dst.boxes.is_empty() {
                return dst.assign_boxes(ob);
            }
            // A single box swallowing the other operand's extents decides it.
            if let [only] = dst.boxes.as_slice()
                && only.contains_box(oext)
            {
                return Ok(());
            }
            if let [only] = ob
                && only.contains_box(dst.extents)
            {
                return dst.assign_boxes(ob);
            }
            dst.apply(ob, OpKind::Union)
        })
    }

    /// Replace this region with its symmetric difference with `other`:
    /// the union minus the intersection, computed as `(a \ b) ∪ (b \ a)`.
    pub fn xor<'a>(&mut self, other: impl Into<Operand<'a>>) -> Result<(), RegionError> {
        self.with_operand(other, |dst, ob, _oext| {
            if ob.is_empty() {
                return Ok(());
            }
            if dst.boxes.is_empty() {
                return dst.assign_boxes(ob);
            }
            let result = ops::op(&dst.boxes, ob, OpKind::Subtract).and_then(|forward| {
                let backward = ops::op(ob, &dst.boxes, OpKind::Subtract)?;
                ops::op(&forward, &backward, OpKind::Union)
            });
            match result {
                Ok(boxes) => {
                    dst.set_boxes(boxes);
                    Ok(())
                }
                Err(err) => {
                    dst.mark_invalid();
                    Err(err)
                }
            }
        })
    }

    /// Check statuses, lower the operand to a band list plus extents, and
    /// run the operator body.
    fn with_operand<'a>(
        &mut self,
        other: impl Into<Operand<'a>>,
        body: impl FnOnce(&mut Self, &[BoxInt], BoxInt) -> Result<(), RegionError>,
    ) -> Result<(), RegionError> {
        let operand = other.into();
        if self.status == Status::Invalid {
            return Err(RegionError::Invalid);
        }
        if let Operand::Region(r) = operand
            && r.status == Status::Invalid
        {
            // Broken-ness propagates to the destination.
            self.mark_invalid();
            return Err(RegionError::Invalid);
        }
        let tmp;
        let (ob, oext) = match operand {
            Operand::Region(r) => (r.boxes.as_slice(), r.extents),
            Operand::Rect(rect) => {
                tmp = Self::from_rect(rect);
                (tmp.boxes.as_slice(), tmp.extents)
            }
        };
        body(self, ob, oext)
    }

    /// Run the band sweep against `other` and install the result.
    fn apply(&mut self, other: &[BoxInt], kind: OpKind) -> Result<(), RegionError> {
        match ops::op(&self.boxes, other, kind) {
            Ok(boxes) => {
                self.set_boxes(boxes);
                Ok(())
            }
            Err(err) => {
                self.mark_invalid();
                Err(err)
            }
        }
    }

    /// Replace contents with a copy of `src`.
    fn assign_boxes(&mut self, src: &[BoxInt]) -> Result<(), RegionError> {
        let mut boxes = BoxStore::new();
        if boxes.try_reserve(src.len()).is_err() {
            self.mark_invalid();
            return Err(RegionError::OutOfMemory);
        }
        boxes.extend_from_slice(src);
        self.set_boxes(boxes);
        Ok(())
    }

    fn set_boxes(&mut self, boxes: BoxStore) {
        self.extents = boxes::compute_extents(&boxes);
        self.boxes = boxes;
        debug_assert!(
            boxes::is_canonical(&self.boxes),
            "combinator published a non-canonical band list"
        );
    }

    fn clear_to_empty(&mut self) {
        self.boxes.clear();
        self.extents = BoxInt::ZERO;
    }

    /// Enter the permanent failed state. The box list is cleared so the
    /// infallible queries observe the empty region.
    fn mark_invalid(&mut self) {
        self.status = Status::Invalid;
        self.boxes = BoxStore::new();
        self.extents = BoxInt::ZERO;
    }

    /// A region already in the failed state, for exercising the sticky
    /// error paths.
    #[cfg(test)]
    pub(crate) fn broken_for_tests() -> Self {
        let mut region = Self::from_rect(RectInt::new(0, 0, 1, 1));
        region.mark_invalid();
        region
    }
}

impl Default for Region {
    fn default() -> Self {
        Self::new()
    }
}

impl From<RectInt> for Region {
    fn from(rect: RectInt) -> Self {
        Self::from_rect(rect)
    }
}

impl PartialEq for Region {
    /// Regions are equal iff their canonical rectangle lists are identical.
    ///
    /// A region in the failed state is unequal to everything, including
    /// itself; this is why `Region` does not implement [`Eq`].
    fn eq(&self, other: &Self) -> bool {
        self.status == Status::Valid
            && other.status == Status::Valid
            && self.extents == other.extents
            && self.boxes == other.boxes
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::boxes::is_canonical;

    fn rect(x: i32, y: i32, w: i32, h: i32) -> RectInt {
        RectInt::new(x, y, w, h)
    }

    #[test]
    fn empty_region() {
        let region = Region::new();
        assert!(region.is_empty());
        assert_eq!(region.num_rectangles(), 0);
        assert_eq!(region.extents(), RectInt::ZERO);
        assert_eq!(region, Region::default());
    }

    #[test]
    fn degenerate_rectangle_yields_empty_region() {
        assert!(Region::from_rect(rect(0, 0, 0, 0)).is_empty());
        assert!(Region::from_rect(rect(3, 3, -2, 5)).is_empty());
        assert!(Region::from_rects(&[rect(1, 1, 0, 7)]).unwrap().is_empty());
    }

    #[test]
    fn single_rectangle_round_trips() {
        let r = rect(-3, 4, 10, 2);
        let region = Region::from_rects(&[r]).unwrap();
        assert_eq!(region.num_rectangles(), 1);
        assert_eq!(region.rectangle(0).unwrap(), r);
        assert_eq!(region.extents(), r);
        assert_eq!(region, Region::from_rect(r));
        assert_eq!(region, Region::from(r));
    }

    #[test]
    fn two_disjoint_unit_rectangles() {
        let region = Region::from_rects(&[rect(0, 0, 1, 1), rect(5, 5, 1, 1)]).unwrap();
        assert_eq!(region.num_rectangles(), 2);
        assert_eq!(region.extents(), rect(0, 0, 6, 6));
        assert!(region.contains_point(0, 0));
        assert!(region.contains_point(5, 5));
        assert!(!region.contains_point(3, 3));
    }

    #[test]
    fn union_rebands_an_l_shape() {
        let mut region = Region::from_rect(rect(0, 0, 10, 10));
        region.union(rect(5, 5, 10, 10)).unwrap();
        assert_eq!(region.extents(), rect(0, 0, 15, 15));
        // The L-shape tiles into three bands, not the two input rectangles.
        assert_eq!(region.num_rectangles(), 3);
        let tiles: Vec<RectInt> = region.rectangles().collect();
        assert_eq!(
            tiles,
            [rect(0, 0, 10, 5), rect(0, 5, 15, 5), rect(5, 10, 10, 5)]
        );
        // Construction from the overlapping inputs reconciles to the same form.
        assert_eq!(
            region,
            Region::from_rects(&[rect(0, 0, 10, 10), rect(5, 5, 10, 10)]).unwrap()
        );
    }

    #[test]
    fn rectangle_index_boundaries() {
        let region = Region::from_rects(&[rect(0, 0, 1, 1), rect(5, 5, 1, 1)]).unwrap();
        assert_eq!(region.rectangle(-1), Err(IndexError::Negative));
        assert_eq!(region.rectangle(2), Err(IndexError::TooBig));
        assert!(region.rectangle(1).is_ok());
        assert_eq!(Region::new().rectangle(0), Err(IndexError::TooBig));
    }

    #[test]
    fn rectangles_iterator_matches_indexing() {
        let region =
            Region::from_rects(&[rect(0, 0, 4, 4), rect(10, 0, 4, 4), rect(2, 9, 4, 4)]).unwrap();
        let collected: Vec<RectInt> = region.rectangles().collect();
        assert_eq!(collected.len(), region.num_rectangles());
        for (i, r) in collected.iter().enumerate() {
            assert_eq!(region.rectangle(i as isize).unwrap(), *r);
        }
    }

    #[test]
    fn copy_is_independent() {
        let original = Region::from_rect(rect(0, 0, 10, 10));
        let mut copy = original.copy().unwrap();
        copy.subtract(rect(0, 0, 5, 10)).unwrap();
        assert_ne!(original, copy);
        assert_eq!(original.extents(), rect(0, 0, 10, 10));
        assert_eq!(copy.extents(), rect(5, 0, 5, 10));
    }

    #[test]
    fn contains_point_respects_exclusive_edges() {
        let region = Region::from_rect(rect(0, 0, 10, 10));
        assert!(region.contains_point(0, 0));
        assert!(region.contains_point(9, 9));
        assert!(!region.contains_point(10, 0));
        assert!(!region.contains_point(0, 10));
        assert!(!region.contains_point(-1, 5));
    }

    #[test]
    fn contains_point_skips_gaps_between_bands() {
        let region = Region::from_rects(&[rect(0, 0, 10, 2), rect(0, 5, 10, 2)]).unwrap();
        assert!(region.contains_point(5, 1));
        assert!(!region.contains_point(5, 3));
        assert!(region.contains_point(5, 6));
    }

    #[test]
    fn contains_rectangle_three_way() {
        let mut region = Region::from_rect(rect(0, 0, 10, 10));
        region.subtract(rect(3, 3, 4, 4)).unwrap();

        assert_eq!(region.contains_rectangle(rect(0, 0, 2, 2)), Overlap::In);
        assert_eq!(region.contains_rectangle(rect(4, 4, 2, 2)), Overlap::Out);
        assert_eq!(region.contains_rectangle(rect(2, 2, 3, 3)), Overlap::Part);
        assert_eq!(region.contains_rectangle(rect(20, 20, 2, 2)), Overlap::Out);
        // Straddling the outer boundary is partial too.
        assert_eq!(region.contains_rectangle(rect(8, 8, 5, 5)), Overlap::Part);
        // A degenerate rectangle is entirely outside.
        assert_eq!(region.contains_rectangle(rect(1, 1, 0, 0)), Overlap::Out);
    }

    #[test]
    fn full_containment_implies_every_point_contained() {
        let region = Region::from_rects(&[rect(0, 0, 8, 4), rect(0, 4, 12, 6)]).unwrap();
        let probe = rect(1, 1, 5, 7);
        assert_eq!(region.contains_rectangle(probe), Overlap::In);
        for x in probe.x..probe.x + probe.width {
            for y in probe.y..probe.y + probe.height {
                assert!(region.contains_point(x, y), "({x}, {y}) must be inside");
            }
        }
    }

    #[test]
    fn union_is_commutative() {
        let a = Region::from_rects(&[rect(0, 0, 6, 6), rect(10, 2, 3, 3)]).unwrap();
        let b = Region::from_rects(&[rect(4, 4, 6, 6), rect(-5, 0, 2, 9)]).unwrap();
        let mut ab = a.copy().unwrap();
        ab.union(&b).unwrap();
        let mut ba = b.copy().unwrap();
        ba.union(&a).unwrap();
        assert_eq!(ab, ba);
        assert!(is_canonical(&ab.boxes));
    }

    #[test]
    fn intersection_absorbs() {
        let a = Region::from_rects(&[rect(0, 0, 10, 10), rect(20, 0, 4, 4)]).unwrap();
        let b = Region::from_rects(&[rect(5, 5, 10, 10)]).unwrap();
        let mut ab = a.copy().unwrap();
        ab.intersect(&b).unwrap();
        let mut lhs = a.copy().unwrap();
        lhs.intersect(&ab).unwrap();
        assert_eq!(lhs, ab);
    }

    #[test]
    fn xor_with_self_is_empty() {
        let a = Region::from_rects(&[rect(0, 0, 10, 10), rect(15, 3, 4, 9)]).unwrap();
        let mut x = a.copy().unwrap();
        x.xor(&a).unwrap();
        assert!(x.is_empty());
    }

    #[test]
    fn subtract_self_is_empty() {
        let a = Region::from_rects(&[rect(0, 0, 10, 10), rect(15, 3, 4, 9)]).unwrap();
        let mut s = a.copy().unwrap();
        s.subtract(&a).unwrap();
        assert!(s.is_empty());
    }

    #[test]
    fn xor_is_union_minus_intersection() {
        let a = Region::from_rect(rect(0, 0, 10, 10));
        let b = Region::from_rect(rect(5, 5, 10, 10));

        let mut x = a.copy().unwrap();
        x.xor(&b).unwrap();

        let mut expected = a.copy().unwrap();
        expected.union(&b).unwrap();
        let mut overlap = a.copy().unwrap();
        overlap.intersect(&b).unwrap();
        expected.subtract(&overlap).unwrap();

        assert_eq!(x, expected);
        assert!(!x.contains_point(7, 7));
        assert!(x.contains_point(2, 2));
        assert!(x.contains_point(12, 12));
        assert!(is_canonical(&x.boxes));
    }

    #[test]
    fn rectangle_operands_dispatch_like_regions() {
        let base = Region::from_rect(rect(0, 0, 10, 10));
        let operand = rect(5, 0, 10, 10);

        let mut via_rect = base.copy().unwrap();
        via_rect.union(operand).unwrap();
        let mut via_region = base.copy().unwrap();
        via_region.union(&Region::from_rect(operand)).unwrap();
        assert_eq!(via_rect, via_region);
        // Touching same-height rectangles merge into one.
        assert_eq!(via_rect.num_rectangles(), 1);
        assert_eq!(via_rect.extents(), rect(0, 0, 15, 10));

        let mut clipped = base.copy().unwrap();
        clipped.intersect(&operand).unwrap();
        assert_eq!(clipped.extents(), rect(5, 0, 5, 10));
    }

    #[test]
    fn degenerate_rectangle_operands_act_as_empty() {
        let base = Region::from_rect(rect(0, 0, 10, 10));
        let degenerate = rect(3, 3, 0, 5);

        let mut unioned = base.copy().unwrap();
        unioned.union(degenerate).unwrap();
        assert_eq!(unioned, base);

        let mut subtracted = base.copy().unwrap();
        subtracted.subtract(degenerate).unwrap();
        assert_eq!(subtracted, base);

        let mut xored = base.copy().unwrap();
        xored.xor(degenerate).unwrap();
        assert_eq!(xored, base);

        let mut intersected = base.copy().unwrap();
        intersected.intersect(degenerate).unwrap();
        assert!(intersected.is_empty());
    }

    #[test]
    fn translate_shifts_every_rectangle() {
        let mut region = Region::from_rects(&[rect(0, 0, 2, 2), rect(5, 5, 2, 2)]).unwrap();
        region.translate(10, -3);
        assert_eq!(region.extents(), rect(10, -3, 7, 7));
        assert_eq!(region.rectangle(0).unwrap(), rect(10, -3, 2, 2));
        assert_eq!(region.rectangle(1).unwrap(), rect(15, 2, 2, 2));
        assert!(is_canonical(&region.boxes));
    }

    #[test]
    fn translate_saturates_instead_of_corrupting() {
        let mut region = Region::from_rects(&[rect(0, 0, 10, 10), rect(0, 20, 10, 10)]).unwrap();
        region.translate(i32::MAX, 0);
        // Everything was pushed off the coordinate range.
        assert!(region.is_empty());
        assert!(is_canonical(&region.boxes));

        let mut partial = Region::from_rect(rect(-5, 0, 10, 1));
        partial.translate(i32::MAX, 0);
        assert!(is_canonical(&partial.boxes));
    }

    #[test]
    fn equality_follows_canonical_form() {
        let a = Region::from_rects(&[rect(0, 0, 10, 5), rect(0, 5, 10, 5)]).unwrap();
        let b = Region::from_rect(rect(0, 0, 10, 10));
        // Same area built two ways collapses to the same canonical list.
        assert_eq!(a, b);
        assert_eq!(a.num_rectangles(), 1);

        let c = Region::from_rect(rect(0, 0, 10, 11));
        assert_ne!(a, c);
        assert_ne!(a, Region::new());
    }

    #[test]
    fn broken_region_reports_errors_and_stays_broken() {
        let mut broken = Region::broken_for_tests();
        assert_eq!(broken.copy(), Err(RegionError::Invalid));
        assert_eq!(
            broken.union(rect(0, 0, 5, 5)),
            Err(RegionError::Invalid)
        );
        assert_eq!(
            broken.intersect(rect(0, 0, 5, 5)),
            Err(RegionError::Invalid)
        );
        assert_eq!(
            broken.subtract(rect(0, 0, 5, 5)),
            Err(RegionError::Invalid)
        );
        assert_eq!(broken.xor(rect(0, 0, 5, 5)), Err(RegionError::Invalid));
        // Still broken after every attempt.
        assert_eq!(broken.copy(), Err(RegionError::Invalid));
    }

    #[test]
    fn broken_region_queries_see_the_empty_region() {
        let mut broken = Region::broken_for_tests();
        assert!(broken.is_empty());
        assert_eq!(broken.num_rectangles(), 0);
        assert_eq!(broken.extents(), RectInt::ZERO);
        assert!(!broken.contains_point(0, 0));
        assert_eq!(broken.contains_rectangle(rect(0, 0, 1, 1)), Overlap::Out);
        assert_eq!(broken.rectangle(0), Err(IndexError::TooBig));
        // Translate never fails; on a broken region it is a no-op rather
        // than an error.
        broken.translate(3, 3);
        assert!(broken.is_empty());
    }

    #[test]
    fn broken_operand_poisons_the_destination() {
        let broken = Region::broken_for_tests();
        let mut region = Region::from_rect(rect(0, 0, 10, 10));
        assert_eq!(region.union(&broken), Err(RegionError::Invalid));
        // The destination is now broken too.
        assert_eq!(region.copy(), Err(RegionError::Invalid));
        assert_eq!(
            region.union(rect(0, 0, 1, 1)),
            Err(RegionError::Invalid)
        );
    }

    #[test]
    fn broken_regions_compare_unequal_even_to_themselves() {
        let broken = Region::broken_for_tests();
        let other = Region::broken_for_tests();
        assert_ne!(broken, other);
        assert_ne!(broken, broken.clone());
        assert_ne!(broken, Region::new());
        // A clone of a broken region is broken as well.
        assert_eq!(broken.clone().copy(), Err(RegionError::Invalid));
    }

    #[test]
    fn mixed_operation_sequence_stays_canonical() {
        let mut region = Region::new();
        region.union(rect(0, 0, 20, 20)).unwrap();
        region.subtract(rect(5, 5, 10, 10)).unwrap();
        region.union(rect(8, 8, 4, 4)).unwrap();
        region.xor(rect(-3, -3, 8, 8)).unwrap();
        region
            .intersect(&Region::from_rects(&[rect(-10, -10, 25, 25), rect(14, 14, 10, 10)]).unwrap())
            .unwrap();
        region.translate(7, 1);
        assert!(is_canonical(&region.boxes));
        // Every rectangle handed out is non-degenerate and disjoint.
        let tiles: Vec<RectInt> = region.rectangles().collect();
        for t in &tiles {
            assert!(!t.is_empty(), "canonical tiles are never degenerate");
        }
    }

    #[test]
    fn union_fast_path_swallowing_operand() {
        let mut big = Region::from_rect(rect(0, 0, 100, 100));
        big.union(rect(10, 10, 5, 5)).unwrap();
        assert_eq!(big.num_rectangles(), 1);
        assert_eq!(big.extents(), rect(0, 0, 100, 100));

        let mut small = Region::from_rect(rect(10, 10, 5, 5));
        small.union(rect(0, 0, 100, 100)).unwrap();
        assert_eq!(small.num_rectangles(), 1);
        assert_eq!(small.extents(), rect(0, 0, 100, 100));
    }
}
