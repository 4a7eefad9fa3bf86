// Copyright 2025 the Parterre Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The band sweep at the core of every boolean combinator.
//!
//! This is the classic rectilinear region walk: both operands' band lists are
//! scanned top to bottom in lockstep, y slices where only one operand has
//! coverage are emitted for the operators that keep them, and y slices where
//! both have coverage get their x-interval lists merged by a per-operator
//! rule. Every emitted band is then given a chance to coalesce with the band
//! above it, which is what keeps the output minimal.
//!
//! All output growth is fallible: allocation failure aborts the sweep and
//! surfaces as [`RegionError::OutOfMemory`] without publishing any partial
//! band list.

use alloc::vec::Vec;

use parterre_geom::RectInt;

use crate::boxes::{BoxInt, BoxStore, band_end, intervals_equal};
use crate::error::RegionError;

/// Which boolean operator the band sweep computes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum OpKind {
    /// Area covered by either operand.
    Union,
    /// Area covered by both operands.
    Intersect,
    /// Area covered by the first operand but not the second.
    Subtract,
}

impl OpKind {
    /// Whether bands of the first operand outside the second reach the output.
    #[inline]
    const fn keeps_lone_a(self) -> bool {
        matches!(self, Self::Union | Self::Subtract)
    }

    /// Whether bands of the second operand outside the first reach the output.
    #[inline]
    const fn keeps_lone_b(self) -> bool {
        matches!(self, Self::Union)
    }
}

/// Combine two canonical band lists. The output is canonical.
pub(crate) fn op(a: &[BoxInt], b: &[BoxInt], kind: OpKind) -> Result<BoxStore, RegionError> {
    let mut out = BoxStore::new();
    out.try_reserve(a.len().max(b.len()).saturating_mul(2))
        .map_err(|_| RegionError::OutOfMemory)?;

    let mut i = 0;
    let mut j = 0;
    // Start of the band most recently appended to `out`, for coalescing.
    let mut prev_band = 0;
    // Bottom of the last y slice handled; nothing above it is emitted again.
    let mut ybot = i32::MIN;

    while i < a.len() && j < b.len() {
        let a_end = band_end(a, i);
        let b_end = band_end(b, j);

        // Emit the part of the upper band lying strictly above the other
        // operand, if this operator keeps one-sided coverage.
        let ytop = if a[i].y1 < b[j].y1 {
            let top = a[i].y1.max(ybot);
            let bot = a[i].y2.min(b[j].y1);
            if top < bot && kind.keeps_lone_a() {
                let cur = out.len();
                append_band(&mut out, &a[i..a_end], top, bot)?;
                prev_band = coalesce(&mut out, prev_band, cur);
            }
            b[j].y1
        } else if b[j].y1 < a[i].y1 {
            let top = b[j].y1.max(ybot);
            let bot = b[j].y2.min(a[i].y1);
            if top < bot && kind.keeps_lone_b() {
                let cur = out.len();
                append_band(&mut out, &b[j..b_end], top, bot)?;
                prev_band = coalesce(&mut out, prev_band, cur);
            }
            a[i].y1
        } else {
            a[i].y1
        };

        // The y slice where both operands have a band.
        ybot = a[i].y2.min(b[j].y2);
        if ybot > ytop {
            let cur = out.len();
            match kind {
                OpKind::Union => merge_union(&mut out, &a[i..a_end], &b[j..b_end], ytop, ybot)?,
                OpKind::Intersect => {
                    merge_intersect(&mut out, &a[i..a_end], &b[j..b_end], ytop, ybot)?;
                }
                OpKind::Subtract => {
                    merge_subtract(&mut out, &a[i..a_end], &b[j..b_end], ytop, ybot)?;
                }
            }
            if out.len() != cur {
                prev_band = coalesce(&mut out, prev_band, cur);
            }
        }

        let a_done = a[i].y2 == ybot;
        let b_done = b[j].y2 == ybot;
        if a_done {
            i = a_end;
        }
        if b_done {
            j = b_end;
        }
    }

    // Whatever is left of one operand lies entirely below the other.
    if i < a.len() && kind.keeps_lone_a() {
        append_tail(&mut out, a, i, ybot, &mut prev_band)?;
    } else if j < b.len() && kind.keeps_lone_b() {
        append_tail(&mut out, b, j, ybot, &mut prev_band)?;
    }

    Ok(out)
}

/// Canonicalize an arbitrary (possibly overlapping) rectangle list.
///
/// Degenerate rectangles are dropped, the rest are sorted into band order
/// and merged pairwise; unioning two canonical lists is exact, so the merge
/// tree bottoms out at single boxes and stays canonical all the way up.
pub(crate) fn canonicalize(rects: &[RectInt]) -> Result<BoxStore, RegionError> {
    let mut boxes: Vec<BoxInt> = Vec::new();
    boxes
        .try_reserve(rects.len())
        .map_err(|_| RegionError::OutOfMemory)?;
    boxes.extend(rects.iter().copied().filter_map(BoxInt::from_rect));
    boxes.sort_unstable_by_key(|b| (b.y1, b.x1));
    union_all(&boxes)
}

fn union_all(sorted: &[BoxInt]) -> Result<BoxStore, RegionError> {
    match sorted {
        [] => Ok(BoxStore::new()),
        [only] => {
            let mut out = BoxStore::new();
            // Inline capacity holds one box; no allocation to fail.
            out.push(*only);
            Ok(out)
        }
        _ => {
            let (lo, hi) = sorted.split_at(sorted.len() / 2);
            let lo = union_all(lo)?;
            let hi = union_all(hi)?;
            op(&lo, &hi, OpKind::Union)
        }
    }
}

#[inline]
fn push_box(out: &mut BoxStore, bx: BoxInt) -> Result<(), RegionError> {
    debug_assert!(!bx.is_empty(), "band sweep must only emit non-empty boxes");
    out.try_reserve(1).map_err(|_| RegionError::OutOfMemory)?;
    out.push(bx);
    Ok(())
}

/// Append a band's boxes clipped to the y slice `[y1, y2)`.
fn append_band(out: &mut BoxStore, band: &[BoxInt], y1: i32, y2: i32) -> Result<(), RegionError> {
    debug_assert!(y1 < y2, "band y slice must be non-empty");
    for b in band {
        push_box(out, BoxInt::new(b.x1, y1, b.x2, y2))?;
    }
    Ok(())
}

/// Append the bands of `src` from `i` on, the first clipped to start no
/// higher than `ybot`.
fn append_tail(
    out: &mut BoxStore,
    src: &[BoxInt],
    mut i: usize,
    ybot: i32,
    prev_band: &mut usize,
) -> Result<(), RegionError> {
    while i < src.len() {
        let end = band_end(src, i);
        let top = src[i].y1.max(ybot);
        let cur = out.len();
        append_band(out, &src[i..end], top, src[i].y2)?;
        *prev_band = coalesce(out, *prev_band, cur);
        i = end;
    }
    Ok(())
}

/// Merge the band starting at `cur_band` into the one starting at
/// `prev_band` when both carry the same intervals over touching y ranges.
/// Returns the start of whichever band is now last.
fn coalesce(out: &mut BoxStore, prev_band: usize, cur_band: usize) -> usize {
    let prev_len = cur_band - prev_band;
    let cur_len = out.len() - cur_band;
    if prev_len != cur_len || cur_len == 0 {
        return cur_band;
    }
    if out[prev_band].y2 != out[cur_band].y1 {
        return cur_band;
    }
    let (head, tail) = out.split_at(cur_band);
    if !intervals_equal(&head[prev_band..], tail) {
        return cur_band;
    }
    let y2 = out[cur_band].y2;
    for b in &mut out[prev_band..cur_band] {
        b.y2 = y2;
    }
    out.truncate(cur_band);
    prev_band
}

/// Interval union of two bands; touching intervals merge.
fn merge_union(
    out: &mut BoxStore,
    a: &[BoxInt],
    b: &[BoxInt],
    y1: i32,
    y2: i32,
) -> Result<(), RegionError> {
    let mut i = 0;
    let mut j = 0;
    let mut cur: Option<(i32, i32)> = None;
    while i < a.len() || j < b.len() {
        let take_a = match (a.get(i), b.get(j)) {
            (Some(ba), Some(bb)) => ba.x1 <= bb.x1,
            (Some(_), None) => true,
            _ => false,
        };
        let bx = if take_a {
            i += 1;
            a[i - 1]
        } else {
            j += 1;
            b[j - 1]
        };
        cur = match cur {
            Some((cx1, cx2)) if bx.x1 <= cx2 => Some((cx1, cx2.max(bx.x2))),
            Some((cx1, cx2)) => {
                push_box(out, BoxInt::new(cx1, y1, cx2, y2))?;
                Some((bx.x1, bx.x2))
            }
            None => Some((bx.x1, bx.x2)),
        };
    }
    if let Some((cx1, cx2)) = cur {
        push_box(out, BoxInt::new(cx1, y1, cx2, y2))?;
    }
    Ok(())
}

/// Pairwise interval intersection of two bands.
fn merge_intersect(
    out: &mut BoxStore,
    a: &[BoxInt],
    b: &[BoxInt],
    y1: i32,
    y2: i32,
) -> Result<(), RegionError> {
    let mut i = 0;
    let mut j = 0;
    while i < a.len() && j < b.len() {
        let x1 = a[i].x1.max(b[j].x1);
        let x2 = a[i].x2.min(b[j].x2);
        if x1 < x2 {
            push_box(out, BoxInt::new(x1, y1, x2, y2))?;
        }
        // Advance past whichever interval ends first.
        if a[i].x2 < b[j].x2 {
            i += 1;
        } else if b[j].x2 < a[i].x2 {
            j += 1;
        } else {
            i += 1;
            j += 1;
        }
    }
    Ok(())
}

/// Intervals of `a` with the intervals of `b` carved out.
fn merge_subtract(
    out: &mut BoxStore,
    a: &[BoxInt],
    b: &[BoxInt],
    y1: i32,
    y2: i32,
) -> Result<(), RegionError> {
    let mut i = 0;
    let mut j = 0;
    // Left edge of the part of a[i] not yet accounted for.
    let mut x1 = a[0].x1;
    while i < a.len() && j < b.len() {
        let bb = b[j];
        if bb.x2 <= x1 {
            // Subtrahend entirely to the left; move on.
            j += 1;
        } else if bb.x1 <= x1 {
            // Subtrahend overlaps the left edge; clip it away.
            x1 = bb.x2;
            if x1 >= a[i].x2 {
                i += 1;
                if i < a.len() {
                    x1 = a[i].x1;
                }
            } else {
                j += 1;
            }
        } else if bb.x1 < a[i].x2 {
            // Subtrahend starts inside; emit the part to its left.
            push_box(out, BoxInt::new(x1, y1, bb.x1, y2))?;
            x1 = bb.x2;
            if x1 >= a[i].x2 {
                i += 1;
                if i < a.len() {
                    x1 = a[i].x1;
                }
            } else {
                j += 1;
            }
        } else {
            // Subtrahend entirely to the right; the rest of a[i] survives.
            if a[i].x2 > x1 {
                push_box(out, BoxInt::new(x1, y1, a[i].x2, y2))?;
            }
            i += 1;
            if i < a.len() {
                x1 = a[i].x1;
            }
        }
    }
    while i < a.len() {
        push_box(out, BoxInt::new(x1, y1, a[i].x2, y2))?;
        i += 1;
        if i < a.len() {
            x1 = a[i].x1;
        }
    }
    Ok(())
}
