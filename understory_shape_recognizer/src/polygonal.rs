// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Splitting a stroke into straight sides.
//!
//! [`find_polygonal`] looks for a decomposition of a point range into at most
//! `max_sides` pieces that are each "linear enough" (their [`Inertia::det`]
//! stays below a threshold). It seeds on the first linear piece among equal
//! partitions of the range, grows that piece greedily one point at a time,
//! then recurses on whatever is left on either side. If any leftover cannot be
//! decomposed within the remaining side budget the whole search fails; there
//! is no partial answer.
//!
//! [`optimize_polygonal`] then nudges each interior break point while doing so
//! lowers the summed squared `det` of the two sides meeting there.

use kurbo::Point;
use smallvec::SmallVec;

use crate::Inertia;

/// A polygonal decomposition of a point range.
///
/// Side `i` spans the points `breaks[i]..=breaks[i + 1]`, and its edge moments
/// (edges `breaks[i]..breaks[i + 1]`) are `sides[i]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygonal {
    breaks: SmallVec<[usize; 5]>,
    sides: SmallVec<[Inertia; 4]>,
}

impl Polygonal {
    /// Number of straight sides.
    #[must_use]
    pub fn side_count(&self) -> usize {
        self.sides.len()
    }

    /// Break point indices, `side_count() + 1` of them.
    #[must_use]
    pub fn breaks(&self) -> &[usize] {
        &self.breaks
    }

    /// Moments of each side.
    #[must_use]
    pub fn sides(&self) -> &[Inertia] {
        &self.sides
    }

    /// Append `other`, which must start at the break where `self` ends.
    fn extend(&mut self, other: &Self) {
        debug_assert_eq!(
            self.breaks.last(),
            other.breaks.first(),
            "decompositions must share their boundary break"
        );
        self.breaks.extend_from_slice(&other.breaks[1..]);
        self.sides.extend_from_slice(&other.sides);
    }
}

/// Decompose `points[start..=end]` into at most `max_sides` straight sides.
///
/// Returns `None` if the range is empty, the budget is zero, or some part of
/// the range cannot be covered by a piece whose `det` is below `line_max_det`.
#[must_use]
pub fn find_polygonal(
    points: &[Point],
    start: usize,
    end: usize,
    max_sides: usize,
    line_max_det: f64,
) -> Option<Polygonal> {
    if end <= start || max_sides == 0 {
        return None;
    }
    // Too small for a polygon.
    let nsides = if end - start < 5 { 1 } else { max_sides };

    // Seed: first equal partition that is linear enough.
    let span = end - start;
    let (mut i1, mut i2, mut s) = (0..nsides)
        .map(|k| {
            let i1 = start + (k * span) / nsides;
            let i2 = start + ((k + 1) * span) / nsides;
            (i1, i2, Inertia::from_range(points, i1, i2))
        })
        .find(|(_, _, s)| s.det() < line_max_det)?;

    // Grow the seed one point at a time towards whichever side stays flatter.
    loop {
        let grown_left = (i1 > start).then(|| {
            let mut s1 = s;
            s1.increase(points[i1 - 1], points[i1], 1.0);
            s1
        });
        let grown_right = (i2 < end).then(|| {
            let mut s2 = s;
            s2.increase(points[i2], points[i2 + 1], 1.0);
            s2
        });
        let det1 = grown_left.map_or(1.0, |s1| s1.det());
        let det2 = grown_right.map_or(1.0, |s2| s2.det());

        match (grown_left, grown_right) {
            (Some(s1), _) if det1 < det2 && det1 < line_max_det => {
                i1 -= 1;
                s = s1;
            }
            (_, Some(s2)) if det2 < det1 && det2 < line_max_det => {
                i2 += 1;
                s = s2;
            }
            _ => break,
        }
    }

    let mut poly = if i1 > start {
        let budget = if i2 == end {
            nsides - 1
        } else {
            nsides.saturating_sub(2)
        };
        find_polygonal(points, start, i1, budget, line_max_det)?
    } else {
        Polygonal {
            breaks: SmallVec::from_slice(&[i1]),
            sides: SmallVec::new(),
        }
    };
    poly.breaks.push(i2);
    poly.sides.push(s);

    if i2 < end {
        let budget = nsides.saturating_sub(poly.side_count());
        let right = find_polygonal(points, i2, end, budget, line_max_det)?;
        poly.extend(&right);
    }

    Some(poly)
}

/// Move each interior break of `poly` while that flattens its two sides.
///
/// Breaks are visited once, left to right. Each one first walks left while
/// the cost `det(left)² + det(right)²` strictly decreases; only if that never
/// helped does it try walking right.
pub fn optimize_polygonal(points: &[Point], poly: &mut Polygonal) {
    let cost = |a: &Inertia, b: &Inertia| a.det() * a.det() + b.det() * b.det();

    for i in 1..poly.side_count() {
        let mut best = cost(&poly.sides[i - 1], &poly.sides[i]);
        let mut improved = false;

        let (mut s1, mut s2) = (poly.sides[i - 1], poly.sides[i]);
        while poly.breaks[i] > poly.breaks[i - 1] + 1 {
            let b = poly.breaks[i];
            s1.increase(points[b - 1], points[b - 2], -1.0);
            s2.increase(points[b - 1], points[b - 2], 1.0);
            let c = cost(&s1, &s2);
            if c >= best {
                break;
            }
            improved = true;
            best = c;
            poly.breaks[i] -= 1;
            poly.sides[i - 1] = s1;
            poly.sides[i] = s2;
        }
        if improved {
            continue;
        }

        let (mut s1, mut s2) = (poly.sides[i - 1], poly.sides[i]);
        while poly.breaks[i] + 1 < poly.breaks[i + 1] {
            let b = poly.breaks[i];
            s1.increase(points[b], points[b + 1], 1.0);
            s2.increase(points[b], points[b + 1], -1.0);
            let c = cost(&s1, &s2);
            if c >= best {
                break;
            }
            best = c;
            poly.breaks[i] += 1;
            poly.sides[i - 1] = s1;
            poly.sides[i] = s2;
        }
    }
}
