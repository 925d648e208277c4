// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mass-weighted moments of a polyline.
//!
//! Every edge `p1 → p2` of a polyline contributes a mass equal to its length,
//! concentrated at `p1`. From the accumulated first and second moments we get
//! the center of mass, the normalized covariance (`xx`, `xy`, `yy`), a radius
//! of gyration and a scale-invariant eccentricity measure ([`Inertia::det`]).
//!
//! Sums are kept raw so that edges can be added and removed in O(1), which the
//! polygon search relies on when it grows or shifts point ranges.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Point;

/// Moment accumulator over a set of polyline edges.
///
/// When the accumulated mass is zero every derived quantity, including the
/// center, is `0.0`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Inertia {
    mass: f64,
    sx: f64,
    sy: f64,
    sxx: f64,
    sxy: f64,
    syy: f64,
}

impl Inertia {
    /// An empty accumulator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mass: 0.0,
            sx: 0.0,
            sy: 0.0,
            sxx: 0.0,
            sxy: 0.0,
            syy: 0.0,
        }
    }

    /// Moments of the edges `points[i] → points[i + 1]` for `i` in `start..end`.
    #[must_use]
    pub fn from_range(points: &[Point], start: usize, end: usize) -> Self {
        let mut s = Self::new();
        s.calc(points, start, end);
        s
    }

    /// Reset, then accumulate the edges `points[i] → points[i + 1]` for `i` in `start..end`.
    ///
    /// `end` must be a valid index into `points`. An empty range leaves the
    /// accumulator empty.
    pub fn calc(&mut self, points: &[Point], start: usize, end: usize) {
        debug_assert!(
            start >= end || end < points.len(),
            "edge range {start}..{end} exceeds {} points",
            points.len()
        );
        *self = Self::new();
        for i in start..end {
            self.increase(points[i], points[i + 1], 1.0);
        }
    }

    /// Add (`coef = 1.0`) or remove (`coef = -1.0`) the edge `p1 → p2`.
    ///
    /// The edge's mass is its length, placed at `p1`.
    pub fn increase(&mut self, p1: Point, p2: Point, coef: f64) {
        let dm = coef * p1.distance(p2);
        self.mass += dm;
        self.sx += dm * p1.x;
        self.sy += dm * p1.y;
        self.sxx += dm * p1.x * p1.x;
        self.syy += dm * p1.y * p1.y;
        self.sxy += dm * p1.x * p1.y;
    }

    /// Total edge length accumulated.
    #[must_use]
    pub const fn mass(&self) -> f64 {
        self.mass
    }

    /// X coordinate of the center of mass.
    #[must_use]
    pub fn center_x(&self) -> f64 {
        if self.mass <= 0.0 {
            return 0.0;
        }
        self.sx / self.mass
    }

    /// Y coordinate of the center of mass.
    #[must_use]
    pub fn center_y(&self) -> f64 {
        if self.mass <= 0.0 {
            return 0.0;
        }
        self.sy / self.mass
    }

    /// Center of mass.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.center_x(), self.center_y())
    }

    /// Normalized second central moment along x.
    #[must_use]
    pub fn xx(&self) -> f64 {
        if self.mass <= 0.0 {
            return 0.0;
        }
        (self.sxx - self.sx * self.sx / self.mass) / self.mass
    }

    /// Normalized mixed second central moment.
    #[must_use]
    pub fn xy(&self) -> f64 {
        if self.mass <= 0.0 {
            return 0.0;
        }
        (self.sxy - self.sx * self.sy / self.mass) / self.mass
    }

    /// Normalized second central moment along y.
    #[must_use]
    pub fn yy(&self) -> f64 {
        if self.mass <= 0.0 {
            return 0.0;
        }
        (self.syy - self.sy * self.sy / self.mass) / self.mass
    }

    /// Radius of gyration, `sqrt(xx + yy)`.
    ///
    /// Used as the radius estimate of a circle and as a size estimate in
    /// general.
    #[must_use]
    pub fn rad(&self) -> f64 {
        let trace = self.xx() + self.yy();
        if trace <= 0.0 {
            return 0.0;
        }
        trace.sqrt()
    }

    /// Eccentricity measure `4 · det(I) / trace(I)²` of the covariance `I`.
    ///
    /// Close to `1.0` when the mass is spread evenly in all directions (a
    /// circle) and close to `0.0` when it lies on a line.
    #[must_use]
    pub fn det(&self) -> f64 {
        if self.mass <= 0.0 {
            return 0.0;
        }
        let ixx = self.xx();
        let iyy = self.yy();
        let ixy = self.xy();
        let trace = ixx + iyy;
        if trace <= 0.0 {
            return 0.0;
        }
        4.0 * (ixx * iyy - ixy * ixy) / (trace * trace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use core::f64::consts::PI;
    use kurbo::Vec2;

    const EPS: f64 = 1e-9;

    fn circle_points(center: Point, r: f64, n: usize) -> Vec<Point> {
        (0..=n)
            .map(|i| center + Vec2::from_angle(2.0 * PI * i as f64 / n as f64) * r)
            .collect()
    }

    #[test]
    fn incremental_matches_calc() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(3.0, 1.0),
            Point::new(7.0, -2.0),
            Point::new(8.0, 5.0),
            Point::new(2.0, 9.0),
        ];
        let full = Inertia::from_range(&pts, 0, pts.len() - 1);
        let mut inc = Inertia::new();
        for w in pts.windows(2) {
            inc.increase(w[0], w[1], 1.0);
        }
        for (a, b) in [
            (full.center_x(), inc.center_x()),
            (full.center_y(), inc.center_y()),
            (full.xx(), inc.xx()),
            (full.xy(), inc.xy()),
            (full.yy(), inc.yy()),
            (full.det(), inc.det()),
            (full.rad(), inc.rad()),
        ] {
            assert!((a - b).abs() < EPS, "{a} != {b}");
        }
    }

    #[test]
    fn removing_an_edge_undoes_adding_it() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 3.0),
            Point::new(0.0, 3.0),
        ];
        // Both edges put their mass on the x axis.
        let base = Inertia::from_range(&pts, 0, 2);
        assert_eq!(base.det(), 0.0);
        let mut s = base;
        s.increase(pts[2], pts[3], 1.0);
        assert!(s.det() > base.det(), "adding a corner should bend the piece");
        s.increase(pts[2], pts[3], -1.0);
        assert!((s.mass() - base.mass()).abs() < EPS, "mass should be restored");
        assert!((s.det() - base.det()).abs() < EPS, "det should be restored");
    }

    #[test]
    fn degenerate_ranges_are_zero() {
        let pts = [Point::new(3.0, 4.0), Point::new(5.0, 6.0)];
        for s in [Inertia::new(), Inertia::from_range(&pts, 1, 1)] {
            assert_eq!(s.mass(), 0.0);
            assert_eq!(s.center(), Point::ZERO);
            assert_eq!(s.xx(), 0.0);
            assert_eq!(s.xy(), 0.0);
            assert_eq!(s.yy(), 0.0);
            assert_eq!(s.rad(), 0.0);
            assert_eq!(s.det(), 0.0);
        }

        // Repeated points carry no mass either.
        let same = [Point::new(1.0, 1.0); 4];
        let s = Inertia::from_range(&same, 0, 3);
        assert_eq!(s.mass(), 0.0);
        assert!(s.det().is_finite());
        assert_eq!(s.det(), 0.0);
    }

    #[test]
    fn circle_is_round() {
        let pts = circle_points(Point::new(40.0, -15.0), 25.0, 360);
        let s = Inertia::from_range(&pts, 0, pts.len() - 1);
        assert!((s.det() - 1.0).abs() < 1e-6, "det = {}", s.det());
        assert!((s.rad() - 25.0).abs() < 1e-6, "rad = {}", s.rad());
        assert!((s.center_x() - 40.0).abs() < 1e-6, "cx = {}", s.center_x());
        assert!((s.center_y() + 15.0).abs() < 1e-6, "cy = {}", s.center_y());
    }

    #[test]
    fn line_is_flat() {
        let pts: Vec<_> = (0..=20)
            .map(|i| Point::new(i as f64, 0.5 * i as f64 + 2.0))
            .collect();
        let s = Inertia::from_range(&pts, 0, pts.len() - 1);
        assert!(s.det().abs() < 1e-9, "det = {}", s.det());
        assert!(s.rad() > 0.0, "a line still has a size");
    }
}
