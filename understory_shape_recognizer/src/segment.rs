// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Straight sides fitted to point ranges.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Vec2};

use crate::Inertia;

/// One straight side of a polygonal decomposition.
///
/// The side is the principal axis of the range's [`Inertia`], clipped to the
/// extent of the range's points projected onto it. `K` is the caller's key for
/// the stroke the side came from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RecoSegment<K> {
    /// Index of the first point of the side in its source stroke.
    pub start: usize,
    /// Index of the last point of the side in its source stroke.
    pub end: usize,
    /// Center of mass of the side.
    pub center: Point,
    /// Direction of the side, in `[-π/2, π/2]` as fitted.
    ///
    /// Rectangle assembly rewrites it to the common orientation.
    pub angle: f64,
    /// Half-length estimate derived from the second moments.
    pub radius: f64,
    /// First endpoint along the fitted direction.
    pub p1: Point,
    /// Second endpoint along the fitted direction.
    pub p2: Point,
    /// Whether `p1 → p2` points away from the following side of a polygon.
    pub reversed: bool,
    /// Stroke the side was fitted from.
    pub stroke: Option<K>,
}

impl<K> RecoSegment<K> {
    /// Fit a side to `points[start..=end]`, whose moments are `inertia`.
    #[must_use]
    pub fn fit(points: &[Point], start: usize, end: usize, inertia: &Inertia) -> Self {
        let center = inertia.center();
        let a = inertia.xx();
        let b = inertia.xy();
        let c = inertia.yy();
        let angle = Vec2::new(a - c, 2.0 * b).atan2() / 2.0;
        let radius = (3.0 * (a + c)).sqrt();

        let dir = Vec2::from_angle(angle);
        let (mut lmin, mut lmax) = (0.0_f64, 0.0_f64);
        for p in &points[start..=end] {
            let l = (*p - center).dot(dir);
            lmin = lmin.min(l);
            lmax = lmax.max(l);
        }

        Self {
            start,
            end,
            center,
            angle,
            radius,
            p1: center + dir * lmin,
            p2: center + dir * lmax,
            reversed: false,
            stroke: None,
        }
    }

    /// Attach the key of the stroke this side belongs to.
    #[must_use]
    pub fn with_stroke(mut self, key: K) -> Self {
        self.stroke = Some(key);
        self
    }

    /// Endpoint that leads into the next side, honoring [`reversed`](Self::reversed).
    #[must_use]
    pub const fn leading_end(&self) -> Point {
        if self.reversed { self.p1 } else { self.p2 }
    }

    /// Endpoint that follows the previous side, honoring [`reversed`](Self::reversed).
    #[must_use]
    pub const fn trailing_end(&self) -> Point {
        if self.reversed { self.p2 } else { self.p1 }
    }

    /// Intersection of the infinite lines through `self` and `other`.
    ///
    /// Parallel sides have no intersection; `self.p2` is returned for them.
    #[must_use]
    pub fn edge_intersection(&self, other: &Self) -> Point {
        let dir = Vec2::from_angle(self.angle);
        let other_dir = Vec2::from_angle(other.angle);
        // sin(other.angle - self.angle)
        let denom = dir.cross(other_dir);
        if denom == 0.0 {
            return self.p2;
        }
        let t = (other.center - self.center).cross(other_dir) / denom;
        self.center + dir * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use core::f64::consts::FRAC_PI_2;

    const EPS: f64 = 1e-9;

    fn fit_all(points: &[Point]) -> RecoSegment<u32> {
        let end = points.len() - 1;
        RecoSegment::fit(points, 0, end, &Inertia::from_range(points, 0, end))
    }

    #[test]
    fn horizontal_fit() {
        let pts: Vec<_> = (0..=10).map(|i| Point::new(f64::from(i), 3.0)).collect();
        let seg = fit_all(&pts);
        assert!(seg.angle.abs() < EPS, "angle = {}", seg.angle);
        assert!((seg.center.y - 3.0).abs() < EPS, "center = {:?}", seg.center);
        let (lo, hi) = if seg.p1.x < seg.p2.x {
            (seg.p1, seg.p2)
        } else {
            (seg.p2, seg.p1)
        };
        assert!(lo.distance(Point::new(0.0, 3.0)) < EPS, "lo = {lo:?}");
        assert!(hi.distance(Point::new(10.0, 3.0)) < EPS, "hi = {hi:?}");
        assert!(seg.radius > 4.0 && seg.radius < 6.0, "radius = {}", seg.radius);
        assert_eq!(seg.stroke, None);
    }

    #[test]
    fn diagonal_fit_angle() {
        let pts: Vec<_> = (0..=10)
            .map(|i| Point::new(f64::from(i), f64::from(i)))
            .collect();
        let seg = fit_all(&pts).with_stroke(7);
        assert!((seg.angle - FRAC_PI_2 / 2.0).abs() < EPS, "angle = {}", seg.angle);
        assert_eq!(seg.stroke, Some(7));
    }

    #[test]
    fn perpendicular_intersection() {
        let horizontal: Vec<_> = (0..=10).map(|i| Point::new(f64::from(i), 0.0)).collect();
        let vertical: Vec<_> = (0..=10).map(|i| Point::new(12.0, f64::from(i) + 1.0)).collect();
        let h = fit_all(&horizontal);
        let v = fit_all(&vertical);
        let p = h.edge_intersection(&v);
        assert!(p.distance(Point::new(12.0, 0.0)) < 1e-6, "p = {p:?}");
        let q = v.edge_intersection(&h);
        assert!(q.distance(p) < 1e-6, "intersection should be symmetric");
    }

    #[test]
    fn parallel_sides_do_not_blow_up() {
        let a: Vec<_> = (0..=4).map(|i| Point::new(f64::from(i), 0.0)).collect();
        let b: Vec<_> = (0..=4).map(|i| Point::new(f64::from(i), 2.0)).collect();
        let sa = fit_all(&a);
        let sb = fit_all(&b);
        let p = sa.edge_intersection(&sb);
        assert!(p.is_finite(), "p = {p:?}");
    }

    #[test]
    fn reversal_swaps_ends() {
        let pts: Vec<_> = (0..=4).map(|i| Point::new(f64::from(i), 0.0)).collect();
        let mut seg = fit_all(&pts);
        assert_eq!(seg.leading_end(), seg.p2);
        seg.reversed = true;
        assert_eq!(seg.leading_end(), seg.p1);
        assert_eq!(seg.trailing_end(), seg.p2);
    }
}
