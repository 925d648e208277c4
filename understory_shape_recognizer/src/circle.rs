// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Circle detection for whole strokes.

use alloc::vec::Vec;
use core::f64::consts::TAU;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Circle, Point, Vec2};

use crate::{Inertia, RecognizerConfig, Stroke};

/// Fewest points used to draw a synthesized circle.
const MIN_CIRCLE_POINTS: usize = 12;

/// Mean deviation of `points` from the fitted circle, relative to its radius.
///
/// Each edge contributes its length times the distance of its first point
/// from the fitted circle, so sparsely sampled (fast) parts of the stroke
/// weigh less. Returns `f64::INFINITY` when there is nothing to measure.
#[must_use]
pub fn score_circle(points: &[Point], inertia: &Inertia) -> f64 {
    let center = inertia.center();
    let r0 = inertia.rad();
    let divisor = inertia.mass() * r0;
    if divisor <= 0.0 {
        return f64::INFINITY;
    }
    let sum: f64 = points
        .windows(2)
        .map(|w| w[0].distance(w[1]) * (w[0].distance(center) - r0).abs())
        .sum();
    sum / divisor
}

/// Fit a circle to `points`, if they are round enough.
#[must_use]
pub fn fit_circle(points: &[Point], config: &RecognizerConfig) -> Option<Circle> {
    if points.len() < 2 {
        return None;
    }
    let inertia = Inertia::from_range(points, 0, points.len() - 1);
    let det = inertia.det();
    tracing::trace!(
        mass = inertia.mass(),
        cx = inertia.center_x(),
        cy = inertia.center_y(),
        rad = inertia.rad(),
        det,
        "circle candidate"
    );
    if det <= config.circle_min_det {
        return None;
    }
    let score = score_circle(points, &inertia);
    tracing::trace!(score, "circle score");
    if score >= config.circle_max_score {
        return None;
    }
    Some(Circle::new(inertia.center(), inertia.rad()))
}

/// Replace `stroke` by a clean circle, if it is round enough.
///
/// The returned stroke is a closed polyline with the style of `stroke`.
#[must_use]
pub fn recognize_circle(stroke: &Stroke, config: &RecognizerConfig) -> Option<Stroke> {
    let points: Vec<Point> = stroke.positions().collect();
    let circle = fit_circle(&points, config)?;
    let mut s = circle_stroke(circle);
    s.apply_style_from(stroke);
    Some(s)
}

/// Sample `circle` as a closed polyline of at least [`MIN_CIRCLE_POINTS`] sides.
///
/// Larger circles get roughly one side per two units of radius.
#[must_use]
pub fn circle_stroke(circle: Circle) -> Stroke {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "Side count is a small positive number; fractions are dropped on purpose."
    )]
    let n = ((2.0 * circle.radius) as usize).max(MIN_CIRCLE_POINTS);
    let mut s = Stroke::default();
    for i in 0..=n {
        let a = TAU * i as f64 / n as f64;
        s.push_point(circle.center + Vec2::from_angle(a) * circle.radius);
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{StrokeStyle, ToolType};

    fn ring(center: Point, r: f64, n: usize, wobble: f64) -> Vec<Point> {
        (0..=n)
            .map(|i| {
                let a = TAU * i as f64 / n as f64;
                let rr = r + if i % 2 == 0 { wobble } else { -wobble };
                center + Vec2::from_angle(a) * rr
            })
            .collect()
    }

    #[test]
    fn perfect_circle_round_trip() {
        let style = StrokeStyle {
            width: 2.0,
            color: 0x3366_99ff,
            tool: ToolType::Pen,
        };
        let center = Point::new(120.0, 80.0);
        let stroke = Stroke::from_points(style, ring(center, 40.25, 100, 0.0));
        let out = recognize_circle(&stroke, &RecognizerConfig::default())
            .expect("a perfect circle should be recognized");
        assert_eq!(*out.style(), style);
        assert_eq!(out.point_count(), 81);
        let first = out.points()[0].pos;
        let last = out.points()[80].pos;
        assert!(first.distance(last) < 1e-9, "the outline should close");
        for p in out.positions() {
            assert!((p.distance(center) - 40.25).abs() < 1e-6, "{p:?}");
        }
    }

    #[test]
    fn small_circles_use_twelve_sides() {
        let s = circle_stroke(Circle::new((0.0, 0.0), 2.0));
        assert_eq!(s.point_count(), MIN_CIRCLE_POINTS + 1);
    }

    #[test]
    fn wobbly_circle_is_accepted() {
        let pts = ring(Point::ZERO, 50.0, 120, 1.0);
        let c = fit_circle(&pts, &RecognizerConfig::default()).expect("mild wobble is fine");
        assert!((c.radius - 50.0).abs() < 1.0, "radius = {}", c.radius);
    }

    #[test]
    fn straight_line_is_rejected() {
        let pts: Vec<_> = (0..50).map(|i| Point::new(f64::from(i), 2.0 * f64::from(i))).collect();
        assert!(fit_circle(&pts, &RecognizerConfig::default()).is_none());
    }

    #[test]
    fn square_outline_scores_worse_than_a_circle() {
        let mut pts = Vec::new();
        for (a, b) in [
            ((0.0, 0.0), (40.0, 0.0)),
            ((40.0, 0.0), (40.0, 40.0)),
            ((40.0, 40.0), (0.0, 40.0)),
            ((0.0, 40.0), (0.0, 0.0)),
        ] {
            for k in 0..40 {
                pts.push(Point::from(a).lerp(Point::from(b), f64::from(k) / 40.0));
            }
        }
        pts.push(Point::ZERO);
        let square = Inertia::from_range(&pts, 0, pts.len() - 1);
        let round = ring(Point::new(20.0, 20.0), 20.0, 160, 0.0);
        let circle = Inertia::from_range(&round, 0, round.len() - 1);
        assert!(score_circle(&pts, &square) > 10.0 * score_circle(&round, &circle));
    }

    #[test]
    fn degenerate_input_is_rejected() {
        let cfg = RecognizerConfig::default();
        assert!(fit_circle(&[], &cfg).is_none());
        assert!(fit_circle(&[Point::ZERO; 5], &cfg).is_none());
        assert_eq!(score_circle(&[Point::ZERO; 3], &Inertia::new()), f64::INFINITY);
    }
}
