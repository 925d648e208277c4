// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recognition thresholds.

use core::f64::consts::PI;

/// Default maximum number of sides a single stroke may decompose into.
pub const DEFAULT_MAX_POLYGON_SIDES: usize = 4;
/// Default upper bound on [`Inertia::det`](crate::Inertia::det) for a linear piece.
pub const DEFAULT_LINE_MAX_DET: f64 = 0.015;
/// Default lower bound (exclusive) on `det` for a circle candidate.
pub const DEFAULT_CIRCLE_MIN_DET: f64 = 0.95;
/// Default upper bound (exclusive) on the circle deviation score.
pub const DEFAULT_CIRCLE_MAX_SCORE: f64 = 0.10;
/// Default snapping tolerance towards horizontal/vertical, 5 degrees.
pub const DEFAULT_SLANT_TOLERANCE: f64 = 5.0 * PI / 180.0;
/// Default tolerance on rectangle corner angles, 15 degrees.
pub const DEFAULT_RECTANGLE_ANGLE_TOLERANCE: f64 = 15.0 * PI / 180.0;
/// Default corner gap tolerance, relative to the adjacent sides' radii.
pub const DEFAULT_RECTANGLE_LINEAR_TOLERANCE: f64 = 0.20;

/// Tunable thresholds for [`ShapeRecognizer`](crate::ShapeRecognizer).
///
/// All angles are in radians. The defaults reproduce the classic ink
/// recognizer behavior; tests and hosts may tighten or loosen individual
/// values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RecognizerConfig {
    /// Maximum number of straight sides searched per stroke. This is also the
    /// capacity of the cross-stroke segment queue.
    pub max_polygon_sides: usize,
    /// A point range counts as a straight side while its `det` stays below this.
    pub line_max_det: f64,
    /// A stroke is a circle candidate only if its `det` exceeds this.
    pub circle_min_det: f64,
    /// A circle candidate is accepted only if its deviation score is below this.
    pub circle_max_score: f64,
    /// Lines and rectangles within this angle of the axes are snapped to them.
    pub slant_tolerance: f64,
    /// Allowed deviation of each rectangle corner from a right angle.
    pub rectangle_angle_tolerance: f64,
    /// Allowed corner gap, as a fraction of the sum of both sides' radii.
    pub rectangle_linear_tolerance: f64,
    /// Strokes whose bounding-box diagonal is shorter than this are ignored.
    ///
    /// `0.0` disables the check.
    pub min_stroke_size: f64,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            max_polygon_sides: DEFAULT_MAX_POLYGON_SIDES,
            line_max_det: DEFAULT_LINE_MAX_DET,
            circle_min_det: DEFAULT_CIRCLE_MIN_DET,
            circle_max_score: DEFAULT_CIRCLE_MAX_SCORE,
            slant_tolerance: DEFAULT_SLANT_TOLERANCE,
            rectangle_angle_tolerance: DEFAULT_RECTANGLE_ANGLE_TOLERANCE,
            rectangle_linear_tolerance: DEFAULT_RECTANGLE_LINEAR_TOLERANCE,
            min_stroke_size: 0.0,
        }
    }
}

impl RecognizerConfig {
    /// Return a copy with [`min_stroke_size`](Self::min_stroke_size) set.
    #[must_use]
    pub const fn with_min_stroke_size(mut self, min_stroke_size: f64) -> Self {
        self.min_stroke_size = min_stroke_size;
        self
    }
}
