// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The stateful recognizer that turns strokes into shapes.
//!
//! Each call to [`ShapeRecognizer::recognize`] first tries to split the
//! stroke into at most four straight sides. Those sides join a small queue of
//! recently seen sides, so that a rectangle drawn as one, two, three or four
//! strokes is still found once its last side arrives. If no rectangle closes,
//! a single-sided stroke becomes a straight line. Strokes that are not
//! polygonal at all are tried as circles.
//!
//! ## State
//!
//! The queue holds at most [`RecognizerConfig::max_polygon_sides`] sides and
//! is evicted one whole stroke at a time, oldest first. Emitting a rectangle
//! empties it, as does [`ShapeRecognizer::reset`]. Strokes that match nothing
//! leave it untouched.

use alloc::vec::Vec;
use core::f64::consts::FRAC_PI_2;
use core::fmt::Debug;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Vec2};
use smallvec::SmallVec;

use crate::circle::recognize_circle;
use crate::polygonal::{find_polygonal, optimize_polygonal};
use crate::rectangle::try_rectangle;
use crate::{RecoSegment, RecognizerConfig, ShapeKind, ShapeRecognizerResult, Stroke};

/// Fewest points a stroke needs to be considered.
const MIN_POINTS: usize = 3;

/// Coarse state of the cross-stroke side queue.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RecognizerState {
    /// No sides are queued.
    Idle,
    /// Sides from earlier strokes are waiting to complete a rectangle.
    Accumulating {
        /// Number of queued sides.
        segments: usize,
    },
}

/// Recognizes lines, rectangles and circles in freehand strokes.
///
/// `K` is the host's key for a stroke. The recognizer stores keys of recently
/// recognized strokes so that it can report which ones a multi-stroke
/// rectangle consumes; it never owns the strokes themselves. When the host
/// replaces a stroke with a returned line, it should keep using the same key
/// for the line.
///
/// One recognizer is meant to serve one drawing surface, called from one
/// thread in stroke order.
#[derive(Clone, Debug)]
pub struct ShapeRecognizer<K> {
    config: RecognizerConfig,
    queue: SmallVec<[RecoSegment<K>; 4]>,
}

impl<K: Copy + Eq + Debug> Default for ShapeRecognizer<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq + Debug> ShapeRecognizer<K> {
    /// A recognizer with the default thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RecognizerConfig::default())
    }

    /// A recognizer with custom thresholds.
    #[must_use]
    pub fn with_config(config: RecognizerConfig) -> Self {
        Self {
            config,
            queue: SmallVec::new(),
        }
    }

    /// The thresholds in use.
    #[must_use]
    pub const fn config(&self) -> &RecognizerConfig {
        &self.config
    }

    /// Forget all queued sides, so the next stroke starts from scratch.
    pub fn reset(&mut self) {
        tracing::debug!("reset");
        self.queue.clear();
    }

    /// Whether sides from earlier strokes are queued.
    #[must_use]
    pub fn state(&self) -> RecognizerState {
        if self.queue.is_empty() {
            RecognizerState::Idle
        } else {
            RecognizerState::Accumulating {
                segments: self.queue.len(),
            }
        }
    }

    /// The queued sides, oldest first.
    #[must_use]
    pub fn queued_segments(&self) -> &[RecoSegment<K>] {
        &self.queue
    }

    /// Try to replace `stroke`, named `key`, by a clean shape.
    ///
    /// Returns `None` when nothing matches; that is the common case and not an
    /// error.
    pub fn recognize(&mut self, key: K, stroke: &Stroke) -> Option<ShapeRecognizerResult<K>> {
        if !self.is_large_enough(stroke) {
            return None;
        }
        let points: Vec<Point> = stroke.positions().collect();

        if let Some(mut poly) = find_polygonal(
            &points,
            0,
            points.len() - 1,
            self.config.max_polygon_sides,
            self.config.line_max_det,
        ) {
            optimize_polygonal(&points, &mut poly);
            let n = poly.side_count();
            for (i, (s, w)) in poly.sides().iter().zip(poly.breaks().windows(2)).enumerate() {
                tracing::trace!(
                    side = i,
                    from = w[0],
                    to = w[1],
                    mass = s.mass(),
                    det = s.det(),
                    "polygon side"
                );
            }

            self.make_room(n);
            tracing::debug!(queued = self.queue.len(), added = n, "queueing sides");
            let first = self.queue.len();
            for (s, w) in poly.sides().iter().zip(poly.breaks().windows(2)) {
                self.queue
                    .push(RecoSegment::fit(&points, w[0], w[1], s).with_stroke(key));
            }

            if let Some(corners) = try_rectangle(&mut self.queue, &self.config) {
                let mut shape = Stroke::new(*stroke.style());
                for p in corners {
                    shape.push_point(p);
                }
                shape.push_point(corners[0]);
                let mut result = ShapeRecognizerResult::new(shape, ShapeKind::Rectangle);
                // Only a rectangle spanning several strokes consumes any.
                let sides = &self.queue[self.queue.len() - 4..];
                if sides.iter().any(|seg| seg.stroke.is_some_and(|k| k != key)) {
                    for k in sides.iter().filter_map(|seg| seg.stroke) {
                        result.add_source_stroke(k);
                    }
                }
                self.reset();
                tracing::debug!(sources = result.source_strokes().len(), "rectangle");
                return Some(result);
            }

            if n == 1 {
                let line = self.snap_line(first, stroke);
                tracing::debug!("line");
                return Some(ShapeRecognizerResult::new(line, ShapeKind::Line));
            }
        }

        let circle = recognize_circle(stroke, &self.config)?;
        tracing::debug!("circle");
        Some(ShapeRecognizerResult::new(circle, ShapeKind::Circle))
    }

    fn is_large_enough(&self, stroke: &Stroke) -> bool {
        if stroke.point_count() < MIN_POINTS {
            return false;
        }
        if self.config.min_stroke_size <= 0.0 {
            return true;
        }
        let bounds = stroke.bounding_box();
        Vec2::new(bounds.width(), bounds.height()).hypot() >= self.config.min_stroke_size
    }

    /// Evict whole strokes' worth of sides until `incoming` more fit.
    fn make_room(&mut self, incoming: usize) {
        let capacity = self.config.max_polygon_sides;
        while !self.queue.is_empty() && self.queue.len() + incoming > capacity {
            // The oldest stroke's run ends where the next stroke's run starts.
            let run = self
                .queue
                .iter()
                .skip(1)
                .position(|s| s.start == 0)
                .map_or(self.queue.len(), |i| i + 1);
            tracing::debug!(run, "evicting oldest stroke");
            self.queue.drain(..run);
        }
    }

    /// Turn the single side at `index` into a two-point line.
    ///
    /// Nearly horizontal or vertical sides are snapped onto the axis through
    /// their center, and the queued side is updated to match. Other sides keep
    /// the stroke's own first and last points.
    fn snap_line(&mut self, index: usize, stroke: &Stroke) -> Stroke {
        let slant = self.config.slant_tolerance;
        let seg = &mut self.queue[index];
        let aligned = if seg.angle.abs() < slant {
            seg.angle = 0.0;
            seg.p1.y = seg.center.y;
            seg.p2.y = seg.center.y;
            true
        } else if seg.angle.abs() > FRAC_PI_2 - slant {
            seg.angle = if seg.angle > 0.0 { FRAC_PI_2 } else { -FRAC_PI_2 };
            seg.p1.x = seg.center.x;
            seg.p2.x = seg.center.x;
            true
        } else {
            false
        };

        let mut line = Stroke::new(*stroke.style());
        if aligned {
            line.push_point(seg.p1);
            line.push_point(seg.p2);
        } else {
            let points = stroke.points();
            line.push_point(points[0].pos);
            line.push_point(points[points.len() - 1].pos);
        }
        line
    }
}
