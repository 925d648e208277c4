// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A minimal ink stroke model.
//!
//! The recognizer only needs the point geometry of a stroke and the handful of
//! style attributes it copies onto synthesized shapes. Hosts are expected to
//! convert their own stroke representation into a [`Stroke`] (or keep one
//! alongside) before calling the recognizer.

use alloc::vec::Vec;

use kurbo::{BezPath, Point, Rect};

/// A single sampled point of a stroke.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokePoint {
    /// Position in document coordinates.
    pub pos: Point,
    /// Stylus pressure, when the input device reports one.
    pub pressure: Option<f64>,
}

impl StrokePoint {
    /// A point without pressure information.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            pos: Point::new(x, y),
            pressure: None,
        }
    }

    /// A point carrying a pressure sample.
    #[must_use]
    pub const fn with_pressure(x: f64, y: f64, pressure: f64) -> Self {
        Self {
            pos: Point::new(x, y),
            pressure: Some(pressure),
        }
    }
}

impl From<Point> for StrokePoint {
    fn from(pos: Point) -> Self {
        Self {
            pos,
            pressure: None,
        }
    }
}

impl From<(f64, f64)> for StrokePoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Which drawing tool produced a stroke.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum ToolType {
    /// Regular opaque pen.
    #[default]
    Pen,
    /// Translucent highlighter.
    Highlighter,
}

/// Style attributes that synthesized shapes inherit from their source stroke.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Nominal stroke width in document units.
    pub width: f64,
    /// Packed `0xRRGGBBAA` color.
    pub color: u32,
    /// Tool that drew the stroke.
    pub tool: ToolType,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: 1.0,
            color: 0x0000_00ff,
            tool: ToolType::Pen,
        }
    }
}

/// An ordered sequence of points plus style.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stroke {
    points: Vec<StrokePoint>,
    style: StrokeStyle,
}

impl Stroke {
    /// Create an empty stroke with the given style.
    #[must_use]
    pub const fn new(style: StrokeStyle) -> Self {
        Self {
            points: Vec::new(),
            style,
        }
    }

    /// Create a stroke from an iterator of points.
    pub fn from_points<I, P>(style: StrokeStyle, points: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<StrokePoint>,
    {
        Self {
            points: points.into_iter().map(Into::into).collect(),
            style,
        }
    }

    /// Number of sampled points.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// The point at `index`, if any.
    #[must_use]
    pub fn point(&self, index: usize) -> Option<StrokePoint> {
        self.points.get(index).copied()
    }

    /// All points, in drawing order.
    #[must_use]
    pub fn points(&self) -> &[StrokePoint] {
        &self.points
    }

    /// Point positions, in drawing order, without pressure.
    pub fn positions(&self) -> impl ExactSizeIterator<Item = Point> + '_ {
        self.points.iter().map(|p| p.pos)
    }

    /// Append a point.
    pub fn push_point(&mut self, point: impl Into<StrokePoint>) {
        self.points.push(point.into());
    }

    /// The stroke's style.
    #[must_use]
    pub const fn style(&self) -> &StrokeStyle {
        &self.style
    }

    /// Copy width, color and tool from `other`. Points are left untouched.
    pub fn apply_style_from(&mut self, other: &Self) {
        self.style = other.style;
    }

    /// Tight bounds of the point positions; an empty stroke yields `Rect::ZERO`.
    #[must_use]
    pub fn bounding_box(&self) -> Rect {
        let mut positions = self.positions();
        let Some(first) = positions.next() else {
            return Rect::ZERO;
        };
        positions.fold(Rect::from_points(first, first), |r, p| r.union_pt(p))
    }

    /// The stroke as an open polyline path, for hosts that render through `kurbo`.
    #[must_use]
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut positions = self.positions();
        if let Some(first) = positions.next() {
            path.move_to(first);
            for p in positions {
                path.line_to(p);
            }
        }
        path
    }
}
