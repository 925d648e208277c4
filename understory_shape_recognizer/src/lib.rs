// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Shape Recognizer: turn freehand pen strokes into clean shapes.
//!
//! Given a finished stroke, [`ShapeRecognizer`] decides whether it
//! approximates a straight line, a rectangle or a circle, and if so returns a
//! synthetic replacement stroke. Rectangles may be drawn in up to four
//! separate strokes; the recognizer remembers recent straight sides and
//! reports which earlier strokes the rectangle absorbs.
//!
//! Everything is closed-form geometry over the stroke's points: mass-weighted
//! moments ([`Inertia`]) fit lines and circles without iteration, and a
//! recursive split ([`polygonal::find_polygonal`]) finds straight sides.
//!
//! # Example
//!
//! ```rust
//! use understory_shape_recognizer::{ShapeKind, ShapeRecognizer, Stroke, StrokeStyle};
//!
//! let mut reco = ShapeRecognizer::<u32>::new();
//!
//! // A wobbly but clearly straight stroke.
//! let stroke = Stroke::from_points(
//!     StrokeStyle::default(),
//!     (0..=40).map(|i| (f64::from(i) * 2.0, 0.05 * f64::from(i % 3))),
//! );
//! let result = reco.recognize(1, &stroke).expect("a line");
//! assert_eq!(result.kind(), ShapeKind::Line);
//! assert_eq!(result.recognized_shape().point_count(), 2);
//! ```
//!
//! Rectangles can span several strokes; the result names the strokes it
//! replaces:
//!
//! ```rust
//! use understory_shape_recognizer::{ShapeKind, ShapeRecognizer, Stroke, StrokeStyle};
//!
//! fn side(from: (f64, f64), to: (f64, f64)) -> Stroke {
//!     let pts = (0..=30).map(|k| {
//!         let t = f64::from(k) / 30.0;
//!         (from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t)
//!     });
//!     Stroke::from_points(StrokeStyle::default(), pts)
//! }
//!
//! let mut reco = ShapeRecognizer::<u32>::new();
//! reco.recognize(1, &side((0.0, 0.0), (60.0, 0.0)));
//! reco.recognize(2, &side((60.0, 0.0), (60.0, 30.0)));
//! reco.recognize(3, &side((60.0, 30.0), (0.0, 30.0)));
//! let rect = reco.recognize(4, &side((0.0, 30.0), (0.0, 0.0))).expect("a rectangle");
//! assert_eq!(rect.kind(), ShapeKind::Rectangle);
//! assert_eq!(rect.source_strokes(), &[1, 2, 3, 4]);
//! ```
//!
//! ## Features
//!
//! - `std` *(default)*: use `std` floating point and enable `tracing/std`.
//! - `libm`: `no_std` floating point through `kurbo/libm`.
//!
//! Decisions are logged through [`tracing`] at `debug` level, with per-side
//! fitting details at `trace` level.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod circle;
mod config;
mod inertia;
pub mod polygonal;
mod recognizer;
pub mod rectangle;
mod result;
mod segment;
mod stroke;

pub use config::{
    DEFAULT_CIRCLE_MAX_SCORE, DEFAULT_CIRCLE_MIN_DET, DEFAULT_LINE_MAX_DET,
    DEFAULT_MAX_POLYGON_SIDES, DEFAULT_RECTANGLE_ANGLE_TOLERANCE,
    DEFAULT_RECTANGLE_LINEAR_TOLERANCE, DEFAULT_SLANT_TOLERANCE, RecognizerConfig,
};
pub use inertia::Inertia;
pub use recognizer::{RecognizerState, ShapeRecognizer};
pub use result::{ShapeKind, ShapeRecognizerResult};
pub use segment::RecoSegment;
pub use stroke::{Stroke, StrokePoint, StrokeStyle, ToolType};
