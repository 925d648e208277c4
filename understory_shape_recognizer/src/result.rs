// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The outcome of a successful recognition.

use smallvec::SmallVec;

use crate::Stroke;

/// What kind of shape replaced the input stroke.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ShapeKind {
    /// A two-point straight line.
    Line,
    /// A closed four-corner outline, possibly assembled from several strokes.
    Rectangle,
    /// A closed polyline approximating a circle.
    Circle,
}

/// A synthesized shape plus the earlier strokes it absorbs.
///
/// The host replaces the input stroke with [`recognized_shape`](Self::recognized_shape)
/// and removes every stroke named in [`source_strokes`](Self::source_strokes)
/// from its document, ideally as a single undoable action.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeRecognizerResult<K> {
    shape: Stroke,
    kind: ShapeKind,
    sources: SmallVec<[K; 4]>,
}

impl<K: Copy + Eq> ShapeRecognizerResult<K> {
    /// A result that consumes no earlier strokes.
    #[must_use]
    pub fn new(shape: Stroke, kind: ShapeKind) -> Self {
        Self {
            shape,
            kind,
            sources: SmallVec::new(),
        }
    }

    /// Record `key` as consumed. Keys already recorded are ignored.
    pub fn add_source_stroke(&mut self, key: K) {
        if !self.sources.contains(&key) {
            self.sources.push(key);
        }
    }

    /// The replacement shape.
    #[must_use]
    pub const fn recognized_shape(&self) -> &Stroke {
        &self.shape
    }

    /// Take ownership of the replacement shape.
    #[must_use]
    pub fn into_recognized_shape(self) -> Stroke {
        self.shape
    }

    /// The kind of the replacement shape.
    #[must_use]
    pub const fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Keys of strokes folded into the shape, each at most once, oldest first.
    ///
    /// Empty unless the shape was assembled from more than one stroke; then it
    /// also names the stroke that completed it.
    #[must_use]
    pub fn source_strokes(&self) -> &[K] {
        &self.sources
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StrokeStyle;

    #[test]
    fn duplicate_sources_are_ignored() {
        let mut r = ShapeRecognizerResult::new(Stroke::new(StrokeStyle::default()), ShapeKind::Rectangle);
        for key in [3_u32, 1, 3, 2, 1] {
            r.add_source_stroke(key);
        }
        assert_eq!(r.source_strokes(), &[3, 1, 2]);
        assert_eq!(r.kind(), ShapeKind::Rectangle);
    }

    #[test]
    fn shape_is_handed_off() {
        let shape = Stroke::from_points(StrokeStyle::default(), [(0.0, 0.0), (5.0, 0.0)]);
        let r = ShapeRecognizerResult::<u32>::new(shape.clone(), ShapeKind::Line);
        assert!(r.source_strokes().is_empty());
        assert_eq!(r.recognized_shape(), &shape);
        assert_eq!(r.into_recognized_shape(), shape);
    }
}
