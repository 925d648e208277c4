// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Assembling four straight sides into a rectangle.

use core::f64::consts::FRAC_PI_2;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Point;

use crate::{RecoSegment, RecognizerConfig};

/// Try to close the last four sides of `queue` into a rectangle.
///
/// The four sides must start a fresh decomposition (the first of them begins
/// at point `0` of its stroke), meet at roughly right angles, and have
/// corner gaps within [`RecognizerConfig::rectangle_linear_tolerance`] of
/// their sizes. On success the sides' `angle`s are rewritten to a common,
/// possibly axis-snapped orientation and the four corners are returned, in
/// side order. `reversed` is updated on the inspected sides even when the
/// attempt fails.
pub fn try_rectangle<K>(
    queue: &mut [RecoSegment<K>],
    config: &RecognizerConfig,
) -> Option<[Point; 4]> {
    let first = queue.len().checked_sub(4)?;
    let rs = &mut queue[first..];
    if rs[0].start != 0 {
        return None;
    }

    // Sides must meet at ~π/2, and each is oriented towards its successor.
    let mut avg_angle = 0.0;
    for i in 0..4 {
        let r1 = &rs[i];
        let r2 = &rs[(i + 1) % 4];
        if ((r1.angle - r2.angle).abs() - FRAC_PI_2).abs() > config.rectangle_angle_tolerance {
            return None;
        }
        // Angles are only defined modulo π; unwrap each onto the first side's frame.
        let turns = (i + 1) as f64 * FRAC_PI_2;
        avg_angle += r1.angle;
        if r2.angle > r1.angle {
            avg_angle += turns;
        } else {
            avg_angle -= turns;
        }
        let reversed = (r1.p2 - r1.p1).dot(r2.center - r1.center) < 0.0;
        rs[i].reversed = reversed;
    }

    // Corners must roughly meet.
    for i in 0..4 {
        let r1 = &rs[i];
        let r2 = &rs[(i + 1) % 4];
        let gap = r1.leading_end().distance(r2.trailing_end());
        if gap > config.rectangle_linear_tolerance * (r1.radius + r2.radius) {
            return None;
        }
    }

    avg_angle /= 4.0;
    if avg_angle.abs() < config.slant_tolerance {
        avg_angle = 0.0;
    }
    if avg_angle.abs() > FRAC_PI_2 - config.slant_tolerance {
        avg_angle = FRAC_PI_2;
    }

    for (i, r) in rs.iter_mut().enumerate() {
        r.angle = avg_angle + i as f64 * FRAC_PI_2;
    }
    Some(core::array::from_fn(|i| rs[i].edge_intersection(&rs[(i + 1) % 4])))
}
