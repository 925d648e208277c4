// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Feed a few hand-drawn strokes through the shape recognizer.
//!
//! This example shows:
//! - a single wobbly stroke snapping to a horizontal line,
//! - four separate strokes assembling into one rectangle,
//! - a closed round stroke becoming a circle,
//! - a scribble that matches nothing.
//!
//! Run:
//! - `cargo run -p understory_shape_demos --example recognize_strokes`

use std::collections::HashMap;

use kurbo::{Point, Vec2};
use understory_shape_recognizer::{
    ShapeRecognizer, ShapeRecognizerResult, Stroke, StrokeStyle, ToolType,
};

/// Stroke ids as a host document would hand them out.
type StrokeId = u32;

fn pen() -> StrokeStyle {
    StrokeStyle {
        width: 2.0,
        color: 0x2244_88ff,
        tool: ToolType::Pen,
    }
}

/// A slightly shaky straight stroke from `a` to `b`.
fn shaky_line(a: (f64, f64), b: (f64, f64), n: u32) -> Stroke {
    let (a, b) = (Point::from(a), Point::from(b));
    let normal = (b - a).normalize().turn_90();
    Stroke::from_points(
        pen(),
        (0..=n).map(|k| {
            let t = f64::from(k) / f64::from(n);
            let jitter = if k % 2 == 0 { 0.3 } else { -0.3 };
            a.lerp(b, t) + normal * jitter
        }),
    )
}

fn round(center: (f64, f64), r: f64, n: u32) -> Stroke {
    let center = Point::from(center);
    Stroke::from_points(
        pen(),
        (0..=n).map(|k| {
            let a = std::f64::consts::TAU * f64::from(k) / f64::from(n);
            center + Vec2::from_angle(a) * r
        }),
    )
}

fn report(
    doc: &mut HashMap<StrokeId, Stroke>,
    id: StrokeId,
    result: Option<ShapeRecognizerResult<StrokeId>>,
) {
    let Some(result) = result else {
        println!("stroke {id}: no shape, kept as drawn");
        return;
    };
    let drawn = doc.get(&id).map_or(0, Stroke::point_count);
    for source in result.source_strokes() {
        doc.remove(source);
    }
    let shape = result.into_recognized_shape();
    let corners: Vec<_> = shape
        .positions()
        .take(5)
        .map(|p| format!("({:.1}, {:.1})", p.x, p.y))
        .collect();
    println!(
        "stroke {id}: {drawn} points -> {} points: {}",
        shape.point_count(),
        corners.join(" "),
    );
    doc.insert(id, shape);
}

fn main() {
    let mut reco = ShapeRecognizer::<StrokeId>::new();
    let mut doc: HashMap<StrokeId, Stroke> = HashMap::new();
    let mut next_id = 0;

    let mut draw = |reco: &mut ShapeRecognizer<StrokeId>,
                    doc: &mut HashMap<StrokeId, Stroke>,
                    stroke: Stroke| {
        let id = next_id;
        next_id += 1;
        let result = reco.recognize(id, &stroke);
        let kind = result.as_ref().map(ShapeRecognizerResult::kind);
        doc.insert(id, stroke);
        report(doc, id, result);
        println!("  kind = {kind:?}, state = {:?}", reco.state());
    };

    println!("-- a single line --");
    draw(&mut reco, &mut doc, shaky_line((10.0, 50.0), (200.0, 52.0), 60));
    reco.reset();

    println!("-- a rectangle in four strokes --");
    draw(&mut reco, &mut doc, shaky_line((0.0, 0.0), (120.0, 0.0), 40));
    draw(&mut reco, &mut doc, shaky_line((120.0, 0.0), (120.0, 80.0), 30));
    draw(&mut reco, &mut doc, shaky_line((120.0, 80.0), (0.0, 80.0), 40));
    draw(&mut reco, &mut doc, shaky_line((0.0, 80.0), (0.0, 0.0), 30));

    println!("-- a circle --");
    draw(&mut reco, &mut doc, round((300.0, 300.0), 45.0, 90));

    println!("-- a scribble --");
    let scribble = Stroke::from_points(
        pen(),
        (0..30).map(|i| (f64::from(i) * 3.0, if i % 2 == 0 { 0.0 } else { 25.0 })),
    );
    draw(&mut reco, &mut doc, scribble);

    println!("document now holds {} strokes", doc.len());
}
