//! Boolean region algebra over shape paths.
//!
//! Paths are flattened to polygons, combined with `csgrs` sketches and turned
//! back into closed line paths. Exterior contours come out with positive
//! signed area and holes with negative signed area, so `contains` and
//! [`kurbo::Shape::area`] agree on the result.

use csgrs::sketch::Sketch;
use csgrs::traits::CSG;
use kurbo::{BezPath, PathEl, Point};
use serde::{Deserialize, Serialize};

/// Maximum distance between a curve and its flattened polyline.
pub const FLATTEN_TOLERANCE: f64 = 0.1;

/// Contours with a smaller absolute area are dropped from results.
pub const AREA_EPSILON: f64 = 1e-6;

/// Boolean operation applied by a composition gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompositionOp {
    Union,
    Intersection,
    /// Receiver minus operand.
    Difference,
    /// Points in exactly one of the two regions.
    SymmetricDifference,
}

impl CompositionOp {
    /// Status line shown while waiting for the first operand.
    pub fn first_pick_help(self) -> &'static str {
        match self {
            CompositionOp::Union => "Union creation. Select a first shape.",
            CompositionOp::Intersection => "Intersection creation. Select a first shape.",
            CompositionOp::Difference => "Difference creation. Select a first shape.",
            CompositionOp::SymmetricDifference => {
                "Symmetric difference creation. Select a first shape."
            }
        }
    }

    /// Status line shown while waiting for the second operand.
    pub fn second_pick_help(self) -> &'static str {
        match self {
            CompositionOp::Union => {
                "Union creation. Select a second shape to create the union. The color and outline of the first selected shape will be applied."
            }
            CompositionOp::Intersection => {
                "Intersection creation. Select a second shape to create the intersection. The color and outline of the first selected shape will be applied."
            }
            CompositionOp::Difference => {
                "Difference creation. Select a second shape to create the difference. The color and outline of the first selected shape will be applied."
            }
            CompositionOp::SymmetricDifference => {
                "Symmetric difference creation. Select a second shape to create the xor. The color and outline of the first selected shape will be applied."
            }
        }
    }
}

/// Combine two closed paths. The result may be empty, disjoint or contain
/// holes; an empty result is a path without elements.
pub fn compose_paths(a: &BezPath, b: &BezPath, op: CompositionOp) -> BezPath {
    let sa = path_to_sketch(a);
    let sb = path_to_sketch(b);
    let result = match op {
        CompositionOp::Union => sa.union(&sb),
        CompositionOp::Intersection => sa.intersection(&sb),
        CompositionOp::Difference => sa.difference(&sb),
        CompositionOp::SymmetricDifference => symmetric_difference(&sa, &sb),
    };
    sketch_to_path(&result)
}

fn symmetric_difference(a: &Sketch<()>, b: &Sketch<()>) -> Sketch<()> {
    a.difference(b).union(&b.difference(a))
}

/// Split a path into flattened closed rings.
fn flatten_rings(path: &BezPath) -> Vec<Vec<[f64; 2]>> {
    let mut rings = Vec::new();
    let mut current: Vec<[f64; 2]> = Vec::new();

    kurbo::flatten(path.iter(), FLATTEN_TOLERANCE, |el| match el {
        PathEl::MoveTo(p) => {
            finish_ring(&mut rings, &mut current);
            current.push([p.x, p.y]);
        }
        PathEl::LineTo(p) => {
            if current.last() != Some(&[p.x, p.y]) {
                current.push([p.x, p.y]);
            }
        }
        PathEl::ClosePath => finish_ring(&mut rings, &mut current),
        // flatten only emits moves, lines and closes
        PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
    });
    finish_ring(&mut rings, &mut current);
    rings
}

fn finish_ring(rings: &mut Vec<Vec<[f64; 2]>>, current: &mut Vec<[f64; 2]>) {
    let mut ring = std::mem::take(current);
    if ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    if ring.len() >= 3 && ring_area(&ring).abs() >= AREA_EPSILON {
        rings.push(ring);
    }
}

/// Contours are folded even-odd, so nested contours become holes.
fn path_to_sketch(path: &BezPath) -> Sketch<()> {
    let mut sketch = Sketch::new();
    for ring in flatten_rings(path) {
        let polygon = Sketch::polygon(&ring, None);
        sketch = symmetric_difference(&sketch, &polygon);
    }
    sketch
}

fn sketch_to_path(sketch: &Sketch<()>) -> BezPath {
    let mut path = BezPath::new();
    let mp = sketch.to_multipolygon();
    for poly in mp.0 {
        let exterior: Vec<[f64; 2]> = poly.exterior().0.iter().map(|c| [c.x, c.y]).collect();
        push_ring(&mut path, exterior, true);
        for interior in poly.interiors() {
            let hole: Vec<[f64; 2]> = interior.0.iter().map(|c| [c.x, c.y]).collect();
            push_ring(&mut path, hole, false);
        }
    }
    path
}

fn push_ring(path: &mut BezPath, mut ring: Vec<[f64; 2]>, exterior: bool) {
    if ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    ring.dedup();
    if ring.len() < 3 {
        return;
    }
    let area = ring_area(&ring);
    if area.abs() < AREA_EPSILON {
        return;
    }
    if (area > 0.0) != exterior {
        ring.reverse();
    }

    let mut points = ring.into_iter().map(|[x, y]| Point::new(x, y));
    if let Some(first) = points.next() {
        path.move_to(first);
        for p in points {
            path.line_to(p);
        }
        path.close_path();
    }
}

/// Signed shoelace area, same sign convention as kurbo.
fn ring_area(ring: &[[f64; 2]]) -> f64 {
    let n = ring.len();
    let mut twice = 0.0;
    for i in 0..n {
        let [x0, y0] = ring[i];
        let [x1, y1] = ring[(i + 1) % n];
        twice += x0 * y1 - x1 * y0;
    }
    twice * 0.5
}
