//! Triangle outline through three clicked vertices.

use kurbo::{BezPath, Point};

/// Closed path through `a`, `b` and `c` in click order.
pub fn triangle_path(a: Point, b: Point, c: Point) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(a);
    path.line_to(b);
    path.line_to(c);
    path.close_path();
    path
}
