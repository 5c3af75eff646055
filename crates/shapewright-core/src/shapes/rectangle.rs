//! Rectangle outline.

use kurbo::{BezPath, Point, Rect};

/// Closed path around `rect`, starting at the top-left corner and running
/// clockwise on screen: move, three lines, close.
pub fn rectangle_path(rect: Rect) -> BezPath {
    let rect = rect.abs();
    let mut path = BezPath::new();
    path.move_to(Point::new(rect.x0, rect.y0));
    path.line_to(Point::new(rect.x1, rect.y0));
    path.line_to(Point::new(rect.x1, rect.y1));
    path.line_to(Point::new(rect.x0, rect.y1));
    path.close_path();
    path
}
