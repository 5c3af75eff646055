//! Ellipse outline built from four cubic arcs.

use kurbo::{BezPath, Point, Rect};

/// Control-point distance for a quarter circle of radius 1.
pub const KAPPA: f64 = 0.552_284_8;

/// Closed path of the ellipse inscribed in `rect`, starting at the middle of
/// the left side.
pub fn ellipse_path(rect: Rect) -> BezPath {
    let rect = rect.abs();
    let (x, y) = (rect.x0, rect.y0);
    let ox = rect.width() / 2.0 * KAPPA;
    let oy = rect.height() / 2.0 * KAPPA;
    let xe = rect.x1;
    let ye = rect.y1;
    let xm = x + rect.width() / 2.0;
    let ym = y + rect.height() / 2.0;

    let mut path = BezPath::new();
    path.move_to(Point::new(x, ym));
    path.curve_to(Point::new(x, ym - oy), Point::new(xm - ox, y), Point::new(xm, y));
    path.curve_to(Point::new(xm + ox, y), Point::new(xe, ym - oy), Point::new(xe, ym));
    path.curve_to(Point::new(xe, ym + oy), Point::new(xm + ox, ye), Point::new(xm, ye));
    path.curve_to(Point::new(xm - ox, ye), Point::new(x, ym + oy), Point::new(x, ym));
    path.close_path();
    path
}
