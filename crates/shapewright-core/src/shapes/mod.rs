//! Shape definitions for the editor.
//!
//! Every shape is a closed [`BezPath`] with a fill colour and an optional
//! outline. Rectangles, ellipses and triangles only differ in the path they
//! start with; afterwards they are moved, resized, reflected and composed
//! uniformly.

mod boolean;
mod ellipse;
mod rectangle;
mod triangle;

pub use boolean::{AREA_EPSILON, CompositionOp, FLATTEN_TOLERANCE, compose_paths};
pub use ellipse::{KAPPA, ellipse_path};
pub use rectangle::rectangle_path;
pub use triangle::triangle_path;

use kurbo::{Affine, BezPath, Point, Rect, Shape as KurboShape, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque RGB colour (8 bits per channel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pack into a signed 32-bit ARGB value with full alpha.
    pub fn to_argb(self) -> i32 {
        let packed =
            0xFF00_0000u32 | (u32::from(self.r) << 16) | (u32::from(self.g) << 8) | u32::from(self.b);
        packed as i32
    }

    /// Unpack a 32-bit ARGB value. The alpha byte is ignored.
    pub fn from_argb(argb: i32) -> Self {
        let bits = argb as u32;
        Self {
            r: ((bits >> 16) & 0xFF) as u8,
            g: ((bits >> 8) & 0xFF) as u8,
            b: (bits & 0xFF) as u8,
        }
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<Color> for Rgb {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self::new(rgba.r, rgba.g, rgba.b)
    }
}

impl From<Rgb> for Color {
    fn from(color: Rgb) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, 255)
    }
}

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Kinds of shape the creation gesture can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    /// Drag from one corner to the opposite one.
    Rectangle,
    /// Drag out the bounding box.
    Ellipse,
    /// Three clicks, one per vertex.
    Triangle,
}

impl ShapeKind {
    /// Number of clicked points needed to build the shape, or `None` for
    /// drag-based shapes.
    pub fn click_points(self) -> Option<usize> {
        match self {
            ShapeKind::Triangle => Some(3),
            ShapeKind::Rectangle | ShapeKind::Ellipse => None,
        }
    }

    /// Status line shown while the shape is being created.
    pub fn help(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => {
                "Rectangle creation. Click, drag and drop to create the rectangle."
            }
            ShapeKind::Ellipse => "Ellipse creation. Click, drag and drop to create the ellipse.",
            ShapeKind::Triangle => {
                "Triangle creation. Click 3 times to create the 3 points of the triangle."
            }
        }
    }

    /// Build the initial path spanned by a drag from `start` to `end`.
    /// Returns `None` for click-based kinds.
    pub fn drag_path(self, start: Point, end: Point) -> Option<BezPath> {
        match self {
            ShapeKind::Rectangle => Some(rectangle_path(Rect::from_points(start, end))),
            ShapeKind::Ellipse => Some(ellipse_path(Rect::from_points(start, end))),
            ShapeKind::Triangle => None,
        }
    }
}

/// Axis used by [`Shape::reflect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// Mirror across the horizontal line through the centre (top and bottom swap).
    X,
    /// Mirror across the vertical line through the centre (left and right swap).
    Y,
}

/// A filled vector region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub(crate) id: ShapeId,
    /// Closed outline of the region, possibly with several contours.
    pub path: BezPath,
    /// Interior colour.
    pub fill: Rgb,
    /// Outline colour.
    pub outline: Rgb,
    /// Outline thickness; 0 means no outline.
    pub outline_thickness: u32,
}

impl Shape {
    /// Create a black shape without outline.
    pub fn new(path: BezPath) -> Self {
        Self {
            id: Uuid::new_v4(),
            path,
            fill: Rgb::BLACK,
            outline: Rgb::BLACK,
            outline_thickness: 0,
        }
    }

    /// Create a shape with explicit colours.
    pub fn with_style(path: BezPath, fill: Rgb, outline_thickness: u32, outline: Rgb) -> Self {
        Self {
            fill,
            outline,
            outline_thickness,
            ..Self::new(path)
        }
    }

    /// Rectangle spanned by two opposite corners.
    pub fn rectangle(p1: Point, p2: Point) -> Self {
        Self::new(rectangle_path(Rect::from_points(p1, p2)))
    }

    /// Ellipse inscribed in the box spanned by two opposite corners.
    pub fn ellipse(p1: Point, p2: Point) -> Self {
        Self::new(ellipse_path(Rect::from_points(p1, p2)))
    }

    /// Triangle through three vertices.
    pub fn triangle(a: Point, b: Point, c: Point) -> Self {
        Self::new(triangle_path(a, b, c))
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    /// Give the shape a fresh identifier.
    pub fn regenerate_id(&mut self) {
        self.id = Uuid::new_v4();
    }

    /// Axis-aligned bounding box of the path.
    pub fn bounds(&self) -> Rect {
        self.path.bounding_box()
    }

    /// Whether the path has no contours left.
    pub fn is_empty(&self) -> bool {
        self.path.elements().is_empty()
    }

    /// Enclosed area (non-zero winding, holes subtracted).
    pub fn area(&self) -> f64 {
        self.path.area().abs()
    }

    /// Check if a point lies inside the region.
    pub fn contains(&self, point: Point) -> bool {
        !self.is_empty() && self.path.contains(point)
    }

    /// Apply an affine transform to the geometry.
    pub fn transform(&mut self, affine: Affine) {
        self.path.apply_affine(affine);
    }

    /// Translate the shape.
    pub fn translate(&mut self, delta: Vec2) {
        self.transform(Affine::translate(delta));
    }

    /// Scale the shape relative to the origin.
    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.transform(Affine::scale_non_uniform(sx, sy));
    }

    /// Rotate the shape around `center` by `degrees`.
    pub fn rotate(&mut self, degrees: f64, center: Point) {
        self.transform(Affine::rotate_about(degrees.to_radians(), center));
    }

    /// Mirror the shape in place; the bounding box is unchanged.
    pub fn reflect(&mut self, axis: Axis) {
        let bounds = self.bounds();
        let affine = match axis {
            Axis::X => Affine::new([1.0, 0.0, 0.0, -1.0, 0.0, bounds.y0 + bounds.y1]),
            Axis::Y => Affine::new([-1.0, 0.0, 0.0, 1.0, bounds.x0 + bounds.x1, 0.0]),
        };
        self.transform(affine);
    }

    /// Copy of this shape with a new identifier.
    pub fn duplicate(&self) -> Self {
        let mut copy = self.clone();
        copy.regenerate_id();
        copy
    }

    /// Result of combining this shape with `other`, keeping this shape's colours.
    pub fn composed(&self, other: &Shape, op: CompositionOp) -> Shape {
        Shape {
            path: compose_paths(&self.path, &other.path, op),
            ..self.clone()
        }
    }
}
