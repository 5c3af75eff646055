//! Document model: an ordered shape list plus a background.

use crate::shapes::{Rgb, Shape, ShapeId};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Reference to an externally decoded background image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Path the image was loaded from.
    pub path: String,
}

impl ImageRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// Canvas background: a solid colour or an image, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Background {
    Color(Rgb),
    Image(ImageRef),
}

impl Default for Background {
    fn default() -> Self {
        Background::Color(Rgb::WHITE)
    }
}

/// Stacking order change for a single shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DepthAction {
    /// Topmost.
    ToFront,
    /// One layer up.
    Forward,
    /// One layer down.
    Backward,
    /// Bottommost.
    ToBack,
}

/// The full editable state: background plus shapes back to front.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Shapes in paint order; the last one is on top.
    shapes: Vec<Shape>,
    pub background: Background,
    /// Set by every mutation, cleared on save.
    #[serde(skip)]
    modified: bool,
}

impl Document {
    /// Create an empty document with a white background.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shape on top. Returns its id.
    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id();
        self.shapes.push(shape);
        self.modified = true;
        id
    }

    /// Remove a shape by ID.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        let pos = self.position(id)?;
        self.modified = true;
        Some(self.shapes.remove(pos))
    }

    /// Index of a shape in paint order.
    pub fn position(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.id() == id)
    }

    pub fn get_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    /// Mutable access; marks the document modified.
    pub fn get_shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        let shape = self.shapes.iter_mut().find(|s| s.id() == id)?;
        self.modified = true;
        Some(shape)
    }

    /// Shapes back to front.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Topmost shape containing `point`.
    pub fn shape_at_point(&self, point: Point) -> Option<ShapeId> {
        self.shapes
            .iter()
            .rev()
            .find(|s| s.contains(point))
            .map(Shape::id)
    }

    /// Change the stacking position of a shape.
    /// Returns true if the order changed.
    pub fn adjust_depth(&mut self, id: ShapeId, action: DepthAction) -> bool {
        let Some(pos) = self.position(id) else {
            return false;
        };
        let last = self.shapes.len() - 1;
        let target = match action {
            DepthAction::ToFront => last,
            DepthAction::Forward => (pos + 1).min(last),
            DepthAction::Backward => pos.saturating_sub(1),
            DepthAction::ToBack => 0,
        };
        if target == pos {
            return false;
        }
        let shape = self.shapes.remove(pos);
        self.shapes.insert(target, shape);
        self.modified = true;
        true
    }

    pub fn set_background_color(&mut self, color: Rgb) {
        self.background = Background::Color(color);
        self.modified = true;
    }

    pub fn set_background_image(&mut self, image: ImageRef) {
        self.background = Background::Image(image);
        self.modified = true;
    }

    /// Clear to an empty document with a white background.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Record that the current state has been persisted.
    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
