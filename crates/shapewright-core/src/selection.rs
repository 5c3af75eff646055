//! Resize handles and hit-zone classification around a selected shape.

use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Width of the band around a bounding box edge that grabs a handle.
pub const HANDLE_MARGIN: f64 = 10.0;

/// One of the eight compass handles of a bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handle {
    N,
    S,
    E,
    W,
    NE,
    NW,
    SE,
    SW,
}

/// Which end of an axis a handle drags. `Min` is left (x) or top (y).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Min,
    Max,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Min => Side::Max,
            Side::Max => Side::Min,
        }
    }
}

impl Handle {
    pub const ALL: [Handle; 8] = [
        Handle::NW,
        Handle::N,
        Handle::NE,
        Handle::E,
        Handle::SE,
        Handle::S,
        Handle::SW,
        Handle::W,
    ];

    /// Horizontal edge driven by this handle, if any.
    pub fn x_side(self) -> Option<Side> {
        match self {
            Handle::W | Handle::NW | Handle::SW => Some(Side::Min),
            Handle::E | Handle::NE | Handle::SE => Some(Side::Max),
            Handle::N | Handle::S => None,
        }
    }

    /// Vertical edge driven by this handle, if any.
    pub fn y_side(self) -> Option<Side> {
        match self {
            Handle::N | Handle::NW | Handle::NE => Some(Side::Min),
            Handle::S | Handle::SW | Handle::SE => Some(Side::Max),
            Handle::E | Handle::W => None,
        }
    }

    /// Handle driving the given pair of edges. `None` when neither axis is driven.
    pub fn from_sides(x: Option<Side>, y: Option<Side>) -> Option<Self> {
        use Side::{Max, Min};
        match (x, y) {
            (Some(Min), Some(Min)) => Some(Handle::NW),
            (Some(Max), Some(Min)) => Some(Handle::NE),
            (Some(Min), Some(Max)) => Some(Handle::SW),
            (Some(Max), Some(Max)) => Some(Handle::SE),
            (Some(Min), None) => Some(Handle::W),
            (Some(Max), None) => Some(Handle::E),
            (None, Some(Min)) => Some(Handle::N),
            (None, Some(Max)) => Some(Handle::S),
            (None, None) => None,
        }
    }

    /// Mirror across the vertical midline (W <-> E).
    pub fn flipped_x(self) -> Self {
        Self::from_sides(self.x_side().map(Side::opposite), self.y_side()).unwrap_or(self)
    }

    /// Mirror across the horizontal midline (N <-> S).
    pub fn flipped_y(self) -> Self {
        Self::from_sides(self.x_side(), self.y_side().map(Side::opposite)).unwrap_or(self)
    }
}

/// Where a pointer sits relative to a selected shape's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitZone {
    /// Beyond the margin band; pressing here deselects.
    Outside,
    /// Inside the box shrunk by the margin; pressing here starts a move.
    Inner,
    /// Inside a margin band; pressing here starts a resize.
    Handle(Handle),
}

/// Classify `point` against `bounds` with a margin band of width `margin`.
pub fn classify(bounds: Rect, point: Point, margin: f64) -> HitZone {
    let band = bounds.inflate(margin, margin);
    if point.x < band.x0 || point.x > band.x1 || point.y < band.y0 || point.y > band.y1 {
        return HitZone::Outside;
    }
    if point.x > bounds.x0 + margin
        && point.x < bounds.x1 - margin
        && point.y > bounds.y0 + margin
        && point.y < bounds.y1 - margin
    {
        return HitZone::Inner;
    }

    let x = nearer_side(point.x, bounds.x0, bounds.x1, margin);
    let y = nearer_side(point.y, bounds.y0, bounds.y1, margin);
    match Handle::from_sides(x, y) {
        Some(handle) => HitZone::Handle(handle),
        None => HitZone::Inner,
    }
}

fn nearer_side(value: f64, lo: f64, hi: f64, margin: f64) -> Option<Side> {
    let to_lo = (value - lo).abs();
    let to_hi = (value - hi).abs();
    match (to_lo <= margin, to_hi <= margin) {
        (true, true) if to_hi < to_lo => Some(Side::Max),
        (true, _) => Some(Side::Min),
        (false, true) => Some(Side::Max),
        (false, false) => None,
    }
}

/// Bookkeeping for a move or resize gesture, reset at every pointer-down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    /// Pointer position the next increment is measured from.
    pub origin: Point,
    /// Pointer position relative to the bounding box origin.
    pub pointer_offset: Vec2,
    /// Bounding box size at the start of the gesture, refreshed after a flip.
    pub start_size: Size,
    /// Whether any increment changed the shape.
    pub moved: bool,
}

impl DragState {
    pub fn begin(pointer: Point, bounds: Rect) -> Self {
        Self {
            origin: pointer,
            pointer_offset: pointer - bounds.origin(),
            start_size: bounds.size(),
            moved: false,
        }
    }
}
