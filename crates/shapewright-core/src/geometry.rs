//! Stateless geometry for move, resize and duplicate placement.
//!
//! Every function keeps the manipulated shape inside the canvas
//! `[0, width] x [0, height]` and never lets a resize collapse a bounding box
//! to `min_size` or below.

use crate::selection::{DragState, Handle, Side};
use crate::shapes::Shape;
use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Smallest width or height a resize may produce.
pub const MIN_SIZE: f64 = 2.0;

/// Distance a duplicate is shifted from its original.
pub const DUPLICATE_OFFSET: f64 = 10.0;

/// Clamp a point into the canvas rectangle.
pub fn clamp_to_canvas(point: Point, canvas: Size) -> Point {
    Point::new(
        point.x.max(0.0).min(canvas.width),
        point.y.max(0.0).min(canvas.height),
    )
}

/// Whether `rect` lies entirely inside the canvas.
pub fn rect_within(rect: Rect, canvas: Size) -> bool {
    rect.x0 >= 0.0 && rect.y0 >= 0.0 && rect.x1 <= canvas.width && rect.y1 <= canvas.height
}

/// Correct a move pointer so the dragged box stays on the canvas.
///
/// `offset` is the pointer position inside the box captured at drag start and
/// `size` the box size. A box larger than the canvas is pinned to the origin.
pub fn clamp_move_pointer(pointer: Point, offset: Vec2, size: Size, canvas: Size) -> Point {
    Point::new(
        clamp_move_axis(pointer.x, offset.x, size.width, canvas.width),
        clamp_move_axis(pointer.y, offset.y, size.height, canvas.height),
    )
}

fn clamp_move_axis(value: f64, offset: f64, extent: f64, canvas: f64) -> f64 {
    let max = canvas - (extent - offset);
    if max < offset {
        offset
    } else {
        value.clamp(offset, max)
    }
}

/// One increment of a move gesture. Returns the translation applied.
pub fn move_step(shape: &mut Shape, drag: &mut DragState, pointer: Point, canvas: Size) -> Vec2 {
    let size = shape.bounds().size();
    let corrected = clamp_move_pointer(pointer, drag.pointer_offset, size, canvas);
    let delta = corrected - drag.origin;
    if delta != Vec2::ZERO {
        shape.translate(delta);
        drag.moved = true;
    }
    drag.origin = corrected;
    delta
}

/// Offset for a duplicate of a shape with `bounds`: forward if the copy fits,
/// backward if only that fits, otherwise on top of the original.
pub fn duplicate_offset(bounds: Rect, canvas: Size, offset: f64) -> Vec2 {
    let forward = Vec2::new(offset, offset);
    if rect_within(bounds + forward, canvas) {
        forward
    } else if rect_within(bounds - forward, canvas) {
        -forward
    } else {
        Vec2::ZERO
    }
}

/// Outcome of one resize increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeStep {
    /// Handle in effect after the increment.
    pub handle: Handle,
    /// Whether the handle flipped to the opposite side on some axis.
    pub flipped: bool,
    /// Whether the shape geometry changed.
    pub changed: bool,
}

#[derive(Debug, Clone, Copy)]
struct AxisPlan {
    side: Option<Side>,
    /// Translation applied before scaling to keep the fixed edge anchored on a flip.
    compensation: f64,
    scale: f64,
    /// Edge displacement still to apply after compensation.
    residual: f64,
    /// Boundary-corrected pointer delta.
    delta: f64,
    committed: bool,
    flipped: bool,
}

impl AxisPlan {
    fn idle(side: Option<Side>, delta: f64) -> Self {
        Self {
            side,
            compensation: 0.0,
            scale: 1.0,
            residual: 0.0,
            delta,
            committed: false,
            flipped: false,
        }
    }
}

fn plan_axis(side: Option<Side>, lo: f64, hi: f64, raw: f64, extent: f64, min_size: f64) -> AxisPlan {
    let Some(active) = side else {
        return AxisPlan::idle(None, raw);
    };
    let size = hi - lo;
    let edge = match active {
        Side::Min => lo,
        Side::Max => hi,
    };
    let d = raw.max(-edge).min(extent - edge);
    if size <= f64::EPSILON {
        return AxisPlan::idle(side, d);
    }

    let (new_size, new_side, compensation, residual) = match active {
        Side::Min if d >= size => (d - size, Side::Max, size, d - 2.0 * size),
        Side::Min => (size - d, Side::Min, 0.0, d),
        Side::Max if -d >= size => (-d - size, Side::Min, -size, d + 2.0 * size),
        Side::Max => (size + d, Side::Max, 0.0, d),
    };
    if new_size <= min_size {
        log::debug!("resize guarded: size {new_size} <= {min_size}");
        return AxisPlan::idle(side, d);
    }

    let mut scale = match new_side {
        Side::Min => 1.0 - residual / size,
        Side::Max => 1.0 + residual / size,
    };
    if scale == 0.0 {
        scale = 1.0;
    }
    AxisPlan {
        side: Some(new_side),
        compensation,
        scale,
        residual,
        delta: d,
        committed: true,
        flipped: new_side != active,
    }
}

/// One increment of a resize gesture dragging `handle` to `pointer`.
///
/// Each axis is corrected so the dragged edge stays on the canvas. Dragging an
/// edge past the opposite one flips the handle and keeps the formerly fixed
/// edge in place. An axis whose size would drop to `min_size` or below is left
/// untouched and keeps its drag origin, so further dragging accumulates until
/// the edge has crossed far enough to flip.
pub fn resize_step(
    shape: &mut Shape,
    handle: Handle,
    drag: &mut DragState,
    pointer: Point,
    canvas: Size,
    min_size: f64,
) -> ResizeStep {
    let bounds = shape.bounds();
    let x = plan_axis(
        handle.x_side(),
        bounds.x0,
        bounds.x1,
        pointer.x - drag.origin.x,
        canvas.width,
        min_size,
    );
    let y = plan_axis(
        handle.y_side(),
        bounds.y0,
        bounds.y1,
        pointer.y - drag.origin.y,
        canvas.height,
        min_size,
    );

    if x.committed || y.committed {
        let compensation = Vec2::new(x.compensation, y.compensation);
        if compensation != Vec2::ZERO {
            shape.translate(compensation);
        }
        let center = shape.bounds().center().to_vec2();
        let half = Vec2::new(
            if x.committed { x.residual / 2.0 } else { 0.0 },
            if y.committed { y.residual / 2.0 } else { 0.0 },
        );
        let affine = Affine::translate(half)
            * Affine::translate(center)
            * Affine::scale_non_uniform(x.scale, y.scale)
            * Affine::translate(-center);
        shape.transform(affine);
        drag.moved = true;
    }

    if x.committed || x.side.is_none() {
        drag.origin.x += x.delta;
    }
    if y.committed || y.side.is_none() {
        drag.origin.y += y.delta;
    }

    let flipped = x.flipped || y.flipped;
    let mut new_handle = handle;
    if x.flipped {
        new_handle = new_handle.flipped_x();
    }
    if y.flipped {
        new_handle = new_handle.flipped_y();
    }
    if flipped {
        let bounds = shape.bounds();
        drag.pointer_offset = drag.origin - bounds.origin();
        drag.start_size = bounds.size();
        log::debug!("resize handle flipped {handle:?} -> {new_handle:?}");
    }

    ResizeStep {
        handle: new_handle,
        flipped,
        changed: x.committed || y.committed,
    }
}
