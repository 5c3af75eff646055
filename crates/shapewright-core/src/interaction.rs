//! Pointer-driven editing state machine.
//!
//! The [`Editor`] owns the document and turns pointer events and commands
//! into document mutations. It never caches list positions: the selection is
//! a [`ShapeId`] resolved on every use.

use crate::codec::{self, CodecResult};
use crate::config::EditorConfig;
use crate::document::{DepthAction, Document, ImageRef};
use crate::geometry::{clamp_to_canvas, duplicate_offset, move_step, resize_step};
use crate::input::{MouseButton, PointerEvent};
use crate::selection::{DragState, Handle, HitZone, classify};
use crate::shapes::{AREA_EPSILON, Axis, CompositionOp, Rgb, Shape, ShapeId, ShapeKind};
use kurbo::{BezPath, Point, Rect, Size};

/// Current interaction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Neutral,
    /// Waiting for the drag or clicks that define a new shape.
    Creating(ShapeKind),
    Moving,
    Resizing(Handle),
    /// Picking the operands of a boolean operation. `first` is the receiver.
    Composing {
        op: CompositionOp,
        first: Option<ShapeId>,
    },
    /// Every click on a shape fills it with the colour.
    ApplyingColor(Rgb),
}

/// Notifications for the host (cursor, status line, redraw).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    SelectionChanged(Option<ShapeId>),
    /// The active resize handle changed; the cursor should follow.
    HandleChanged(Handle),
    /// Status line text, `None` to clear it.
    HelpText(Option<String>),
    DocumentModified,
}

/// Geometry of a shape being created, for the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum CreationPreview {
    /// Outline spanned by the current drag.
    Outline(BezPath),
    /// Clicked vertices followed by the pointer.
    Polyline(Vec<Point>),
}

/// Interactive editor over a single document.
#[derive(Debug, Clone)]
pub struct Editor {
    document: Document,
    config: EditorConfig,
    mode: Mode,
    selection: Option<ShapeId>,
    drag: Option<DragState>,
    /// Drag start of a rectangle or ellipse being created.
    create_start: Option<Point>,
    /// Clicked vertices of a shape being created.
    create_points: Vec<Point>,
    pointer_pressed: bool,
    events: Vec<EditorEvent>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            document: Document::new(),
            config,
            mode: Mode::Neutral,
            selection: None,
            drag: None,
            create_start: None,
            create_points: Vec::new(),
            pointer_pressed: false,
            events: Vec::new(),
        }
    }

    // ----- Queries -----

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn selection(&self) -> Option<ShapeId> {
        self.selection
    }

    pub fn selected_shape(&self) -> Option<&Shape> {
        self.selection.and_then(|id| self.document.get_shape(id))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Direct document access. A selection whose shape is removed resolves to nothing.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Zone of the selected shape under `point`, `Outside` without a selection.
    pub fn hit_zone(&self, point: Point) -> HitZone {
        match self.selected_shape() {
            Some(shape) => classify(shape.bounds(), point, self.config.handle_margin),
            None => HitZone::Outside,
        }
    }

    /// Shape under construction with the pointer at `pointer`.
    pub fn creation_preview(&self, pointer: Point) -> Option<CreationPreview> {
        let Mode::Creating(kind) = self.mode else {
            return None;
        };
        if kind.click_points().is_some() {
            if self.create_points.is_empty() {
                return None;
            }
            let mut points = self.create_points.clone();
            points.push(pointer);
            return Some(CreationPreview::Polyline(points));
        }
        let start = self.create_start?;
        kind.drag_path(start, pointer).map(CreationPreview::Outline)
    }

    /// Take the queued events.
    pub fn drain_events(&mut self) -> Vec<EditorEvent> {
        std::mem::take(&mut self.events)
    }

    // ----- Pointer intake -----

    pub fn handle_event(&mut self, event: PointerEvent, canvas: Size) {
        match event {
            PointerEvent::Down { position, button } => self.on_pointer_down(position, button, canvas),
            PointerEvent::Move { position } => self.on_pointer_move(position, canvas),
            PointerEvent::Up { position, button } => {
                if button == MouseButton::Left {
                    self.on_pointer_up(position, canvas);
                }
            }
        }
    }

    pub fn on_pointer_down(&mut self, point: Point, button: MouseButton, canvas: Size) {
        if button != MouseButton::Left {
            log::debug!("ignoring {button:?} press in {:?}", self.mode);
            return;
        }
        self.pointer_pressed = true;

        match self.mode {
            Mode::Neutral => self.press_neutral(point),
            Mode::Moving | Mode::Resizing(_) => {
                log::debug!("pointer-down during {:?}, gesture abandoned", self.mode);
                self.drag = None;
                self.mode = Mode::Neutral;
                self.press_neutral(point);
            }
            Mode::Creating(kind) => self.press_creating(kind, point, canvas),
            Mode::Composing { op, first } => self.press_composing(op, first, point),
            Mode::ApplyingColor(color) => self.press_apply_color(color, point),
        }
    }

    pub fn on_pointer_move(&mut self, point: Point, canvas: Size) {
        if !self.pointer_pressed {
            return;
        }
        match self.mode {
            Mode::Moving => {
                let Some(id) = self.selection else { return };
                let (Some(shape), Some(drag)) = (self.document.get_shape_mut(id), self.drag.as_mut())
                else {
                    return;
                };
                move_step(shape, drag, point, canvas);
            }
            Mode::Resizing(handle) => {
                let Some(id) = self.selection else { return };
                let min_size = self.config.min_size;
                let (Some(shape), Some(drag)) = (self.document.get_shape_mut(id), self.drag.as_mut())
                else {
                    return;
                };
                let step = resize_step(shape, handle, drag, point, canvas, min_size);
                if step.handle != handle {
                    self.mode = Mode::Resizing(step.handle);
                    self.events.push(EditorEvent::HandleChanged(step.handle));
                }
            }
            _ => {}
        }
    }

    pub fn on_pointer_up(&mut self, point: Point, canvas: Size) {
        // A release without a matching press (e.g. after a keyboard shortcut) is ignored.
        if !self.pointer_pressed {
            return;
        }
        self.pointer_pressed = false;

        match self.mode {
            Mode::Creating(kind) if kind.click_points().is_none() => {
                self.finish_drag_creation(kind, point, canvas);
                self.mode = Mode::Neutral;
                self.events.push(EditorEvent::HelpText(None));
            }
            Mode::Moving | Mode::Resizing(_) => {
                let moved = self.drag.take().is_some_and(|drag| drag.moved);
                self.mode = Mode::Neutral;
                if moved {
                    self.events.push(EditorEvent::DocumentModified);
                } else {
                    // A plain click picks the topmost shape, which may lie above the selection.
                    self.select_at(point);
                }
            }
            _ => {}
        }
    }

    fn press_neutral(&mut self, point: Point) {
        let Some(bounds) = self.selected_shape().map(Shape::bounds) else {
            self.select_at(point);
            return;
        };
        match classify(bounds, point, self.config.handle_margin) {
            HitZone::Outside => self.select_at(point),
            HitZone::Inner => {
                self.drag = Some(DragState::begin(point, bounds));
                self.mode = Mode::Moving;
            }
            HitZone::Handle(handle) => {
                self.drag = Some(DragState::begin(point, bounds));
                self.mode = Mode::Resizing(handle);
                self.events.push(EditorEvent::HandleChanged(handle));
            }
        }
    }

    fn press_creating(&mut self, kind: ShapeKind, point: Point, canvas: Size) {
        let point = clamp_to_canvas(point, canvas);
        let Some(needed) = kind.click_points() else {
            self.create_start = Some(point);
            return;
        };

        self.create_points.push(point);
        if self.create_points.len() < needed {
            return;
        }
        let points = std::mem::take(&mut self.create_points);
        if let [a, b, c] = points[..] {
            let triangle = Shape::triangle(a, b, c);
            let bounds = triangle.bounds();
            if triangle.area() < AREA_EPSILON
                || bounds.width() < self.config.min_size
                || bounds.height() < self.config.min_size
            {
                log::debug!("discarding degenerate triangle {a:?} {b:?} {c:?}");
            } else {
                let shape = self.styled(triangle.path);
                self.document.add_shape(shape);
                self.events.push(EditorEvent::DocumentModified);
            }
        }
        self.mode = Mode::Neutral;
        self.events.push(EditorEvent::HelpText(None));
    }

    fn finish_drag_creation(&mut self, kind: ShapeKind, point: Point, canvas: Size) {
        let Some(start) = self.create_start.take() else {
            return;
        };
        let end = clamp_to_canvas(point, canvas);
        let rect = Rect::from_points(start, end);
        if rect.width() < self.config.min_size || rect.height() < self.config.min_size {
            log::debug!("discarding {kind:?} smaller than minimum size: {rect:?}");
            return;
        }
        if let Some(path) = kind.drag_path(start, end) {
            let shape = self.styled(path);
            self.document.add_shape(shape);
            self.events.push(EditorEvent::DocumentModified);
        }
    }

    fn press_composing(&mut self, op: CompositionOp, first: Option<ShapeId>, point: Point) {
        let hit = self.document.shape_at_point(point);
        let Some(receiver) = first else {
            match hit {
                Some(id) => {
                    self.set_selection(Some(id));
                    self.mode = Mode::Composing {
                        op,
                        first: Some(id),
                    };
                    self.help(op.second_pick_help());
                }
                None => self.abort_composition(),
            }
            return;
        };

        match hit {
            Some(operand) if operand != receiver => self.apply_composition(op, receiver, operand),
            _ => self.abort_composition(),
        }
    }

    fn apply_composition(&mut self, op: CompositionOp, receiver: ShapeId, operand: ShapeId) {
        let (Some(a), Some(b)) = (
            self.document.get_shape(receiver),
            self.document.get_shape(operand),
        ) else {
            self.abort_composition();
            return;
        };
        let composed = a.composed(b, op);
        self.mode = Mode::Neutral;

        if composed.is_empty() {
            log::debug!("{op:?} produced an empty region, composition rejected");
            self.help("The composition produced an empty shape. Nothing was changed.");
            return;
        }

        if let Some(shape) = self.document.get_shape_mut(receiver) {
            shape.path = composed.path;
        }
        self.document.remove_shape(operand);
        self.set_selection(Some(receiver));
        self.events.push(EditorEvent::DocumentModified);
        self.events.push(EditorEvent::HelpText(None));
    }

    fn abort_composition(&mut self) {
        log::debug!("composition cancelled");
        self.mode = Mode::Neutral;
        self.events.push(EditorEvent::HelpText(None));
    }

    fn press_apply_color(&mut self, color: Rgb, point: Point) {
        match self.document.shape_at_point(point) {
            Some(id) => {
                if let Some(shape) = self.document.get_shape_mut(id) {
                    shape.fill = color;
                }
                self.events.push(EditorEvent::DocumentModified);
            }
            None => {
                self.mode = Mode::Neutral;
                self.events.push(EditorEvent::HelpText(None));
            }
        }
    }

    // ----- Commands -----

    /// Start creating a shape of `kind`. Clears the selection.
    pub fn begin_create(&mut self, kind: ShapeKind) {
        self.clear_gesture();
        self.set_selection(None);
        self.mode = Mode::Creating(kind);
        self.help(kind.help());
    }

    /// Start a composition. A current selection becomes the receiver.
    pub fn begin_compose(&mut self, op: CompositionOp) {
        self.clear_gesture();
        let first = self.selected_shape().map(Shape::id);
        self.mode = Mode::Composing { op, first };
        match first {
            Some(_) => self.help(op.second_pick_help()),
            None => self.help(op.first_pick_help()),
        }
    }

    /// Start painting shapes with `color`. Clears the selection.
    pub fn begin_apply_color(&mut self, color: Rgb) {
        self.clear_gesture();
        self.set_selection(None);
        self.mode = Mode::ApplyingColor(color);
        self.help("Color application. Click shapes to fill them, or empty space to stop.");
    }

    pub fn set_background_color(&mut self, color: Rgb) {
        self.document.set_background_color(color);
        self.events.push(EditorEvent::DocumentModified);
    }

    pub fn set_background_image(&mut self, image: ImageRef) {
        self.document.set_background_image(image);
        self.events.push(EditorEvent::DocumentModified);
    }

    /// Restack the selected shape. Returns true if the order changed.
    pub fn adjust_depth(&mut self, action: DepthAction) -> bool {
        let Some(id) = self.selection else {
            return false;
        };
        let changed = self.document.adjust_depth(id, action);
        if changed {
            self.events.push(EditorEvent::DocumentModified);
        }
        changed
    }

    /// Copy the selected shape on top, shifted when the copy fits the canvas.
    /// The copy becomes the selection.
    pub fn duplicate_selected(&mut self, canvas: Size) -> Option<ShapeId> {
        let mut copy = self.selected_shape()?.duplicate();
        copy.translate(duplicate_offset(
            copy.bounds(),
            canvas,
            self.config.duplicate_offset,
        ));
        let id = self.document.add_shape(copy);
        self.set_selection(Some(id));
        self.events.push(EditorEvent::DocumentModified);
        Some(id)
    }

    pub fn delete_selected(&mut self) -> Option<Shape> {
        let id = self.selection?;
        let removed = self.document.remove_shape(id);
        self.clear_gesture();
        self.mode = Mode::Neutral;
        self.set_selection(None);
        if removed.is_some() {
            self.events.push(EditorEvent::DocumentModified);
        }
        removed
    }

    pub fn reflect_selected(&mut self, axis: Axis) -> bool {
        self.update_selected(|shape| shape.reflect(axis))
    }

    pub fn set_outline(&mut self, color: Rgb, thickness: u32) -> bool {
        self.update_selected(|shape| {
            shape.outline = color;
            shape.outline_thickness = thickness;
        })
    }

    pub fn set_fill(&mut self, color: Rgb) -> bool {
        self.update_selected(|shape| shape.fill = color)
    }

    /// Clear the document and return to Neutral.
    pub fn reset(&mut self) {
        self.document.reset();
        self.reset_interaction();
    }

    /// Replace the document and return to Neutral.
    pub fn load_document(&mut self, document: Document) {
        self.document = document;
        self.reset_interaction();
    }

    /// Encode the document in the text format.
    pub fn serialize(&self) -> String {
        codec::encode(&self.document)
    }

    /// Replace the document with one decoded from `text`.
    pub fn deserialize(&mut self, text: &str) -> CodecResult<()> {
        let document = codec::decode(text)?;
        self.load_document(document);
        Ok(())
    }

    // ----- Helpers -----

    fn styled(&self, path: BezPath) -> Shape {
        Shape::with_style(
            path,
            self.config.default_fill,
            self.config.default_outline_thickness,
            self.config.default_outline,
        )
    }

    fn update_selected(&mut self, f: impl FnOnce(&mut Shape)) -> bool {
        let Some(id) = self.selection else {
            return false;
        };
        let Some(shape) = self.document.get_shape_mut(id) else {
            return false;
        };
        f(shape);
        self.events.push(EditorEvent::DocumentModified);
        true
    }

    fn select_at(&mut self, point: Point) {
        let hit = self.document.shape_at_point(point);
        self.set_selection(hit);
    }

    fn set_selection(&mut self, selection: Option<ShapeId>) {
        if self.selection != selection {
            self.selection = selection;
            self.events.push(EditorEvent::SelectionChanged(selection));
        }
    }

    fn help(&mut self, text: &str) {
        self.events.push(EditorEvent::HelpText(Some(text.to_string())));
    }

    /// Drop any gesture in progress. A release of the button held across
    /// this call is ignored.
    fn clear_gesture(&mut self) {
        self.pointer_pressed = false;
        self.drag = None;
        self.create_start = None;
        self.create_points.clear();
    }

    fn reset_interaction(&mut self) {
        self.clear_gesture();
        self.mode = Mode::Neutral;
        self.set_selection(None);
        self.events.push(EditorEvent::HelpText(None));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Background;
    use kurbo::Shape as KurboShape;

    const CANVAS: Size = Size::new(800.0, 600.0);

    fn click(editor: &mut Editor, x: f64, y: f64) {
        editor.on_pointer_down(Point::new(x, y), MouseButton::Left, CANVAS);
        editor.on_pointer_up(Point::new(x, y), CANVAS);
    }

    fn drag(editor: &mut Editor, from: (f64, f64), to: (f64, f64)) {
        editor.on_pointer_down(Point::new(from.0, from.1), MouseButton::Left, CANVAS);
        editor.on_pointer_move(Point::new(to.0, to.1), CANVAS);
        editor.on_pointer_up(Point::new(to.0, to.1), CANVAS);
    }

    fn create_rect(editor: &mut Editor, from: (f64, f64), to: (f64, f64)) -> ShapeId {
        editor.begin_create(ShapeKind::Rectangle);
        drag(editor, from, to);
        editor.document().shapes().last().unwrap().id()
    }

    fn assert_bounds(shape: &Shape, x: f64, y: f64, w: f64, h: f64) {
        let b = shape.bounds();
        let expected = [x, y, w, h];
        let actual = [b.x0, b.y0, b.width(), b.height()];
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-6, "bounds {actual:?} != {expected:?}");
        }
    }

    #[test]
    fn test_create_rectangle_and_serialize() {
        let mut editor = Editor::new();
        create_rect(&mut editor, (10.0, 10.0), (110.0, 60.0));
        assert_eq!(editor.mode(), Mode::Neutral);
        assert_eq!(editor.selection(), None);

        let text = editor.serialize();
        let shape_lines: Vec<&str> = text
            .lines()
            .filter(|l| l.starts_with("GeneralShape;"))
            .collect();
        assert_eq!(shape_lines.len(), 1);
        assert_eq!(shape_lines[0].matches(':').count(), 5);
        assert!(shape_lines[0].contains("0:10.0,10.0,"));
        assert!(shape_lines[0].contains("1:110.0,10.0,"));
        assert!(shape_lines[0].contains("1:110.0,60.0,"));
        assert!(shape_lines[0].contains("1:10.0,60.0,"));

        let mut restored = Editor::new();
        restored.deserialize(&text).unwrap();
        assert_eq!(restored.document().len(), 1);
        assert_bounds(&restored.document().shapes()[0], 10.0, 10.0, 100.0, 50.0);
    }

    #[test]
    fn test_resize_se_handle_scenario() {
        let mut editor = Editor::new();
        let id = create_rect(&mut editor, (10.0, 10.0), (110.0, 60.0));

        click(&mut editor, 60.0, 35.0);
        assert_eq!(editor.selection(), Some(id));

        editor.on_pointer_down(Point::new(110.0, 60.0), MouseButton::Left, CANVAS);
        assert_eq!(editor.mode(), Mode::Resizing(Handle::SE));
        editor.on_pointer_move(Point::new(130.0, 80.0), CANVAS);
        editor.on_pointer_up(Point::new(130.0, 80.0), CANVAS);

        assert_eq!(editor.mode(), Mode::Neutral);
        assert_eq!(editor.selection(), Some(id));
        assert_bounds(editor.selected_shape().unwrap(), 10.0, 10.0, 120.0, 70.0);
    }

    #[test]
    fn test_resize_flip_emits_handle_change() {
        let mut editor = Editor::new();
        create_rect(&mut editor, (10.0, 10.0), (110.0, 60.0));
        click(&mut editor, 60.0, 35.0);
        editor.drain_events();

        editor.on_pointer_down(Point::new(10.0, 10.0), MouseButton::Left, CANVAS);
        editor.on_pointer_move(Point::new(160.0, 10.0), CANVAS);
        assert_eq!(editor.mode(), Mode::Resizing(Handle::NE));
        let events = editor.drain_events();
        assert_eq!(
            events,
            vec![
                EditorEvent::HandleChanged(Handle::NW),
                EditorEvent::HandleChanged(Handle::NE)
            ]
        );
        let b = editor.selected_shape().unwrap().bounds();
        assert!((b.x0 - 110.0).abs() < 1e-6);
        assert!((b.x1 - 160.0).abs() < 1e-6);
    }

    #[test]
    fn test_move_gesture() {
        let mut editor = Editor::new();
        create_rect(&mut editor, (100.0, 100.0), (200.0, 200.0));
        click(&mut editor, 150.0, 150.0);

        editor.on_pointer_down(Point::new(150.0, 150.0), MouseButton::Left, CANVAS);
        assert_eq!(editor.mode(), Mode::Moving);
        editor.on_pointer_move(Point::new(160.0, 170.0), CANVAS);
        editor.on_pointer_move(Point::new(-500.0, 170.0), CANVAS);
        editor.on_pointer_up(Point::new(-500.0, 170.0), CANVAS);

        assert_bounds(editor.selected_shape().unwrap(), 0.0, 120.0, 100.0, 100.0);
        assert!(editor.drain_events().contains(&EditorEvent::DocumentModified));
    }

    #[test]
    fn test_click_on_shape_above_selection_reselects() {
        let mut editor = Editor::new();
        let below = create_rect(&mut editor, (100.0, 100.0), (300.0, 300.0));
        let above = create_rect(&mut editor, (150.0, 150.0), (200.0, 200.0));

        click(&mut editor, 120.0, 120.0);
        assert_eq!(editor.selection(), Some(below));

        // Inside the selection's inner area, but the other shape is on top.
        click(&mut editor, 175.0, 175.0);
        assert_eq!(editor.selection(), Some(above));
    }

    #[test]
    fn test_click_outside_deselects() {
        let mut editor = Editor::new();
        create_rect(&mut editor, (100.0, 100.0), (200.0, 200.0));
        click(&mut editor, 150.0, 150.0);
        assert!(editor.selection().is_some());
        click(&mut editor, 500.0, 500.0);
        assert_eq!(editor.selection(), None);
    }

    #[test]
    fn test_tiny_drag_creates_nothing() {
        let mut editor = Editor::new();
        editor.begin_create(ShapeKind::Ellipse);
        drag(&mut editor, (50.0, 50.0), (51.0, 80.0));
        assert!(editor.document().is_empty());
        assert_eq!(editor.mode(), Mode::Neutral);
    }

    #[test]
    fn test_creation_clamped_to_canvas() {
        let mut editor = Editor::new();
        editor.begin_create(ShapeKind::Ellipse);
        drag(&mut editor, (700.0, 500.0), (1000.0, 900.0));
        let b = editor.document().shapes()[0].bounds();
        assert!((b.x1 - 800.0).abs() < 1e-6);
        assert!((b.y1 - 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_triangle_three_clicks() {
        let mut editor = Editor::new();
        editor.begin_create(ShapeKind::Triangle);
        click(&mut editor, 10.0, 10.0);
        click(&mut editor, 100.0, 10.0);
        assert!(editor.document().is_empty());
        match editor.creation_preview(Point::new(50.0, 80.0)) {
            Some(CreationPreview::Polyline(points)) => assert_eq!(points.len(), 3),
            other => panic!("unexpected preview: {other:?}"),
        }
        click(&mut editor, 10.0, 100.0);
        assert_eq!(editor.document().len(), 1);
        assert_eq!(editor.mode(), Mode::Neutral);
        assert!((editor.document().shapes()[0].area() - 4050.0).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_triangles_discarded() {
        let mut editor = Editor::new();
        editor.begin_create(ShapeKind::Triangle);
        for _ in 0..3 {
            click(&mut editor, 50.0, 50.0);
        }
        assert!(editor.document().is_empty());
        assert_eq!(editor.mode(), Mode::Neutral);

        editor.begin_create(ShapeKind::Triangle);
        click(&mut editor, 10.0, 10.0);
        click(&mut editor, 60.0, 60.0);
        click(&mut editor, 110.0, 110.0);
        assert!(editor.document().is_empty());
        assert!(!editor.drain_events().contains(&EditorEvent::DocumentModified));
    }

    #[test]
    fn test_command_during_press_ignores_release() {
        let mut editor = Editor::new();
        create_rect(&mut editor, (100.0, 100.0), (200.0, 200.0));
        click(&mut editor, 150.0, 150.0);
        editor.on_pointer_down(Point::new(150.0, 150.0), MouseButton::Left, CANVAS);
        assert_eq!(editor.mode(), Mode::Moving);

        editor.begin_create(ShapeKind::Ellipse);
        editor.on_pointer_up(Point::new(150.0, 150.0), CANVAS);
        assert_eq!(editor.mode(), Mode::Creating(ShapeKind::Ellipse));

        drag(&mut editor, (300.0, 300.0), (360.0, 340.0));
        assert_eq!(editor.document().len(), 2);
        assert_eq!(editor.mode(), Mode::Neutral);
    }

    #[test]
    fn test_commands_emit_help() {
        let mut editor = Editor::new();
        editor.begin_create(ShapeKind::Triangle);
        assert_eq!(
            editor.drain_events(),
            vec![EditorEvent::HelpText(Some(ShapeKind::Triangle.help().to_string()))]
        );
        editor.begin_apply_color(Rgb::WHITE);
        assert!(matches!(
            editor.drain_events().as_slice(),
            [EditorEvent::HelpText(Some(_))]
        ));
    }

    #[test]
    fn test_drag_preview() {
        let mut editor = Editor::new();
        editor.begin_create(ShapeKind::Rectangle);
        assert!(editor.creation_preview(Point::new(5.0, 5.0)).is_none());
        editor.on_pointer_down(Point::new(10.0, 10.0), MouseButton::Left, CANVAS);
        match editor.creation_preview(Point::new(40.0, 30.0)) {
            Some(CreationPreview::Outline(path)) => {
                assert_eq!(path.bounding_box(), Rect::new(10.0, 10.0, 40.0, 30.0));
            }
            other => panic!("unexpected preview: {other:?}"),
        }
    }

    #[test]
    fn test_compose_union_scenario() {
        let mut editor = Editor::new();
        let a = create_rect(&mut editor, (0.0, 0.0), (100.0, 100.0));
        let b = create_rect(&mut editor, (50.0, 50.0), (150.0, 150.0));

        editor.begin_compose(CompositionOp::Union);
        click(&mut editor, 10.0, 10.0);
        assert_eq!(
            editor.mode(),
            Mode::Composing {
                op: CompositionOp::Union,
                first: Some(a)
            }
        );
        click(&mut editor, 140.0, 140.0);

        assert_eq!(editor.mode(), Mode::Neutral);
        assert_eq!(editor.document().len(), 1);
        assert!(editor.document().get_shape(b).is_none());
        assert_eq!(editor.selection(), Some(a));
        assert_bounds(editor.selected_shape().unwrap(), 0.0, 0.0, 150.0, 150.0);
    }

    #[test]
    fn test_compose_uses_selection_as_receiver() {
        let mut editor = Editor::new();
        let a = create_rect(&mut editor, (0.0, 0.0), (100.0, 100.0));
        create_rect(&mut editor, (50.0, 50.0), (150.0, 150.0));
        {
            let shape = editor.document_mut().get_shape_mut(a).unwrap();
            shape.fill = Rgb::new(200, 0, 0);
        }
        click(&mut editor, 10.0, 10.0);

        editor.begin_compose(CompositionOp::Intersection);
        click(&mut editor, 140.0, 140.0);

        assert_eq!(editor.document().len(), 1);
        let shape = editor.selected_shape().unwrap();
        assert_eq!(shape.id(), a);
        assert_eq!(shape.fill, Rgb::new(200, 0, 0));
        assert_bounds(shape, 50.0, 50.0, 50.0, 50.0);
    }

    #[test]
    fn test_compose_cancelled_by_clicking_receiver_or_empty() {
        let mut editor = Editor::new();
        create_rect(&mut editor, (0.0, 0.0), (100.0, 100.0));
        create_rect(&mut editor, (200.0, 200.0), (300.0, 300.0));
        let before = editor.serialize();

        editor.begin_compose(CompositionOp::Difference);
        click(&mut editor, 10.0, 10.0);
        click(&mut editor, 20.0, 20.0);
        assert_eq!(editor.mode(), Mode::Neutral);
        assert_eq!(editor.serialize(), before);

        editor.begin_compose(CompositionOp::Difference);
        click(&mut editor, 500.0, 500.0);
        assert_eq!(editor.mode(), Mode::Neutral);
        assert_eq!(editor.serialize(), before);
    }

    #[test]
    fn test_empty_composition_rejected() {
        let mut editor = Editor::new();
        let a = create_rect(&mut editor, (0.0, 0.0), (100.0, 100.0));
        create_rect(&mut editor, (200.0, 200.0), (300.0, 300.0));
        let before = editor.serialize();

        editor.begin_compose(CompositionOp::Intersection);
        click(&mut editor, 10.0, 10.0);
        editor.drain_events();
        click(&mut editor, 250.0, 250.0);

        assert_eq!(editor.mode(), Mode::Neutral);
        assert_eq!(editor.serialize(), before);
        assert_eq!(editor.selection(), Some(a));
        let events = editor.drain_events();
        assert!(matches!(events.as_slice(), [EditorEvent::HelpText(Some(_))]));
    }

    #[test]
    fn test_compose_help_texts() {
        let mut editor = Editor::new();
        create_rect(&mut editor, (0.0, 0.0), (100.0, 100.0));
        editor.drain_events();
        editor.begin_compose(CompositionOp::SymmetricDifference);
        assert_eq!(
            editor.drain_events(),
            vec![EditorEvent::HelpText(Some(
                CompositionOp::SymmetricDifference.first_pick_help().to_string()
            ))]
        );
    }

    #[test]
    fn test_apply_color() {
        let mut editor = Editor::new();
        let below = create_rect(&mut editor, (0.0, 0.0), (100.0, 100.0));
        let above = create_rect(&mut editor, (50.0, 50.0), (150.0, 150.0));
        let red = Rgb::new(255, 0, 0);

        editor.begin_apply_color(red);
        click(&mut editor, 75.0, 75.0);
        assert_eq!(editor.document().get_shape(above).unwrap().fill, red);
        assert_eq!(editor.document().get_shape(below).unwrap().fill, Rgb::BLACK);
        assert_eq!(editor.mode(), Mode::ApplyingColor(red));

        click(&mut editor, 10.0, 10.0);
        assert_eq!(editor.document().get_shape(below).unwrap().fill, red);

        click(&mut editor, 700.0, 500.0);
        assert_eq!(editor.mode(), Mode::Neutral);
    }

    #[test]
    fn test_right_button_and_stray_release_ignored() {
        let mut editor = Editor::new();
        editor.begin_create(ShapeKind::Rectangle);
        editor.on_pointer_down(Point::new(10.0, 10.0), MouseButton::Right, CANVAS);
        editor.on_pointer_up(Point::new(100.0, 100.0), CANVAS);
        assert_eq!(editor.mode(), Mode::Creating(ShapeKind::Rectangle));
        assert!(editor.document().is_empty());
    }

    #[test]
    fn test_handle_event_dispatch() {
        let mut editor = Editor::new();
        editor.begin_create(ShapeKind::Rectangle);
        let events = [
            PointerEvent::Down {
                position: Point::new(10.0, 10.0),
                button: MouseButton::Left,
            },
            PointerEvent::Move {
                position: Point::new(50.0, 50.0),
            },
            PointerEvent::Up {
                position: Point::new(50.0, 50.0),
                button: MouseButton::Left,
            },
        ];
        for event in events {
            editor.handle_event(event, CANVAS);
        }
        assert_eq!(editor.document().len(), 1);
    }

    #[test]
    fn test_pointer_down_abandons_move() {
        let mut editor = Editor::new();
        create_rect(&mut editor, (100.0, 100.0), (200.0, 200.0));
        click(&mut editor, 150.0, 150.0);
        editor.on_pointer_down(Point::new(150.0, 150.0), MouseButton::Left, CANVAS);
        assert_eq!(editor.mode(), Mode::Moving);

        // The release was lost; a fresh press outside deselects.
        editor.on_pointer_down(Point::new(600.0, 500.0), MouseButton::Left, CANVAS);
        assert_eq!(editor.mode(), Mode::Neutral);
        assert_eq!(editor.selection(), None);
    }

    #[test]
    fn test_hit_zone_query() {
        let mut editor = Editor::new();
        create_rect(&mut editor, (100.0, 100.0), (200.0, 200.0));
        assert_eq!(editor.hit_zone(Point::new(150.0, 150.0)), HitZone::Outside);
        click(&mut editor, 150.0, 150.0);
        assert_eq!(editor.hit_zone(Point::new(150.0, 150.0)), HitZone::Inner);
        assert_eq!(
            editor.hit_zone(Point::new(200.0, 150.0)),
            HitZone::Handle(Handle::E)
        );
    }

    #[test]
    fn test_duplicate_delete_and_depth() {
        let mut editor = Editor::new();
        let original = create_rect(&mut editor, (100.0, 100.0), (200.0, 200.0));
        click(&mut editor, 150.0, 150.0);

        let copy = editor.duplicate_selected(CANVAS).unwrap();
        assert_ne!(copy, original);
        assert_eq!(editor.selection(), Some(copy));
        assert_bounds(editor.selected_shape().unwrap(), 110.0, 110.0, 100.0, 100.0);

        assert!(!editor.adjust_depth(DepthAction::ToFront));
        assert!(editor.adjust_depth(DepthAction::ToBack));
        assert_eq!(editor.document().shapes()[0].id(), copy);

        let removed = editor.delete_selected().unwrap();
        assert_eq!(removed.id(), copy);
        assert_eq!(editor.selection(), None);
        assert_eq!(editor.document().len(), 1);
        assert!(editor.delete_selected().is_none());
    }

    #[test]
    fn test_style_and_reflect_commands() {
        let mut editor = Editor::new();
        assert!(!editor.set_fill(Rgb::WHITE));
        create_rect(&mut editor, (100.0, 100.0), (200.0, 150.0));
        click(&mut editor, 150.0, 125.0);

        assert!(editor.set_outline(Rgb::new(0, 0, 255), 3));
        assert!(editor.set_fill(Rgb::new(0, 255, 0)));
        assert!(editor.reflect_selected(Axis::X));
        let shape = editor.selected_shape().unwrap();
        assert_eq!(shape.outline, Rgb::new(0, 0, 255));
        assert_eq!(shape.outline_thickness, 3);
        assert_eq!(shape.fill, Rgb::new(0, 255, 0));
        assert_bounds(shape, 100.0, 100.0, 100.0, 50.0);
    }

    #[test]
    fn test_background_and_reset() {
        let mut editor = Editor::new();
        create_rect(&mut editor, (100.0, 100.0), (200.0, 150.0));
        click(&mut editor, 150.0, 125.0);
        editor.set_background_image(ImageRef::new("bg.png"));
        assert_eq!(
            editor.document().background,
            Background::Image(ImageRef::new("bg.png"))
        );

        editor.reset();
        assert!(editor.document().is_empty());
        assert_eq!(editor.selection(), None);
        assert_eq!(editor.mode(), Mode::Neutral);
        assert_eq!(editor.document().background, Background::Color(Rgb::WHITE));
    }

    #[test]
    fn test_config_defaults_apply_to_new_shapes() {
        let config = EditorConfig {
            default_fill: Rgb::new(1, 2, 3),
            default_outline_thickness: 4,
            ..EditorConfig::default()
        };
        let mut editor = Editor::with_config(config);
        create_rect(&mut editor, (0.0, 0.0), (10.0, 10.0));
        let shape = &editor.document().shapes()[0];
        assert_eq!(shape.fill, Rgb::new(1, 2, 3));
        assert_eq!(shape.outline_thickness, 4);
    }

    #[test]
    fn test_bad_background_leaves_document() {
        let mut editor = Editor::new();
        create_rect(&mut editor, (0.0, 0.0), (10.0, 10.0));
        assert!(editor.deserialize("Background_Color: nope").is_err());
        assert_eq!(editor.document().len(), 1);
    }
}
