//! The editor context binding pointer events to state-machine
//! transitions and store mutations.

use crate::camera::{trunc_point, Camera};
use crate::codec::{self, MarkupStylePair};
use crate::element::{ElementId, ElementKind};
use crate::input::{MouseButton, PointerEvent};
use crate::snap::{self, Axis, GuideLine};
use crate::store::ElementStore;
use crate::tools::{GestureState, ToolKind, ToolManager};
use kurbo::{Point, Rect, Size, Vec2};

/// Minimum drawn width/height for an element to be created. The
/// comparison is strict: a 5x5 drag is still discarded.
pub const MIN_ELEMENT_SIZE: f64 = 5.0;

/// Margin enforced by Reset: if the minimum element left/top falls below
/// this, the whole layout is shifted so the minimum lands exactly here.
pub const RESET_MARGIN: f64 = 5.0;

/// Side effects produced by an interaction, for a platform adapter to
/// apply to its surface. Store and camera mutations have already
/// happened by the time these are returned.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// A new element exists; render it.
    ElementCreated(ElementId),
    /// An element was deleted; drop its visual.
    ElementRemoved(ElementId),
    /// An element's geometry changed; reposition its visual.
    ElementMoved(ElementId),
    /// These elements were pulled onto an alignment guide.
    ElementsAligned(Vec<ElementId>),
    /// Show (or update) the draw-preview outline, in view coordinates.
    GhostBox(Rect),
    /// Remove the draw-preview outline.
    GhostCleared,
    /// The pan offset changed; re-apply the canvas content transform.
    PanChanged(Vec2),
    /// Show a transient alignment guide for its display duration.
    Guide(GuideLine),
}

/// One independent editor instance: the element set, the view transform,
/// the tool/mode state, and the in-flight gesture. All interaction
/// functions run synchronously against this context; nothing lives in
/// module state.
#[derive(Debug, Clone)]
pub struct Editor {
    /// The authoritative element set.
    pub store: ElementStore,
    /// View/world transform.
    pub camera: Camera,
    /// Tool, mode, and gesture state.
    pub tools: ToolManager,
    /// Visible canvas size; drawing coordinates are clamped to it.
    viewport_size: Size,
    /// Text entered in the property panel, applied to the next text or
    /// input element.
    pending_text: String,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// Create an editor with an empty canvas.
    pub fn new() -> Self {
        Self {
            store: ElementStore::new(),
            camera: Camera::new(),
            tools: ToolManager::new(),
            viewport_size: Size::new(800.0, 600.0),
            pending_text: String::new(),
        }
    }

    /// Set the visible canvas size.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport_size = Size::new(width, height);
    }

    /// Set the content for the next text/input element.
    pub fn set_pending_text(&mut self, text: impl Into<String>) {
        self.pending_text = text.into();
    }

    /// Select (or toggle off) a tool.
    pub fn select_tool(&mut self, tool: ToolKind) {
        self.tools.select_tool(tool);
    }

    /// Toggle delete mode.
    pub fn toggle_delete_mode(&mut self) {
        self.tools.toggle_delete_mode();
    }

    /// Toggle move mode.
    pub fn toggle_move_mode(&mut self) {
        self.tools.toggle_move_mode();
    }

    /// Dispatch a pointer event. Only the left button starts or ends
    /// gestures.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> Vec<Effect> {
        match event {
            PointerEvent::Down {
                position,
                button: MouseButton::Left,
            } => self.pointer_down(position),
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up {
                position,
                button: MouseButton::Left,
            } => self.pointer_up(position),
            _ => Vec::new(),
        }
    }

    /// Pointer pressed at a view position.
    pub fn pointer_down(&mut self, view: Point) -> Vec<Effect> {
        if self.tools.gesture.is_active() {
            return Vec::new();
        }
        let view = trunc_point(view);
        let world = self.camera.to_world(view);

        // A press on an element never draws or pans.
        if let Some(id) = self.store.element_at(world) {
            if self.tools.delete_mode() {
                self.store.remove(&id);
                return vec![Effect::ElementRemoved(id)];
            }
            if self.tools.move_mode() {
                if let Some(el) = self.store.get(&id) {
                    let grab_offset = world - el.origin();
                    self.tools.gesture = GestureState::Moving { id, grab_offset };
                }
            }
            return Vec::new();
        }

        match self.tools.current_tool() {
            Some(tool) if tool.is_drawable() => {
                self.tools.gesture = GestureState::Drawing {
                    anchor: view,
                    current: view,
                };
                vec![Effect::GhostBox(Rect::from_origin_size(view, Size::ZERO))]
            }
            Some(_) => {
                // Align tools: arm the click; the snap pass runs on
                // pointer-up, at the release coordinates.
                self.tools.gesture = GestureState::AlignClick;
                Vec::new()
            }
            None if !self.tools.mode_active() => {
                self.tools.gesture = GestureState::Panning { last: view };
                Vec::new()
            }
            None => Vec::new(),
        }
    }

    /// Pointer moved to a view position.
    pub fn pointer_move(&mut self, view: Point) -> Vec<Effect> {
        let view = trunc_point(view);
        let viewport = self.viewport_size;
        match &mut self.tools.gesture {
            GestureState::Drawing { anchor, current } => {
                *current = clamp_to_viewport(view, viewport);
                vec![Effect::GhostBox(drawn_rect(*anchor, *current))]
            }
            GestureState::Panning { last } => {
                // Incremental delta from the previous position, never
                // recomputed from the original anchor.
                let delta = view - *last;
                *last = view;
                self.camera.pan(delta);
                vec![Effect::PanChanged(self.camera.offset)]
            }
            GestureState::Moving { id, grab_offset } => {
                let id = id.clone();
                let grab_offset = *grab_offset;
                let world_top_left = self.camera.to_world(view) - grab_offset;
                self.store.move_to(&id, world_top_left);
                vec![Effect::ElementMoved(id)]
            }
            GestureState::Idle | GestureState::AlignClick => Vec::new(),
        }
    }

    /// Pointer released.
    pub fn pointer_up(&mut self, view: Point) -> Vec<Effect> {
        match std::mem::take(&mut self.tools.gesture) {
            GestureState::Drawing { anchor, current } => self.finish_drawing(anchor, current),
            GestureState::AlignClick => {
                let world = self.camera.to_world(trunc_point(view));
                self.perform_align(world)
            }
            GestureState::Panning { .. }
            | GestureState::Moving { .. }
            | GestureState::Idle => Vec::new(),
        }
    }

    /// Reset the view: zero the pan, then shift the whole layout by one
    /// uniform translation if its minimum left/top sits inside the
    /// margin. Relative offsets between elements are preserved exactly.
    pub fn reset(&mut self) -> Vec<Effect> {
        self.camera.reset();
        let mut effects = vec![Effect::PanChanged(Vec2::ZERO)];
        if let Some(min) = self.store.min_origin() {
            let dx = if min.x < RESET_MARGIN { RESET_MARGIN - min.x } else { 0.0 };
            let dy = if min.y < RESET_MARGIN { RESET_MARGIN - min.y } else { 0.0 };
            if dx != 0.0 || dy != 0.0 {
                self.store.translate_all(Vec2::new(dx, dy));
                let moved = self
                    .store
                    .elements()
                    .iter()
                    .map(|e| Effect::ElementMoved(e.id.clone()));
                effects.extend(moved);
            }
        }
        effects
    }

    /// Export the current element set as the markup+style pair.
    pub fn export(&self) -> MarkupStylePair {
        codec::export(self.store.elements())
    }

    /// Replace the canvas with an imported layout: wipes the element
    /// set, zeroes the pan, then adopts the decoded elements with their
    /// original ids.
    pub fn load(&mut self, pair: &MarkupStylePair) {
        self.store.clear();
        self.camera.reset();
        let elements = codec::import(&pair.markup, &pair.style);
        log::debug!("loaded {} elements", elements.len());
        self.store.adopt(elements);
    }

    fn finish_drawing(&mut self, anchor: Point, current: Point) -> Vec<Effect> {
        let mut effects = vec![Effect::GhostCleared];
        let preview = drawn_rect(anchor, current);

        if preview.width() > MIN_ELEMENT_SIZE && preview.height() > MIN_ELEMENT_SIZE {
            // Convert with the pan offset at release time.
            let world_origin = self.camera.to_world(preview.origin());
            if let Some(kind) = self.tools.current_tool().and_then(|t| t.element_kind()) {
                // Buttons are always labeled with the default; entered
                // text only feeds text blocks and inputs.
                let content = match kind {
                    ElementKind::Button => kind.default_content().to_string(),
                    _ if self.pending_text.is_empty() => kind.default_content().to_string(),
                    _ => self.pending_text.clone(),
                };
                let rect = Rect::from_origin_size(world_origin, preview.size());
                let id = self.store.create(kind, rect, content);
                effects.push(Effect::ElementCreated(id));
            }
        } else {
            log::debug!("discarding sub-threshold draw {:?}", preview.size());
        }

        // The tool resets whether or not an element was created.
        self.tools.clear_tool();
        effects
    }

    fn perform_align(&mut self, world: Point) -> Vec<Effect> {
        let mut effects = Vec::new();
        match self.tools.current_tool() {
            Some(ToolKind::LeftAlign) => {
                let moved = snap::align_left(&mut self.store, world.x);
                effects.push(Effect::ElementsAligned(moved));
                effects.push(Effect::Guide(GuideLine::new(Axis::Vertical, world.x)));
            }
            Some(ToolKind::TopAlign) => {
                let moved = snap::align_top(&mut self.store, world.y);
                effects.push(Effect::ElementsAligned(moved));
                effects.push(Effect::Guide(GuideLine::new(Axis::Horizontal, world.y)));
            }
            _ => {}
        }
        // Align auto-deselects after one pass.
        self.tools.clear_tool();
        effects
    }
}

/// Rectangle spanned by the anchor and the current drag point. Supports
/// dragging in any of the four directions from the anchor.
fn drawn_rect(anchor: Point, current: Point) -> Rect {
    Rect::new(
        anchor.x.min(current.x),
        anchor.y.min(current.y),
        anchor.x.max(current.x),
        anchor.y.max(current.y),
    )
}

/// Clamp a view point to the visible canvas bounds.
fn clamp_to_viewport(p: Point, viewport: Size) -> Point {
    Point::new(
        p.x.clamp(0.0, viewport.width),
        p.y.clamp(0.0, viewport.height),
    )
}
