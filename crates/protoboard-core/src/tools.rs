//! Tool and mode state machine.

use crate::element::{ElementId, ElementKind};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Selectable tools.
///
/// Button/Text/Input are drawable (drag-to-create); the two align tools
/// are click-driven and auto-deselect after one snap pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolKind {
    Button,
    Text,
    Input,
    LeftAlign,
    TopAlign,
}

impl ToolKind {
    /// Whether the tool creates an element via a drag gesture.
    pub fn is_drawable(&self) -> bool {
        self.element_kind().is_some()
    }

    /// Whether the tool is one of the click-driven align tools.
    pub fn is_align(&self) -> bool {
        matches!(self, ToolKind::LeftAlign | ToolKind::TopAlign)
    }

    /// The element kind a drawable tool creates.
    pub fn element_kind(&self) -> Option<ElementKind> {
        match self {
            ToolKind::Button => Some(ElementKind::Button),
            ToolKind::Text => Some(ElementKind::Text),
            ToolKind::Input => Some(ElementKind::Input),
            ToolKind::LeftAlign | ToolKind::TopAlign => None,
        }
    }
}

/// Transient per-interaction state, alive for one pointer-down/up cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum GestureState {
    /// No interaction in progress.
    #[default]
    Idle,
    /// Drag-to-create in progress; both points are view coordinates.
    Drawing { anchor: Point, current: Point },
    /// Canvas pan in progress; `last` is the previous pointer position.
    Panning { last: Point },
    /// An element is being dragged. `grab_offset` is the pointer offset
    /// from the element's top-left at grab time, so the element does not
    /// jump to the pointer on the first move.
    Moving {
        id: ElementId,
        grab_offset: Vec2,
    },
    /// An align click is armed; the snap pass runs on pointer-up, at
    /// the release coordinates.
    AlignClick,
}

impl GestureState {
    /// Whether any gesture is in progress.
    pub fn is_active(&self) -> bool {
        !matches!(self, GestureState::Idle)
    }
}

/// Current tool/mode selection plus the active gesture.
///
/// `delete_mode` and `move_mode` are exclusive: enabling one forces the
/// other off and clears the selected tool. While either mode is active,
/// tool selection is inert (the toolbar disables those buttons).
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    current_tool: Option<ToolKind>,
    delete_mode: bool,
    move_mode: bool,
    /// Active gesture, if any.
    pub gesture: GestureState,
}

impl ToolManager {
    /// Create a manager with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently selected tool, if any.
    pub fn current_tool(&self) -> Option<ToolKind> {
        self.current_tool
    }

    /// Whether delete mode is active.
    pub fn delete_mode(&self) -> bool {
        self.delete_mode
    }

    /// Whether move mode is active.
    pub fn move_mode(&self) -> bool {
        self.move_mode
    }

    /// Whether either exclusive mode is active.
    pub fn mode_active(&self) -> bool {
        self.delete_mode || self.move_mode
    }

    /// Select a tool. Re-selecting the current tool toggles back to no
    /// tool. Inert while delete/move mode is active. Cancels any
    /// in-flight gesture.
    pub fn select_tool(&mut self, tool: ToolKind) {
        if self.mode_active() {
            return;
        }
        self.gesture = GestureState::Idle;
        if self.current_tool == Some(tool) {
            self.current_tool = None;
        } else {
            self.current_tool = Some(tool);
        }
    }

    /// Deselect the current tool and cancel any in-flight gesture.
    pub fn clear_tool(&mut self) {
        self.current_tool = None;
        self.gesture = GestureState::Idle;
    }

    /// Toggle delete mode. Enabling it forces move mode off and clears
    /// the selected tool.
    pub fn toggle_delete_mode(&mut self) {
        self.delete_mode = !self.delete_mode;
        if self.delete_mode {
            self.move_mode = false;
            self.clear_tool();
        }
    }

    /// Toggle move mode. Enabling it forces delete mode off and clears
    /// the selected tool.
    pub fn toggle_move_mode(&mut self) {
        self.move_mode = !self.move_mode;
        if self.move_mode {
            self.delete_mode = false;
            self.clear_tool();
        }
    }
}
