//! Element definitions for the page composer.

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Unique identifier for a placed element.
///
/// Generated ids have the shape `el-<timestamp>-<index>`; ids read back
/// from an imported layout are preserved as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(String);

impl ElementId {
    /// Wrap an existing id string (used by the import path).
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Compose a fresh id from a timestamp and a session-monotonic index.
    pub fn generate(timestamp_ms: u128, index: u64) -> Self {
        Self(format!("el-{timestamp_ms}-{index}"))
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of a placed element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Button,
    Text,
    Input,
}

impl ElementKind {
    /// Markup tag name for this kind.
    pub fn tag_name(&self) -> &'static str {
        match self {
            ElementKind::Button => "button",
            ElementKind::Input => "input",
            ElementKind::Text => "div",
        }
    }

    /// Map a markup tag name back to a kind. Unknown tags become text
    /// blocks, mirroring the generic-container fallback on import.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "button" => ElementKind::Button,
            "input" => ElementKind::Input,
            _ => ElementKind::Text,
        }
    }

    /// Content used when an element is created without any entered text.
    pub fn default_content(&self) -> &'static str {
        match self {
            ElementKind::Button => "Button",
            ElementKind::Text => "Please enter text here",
            ElementKind::Input => "Input",
        }
    }
}

/// A placed element: an absolutely positioned leaf on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Unique, stable identifier.
    pub id: ElementId,
    /// What the element is.
    pub kind: ElementKind,
    /// Geometry in world coordinates.
    pub rect: Rect,
    /// Text content (button/text) or input value.
    pub content: String,
}

impl Element {
    /// Create an element from its parts.
    pub fn new(id: ElementId, kind: ElementKind, rect: Rect, content: String) -> Self {
        Self {
            id,
            kind,
            rect,
            content,
        }
    }

    /// World top-left corner.
    pub fn origin(&self) -> Point {
        self.rect.origin()
    }

    /// Move the element so its top-left is at `world_top_left`,
    /// preserving its size.
    pub fn move_to(&mut self, world_top_left: Point) {
        self.rect = Rect::from_origin_size(world_top_left, self.rect.size());
    }

    /// Shift the element by a world-space delta.
    pub fn translate(&mut self, delta: Vec2) {
        self.rect = self.rect + delta;
    }

    /// Whether a world point falls inside the element.
    pub fn contains(&self, world_point: Point) -> bool {
        self.rect.contains(world_point)
    }
}
