//! Protoboard Core Library
//!
//! Platform-agnostic engine for the Protoboard page composer: an
//! infinite pannable canvas on which UI elements (buttons, text blocks,
//! inputs) are drawn, moved, aligned, and serialized to a portable
//! markup + stylesheet pair.

pub mod camera;
pub mod codec;
pub mod editor;
pub mod element;
pub mod input;
pub mod snap;
pub mod storage;
pub mod store;
pub mod tools;

pub use camera::Camera;
pub use codec::MarkupStylePair;
pub use editor::{Editor, Effect, MIN_ELEMENT_SIZE, RESET_MARGIN};
pub use element::{Element, ElementId, ElementKind};
pub use input::{MouseButton, PointerEvent};
pub use snap::{Axis, GuideLine, GUIDE_DISPLAY, SNAP_WINDOW};
pub use storage::{FileStorage, StorageError, StorageResult};
pub use store::ElementStore;
pub use tools::{GestureState, ToolKind, ToolManager};
