//! The authoritative set of placed elements.

use crate::element::{Element, ElementId, ElementKind};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Owns every placed element and its geometry/content.
///
/// Elements are kept in creation order, which is also the render and
/// serialization order. The render projection holds no independent copy
/// of geometry; everything reads from here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElementStore {
    elements: Vec<Element>,
    /// Session-monotonic creation counter. Never decremented, so ids
    /// stay unique across create/remove interleavings.
    next_index: u64,
}

impl ElementStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new element and return its id.
    ///
    /// The >5x5 creation threshold is enforced at the gesture call site,
    /// not here; Load may restore any positive geometry.
    pub fn create(&mut self, kind: ElementKind, world_rect: Rect, content: String) -> ElementId {
        let id = ElementId::generate(timestamp_ms(), self.next_index);
        self.next_index += 1;
        log::debug!("create {} {:?} at {:?}", id, kind, world_rect);
        self.elements
            .push(Element::new(id.clone(), kind, world_rect, content));
        id
    }

    /// Remove an element by id, returning it if it existed.
    pub fn remove(&mut self, id: &ElementId) -> Option<Element> {
        let pos = self.elements.iter().position(|e| &e.id == id)?;
        log::debug!("remove {}", id);
        Some(self.elements.remove(pos))
    }

    /// Move an element so its top-left sits at `world_top_left`.
    /// Unknown ids are a no-op.
    pub fn move_to(&mut self, id: &ElementId, world_top_left: Point) {
        if let Some(el) = self.elements.iter_mut().find(|e| &e.id == id) {
            el.move_to(world_top_left);
        }
    }

    /// All elements in creation order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Look up an element by id.
    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| &e.id == id)
    }

    /// Topmost element under a world point, if any. Later-created
    /// elements sit on top, so the scan runs in reverse order.
    pub fn element_at(&self, world_point: Point) -> Option<ElementId> {
        self.elements
            .iter()
            .rev()
            .find(|e| e.contains(world_point))
            .map(|e| e.id.clone())
    }

    /// Minimum left/top across all elements, if any exist.
    pub fn min_origin(&self) -> Option<Point> {
        let first = self.elements.first()?;
        let mut min = first.origin();
        for el in &self.elements[1..] {
            let o = el.origin();
            min.x = min.x.min(o.x);
            min.y = min.y.min(o.y);
        }
        Some(min)
    }

    /// Shift every element by the same world-space delta, preserving
    /// relative layout.
    pub fn translate_all(&mut self, delta: Vec2) {
        for el in &mut self.elements {
            el.translate(delta);
        }
    }

    /// Replace the whole element set (Load). Preserves the incoming
    /// elements' ids and order.
    pub fn adopt(&mut self, elements: Vec<Element>) {
        self.elements = elements;
    }

    /// Remove every element.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Whether the store holds no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }
}

/// Milliseconds since the Unix epoch. Falls back to zero if the clock
/// reads before the epoch; uniqueness still holds via the index.
fn timestamp_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(left: f64, top: f64, w: f64, h: f64) -> Rect {
        Rect::from_origin_size(Point::new(left, top), (w, h))
    }

    #[test]
    fn test_create_and_order() {
        let mut store = ElementStore::new();
        let a = store.create(ElementKind::Button, rect(0.0, 0.0, 80.0, 30.0), "A".into());
        let b = store.create(ElementKind::Text, rect(100.0, 0.0, 80.0, 30.0), "B".into());

        let ids: Vec<_> = store.elements().iter().map(|e| e.id.clone()).collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[test]
    fn test_ids_unique_across_removal() {
        let mut store = ElementStore::new();
        let a = store.create(ElementKind::Button, rect(0.0, 0.0, 10.0, 10.0), "".into());
        let b = store.create(ElementKind::Button, rect(0.0, 0.0, 10.0, 10.0), "".into());
        store.remove(&b);
        let c = store.create(ElementKind::Button, rect(0.0, 0.0, 10.0, 10.0), "".into());

        assert_ne!(a, c);
        assert_ne!(b, c);
    }

    #[test]
    fn test_remove() {
        let mut store = ElementStore::new();
        let id = store.create(ElementKind::Input, rect(5.0, 5.0, 60.0, 20.0), "x".into());
        assert!(store.remove(&id).is_some());
        assert!(store.is_empty());
        assert!(store.remove(&id).is_none());
    }

    #[test]
    fn test_move_to() {
        let mut store = ElementStore::new();
        let id = store.create(ElementKind::Button, rect(10.0, 10.0, 80.0, 30.0), "".into());
        store.move_to(&id, Point::new(150.0, 180.0));

        let el = store.get(&id).unwrap();
        assert_eq!(el.origin(), Point::new(150.0, 180.0));
        assert_eq!(el.rect.size(), kurbo::Size::new(80.0, 30.0));
    }

    #[test]
    fn test_element_at_prefers_topmost() {
        let mut store = ElementStore::new();
        let below = store.create(ElementKind::Text, rect(0.0, 0.0, 100.0, 100.0), "".into());
        let above = store.create(ElementKind::Text, rect(50.0, 50.0, 100.0, 100.0), "".into());

        assert_eq!(store.element_at(Point::new(75.0, 75.0)), Some(above));
        assert_eq!(store.element_at(Point::new(25.0, 25.0)), Some(below));
        assert_eq!(store.element_at(Point::new(500.0, 500.0)), None);
    }

    #[test]
    fn test_min_origin_and_translate_all() {
        let mut store = ElementStore::new();
        store.create(ElementKind::Button, rect(2.0, 40.0, 10.0, 10.0), "".into());
        store.create(ElementKind::Button, rect(30.0, -3.0, 10.0, 10.0), "".into());

        assert_eq!(store.min_origin(), Some(Point::new(2.0, -3.0)));

        store.translate_all(Vec2::new(3.0, 8.0));
        assert_eq!(store.min_origin(), Some(Point::new(5.0, 5.0)));
        // Relative offsets preserved
        let origins: Vec<_> = store.elements().iter().map(|e| e.origin()).collect();
        assert_eq!(origins, vec![Point::new(5.0, 48.0), Point::new(33.0, 5.0)]);
    }
}
