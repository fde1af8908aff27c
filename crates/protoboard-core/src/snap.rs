//! Align-snap for pulling elements onto a clicked guide line.

use crate::element::ElementId;
use crate::store::ElementStore;
use std::time::Duration;

/// Width of the snap window in world units. An align click at `c` pulls
/// elements whose edge coordinate lies in `(c, c + SNAP_WINDOW)`.
pub const SNAP_WINDOW: f64 = 20.0;

/// How long the transient guide line stays visible. Cosmetic only; it
/// never blocks input.
pub const GUIDE_DISPLAY: Duration = Duration::from_millis(500);

/// Orientation of a guide line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// A vertical line at a world x coordinate (left align).
    Vertical,
    /// A horizontal line at a world y coordinate (top align).
    Horizontal,
}

/// A transient alignment guide shown after a snap pass.
#[derive(Debug, Clone, PartialEq)]
pub struct GuideLine {
    pub axis: Axis,
    /// World coordinate of the line (x for vertical, y for horizontal).
    pub world_coord: f64,
    /// How long the adapter should keep the line on screen.
    pub display_for: Duration,
}

impl GuideLine {
    /// Create a guide at a world coordinate with the standard display
    /// duration.
    pub fn new(axis: Axis, world_coord: f64) -> Self {
        Self {
            axis,
            world_coord,
            display_for: GUIDE_DISPLAY,
        }
    }
}

/// Whether `coord` falls inside the snap window opened at `click`.
///
/// The window is snap-forward-only: it pulls elements positioned after
/// the click coordinate, never before it. This asymmetry is the
/// documented behavior, not an oversight to smooth over.
pub fn in_snap_window(click: f64, coord: f64) -> bool {
    coord > click && coord < click + SNAP_WINDOW
}

/// Pull every element whose `left` falls in the window onto `click_x`.
/// Returns the ids that moved.
pub fn align_left(store: &mut ElementStore, click_x: f64) -> Vec<ElementId> {
    let targets: Vec<(ElementId, f64)> = store
        .elements()
        .iter()
        .filter(|e| in_snap_window(click_x, e.origin().x))
        .map(|e| (e.id.clone(), e.origin().y))
        .collect();
    for (id, top) in &targets {
        store.move_to(id, kurbo::Point::new(click_x, *top));
    }
    targets.into_iter().map(|(id, _)| id).collect()
}

/// Pull every element whose `top` falls in the window onto `click_y`.
/// Returns the ids that moved.
pub fn align_top(store: &mut ElementStore, click_y: f64) -> Vec<ElementId> {
    let targets: Vec<(ElementId, f64)> = store
        .elements()
        .iter()
        .filter(|e| in_snap_window(click_y, e.origin().y))
        .map(|e| (e.id.clone(), e.origin().x))
        .collect();
    for (id, left) in &targets {
        store.move_to(id, kurbo::Point::new(*left, click_y));
    }
    targets.into_iter().map(|(id, _)| id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;
    use kurbo::{Point, Rect};

    fn store_with_lefts(lefts: &[f64]) -> ElementStore {
        let mut store = ElementStore::new();
        for &left in lefts {
            store.create(
                ElementKind::Button,
                Rect::from_origin_size(Point::new(left, 50.0), (40.0, 20.0)),
                String::new(),
            );
        }
        store
    }

    #[test]
    fn test_snap_window_is_forward_only() {
        // Elements before the click coordinate never snap.
        assert!(!in_snap_window(15.0, 10.0));
        assert!(!in_snap_window(15.0, 15.0));
        assert!(in_snap_window(15.0, 16.0));
        assert!(in_snap_window(15.0, 34.0));
        assert!(!in_snap_window(15.0, 35.0));
        assert!(!in_snap_window(15.0, 40.0));
    }

    #[test]
    fn test_align_left_snaps_only_window() {
        // Elements at left 10, 25, 40; click at x=15: only 25 snaps.
        let mut store = store_with_lefts(&[10.0, 25.0, 40.0]);
        let moved = align_left(&mut store, 15.0);

        assert_eq!(moved.len(), 1);
        let lefts: Vec<f64> = store.elements().iter().map(|e| e.origin().x).collect();
        assert_eq!(lefts, vec![10.0, 15.0, 40.0]);
    }

    #[test]
    fn test_align_left_keeps_top() {
        let mut store = store_with_lefts(&[20.0]);
        align_left(&mut store, 15.0);
        let el = &store.elements()[0];
        assert_eq!(el.origin(), Point::new(15.0, 50.0));
    }

    #[test]
    fn test_align_top() {
        let mut store = ElementStore::new();
        for &top in &[10.0, 25.0, 40.0] {
            store.create(
                ElementKind::Text,
                Rect::from_origin_size(Point::new(7.0, top), (40.0, 20.0)),
                String::new(),
            );
        }
        let moved = align_top(&mut store, 15.0);

        assert_eq!(moved.len(), 1);
        let tops: Vec<f64> = store.elements().iter().map(|e| e.origin().y).collect();
        assert_eq!(tops, vec![10.0, 15.0, 40.0]);
        // Lefts untouched.
        assert!(store.elements().iter().all(|e| e.origin().x == 7.0));
    }

    #[test]
    fn test_guide_line_duration() {
        let guide = GuideLine::new(Axis::Vertical, 15.0);
        assert_eq!(guide.display_for, GUIDE_DISPLAY);
    }
}
