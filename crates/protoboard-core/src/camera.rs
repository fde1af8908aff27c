//! Camera module for the view/world pan transform.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Camera manages the view transform for the canvas.
///
/// It handles panning (translation only, there is no zoom), converting
/// between view coordinates (pixels relative to the visible canvas) and
/// world coordinates (element geometry independent of pan).
///
/// All offsets are kept integer-valued: pointer positions are truncated
/// before they reach the camera, so `to_world(to_view(p)) == p` holds
/// exactly with no rounding loss.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan), `view = world + offset`.
    pub offset: Vec2,
}

impl Camera {
    /// Create a new camera at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a view point to world coordinates.
    pub fn to_world(&self, view_point: Point) -> Point {
        view_point - self.offset
    }

    /// Convert a world point to view coordinates.
    pub fn to_view(&self, world_point: Point) -> Point {
        world_point + self.offset
    }

    /// Pan the camera by a delta in view coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Reset the pan offset to zero.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
    }
}

/// Truncate a point to whole pixels. Geometry round-trips through
/// integer pixel lengths, so fractional pointer positions are dropped
/// at the door.
pub fn trunc_point(p: Point) -> Point {
    Point::new(p.x.trunc(), p.y.trunc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera() {
        let camera = Camera::new();
        assert_eq!(camera.offset, Vec2::ZERO);
    }

    #[test]
    fn test_to_world_identity() {
        let camera = Camera::new();
        let view = Point::new(100.0, 200.0);
        assert_eq!(camera.to_world(view), view);
    }

    #[test]
    fn test_to_world_with_offset() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(50.0, 100.0);
        let view = Point::new(100.0, 200.0);
        assert_eq!(camera.to_world(view), Point::new(50.0, 100.0));
    }

    #[test]
    fn test_roundtrip_exact() {
        let mut camera = Camera::new();
        camera.pan(Vec2::new(37.0, -142.0));

        for &(x, y) in &[(0.0, 0.0), (123.0, 456.0), (-9.0, 7.0), (99999.0, -31.0)] {
            let p = Point::new(x, y);
            assert_eq!(camera.to_world(camera.to_view(p)), p);
            assert_eq!(camera.to_view(camera.to_world(p)), p);
        }
    }

    #[test]
    fn test_incremental_pan_accumulates() {
        let mut camera = Camera::new();
        camera.pan(Vec2::new(10.0, 20.0));
        camera.pan(Vec2::new(-3.0, 5.0));
        assert_eq!(camera.offset, Vec2::new(7.0, 25.0));
    }

    #[test]
    fn test_reset() {
        let mut camera = Camera::new();
        camera.pan(Vec2::new(10.0, 20.0));
        camera.reset();
        assert_eq!(camera.offset, Vec2::ZERO);
    }

    #[test]
    fn test_trunc_point() {
        assert_eq!(trunc_point(Point::new(10.9, -3.7)), Point::new(10.0, -3.0));
    }
}
