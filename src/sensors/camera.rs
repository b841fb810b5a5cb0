// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector3f};
use crate::math::vector::normalize_or_zero;

/// Viewer pose in normalized volume space. The volume is centred at the
/// origin, so distances to the volume are distances to the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    position: Vector3f,
    forward: Vector3f,
    up: Vector3f,
}

impl Default for Camera {
    fn default() -> Self {
        Camera::look_at(Vector3f::new(0.0, 0.0, 3.0), Vector3f::zeros(), Vector3f::y())
    }
}

impl Camera {
    pub fn new(position: Vector3f, forward: Vector3f, up: Vector3f) -> Self {
        Self {
            position,
            forward: normalize_or_zero(&forward),
            up: normalize_or_zero(&up),
        }
    }

    pub fn look_at(origin: Vector3f, target: Vector3f, up: Vector3f) -> Self {
        Camera::new(origin, target - origin, up)
    }

    pub fn position(&self) -> &Vector3f {
        &self.position
    }

    pub fn forward(&self) -> &Vector3f {
        &self.forward
    }

    pub fn up(&self) -> &Vector3f {
        &self.up
    }

    /// `up x forward`, the in-screen horizontal used for billboards.
    pub fn right(&self) -> Vector3f {
        self.up.cross(&self.forward)
    }

    pub fn distance_to_origin(&self) -> Float {
        self.position.norm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_frame() {
        let cam = Camera::look_at(Vector3f::new(0.0, 0.0, 4.0), Vector3f::zeros(), Vector3f::new(0.0, 2.0, 0.0));
        assert_eq!(*cam.forward(), Vector3f::new(0.0, 0.0, -1.0));
        assert_eq!(*cam.up(), Vector3f::new(0.0, 1.0, 0.0));
        assert_eq!(cam.right(), Vector3f::new(-1.0, 0.0, 0.0));
        assert!((cam.distance_to_origin() - 4.0).abs() < 1e-6);
    }
}
