// Copyright @yucwang 2026

use crate::core::primitive::{DrawPrimitive, SampleRecord};
use crate::math::constants::Float;
use crate::sensors::camera::Camera;

/// Camera-facing square of half-size `size` centred on the sample.
pub fn billboard(record: &SampleRecord, camera: &Camera, size: Float) -> DrawPrimitive {
    let c = record.position;
    let r = camera.right();
    let u = *camera.up();
    DrawPrimitive::Quad {
        corners: [
            c - (r + u) * size,
            c + (r - u) * size,
            c + (r + u) * size,
            c - (r - u) * size,
        ],
        color: record.color,
        alpha: record.alpha,
    }
}
