// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector3f};
use crate::math::spectrum::RGBSpectrum;

/// One visible sample: where to draw it, its colour and opacity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleRecord {
    pub position: Vector3f,
    pub color: RGBSpectrum,
    pub alpha: Float,
}

impl SampleRecord {
    pub fn new(position: Vector3f, color: RGBSpectrum, alpha: Float) -> Self {
        Self { position, color, alpha }
    }
}

/// What the renderer collaborator is asked to draw.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawPrimitive {
    Point(SampleRecord),
    /// Corners in drawing order.
    Quad {
        corners: [Vector3f; 4],
        color: RGBSpectrum,
        alpha: Float,
    },
    Line {
        from: Vector3f,
        to: Vector3f,
        color: RGBSpectrum,
    },
    /// Closed polyline.
    LineLoop {
        points: Vec<Vector3f>,
        color: RGBSpectrum,
    },
}

impl DrawPrimitive {
    pub fn is_wireframe(&self) -> bool {
        matches!(self, DrawPrimitive::Line { .. } | DrawPrimitive::LineLoop { .. })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlendMode {
    Opaque,
    Additive,
    Alpha,
}

/// Fixed-function state the renderer applies before a frame's primitives.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderState {
    pub blend: BlendMode,
    pub depth_test: bool,
    pub point_size: Float,
    /// Centres a non-cubic grid around the origin.
    pub translation: Vector3f,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            blend: BlendMode::Opaque,
            depth_test: true,
            point_size: 1.0,
            translation: Vector3f::zeros(),
        }
    }
}
