// Copyright @yucwang 2026

use crate::core::primitive::{DrawPrimitive, RenderState};

use super::renderer::PrimitiveSink;

/// Keeps the last frame in memory instead of drawing it.
#[derive(Debug, Default)]
pub struct FrameRecorder {
    state: Option<RenderState>,
    primitives: Vec<DrawPrimitive>,
    frames: usize,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Option<&RenderState> {
        self.state.as_ref()
    }

    pub fn primitives(&self) -> &[DrawPrimitive] {
        &self.primitives
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Counts of (points, quads, wireframe pieces) in the last frame.
    pub fn counts(&self) -> (usize, usize, usize) {
        self.primitives.iter().fold((0, 0, 0), |(p, q, w), prim| match prim {
            DrawPrimitive::Point(_) => (p + 1, q, w),
            DrawPrimitive::Quad { .. } => (p, q + 1, w),
            _ => (p, q, w + 1),
        })
    }
}

impl PrimitiveSink for FrameRecorder {
    fn begin_frame(&mut self, state: &RenderState) {
        self.state = Some(*state);
        self.primitives.clear();
    }

    fn draw(&mut self, primitive: DrawPrimitive) {
        self.primitives.push(primitive);
    }

    fn end_frame(&mut self) {
        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::primitive::SampleRecord;
    use crate::math::constants::Vector3f;
    use crate::math::spectrum::RGBSpectrum;

    #[test]
    fn test_recorder_keeps_last_frame() {
        let mut rec = FrameRecorder::new();
        let point = DrawPrimitive::Point(SampleRecord::new(Vector3f::zeros(), RGBSpectrum::gray(1.0), 1.0));
        rec.begin_frame(&RenderState::default());
        rec.draw(point.clone());
        rec.draw(point.clone());
        rec.end_frame();
        rec.begin_frame(&RenderState::default());
        rec.draw(point);
        rec.end_frame();
        assert_eq!(rec.frames(), 2);
        assert_eq!(rec.counts(), (1, 0, 0));
    }
}
