// Copyright @yucwang 2021

use crate::core::primitive::{DrawPrimitive, RenderState};
use crate::core::session::Session;
use crate::sensors::camera::Camera;

/// Receiver of draw calls. Rasterization happens on the other side.
pub trait PrimitiveSink {
    fn begin_frame(&mut self, state: &RenderState);
    fn draw(&mut self, primitive: DrawPrimitive);
    fn end_frame(&mut self) {}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub primitives: usize,
    pub samples: usize,
    pub cache_hit: bool,
}

pub trait Renderer {
    fn render(&mut self, session: &Session, camera: &Camera, sink: &mut dyn PrimitiveSink) -> FrameStats;
}
