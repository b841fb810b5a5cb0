// Copyright @yucwang 2026

pub mod grid_volume;
pub mod lod;

pub use grid_volume::Volume;
pub use lod::{downsample, LodLevel, LodSelector};
