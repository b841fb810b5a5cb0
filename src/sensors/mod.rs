// Copyright @yucwang 2026

pub mod camera;

pub use camera::Camera;
