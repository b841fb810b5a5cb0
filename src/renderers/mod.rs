// Copyright @yucwang 2026

pub mod billboard;
pub mod cache;
pub mod recorder;
pub mod renderer;
pub mod simple;
