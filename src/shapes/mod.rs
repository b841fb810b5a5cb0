// Copyright @yucwang 2026

pub mod region;

pub use region::{RegionKind, RegionOfInterest, RegionSettings};
