// Copyright @yucwang 2026

use crate::core::primitive::SampleRecord;
use crate::integrators::order::TraversalOrder;
use crate::materials::rule::RuleSet;
use crate::math::constants::Vector3f;
use crate::sensors::camera::Camera;
use crate::shapes::region::RegionOfInterest;
use crate::volumes::grid_volume::Volume;

/// Everything a sampling pass reads. Nothing in here is mutated.
pub struct FrameContext<'a> {
    pub volume: &'a Volume,
    pub rules: &'a RuleSet,
    pub region: &'a RegionOfInterest,
    pub camera: &'a Camera,
    /// Unit direction towards the light, or zero for no light.
    pub light_dir: Vector3f,
    pub order: TraversalOrder,
}

/// Turns a volume into an ordered list of visible samples.
pub trait Integrator {
    fn sample(&self, frame: &FrameContext) -> Vec<SampleRecord>;
}
