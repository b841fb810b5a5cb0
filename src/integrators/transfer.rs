// Copyright @yucwang 2026

use crate::core::integrator::{FrameContext, Integrator};
use crate::core::primitive::SampleRecord;
use crate::materials::rule::alpha_weight;

/// Classified colour scaled by density, with sigmoid opacity. Samples come
/// out in the frame's traversal order.
pub struct TransferIntegrator;

impl Integrator for TransferIntegrator {
    fn sample(&self, frame: &FrameContext) -> Vec<SampleRecord> {
        let volume = frame.volume;
        let mut records = Vec::new();

        frame.order.for_each_voxel(volume.dims(), |x, y, z| {
            let position = volume.to_normalized(x, y, z);
            if !frame.region.contains(&position) {
                return;
            }
            let density = volume[(x, y, z)];
            if let Some(rule) = frame.rules.classify(density) {
                records.push(SampleRecord::new(position, rule.color * density, alpha_weight(density)));
            }
        });

        records
    }
}
