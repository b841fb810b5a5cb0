// Copyright @yucwang 2026

use crate::core::integrator::{FrameContext, Integrator};
use crate::core::primitive::SampleRecord;
use crate::math::constants::Float;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FlatStyle {
    /// Material colour as is, fully opaque.
    Solid,
    /// `colour * density * gain`, meant for additive blending.
    Additive { gain: Float },
}

/// Unshaded, unweighted points. Relies on depth testing or additive
/// blending, so the visiting order is irrelevant.
pub struct FlatIntegrator {
    style: FlatStyle,
}

impl FlatIntegrator {
    pub fn new(style: FlatStyle) -> Self {
        Self { style }
    }
}

impl Integrator for FlatIntegrator {
    fn sample(&self, frame: &FrameContext) -> Vec<SampleRecord> {
        let volume = frame.volume;
        let mut records = Vec::new();

        frame.order.for_each_voxel(volume.dims(), |x, y, z| {
            let position = volume.to_normalized(x, y, z);
            if !frame.region.contains(&position) {
                return;
            }
            let density = volume[(x, y, z)];
            let rule = match frame.rules.classify(density) {
                Some(rule) => rule,
                None => return,
            };
            let color = match self.style {
                FlatStyle::Solid => rule.color,
                FlatStyle::Additive { gain } => rule.color * (density * gain),
            };
            records.push(SampleRecord::new(position, color, 1.0));
        });

        records
    }
}
