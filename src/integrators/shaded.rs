// Copyright @yucwang 2026

use crate::core::integrator::{FrameContext, Integrator};
use crate::core::primitive::SampleRecord;
use crate::materials::rule::alpha_weight;
use crate::math::constants::Float;
use crate::math::vector::normalize_or_zero;

/// Diffuse shading from the density gradient.
///
/// Interior voxels get `colour * density * dot(n, l)` with `n` the negated,
/// normalized central difference. The diffuse term is not clamped,
/// so surfaces facing away from the light come out negative.
/// Boundary voxels have no full neighbourhood and fall back to
/// `colour * density`.
///
/// With enhancement enabled and the camera closer to the volume than
/// `enhance_distance`, each shaded voxel is re-classified with its smoothed
/// density and a second record is emitted for the matching rule.
pub struct ShadedIntegrator {
    enhance_distance: Option<Float>,
}

impl ShadedIntegrator {
    pub fn new() -> Self {
        Self { enhance_distance: None }
    }

    pub fn with_enhancement(enhance_distance: Float) -> Self {
        Self { enhance_distance: Some(enhance_distance) }
    }
}

impl Integrator for ShadedIntegrator {
    fn sample(&self, frame: &FrameContext) -> Vec<SampleRecord> {
        let volume = frame.volume;
        let enhance = self
            .enhance_distance
            .map_or(false, |limit| frame.camera.distance_to_origin() < limit);
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
            let alpha = alpha_weight(density);

            let gradient = match volume.gradient(x, y, z) {
                Some(g) => g,
                None => {
                    records.push(SampleRecord::new(position, rule.color * density, alpha));
                    return;
                }
            };
            let normal = normalize_or_zero(&-gradient);
            let diffuse = density * normal.dot(&frame.light_dir);
            records.push(SampleRecord::new(position, rule.color * diffuse, alpha));

            if !enhance {
                return;
            }
            let smoothed = match volume.smoothed_density(x, y, z) {
                Some(s) => s,
                None => return,
            };
            if let Some(second) = frame.rules.classify(smoothed) {
                records.push(SampleRecord::new(position, second.color * diffuse, alpha));
            }
        });

        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrators::order::TraversalOrder;
    use crate::integrators::test_util::{cube_region, single_rule};
    use crate::materials::rule::{MaterialRule, RuleSet};
    use crate::math::constants::Vector3f;
    use crate::math::spectrum::RGBSpectrum;
    use crate::sensors::camera::Camera;
    use crate::volumes::grid_volume::Volume;

    // density falls off along +x, so the surface normal points to +x
    fn ramp_x() -> Volume {
        let mut volume = Volume::new(3, 3, 3);
        for z in 0..3 {
            for y in 0..3 {
                for x in 0..3 {
                    volume[(x, y, z)] = 0.8 - 0.2 * x as Float;
                }
            }
        }
        volume
    }

    fn shade(volume: &Volume, light_dir: Vector3f, camera: &Camera, integrator: &ShadedIntegrator) -> Vec<SampleRecord> {
        let rules = single_rule(0.0, 1.0, RGBSpectrum::gray(1.0));
        let region = cube_region(volume);
        let frame = FrameContext {
            volume,
            rules: &rules,
            region: &region,
            camera,
            light_dir,
            order: TraversalOrder::default(),
        };
        integrator.sample(&frame)
    }

    fn center_record(volume: &Volume, records: &[SampleRecord]) -> SampleRecord {
        let center = volume.to_normalized(1, 1, 1);
        *records.iter().find(|r| r.position == center).unwrap()
    }

    #[test]
    fn test_diffuse_term_sign() {
        let volume = ramp_x();
        let camera = Camera::default();
        let lit = shade(&volume, Vector3f::x(), &camera, &ShadedIntegrator::new());
        assert_eq!(lit.len(), 27);
        let c = center_record(&volume, &lit);
        assert!((c.color.r() - 0.6).abs() < 1e-5);
        assert!((c.alpha - alpha_weight(0.6)).abs() < 1e-6);

        let back = shade(&volume, -Vector3f::x(), &camera, &ShadedIntegrator::new());
        assert!((center_record(&volume, &back).color.r() + 0.6).abs() < 1e-5);
    }

    #[test]
    fn test_boundary_and_flat_regions() {
        let volume = Volume::uniform(3, 3, 3, 0.5);
        let records = shade(&volume, Vector3f::x(), &Camera::default(), &ShadedIntegrator::new());
        // zero gradient gives zero normal in the middle, plain colour elsewhere
        let dark = records.iter().filter(|r| r.color.is_black()).count();
        assert_eq!(dark, 1);
        assert!(records.iter().filter(|r| !r.color.is_black()).all(|r| r.color == RGBSpectrum::gray(0.5)));
    }

    #[test]
    fn test_enhancement_only_close_up() {
        let volume = ramp_x();
        let near = Camera::look_at(Vector3f::new(0.0, 0.0, 1.5), Vector3f::zeros(), Vector3f::y());
        let far = Camera::look_at(Vector3f::new(0.0, 0.0, 5.0), Vector3f::zeros(), Vector3f::y());
        let integrator = ShadedIntegrator::with_enhancement(2.0);

        assert_eq!(shade(&volume, Vector3f::x(), &near, &integrator).len(), 28);
        assert_eq!(shade(&volume, Vector3f::x(), &far, &integrator).len(), 27);
    }

    #[test]
    fn test_enhancement_uses_smoothed_rule_colour() {
        // a dense spike in the middle of the ramp: its diagonal neighbours
        // average to 0.6, which falls in a different rule than 0.9
        let mut volume = ramp_x();
        volume[(1, 1, 1)] = 0.9;
        let rules = RuleSet::new(
            "two",
            vec![
                MaterialRule::new("spike", 0.85, 1.0, RGBSpectrum::new(1.0, 0.0, 0.0)),
                MaterialRule::new("body", 0.0, 0.8, RGBSpectrum::new(0.0, 1.0, 0.0)),
            ],
        );
        let region = cube_region(&volume);
        let camera = Camera::look_at(Vector3f::new(0.0, 0.0, 1.5), Vector3f::zeros(), Vector3f::y());
        let frame = FrameContext {
            volume: &volume,
            rules: &rules,
            region: &region,
            camera: &camera,
            light_dir: Vector3f::x(),
            order: TraversalOrder::default(),
        };
        let records = ShadedIntegrator::with_enhancement(2.0).sample(&frame);

        let center = volume.to_normalized(1, 1, 1);
        let at_center: Vec<&SampleRecord> = records.iter().filter(|r| r.position == center).collect();
        assert_eq!(at_center.len(), 2);
        let (shaded, enhanced) = (at_center[0], at_center[1]);

        // gradient is still along -x, so dot(n, l) = 1 and the diffuse term is the raw density
        assert!((shaded.color.r() - 0.9).abs() < 1e-5);
        assert_eq!(shaded.color.g(), 0.0);
        assert_eq!(enhanced.color.r(), 0.0);
        assert!((enhanced.color.g() - 0.9).abs() < 1e-5);
        assert_eq!(enhanced.alpha, shaded.alpha);
        assert!((enhanced.alpha - alpha_weight(0.9)).abs() < 1e-6);
    }
}
