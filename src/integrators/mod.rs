// Copyright @yucwang 2026

pub mod flat;
pub mod order;
pub mod shaded;
pub mod transfer;

#[cfg(test)]
pub(crate) mod test_util {
    use crate::materials::rule::{MaterialRule, RuleSet};
    use crate::math::constants::Float;
    use crate::math::spectrum::RGBSpectrum;
    use crate::shapes::region::RegionOfInterest;
    use crate::volumes::grid_volume::Volume;

    pub fn single_rule(low: Float, high: Float, color: RGBSpectrum) -> RuleSet {
        RuleSet::new("test", vec![MaterialRule::new("only", low, high, color)])
    }

    pub fn cube_region(volume: &Volume) -> RegionOfInterest {
        let bounds = volume.normalized_bounds();
        RegionOfInterest::Cube { min_corner: bounds.p_min, extent: bounds.diagnal() }
    }
}
