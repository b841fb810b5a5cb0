// Copyright @yucwang 2026

use std::collections::HashMap;

use super::rule::{MaterialRule, RuleSet};
use crate::math::spectrum::RGBSpectrum;

/// Named rule sets, selected per dataset.
#[derive(Clone, Debug, Default)]
pub struct MaterialLibrary {
    sets: HashMap<String, RuleSet>,
}

impl MaterialLibrary {
    pub fn new() -> Self {
        Self { sets: HashMap::new() }
    }

    /// Presets for the two reference specimens, each with a shaded and a
    /// flat variant.
    pub fn builtin() -> Self {
        let brown = RGBSpectrum::new(0.33, 0.21, 0.1);
        let red = RGBSpectrum::new(1.0, 0.0, 0.0);
        let cyan = RGBSpectrum::new(0.0, 1.0, 1.0);
        let yellow = RGBSpectrum::new(1.0, 1.0, 0.0);

        let mut lib = MaterialLibrary::new();
        lib.insert(RuleSet::new(
            "bonsai",
            vec![
                MaterialRule::new("trunk", 0.5, 0.9, brown),
                MaterialRule::new("leaves", 0.13, 0.2, RGBSpectrum::new(0.0, 1.0, 0.0)),
            ],
        ));
        lib.insert(RuleSet::new(
            "bonsai_flat",
            vec![
                MaterialRule::new("trunk", 0.2, 0.6, brown),
                MaterialRule::new("leaves", 0.15, 0.17, RGBSpectrum::new(0.3, 0.66, 0.23)),
            ],
        ));
        lib.insert(RuleSet::new(
            "backpack",
            vec![
                MaterialRule::new("lightgrey", 0.25, 0.3, RGBSpectrum::gray(0.85)),
                MaterialRule::new("darkgrey", 0.18, 0.25, RGBSpectrum::gray(0.66)),
                MaterialRule::new("red", 0.9, 1.0, red),
                MaterialRule::new("lightblue", 0.61, 0.9, cyan),
                MaterialRule::new("yellow", 0.4, 0.55, yellow),
            ],
        ));
        lib.insert(RuleSet::new(
            "backpack_flat",
            vec![
                MaterialRule::new("lightgrey", 0.25, 0.3, RGBSpectrum::gray(0.85 * 0.05)),
                MaterialRule::new("darkgrey", 0.23, 0.25, RGBSpectrum::gray(0.66 * 0.05)),
                MaterialRule::new("red", 0.9, 1.0, red),
                MaterialRule::new("lightblue", 0.6, 0.9, cyan),
                MaterialRule::new("yellow", 0.5, 0.55, yellow),
            ],
        ));
        lib
    }

    /// Adds a set, replacing any set with the same name.
    pub fn insert(&mut self, set: RuleSet) -> Option<RuleSet> {
        self.sets.insert(set.name.clone(), set)
    }

    pub fn get(&self, name: &str) -> Option<&RuleSet> {
        self.sets.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sets.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn merge(&mut self, other: MaterialLibrary) {
        for (_, set) in other.sets {
            self.insert(set);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_sets() {
        let lib = MaterialLibrary::builtin();
        assert_eq!(lib.len(), 4);
        let bonsai = lib.get("bonsai").unwrap();
        assert_eq!(bonsai.classify(0.7).unwrap().name, "trunk");
        assert_eq!(bonsai.classify(0.15).unwrap().name, "leaves");
        assert!(bonsai.classify(0.3).is_none());

        let backpack = lib.get("backpack").unwrap();
        // 0.25 belongs to both greys; lightgrey is listed first
        assert_eq!(backpack.classify(0.25).unwrap().name, "lightgrey");
        assert_eq!(backpack.classify(0.9).unwrap().name, "red");
        assert!(lib.get("missing").is_none());
    }

    #[test]
    fn test_merge_overrides_by_name() {
        let mut lib = MaterialLibrary::builtin();
        let mut custom = MaterialLibrary::new();
        custom.insert(RuleSet::new(
            "bonsai",
            vec![MaterialRule::new("all", 0.0, 1.0, RGBSpectrum::gray(1.0))],
        ));
        lib.merge(custom);
        assert_eq!(lib.len(), 4);
        assert_eq!(lib.get("bonsai").unwrap().rules().len(), 1);
    }
}
