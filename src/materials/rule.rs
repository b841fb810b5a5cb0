// Copyright @yucwang 2026

use crate::math::constants::Float;
use crate::math::spectrum::RGBSpectrum;

/// Closed density interval mapped to a base colour.
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialRule {
    pub name: String,
    low: Float,
    high: Float,
    pub color: RGBSpectrum,
}

impl MaterialRule {
    /// Bounds are reordered so that `low <= high` always holds.
    pub fn new(name: &str, low: Float, high: Float, color: RGBSpectrum) -> Self {
        Self {
            name: name.to_string(),
            low: low.min(high),
            high: high.max(low),
            color,
        }
    }

    pub fn low(&self) -> Float {
        self.low
    }

    pub fn high(&self) -> Float {
        self.high
    }

    pub fn matches(&self, density: Float) -> bool {
        density >= self.low && density <= self.high
    }
}

/// Ordered rules; the first match wins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RuleSet {
    pub name: String,
    rules: Vec<MaterialRule>,
}

impl RuleSet {
    pub fn new(name: &str, rules: Vec<MaterialRule>) -> Self {
        Self { name: name.to_string(), rules }
    }

    pub fn push(&mut self, rule: MaterialRule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[MaterialRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn classify(&self, density: Float) -> Option<&MaterialRule> {
        self.rules.iter().find(|r| r.matches(density))
    }
}

/// Opacity for a normalized density: `1 / (1 + (d / (1 - d))^-1.5)`.
///
/// Densities at or beyond the ends of [0, 1] map to 0 and 1.
pub fn alpha_weight(density: Float) -> Float {
    if density <= 0.0 {
        return 0.0;
    }
    if density >= 1.0 {
        return 1.0;
    }
    let odds = density / (1.0 - density);
    1.0 / (1.0 + odds.powf(-1.5))
}
