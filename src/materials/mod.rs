// Copyright @yucwang 2026

pub mod library;
pub mod rule;

pub use library::MaterialLibrary;
pub use rule::{alpha_weight, MaterialRule, RuleSet};
