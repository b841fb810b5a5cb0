// Copyright @yucwang 2026

use crate::core::primitive::SampleRecord;
use crate::integrators::order::TraversalOrder;
use crate::math::constants::Vector3f;
use crate::shapes::region::RegionOfInterest;

/// Everything the cached samples depend on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CacheKey {
    pub generation: u64,
    pub light: Vector3f,
    pub order: TraversalOrder,
    pub region: RegionOfInterest,
}

/// Sample list reused across frames until its key changes.
#[derive(Debug, Default)]
pub struct ArrayCache {
    key: Option<CacheKey>,
    records: Vec<SampleRecord>,
}

impl ArrayCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid_for(&self, key: &CacheKey) -> bool {
        self.key.as_ref() == Some(key)
    }

    /// Returns the cached records, rebuilding them first when `key` differs
    /// from the one they were built for. The flag tells whether the old
    /// records were reused.
    pub fn get_or_build<F>(&mut self, key: CacheKey, build: F) -> (&[SampleRecord], bool)
    where
        F: FnOnce() -> Vec<SampleRecord>,
    {
        let hit = self.is_valid_for(&key);
        if !hit {
            log::debug!("Rebuilding sample array for {:?}.", key.order);
            self.records = build();
            self.key = Some(key);
        }
        (&self.records, hit)
    }
}
