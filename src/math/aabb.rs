// Copyright 2020 @TwoCookingMice

use super::constants::Vector3f;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AABB {
    pub p_min: Vector3f,
    pub p_max: Vector3f
}

impl AABB {
    pub fn new(p_min: Vector3f, p_max: Vector3f) -> Self {
        let mut min = Vector3f::new(0.0, 0.0, 0.0);
        let mut max = Vector3f::new(0.0, 0.0, 0.0);
        for idx in 0..3 {
            min[idx] = p_min[idx].min(p_max[idx]);
            max[idx] = p_max[idx].max(p_min[idx]);
        }
        Self { p_min: min, p_max: max }
    }

    pub fn from_extent(p_min: Vector3f, extent: Vector3f) -> Self {
        AABB::new(p_min, p_min + extent)
    }

    pub fn center(&self) -> Vector3f {
        0.5f32 * self.p_min + 0.5f32 * self.p_max
    }

    pub fn diagnal(&self) -> Vector3f {
        self.p_max - self.p_min
    }

    /// Inclusive on every face.
    pub fn contains(&self, p: &Vector3f) -> bool {
        (0..3).all(|idx| self.p_min[idx] <= p[idx] && p[idx] <= self.p_max[idx])
    }

    /// Corner `i` has bit 0/1/2 selecting max over min on x/y/z.
    pub fn corner(&self, i: usize) -> Vector3f {
        Vector3f::new(
            if i & 1 == 0 { self.p_min.x } else { self.p_max.x },
            if i & 2 == 0 { self.p_min.y } else { self.p_max.y },
            if i & 4 == 0 { self.p_min.z } else { self.p_max.z },
        )
    }

    /// The 12 box edges as corner pairs.
    pub fn edges(&self) -> [(Vector3f, Vector3f); 12] {
        const PAIRS: [(usize, usize); 12] = [
            (0, 1), (2, 3), (4, 5), (6, 7),
            (0, 2), (1, 3), (4, 6), (5, 7),
            (0, 4), (1, 5), (2, 6), (3, 7),
        ];
        let mut out = [(Vector3f::zeros(), Vector3f::zeros()); 12];
        for (slot, (a, b)) in out.iter_mut().zip(PAIRS.iter()) {
            *slot = (self.corner(*a), self.corner(*b));
        }
        out
    }
}

/* Test for AABB */
