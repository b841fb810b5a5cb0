// Copyright @yucwang 2026

use crate::math::aabb::AABB;
use crate::math::constants::{Float, Vector3f};
use crate::math::interpolation::trilinear;
use std::ops;

/// Dense `width x height x depth` grid of normalized densities, x fastest.
///
/// Indexing with `(x, y, z)` is not range-checked beyond the slice bounds
/// check; callers derive their loop bounds from the grid itself.
#[derive(Clone, Debug, PartialEq)]
pub struct Volume {
    data: Vec<Float>,
    width: usize,
    height: usize,
    depth: usize,
}

impl Default for Volume {
    fn default() -> Self {
        Volume::empty()
    }
}

impl ops::Index<(usize, usize, usize)> for Volume {
    type Output = Float;

    fn index(&self, index: (usize, usize, usize)) -> &Float {
        &self.data[self.offset(index.0, index.1, index.2)]
    }
}

impl ops::IndexMut<(usize, usize, usize)> for Volume {
    fn index_mut(&mut self, index: (usize, usize, usize)) -> &mut Float {
        let idx = self.offset(index.0, index.1, index.2);
        &mut self.data[idx]
    }
}

impl Volume {
    pub fn empty() -> Self {
        Self { data: Vec::new(), width: 0, height: 0, depth: 0 }
    }

    pub fn new(width: usize, height: usize, depth: usize) -> Self {
        Volume::uniform(width, height, depth, 0.0)
    }

    pub fn uniform(width: usize, height: usize, depth: usize, value: Float) -> Self {
        Self {
            data: vec![value; width * height * depth],
            width,
            height,
            depth,
        }
    }

    pub fn from_data(width: usize, height: usize, depth: usize, data: Vec<Float>) -> Result<Self, String> {
        let expected = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(depth))
            .ok_or_else(|| "volume dimensions overflow".to_string())?;
        if data.len() != expected {
            return Err(format!(
                "volume {}x{}x{} needs {} samples, got {}",
                width, height, depth, expected, data.len()
            ));
        }
        Ok(Self { data, width, height, depth })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn dims(&self) -> (usize, usize, usize) {
        (self.width, self.height, self.depth)
    }

    pub fn total_element_count(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn largest_dimension(&self) -> usize {
        self.width.max(self.height).max(self.depth)
    }

    pub fn data(&self) -> &[Float] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [Float] {
        &mut self.data
    }

    fn offset(&self, x: usize, y: usize, z: usize) -> usize {
        (z * self.height + y) * self.width + x
    }

    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<Float> {
        if x < self.width && y < self.height && z < self.depth {
            Some(self.data[self.offset(x, y, z)])
        } else {
            None
        }
    }

    /// True when the voxel has both neighbours on every axis.
    pub fn is_interior(&self, x: usize, y: usize, z: usize) -> bool {
        x > 0 && y > 0 && z > 0
            && x + 1 < self.width && y + 1 < self.height && z + 1 < self.depth
    }

    /// Maps grid index `i` to `2 i / L - 1`, `L` being the largest dimension.
    pub fn to_normalized(&self, x: usize, y: usize, z: usize) -> Vector3f {
        let largest = self.largest_dimension().max(1) as Float;
        Vector3f::new(
            2.0 * x as Float / largest - 1.0,
            2.0 * y as Float / largest - 1.0,
            2.0 * z as Float / largest - 1.0,
        )
    }

    /// Extent of the grid in normalized coordinates; the minimum corner is
    /// always (-1, -1, -1).
    pub fn normalized_bounds(&self) -> AABB {
        let largest = self.largest_dimension().max(1) as Float;
        AABB::new(
            Vector3f::new(-1.0, -1.0, -1.0),
            Vector3f::new(
                2.0 * self.width as Float / largest - 1.0,
                2.0 * self.height as Float / largest - 1.0,
                2.0 * self.depth as Float / largest - 1.0,
            ),
        )
    }

    /// Offset that centres a non-cubic grid around the origin.
    pub fn centering_offset(&self) -> Vector3f {
        let largest = self.largest_dimension();
        if largest == 0 {
            return Vector3f::zeros();
        }
        let l = largest as Float;
        Vector3f::new(
            (largest - self.width) as Float / l,
            (largest - self.height) as Float / l,
            (largest - self.depth) as Float / l,
        )
    }

    /// Trilinear value at the centre of the cell spanned by the voxel's
    /// diagonal neighbours. Interior voxels only.
    pub fn smoothed_density(&self, x: usize, y: usize, z: usize) -> Option<Float> {
        if !self.is_interior(x, y, z) {
            return None;
        }
        let mut corners = [0.0; 8];
        for (i, c) in corners.iter_mut().enumerate() {
            let xi = if i & 1 == 0 { x - 1 } else { x + 1 };
            let yi = if i & 2 == 0 { y - 1 } else { y + 1 };
            let zi = if i & 4 == 0 { z - 1 } else { z + 1 };
            *c = self[(xi, yi, zi)];
        }
        Some(trilinear(&Vector3f::new(0.5, 0.5, 0.5), &corners))
    }

    /// Central-difference gradient. Interior voxels only.
    pub fn gradient(&self, x: usize, y: usize, z: usize) -> Option<Vector3f> {
        if !self.is_interior(x, y, z) {
            return None;
        }
        Some(Vector3f::new(
            (self[(x + 1, y, z)] - self[(x - 1, y, z)]) / 2.0,
            (self[(x, y + 1, z)] - self[(x, y - 1, z)]) / 2.0,
            (self[(x, y, z + 1)] - self[(x, y, z - 1)]) / 2.0,
        ))
    }
}
