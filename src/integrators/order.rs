// Copyright @yucwang 2026

use crate::math::constants::Vector3f;
use crate::math::vector::Axis;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TraversalDirection {
    Increasing,
    Decreasing,
}

/// Slice axis and direction for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TraversalOrder {
    pub axis: Axis,
    pub direction: TraversalDirection,
}

impl Default for TraversalOrder {
    fn default() -> Self {
        Self { axis: Axis::Z, direction: TraversalDirection::Increasing }
    }
}

impl TraversalOrder {
    pub fn new(axis: Axis, direction: TraversalDirection) -> Self {
        Self { axis, direction }
    }

    /// Back-to-front order for a camera looking along `forward`: slices
    /// furthest along the view direction come first.
    pub fn back_to_front(forward: &Vector3f) -> Self {
        let axis = Axis::dominant(forward);
        let direction = if forward[axis.index()] > 0.0 {
            TraversalDirection::Decreasing
        } else {
            TraversalDirection::Increasing
        };
        Self { axis, direction }
    }

    /// Visits every voxel of a `dims` grid. The slice axis is the outer loop,
    /// followed by the next axis and the one after it (cyclically). A
    /// decreasing order reverses all three loops.
    pub fn for_each_voxel<F>(&self, dims: (usize, usize, usize), mut f: F)
    where
        F: FnMut(usize, usize, usize),
    {
        let size = [dims.0, dims.1, dims.2];
        let outer = self.axis.index();
        let middle = self.axis.next().index();
        let inner = self.axis.next().next().index();
        let reverse = self.direction == TraversalDirection::Decreasing;

        let mut idx = [0usize; 3];
        for k in ordered(size[outer], reverse) {
            idx[outer] = k;
            for j in ordered(size[middle], reverse) {
                idx[middle] = j;
                for i in ordered(size[inner], reverse) {
                    idx[inner] = i;
                    f(idx[0], idx[1], idx[2]);
                }
            }
        }
    }
}

fn ordered(n: usize, reverse: bool) -> impl Iterator<Item = usize> {
    (0..n).map(move |v| if reverse { n - 1 - v } else { v })
}
