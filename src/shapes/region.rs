// Copyright @yucwang 2026

use crate::core::primitive::DrawPrimitive;
use crate::math::aabb::AABB;
use crate::math::constants::{Float, Vector3f, PI};
use crate::math::spectrum::RGBSpectrum;
use crate::math::vector::Axis;

const CIRCLE_SEGMENTS: usize = 32;

/// Region of interest in normalized volume coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RegionOfInterest {
    Sphere { center: Vector3f, radius: Float },
    Cube { min_corner: Vector3f, extent: Vector3f },
    Slab { axis: Axis, origin: Float, length: Float },
}

impl RegionOfInterest {
    pub fn contains(&self, p: &Vector3f) -> bool {
        match *self {
            RegionOfInterest::Sphere { center, radius } => (p - center).norm_squared() < radius * radius,
            RegionOfInterest::Cube { min_corner, extent } => AABB::from_extent(min_corner, extent).contains(p),
            RegionOfInterest::Slab { axis, origin, length } => {
                let v = p[axis.index()];
                v >= origin && v <= origin + length
            }
        }
    }

    /// Wireframe for the region. `bounds` limits the in-plane extent of slabs.
    pub fn outline(&self, bounds: &AABB) -> Vec<DrawPrimitive> {
        let white = RGBSpectrum::gray(1.0);
        match *self {
            RegionOfInterest::Cube { min_corner, extent } => AABB::from_extent(min_corner, extent)
                .edges()
                .iter()
                .map(|&(from, to)| DrawPrimitive::Line { from, to, color: white })
                .collect(),
            RegionOfInterest::Sphere { center, radius } => {
                let diag = std::f32::consts::FRAC_1_SQRT_2;
                let normals = [
                    Vector3f::x(),
                    Vector3f::y(),
                    Vector3f::z(),
                    Vector3f::new(diag, diag, 0.0),
                    Vector3f::new(diag, -diag, 0.0),
                    Vector3f::new(0.0, diag, diag),
                    Vector3f::new(0.0, diag, -diag),
                ];
                normals
                    .iter()
                    .map(|n| DrawPrimitive::LineLoop {
                        points: circle(&center, radius, n),
                        color: white,
                    })
                    .collect()
            }
            RegionOfInterest::Slab { axis, origin, length } => {
                let a = axis.index();
                let (u, v) = ((a + 1) % 3, (a + 2) % 3);
                [origin, origin + length]
                    .iter()
                    .map(|&plane| {
                        let mut corners = [Vector3f::zeros(); 4];
                        let uv = [
                            (bounds.p_min[u], bounds.p_min[v]),
                            (bounds.p_max[u], bounds.p_min[v]),
                            (bounds.p_max[u], bounds.p_max[v]),
                            (bounds.p_min[u], bounds.p_max[v]),
                        ];
                        for (c, &(cu, cv)) in corners.iter_mut().zip(uv.iter()) {
                            c[a] = plane;
                            c[u] = cu;
                            c[v] = cv;
                        }
                        DrawPrimitive::Quad { corners, color: white, alpha: 0.3 }
                    })
                    .collect()
            }
        }
    }
}

fn circle(center: &Vector3f, radius: Float, normal: &Vector3f) -> Vec<Vector3f> {
    let helper = if normal.x.abs() < 0.9 { Vector3f::x() } else { Vector3f::y() };
    let u = normal.cross(&helper).normalize();
    let v = normal.cross(&u);
    (0..CIRCLE_SEGMENTS)
        .map(|i| {
            let phi = 2.0 * PI * i as Float / CIRCLE_SEGMENTS as Float;
            center + (u * phi.cos() + v * phi.sin()) * radius
        })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegionKind {
    Sphere,
    Cube,
    Slab,
}

/// Parameters of all three shapes; one of them is active at a time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionSettings {
    pub kind: RegionKind,
    pub sphere_center: Vector3f,
    pub sphere_radius: Float,
    pub cube_min: Vector3f,
    pub cube_extent: Vector3f,
    pub slab_axis: Axis,
    pub slab_origin: Float,
    pub slab_length: Float,
}

impl RegionSettings {
    /// Cube covering the whole volume; the other shapes start centred in it.
    pub fn for_bounds(bounds: &AABB) -> Self {
        let center = bounds.center();
        Self {
            kind: RegionKind::Cube,
            sphere_center: center,
            sphere_radius: 0.5,
            cube_min: bounds.p_min,
            cube_extent: bounds.diagnal(),
            slab_axis: Axis::X,
            slab_origin: center.x - 0.25,
            slab_length: 0.5,
        }
    }

    pub fn active(&self) -> RegionOfInterest {
        match self.kind {
            RegionKind::Sphere => RegionOfInterest::Sphere {
                center: self.sphere_center,
                radius: self.sphere_radius,
            },
            RegionKind::Cube => RegionOfInterest::Cube {
                min_corner: self.cube_min,
                extent: self.cube_extent,
            },
            RegionKind::Slab => RegionOfInterest::Slab {
                axis: self.slab_axis,
                origin: self.slab_origin,
                length: self.slab_length,
            },
        }
    }

    /// Slabs only move along their own axis.
    pub fn translate(&mut self, delta: &Vector3f) {
        match self.kind {
            RegionKind::Sphere => self.sphere_center += delta,
            RegionKind::Cube => self.cube_min += delta,
            RegionKind::Slab => self.slab_origin += delta[self.slab_axis.index()],
        }
    }

    /// Grows (or shrinks, for negative `amount`) the active shape; sizes
    /// never go below zero.
    pub fn resize(&mut self, amount: Float) {
        match self.kind {
            RegionKind::Sphere => self.sphere_radius = (self.sphere_radius + amount).max(0.0),
            RegionKind::Cube => {
                self.cube_extent = self.cube_extent.map(|e| (e + amount).max(0.0));
            }
            RegionKind::Slab => self.slab_length = (self.slab_length + amount).max(0.0),
        }
    }

    pub fn cycle_slab_axis(&mut self) {
        self.slab_axis = self.slab_axis.next();
    }
}
