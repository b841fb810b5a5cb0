// Copyright @yucwang 2026

use super::constants::{Float, Vector3f};

/// Blend `a` towards `b` by `t`. Exact at `t == 0` and `t == 1`.
pub fn lerp(t: Float, a: Float, b: Float) -> Float {
    a * (1.0 - t) + b * t
}

/// Linear interpolation of `q1`/`q2` sampled at `x1`/`x2`, evaluated at `x`.
pub fn linear(x: Float, x1: Float, x2: Float, q1: Float, q2: Float) -> Float {
    let span = x2 - x1;
    if span == 0.0 {
        return q1;
    }
    lerp((x - x1) / span, q1, q2)
}

/// Bilinear blend on the unit square. `c[i + 2 * j]` is the corner at (i, j).
pub fn bilinear(tx: Float, ty: Float, c: &[Float; 4]) -> Float {
    let r0 = lerp(tx, c[0], c[1]);
    let r1 = lerp(tx, c[2], c[3]);
    lerp(ty, r0, r1)
}

/// Trilinear blend on the unit cube. `c[i + 2 * j + 4 * k]` is the corner at
/// (i, j, k); `t` holds the fractional offsets inside the cell.
///
/// Two bilinear blends across the z = 0 and z = 1 faces, then one linear
/// blend along z.
pub fn trilinear(t: &Vector3f, c: &[Float; 8]) -> Float {
    let low = bilinear(t.x, t.y, &[c[0], c[1], c[2], c[3]]);
    let high = bilinear(t.x, t.y, &[c[4], c[5], c[6], c[7]]);
    lerp(t.z, low, high)
}
