// Copyright @yucwang 2026

use super::constants::{Float, Vector3f, EPSILON};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn from_index(idx: usize) -> Self {
        match idx % 3 {
            0 => Axis::X,
            1 => Axis::Y,
            _ => Axis::Z,
        }
    }

    pub fn next(self) -> Self {
        Axis::from_index(self.index() + 1)
    }

    pub fn unit(self) -> Vector3f {
        let mut v = Vector3f::zeros();
        v[self.index()] = 1.0;
        v
    }

    /// Axis with the largest absolute component. Ties prefer X, then Y.
    pub fn dominant(v: &Vector3f) -> Self {
        let (ax, ay, az) = (v.x.abs(), v.y.abs(), v.z.abs());
        if ax >= ay && ax >= az {
            Axis::X
        } else if ay >= az {
            Axis::Y
        } else {
            Axis::Z
        }
    }
}

pub fn distance(a: &Vector3f, b: &Vector3f) -> Float {
    (a - b).norm()
}

/// Normalized copy of `v`, or the zero vector when `v` is (nearly) zero.
pub fn normalize_or_zero(v: &Vector3f) -> Vector3f {
    v.try_normalize(EPSILON * EPSILON).unwrap_or_else(Vector3f::zeros)
}

/// Parses "x, y, z" (commas and/or whitespace).
pub fn parse_vector3(value: &str) -> Option<Vector3f> {
    let mut parts = value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<Float>());
    let x = parts.next()?.ok()?;
    let y = parts.next()?.ok()?;
    let z = parts.next()?.ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Vector3f::new(x, y, z))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dominant_axis_picks_largest_magnitude() {
        assert_eq!(Axis::dominant(&Vector3f::new(0.2, -0.9, 0.1)), Axis::Y);
        assert_eq!(Axis::dominant(&Vector3f::new(0.1, 0.2, -3.0)), Axis::Z);
        assert_eq!(Axis::dominant(&Vector3f::new(-1.0, 0.5, 0.5)), Axis::X);
        // ties
        assert_eq!(Axis::dominant(&Vector3f::new(1.0, 1.0, 1.0)), Axis::X);
        assert_eq!(Axis::dominant(&Vector3f::new(0.0, 1.0, -1.0)), Axis::Y);
    }

    #[test]
    fn axis_cycles() {
        assert_eq!(Axis::X.next(), Axis::Y);
        assert_eq!(Axis::Y.next(), Axis::Z);
        assert_eq!(Axis::Z.next(), Axis::X);
        assert_eq!(Axis::Z.unit(), Vector3f::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn vector_helpers() {
        let a = Vector3f::new(1.0, 2.0, 2.0);
        assert!((distance(&a, &Vector3f::zeros()) - 3.0).abs() < 1e-6);
        assert_eq!(normalize_or_zero(&Vector3f::zeros()), Vector3f::zeros());
        let n = normalize_or_zero(&a);
        assert!((n.norm() - 1.0).abs() < 1e-6);
        assert!((a.cross(&Vector3f::new(0.0, 0.0, 1.0)) - Vector3f::new(2.0, -1.0, 0.0)).norm() < 1e-6);
    }

    #[test]
    fn parse_vector3_accepts_commas_and_spaces() {
        assert_eq!(parse_vector3("2, 2, 0"), Some(Vector3f::new(2.0, 2.0, 0.0)));
        assert_eq!(parse_vector3("0.33 0.21 0.1"), Some(Vector3f::new(0.33, 0.21, 0.1)));
        assert_eq!(parse_vector3("1, 2"), None);
        assert_eq!(parse_vector3("1, 2, 3, 4"), None);
        assert_eq!(parse_vector3("a, b, c"), None);
    }
}
