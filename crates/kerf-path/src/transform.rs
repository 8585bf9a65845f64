//! 3x3 homogeneous transformations of the plane.

use std::ops::Mul;

use kerf_math::{Point2, Vec2};
use nalgebra::{Matrix3, Vector3};

use crate::path::{Path, Vertex};
use crate::polygon::Polygon;

/// A transformation of the plane, represented as a 3x3 matrix acting on
/// homogeneous vertex coordinates.
///
/// Finite vertices use `z = 1`, directions at infinity `z = 0`, so one
/// matrix transforms both. Transformations compose by multiplication and
/// apply to paths and polygons with `*`:
///
/// ```
/// use kerf_path::{square, Transform2};
///
/// let bigger = Transform2::scaling(2.0, 2.0) * square();
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2 {
    /// The underlying 3x3 matrix.
    pub matrix: Matrix3<f64>,
}

impl Transform2 {
    /// Transform with the given affine coefficients:
    /// `(x, y) -> (xx*x + yx*y + tx, xy*x + yy*y + ty)`.
    pub fn new(xx: f64, yx: f64, tx: f64, xy: f64, yy: f64, ty: f64) -> Self {
        Self {
            matrix: Matrix3::new(xx, yx, tx, xy, yy, ty, 0.0, 0.0, 1.0),
        }
    }

    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix3::identity(),
        }
    }

    /// Rotation around the origin by `angle` radians.
    pub fn rotation(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(c, -s, 0.0, s, c, 0.0)
    }

    /// Scale around the origin by `(sx, sy)`.
    pub fn scaling(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, 0.0, sy, 0.0)
    }

    /// Translation by `(dx, dy)`.
    pub fn translation(dx: f64, dy: f64) -> Self {
        Self::new(1.0, 0.0, dx, 0.0, 1.0, dy)
    }

    /// Determinant of the transform.
    ///
    /// A negative determinant marks an orientation-reversing transform;
    /// applying one to a polygon reverses the winding of every boundary
    /// path so that the inside of unbounded boundaries stays the inside.
    pub fn determinant(&self) -> f64 {
        self.matrix.determinant()
    }

    /// Inverse transform, if it exists.
    pub fn inverse(&self) -> Option<Self> {
        self.matrix.try_inverse().map(|matrix| Self { matrix })
    }

    /// Apply the transform to a single vertex.
    pub fn apply_vertex(&self, v: &Vertex) -> Vertex {
        let (x, y, z) = v.homogeneous();
        let r = self.matrix * Vector3::new(x, y, z);
        if r.z.abs() < 1e-12 {
            Vertex::Direction(Vec2::new(r.x, r.y))
        } else {
            Vertex::Finite(Point2::new(r.x / r.z, r.y / r.z))
        }
    }

    /// Apply the transform to every vertex of a path.
    pub fn apply_path(&self, path: &Path) -> Path {
        Path::new(path.vertices().iter().map(|v| self.apply_vertex(v)).collect())
    }
}

impl Mul for Transform2 {
    type Output = Transform2;

    fn mul(self, rhs: Transform2) -> Transform2 {
        Transform2 {
            matrix: self.matrix * rhs.matrix,
        }
    }
}

impl Mul<Path> for Transform2 {
    type Output = Path;

    fn mul(self, rhs: Path) -> Path {
        self.apply_path(&rhs)
    }
}

impl Mul<Polygon> for Transform2 {
    type Output = Polygon;

    fn mul(self, rhs: Polygon) -> Polygon {
        rhs.transformed(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::{vertex, vertex_at_infinity};
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_rotation_of_finite_vertex() {
        let t = Transform2::rotation(PI / 2.0);
        match t.apply_vertex(&vertex(1.0, 0.0)) {
            Vertex::Finite(p) => {
                assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
                assert_relative_eq!(p.y, 1.0, epsilon = 1e-12);
            }
            Vertex::Direction(_) => panic!("finite vertex became a direction"),
        }
    }

    #[test]
    fn test_translation_ignores_directions() {
        let t = Transform2::translation(5.0, 7.0);
        match t.apply_vertex(&vertex_at_infinity(1.0, 0.0)) {
            Vertex::Direction(d) => assert_relative_eq!(d, Vec2::new(1.0, 0.0)),
            Vertex::Finite(_) => panic!("direction became finite"),
        }
    }

    #[test]
    fn test_compose_and_inverse_round_trip() {
        let t = Transform2::translation(3.0, -1.0) * Transform2::rotation(0.7);
        let inv = t.inverse().unwrap();
        let v = vertex(0.25, 4.0);
        match (inv * Transform2::identity()).apply_vertex(&t.apply_vertex(&v)) {
            Vertex::Finite(p) => {
                assert_relative_eq!(p.x, 0.25, epsilon = 1e-12);
                assert_relative_eq!(p.y, 4.0, epsilon = 1e-12);
            }
            Vertex::Direction(_) => panic!("finite vertex became a direction"),
        }
    }

    #[test]
    fn test_mirror_has_negative_determinant() {
        assert!(Transform2::scaling(-1.0, 1.0).determinant() < 0.0);
        assert!(Transform2::rotation(1.0).determinant() > 0.0);
    }
}
