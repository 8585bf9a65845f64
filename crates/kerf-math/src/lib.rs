#![warn(missing_docs)]

//! Math types for the kerf construction-geometry kernel.
//!
//! Thin wrappers around nalgebra providing the domain-specific pieces the
//! rest of the workspace shares: 2D/3D point and vector aliases, planar
//! rotations, plane frames with analytic plane-plane intersection, the 4x4
//! rigid transform used for face coordinate systems, and tolerance constants.

use nalgebra::{Matrix3, Matrix4, Vector2, Vector3, Vector4};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A point in the 2D plane.
pub type Point2 = nalgebra::Point2<f64>;

/// A vector in the 2D plane.
pub type Vec2 = Vector2<f64>;

/// Two unit normals are treated as parallel when the norm of their cross
/// product (the sine of the angle between them) falls below this value.
pub const PARALLEL_EPS: f64 = 1e-9;

/// Rotate a 2D vector by 90 degrees counterclockwise.
pub fn rot_ccw(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

/// Rotate a 2D vector by 90 degrees clockwise.
pub fn rot_cw(v: Vec2) -> Vec2 {
    Vec2::new(v.y, -v.x)
}

/// Orthogonal projector onto the subspace spanned by an orthonormal pair.
///
/// Returns `K * K^T` for `K = [u v]`.
pub fn plane_projector(u: &Vec3, v: &Vec3) -> Matrix3<f64> {
    u * u.transpose() + v * v.transpose()
}

/// A plane in 3D given by an anchor point and two in-plane basis vectors.
///
/// The basis is expected to be orthonormal; the plane normal is `u × v`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneFrame {
    /// A point on the plane.
    pub origin: Point3,
    /// First in-plane basis vector.
    pub u: Vec3,
    /// Second in-plane basis vector.
    pub v: Vec3,
}

impl PlaneFrame {
    /// Create a plane frame from an anchor point and two basis vectors.
    pub fn new(origin: Point3, u: Vec3, v: Vec3) -> Self {
        Self { origin, u, v }
    }

    /// Unit normal of the plane (`u × v`, normalized).
    pub fn normal(&self) -> Vec3 {
        self.u.cross(&self.v).normalize()
    }
}

/// Intersect two planes analytically.
///
/// Returns a point on the intersection line and the line's unit direction,
/// or `None` when the planes are parallel within [`PARALLEL_EPS`].
///
/// The direction is `n1 × n2`; the point solves the two signed-distance
/// equations together with a zero component along the line direction.
pub fn intersect_planes(p1: &PlaneFrame, p2: &PlaneFrame) -> Option<(Point3, Vec3)> {
    let n1 = p1.normal();
    let n2 = p2.normal();

    let r = n1.cross(&n2);
    if r.norm() < PARALLEL_EPS {
        return None;
    }
    let r = r.normalize();

    let m = Matrix3::from_rows(&[n1.transpose(), n2.transpose(), r.transpose()]);
    let b = Vec3::new(n1.dot(&p1.origin.coords), n2.dot(&p2.origin.coords), 0.0);
    let s = m.try_inverse()? * b;

    Some((Point3::from(s), r))
}

/// A 4x4 rigid affine transformation matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// The underlying 4x4 matrix.
    pub matrix: Matrix4<f64>,
}

impl Transform {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Translation by `(dx, dy, dz)`.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 3)] = dx;
        m[(1, 3)] = dy;
        m[(2, 3)] = dz;
        Self { matrix: m }
    }

    /// Transform mapping frame coordinates to world coordinates.
    ///
    /// The columns are the frame's basis vectors `(k1, k2, k3)` followed by
    /// the frame origin.
    pub fn from_frame(k1: &Vec3, k2: &Vec3, k3: &Vec3, origin: &Point3) -> Self {
        let mut m = Matrix4::identity();
        for row in 0..3 {
            m[(row, 0)] = k1[row];
            m[(row, 1)] = k2[row];
            m[(row, 2)] = k3[row];
            m[(row, 3)] = origin[row];
        }
        Self { matrix: m }
    }

    /// Compose: apply `other` first, then `self`.
    pub fn then(&self, other: &Transform) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Transform a point.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        let v = self.matrix * Vector4::new(p.x, p.y, p.z, 1.0);
        Point3::new(v.x, v.y, v.z)
    }

    /// Transform a direction vector (ignores translation).
    pub fn apply_vec(&self, v: &Vec3) -> Vec3 {
        let r = self.matrix * Vector4::new(v.x, v.y, v.z, 0.0);
        Vec3::new(r.x, r.y, r.z)
    }

    /// Inverse of this transform, if it exists.
    pub fn inverse(&self) -> Option<Self> {
        self.matrix.try_inverse().map(|matrix| Self { matrix })
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance.
    pub linear: f64,
    /// Angular tolerance in radians.
    pub angular: f64,
}

impl Tolerance {
    /// Default tolerances (1e-6 linear, 1e-9 rad angular).
    pub const DEFAULT: Self = Self {
        linear: 1e-6,
        angular: 1e-9,
    };

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }

    /// Check if two points are coincident within tolerance.
    pub fn points_equal(&self, a: &Point2, b: &Point2) -> bool {
        (a - b).norm() < self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
