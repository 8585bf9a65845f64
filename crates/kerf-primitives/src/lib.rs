//! Ready-made polyhedra.
//!
//! Small fixed vertex/face tables for the regular solids used throughout
//! the kernel's tests and in simple models. All faces wind positively, so
//! normals point outward.

#![warn(missing_docs)]

use kerf_math::Point3;
use kerf_topo::{Polyhedron, Result};

/// An axis-aligned cube with the given edge length and one corner at the
/// origin.
pub fn cube(size: f64) -> Result<Polyhedron> {
    let s = size;
    let vertices = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(s, 0.0, 0.0),
        Point3::new(s, s, 0.0),
        Point3::new(0.0, s, 0.0),
        Point3::new(0.0, 0.0, s),
        Point3::new(s, 0.0, s),
        Point3::new(s, s, s),
        Point3::new(0.0, s, s),
    ];
    let faces = vec![
        vec![0, 3, 2, 1],
        vec![4, 5, 6, 7],
        vec![0, 1, 5, 4],
        vec![1, 2, 6, 5],
        vec![2, 3, 7, 6],
        vec![3, 0, 4, 7],
    ];
    Polyhedron::new(vertices, &faces)
}

/// A regular tetrahedron centered at the origin, inscribed in the cube of
/// half-width `radius / sqrt(3)`.
pub fn tetrahedron(radius: f64) -> Result<Polyhedron> {
    let r = radius / 3.0_f64.sqrt();
    let vertices = vec![
        Point3::new(r, r, r),
        Point3::new(r, -r, -r),
        Point3::new(-r, r, -r),
        Point3::new(-r, -r, r),
    ];
    let faces = vec![vec![0, 1, 2], vec![0, 2, 3], vec![0, 3, 1], vec![1, 3, 2]];
    Polyhedron::new(vertices, &faces)
}

/// A regular octahedron centered at the origin with vertices at distance
/// `radius` along each axis.
pub fn octahedron(radius: f64) -> Result<Polyhedron> {
    let r = radius;
    let vertices = vec![
        Point3::new(r, 0.0, 0.0),
        Point3::new(-r, 0.0, 0.0),
        Point3::new(0.0, r, 0.0),
        Point3::new(0.0, -r, 0.0),
        Point3::new(0.0, 0.0, r),
        Point3::new(0.0, 0.0, -r),
    ];
    let faces = vec![
        vec![0, 2, 4],
        vec![2, 1, 4],
        vec![1, 3, 4],
        vec![3, 0, 4],
        vec![2, 0, 5],
        vec![1, 2, 5],
        vec![3, 1, 5],
        vec![0, 3, 5],
    ];
    Polyhedron::new(vertices, &faces)
}
