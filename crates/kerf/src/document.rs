//! The serialized polyhedron description.

use kerf_math::Point3;
use kerf_topo::{Polyhedron, Result};
use serde::{Deserialize, Serialize};

fn default_scale() -> f64 {
    1.0
}

/// A polyhedron description as loaded from a model file: vertex coordinate
/// triples, face vertex cycles in positive winding, and an optional uniform
/// scale applied to every coordinate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolyhedronDocument {
    /// Vertex coordinates.
    pub vertices: Vec<[f64; 3]>,
    /// Faces as ordered vertex index cycles.
    pub faces: Vec<Vec<usize>>,
    /// Uniform scale factor, 1.0 when absent.
    #[serde(default = "default_scale")]
    pub scale: f64,
}

impl PolyhedronDocument {
    /// Build the half-edge polyhedron, applying the scale factor.
    pub fn build(&self) -> Result<Polyhedron> {
        let vertices = self
            .vertices
            .iter()
            .map(|&[x, y, z]| Point3::new(x * self.scale, y * self.scale, z * self.scale))
            .collect();
        Polyhedron::new(vertices, &self.faces)
    }
}
