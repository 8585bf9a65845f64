//! Projective vertices and open paths.

use kerf_math::{Point2, Vec2};

/// A projective 2D vertex: either a finite location or a point infinitely
/// far away in some direction.
///
/// Direction vertices represent unbounded boundary segments (the edges of
/// half-planes and cones). They carry no position and must never be combined
/// arithmetically with another direction vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Vertex {
    /// A finite point.
    Finite(Point2),
    /// A point at infinity in the given (non-zero) direction.
    Direction(Vec2),
}

impl Vertex {
    /// Whether this vertex is a finite location.
    pub fn is_finite(&self) -> bool {
        matches!(self, Vertex::Finite(_))
    }

    /// Homogeneous coordinates `(x, y, z)` with `z = 1` for finite vertices
    /// and `z = 0` for directions at infinity.
    pub fn homogeneous(&self) -> (f64, f64, f64) {
        match self {
            Vertex::Finite(p) => (p.x, p.y, 1.0),
            Vertex::Direction(d) => (d.x, d.y, 0.0),
        }
    }
}

/// Construct a finite vertex at `(x, y)`.
pub fn vertex(x: f64, y: f64) -> Vertex {
    Vertex::Finite(Point2::new(x, y))
}

/// Construct a vertex at infinity in the direction `(dx, dy)`.
///
/// The direction must be non-zero.
pub fn vertex_at_infinity(dx: f64, dy: f64) -> Vertex {
    assert!(
        dx != 0.0 || dy != 0.0,
        "direction at infinity must be non-zero"
    );
    Vertex::Direction(Vec2::new(dx, dy))
}

/// An ordered, directed sequence of vertices.
///
/// A path on its own is open; a [`Polygon`](crate::Polygon) interprets each
/// of its paths as a closed boundary loop.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    vertices: Vec<Vertex>,
}

impl Path {
    /// Create a path from a vertex sequence.
    pub fn new(vertices: Vec<Vertex>) -> Self {
        Self { vertices }
    }

    /// Create a path of finite vertices from coordinate pairs.
    pub fn from_points(points: &[(f64, f64)]) -> Self {
        Self {
            vertices: points.iter().map(|&(x, y)| vertex(x, y)).collect(),
        }
    }

    /// Concatenate a sequence of paths into one.
    pub fn join(paths: impl IntoIterator<Item = Path>) -> Self {
        let mut vertices = Vec::new();
        for p in paths {
            vertices.extend(p.vertices);
        }
        Self { vertices }
    }

    /// The vertex sequence.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the path has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Whether every vertex is finite.
    pub fn is_finite(&self) -> bool {
        self.vertices.iter().all(Vertex::is_finite)
    }

    /// The path with its vertex order reversed.
    pub fn reversed(&self) -> Self {
        let mut vertices = self.vertices.clone();
        vertices.reverse();
        Self { vertices }
    }
}

/// Build a path from a vertex sequence.
pub fn path(vertices: impl IntoIterator<Item = Vertex>) -> Path {
    Path::new(vertices.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_concatenates_in_order() {
        let a = Path::from_points(&[(0.0, 0.0), (1.0, 0.0)]);
        let b = Path::new(vec![vertex_at_infinity(0.0, 1.0)]);
        let j = Path::join([a, b]);
        assert_eq!(j.len(), 3);
        assert!(j.vertices()[0].is_finite());
        assert!(!j.vertices()[2].is_finite());
        assert!(!j.is_finite());
    }

    #[test]
    fn test_homogeneous_coordinates() {
        assert_eq!(vertex(2.0, 3.0).homogeneous(), (2.0, 3.0, 1.0));
        assert_eq!(vertex_at_infinity(0.0, -1.0).homogeneous(), (0.0, -1.0, 0.0));
    }

    #[test]
    #[should_panic]
    fn test_zero_direction_panics() {
        vertex_at_infinity(0.0, 0.0);
    }
}
