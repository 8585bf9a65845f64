//! Errors raised while building a polyhedron's topology.

use thiserror::Error;

/// A defect in the face/vertex input that prevents building a closed,
/// manifold half-edge structure. The polyhedron is rejected entirely;
/// no repair is attempted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopologyError {
    /// A face has fewer than three vertices.
    #[error("face {face} has only {count} vertices")]
    FaceTooSmall {
        /// Index of the offending face.
        face: usize,
        /// Number of vertices the face lists.
        count: usize,
    },

    /// A face references a vertex index beyond the vertex list.
    #[error("face {face} references vertex {vertex}, but only {count} vertices exist")]
    VertexOutOfRange {
        /// Index of the offending face.
        face: usize,
        /// The out-of-range vertex index.
        vertex: usize,
        /// Number of vertices available.
        count: usize,
    },

    /// The same directed edge appears in more than one face.
    #[error("directed edge {from} -> {to} appears in more than one face")]
    DuplicateEdge {
        /// Tail vertex of the directed edge.
        from: usize,
        /// Head vertex of the directed edge.
        to: usize,
    },

    /// A directed edge has no reverse-direction twin; the mesh is not closed.
    #[error("edge {from} -> {to} has no reverse edge; the mesh is not closed")]
    OpenEdge {
        /// Tail vertex of the unmatched directed edge.
        from: usize,
        /// Head vertex of the unmatched directed edge.
        to: usize,
    },
}

/// Result type for polyhedron construction.
pub type Result<T> = std::result::Result<T, TopologyError>;
