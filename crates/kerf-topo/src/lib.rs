//! Half-edge polyhedron topology.
//!
//! A [`Polyhedron`] stores vertex coordinates and the half-edge connectivity
//! of a closed mesh; [`View`] handles traverse it (`next` around a face,
//! `opposite` across an edge, `adjacent` around a vertex) and answer the
//! geometric queries the rest of the kernel needs: edge frames, face
//! normals, planar projections and dihedral angles.

#![warn(missing_docs)]

mod error;
mod polyhedron;
mod view;

pub use error::{Result, TopologyError};
pub use polyhedron::{Polyhedron, SelectionKind};
pub use view::View;
