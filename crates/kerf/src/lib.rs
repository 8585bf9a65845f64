#![warn(missing_docs)]

//! Construction geometry for finger-jointed polyhedron models.
//!
//! Turns a polyhedron description into per-face cuttable outlines for
//! laser-cut or 3D-printed box-style models whose faces mate via finger
//! joints. The workspace splits into layers, re-exported here:
//!
//! - [`kerf_path`]: projective 2D paths and lazy boolean polygon algebra,
//!   with half-planes and the full plane as first-class regions.
//! - [`kerf_topo`]: half-edge polyhedron topology and per-view geometry.
//! - [`kerf_stellation`]: per-edge cones bounding what a joint may occupy.
//! - [`kerf_tenon`]: pulse patterns, joint profiles and per-face outline
//!   composition.
//!
//! # Example
//!
//! ```
//! use kerf::{cube, Depth, Tenon, WoodWorker};
//!
//! let solid = cube(1.0).unwrap();
//! let tenon = Tenon::RegularFinger {
//!     thickness: 0.1,
//!     finger_count: 4,
//!     slot_depth: Depth::Auto,
//!     finger_length: Depth::Auto,
//! };
//! let worker = WoodWorker::new(&solid, tenon);
//! let outline = worker.piece(&solid.face_view(0));
//! let loops = outline.paths().unwrap();
//! assert!(!loops.is_empty());
//! ```

mod document;

pub use document::PolyhedronDocument;
pub use kerf_math::{Point2, Point3, Transform, Vec2, Vec3};
pub use kerf_path::{
    half_plane, path, plane, polygon, vertex, vertex_at_infinity, Path, PathError, Polygon,
    Transform2, Vertex,
};
pub use kerf_primitives::{cube, octahedron, tetrahedron};
pub use kerf_stellation::{edge_cell, edge_cone, stellation};
pub use kerf_tenon::{baseline, Depth, Pulse, PulseKind, Tenon, WoodWorker};
pub use kerf_topo::{Polyhedron, SelectionKind, TopologyError, View};
