//! Projective 2D path and polygon algebra.
//!
//! The planar layer of the construction kernel. Regions of the plane are
//! built from boundary [`Path`]s whose vertices may lie at infinity, so
//! half-planes and the whole plane are first-class values. [`Polygon`]
//! expressions combine regions with `|`, `&`, `^`, `/` and `!` lazily;
//! evaluation projects every boundary into a bounded fixed-point domain,
//! clips there, and lifts the result back.

#![warn(missing_docs)]

mod clip;
mod error;
mod path;
mod polygon;
mod transform;

pub use clip::DOMAIN_HALF_WIDTH;
pub use error::{PathError, Result};
pub use path::{path, vertex, vertex_at_infinity, Path, Vertex};
pub use polygon::{circle, half_plane, plane, polygon, square, BoolOp, Polygon};
pub use transform::Transform2;
