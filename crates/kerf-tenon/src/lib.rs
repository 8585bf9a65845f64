//! Finger-joint synthesis.
//!
//! A [`Tenon`] turns an edge into a pulse pattern of fingers and slots and
//! a 2D joint profile whose depths follow the edge's dihedral angle, so
//! every cut seats flush against its mating piece. The [`WoodWorker`]
//! assigns mating tenon pairs to the two views of every edge and composes,
//! per face, the edge profiles and stellation cones into one cuttable
//! outline.

#![warn(missing_docs)]

mod pulse;
mod tenon;
mod woodworker;

pub use pulse::{Pulse, PulseKind};
pub use tenon::{baseline, Depth, Tenon};
pub use woodworker::WoodWorker;
