//! Error types for polygon materialization.

use thiserror::Error;

/// Errors that can occur while materializing a polygon expression.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    /// A finite coordinate lies outside the fixed-point clipping domain.
    #[error("coordinate ({0}, {1}) lies outside the clipping domain")]
    DomainOverflow(f64, f64),

    /// The materialized region still extends to infinity.
    #[error("polygon is unbounded: a materialized boundary still reaches infinity")]
    Unbounded,

    /// A vertex at infinity carries a zero-length direction.
    #[error("direction at infinity has zero length")]
    ZeroDirection,

    /// Two consecutive opposite directions at infinity leave the boundary
    /// orientation undetermined.
    #[error("consecutive opposite directions at infinity; insert an intermediate direction")]
    AmbiguousSweep,
}

/// Result type for polygon materialization.
pub type Result<T> = std::result::Result<T, PathError>;
