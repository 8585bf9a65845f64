//! Lazy polygon expressions.
//!
//! A [`Polygon`] is a handle to a node in an immutable expression DAG:
//! concrete boundary paths at the leaves, boolean combinations and
//! transformations at the inner nodes. Nothing is clipped until the
//! boundaries are first requested; the result is then memoized on the node,
//! so shared subexpressions are materialized once.

use std::cell::OnceCell;
use std::ops::{BitAnd, BitOr, BitXor, Div, Not};
use std::rc::Rc;

use kerf_math::{rot_ccw, rot_cw, Point2, Vec2};

use crate::clip;
use crate::error::{PathError, Result};
use crate::path::{vertex, vertex_at_infinity, Path, Vertex};
use crate::transform::Transform2;

/// A binary boolean operation on polygons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOp {
    /// Points in either operand.
    Union,
    /// Points in both operands.
    Intersection,
    /// Points in exactly one operand.
    Xor,
    /// Points in the left operand but not the right.
    Difference,
}

#[derive(Debug)]
enum Expr {
    Concrete(Vec<Path>),
    Plane,
    HalfPlane { anchor: Point2, outward: Vec2 },
    Transformed { inner: Rc<Node>, map: Transform2 },
    Combined { op: BoolOp, lhs: Rc<Node>, rhs: Rc<Node> },
}

#[derive(Debug)]
struct Node {
    expr: Expr,
    resolved: OnceCell<Result<Vec<Path>>>,
}

impl Node {
    fn new(expr: Expr) -> Rc<Self> {
        Rc::new(Self {
            expr,
            resolved: OnceCell::new(),
        })
    }

    fn boundaries(&self) -> Result<&[Path]> {
        let r = self.resolved.get_or_init(|| self.evaluate());
        match r {
            Ok(paths) => Ok(paths),
            Err(e) => Err(e.clone()),
        }
    }

    fn evaluate(&self) -> Result<Vec<Path>> {
        match &self.expr {
            Expr::Concrete(paths) => Ok(paths.clone()),
            Expr::Plane => Ok(vec![plane_boundary()]),
            Expr::HalfPlane { anchor, outward } => {
                Ok(vec![half_plane_boundary(*anchor, *outward)?])
            }
            Expr::Transformed { inner, map } => {
                let reversing = map.determinant() < 0.0;
                Ok(inner
                    .boundaries()?
                    .iter()
                    .map(|p| {
                        let mapped = map.apply_path(p);
                        if reversing {
                            mapped.reversed()
                        } else {
                            mapped
                        }
                    })
                    .collect())
            }
            Expr::Combined { op, lhs, rhs } => {
                clip::combine(*op, lhs.boundaries()?, rhs.boundaries()?)
            }
        }
    }
}

fn plane_boundary() -> Path {
    Path::new(vec![
        vertex_at_infinity(1.0, 1.0),
        vertex_at_infinity(-1.0, 1.0),
        vertex_at_infinity(-1.0, -1.0),
        vertex_at_infinity(1.0, -1.0),
    ])
}

fn half_plane_boundary(anchor: Point2, outward: Vec2) -> Result<Path> {
    let n = outward.norm();
    if n < 1e-12 {
        return Err(PathError::ZeroDirection);
    }
    let o = outward / n;
    // Traverse the boundary line with the kept side on the left: arrive
    // from infinity, pass through the anchor, and escape to infinity on the
    // other side. The extra far-side direction pins down which way the
    // 180 degree sweep between the two escape rays closes.
    Ok(Path::new(vec![
        Vertex::Direction(rot_cw(o)),
        Vertex::Finite(anchor),
        Vertex::Direction(rot_ccw(o)),
        Vertex::Direction(-o),
    ]))
}

/// A region of the plane, possibly unbounded, defined by a lazy boolean
/// expression over boundary paths.
///
/// Polygons are cheap to clone and combine; clipping happens on the first
/// call to [`boundaries`](Polygon::boundaries) or [`paths`](Polygon::paths)
/// and is memoized per shared subexpression.
#[derive(Debug, Clone)]
pub struct Polygon {
    node: Rc<Node>,
}

impl Polygon {
    /// The empty region.
    pub fn empty() -> Self {
        Self {
            node: Node::new(Expr::Concrete(Vec::new())),
        }
    }

    /// The materialized boundary paths of the region.
    ///
    /// Paths wind counter-clockwise around filled area and clockwise around
    /// holes. Unbounded regions contain vertices at infinity.
    pub fn boundaries(&self) -> Result<Vec<Path>> {
        Ok(self.node.boundaries()?.to_vec())
    }

    /// The boundary paths as plain point loops.
    ///
    /// Fails with [`PathError::Unbounded`] if the region is not bounded.
    pub fn paths(&self) -> Result<Vec<Vec<Point2>>> {
        let mut out = Vec::new();
        for path in self.node.boundaries()? {
            let mut loop_points = Vec::with_capacity(path.len());
            for v in path.vertices() {
                match v {
                    Vertex::Finite(p) => loop_points.push(*p),
                    Vertex::Direction(_) => return Err(PathError::Unbounded),
                }
            }
            out.push(loop_points);
        }
        Ok(out)
    }

    /// Whether the region materializes to nothing.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.node.boundaries()?.is_empty())
    }

    /// The region mapped through a plane transform.
    ///
    /// Orientation-reversing transforms reverse the winding of every
    /// boundary path.
    pub fn transformed(&self, map: Transform2) -> Polygon {
        Polygon {
            node: Node::new(Expr::Transformed {
                inner: Rc::clone(&self.node),
                map,
            }),
        }
    }

    /// Combine with another region under a boolean operation, lazily.
    pub fn combine(&self, op: BoolOp, other: &Polygon) -> Polygon {
        Polygon {
            node: Node::new(Expr::Combined {
                op,
                lhs: Rc::clone(&self.node),
                rhs: Rc::clone(&other.node),
            }),
        }
    }
}

/// A polygon from explicit boundary paths.
///
/// Each path is interpreted as a closed loop; even-odd fill decides the
/// interior when loops overlap or nest.
pub fn polygon(paths: impl IntoIterator<Item = Path>) -> Polygon {
    Polygon {
        node: Node::new(Expr::Concrete(paths.into_iter().collect())),
    }
}

/// The entire plane.
pub fn plane() -> Polygon {
    Polygon {
        node: Node::new(Expr::Plane),
    }
}

/// The closed half-plane containing all points not strictly beyond `anchor`
/// in the `outward` direction: `{ p : (p - anchor) . outward <= 0 }`.
pub fn half_plane(anchor: Point2, outward: Vec2) -> Polygon {
    Polygon {
        node: Node::new(Expr::HalfPlane { anchor, outward }),
    }
}

/// An axis-aligned unit square with corners `(0, 0)` and `(1, 1)`.
pub fn square() -> Polygon {
    polygon([Path::from_points(&[
        (0.0, 0.0),
        (1.0, 0.0),
        (1.0, 1.0),
        (0.0, 1.0),
    ])])
}

/// A regular polygon with `sides` vertices approximating the circle of the
/// given `radius` around `center`.
pub fn circle(center: Point2, radius: f64, sides: usize) -> Polygon {
    let sides = sides.max(3);
    let step = std::f64::consts::TAU / sides as f64;
    let pts: Vec<Vertex> = (0..sides)
        .map(|i| {
            let a = step * i as f64;
            vertex(center.x + radius * a.cos(), center.y + radius * a.sin())
        })
        .collect();
    polygon([Path::new(pts)])
}

impl BitOr for Polygon {
    type Output = Polygon;

    fn bitor(self, rhs: Polygon) -> Polygon {
        self.combine(BoolOp::Union, &rhs)
    }
}

impl BitAnd for Polygon {
    type Output = Polygon;

    fn bitand(self, rhs: Polygon) -> Polygon {
        self.combine(BoolOp::Intersection, &rhs)
    }
}

impl BitXor for Polygon {
    type Output = Polygon;

    fn bitxor(self, rhs: Polygon) -> Polygon {
        self.combine(BoolOp::Xor, &rhs)
    }
}

impl Div for Polygon {
    type Output = Polygon;

    /// Set difference: the left region with the right removed.
    fn div(self, rhs: Polygon) -> Polygon {
        self.combine(BoolOp::Difference, &rhs)
    }
}

impl Not for Polygon {
    type Output = Polygon;

    /// Complement with respect to the entire plane.
    fn not(self) -> Polygon {
        plane().combine(BoolOp::Difference, &self)
    }
}
