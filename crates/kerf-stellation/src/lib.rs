//! Stellation cones and cells.
//!
//! For each edge of a face, the planes of the faces ringing the edge's
//! opposite face are intersected with the face's own plane. Each
//! intersection line, projected into the face's local 2D frame, bounds a
//! half-plane; their intersection is the edge's *cone*, the region a joint
//! along that edge may occupy without intruding into a neighbouring facet.
//! Closing the cone with the edge's own baseline gives the edge's *cell*,
//! and the exclusive-or of all cells is the face's stellation figure.

#![warn(missing_docs)]

use kerf_math::{intersect_planes, rot_ccw, PlaneFrame, Vec2, PARALLEL_EPS};
use kerf_path::{half_plane, plane, Polygon};
use kerf_topo::View;

/// Debug logging macro - only prints when debug-stellation feature is enabled
#[allow(unused_macros)]
#[cfg(feature = "debug-stellation")]
macro_rules! debug_stell {
    ($($arg:tt)*) => {
        eprintln!($($arg)*)
    };
}

/// No-op version when debug-stellation feature is disabled
#[allow(unused_macros)]
#[cfg(not(feature = "debug-stellation"))]
macro_rules! debug_stell {
    ($($arg:tt)*) => {};
}

/// The stellation cone of `edge`, expressed in `face`'s local 2D frame.
///
/// `face` and `edge` must belong to the same face cycle. The cone is the
/// intersection of the half-planes induced by every face plane ringing the
/// edge's opposite face, skipping planes parallel to `face`'s own. It is
/// open toward (and beyond) the edge.
pub fn edge_cone(face: &View<'_>, edge: &View<'_>) -> Polygon {
    let (k1, k2, k3) = face.local_onb();
    let face_plane = PlaneFrame::new(face.vertex(), k1, k2);

    let mut cone = plane();
    for t in edge.opposite().face_cycle() {
        let neighbour = t.opposite();
        if neighbour.face_index() == face.face_index() {
            continue;
        }
        let (l1, l2, m) = neighbour.local_onb();
        if k3.cross(&m).norm() < PARALLEL_EPS {
            debug_stell!(
                "stellation: skipping plane of face {} (parallel to face {})",
                neighbour.face_index(),
                face.face_index()
            );
            continue;
        }
        let neighbour_plane = PlaneFrame::new(neighbour.vertex(), l1, l2);
        let Some((point, _direction)) = intersect_planes(&face_plane, &neighbour_plane) else {
            debug_stell!(
                "stellation: no intersection line with face {}",
                neighbour.face_index()
            );
            continue;
        };

        let anchor = face.planar_coordinates(point);
        let outward = Vec2::new(m.dot(&k1), m.dot(&k2));
        cone = cone & half_plane(anchor, outward);
    }
    cone
}

/// The stellation cell of `edge`: its cone closed by the edge baseline.
///
/// The baseline half-plane keeps the side of the edge line away from the
/// face interior, so the cell lies beyond the edge.
pub fn edge_cell(face: &View<'_>, edge: &View<'_>) -> Polygon {
    let a = face.planar_coordinates(edge.vertex());
    let b = face.planar_coordinates(edge.next().vertex());
    // Interior is to the left of the edge in a positively wound face.
    let inward = rot_ccw(b - a);
    edge_cone(face, edge) & half_plane(a, inward)
}

/// The full stellation figure of `face`: the exclusive-or of the cells of
/// all its edges, in the face's local 2D frame.
pub fn stellation(face: &View<'_>) -> Polygon {
    face.face_cycle()
        .map(|edge| edge_cell(face, &edge))
        .fold(Polygon::empty(), |acc, cell| acc ^ cell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use kerf_math::Point2;
    use kerf_path::{polygon, Path};
    use kerf_primitives::cube;

    fn signed_area(points: &[Point2]) -> f64 {
        let n = points.len();
        (0..n)
            .map(|i| {
                let a = points[i];
                let b = points[(i + 1) % n];
                a.x * b.y - b.x * a.y
            })
            .sum::<f64>()
            / 2.0
    }

    fn area(p: &Polygon) -> f64 {
        p.paths()
            .unwrap()
            .iter()
            .map(|l| signed_area(l))
            .sum()
    }

    fn test_window(half: f64) -> Polygon {
        polygon([Path::from_points(&[
            (-half, -half),
            (half, -half),
            (half, half),
            (-half, half),
        ])])
    }

    #[test]
    fn test_cube_edge_cone_is_a_perpendicular_strip() {
        let c = cube(1.0).unwrap();
        let face = c.face_view(1);
        let cone = edge_cone(&face, &face);

        // The side faces ringing the front neighbour cut the top plane at
        // x = 0 and x = 1; the cone is that strip, unbounded in y.
        let window = test_window(3.0);
        let clipped = cone & window;
        assert_relative_eq!(area(&clipped), 6.0, epsilon = 1e-5);
    }

    #[test]
    fn test_cube_edge_cell_lies_beyond_the_edge() {
        let c = cube(1.0).unwrap();
        let face = c.face_view(1);
        let cell = edge_cell(&face, &face);

        // The face square itself is inside the cone but not the cell.
        let face_region = face.planar_polygon();
        assert_relative_eq!(area(&(face_region.clone() & cell.clone())), 0.0, epsilon = 1e-6);

        // Beyond the edge the cell fills the 1-wide strip.
        let w = test_window(3.0);
        let clipped = cell & w;
        assert_relative_eq!(area(&clipped), 3.0, epsilon = 1e-5);
    }

    #[test]
    fn test_cube_stellation_covers_disjoint_cell_strips() {
        let c = cube(1.0).unwrap();
        let face = c.face_view(1);
        let fig = stellation(&face);

        // The four cells of a cube face are disjoint unit-wide strips, one
        // beyond each edge, so the xor is their union. Clipped to the
        // window [-3, 3]^2 the strips beyond x=0 and y=0 have length 3,
        // those beyond x=1 and y=1 have length 2.
        let w = test_window(3.0);
        let clipped = fig.clone() & w;
        let expected = 3.0 + 2.0 + 3.0 + 2.0;
        assert_relative_eq!(area(&clipped), expected, epsilon = 1e-5);

        // The face itself is not part of the stellation figure.
        assert_relative_eq!(
            area(&(fig & face.planar_polygon())),
            0.0,
            epsilon = 1e-6
        );
    }
}
