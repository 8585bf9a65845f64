//! Fixed-point boolean clipping of projective paths.
//!
//! Boolean operators are evaluated by the `i_overlay` integer clipper.
//! Boundary coordinates are scaled into a bounded fixed-point domain; a
//! vertex at infinity is projected onto the edge of that domain so the
//! finite stand-in polygon still covers the unbounded region's intersection
//! with the working square. On the way back, points on the domain edge are
//! lifted to vertices at infinity again.

use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay::{Overlay, ShapeType};
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::i_float::int::point::IntPoint;
use kerf_math::{Point2, Vec2};

use crate::error::{PathError, Result};
use crate::path::{Path, Vertex};
use crate::polygon::BoolOp;

/// Fixed-point scale: one model unit maps to 2^20 integer steps, keeping the
/// round-trip error below 2^-21 of a unit.
const CLIP_SCALE: f64 = (1u32 << 20) as f64;

/// Integer half-width of the working domain square.
const CLIP_BOUND: i32 = 1 << 30;

/// Integer band at the domain edge reserved for projected infinities.
/// A finite coordinate scaled into this band is an overflow.
const BOUNDARY_BAND: i32 = 8;

/// Half-width of the working domain in model units.
pub const DOMAIN_HALF_WIDTH: f64 = CLIP_BOUND as f64 / CLIP_SCALE;

fn overlay_rule(op: BoolOp) -> OverlayRule {
    match op {
        BoolOp::Union => OverlayRule::Union,
        BoolOp::Intersection => OverlayRule::Intersect,
        BoolOp::Xor => OverlayRule::Xor,
        BoolOp::Difference => OverlayRule::Difference,
    }
}

/// Combine two path sets with a boolean operation, even-odd fill on both
/// sides, returning projective result paths.
pub(crate) fn combine(op: BoolOp, subject: &[Path], clip: &[Path]) -> Result<Vec<Path>> {
    let mut overlay = Overlay::new(subject.len() + clip.len());
    for p in subject {
        if let Some(ints) = project_path(p)? {
            overlay.add_contour(&ints, ShapeType::Subject);
        }
    }
    for p in clip {
        if let Some(ints) = project_path(p)? {
            overlay.add_contour(&ints, ShapeType::Clip);
        }
    }

    let graph = overlay.into_graph(FillRule::EvenOdd);
    let shapes = graph.extract_shapes(overlay_rule(op));

    let mut out = Vec::new();
    for shape in shapes {
        for mut contour in shape {
            // i_overlay emits outer loops clockwise and holes
            // counter-clockwise; our convention is the reverse.
            contour.reverse();
            if let Some(path) = lift_path(&contour) {
                out.push(path);
            }
        }
    }
    Ok(out)
}

// =============================================================================
// Forward projection: projective path -> integer contour
// =============================================================================

fn scale_finite(p: &Point2) -> Result<IntPoint> {
    let x = (p.x * CLIP_SCALE).round();
    let y = (p.y * CLIP_SCALE).round();
    let limit = (CLIP_BOUND - BOUNDARY_BAND) as f64;
    if x.abs() >= limit || y.abs() >= limit {
        return Err(PathError::DomainOverflow(p.x, p.y));
    }
    Ok(IntPoint::new(x as i32, y as i32))
}

/// Scale a point known to lie on (or very near) the domain edge.
fn scale_station(p: &Point2) -> IntPoint {
    let bound = CLIP_BOUND as f64;
    let x = (p.x * CLIP_SCALE).round().clamp(-bound, bound);
    let y = (p.y * CLIP_SCALE).round().clamp(-bound, bound);
    IntPoint::new(x as i32, y as i32)
}

fn unit_direction(d: &Vec2) -> Result<Vec2> {
    let n = d.norm();
    if n < 1e-12 {
        return Err(PathError::ZeroDirection);
    }
    Ok(d / n)
}

/// Where the ray from `origin` along `dir` leaves the working square.
fn ray_exit(origin: Point2, dir: Vec2) -> Point2 {
    let w = DOMAIN_HALF_WIDTH;
    let mut t = f64::INFINITY;
    if dir.x > 1e-12 {
        t = t.min((w - origin.x) / dir.x);
    } else if dir.x < -1e-12 {
        t = t.min((-w - origin.x) / dir.x);
    }
    if dir.y > 1e-12 {
        t = t.min((w - origin.y) / dir.y);
    } else if dir.y < -1e-12 {
        t = t.min((-w - origin.y) / dir.y);
    }
    let p = origin + dir * t;
    Point2::new(p.x.clamp(-w, w), p.y.clamp(-w, w))
}

/// Central projection of a direction onto the domain edge.
fn central_projection(dir: Vec2) -> Point2 {
    let m = dir.x.abs().max(dir.y.abs());
    Point2::new(
        dir.x / m * DOMAIN_HALF_WIDTH,
        dir.y / m * DOMAIN_HALF_WIDTH,
    )
}

/// Domain corner points crossed when walking the square edge from `a` to `b`
/// in the given rotational direction.
fn corners_between(a: Point2, b: Point2, ccw: bool) -> Vec<Point2> {
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, TAU};
    let w = DOMAIN_HALF_WIDTH;

    let a1 = a.y.atan2(a.x);
    let mut a2 = b.y.atan2(b.x);
    if ccw {
        while a2 < a1 - 1e-9 {
            a2 += TAU;
        }
    } else {
        while a2 > a1 + 1e-9 {
            a2 -= TAU;
        }
    }

    let mut corners = Vec::new();
    if ccw {
        // First corner angle strictly above a1, at 45 degrees + k * 90.
        let mut c = FRAC_PI_4 + FRAC_PI_2 * ((a1 - FRAC_PI_4) / FRAC_PI_2).floor();
        if c <= a1 + 1e-9 {
            c += FRAC_PI_2;
        }
        while c < a2 - 1e-9 {
            corners.push(Point2::new(w * c.cos().signum(), w * c.sin().signum()));
            c += FRAC_PI_2;
        }
    } else {
        let mut c = FRAC_PI_4 + FRAC_PI_2 * ((a1 - FRAC_PI_4) / FRAC_PI_2).ceil();
        if c >= a1 - 1e-9 {
            c -= FRAC_PI_2;
        }
        while c > a2 + 1e-9 {
            corners.push(Point2::new(w * c.cos().signum(), w * c.sin().signum()));
            c -= FRAC_PI_2;
        }
    }
    corners
}

/// Rotational direction for the sweep between two stations.
fn sweep_ccw(d1: Vec2, d2: Vec2, p1: Point2, p2: Point2) -> Result<bool> {
    let cross = d1.x * d2.y - d1.y * d2.x;
    if cross.abs() > 1e-12 {
        return Ok(cross > 0.0);
    }
    if d1.dot(&d2) < 0.0 {
        // Antiparallel escape directions: the boundary could close around
        // either side of the plane.
        return Err(PathError::AmbiguousSweep);
    }
    Ok(p1.coords.x * p2.coords.y - p1.coords.y * p2.coords.x >= 0.0)
}

/// A point on the domain edge together with the direction that produced it.
struct Station {
    point: Point2,
    dir: Vec2,
}

/// Expand a run of directions at infinity, flanked by the finite vertices
/// `before` and `after`, into stations on the domain edge.
fn run_stations(before: Point2, dirs: &[Vec2], after: Point2) -> Result<Vec<Station>> {
    let mut stations = Vec::with_capacity(dirs.len().max(2));
    let first = unit_direction(&dirs[0])?;
    stations.push(Station {
        point: ray_exit(before, first),
        dir: first,
    });
    if dirs.len() == 1 {
        stations.push(Station {
            point: ray_exit(after, first),
            dir: first,
        });
    } else {
        for d in &dirs[1..dirs.len() - 1] {
            let d = unit_direction(d)?;
            stations.push(Station {
                point: central_projection(d),
                dir: d,
            });
        }
        let last = unit_direction(&dirs[dirs.len() - 1])?;
        stations.push(Station {
            point: ray_exit(after, last),
            dir: last,
        });
    }
    Ok(stations)
}

fn push_stations(out: &mut Vec<IntPoint>, stations: &[Station]) -> Result<()> {
    for pair in stations.windows(2) {
        out.push(scale_station(&pair[0].point));
        let ccw = sweep_ccw(pair[0].dir, pair[1].dir, pair[0].point, pair[1].point)?;
        for c in corners_between(pair[0].point, pair[1].point, ccw) {
            out.push(scale_station(&c));
        }
    }
    if let Some(last) = stations.last() {
        out.push(scale_station(&last.point));
    }
    Ok(())
}

fn dedupe_cyclic(points: Vec<IntPoint>) -> Vec<IntPoint> {
    let mut out: Vec<IntPoint> = Vec::with_capacity(points.len());
    for p in points {
        if out.last() != Some(&p) {
            out.push(p);
        }
    }
    while out.len() > 1 && out.first() == out.last() {
        out.pop();
    }
    out
}

/// Project one projective path into the integer domain.
///
/// Returns `None` when the path degenerates below 3 distinct vertices.
fn project_path(path: &Path) -> Result<Option<Vec<IntPoint>>> {
    let verts = path.vertices();
    if verts.len() < 3 {
        return Ok(None);
    }

    let mut out = Vec::with_capacity(verts.len() + 4);

    if verts.iter().all(|v| !v.is_finite()) {
        // Pure directions: central projection plus corner walks, cyclically.
        let mut stations = Vec::with_capacity(verts.len());
        for v in verts {
            if let Vertex::Direction(d) = v {
                let d = unit_direction(d)?;
                stations.push(Station {
                    point: central_projection(d),
                    dir: d,
                });
            }
        }
        for i in 0..stations.len() {
            let a = &stations[i];
            let b = &stations[(i + 1) % stations.len()];
            out.push(scale_station(&a.point));
            let ccw = sweep_ccw(a.dir, b.dir, a.point, b.point)?;
            for c in corners_between(a.point, b.point, ccw) {
                out.push(scale_station(&c));
            }
        }
    } else {
        let Some(start) = verts.iter().position(Vertex::is_finite) else {
            return Ok(None);
        };
        let n = verts.len();

        let Vertex::Finite(mut prev_finite) = verts[start] else {
            return Ok(None);
        };
        let mut run: Vec<Vec2> = Vec::new();

        for i in 0..=n {
            let v = &verts[(start + i) % n];
            match v {
                Vertex::Finite(p) => {
                    if !run.is_empty() {
                        let stations = run_stations(prev_finite, &run, *p)?;
                        push_stations(&mut out, &stations)?;
                        run.clear();
                    }
                    if i < n {
                        out.push(scale_finite(p)?);
                        prev_finite = *p;
                    }
                }
                Vertex::Direction(d) => run.push(*d),
            }
        }
    }

    let out = dedupe_cyclic(out);
    if out.len() < 3 {
        return Ok(None);
    }
    Ok(Some(out))
}

// =============================================================================
// Lift: integer contour -> projective path
// =============================================================================

/// Bit set of domain sides this point touches: +x, -x, +y, -y.
fn side_mask(p: &IntPoint) -> u8 {
    let lim = CLIP_BOUND - BOUNDARY_BAND;
    let mut m = 0;
    if p.x >= lim {
        m |= 1;
    }
    if p.x <= -lim {
        m |= 2;
    }
    if p.y >= lim {
        m |= 4;
    }
    if p.y <= -lim {
        m |= 8;
    }
    m
}

fn on_domain_edge(p: &IntPoint) -> bool {
    side_mask(p) != 0
}

fn unscale(p: &IntPoint) -> Point2 {
    Point2::new(p.x as f64 / CLIP_SCALE, p.y as f64 / CLIP_SCALE)
}

fn push_direction(out: &mut Vec<Vertex>, d: Vec2) {
    let d = d.normalize();
    if let Some(Vertex::Direction(prev)) = out.last() {
        if (prev.normalize() - d).norm() < 1e-9 {
            return;
        }
    }
    out.push(Vertex::Direction(d));
}

/// Lift one integer contour back to a projective path, re-inserting a vertex
/// at infinity wherever the contour touches the domain edge.
///
/// Contour edges riding one side of the domain square are walks along
/// infinity and dissolve into direction vertices; an edge whose endpoints
/// touch different sides crosses the interior, so the underlying boundary
/// is an infinite line and gets re-anchored at the chord midpoint.
///
/// Returns `None` when the contour degenerates below 3 distinct vertices.
fn lift_path(contour: &[IntPoint]) -> Option<Path> {
    if contour.len() < 3 {
        return None;
    }

    let n = contour.len();
    let walk: Vec<bool> = (0..n)
        .map(|i| side_mask(&contour[i]) & side_mask(&contour[(i + 1) % n]) != 0)
        .collect();

    let mut out: Vec<Vertex> = Vec::with_capacity(n);

    if walk.iter().all(|&w| w) {
        // The whole contour rides the domain edge: the region reaches
        // infinity all around.
        for p in contour {
            push_direction(&mut out, unscale(p).coords);
        }
    } else {
        for i in 0..n {
            let next = (i + 1) % n;
            let a = unscale(&contour[i]);
            let b = unscale(&contour[next]);
            if walk[i] {
                // Every station along the walk, domain corners included,
                // survives as a central direction. Consecutive directions
                // then always sweep by less than a half turn.
                if walk[next] {
                    push_direction(&mut out, b.coords);
                }
                continue;
            }
            match (on_domain_edge(&contour[i]), on_domain_edge(&contour[next])) {
                (false, false) => out.push(Vertex::Finite(b)),
                (false, true) => push_direction(&mut out, b - a),
                (true, false) => {
                    push_direction(&mut out, a - b);
                    out.push(Vertex::Finite(b));
                }
                (true, true) => {
                    let m = Point2::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
                    push_direction(&mut out, a - m);
                    out.push(Vertex::Finite(m));
                    push_direction(&mut out, b - m);
                }
            }
        }
    }

    // Drop consecutive duplicates, including across the cyclic seam.
    let mut deduped: Vec<Vertex> = Vec::with_capacity(out.len());
    for v in out {
        if deduped.last() != Some(&v) {
            deduped.push(v);
        }
    }
    while deduped.len() > 1 && deduped.first() == deduped.last() {
        deduped.pop();
    }
    if deduped.len() < 3 {
        return None;
    }
    Some(Path::new(deduped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_central_projection_lands_on_edge() {
        let p = central_projection(Vec2::new(1.0, 0.25));
        assert_relative_eq!(p.x, DOMAIN_HALF_WIDTH);
        assert_relative_eq!(p.y, DOMAIN_HALF_WIDTH * 0.25);
    }

    #[test]
    fn test_ray_exit_hits_nearest_edge() {
        let p = ray_exit(Point2::new(0.0, 1.0), Vec2::new(1.0, 0.0));
        assert_relative_eq!(p.x, DOMAIN_HALF_WIDTH);
        assert_relative_eq!(p.y, 1.0);
    }

    #[test]
    fn test_corners_ccw_quarter_turn() {
        let w = DOMAIN_HALF_WIDTH;
        let corners = corners_between(Point2::new(w, 0.0), Point2::new(0.0, w), true);
        assert_eq!(corners.len(), 1);
        assert_relative_eq!(corners[0].x, w);
        assert_relative_eq!(corners[0].y, w);
    }

    #[test]
    fn test_corners_cw_quarter_turn() {
        let w = DOMAIN_HALF_WIDTH;
        let corners = corners_between(Point2::new(w, 0.0), Point2::new(0.0, -w), false);
        assert_eq!(corners.len(), 1);
        assert_relative_eq!(corners[0].x, w);
        assert_relative_eq!(corners[0].y, -w);
    }

    #[test]
    fn test_corners_same_angle_is_empty() {
        let w = DOMAIN_HALF_WIDTH;
        let a = Point2::new(w, 0.5);
        assert!(corners_between(a, a, true).is_empty());
    }

    #[test]
    fn test_finite_overflow_is_detected() {
        let p = Point2::new(DOMAIN_HALF_WIDTH + 1.0, 0.0);
        assert!(matches!(
            scale_finite(&p),
            Err(PathError::DomainOverflow(_, _))
        ));
    }

    #[test]
    fn test_project_drops_degenerate_path() {
        let path = Path::from_points(&[(0.0, 0.0), (0.0, 0.0), (1.0, 1.0)]);
        assert_eq!(project_path(&path).unwrap(), None);
    }

    #[test]
    fn test_lift_keeps_corner_stations_of_a_half_plane() {
        // Half-plane x <= 1: the clipped contour rides three domain sides,
        // and its two far corners must come back as central directions so
        // the escape runs of a re-projection never turn by a half turn or
        // more in one step.
        let path = Path::new(vec![
            Vertex::Direction(Vec2::new(0.0, -1.0)),
            Vertex::Finite(Point2::new(1.0, 0.0)),
            Vertex::Direction(Vec2::new(0.0, 1.0)),
            Vertex::Direction(Vec2::new(-1.0, 0.0)),
        ]);
        let ints = project_path(&path).unwrap().unwrap();
        let lifted = lift_path(&ints).unwrap();

        let dirs: Vec<Vec2> = lifted
            .vertices()
            .iter()
            .filter_map(|v| match v {
                Vertex::Direction(d) => Some(*d),
                Vertex::Finite(_) => None,
            })
            .collect();
        assert!(dirs.len() >= 4);
        for pair in dirs.windows(2) {
            assert!(pair[0].dot(&pair[1]) > -0.5);
        }

        // Re-projecting the lifted path reproduces the same contour.
        let again = project_path(&lifted).unwrap().unwrap();
        assert_eq!(again, ints);
    }

    #[test]
    fn test_project_and_lift_round_trip_finite_triangle() {
        let path = Path::from_points(&[(0.0, 0.0), (4.0, 0.0), (0.0, 3.0)]);
        let ints = project_path(&path).unwrap().unwrap();
        assert_eq!(ints.len(), 3);
        let back = lift_path(&ints).unwrap();
        assert!(back.is_finite());
        assert_eq!(back.len(), 3);
    }
}
