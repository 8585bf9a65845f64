//! Tenon variants and their joint profiles.

use std::f64::consts::{FRAC_PI_2, PI};

use kerf_math::{Point2, Vec2};
use kerf_path::{half_plane, Polygon};
use kerf_topo::View;

use crate::pulse::{Pulse, PulseKind};

/// How deep a slot recesses or a finger protrudes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Depth {
    /// Computed from the edge's dihedral angle and the material thickness,
    /// so the cut seats flush against the mating face.
    Auto,
    /// A fixed depth in model units.
    Fixed(f64),
    /// No depth clipping at all.
    Unbounded,
}

/// A joint pattern for one edge.
///
/// A tenon is a pure function of edge geometry: it yields the material
/// thickness, the pulse pattern partitioning the edge, and the resulting
/// 2D joint profile in the edge's local frame (edge along `+x` starting at
/// the origin, face interior toward `+y`).
///
/// The two decorators build the mating twin of a base pattern:
/// [`Tenon::Opposite`] swaps fingers and slots, [`Tenon::Reversed`] mirrors
/// the pattern end-to-end and swaps the two depth roles, matching the
/// reversed parametrization of the twin view on the other side of the edge.
#[derive(Debug, Clone, PartialEq)]
pub enum Tenon {
    /// No joint: the edge is a straight cut along the baseline.
    Plain,
    /// Evenly spaced alternating fingers and slots.
    RegularFinger {
        /// Material thickness of the mating piece.
        thickness: f64,
        /// Total number of pulses; the edge is split into this many equal
        /// intervals, alternating finger, slot, finger, ...
        finger_count: usize,
        /// Depth of the slot recesses.
        slot_depth: Depth,
        /// Protrusion length of the fingers.
        finger_length: Depth,
    },
    /// The complementary pattern: the inner tenon with fingers and slots
    /// exchanged.
    Opposite(Box<Tenon>),
    /// The inner tenon mirrored end-to-end along the edge, with slot depth
    /// and finger length exchanged.
    Reversed(Box<Tenon>),
}

impl Tenon {
    /// Wrap in the complementary decorator.
    pub fn opposite(self) -> Tenon {
        Tenon::Opposite(Box::new(self))
    }

    /// Wrap in the end-to-end mirroring decorator.
    pub fn reversed(self) -> Tenon {
        Tenon::Reversed(Box::new(self))
    }

    /// Material thickness of the mating piece.
    pub fn thickness(&self) -> f64 {
        match self {
            Tenon::Plain => 0.0,
            Tenon::RegularFinger { thickness, .. } => *thickness,
            Tenon::Opposite(inner) | Tenon::Reversed(inner) => inner.thickness(),
        }
    }

    /// The pulse pattern partitioning `[0, edge_length)`.
    pub fn pulses(&self, edge_length: f64) -> Vec<Pulse> {
        match self {
            Tenon::Plain => Vec::new(),
            Tenon::RegularFinger { finger_count, .. } => {
                let n = *finger_count;
                let width = edge_length / n as f64;
                (0..n)
                    .map(|i| {
                        let kind = if i % 2 == 0 {
                            PulseKind::Finger
                        } else {
                            PulseKind::Slot
                        };
                        Pulse::new(i as f64 * width, width, kind)
                    })
                    .collect()
            }
            Tenon::Opposite(inner) => inner
                .pulses(edge_length)
                .into_iter()
                .map(Pulse::flipped)
                .collect(),
            Tenon::Reversed(inner) => {
                let mut pulses: Vec<Pulse> = inner
                    .pulses(edge_length)
                    .into_iter()
                    .map(|p| p.mirrored(edge_length))
                    .collect();
                pulses.reverse();
                pulses
            }
        }
    }

    /// The `(slot_depth, finger_length)` settings after decorator swaps.
    fn depths(&self) -> (Depth, Depth) {
        match self {
            Tenon::Plain => (Depth::Auto, Depth::Auto),
            Tenon::RegularFinger {
                slot_depth,
                finger_length,
                ..
            } => (*slot_depth, *finger_length),
            Tenon::Opposite(inner) => inner.depths(),
            Tenon::Reversed(inner) => {
                let (s, f) = inner.depths();
                (f, s)
            }
        }
    }

    /// The joint profile `V` in the edge's local frame.
    ///
    /// Material fills `y >= 0`; slots recess to the slot depth, fingers
    /// protrude to `y = -finger_length`. A tenon without pulses degenerates
    /// to the plain [`baseline`] half-plane.
    pub fn profile(&self, edge: &View<'_>) -> Polygon {
        let pulses = self.pulses(edge.edge_length());
        if pulses.is_empty() {
            return baseline();
        }

        let theta = edge.dihedral_angle(&edge.opposite());
        let d = self.thickness();
        let (slot_setting, finger_setting) = self.depths();
        let slot_depth = resolve_slot_depth(slot_setting, theta, d);
        let finger_length = resolve_finger_length(finger_setting, theta, d);

        let fingers = pulse_strips(&pulses, PulseKind::Finger);
        let slots = pulse_strips(&pulses, PulseKind::Slot);

        // Fingers keep everything above the protrusion depth, slots cut
        // everything below the recess depth out of the material side.
        let protruding = match (fingers, finger_length) {
            (Some(f), Some(h)) => {
                Some(f / half_plane(Point2::new(0.0, -h), Vec2::new(0.0, 1.0)))
            }
            (f, None) => f,
            (None, _) => None,
        };
        let recessed = match (slots, slot_depth) {
            (Some(s), Some(h)) => {
                Some(s / half_plane(Point2::new(0.0, h), Vec2::new(0.0, -1.0)))
            }
            (s, None) => s,
            (None, _) => None,
        };

        let mut v = baseline();
        if let Some(r) = recessed {
            v = v / r;
        }
        if let Some(p) = protruding {
            v = v | p;
        }
        v
    }
}

/// The straight baseline half-plane of an edge, `y >= 0` in the edge's
/// local frame: all material on the face-interior side of the edge line.
pub fn baseline() -> Polygon {
    half_plane(Point2::origin(), Vec2::new(0.0, -1.0))
}

/// Union of the unbounded vertical strips of all pulses of one kind.
fn pulse_strips(pulses: &[Pulse], kind: PulseKind) -> Option<Polygon> {
    pulses
        .iter()
        .filter(|p| p.kind == kind)
        .map(|p| strip(p.start, p.end()))
        .reduce(|a, b| a | b)
}

/// The vertical strip `t1 <= x <= t2`, unbounded in `y`.
fn strip(t1: f64, t2: f64) -> Polygon {
    half_plane(Point2::new(t1, 0.0), Vec2::new(-1.0, 0.0))
        & half_plane(Point2::new(t2, 0.0), Vec2::new(1.0, 0.0))
}

/// Slot depth from the dihedral angle: zero for folds at or sharper than a
/// right angle, `d / tan(pi - theta)` for shallower folds.
fn resolve_slot_depth(setting: Depth, theta: f64, d: f64) -> Option<f64> {
    match setting {
        Depth::Fixed(h) => Some(h),
        Depth::Unbounded => None,
        Depth::Auto => {
            if theta <= FRAC_PI_2 {
                Some(0.0)
            } else {
                let t = (PI - theta).tan();
                if t < 1e-9 {
                    None
                } else {
                    Some(d / t)
                }
            }
        }
    }
}

/// Finger length from the dihedral angle: `d / sin(pi - theta)`, so the
/// finger tip seats flush against the mating face at any fold angle.
fn resolve_finger_length(setting: Depth, theta: f64, d: f64) -> Option<f64> {
    match setting {
        Depth::Fixed(h) => Some(h),
        Depth::Unbounded => None,
        Depth::Auto => {
            let s = (PI - theta).sin();
            if s < 1e-9 {
                None
            } else {
                Some(d / s)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use kerf_path::{polygon, Path};
    use kerf_primitives::cube;

    fn regular(thickness: f64, count: usize) -> Tenon {
        Tenon::RegularFinger {
            thickness,
            finger_count: count,
            slot_depth: Depth::Auto,
            finger_length: Depth::Auto,
        }
    }

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
        p.paths().unwrap().iter().map(|l| signed_area(l)).sum()
    }

    #[test]
    fn test_regular_pulses_partition_the_edge() {
        let pulses = regular(0.1, 4).pulses(4.0);
        assert_eq!(pulses.len(), 4);
        let mut cursor = 0.0;
        for (i, p) in pulses.iter().enumerate() {
            assert_relative_eq!(p.start, cursor);
            assert_relative_eq!(p.width, 1.0);
            let expected = if i % 2 == 0 {
                PulseKind::Finger
            } else {
                PulseKind::Slot
            };
            assert_eq!(p.kind, expected);
            cursor = p.end();
        }
        assert_relative_eq!(cursor, 4.0);
    }

    #[test]
    fn test_opposite_flips_every_pulse() {
        let base = regular(0.1, 4);
        let twin = base.clone().opposite();
        for (b, t) in base.pulses(4.0).iter().zip(twin.pulses(4.0)) {
            assert_relative_eq!(b.start, t.start);
            assert_relative_eq!(b.width, t.width);
            assert_eq!(b.kind.flipped(), t.kind);
        }
    }

    #[test]
    fn test_reversed_mirrors_the_pattern() {
        let base = Tenon::RegularFinger {
            thickness: 0.1,
            finger_count: 3,
            slot_depth: Depth::Auto,
            finger_length: Depth::Auto,
        };
        let rev = base.clone().reversed();
        let pulses = rev.pulses(3.0);
        assert_eq!(pulses.len(), 3);
        // Base is F S F from the start; mirrored it reads F S F again, but
        // an asymmetric check: the mirror of the base's first pulse sits at
        // the far end.
        let first = base.pulses(3.0)[0];
        let last = pulses[2];
        assert_relative_eq!(last.start, 3.0 - first.end());
        assert_eq!(last.kind, first.kind);
    }

    #[test]
    fn test_twin_fingers_tile_the_edge() {
        let base = regular(0.1, 4);
        let twin = base.clone().reversed().opposite();
        let length = 4.0;

        // Map the twin's pulses from the opposite view's parametrization
        // (which runs backwards) into the base view's, then check that
        // finger intervals of base and twin partition the edge.
        let mut fingers: Vec<Pulse> = base
            .pulses(length)
            .into_iter()
            .chain(
                twin.pulses(length)
                    .into_iter()
                    .map(|p| p.mirrored(length)),
            )
            .filter(|p| p.kind == PulseKind::Finger)
            .collect();
        fingers.sort_by(|a, b| a.start.total_cmp(&b.start));

        let mut cursor = 0.0;
        for f in &fingers {
            assert_relative_eq!(f.start, cursor, epsilon = 1e-12);
            cursor = f.end();
        }
        assert_relative_eq!(cursor, length, epsilon = 1e-12);
    }

    #[test]
    fn test_right_angle_depths() {
        let theta = FRAC_PI_2;
        assert_eq!(resolve_slot_depth(Depth::Auto, theta, 0.1), Some(0.0));
        let f = resolve_finger_length(Depth::Auto, theta, 0.1).unwrap();
        assert_relative_eq!(f, 0.1);
    }

    #[test]
    fn test_shallow_fold_depths() {
        // 135 degree fold: slot depth d / tan(45) = d, finger d / sin(45).
        let theta = 3.0 * std::f64::consts::FRAC_PI_4;
        let d = 0.2;
        let s = resolve_slot_depth(Depth::Auto, theta, d).unwrap();
        let f = resolve_finger_length(Depth::Auto, theta, d).unwrap();
        assert_relative_eq!(s, d, epsilon = 1e-12);
        assert_relative_eq!(f, d * 2.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_cube_edge_profile_area() {
        let c = cube(1.0).unwrap();
        let edge = c.face_view(1);
        let v = regular(0.1, 4).profile(&edge);

        // At a right-angle fold slots stay flush and two fingers of width
        // 0.25 protrude by the material thickness.
        let window = polygon([Path::from_points(&[
            (0.0, -1.0),
            (1.0, -1.0),
            (1.0, 1.0),
            (0.0, 1.0),
        ])]);
        assert_relative_eq!(area(&(v & window)), 1.0 + 2.0 * 0.25 * 0.1, epsilon = 1e-5);
    }

    #[test]
    fn test_plain_profile_is_the_baseline() {
        let c = cube(1.0).unwrap();
        let edge = c.face_view(0);
        let v = Tenon::Plain.profile(&edge);
        let window = polygon([Path::from_points(&[
            (-1.0, -1.0),
            (1.0, -1.0),
            (1.0, 1.0),
            (-1.0, 1.0),
        ])]);
        assert_relative_eq!(area(&(v & window)), 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_unbounded_finger_length_reaches_past_any_depth() {
        let c = cube(1.0).unwrap();
        let edge = c.face_view(1);
        let t = Tenon::RegularFinger {
            thickness: 0.1,
            finger_count: 2,
            slot_depth: Depth::Auto,
            finger_length: Depth::Unbounded,
        };
        let v = t.profile(&edge);
        let deep = polygon([Path::from_points(&[
            (0.0, -10.0),
            (0.5, -10.0),
            (0.5, -9.0),
            (0.0, -9.0),
        ])]);
        // The first pulse is a finger on [0, 0.5); unbounded, it still has
        // material 10 units below the baseline.
        assert_relative_eq!(area(&(v & deep)), 0.5, epsilon = 1e-5);
    }
}
