//! View handles and per-view differential geometry.

use kerf_math::{Point2, Point3, Transform, Vec3};
use kerf_path::{polygon, vertex, Path, Polygon, Vertex};

use crate::polyhedron::Polyhedron;

/// A half-edge of a polyhedron: the directed edge visited when walking one
/// face's boundary in positive orientation.
///
/// A view owns no coordinates; it is an index into its [`Polyhedron`] and is
/// freely copyable. All per-edge and per-face geometry queries hang off it.
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    poly: &'a Polyhedron,
    index: usize,
}

impl PartialEq for View<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.poly, other.poly) && self.index == other.index
    }
}

impl Eq for View<'_> {}

impl<'a> View<'a> {
    pub(crate) fn new(poly: &'a Polyhedron, index: usize) -> Self {
        Self { poly, index }
    }

    /// Index of this view within its polyhedron.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The polyhedron this view belongs to.
    pub fn polyhedron(&self) -> &'a Polyhedron {
        self.poly
    }

    /// Index of the vertex this view starts at.
    pub fn vertex_index(&self) -> usize {
        self.poly.view_vertex_index(self.index)
    }

    /// Index of the face this view bounds.
    pub fn face_index(&self) -> usize {
        self.poly.view_face_index(self.index)
    }

    /// Coordinates of the start vertex.
    pub fn vertex(&self) -> Point3 {
        self.poly.vertex(self.vertex_index())
    }

    /// The following view around the same face.
    pub fn next(&self) -> View<'a> {
        View::new(self.poly, self.poly.view_next(self.index))
    }

    /// The preceding view around the same face.
    pub fn previous(&self) -> View<'a> {
        let mut w = self.next();
        while w.next() != *self {
            w = w.next();
        }
        w
    }

    /// The twin view on the same undirected edge, traversed in reverse.
    pub fn opposite(&self) -> View<'a> {
        View::new(self.poly, self.poly.view_opposite(self.index))
    }

    /// The next view leaving the same start vertex, rotating across faces.
    pub fn adjacent(&self) -> View<'a> {
        self.opposite().next()
    }

    /// Number of vertices (and views) in this view's face.
    pub fn face_len(&self) -> usize {
        self.poly.face_size(self.face_index())
    }

    /// The views around this view's face, starting here.
    pub fn face_cycle(&self) -> impl Iterator<Item = View<'a>> + '_ {
        let start = *self;
        let mut current = Some(start);
        std::iter::from_fn(move || {
            let v = current?;
            let next = v.next();
            current = if next == start { None } else { Some(next) };
            Some(v)
        })
    }

    // -------------------------------------------------------------------------
    // Edge geometry
    // -------------------------------------------------------------------------

    /// Vector from the start vertex to the end vertex of the edge.
    pub fn edge_vector(&self) -> Vec3 {
        self.next().vertex() - self.vertex()
    }

    /// Unit vector along the edge.
    pub fn edge_direction(&self) -> Vec3 {
        self.edge_vector().normalize()
    }

    /// Length of the edge.
    pub fn edge_length(&self) -> f64 {
        self.edge_vector().norm()
    }

    // -------------------------------------------------------------------------
    // Face geometry
    // -------------------------------------------------------------------------

    /// The canonical per-edge orthonormal frame `(k1, k2, k3)`: `k1` along
    /// the edge, `k3` the outward face normal, `k2` completing a
    /// right-handed basis in the face plane.
    pub fn local_onb(&self) -> (Vec3, Vec3, Vec3) {
        let a = self.vertex();
        let b = self.next().vertex();
        let c = self.next().next().vertex();
        let k1 = (b - a).normalize();
        let n = (b - a).cross(&(c - b));
        let k2 = n.cross(&k1).normalize();
        let k3 = k1.cross(&k2);
        (k1, k2, k3)
    }

    /// Outward unit normal of this view's face.
    pub fn face_normal(&self) -> Vec3 {
        self.local_onb().2
    }

    /// The rigid transform from this edge's local frame (edge along x, face
    /// normal along z, anchored at the start vertex) into global coordinates.
    pub fn face_coordinate_system(&self) -> Transform {
        let (k1, k2, k3) = self.local_onb();
        Transform::from_frame(&k1, &k2, &k3, &self.vertex())
    }

    /// Coordinates of a global point in this view's local face frame.
    pub fn planar_coordinates(&self, point: Point3) -> Point2 {
        let (k1, k2, _) = self.local_onb();
        let r = point - self.vertex();
        Point2::new(r.dot(&k1), r.dot(&k2))
    }

    /// This view's face, projected into its own local 2D frame.
    ///
    /// The boundary winds counter-clockwise and starts at this view's
    /// vertex, which maps to the local origin.
    pub fn planar_polygon(&self) -> Polygon {
        let verts: Vec<Vertex> = self
            .face_cycle()
            .map(|w| {
                let p = self.planar_coordinates(w.vertex());
                vertex(p.x, p.y)
            })
            .collect();
        polygon([Path::new(verts)])
    }

    /// The angle between this view's face and another, measured so that
    /// coplanar unfolded faces give `pi` and a right-angle fold gives
    /// `pi / 2`.
    pub fn dihedral_angle(&self, other: &View<'_>) -> f64 {
        let cos = self.face_normal().dot(&other.face_normal());
        std::f64::consts::PI - cos.clamp(-1.0, 1.0).acos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn cube() -> Polyhedron {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        ];
        let faces = vec![
            vec![0, 3, 2, 1],
            vec![4, 5, 6, 7],
            vec![0, 1, 5, 4],
            vec![1, 2, 6, 5],
            vec![2, 3, 7, 6],
            vec![3, 0, 4, 7],
        ];
        Polyhedron::new(vertices, &faces).unwrap()
    }

    #[test]
    fn test_edge_geometry() {
        let c = cube();
        let v = c.face_view(2);
        assert_relative_eq!(v.edge_length(), 1.0);
        assert_relative_eq!(v.edge_direction(), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_face_normals_point_outward() {
        let c = cube();
        assert_relative_eq!(c.face_view(0).face_normal(), Vec3::new(0.0, 0.0, -1.0));
        assert_relative_eq!(c.face_view(1).face_normal(), Vec3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(c.face_view(2).face_normal(), Vec3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn test_local_onb_is_right_handed() {
        let c = cube();
        for v in c.views() {
            let (k1, k2, k3) = v.local_onb();
            assert_relative_eq!(k1.dot(&k2), 0.0, epsilon = 1e-12);
            assert_relative_eq!(k1.dot(&k3), 0.0, epsilon = 1e-12);
            assert_relative_eq!(k1.cross(&k2), k3, epsilon = 1e-12);
            assert_relative_eq!(k1.norm(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_dihedral_angle_of_cube_edges() {
        let c = cube();
        for v in c.views() {
            let o = v.opposite();
            assert_relative_eq!(v.dihedral_angle(&o), FRAC_PI_2, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_dihedral_angle_of_coplanar_faces_is_pi() {
        let v = cube();
        let top = v.face_view(1);
        assert_relative_eq!(top.dihedral_angle(&top), PI, epsilon = 1e-12);
    }

    #[test]
    fn test_planar_polygon_is_a_unit_square() {
        let c = cube();
        let p = c.face_view(0).planar_polygon();
        let loops = p.paths().unwrap();
        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].len(), 4);
        assert_relative_eq!(loops[0][0], Point2::new(0.0, 0.0));
        let area: f64 = {
            let l = &loops[0];
            (0..l.len())
                .map(|i| {
                    let a = l[i];
                    let b = l[(i + 1) % l.len()];
                    a.x * b.y - b.x * a.y
                })
                .sum::<f64>()
                / 2.0
        };
        assert_relative_eq!(area, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_face_coordinate_system_round_trip() {
        let c = cube();
        for v in c.canonical_views(crate::SelectionKind::Face) {
            let frame = v.face_coordinate_system();
            for w in v.face_cycle() {
                let local = v.planar_coordinates(w.vertex());
                let global = frame.apply_point(&Point3::new(local.x, local.y, 0.0));
                assert_relative_eq!(global, w.vertex(), epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_adjacent_cycles_around_a_cube_vertex() {
        let c = cube();
        let v = c.face_view(0);
        let mut w = v.adjacent();
        let mut steps = 1;
        while w != v {
            assert_eq!(w.vertex_index(), v.vertex_index());
            w = w.adjacent();
            steps += 1;
        }
        assert_eq!(steps, 3);
    }
}
