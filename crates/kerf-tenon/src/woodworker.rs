//! Per-face outline composition.

use std::collections::HashMap;

use kerf_math::rot_ccw;
use kerf_path::{plane, Polygon, Transform2};
use kerf_stellation::edge_cone;
use kerf_topo::{Polyhedron, SelectionKind, View};

use crate::tenon::{baseline, Tenon};

/// Composes per-edge tenon profiles and stellation cones into the final
/// cuttable outline of each face.
///
/// On construction every undirected edge receives the base tenon on its
/// canonical view and the mirrored complement on the twin view, so the two
/// pieces meeting along any edge always mate. Individual edges can then be
/// reassigned.
#[derive(Debug, Clone)]
pub struct WoodWorker {
    tenons: HashMap<usize, Tenon>,
}

impl WoodWorker {
    /// Assign `base` to every canonical edge view of `polyhedron` and its
    /// mating twin pattern to every opposite view.
    pub fn new(polyhedron: &Polyhedron, base: Tenon) -> Self {
        let mut worker = Self {
            tenons: HashMap::with_capacity(polyhedron.view_count()),
        };
        for edge in polyhedron.canonical_views(SelectionKind::Edge) {
            worker.assign(&edge, base.clone());
        }
        worker
    }

    /// Assign a tenon to one edge view and the mating twin pattern to its
    /// opposite, replacing any previous assignment of either.
    pub fn assign(&mut self, edge: &View<'_>, tenon: Tenon) {
        let twin = tenon.clone().opposite().reversed();
        self.tenons.insert(edge.index(), tenon);
        self.tenons.insert(edge.opposite().index(), twin);
    }

    /// The tenon assigned to a view, if any.
    pub fn tenon(&self, edge: &View<'_>) -> Option<&Tenon> {
        self.tenons.get(&edge.index())
    }

    /// The finished outline of one face, in the face's local 2D frame.
    ///
    /// For every edge the allowed region is the tenon profile intersected
    /// with the union of its baseline half-plane and stellation cone, so a
    /// joint never intrudes into a neighbouring facet; the outline is the
    /// plane minus everything some edge disallows.
    pub fn piece(&self, face: &View<'_>) -> Polygon {
        let plain = Tenon::Plain;
        let mut cut = Polygon::empty();
        for edge in face.face_cycle() {
            let tenon = self.tenons.get(&edge.index()).unwrap_or(&plain);
            let map = edge_frame(face, &edge);

            let v = map * tenon.profile(&edge);
            let h = map * baseline();
            let s = edge_cone(face, &edge);

            let allowed = v & (h | s);
            cut = cut | !allowed;
        }
        plane() / cut
    }
}

/// The affine map from an edge's local frame into its face's 2D frame:
/// edge direction as the x axis, anchored at the edge's start vertex.
fn edge_frame(face: &View<'_>, edge: &View<'_>) -> Transform2 {
    let a = face.planar_coordinates(edge.vertex());
    let b = face.planar_coordinates(edge.next().vertex());
    let k1 = (b - a).normalize();
    let k2 = rot_ccw(k1);
    Transform2::new(k1.x, k2.x, a.x, k1.y, k2.y, a.y)
}
