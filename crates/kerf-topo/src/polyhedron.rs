//! Polyhedron construction and view storage.

use std::collections::HashMap;

use kerf_math::Point3;

use crate::error::{Result, TopologyError};
use crate::view::View;

/// Which kind of topological element a selection addresses.
///
/// Used to reduce a polyhedron to one canonical view per face, per
/// undirected edge, or per vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    /// One view per face: the face's first boundary view.
    Face,
    /// One view per undirected edge: the twin with the lower view index.
    Edge,
    /// One view per vertex: the first view leaving that vertex.
    Vertex,
}

/// An immutable closed polyhedron with half-edge connectivity.
///
/// Built once from a vertex coordinate list and face vertex cycles; the
/// topology arrays never change afterwards. All traversal happens through
/// [`View`] handles, which index into the flat arrays stored here.
#[derive(Debug, Clone)]
pub struct Polyhedron {
    vertices: Vec<Point3>,
    face_sizes: Vec<usize>,
    face_first: Vec<usize>,
    view_vertex: Vec<usize>,
    view_face: Vec<usize>,
    next: Vec<usize>,
    opposite: Vec<usize>,
}

impl Polyhedron {
    /// Build a polyhedron from vertex coordinates and face vertex cycles.
    ///
    /// Faces list their vertices in positive winding (outward normal by the
    /// right-hand rule). Every directed edge must appear exactly once and
    /// its reverse exactly once; anything else rejects the mesh.
    pub fn new(vertices: Vec<Point3>, faces: &[Vec<usize>]) -> Result<Self> {
        let mut face_sizes = Vec::with_capacity(faces.len());
        let mut face_first = Vec::with_capacity(faces.len());
        let mut view_vertex = Vec::new();
        let mut view_face = Vec::new();
        let mut next = Vec::new();

        let mut edge_map: HashMap<(usize, usize), usize> = HashMap::new();

        for (f, cycle) in faces.iter().enumerate() {
            if cycle.len() < 3 {
                return Err(TopologyError::FaceTooSmall {
                    face: f,
                    count: cycle.len(),
                });
            }
            for &v in cycle {
                if v >= vertices.len() {
                    return Err(TopologyError::VertexOutOfRange {
                        face: f,
                        vertex: v,
                        count: vertices.len(),
                    });
                }
            }

            let first = view_vertex.len();
            face_first.push(first);
            face_sizes.push(cycle.len());

            for (i, &v) in cycle.iter().enumerate() {
                let w = cycle[(i + 1) % cycle.len()];
                let index = view_vertex.len();
                if edge_map.insert((v, w), index).is_some() {
                    return Err(TopologyError::DuplicateEdge { from: v, to: w });
                }
                view_vertex.push(v);
                view_face.push(f);
                next.push(first + (i + 1) % cycle.len());
            }
        }

        let mut opposite = vec![0usize; view_vertex.len()];
        for (&(v, w), &index) in &edge_map {
            match edge_map.get(&(w, v)) {
                Some(&twin) => opposite[index] = twin,
                None => return Err(TopologyError::OpenEdge { from: v, to: w }),
            }
        }

        Ok(Self {
            vertices,
            face_sizes,
            face_first,
            view_vertex,
            view_face,
            next,
            opposite,
        })
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces.
    pub fn face_count(&self) -> usize {
        self.face_sizes.len()
    }

    /// Number of views (half-edges); twice the number of undirected edges.
    pub fn view_count(&self) -> usize {
        self.view_vertex.len()
    }

    /// Coordinates of a vertex.
    pub fn vertex(&self, index: usize) -> Point3 {
        self.vertices[index]
    }

    /// The view with the given index.
    pub fn view(&self, index: usize) -> View<'_> {
        View::new(self, index)
    }

    /// The first boundary view of a face.
    pub fn face_view(&self, face: usize) -> View<'_> {
        View::new(self, self.face_first[face])
    }

    /// All views, in construction order.
    pub fn views(&self) -> impl Iterator<Item = View<'_>> {
        (0..self.view_count()).map(move |i| View::new(self, i))
    }

    /// One canonical view per element of the given selection kind.
    pub fn canonical_views(&self, kind: SelectionKind) -> Vec<View<'_>> {
        match kind {
            SelectionKind::Face => self
                .face_first
                .iter()
                .map(|&i| View::new(self, i))
                .collect(),
            SelectionKind::Edge => (0..self.view_count())
                .filter(|&i| i < self.opposite[i])
                .map(|i| View::new(self, i))
                .collect(),
            SelectionKind::Vertex => {
                let mut seen = vec![false; self.vertex_count()];
                let mut out = Vec::with_capacity(self.vertex_count());
                for i in 0..self.view_count() {
                    let v = self.view_vertex[i];
                    if !seen[v] {
                        seen[v] = true;
                        out.push(View::new(self, i));
                    }
                }
                out
            }
        }
    }

    pub(crate) fn view_vertex_index(&self, view: usize) -> usize {
        self.view_vertex[view]
    }

    pub(crate) fn view_face_index(&self, view: usize) -> usize {
        self.view_face[view]
    }

    pub(crate) fn view_next(&self, view: usize) -> usize {
        self.next[view]
    }

    pub(crate) fn view_opposite(&self, view: usize) -> usize {
        self.opposite[view]
    }

    pub(crate) fn face_size(&self, face: usize) -> usize {
        self.face_sizes[face]
    }
}
