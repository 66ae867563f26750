//! Element connectivity of logically rectangular meshes.
//!
//! The topology answers adjacency queries over a [`RectilinearMesh`]:
//! which face of which element lies across a given face, which faces are
//! shared between two elements, which faces lie on a named boundary, and
//! which element corners meet at each physical vertex.
//!
//! Face convention (1-based):
//! - Face 1: west,  ξ1 = -1
//! - Face 2: east,  ξ1 = +1
//! - Face 3: south, ξ2 = -1
//! - Face 4: north, ξ2 = +1
//!
//! Boundary tags follow the face numbers: tags 1, 2 name the low/high ends of
//! axis 1, tags 3, 4 those of axis 2. A periodic axis has no tags.
//!
//! Element number `0` is the physical-boundary sentinel. Negative (ghost)
//! element numbers are reserved for distributed meshes and are never produced
//! here: every element is local.

mod vertices;

pub use vertices::{VertexGroup, Vertices};

use crate::domain::RectangleDomain;
use crate::error::{Result, SemError};
use crate::mesh::RectilinearMesh;

/// Result of an [`Topology2D::opposing_face`] query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OpposingFace {
    /// Neighbouring element (1-based), or 0 at a physical boundary.
    pub element: usize,
    /// Face of the neighbour that touches the queried face. At a physical
    /// boundary this is the boundary tag of the queried face.
    pub face: usize,
    /// Whether the neighbour traverses the shared face in the opposite direction.
    pub reversed: bool,
}

impl OpposingFace {
    /// Whether the queried face lies on a physical boundary.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.element == 0
    }
}

/// A face shared by two elements, visited once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InteriorFace {
    pub elem1: usize,
    pub face1: usize,
    pub elem2: usize,
    pub face2: usize,
    pub reversed: bool,
}

/// Connectivity of a 2D rectilinear mesh together with its boundary table.
#[derive(Clone, Debug)]
pub struct Topology2D {
    mesh: RectilinearMesh,
    boundaries: Vec<(String, usize)>,
}

impl Topology2D {
    /// Build the topology of `mesh`, naming boundaries after its domain.
    ///
    /// Bounded axes contribute their (low, high) names with tags 1, 2 for the
    /// first axis and 3, 4 for the second; periodic axes contribute nothing.
    pub fn new(mesh: RectilinearMesh) -> Self {
        let mut boundaries = Vec::with_capacity(4);
        if let Some((lo, hi)) = mesh.domain().x1_boundary() {
            boundaries.push((lo.to_string(), 1));
            boundaries.push((hi.to_string(), 2));
        }
        if let Some((lo, hi)) = mesh.domain().x2_boundary() {
            boundaries.push((lo.to_string(), 3));
            boundaries.push((hi.to_string(), 4));
        }
        tracing::debug!(
            n_elements = mesh.n_elements(),
            n_boundaries = boundaries.len(),
            "built rectilinear topology"
        );
        Self { mesh, boundaries }
    }

    pub fn mesh(&self) -> &RectilinearMesh {
        &self.mesh
    }

    pub fn domain(&self) -> &RectangleDomain {
        self.mesh.domain()
    }

    pub fn n_elements(&self) -> usize {
        self.mesh.n_elements()
    }

    /// Elements owned by this process. Equal to [`n_elements`](Self::n_elements).
    pub fn n_local_elements(&self) -> usize {
        self.mesh.n_elements()
    }

    /// Remote elements mirrored locally. Always 0 without distributed execution.
    pub fn n_ghost_elements(&self) -> usize {
        0
    }

    /// Ordered `(name, tag)` boundary table.
    pub fn boundaries(&self) -> &[(String, usize)] {
        &self.boundaries
    }

    /// Boundary names in tag order.
    pub fn boundary_names(&self) -> Vec<&str> {
        self.boundaries.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Tag of the boundary called `name`.
    pub fn boundary_tag(&self, name: &str) -> Option<usize> {
        self.boundaries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, tag)| *tag)
    }

    /// Corner coordinates of `elem`; see [`RectilinearMesh::vertex_coordinates`].
    pub fn vertex_coordinates(&self, elem: usize) -> Result<[[f64; 2]; 4]> {
        self.mesh.vertex_coordinates(elem)
    }

    /// The face of the neighbouring element across `face` of `elem`.
    pub fn opposing_face(&self, elem: usize, face: usize) -> Result<OpposingFace> {
        if !(1..=4).contains(&face) {
            return Err(SemError::FaceOutOfRange(face));
        }
        let (row, col) = self.mesh.element_position(elem)?;
        let n1 = self.mesh.n1();
        let n2 = self.mesh.n2();
        let p1 = self.domain().x1_periodic();
        let p2 = self.domain().x2_periodic();

        let neighbour = match face {
            1 => step_down(col, n1, p1).map(|c| (row, c, 2)),
            2 => step_up(col, n1, p1).map(|c| (row, c, 1)),
            3 => step_down(row, n2, p2).map(|r| (r, col, 4)),
            _ => step_up(row, n2, p2).map(|r| (r, col, 3)),
        };

        Ok(match neighbour {
            Some((r, c, f)) => OpposingFace {
                element: self.mesh.element_at(r, c),
                face: f,
                reversed: false,
            },
            None => OpposingFace {
                element: 0,
                face,
                reversed: false,
            },
        })
    }

    /// Every face shared by two elements, visited exactly once.
    ///
    /// Axis-1 faces come first (face 1 of `elem1` against face 2 of its west
    /// neighbour), then axis-2 faces (face 3 against face 4), each row-major.
    pub fn interior_faces(&self) -> impl Iterator<Item = InteriorFace> + '_ {
        let n1 = self.mesh.n1();
        let n2 = self.mesh.n2();
        let start1 = usize::from(!self.domain().x1_periodic());
        let start2 = usize::from(!self.domain().x2_periodic());

        let axis1 = (0..n2).flat_map(move |row| (start1..n1).map(move |col| (row, col, 1)));
        let axis2 = (start2..n2).flat_map(move |row| (0..n1).map(move |col| (row, col, 3)));

        axis1.chain(axis2).map(move |(row, col, face)| {
            let elem1 = self.mesh.element_at(row, col);
            let (elem2, face2) = if face == 1 {
                (self.mesh.element_at(row, (col + n1 - 1) % n1), 2)
            } else {
                (self.mesh.element_at((row + n2 - 1) % n2, col), 4)
            };
            InteriorFace {
                elem1,
                face1: face,
                elem2,
                face2,
                reversed: false,
            }
        })
    }

    /// Number of interior faces:
    /// `(p1 ? n1 : n1-1)·n2 + n1·(p2 ? n2 : n2-1)`.
    pub fn n_interior_faces(&self) -> usize {
        let n1 = self.mesh.n1();
        let n2 = self.mesh.n2();
        let f1 = if self.domain().x1_periodic() { n1 } else { n1 - 1 };
        let f2 = if self.domain().x2_periodic() { n2 } else { n2 - 1 };
        f1 * n2 + n1 * f2
    }

    /// `(elem, face)` pairs on boundary `tag` (1..=4). Empty on a periodic axis.
    pub fn boundary_faces(&self, tag: usize) -> Result<impl Iterator<Item = (usize, usize)> + '_> {
        let n1 = self.mesh.n1();
        let n2 = self.mesh.n2();
        let (count, periodic) = match tag {
            1 | 2 => (n2, self.domain().x1_periodic()),
            3 | 4 => (n1, self.domain().x2_periodic()),
            _ => return Err(SemError::UnknownBoundary(format!("tag {}", tag))),
        };
        let len = if periodic { 0 } else { count };

        Ok((0..len).map(move |k| match tag {
            1 => (self.mesh.element_at(k, 0), 1),
            2 => (self.mesh.element_at(k, n1 - 1), 2),
            3 => (self.mesh.element_at(0, k), 3),
            _ => (self.mesh.element_at(n2 - 1, k), 4),
        }))
    }

    /// Boundary faces looked up by boundary name.
    pub fn boundary_faces_named(
        &self,
        name: &str,
    ) -> Result<impl Iterator<Item = (usize, usize)> + '_> {
        let tag = self
            .boundary_tag(name)
            .ok_or_else(|| SemError::UnknownBoundary(name.to_string()))?;
        self.boundary_faces(tag)
    }

    /// Groups of element corners meeting at each topological vertex.
    pub fn vertices(&self) -> Vertices<'_> {
        Vertices::new(self)
    }

    /// Number of vertex groups, equal to the mesh's topological vertex count.
    pub fn n_vertices(&self) -> usize {
        self.mesh.n_vertices()
    }
}

/// Index one step below `i` on an axis of `n` elements.
#[inline]
fn step_down(i: usize, n: usize, periodic: bool) -> Option<usize> {
    if i > 0 {
        Some(i - 1)
    } else if periodic {
        Some(n - 1)
    } else {
        None
    }
}

/// Index one step above `i` on an axis of `n` elements.
#[inline]
fn step_up(i: usize, n: usize, periodic: bool) -> Option<usize> {
    if i + 1 < n {
        Some(i + 1)
    } else if periodic {
        Some(0)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Axis, IntervalDomain};

    fn topology(n1: usize, n2: usize, p1: bool, p2: bool) -> Topology2D {
        let x = if p1 {
            IntervalDomain::periodic(0.0, 1.0, Axis::X).unwrap()
        } else {
            IntervalDomain::new(0.0, 1.0, Axis::X, ("west", "east")).unwrap()
        };
        let y = if p2 {
            IntervalDomain::periodic(0.0, 1.0, Axis::Y).unwrap()
        } else {
            IntervalDomain::new(0.0, 1.0, Axis::Y, ("south", "north")).unwrap()
        };
        let domain = RectangleDomain::new(x, y).unwrap();
        Topology2D::new(RectilinearMesh::equispaced(domain, n1, n2).unwrap())
    }

    fn face(element: usize, face: usize) -> OpposingFace {
        OpposingFace {
            element,
            face,
            reversed: false,
        }
    }

    #[test]
    fn test_self_periodic_single_element() {
        let topo = topology(1, 1, true, true);
        assert_eq!(topo.opposing_face(1, 1).unwrap(), face(1, 2));
        assert_eq!(topo.opposing_face(1, 2).unwrap(), face(1, 1));
        assert_eq!(topo.opposing_face(1, 3).unwrap(), face(1, 4));
        assert_eq!(topo.opposing_face(1, 4).unwrap(), face(1, 3));
    }

    #[test]
    fn test_two_by_two_neighbours() {
        let topo = topology(2, 2, false, false);
        assert_eq!(topo.opposing_face(1, 2).unwrap(), face(2, 1));
        assert_eq!(topo.opposing_face(1, 4).unwrap(), face(3, 3));
        assert_eq!(topo.opposing_face(4, 1).unwrap(), face(3, 2));
        assert_eq!(topo.opposing_face(4, 3).unwrap(), face(2, 4));
    }

    #[test]
    fn test_boundary_sentinel() {
        let topo = topology(3, 2, false, false);
        for row in 0..2 {
            let west = topo.mesh().element_at(row, 0);
            let east = topo.mesh().element_at(row, 2);
            assert!(topo.opposing_face(west, 1).unwrap().is_boundary());
            assert!(topo.opposing_face(east, 2).unwrap().is_boundary());
        }
        for col in 0..3 {
            let south = topo.mesh().element_at(0, col);
            let north = topo.mesh().element_at(1, col);
            assert_eq!(topo.opposing_face(south, 3).unwrap().element, 0);
            assert_eq!(topo.opposing_face(north, 4).unwrap().element, 0);
        }
    }

    #[test]
    fn test_periodic_wraparound() {
        let topo = topology(3, 2, true, false);
        assert_eq!(topo.opposing_face(1, 1).unwrap(), face(3, 2));
        assert_eq!(topo.opposing_face(3, 2).unwrap(), face(1, 1));
        assert!(topo.opposing_face(1, 3).unwrap().is_boundary());
    }

    #[test]
    fn test_opposing_face_range_errors() {
        let topo = topology(2, 2, false, false);
        assert_eq!(topo.opposing_face(1, 0), Err(SemError::FaceOutOfRange(0)));
        assert_eq!(topo.opposing_face(1, 5), Err(SemError::FaceOutOfRange(5)));
        assert!(matches!(
            topo.opposing_face(0, 1),
            Err(SemError::ElementOutOfRange { .. })
        ));
        assert!(matches!(
            topo.opposing_face(5, 1),
            Err(SemError::ElementOutOfRange { element: 5, n_elements: 4 })
        ));
    }

    #[test]
    fn test_opposing_face_is_symmetric() {
        for &(p1, p2) in &[(false, false), (true, false), (false, true), (true, true)] {
            let topo = topology(3, 4, p1, p2);
            for e in 1..=topo.n_elements() {
                for f in 1..=4 {
                    let op = topo.opposing_face(e, f).unwrap();
                    if op.is_boundary() {
                        continue;
                    }
                    let back = topo.opposing_face(op.element, op.face).unwrap();
                    assert_eq!((back.element, back.face), (e, f));
                }
            }
        }
    }

    #[test]
    fn test_interior_face_counts() {
        let count = |n1, n2, p1, p2| topology(n1, n2, p1, p2).interior_faces().count();
        assert_eq!(count(1, 1, true, true), 2);
        assert_eq!(count(1, 1, true, false), 1);
        assert_eq!(count(1, 1, false, false), 0);
        assert_eq!(count(2, 2, false, false), 4);

        for &(n1, n2) in &[(3, 2), (4, 5), (1, 3)] {
            for &(p1, p2) in &[(false, false), (true, false), (false, true), (true, true)] {
                let topo = topology(n1, n2, p1, p2);
                assert_eq!(topo.interior_faces().count(), topo.n_interior_faces());
            }
        }
    }

    #[test]
    fn test_interior_face_order() {
        let topo = topology(2, 2, false, false);
        let faces: Vec<_> = topo
            .interior_faces()
            .map(|f| (f.elem1, f.face1, f.elem2, f.face2))
            .collect();
        assert_eq!(faces, vec![(2, 1, 1, 2), (4, 1, 3, 2), (3, 3, 1, 4), (4, 3, 2, 4)]);

        // restartable
        assert_eq!(topo.interior_faces().count(), 4);
    }

    #[test]
    fn test_interior_faces_agree_with_opposing_face() {
        let topo = topology(3, 3, true, false);
        for f in topo.interior_faces() {
            let op = topo.opposing_face(f.elem1, f.face1).unwrap();
            assert_eq!((op.element, op.face, op.reversed), (f.elem2, f.face2, f.reversed));
        }
    }

    #[test]
    fn test_boundary_faces() {
        let topo = topology(1, 1, true, true);
        for tag in 1..=4 {
            assert_eq!(topo.boundary_faces(tag).unwrap().count(), 0);
        }
        assert!(topo.boundary_names().is_empty());

        let topo = topology(2, 3, false, false);
        let west: Vec<_> = topo.boundary_faces(1).unwrap().collect();
        assert_eq!(west, vec![(1, 1), (3, 1), (5, 1)]);
        let south: Vec<_> = topo.boundary_faces(3).unwrap().collect();
        assert_eq!(south, vec![(1, 3), (2, 3)]);
        let east: Vec<_> = topo.boundary_faces(2).unwrap().collect();
        assert_eq!(east, vec![(2, 2), (4, 2), (6, 2)]);
        let north: Vec<_> = topo.boundary_faces_named("north").unwrap().collect();
        assert_eq!(north, vec![(5, 4), (6, 4)]);
    }

    #[test]
    fn test_boundary_table() {
        let topo = topology(2, 2, true, false);
        assert_eq!(topo.boundary_names(), vec!["south", "north"]);
        assert_eq!(topo.boundary_tag("south"), Some(3));
        assert_eq!(topo.boundary_tag("west"), None);
        assert!(matches!(
            topo.boundary_faces_named("west"),
            Err(SemError::UnknownBoundary(_))
        ));
        assert!(topo.boundary_faces(0).is_err());
        assert!(topo.boundary_faces(5).is_err());
    }

    #[test]
    fn test_local_element_hooks() {
        let topo = topology(3, 2, false, true);
        assert_eq!(topo.n_local_elements(), 6);
        assert_eq!(topo.n_ghost_elements(), 0);
    }
}
