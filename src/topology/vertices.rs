//! Vertex groups: element corners that coincide at one physical vertex.
//!
//! Logical vertex `(i, j)` is touched by the elements in the 2×2 box of
//! columns `i-1, i` and rows `j-1, j`. On a periodic axis the box wraps; on a
//! bounded axis members outside the mesh are dropped, so corner vertices have
//! one member, edge vertices two, interior vertices four.

use super::Topology2D;

/// Corners of the elements sharing one vertex, as `(elem, local_vertex)` pairs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexGroup {
    members: [(usize, usize); 4],
    len: usize,
}

impl VertexGroup {
    fn push(&mut self, elem: usize, vertex: usize) {
        self.members[self.len] = (elem, vertex);
        self.len += 1;
    }

    /// Number of element corners in the group.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.members[..self.len].iter().copied()
    }

    pub fn as_slice(&self) -> &[(usize, usize)] {
        &self.members[..self.len]
    }
}

impl IntoIterator for VertexGroup {
    type Item = (usize, usize);
    type IntoIter = std::iter::Take<std::array::IntoIter<(usize, usize), 4>>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter().take(self.len)
    }
}

/// Row-major iterator over the vertex groups of a topology.
///
/// Cheap to create; call [`Topology2D::vertices`] again to restart.
#[derive(Clone, Debug)]
pub struct Vertices<'a> {
    topology: &'a Topology2D,
    nv1: usize,
    nv2: usize,
    next: usize,
}

impl<'a> Vertices<'a> {
    pub(super) fn new(topology: &'a Topology2D) -> Self {
        let n1 = topology.mesh().n1();
        let n2 = topology.mesh().n2();
        let nv1 = if topology.domain().x1_periodic() { n1 } else { n1 + 1 };
        let nv2 = if topology.domain().x2_periodic() { n2 } else { n2 + 1 };
        Self {
            topology,
            nv1,
            nv2,
            next: 0,
        }
    }

    /// Group at logical vertex `(i, j)`.
    fn group(&self, i: usize, j: usize) -> VertexGroup {
        let mesh = self.topology.mesh();
        let (n1, n2) = (mesh.n1(), mesh.n2());
        let p1 = self.topology.domain().x1_periodic();
        let p2 = self.topology.domain().x2_periodic();

        // (index, is the element's high side along this axis)
        let rows = [
            below(j, n2, p2).map(|r| (r, true)),
            (j < n2).then_some((j, false)),
        ];
        let cols = [
            below(i, n1, p1).map(|c| (c, true)),
            (i < n1).then_some((i, false)),
        ];

        let mut group = VertexGroup {
            members: [(0, 0); 4],
            len: 0,
        };
        for (row, hi2) in rows.into_iter().flatten() {
            for &(col, hi1) in cols.iter().flatten() {
                let vertex = 1 + usize::from(hi1) + 2 * usize::from(hi2);
                group.push(mesh.element_at(row, col), vertex);
            }
        }
        group
    }
}

fn below(i: usize, n: usize, periodic: bool) -> Option<usize> {
    if i > 0 {
        Some(i - 1)
    } else if periodic {
        Some(n - 1)
    } else {
        None
    }
}

impl Iterator for Vertices<'_> {
    type Item = VertexGroup;

    fn next(&mut self) -> Option<VertexGroup> {
        if self.next >= self.nv1 * self.nv2 {
            return None;
        }
        let (j, i) = (self.next / self.nv1, self.next % self.nv1);
        self.next += 1;
        Some(self.group(i, j))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.nv1 * self.nv2 - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Vertices<'_> {}

#[cfg(test)]
mod tests {
    use crate::domain::{Axis, IntervalDomain, RectangleDomain};
    use crate::mesh::RectilinearMesh;
    use crate::topology::Topology2D;

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

    #[test]
    fn test_group_sizes_non_periodic() {
        let topo = topology(2, 2, false, false);
        let sizes: Vec<usize> = topo.vertices().map(|g| g.len()).collect();
        assert_eq!(sizes, vec![1, 2, 1, 2, 4, 2, 1, 2, 1]);
    }

    #[test]
    fn test_center_vertex_members() {
        let topo = topology(2, 2, false, false);
        let center = topo.vertices().nth(4).unwrap();
        assert_eq!(center.as_slice(), &[(1, 4), (2, 3), (3, 2), (4, 1)]);
    }

    #[test]
    fn test_single_periodic_element() {
        let topo = topology(1, 1, true, true);
        let groups: Vec<_> = topo.vertices().collect();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].as_slice(), &[(1, 4), (1, 3), (1, 2), (1, 1)]);
    }

    #[test]
    fn test_every_corner_appears_once() {
        for &(p1, p2) in &[(false, false), (true, false), (false, true), (true, true)] {
            let topo = topology(3, 2, p1, p2);
            let mut seen = vec![[0usize; 4]; topo.n_elements()];
            let mut groups = 0;
            for group in topo.vertices() {
                groups += 1;
                for (e, v) in group {
                    seen[e - 1][v - 1] += 1;
                }
            }
            assert_eq!(groups, topo.n_vertices());
            assert!(seen.iter().all(|c| c.iter().all(|&n| n == 1)));
        }
    }

    #[test]
    fn test_members_share_coordinates() {
        let topo = topology(3, 3, false, false);
        for group in topo.vertices() {
            let coords: Vec<[f64; 2]> = group
                .iter()
                .map(|(e, v)| topo.mesh().vertex_coordinate(e, v).unwrap())
                .collect();
            for c in &coords {
                assert!((c[0] - coords[0][0]).abs() < 1e-14);
                assert!((c[1] - coords[0][1]).abs() < 1e-14);
            }
        }
    }

    #[test]
    fn test_exact_size() {
        let topo = topology(4, 3, true, false);
        assert_eq!(topo.vertices().len(), 4 * 4);
    }
}
