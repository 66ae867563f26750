//! Spectral-element space on a 2D topology.
//!
//! Each element carries an `Nq × Nq` tensor grid of GLL nodes, `Nq = order + 1`.
//! Node `(i, j)` of element `e` (1-based) is stored at
//! `((e - 1) * Nq + j) * Nq + i`, with `i` running along ξ1.
//!
//! The reference square [-1, 1]² is mapped to the physical quad bilinearly
//! from its four vertices:
//!
//! x(ξ1, ξ2) = Σ_v φ_v(ξ1, ξ2) x_v,  φ_1 = (1-ξ1)(1-ξ2)/4, ...

use std::sync::Arc;

use crate::error::{Result, SemError};
use crate::geometry::LocalGeometry2D;
use crate::quadrature::GllQuadrature;
use crate::topology::Topology2D;

use super::Space;

/// Continuous Galerkin space of GLL nodes over a [`Topology2D`].
#[derive(Clone, Debug)]
pub struct SpectralElementSpace2D {
    topology: Arc<Topology2D>,
    quadrature: Arc<GllQuadrature>,
    local_geometry: Arc<[LocalGeometry2D]>,
    /// Σ WJ over every element copy of each node.
    dss_weights: Arc<[f64]>,
}

impl SpectralElementSpace2D {
    /// Build the space of polynomial order `order` on `topology`.
    ///
    /// # Arguments
    /// * `topology` - element connectivity and vertex coordinates
    /// * `order` - polynomial order, at least 1; each element gets `(order + 1)²` nodes
    ///
    /// # Returns
    /// The space with per-node geometry and DSS weights, or
    /// * `InvalidOrder` for `order == 0`
    /// * `InvalidDomain` if an element is degenerate or inverted (J ≤ 0)
    pub fn new(topology: impl Into<Arc<Topology2D>>, order: usize) -> Result<Self> {
        let topology = topology.into();
        let quadrature = Arc::new(GllQuadrature::new(order)?);
        let nq = quadrature.n_points();
        let n_elements = topology.n_elements();

        let mut local_geometry = Vec::with_capacity(n_elements * nq * nq);
        for elem in 1..=n_elements {
            let vertices = topology.vertex_coordinates(elem)?;
            for j in 0..nq {
                for i in 0..nq {
                    let r = quadrature.nodes()[i];
                    let s = quadrature.nodes()[j];
                    let weight = quadrature.weights()[i] * quadrature.weights()[j];
                    let geom = bilinear_geometry(&vertices, r, s, weight);
                    if geom.j.is_nan() || geom.j <= 0.0 {
                        return Err(SemError::InvalidDomain(format!(
                            "element {} is degenerate or inverted (J = {})",
                            elem, geom.j
                        )));
                    }
                    local_geometry.push(geom);
                }
            }
        }

        let mut space = Self {
            topology,
            quadrature,
            local_geometry: local_geometry.into(),
            dss_weights: Arc::from(Vec::new()),
        };
        let mut weights: Vec<f64> = space.local_geometry.iter().map(|g| g.wj).collect();
        space.direct_stiffness_sum(&mut weights);
        space.dss_weights = weights.into();

        tracing::debug!(
            order,
            n_elements,
            n_nodes = space.n_nodes(),
            "built spectral-element space"
        );
        Ok(space)
    }

    pub fn topology(&self) -> &Arc<Topology2D> {
        &self.topology
    }

    pub fn quadrature(&self) -> &GllQuadrature {
        &self.quadrature
    }

    pub fn order(&self) -> usize {
        self.quadrature.order()
    }

    /// Nodes per direction per element.
    pub fn nq(&self) -> usize {
        self.quadrature.n_points()
    }

    pub fn nodes_per_element(&self) -> usize {
        self.nq() * self.nq()
    }

    pub fn n_elements(&self) -> usize {
        self.topology.n_elements()
    }

    /// Flat index of local node `(i, j)` of 1-based element `elem`.
    ///
    /// # Arguments
    /// * `elem` - element number, `1..=n_elements`
    /// * `i`, `j` - local node along ξ1 and ξ2, `0..nq`
    ///
    /// # Returns
    /// `ElementOutOfRange` or `IndexOutOfRange` for indices outside the space.
    pub fn node_index(&self, elem: usize, i: usize, j: usize) -> Result<usize> {
        self.check_element(elem)?;
        SemError::check_index("local node", i, self.nq())?;
        SemError::check_index("local node", j, self.nq())?;
        Ok(self.node(elem, i, j))
    }

    #[inline]
    fn node(&self, elem: usize, i: usize, j: usize) -> usize {
        let nq = self.nq();
        ((elem - 1) * nq + j) * nq + i
    }

    fn check_element(&self, elem: usize) -> Result<()> {
        let n = self.n_elements();
        if elem < 1 || elem > n {
            return Err(SemError::ElementOutOfRange {
                element: elem,
                n_elements: n,
            });
        }
        Ok(())
    }

    pub fn local_geometry(&self) -> &[LocalGeometry2D] {
        &self.local_geometry
    }

    /// Geometry of the nodes of one element, in local `(i, j)` order.
    pub fn element_geometry(&self, elem: usize) -> Result<&[LocalGeometry2D]> {
        self.check_element(elem)?;
        let npe = self.nodes_per_element();
        Ok(&self.local_geometry[(elem - 1) * npe..elem * npe])
    }

    /// Physical coordinate of every node.
    pub fn coordinates(&self) -> impl Iterator<Item = [f64; 2]> + '_ {
        self.local_geometry.iter().map(|g| g.coordinate)
    }

    /// Denominators of the weighted DSS: Σ WJ over all copies of each node.
    pub fn dss_weights(&self) -> &[f64] {
        &self.dss_weights
    }

    /// Whether both spaces discretize the same topology.
    pub fn same_topology(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.topology, &other.topology)
            || self.topology.mesh() == other.topology.mesh()
    }

    /// Local `(i, j)` of the interior node `k` (1..Nq-1) along `face`.
    #[inline]
    fn face_node(&self, face: usize, k: usize) -> (usize, usize) {
        let n = self.nq() - 1;
        match face {
            1 => (0, k),
            2 => (n, k),
            3 => (k, 0),
            _ => (k, n),
        }
    }

    /// Local `(i, j)` of corner `vertex` (1..=4).
    #[inline]
    fn vertex_node(&self, vertex: usize) -> (usize, usize) {
        let n = self.nq() - 1;
        ((vertex - 1) % 2 * n, (vertex - 1) / 2 * n)
    }

    /// Replace every shared node with the sum over all of its element copies.
    ///
    /// Face-interior nodes are paired across each interior face, corner nodes
    /// are gathered per vertex group. Unshared nodes are untouched.
    pub(crate) fn direct_stiffness_sum<P>(&self, values: &mut [P])
    where
        P: Copy + std::ops::Add<Output = P>,
    {
        let n = self.nq() - 1;
        for face in self.topology.interior_faces() {
            for k in 1..n {
                let k2 = if face.reversed { n - k } else { k };
                let (i1, j1) = self.face_node(face.face1, k);
                let (i2, j2) = self.face_node(face.face2, k2);
                let a = self.node(face.elem1, i1, j1);
                let b = self.node(face.elem2, i2, j2);
                let sum = values[a] + values[b];
                values[a] = sum;
                values[b] = sum;
            }
        }

        for group in self.topology.vertices() {
            if group.len() < 2 {
                continue;
            }
            let index = |&(elem, vertex): &(usize, usize)| {
                let (i, j) = self.vertex_node(vertex);
                self.node(elem, i, j)
            };
            let mut members = group.iter();
            let Some(first) = members.next() else {
                continue;
            };
            let sum = members.fold(values[index(&first)], |acc, m| acc + values[index(&m)]);
            for m in group.iter() {
                values[index(&m)] = sum;
            }
        }
    }
}

impl Space for SpectralElementSpace2D {
    fn n_nodes(&self) -> usize {
        self.local_geometry.len()
    }

    fn is_compatible(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.local_geometry, &other.local_geometry)
            || (self.order() == other.order()
                && self.same_topology(other)
                && self.local_geometry == other.local_geometry)
    }

    #[inline]
    fn wj(&self, node: usize) -> f64 {
        self.local_geometry[node].wj
    }

    fn describe(&self) -> String {
        format!(
            "spectral-element space (order {}, {} elements)",
            self.order(),
            self.n_elements()
        )
    }
}

/// Geometry of the bilinear map at reference point `(r, s)`.
fn bilinear_geometry(v: &[[f64; 2]; 4], r: f64, s: f64, weight: f64) -> LocalGeometry2D {
    let phi = [
        0.25 * (1.0 - r) * (1.0 - s),
        0.25 * (1.0 + r) * (1.0 - s),
        0.25 * (1.0 - r) * (1.0 + s),
        0.25 * (1.0 + r) * (1.0 + s),
    ];
    let mut coordinate = [0.0; 2];
    let mut dx_dxi = [[0.0; 2]; 2];
    for a in 0..2 {
        coordinate[a] = (0..4).map(|k| phi[k] * v[k][a]).sum();
        dx_dxi[a][0] = 0.25 * ((1.0 - s) * (v[1][a] - v[0][a]) + (1.0 + s) * (v[3][a] - v[2][a]));
        dx_dxi[a][1] = 0.25 * ((1.0 - r) * (v[2][a] - v[0][a]) + (1.0 + r) * (v[3][a] - v[1][a]));
    }
    LocalGeometry2D::new(coordinate, dx_dxi, weight)
}
